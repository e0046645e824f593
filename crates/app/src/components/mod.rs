pub mod ai_panel;
pub mod display;
pub mod layout;
