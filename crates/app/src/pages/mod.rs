pub mod admin;
pub mod ai_insights;
pub mod dashboard;
pub mod login;
pub mod misc;
pub mod register;
pub mod ticket_detail;
pub mod ticket_new;
pub mod tickets;
