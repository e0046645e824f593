//! `ticketflow-state`
//!
//! **Responsibility:** process-wide client state (authenticated session and
//! UI preferences) persisted through a pluggable storage adapter.
//!
//! Stores are explicit injectable containers rather than ambient globals:
//! production wires browser `localStorage`, tests wire an in-memory map.
//! All mutation happens on the single UI thread; the locks exist to give
//! the handles a clean `Clone`/share story, not to arbitrate contention.

pub mod session;
pub mod storage;
pub mod ui;

pub use session::SessionStore;
pub use storage::{MemoryStorage, StorageAdapter};
pub use ui::{Theme, UiStore};

#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStorage;

/// Storage key for the raw bearer token, read by the HTTP client.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Storage key for the serialized session snapshot.
pub const AUTH_STORAGE_KEY: &str = "auth-storage";
/// Storage key for the serialized UI preferences.
pub const UI_STORAGE_KEY: &str = "ui-storage";
