//! Navigation seam for the forced-logout redirect.
//!
//! The client wrapper has no business knowing about the router; it only
//! needs "where am I" and "go to login". The app supplies a
//! `window.location`-backed implementation, tests supply a recorder.

pub trait Navigator: Send + Sync {
    /// Current location path (e.g. `/tickets/42`).
    fn current_path(&self) -> String;

    /// Hard client-side redirect.
    fn redirect(&self, path: &str);
}
