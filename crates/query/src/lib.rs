//! `ticketflow-query`
//!
//! **Responsibility:** the key-addressed request cache between feature
//! calls and the wire.
//!
//! A cache entry is a server-owned snapshot with a staleness window, never
//! a source of truth: mutations invalidate affected key prefixes and force
//! the next read to refetch instead of trusting a locally patched value.
//! Concurrent reads of structurally equal keys share one in-flight fetch;
//! failed fetches retry with capped exponential backoff.
//!
//! Timers and background tasks go through the [`runtime`] seams so the same
//! cache runs under native tokio (tests, dev shells) and the browser event
//! loop (WASM).

pub mod cache;
pub mod key;
pub mod runtime;

pub use cache::{MutationOptions, QueryCache, QueryOptions, backoff_delay};
pub use key::{QueryKey, keys};
pub use runtime::{Sleep, Spawn};
