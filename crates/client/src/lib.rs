//! `ticketflow-client`
//!
//! **Responsibility:** everything between a feature call and the wire.
//!
//! This crate provides:
//! - a [`Transport`] trait with a production reqwest implementation and an
//!   in-memory fake for tests
//! - the [`ApiClient`] wrapper: bearer-token attachment on every request
//!   and global 401 handling (credential wipe + login redirect)
//! - the single envelope-normalization boundary ([`unwrap_payload`])
//! - one thin function set per backend resource under [`api`]
//!
//! No business logic lives here; the backend is authoritative.

pub mod api;
pub mod client;
pub mod envelope;
pub mod navigator;
pub mod testing;
pub mod transport;

pub use client::{ApiClient, LOGIN_PATH};
pub use envelope::unwrap_payload;
pub use navigator::Navigator;
pub use transport::{ApiRequest, Method, RawResponse, ReqwestTransport, Transport, TransportError};
