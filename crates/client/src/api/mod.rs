//! One thin function set per backend resource. Each function is a direct
//! call through [`crate::ApiClient`]; envelope handling and error
//! normalization happen inside the client.

pub mod ai;
pub mod auth;
pub mod logs;
pub mod tickets;
pub mod users;
