//! API transport shapes shared by every feature module.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The single normalized failure shape.
///
/// Every network-layer failure is folded into this before it reaches UI
/// code, which may branch on `message`/`code` but never on
/// transport-specific detail. `status` preserves the HTTP status when one
/// was received (absent for pure transport failures).
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ApiError {
    /// Network/transport failure (no HTTP response received).
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: if message.is_empty() {
                "An error occurred".to_owned()
            } else {
                message
            },
            code: None,
            details: None,
            status: None,
        }
    }

    /// Payload could not be decoded into the expected type.
    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some("decode_error".to_owned()),
            details: None,
            status: None,
        }
    }

    /// Build from a non-2xx response body, preferring the server-supplied
    /// message and falling back to a generic status line.
    pub fn from_response(status: u16, body: &Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        let code = body
            .get("code")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let details = body.get("details").cloned();
        Self {
            message,
            code,
            details,
            status: Some(status),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self.status, Some(s) if s >= 500)
    }
}

/// Paginated list envelope used by the list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// Dashboard metric summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_tickets: u64,
    pub open_tickets: u64,
    pub resolved_tickets: u64,
    pub ai_suggestions_generated: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_tickets_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_comparison: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_response_prefers_server_message() {
        let body = json!({ "message": "Ticket not found", "code": "not_found" });
        let err = ApiError::from_response(404, &body);
        assert_eq!(err.message, "Ticket not found");
        assert_eq!(err.code.as_deref(), Some("not_found"));
        assert_eq!(err.status, Some(404));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn from_response_falls_back_to_status_line() {
        let err = ApiError::from_response(502, &json!("bad gateway"));
        assert_eq!(err.message, "Request failed with status 502");
        assert!(err.is_server_error());
    }

    #[test]
    fn transport_error_never_empty() {
        assert_eq!(ApiError::transport("").message, "An error occurred");
        assert_eq!(ApiError::transport("timed out").message, "timed out");
    }

    #[test]
    fn unauthorized_detection() {
        let err = ApiError::from_response(401, &json!({ "message": "expired" }));
        assert!(err.is_unauthorized());
    }
}
