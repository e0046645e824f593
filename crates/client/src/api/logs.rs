//! `/logs/*` endpoints (admin surface, read-only).

use serde_json::Value;

use ticketflow_core::{ActivityLog, ApiError, Paginated};

use crate::client::ApiClient;

pub async fn list(
    client: &ApiClient,
    page: u32,
    limit: u32,
) -> Result<Paginated<ActivityLog>, ApiError> {
    let query = [
        ("page".to_owned(), page.to_string()),
        ("limit".to_owned(), limit.to_string()),
    ];
    client.get("/logs", &query).await
}

/// Aggregate log counters. The shape is backend-defined and rendered
/// opportunistically by the admin page, so it stays untyped here.
pub async fn stats(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/logs/stats", &[]).await
}
