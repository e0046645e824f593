//! `/users/*` endpoints (admin surface).

use serde_json::json;

use ticketflow_core::{ApiError, Paginated, User, UserRole};

use crate::client::ApiClient;

pub async fn list(client: &ApiClient, page: u32, limit: u32) -> Result<Paginated<User>, ApiError> {
    let query = [
        ("page".to_owned(), page.to_string()),
        ("limit".to_owned(), limit.to_string()),
    ];
    client.get("/users", &query).await
}

pub async fn update_role(client: &ApiClient, id: &str, role: UserRole) -> Result<User, ApiError> {
    client
        .patch(&format!("/users/{id}/role"), json!({ "role": role }))
        .await
}

pub async fn update_status(
    client: &ApiClient,
    id: &str,
    is_active: bool,
) -> Result<User, ApiError> {
    client
        .patch(&format!("/users/{id}/status"), json!({ "isActive": is_active }))
        .await
}
