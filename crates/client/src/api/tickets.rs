//! `/tickets/*` endpoints.

use serde_json::json;

use ticketflow_core::{
    ApiError, CreateTicketData, Paginated, Ticket, TicketActivity, TicketFilters, UpdateTicketData,
};

use crate::client::ApiClient;
use crate::envelope::encode;

pub async fn list(
    client: &ApiClient,
    filters: &TicketFilters,
) -> Result<Paginated<Ticket>, ApiError> {
    client.get("/tickets", &filters.to_query()).await
}

pub async fn get(client: &ApiClient, id: &str) -> Result<Ticket, ApiError> {
    client.get(&format!("/tickets/{id}"), &[]).await
}

pub async fn create(client: &ApiClient, data: &CreateTicketData) -> Result<Ticket, ApiError> {
    client.post("/tickets", encode(data)?).await
}

pub async fn update(
    client: &ApiClient,
    id: &str,
    data: &UpdateTicketData,
) -> Result<Ticket, ApiError> {
    client.patch(&format!("/tickets/{id}"), encode(data)?).await
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client.delete(&format!("/tickets/{id}")).await
}

pub async fn activities(client: &ApiClient, id: &str) -> Result<Vec<TicketActivity>, ApiError> {
    client.get(&format!("/tickets/{id}/activities"), &[]).await
}

pub async fn add_comment(
    client: &ApiClient,
    id: &str,
    content: &str,
) -> Result<TicketActivity, ApiError> {
    client
        .post(&format!("/tickets/{id}/comments"), json!({ "content": content }))
        .await
}
