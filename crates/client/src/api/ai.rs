//! `/ai/*` endpoints.
//!
//! A suggestion is created by [`generate`] and mutated only by [`review`]
//! (approve/reject, optionally carrying edited content).

use ticketflow_core::{
    AiStats, AiSuggestion, ApiError, GenerateSuggestionRequest, ReviewSuggestionRequest,
};

use crate::client::ApiClient;
use crate::envelope::encode;

pub async fn generate(
    client: &ApiClient,
    request: &GenerateSuggestionRequest,
) -> Result<AiSuggestion, ApiError> {
    client.post("/ai/suggest-response", encode(request)?).await
}

pub async fn suggestions(
    client: &ApiClient,
    ticket_id: &str,
) -> Result<Vec<AiSuggestion>, ApiError> {
    client.get(&format!("/ai/responses/{ticket_id}"), &[]).await
}

pub async fn review(
    client: &ApiClient,
    id: &str,
    request: &ReviewSuggestionRequest,
) -> Result<AiSuggestion, ApiError> {
    client
        .patch(&format!("/ai/responses/{id}/approve"), encode(request)?)
        .await
}

pub async fn stats(client: &ApiClient) -> Result<AiStats, ApiError> {
    client.get("/ai/stats", &[]).await
}
