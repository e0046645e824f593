//! `/auth/*` endpoints.

use ticketflow_core::{ApiError, AuthResponse, LoginCredentials, RegisterData, User};

use crate::client::ApiClient;
use crate::envelope::encode;

pub async fn login(
    client: &ApiClient,
    credentials: &LoginCredentials,
) -> Result<AuthResponse, ApiError> {
    client.post("/auth/login", encode(credentials)?).await
}

pub async fn register(client: &ApiClient, data: &RegisterData) -> Result<AuthResponse, ApiError> {
    client.post("/auth/register", encode(data)?).await
}

/// Best-effort server-side session teardown; local state is cleared by the
/// session store regardless of the outcome.
pub async fn logout(client: &ApiClient) -> Result<(), ApiError> {
    let _: serde_json::Value = client.post("/auth/logout", serde_json::Value::Null).await?;
    Ok(())
}

pub async fn me(client: &ApiClient) -> Result<User, ApiError> {
    client.get("/auth/me", &[]).await
}
