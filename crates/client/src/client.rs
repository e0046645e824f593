//! The configured request client.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use ticketflow_core::ApiError;
use ticketflow_state::{ACCESS_TOKEN_KEY, AUTH_STORAGE_KEY, StorageAdapter};

use crate::envelope::unwrap_payload;
use crate::navigator::Navigator;
use crate::transport::{ApiRequest, Method, Transport};

/// Path of the login screen, excluded from the 401 redirect to avoid a
/// redirect loop.
pub const LOGIN_PATH: &str = "/login";

struct ClientInner {
    base_url: String,
    transport: Arc<dyn Transport>,
    storage: Arc<dyn StorageAdapter>,
    navigator: Arc<dyn Navigator>,
}

/// A single configured HTTP client with two cross-cutting behaviors:
/// attach the stored bearer token to every outbound request, and on a 401
/// wipe stored credentials and force navigation to the login screen.
///
/// This is the only component that mutates the auth storage keys from the
/// read side; the session store owns writes on login/logout.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        storage: Arc<dyn StorageAdapter>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            inner: Arc::new(ClientInner {
                base_url,
                transport,
                storage,
                navigator,
            }),
        }
    }

    /// Issue a request and normalize the outcome.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        let bearer = self.inner.storage.get(ACCESS_TOKEN_KEY);
        let request = ApiRequest {
            method,
            url: format!("{}{}", self.inner.base_url, path),
            query: query.to_vec(),
            body,
            bearer,
        };

        tracing::debug!(method = method.as_str(), path, "api request");

        let response = self
            .inner
            .transport
            .send(request)
            .await
            .map_err(|err| ApiError::transport(err.to_string()))?;

        if response.status == 401 {
            self.force_logout();
            return Err(ApiError::from_response(401, &response.body));
        }

        if !response.is_success() {
            let err = ApiError::from_response(response.status, &response.body);
            tracing::debug!(status = response.status, message = %err.message, "api error");
            return Err(err);
        }

        unwrap_payload(response.body)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        self.request(Method::Get, path, None, query).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T, ApiError> {
        self.request(Method::Post, path, Some(body), &[]).await
    }

    pub async fn patch<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T, ApiError> {
        self.request(Method::Patch, path, Some(body), &[]).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let _: Value = self.request(Method::Delete, path, None, &[]).await?;
        Ok(())
    }

    /// Global 401 handling: wipe stored credentials and, unless already on
    /// the login screen, redirect there. Exactly one redirect per failing
    /// response; never a loop.
    fn force_logout(&self) {
        tracing::info!("received 401, clearing credentials");
        self.inner.storage.remove(ACCESS_TOKEN_KEY);
        self.inner.storage.remove(AUTH_STORAGE_KEY);

        if !self.inner.navigator.current_path().contains(LOGIN_PATH) {
            self.inner.navigator.redirect(LOGIN_PATH);
        }
    }
}
