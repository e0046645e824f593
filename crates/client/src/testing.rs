//! In-memory doubles for the transport and navigation seams.
//!
//! These back the contract tests for the request/cache/session
//! orchestration without a live backend.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::Value;

use crate::navigator::Navigator;
use crate::transport::{ApiRequest, RawResponse, Transport, TransportError};

/// Scripted transport: responses are served FIFO and every request is
/// recorded for assertion.
#[derive(Debug, Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, status: u16, body: Value) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(Ok(RawResponse { status, body }));
        }
    }

    pub fn push_transport_error(&self, message: impl Into<String>) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(Err(TransportError(message.into())));
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        self.responses
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or_else(|| Err(TransportError("no scripted response".to_owned())))
    }
}

/// Navigator double: records redirects and lets tests set the current path.
#[derive(Debug)]
pub struct RecordingNavigator {
    path: Mutex<String>,
    redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            path: Mutex::new(path.into()),
            redirects: Mutex::new(Vec::new()),
        }
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn redirect(&self, path: &str) {
        if let Ok(mut current) = self.path.lock() {
            *current = path.to_owned();
        }
        if let Ok(mut redirects) = self.redirects.lock() {
            redirects.push(path.to_owned());
        }
    }
}
