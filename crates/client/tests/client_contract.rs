//! Contract tests for the request/auth plumbing, run against the
//! in-memory transport and storage doubles.

use std::sync::Arc;

use serde_json::json;

use ticketflow_client::api;
use ticketflow_client::testing::{FakeTransport, RecordingNavigator};
use ticketflow_client::{ApiClient, Method};
use ticketflow_core::{AiSuggestionStatus, LoginCredentials, ReviewSuggestionRequest, Ticket, UserRole};
use ticketflow_state::{ACCESS_TOKEN_KEY, AUTH_STORAGE_KEY, MemoryStorage, SessionStore, StorageAdapter};

struct Harness {
    client: ApiClient,
    transport: Arc<FakeTransport>,
    storage: Arc<MemoryStorage>,
    navigator: Arc<RecordingNavigator>,
}

fn harness_at(path: &str) -> Harness {
    ticketflow_observability::init();
    let transport = Arc::new(FakeTransport::new());
    let storage = Arc::new(MemoryStorage::new());
    let navigator = Arc::new(RecordingNavigator::at(path));
    let client = ApiClient::new(
        "http://backend.test/api",
        transport.clone(),
        storage.clone(),
        navigator.clone(),
    );
    Harness {
        client,
        transport,
        storage,
        navigator,
    }
}

fn user_json(role: &str) -> serde_json::Value {
    json!({
        "id": "u-1",
        "name": "Alice",
        "email": "alice@example.com",
        "role": role,
        "status": "active",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    })
}

fn ticket_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Login broken",
        "description": "Cannot sign in since Tuesday",
        "status": status,
        "priority": "high",
        "userId": "u-1",
        "userName": "Alice",
        "createdAt": "2024-03-01T00:00:00Z",
        "updatedAt": "2024-03-01T00:00:00Z"
    })
}

#[tokio::test]
async fn bearer_token_attached_when_present() {
    let h = harness_at("/tickets");
    h.storage.set(ACCESS_TOKEN_KEY, "tok-42");
    h.transport.push_response(200, json!({ "data": ticket_json("t-1", "open") }));

    let _: Ticket = api::tickets::get(&h.client, "t-1").await.unwrap();

    let requests = h.transport.requests();
    assert_eq!(requests[0].bearer.as_deref(), Some("tok-42"));
    assert_eq!(requests[0].url, "http://backend.test/api/tickets/t-1");
    assert_eq!(requests[0].method, Method::Get);
}

#[tokio::test]
async fn anonymous_request_has_no_bearer() {
    let h = harness_at("/login");
    h.transport.push_response(200, json!({ "data": ticket_json("t-1", "open") }));

    let _: Ticket = api::tickets::get(&h.client, "t-1").await.unwrap();

    assert!(h.transport.requests()[0].bearer.is_none());
}

#[tokio::test]
async fn unwraps_both_envelope_shapes() {
    let h = harness_at("/tickets");
    h.transport.push_response(200, json!({ "data": ticket_json("t-1", "open") }));
    h.transport.push_response(200, ticket_json("t-2", "open"));

    let wrapped = api::tickets::get(&h.client, "t-1").await.unwrap();
    let bare = api::tickets::get(&h.client, "t-2").await.unwrap();

    assert_eq!(wrapped.id, "t-1");
    assert_eq!(bare.id, "t-2");
}

#[tokio::test]
async fn unauthorized_clears_credentials_and_redirects_once() {
    let h = harness_at("/tickets/7");
    h.storage.set(ACCESS_TOKEN_KEY, "stale-token");
    h.storage.set(AUTH_STORAGE_KEY, "{}");
    h.transport.push_response(401, json!({ "message": "Token expired" }));

    let err = api::tickets::get(&h.client, "t-7").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(h.storage.get(ACCESS_TOKEN_KEY).is_none());
    assert!(h.storage.get(AUTH_STORAGE_KEY).is_none());
    assert_eq!(h.navigator.redirects(), vec!["/login".to_owned()]);
}

#[tokio::test]
async fn unauthorized_on_login_page_does_not_redirect_again() {
    let h = harness_at("/login");
    h.transport.push_response(401, json!({ "message": "Bad credentials" }));

    let credentials = LoginCredentials {
        email: "alice@example.com".to_owned(),
        password: "wrong".to_owned(),
        remember_me: None,
    };
    let err = api::auth::login(&h.client, &credentials).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(h.navigator.redirects().is_empty());
}

#[tokio::test]
async fn login_success_populates_session_store() {
    let h = harness_at("/login");
    let session = SessionStore::new(h.storage.clone());
    h.transport.push_response(
        200,
        json!({ "data": { "user": user_json("agent"), "accessToken": "fresh-token" } }),
    );

    let credentials = LoginCredentials {
        email: "alice@example.com".to_owned(),
        password: "Abcdef12".to_owned(),
        remember_me: Some(true),
    };
    let auth = api::auth::login(&h.client, &credentials).await.unwrap();
    session.set_auth(auth.user, auth.access_token);

    assert!(session.is_authenticated());
    assert_eq!(h.storage.get(ACCESS_TOKEN_KEY).as_deref(), Some("fresh-token"));
}

#[tokio::test]
async fn login_failure_leaves_session_unchanged() {
    let h = harness_at("/login");
    let session = SessionStore::new(h.storage.clone());
    h.transport.push_response(400, json!({ "message": "Invalid credentials" }));

    let credentials = LoginCredentials {
        email: "alice@example.com".to_owned(),
        password: "nope".to_owned(),
        remember_me: None,
    };
    let err = api::auth::login(&h.client, &credentials).await.unwrap_err();

    assert_eq!(err.message, "Invalid credentials");
    assert!(!session.is_authenticated());
    assert!(h.storage.get(ACCESS_TOKEN_KEY).is_none());
}

#[tokio::test]
async fn session_refresh_fetches_current_user() {
    let h = harness_at("/dashboard");
    h.storage.set(ACCESS_TOKEN_KEY, "tok-9");
    h.transport.push_response(200, json!({ "data": user_json("admin") }));

    let user = api::auth::me(&h.client).await.unwrap();

    assert_eq!(user.id, "u-1");
    assert_eq!(user.role, UserRole::Admin);
    let sent = &h.transport.requests()[0];
    assert_eq!(sent.url, "http://backend.test/api/auth/me");
    assert_eq!(sent.method, Method::Get);
    assert_eq!(sent.bearer.as_deref(), Some("tok-9"));
}

#[tokio::test]
async fn stale_session_refresh_clears_credentials() {
    let h = harness_at("/dashboard");
    h.storage.set(ACCESS_TOKEN_KEY, "expired");
    h.storage.set(AUTH_STORAGE_KEY, "{}");
    h.transport.push_response(401, json!({ "message": "Token expired" }));

    let err = api::auth::me(&h.client).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(h.storage.get(ACCESS_TOKEN_KEY).is_none());
    assert_eq!(h.navigator.redirects(), vec!["/login".to_owned()]);
}

#[tokio::test]
async fn approve_with_edit_sends_edited_content() {
    let h = harness_at("/tickets/1");
    h.transport.push_response(
        200,
        json!({
            "id": "s-1",
            "ticketId": "t-1",
            "content": "original text",
            "status": "approved",
            "createdAt": "2024-03-01T00:00:00Z",
            "updatedAt": "2024-03-01T00:05:00Z",
            "editedContent": "polished text"
        }),
    );

    let request = ReviewSuggestionRequest {
        status: AiSuggestionStatus::Approved,
        edited_content: Some("polished text".to_owned()),
    };
    let suggestion = api::ai::review(&h.client, "s-1", &request).await.unwrap();

    assert_eq!(suggestion.status, AiSuggestionStatus::Approved);

    let sent = &h.transport.requests()[0];
    assert_eq!(sent.url, "http://backend.test/api/ai/responses/s-1/approve");
    let body = sent.body.as_ref().unwrap();
    assert_eq!(body["status"], "approved");
    assert_eq!(body["editedContent"], "polished text");
}

#[tokio::test]
async fn transport_failure_is_normalized() {
    let h = harness_at("/tickets");
    h.transport.push_transport_error("connection refused");

    let err = api::tickets::get(&h.client, "t-1").await.unwrap_err();

    assert_eq!(err.message, "connection refused");
    assert!(err.status.is_none());
}

#[tokio::test]
async fn server_error_message_preferred_over_status_line() {
    let h = harness_at("/tickets");
    h.transport.push_response(500, json!({ "message": "database on fire" }));
    h.transport.push_response(503, json!("unavailable"));

    let with_message = api::tickets::get(&h.client, "t-1").await.unwrap_err();
    let without_message = api::tickets::get(&h.client, "t-2").await.unwrap_err();

    assert_eq!(with_message.message, "database on fire");
    assert!(with_message.is_server_error());
    assert_eq!(without_message.message, "Request failed with status 503");
}

#[tokio::test]
async fn query_parameters_forwarded() {
    let h = harness_at("/tickets");
    h.transport.push_response(
        200,
        json!({ "data": { "data": [], "total": 0, "page": 1, "limit": 10, "totalPages": 0 } }),
    );

    let filters = ticketflow_core::TicketFilters {
        status: Some(ticketflow_core::TicketStatus::Open),
        page: Some(1),
        ..Default::default()
    };
    let page = api::tickets::list(&h.client, &filters).await.unwrap();

    assert_eq!(page.total, 0);
    let sent = &h.transport.requests()[0];
    assert!(sent.query.contains(&("status".to_owned(), "open".to_owned())));
    assert!(sent.query.contains(&("page".to_owned(), "1".to_owned())));
}
