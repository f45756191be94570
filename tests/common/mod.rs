//! Shared helpers for the HTTP test suite.

// not every test binary uses every helper
#![allow(dead_code)]

use std::net::SocketAddr;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use openform_api::config::ServerConfig;
use openform_api::middleware::auth::issue_token;
use openform_api::store::FormStore;
use openform_api::{build_router, ApiState};
use serde_json::{json, Value};
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret";

/// Fresh server over an empty store.
pub fn test_server() -> TestServer {
    let config = ServerConfig {
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        auth_secret: TEST_SECRET.into(),
    };
    let state = ApiState { store: FormStore::new(), config };
    TestServer::new(build_router(state)).expect("test server")
}

/// `Authorization: Bearer ...` header for `account_id`.
pub fn auth_header(account_id: Uuid) -> (HeaderName, HeaderValue) {
    let token = issue_token(account_id, TEST_SECRET, 3600).expect("token");
    (
        HeaderName::from_static("authorization"),
        HeaderValue::from_str(&format!("Bearer {token}")).expect("header value"),
    )
}

/// Create a form through the API and return the `data` payload.
pub async fn create_form(server: &TestServer, owner: Uuid, body: Value) -> Value {
    let (name, value) = auth_header(owner);
    let response = server.post("/forms").add_header(name, value).json(&body).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()["data"].clone()
}

/// Flip a form to the published state through the API.
pub async fn publish_form(server: &TestServer, owner: Uuid, form_id: &str) {
    let (name, value) = auth_header(owner);
    let response = server
        .put(&format!("/forms/{form_id}"))
        .add_header(name, value)
        .json(&json!({"status": "published"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}
