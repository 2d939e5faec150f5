// SPDX-License-Identifier: MIT

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use cpn_tracker::config::Config;
use cpn_tracker::db::Db;
use cpn_tracker::middleware::session::SESSION_HEADER;
use cpn_tracker::routes::create_router;
use cpn_tracker::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app backed by an in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = Db::in_memory().await.expect("in-memory db");

    let state = Arc::new(AppState { config, db });
    (create_router(state.clone()), state)
}

/// Build a JSON request with an optional session token header.
#[allow(dead_code)]
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(SESSION_HEADER, token);
    }

    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };

    builder.body(body).unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a session and return its token. The router is Clone, so tests
/// call this with `app.clone()`.
#[allow(dead_code)]
pub async fn create_session(app: axum::Router) -> String {
    let response = app
        .oneshot(json_request("POST", "/api/session", None, Some(serde_json::json!({}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    body["sessionToken"].as_str().unwrap().to_string()
}
