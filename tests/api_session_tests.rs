// SPDX-License-Identifier: MIT

//! Session lifecycle tests.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{body_json, create_test_app, json_request};

#[tokio::test]
async fn test_create_session_without_token_mints_one() {
    let (app, _state) = create_test_app().await;

    let response = app
        .oneshot(json_request("POST", "/api/session", None, Some(json!({}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert!(body["isNewUser"].as_bool().unwrap());
    assert!(body["isAnonymous"].as_bool().unwrap());
    // The minted token is a UUID
    let token = body["sessionToken"].as_str().unwrap();
    assert_eq!(token.len(), 36);
}

#[tokio::test]
async fn test_client_token_is_create_or_return() {
    let (app, _state) = create_test_app().await;
    let token = "7c9e6679-7425-40de-944b-e07fc1f90ae7";

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/session",
            None,
            Some(json!({ "sessionToken": token })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let first = body_json(response).await;
    assert!(first["isNewUser"].as_bool().unwrap());

    // Same token again resumes the same user
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/session",
            None,
            Some(json!({ "sessionToken": token })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await;
    assert!(!second["isNewUser"].as_bool().unwrap());
    assert_eq!(first["userId"], second["userId"]);
}

#[tokio::test]
async fn test_non_uuid_client_token_is_rejected() {
    let (app, _state) = create_test_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/session",
            None,
            Some(json!({ "sessionToken": "definitely-not-a-uuid" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ambient_unknown_token_is_unauthorized() {
    let (app, _state) = create_test_app().await;

    // Token arrives only via header, so it must already exist
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/session",
            Some("7c9e6679-7425-40de-944b-e07fc1f90ae7"),
            Some(json!({})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_session_round_trip() {
    let (app, _state) = create_test_app().await;
    let token = common::create_session(app.clone()).await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/session", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["sessionToken"].as_str().unwrap(), token);

    // No token at all
    let response = app
        .oneshot(json_request("GET", "/api/session", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_cookie_is_set() {
    let (app, _state) = create_test_app().await;

    let response = app
        .oneshot(json_request("POST", "/api/session", None, Some(json!({}))))
        .await
        .unwrap();

    let cookie = response
        .headers()
        .get(axum::http::header::SET_COOKIE)
        .expect("Set-Cookie header")
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("cpn_session_token="));
    assert!(cookie.contains("Path=/"));
}
