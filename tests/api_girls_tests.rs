// SPDX-License-Identifier: MIT

//! Girl CRUD tests: auth, validation, partial updates, isolation.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{body_json, create_session, create_test_app, json_request};

fn new_girl_body() -> serde_json::Value {
    json!({
        "name": "Alice",
        "age": 24,
        "nationality": "US",
        "rating": 8.5
    })
}

#[tokio::test]
async fn test_girls_require_session() {
    let (app, _state) = create_test_app().await;

    let response = app
        .oneshot(json_request("GET", "/api/girls", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_girl_camel_case_wire_format() {
    let (app, _state) = create_test_app().await;
    let token = create_session(app.clone()).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/girls",
            Some(&token),
            Some(json!({
                "name": "Alice",
                "age": 24,
                "nationality": "US",
                "rating": 8.5,
                "hairColor": "blonde",
                "locationCity": "Austin"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["hairColor"], "blonde");
    assert_eq!(body["locationCity"], "Austin");
    assert_eq!(body["isActive"], true);
    // Owner is server-side only
    assert!(body.get("userId").is_none());
    assert!(body.get("user_id").is_none());
}

#[tokio::test]
async fn test_create_girl_validation() {
    let (app, _state) = create_test_app().await;
    let token = create_session(app.clone()).await;

    // Empty name
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/girls",
            Some(&token),
            Some(json!({ "name": "", "age": 24, "nationality": "US", "rating": 5.0 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Underage
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/girls",
            Some(&token),
            Some(json!({ "name": "X", "age": 17, "nationality": "US", "rating": 5.0 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Rating out of range
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/girls",
            Some(&token),
            Some(json!({ "name": "X", "age": 20, "nationality": "US", "rating": 11.0 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_partial_update_leaves_other_fields() {
    let (app, _state) = create_test_app().await;
    let token = create_session(app.clone()).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/girls",
            Some(&token),
            Some(new_girl_body()),
        ))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/girls/{}", id),
            Some(&token),
            Some(json!({ "rating": 9.5 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["rating"], 9.5);
    assert_eq!(updated["name"], "Alice");
    assert_eq!(updated["age"], 24);

    // Update validation still applies
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/girls/{}", id),
            Some(&token),
            Some(json!({ "rating": -1.0 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_girl_cascades_entries() {
    let (app, state) = create_test_app().await;
    let token = create_session(app.clone()).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/girls",
            Some(&token),
            Some(new_girl_body()),
        ))
        .await
        .unwrap();
    let girl = body_json(response).await;
    let girl_id = girl["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/data-entries",
            Some(&token),
            Some(json!({
                "girlId": girl_id,
                "date": "2026-02-10",
                "amountSpent": 50.0,
                "durationMinutes": 90,
                "numberOfNuts": 2
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/girls/{}", girl_id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Entries went with her
    let user = state
        .db
        .user_by_token(&token)
        .await
        .unwrap()
        .expect("user exists");
    let entries = state.db.entries_for_user(&user.id).await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_missing_girl_is_404() {
    let (app, _state) = create_test_app().await;
    let token = create_session(app.clone()).await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/girls/nope", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(json_request("DELETE", "/api/girls/nope", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_users_cannot_see_each_others_girls() {
    let (app, _state) = create_test_app().await;
    let token_a = create_session(app.clone()).await;
    let token_b = create_session(app.clone()).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/girls",
            Some(&token_a),
            Some(new_girl_body()),
        ))
        .await
        .unwrap();
    let girl = body_json(response).await;
    let girl_id = girl["id"].as_str().unwrap();

    // B's list is empty
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/girls", Some(&token_b), None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    // B cannot fetch or delete A's girl
    let response = app
        .oneshot(json_request(
            "DELETE",
            &format!("/api/girls/{}", girl_id),
            Some(&token_b),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
