// SPDX-License-Identifier: MIT

//! Achievement recording and progress upsert tests.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{body_json, create_session, create_test_app, json_request};

fn unlock_body(achievement_id: &str, tier: &str, points: i64) -> serde_json::Value {
    json!({
        "achievementType": "spending",
        "achievementId": achievement_id,
        "tier": tier,
        "title": "Big Spender",
        "points": points
    })
}

#[tokio::test]
async fn test_unlock_and_total_points() {
    let (app, _state) = create_test_app().await;
    let token = create_session(app.clone()).await;

    // Empty ledger
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/achievements", Some(&token), None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["totalPoints"], 0);
    assert!(body["achievements"].as_array().unwrap().is_empty());

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/achievements",
            Some(&token),
            Some(unlock_body("spending-bronze", "bronze", 10)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let unlocked = body_json(response).await;
    assert_eq!(unlocked["tier"], "bronze");

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/achievements",
            Some(&token),
            Some(unlock_body("spending-silver", "silver", 25)),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request("GET", "/api/achievements", Some(&token), None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["achievements"].as_array().unwrap().len(), 2);
    assert_eq!(body["totalPoints"], 35);
}

#[tokio::test]
async fn test_unlock_validation() {
    let (app, _state) = create_test_app().await;
    let token = create_session(app.clone()).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/achievements",
            Some(&token),
            Some(json!({
                "achievementType": "spending",
                "achievementId": "",
                "tier": "bronze",
                "title": "X"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_progress_upsert() {
    let (app, _state) = create_test_app().await;
    let token = create_session(app.clone()).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/achievements/progress",
            Some(&token),
            Some(json!({
                "achievementType": "spending",
                "currentValue": 150.0,
                "targetValue": 500.0
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let progress = body_json(response).await;
    assert_eq!(progress["currentValue"], 150.0);

    // Second put replaces, not duplicates
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/achievements/progress",
            Some(&token),
            Some(json!({
                "achievementType": "spending",
                "currentValue": 300.0,
                "targetValue": 500.0
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/achievements/progress",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    let list = body_json(response).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["currentValue"], 300.0);
}

#[tokio::test]
async fn test_progress_missing_fields() {
    let (app, _state) = create_test_app().await;
    let token = create_session(app.clone()).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/achievements/progress",
            Some(&token),
            Some(json!({ "achievementType": "spending" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "bad_request");
    assert_eq!(body["details"], "Missing required fields");
}
