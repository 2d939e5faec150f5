// SPDX-License-Identifier: MIT

//! Leaderboard group tests: create, join by invite token, stats pushes,
//! ranked member listings, leave.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{body_json, create_session, create_test_app, json_request};

async fn create_group(app: &axum::Router, token: &str, name: &str) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/leaderboards",
            Some(token),
            Some(json!({ "name": name })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

fn stats(efficiency: f64, cost_per_nut: f64, total_nuts: i64) -> serde_json::Value {
    json!({
        "totalSpent": 100.0,
        "totalNuts": total_nuts,
        "costPerNut": cost_per_nut,
        "totalTime": 60,
        "totalGirls": 1,
        "efficiency": efficiency
    })
}

#[tokio::test]
async fn test_create_group_auto_joins_creator() {
    let (app, _state) = create_test_app().await;
    let token = create_session(app.clone()).await;

    let group = create_group(&app, &token, "The Lads").await;
    assert_eq!(group["name"], "The Lads");
    assert_eq!(group["memberCount"], 1);
    assert_eq!(group["isPrivate"], true);
    assert_eq!(group["inviteToken"].as_str().unwrap().len(), 8);

    // Shows up under my groups
    let response = app
        .oneshot(json_request("GET", "/api/leaderboards", Some(&token), None))
        .await
        .unwrap();
    let groups = body_json(response).await;
    assert_eq!(groups.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_blank_group_name_is_rejected() {
    let (app, _state) = create_test_app().await;
    let token = create_session(app.clone()).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/leaderboards",
            Some(&token),
            Some(json!({ "name": "   " })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_join_by_invite_token() {
    let (app, _state) = create_test_app().await;
    let creator = create_session(app.clone()).await;
    let joiner = create_session(app.clone()).await;

    let group = create_group(&app, &creator, "Crew").await;
    let invite = group["inviteToken"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/leaderboards/join",
            Some(&joiner),
            Some(json!({ "inviteToken": invite, "username": "Challenger" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["group"]["memberCount"], 2);
    assert_eq!(body["membership"]["username"], "Challenger");

    // Joining again is a 400
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/leaderboards/join",
            Some(&joiner),
            Some(json!({ "inviteToken": invite, "username": "Challenger" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown token is a 404; missing fields a 400
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/leaderboards/join",
            Some(&joiner),
            Some(json!({ "inviteToken": "00000000", "username": "x" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/leaderboards/join",
            Some(&joiner),
            Some(json!({ "inviteToken": invite })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_push_stats_and_ranked_members() {
    let (app, _state) = create_test_app().await;
    let creator = create_session(app.clone()).await;
    let joiner = create_session(app.clone()).await;

    let group = create_group(&app, &creator, "Crew").await;
    let group_id = group["id"].as_str().unwrap();
    let invite = group["inviteToken"].as_str().unwrap();

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/leaderboards/join",
            Some(&joiner),
            Some(json!({ "inviteToken": invite, "username": "Challenger" })),
        ))
        .await
        .unwrap();

    // Creator pushes weaker stats than the joiner
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/leaderboards/{}", group_id),
            Some(&creator),
            Some(stats(1.5, 40.0, 10)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);

    app.clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/leaderboards/{}", group_id),
            Some(&joiner),
            Some(stats(4.0, 20.0, 30)),
        ))
        .await
        .unwrap();

    // Default sort is efficiency descending
    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/leaderboards/{}", group_id),
            Some(&creator),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let members = body["members"].as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0]["username"], "Challenger");
    assert_eq!(members[0]["rank"], 1);
    assert_eq!(members[0]["change"], 0);
    assert_eq!(members[1]["rank"], 2);

    // costPerNut sorts ascending
    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/leaderboards/{}?sortBy=costPerNut", group_id),
            Some(&creator),
            None,
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    let members = body["members"].as_array().unwrap();
    assert_eq!(members[0]["statsCache"]["costPerNut"], 20.0);
}

#[tokio::test]
async fn test_non_members_cannot_view_group() {
    let (app, _state) = create_test_app().await;
    let creator = create_session(app.clone()).await;
    let outsider = create_session(app.clone()).await;

    let group = create_group(&app, &creator, "Private").await;
    let group_id = group["id"].as_str().unwrap();

    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/leaderboards/{}", group_id),
            Some(&outsider),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_leave_group_decrements_member_count() {
    let (app, state) = create_test_app().await;
    let creator = create_session(app.clone()).await;
    let joiner = create_session(app.clone()).await;

    let group = create_group(&app, &creator, "Crew").await;
    let group_id = group["id"].as_str().unwrap();
    let invite = group["inviteToken"].as_str().unwrap();

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/leaderboards/join",
            Some(&joiner),
            Some(json!({ "inviteToken": invite, "username": "Challenger" })),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/leaderboards/{}", group_id),
            Some(&joiner),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let group = state
        .db
        .group_by_id(group_id)
        .await
        .unwrap()
        .expect("group exists");
    assert_eq!(group.member_count, 1);

    // Leaving twice is a 404
    let response = app
        .oneshot(json_request(
            "DELETE",
            &format!("/api/leaderboards/{}", group_id),
            Some(&joiner),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
