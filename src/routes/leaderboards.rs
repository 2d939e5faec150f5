// SPDX-License-Identifier: MIT

//! Leaderboard group routes.
//!
//! Groups are joined by an opaque 8-character invite token. Member stats
//! are denormalized snapshots pushed by each client; the server ranks the
//! cached snapshots and never recomputes them.

use crate::error::{AppError, Result};
use crate::middleware::session::AuthUser;
use crate::models::leaderboard::{LeaderboardGroup, LeaderboardMembership, LeaderboardStats};
use crate::routes::SuccessResponse;
use crate::services::ranking::{rank_members, RankedMember, SortBy};
use crate::AppState;
use axum::http::StatusCode;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/leaderboards", get(list_groups).post(create_group))
        .route("/api/leaderboards/join", post(join_group))
        .route(
            "/api/leaderboards/{group_id}",
            get(get_group).put(push_stats).delete(leave_group),
        )
}

async fn list_groups(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<LeaderboardGroup>>> {
    let groups = state.db.groups_for_user(&user.user_id).await?;
    Ok(Json(groups))
}

#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
}

async fn create_group(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<LeaderboardGroup>)> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Group name is required".to_string()));
    }

    let group = state.db.create_group(&user.user_id, name).await?;
    tracing::info!(group_id = %group.id, "Created leaderboard group");
    Ok((StatusCode::CREATED, Json(group)))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JoinGroupRequest {
    pub invite_token: Option<String>,
    pub username: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGroupResponse {
    pub group: LeaderboardGroup,
    pub membership: LeaderboardMembership,
}

async fn join_group(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<JoinGroupRequest>,
) -> Result<Json<JoinGroupResponse>> {
    let (Some(invite_token), Some(username)) = (payload.invite_token, payload.username) else {
        return Err(AppError::BadRequest(
            "inviteToken and username are required".to_string(),
        ));
    };

    let group = state
        .db
        .group_by_invite_token(&invite_token)
        .await?
        .ok_or_else(|| AppError::NotFound("Invalid invite token".to_string()))?;

    let membership = state
        .db
        .join_group(&group.id, &user.user_id, &username)
        .await?
        .ok_or_else(|| AppError::BadRequest("Already a member of this group".to_string()))?;

    // Re-read for the bumped member_count
    let group = state
        .db
        .group_by_id(&group.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Invalid invite token".to_string()))?;

    tracing::info!(group_id = %group.id, "Joined leaderboard group");
    Ok(Json(JoinGroupResponse { group, membership }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MembersQuery {
    pub sort_by: Option<SortBy>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    pub group: LeaderboardGroup,
    pub members: Vec<RankedMember>,
}

/// Group details plus ranked members. Only members may look.
async fn get_group(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(group_id): Path<String>,
    Query(query): Query<MembersQuery>,
) -> Result<Json<GroupResponse>> {
    let group = state
        .db
        .group_by_id(&group_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Group {} not found", group_id)))?;

    let members = state.db.members_for_group(&group_id).await?;
    if !members.iter().any(|m| m.user_id == user.user_id) {
        return Err(AppError::NotFound(format!("Group {} not found", group_id)));
    }

    let members = rank_members(members, query.sort_by.unwrap_or_default());
    Ok(Json(GroupResponse { group, members }))
}

/// Push the caller's stats snapshot into their membership row.
async fn push_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(group_id): Path<String>,
    Json(stats): Json<LeaderboardStats>,
) -> Result<Json<SuccessResponse>> {
    let updated = state
        .db
        .update_member_stats(&group_id, &user.user_id, &stats)
        .await?;
    if !updated {
        return Err(AppError::NotFound(format!("Group {} not found", group_id)));
    }
    Ok(Json(SuccessResponse { success: true }))
}

async fn leave_group(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(group_id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let left = state.db.leave_group(&group_id, &user.user_id).await?;
    if !left {
        return Err(AppError::NotFound(format!("Group {} not found", group_id)));
    }
    Ok(Json(SuccessResponse { success: true }))
}
