// SPDX-License-Identifier: MIT

//! Achievement routes.
//!
//! The server is a passive ledger: unlock checks run client-side and the
//! API records what the client reports, plus per-type progress upserts.

use crate::error::{AppError, Result};
use crate::middleware::session::AuthUser;
use crate::models::achievement::{Achievement, AchievementProgress, NewAchievement};
use crate::AppState;
use axum::http::StatusCode;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/achievements",
            get(list_achievements).post(unlock_achievement),
        )
        .route(
            "/api/achievements/progress",
            get(list_progress).put(update_progress),
        )
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementsResponse {
    pub achievements: Vec<Achievement>,
    pub total_points: i64,
}

async fn list_achievements(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<AchievementsResponse>> {
    let achievements = state.db.achievements_for_user(&user.user_id).await?;
    let total_points = state.db.total_points(&user.user_id).await?;
    Ok(Json(AchievementsResponse {
        achievements,
        total_points,
    }))
}

async fn unlock_achievement(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewAchievement>,
) -> Result<(StatusCode, Json<Achievement>)> {
    payload.validate()?;
    let achievement = state.db.unlock_achievement(&user.user_id, &payload).await?;
    tracing::info!(
        user_id = %user.user_id,
        achievement_id = %achievement.achievement_id,
        tier = %achievement.tier,
        "Achievement unlocked"
    );
    Ok((StatusCode::CREATED, Json(achievement)))
}

async fn list_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<AchievementProgress>>> {
    let progress = state.db.progress_for_user(&user.user_id).await?;
    Ok(Json(progress))
}

/// All fields optional at the serde level so the error is a consistent 400
/// instead of a deserialization reject.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressUpdate {
    pub achievement_type: Option<String>,
    pub current_value: Option<f64>,
    pub target_value: Option<f64>,
}

async fn update_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ProgressUpdate>,
) -> Result<Json<AchievementProgress>> {
    let (Some(achievement_type), Some(current_value), Some(target_value)) = (
        payload.achievement_type,
        payload.current_value,
        payload.target_value,
    ) else {
        return Err(AppError::BadRequest(
            "Missing required fields".to_string(),
        ));
    };

    let progress = state
        .db
        .upsert_progress(&user.user_id, &achievement_type, current_value, target_value)
        .await?;
    Ok(Json(progress))
}
