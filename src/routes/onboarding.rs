// SPDX-License-Identifier: MIT

//! Onboarding flow routes.
//!
//! GET creates the row lazily; PUT applies a partial update; POST with
//! `{"action": "complete"}` stamps completion; DELETE resets the flow by
//! dropping the row.

use crate::error::{AppError, Result};
use crate::middleware::session::AuthUser;
use crate::models::onboarding::{OnboardingState, OnboardingUpdate};
use crate::routes::SuccessResponse;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/onboarding",
        get(get_onboarding)
            .put(update_onboarding)
            .post(post_onboarding)
            .delete(clear_onboarding),
    )
}

async fn get_onboarding(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<OnboardingState>> {
    let onboarding = state.db.get_or_create_onboarding(&user.user_id).await?;
    Ok(Json(onboarding))
}

async fn update_onboarding(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<OnboardingUpdate>,
) -> Result<Json<OnboardingState>> {
    let onboarding = state.db.update_onboarding(&user.user_id, &payload).await?;
    Ok(Json(onboarding))
}

#[derive(Debug, Deserialize)]
struct OnboardingAction {
    action: String,
}

async fn post_onboarding(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<OnboardingAction>,
) -> Result<Json<OnboardingState>> {
    if payload.action != "complete" {
        return Err(AppError::BadRequest(format!(
            "Unknown action: {}",
            payload.action
        )));
    }

    let onboarding = state.db.complete_onboarding(&user.user_id).await?;
    tracing::info!(user_id = %user.user_id, "Onboarding completed");
    Ok(Json(onboarding))
}

async fn clear_onboarding(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SuccessResponse>> {
    let success = state.db.clear_onboarding(&user.user_id).await?;
    Ok(Json(SuccessResponse { success }))
}
