// SPDX-License-Identifier: MIT

//! User settings routes. The settings row is created lazily on first read.

use crate::error::Result;
use crate::middleware::session::AuthUser;
use crate::models::settings::{SettingsUpdate, UserSettings};
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/settings", get(get_settings).put(update_settings))
}

async fn get_settings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserSettings>> {
    let settings = state.db.get_or_create_settings(&user.user_id).await?;
    Ok(Json(settings))
}

async fn update_settings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<SettingsUpdate>,
) -> Result<Json<UserSettings>> {
    let settings = state.db.update_settings(&user.user_id, &payload).await?;
    Ok(Json(settings))
}
