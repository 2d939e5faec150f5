// SPDX-License-Identifier: MIT

//! Girl CRUD routes.

use crate::error::{AppError, Result};
use crate::middleware::session::AuthUser;
use crate::models::girl::{Girl, GirlUpdate, NewGirl};
use crate::routes::SuccessResponse;
use crate::AppState;
use axum::http::StatusCode;
use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/girls", get(list_girls).post(create_girl))
        .route(
            "/api/girls/{id}",
            get(get_girl).put(update_girl).delete(delete_girl),
        )
}

/// List the session user's girls, newest first.
async fn list_girls(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Girl>>> {
    let girls = state.db.girls_for_user(&user.user_id).await?;
    Ok(Json(girls))
}

async fn create_girl(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewGirl>,
) -> Result<(StatusCode, Json<Girl>)> {
    payload.validate()?;
    let girl = state.db.create_girl(&user.user_id, &payload).await?;
    tracing::debug!(girl_id = %girl.id, "Created girl");
    Ok((StatusCode::CREATED, Json(girl)))
}

async fn get_girl(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Girl>> {
    let girl = state
        .db
        .girl(&user.user_id, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Girl {} not found", id)))?;
    Ok(Json(girl))
}

async fn update_girl(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<GirlUpdate>,
) -> Result<Json<Girl>> {
    if let Some(rating) = payload.rating {
        if !(0.0..=10.0).contains(&rating) {
            return Err(AppError::BadRequest(
                "rating must be between 0 and 10".to_string(),
            ));
        }
    }
    if let Some(age) = payload.age {
        if age < 18 {
            return Err(AppError::BadRequest("age must be at least 18".to_string()));
        }
    }

    let girl = state
        .db
        .update_girl(&user.user_id, &id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Girl {} not found", id)))?;
    Ok(Json(girl))
}

async fn delete_girl(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let deleted = state.db.delete_girl(&user.user_id, &id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("Girl {} not found", id)));
    }
    Ok(Json(SuccessResponse { success: true }))
}
