// SPDX-License-Identifier: MIT

//! Data entry CRUD routes.

use crate::error::{AppError, Result};
use crate::middleware::session::AuthUser;
use crate::models::entry::{DataEntry, DataEntryUpdate, NewDataEntry};
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
        .route("/api/data-entries", get(list_entries).post(create_entry))
        .route(
            "/api/data-entries/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}

/// List the session user's entries, newest date first.
async fn list_entries(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<DataEntry>>> {
    let entries = state.db.entries_for_user(&user.user_id).await?;
    Ok(Json(entries))
}

async fn create_entry(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewDataEntry>,
) -> Result<(StatusCode, Json<DataEntry>)> {
    payload.validate()?;

    // The referenced girl must belong to the same session user
    if state.db.girl(&user.user_id, &payload.girl_id).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "Girl {} not found",
            payload.girl_id
        )));
    }

    let entry = state.db.create_entry(&user.user_id, &payload).await?;
    tracing::debug!(entry_id = %entry.id, girl_id = %entry.girl_id, "Created data entry");
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn get_entry(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DataEntry>> {
    let entry = state
        .db
        .entry(&user.user_id, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Entry {} not found", id)))?;
    Ok(Json(entry))
}

async fn update_entry(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<DataEntryUpdate>,
) -> Result<Json<DataEntry>> {
    payload.validate()?;

    if let Some(girl_id) = &payload.girl_id {
        if state.db.girl(&user.user_id, girl_id).await?.is_none() {
            return Err(AppError::BadRequest(format!("Girl {} not found", girl_id)));
        }
    }

    let entry = state
        .db
        .update_entry(&user.user_id, &id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Entry {} not found", id)))?;
    Ok(Json(entry))
}

async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let deleted = state.db.delete_entry(&user.user_id, &id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("Entry {} not found", id)));
    }
    Ok(Json(SuccessResponse { success: true }))
}
