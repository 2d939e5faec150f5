// SPDX-License-Identifier: MIT

//! Session routes.
//!
//! `POST /api/session` is the only place users are created. A client may
//! bring its own token (generated locally, a UUID), in which case the call
//! is create-or-return; with no token at all the server mints one. A token
//! that only arrives via cookie or header is never auto-registered, so a
//! stale client token yields a 401 and the client starts a fresh session.

use crate::error::{AppError, Result};
use crate::middleware::session::{extract_session_token, SESSION_COOKIE};
use crate::AppState;
use axum::http::{HeaderMap, StatusCode};
use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/session", post(create_session).get(get_session))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSessionRequest {
    pub session_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: String,
    pub session_token: String,
    pub is_anonymous: bool,
    pub is_new_user: bool,
}

fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .same_site(SameSite::Lax)
        .http_only(false)
        .build()
}

/// Create or resume a session.
async fn create_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<(StatusCode, CookieJar, Json<SessionResponse>)> {
    if let Some(token) = &payload.session_token {
        if Uuid::parse_str(token).is_err() {
            return Err(AppError::BadRequest(
                "sessionToken must be a UUID".to_string(),
            ));
        }

        // Create-or-return for a client-supplied token
        let (user, is_new) = match state.db.user_by_token(token).await? {
            Some(user) => (user, false),
            None => (state.db.create_user(token).await?, true),
        };

        let status = if is_new {
            StatusCode::CREATED
        } else {
            StatusCode::OK
        };
        return Ok((
            status,
            jar.add(session_cookie(token)),
            Json(SessionResponse {
                user_id: user.id,
                session_token: user.session_token,
                is_anonymous: user.is_anonymous,
                is_new_user: is_new,
            }),
        ));
    }

    if let Some(token) = extract_session_token(&jar, &headers) {
        // Ambient token: resume only, never auto-register
        let user = state
            .db
            .user_by_token(&token)
            .await?
            .ok_or(AppError::Unauthorized)?;
        return Ok((
            StatusCode::OK,
            jar.add(session_cookie(&user.session_token)),
            Json(SessionResponse {
                session_token: user.session_token.clone(),
                user_id: user.id,
                is_anonymous: user.is_anonymous,
                is_new_user: false,
            }),
        ));
    }

    // Nothing at all: mint a fresh session
    let token = Uuid::new_v4().to_string();
    let user = state.db.create_user(&token).await?;
    tracing::info!(user_id = %user.id, "Created anonymous session");

    Ok((
        StatusCode::CREATED,
        jar.add(session_cookie(&token)),
        Json(SessionResponse {
            user_id: user.id,
            session_token: token,
            is_anonymous: true,
            is_new_user: true,
        }),
    ))
}

/// Look up the session behind the presented token. 401 if absent or unknown.
async fn get_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>> {
    let token = extract_session_token(&jar, &headers).ok_or(AppError::Unauthorized)?;
    let user = state
        .db
        .user_by_token(&token)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(SessionResponse {
        user_id: user.id,
        session_token: user.session_token,
        is_anonymous: user.is_anonymous,
        is_new_user: false,
    }))
}
