// SPDX-License-Identifier: MIT

//! Session token authentication middleware.
//!
//! Identity is an opaque session token, not a credential. The token is
//! looked for in three places in order: the session cookie, the
//! `Authorization: Bearer` header, then the `x-session-token` header.
//! An unknown token is a 401, never an implicit user creation; only
//! `POST /api/session` mints users.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Cookie that carries the session token.
pub const SESSION_COOKIE: &str = "cpn_session_token";
/// Fallback header for clients that cannot send cookies.
pub const SESSION_HEADER: &str = "x-session-token";

/// Authenticated user resolved from a session token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

/// Pull the session token out of a request, cookie first.
pub fn extract_session_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    if let Some(auth) = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        if let Some(token) = auth.strip_prefix("Bearer ") {
            return Some(token.to_string());
        }
    }

    headers
        .get(SESSION_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|t| t.to_string())
}

/// Middleware that requires a session token belonging to a known user.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token =
        extract_session_token(&jar, request.headers()).ok_or(AppError::Unauthorized)?;

    let user = state
        .db
        .user_by_token(&token)
        .await?
        .ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(AuthUser { user_id: user.id });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_cookie_wins_over_headers() {
        let jar = CookieJar::new().add(axum_extra::extract::cookie::Cookie::new(
            SESSION_COOKIE,
            "from-cookie",
        ));
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-bearer"),
        );
        headers.insert(SESSION_HEADER, HeaderValue::from_static("from-header"));

        assert_eq!(
            extract_session_token(&jar, &headers).as_deref(),
            Some("from-cookie")
        );
    }

    #[test]
    fn test_bearer_then_custom_header() {
        let jar = CookieJar::new();
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, HeaderValue::from_static("from-header"));

        assert_eq!(
            extract_session_token(&jar, &headers).as_deref(),
            Some("from-header")
        );

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-bearer"),
        );
        assert_eq!(
            extract_session_token(&jar, &headers).as_deref(),
            Some("from-bearer")
        );
    }

    #[test]
    fn test_no_token_anywhere() {
        assert_eq!(extract_session_token(&CookieJar::new(), &HeaderMap::new()), None);
    }
}
