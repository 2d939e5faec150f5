// SPDX-License-Identifier: MIT

//! User and session identity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account record, keyed by an opaque session token.
///
/// There is no password or OAuth identity here: possession of the session
/// token *is* the account. This is a deliberate soft identity (the token is
/// not a cryptographic credential), so the token never expires or rotates.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub session_token: String,
    pub is_anonymous: bool,
    /// One of "free", "premium", "lifetime"
    pub subscription_tier: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
