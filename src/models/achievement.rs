// SPDX-License-Identifier: MIT

//! Unlocked achievements and per-type progress tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// An unlocked achievement. Unlock checks happen client-side; the server
/// just records what the client reports.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    #[serde(skip)]
    pub user_id: String,
    pub achievement_type: String,
    pub achievement_id: String,
    /// "bronze", "silver", "gold", "diamond"
    pub tier: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub points: i64,
    pub unlocked_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Payload for `POST /api/achievements`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewAchievement {
    #[validate(length(min = 1, message = "achievementType is required"))]
    pub achievement_type: String,
    #[validate(length(min = 1, message = "achievementId is required"))]
    pub achievement_id: String,
    #[validate(length(min = 1, message = "tier is required"))]
    pub tier: String,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[validate(range(min = 0, message = "points must be non-negative"))]
    #[serde(default)]
    pub points: i64,
}

/// Progress toward an achievement type, upserted on (user, type).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AchievementProgress {
    pub id: String,
    #[serde(skip)]
    pub user_id: String,
    pub achievement_type: String,
    pub current_value: f64,
    pub target_value: f64,
    pub last_checked: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
