// SPDX-License-Identifier: MIT

//! Leaderboard group and membership models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

use crate::models::stats::{guarded_div, GlobalStats};

/// A small invite-only group comparing cached aggregate stats.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardGroup {
    pub id: String,
    pub name: String,
    pub created_by: String,
    /// Short opaque join token (first 8 chars of a uuid)
    pub invite_token: String,
    pub is_private: bool,
    pub member_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user's membership in a group, with their denormalized stats snapshot.
///
/// `stats_cache` is refreshed only by explicit client push
/// (`PUT /api/leaderboards/{groupId}`), never recomputed server-side.
/// Concurrent pushes are last-write-wins.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardMembership {
    pub id: String,
    pub group_id: String,
    pub user_id: String,
    pub username: String,
    pub stats_cache: Json<LeaderboardStats>,
    pub joined_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// The cached snapshot each member pushes into their membership row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardStats {
    pub total_spent: f64,
    pub total_nuts: i64,
    pub cost_per_nut: f64,
    /// Total duration in minutes
    pub total_time: i64,
    pub total_girls: i64,
    /// Nuts per hour; 0.0 when no time is recorded
    pub efficiency: f64,
}

impl LeaderboardStats {
    /// Build the pushable snapshot from a user's global stats.
    pub fn from_global(stats: &GlobalStats) -> Self {
        Self {
            total_spent: stats.total_spent,
            total_nuts: stats.total_nuts,
            cost_per_nut: guarded_div(stats.total_spent, stats.total_nuts as f64),
            total_time: stats.total_time,
            total_girls: stats.total_girls,
            efficiency: guarded_div(stats.total_nuts as f64, stats.total_time as f64 / 60.0),
        }
    }
}
