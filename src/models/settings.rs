// SPDX-License-Identifier: MIT

//! Per-user settings with a get-or-create-then-update lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// Stored settings row. Presentation fields are free-form strings; the
/// frontend owns the value vocabulary ("dark"/"darker"/"midnight" etc).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub id: String,
    #[serde(skip)]
    pub user_id: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub theme: String,
    pub accent_color: String,
    pub compact_mode: bool,
    pub animations_enabled: bool,
    pub date_format: String,
    pub time_format: String,
    pub week_start: String,
    pub privacy_settings: Json<PrivacySettings>,
    pub notification_settings: Json<NotificationSettings>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrivacySettings {
    pub leaderboard_visibility: String,
    pub show_real_name: bool,
    pub show_profile_stats: bool,
    pub allow_invitations: bool,
    pub share_achievements: bool,
    pub share_spending_data: bool,
    pub share_efficiency_metrics: bool,
    pub share_activity_frequency: bool,
    pub anonymous_mode: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            leaderboard_visibility: "private".to_string(),
            show_real_name: false,
            show_profile_stats: true,
            allow_invitations: true,
            share_achievements: true,
            share_spending_data: false,
            share_efficiency_metrics: true,
            share_activity_frequency: false,
            anonymous_mode: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub leaderboard_updates: bool,
    pub achievement_unlocks: bool,
    pub weekly_summaries: bool,
    pub monthly_summaries: bool,
    pub email_notifications: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            leaderboard_updates: true,
            achievement_unlocks: true,
            weekly_summaries: true,
            monthly_summaries: false,
            email_notifications: false,
        }
    }
}

/// Partial update for `PUT /api/settings`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animations_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_settings: Option<PrivacySettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_settings: Option<NotificationSettings>,
}

impl SettingsUpdate {
    /// Apply the set fields to an existing record.
    pub fn apply(&self, settings: &mut UserSettings) {
        if let Some(display_name) = &self.display_name {
            settings.display_name = display_name.clone();
        }
        if let Some(avatar_url) = &self.avatar_url {
            settings.avatar_url = Some(avatar_url.clone());
        }
        if let Some(theme) = &self.theme {
            settings.theme = theme.clone();
        }
        if let Some(accent_color) = &self.accent_color {
            settings.accent_color = accent_color.clone();
        }
        if let Some(compact_mode) = self.compact_mode {
            settings.compact_mode = compact_mode;
        }
        if let Some(animations_enabled) = self.animations_enabled {
            settings.animations_enabled = animations_enabled;
        }
        if let Some(date_format) = &self.date_format {
            settings.date_format = date_format.clone();
        }
        if let Some(time_format) = &self.time_format {
            settings.time_format = time_format.clone();
        }
        if let Some(week_start) = &self.week_start {
            settings.week_start = week_start.clone();
        }
        if let Some(privacy) = &self.privacy_settings {
            settings.privacy_settings = Json(privacy.clone());
        }
        if let Some(notifications) = &self.notification_settings {
            settings.notification_settings = Json(notifications.clone());
        }
    }
}
