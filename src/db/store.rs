// SPDX-License-Identifier: MIT

//! Typed database operations over a SQLite pool.
//!
//! Provides high-level operations for:
//! - Users (session-token identity)
//! - Girls and data entries (the tracked collections)
//! - Settings / onboarding / achievements (get-or-create lifecycles)
//! - Leaderboard groups and memberships

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::types::Json;
use sqlx::SqlitePool;
use std::str::FromStr;
use uuid::Uuid;

use crate::db::schema;
use crate::error::AppError;
use crate::models::achievement::{Achievement, AchievementProgress, NewAchievement};
use crate::models::entry::{DataEntry, DataEntryUpdate, NewDataEntry};
use crate::models::girl::{Girl, GirlUpdate, NewGirl};
use crate::models::leaderboard::{LeaderboardGroup, LeaderboardMembership, LeaderboardStats};
use crate::models::onboarding::{OnboardingState, OnboardingUpdate};
use crate::models::settings::{
    NotificationSettings, PrivacySettings, SettingsUpdate, UserSettings,
};
use crate::models::user::User;

/// Database client.
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Open (creating if needed) the database at `database_url` and apply
    /// the schema.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::Database(format!("Invalid DATABASE_URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        let db = Self { pool };
        db.apply_schema().await?;
        Ok(db)
    }

    /// In-memory database for tests. A single connection, so the schema
    /// survives across operations.
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| AppError::Database(e.to_string()))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let db = Self { pool };
        db.apply_schema().await?;
        Ok(db)
    }

    async fn apply_schema(&self) -> Result<(), AppError> {
        for statement in schema::SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Create an anonymous user bound to the given session token.
    pub async fn create_user(&self, session_token: &str) -> Result<User, AppError> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            session_token: session_token.to_string(),
            is_anonymous: true,
            subscription_tier: "free".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO users (id, session_token, is_anonymous, subscription_tier, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.session_token)
        .bind(user.is_anonymous)
        .bind(&user.subscription_tier)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }

    /// Look up a user by session token.
    pub async fn user_by_token(&self, session_token: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE session_token = ?")
            .bind(session_token)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    // ─── Girl Operations ─────────────────────────────────────────

    /// All girls for a user, newest first.
    pub async fn girls_for_user(&self, user_id: &str) -> Result<Vec<Girl>, AppError> {
        let girls = sqlx::query_as::<_, Girl>(
            "SELECT * FROM girls WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(girls)
    }

    pub async fn girl(&self, user_id: &str, id: &str) -> Result<Option<Girl>, AppError> {
        let girl = sqlx::query_as::<_, Girl>("SELECT * FROM girls WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(girl)
    }

    pub async fn create_girl(&self, user_id: &str, new: &NewGirl) -> Result<Girl, AppError> {
        let girl = Girl {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new.name.clone(),
            age: new.age,
            nationality: new.nationality.clone(),
            ethnicity: new.ethnicity.clone(),
            hair_color: new.hair_color.clone(),
            location_city: new.location_city.clone(),
            location_country: new.location_country.clone(),
            rating: new.rating,
            is_active: new.is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO girls (id, user_id, name, age, nationality, ethnicity, hair_color,
                                location_city, location_country, rating, is_active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&girl.id)
        .bind(&girl.user_id)
        .bind(&girl.name)
        .bind(girl.age)
        .bind(&girl.nationality)
        .bind(&girl.ethnicity)
        .bind(&girl.hair_color)
        .bind(&girl.location_city)
        .bind(&girl.location_country)
        .bind(girl.rating)
        .bind(girl.is_active)
        .bind(girl.created_at)
        .bind(girl.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(girl)
    }

    /// Partial update, fetch-modify-write. Returns None if the girl does
    /// not exist for this user.
    pub async fn update_girl(
        &self,
        user_id: &str,
        id: &str,
        update: &GirlUpdate,
    ) -> Result<Option<Girl>, AppError> {
        let Some(mut girl) = self.girl(user_id, id).await? else {
            return Ok(None);
        };

        update.apply(&mut girl);
        girl.updated_at = Utc::now();

        sqlx::query(
            "UPDATE girls SET name = ?, age = ?, nationality = ?, ethnicity = ?, hair_color = ?,
                              location_city = ?, location_country = ?, rating = ?, is_active = ?, updated_at = ?
             WHERE id = ? AND user_id = ?",
        )
        .bind(&girl.name)
        .bind(girl.age)
        .bind(&girl.nationality)
        .bind(&girl.ethnicity)
        .bind(&girl.hair_color)
        .bind(&girl.location_city)
        .bind(&girl.location_country)
        .bind(girl.rating)
        .bind(girl.is_active)
        .bind(girl.updated_at)
        .bind(&girl.id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(Some(girl))
    }

    /// Delete a girl. Her entries cascade via the foreign key.
    pub async fn delete_girl(&self, user_id: &str, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM girls WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ─── Data Entry Operations ───────────────────────────────────

    /// All entries for a user, newest date first.
    pub async fn entries_for_user(&self, user_id: &str) -> Result<Vec<DataEntry>, AppError> {
        let entries = sqlx::query_as::<_, DataEntry>(
            "SELECT * FROM data_entries WHERE user_id = ? ORDER BY date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    pub async fn entry(&self, user_id: &str, id: &str) -> Result<Option<DataEntry>, AppError> {
        let entry =
            sqlx::query_as::<_, DataEntry>("SELECT * FROM data_entries WHERE id = ? AND user_id = ?")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(entry)
    }

    pub async fn create_entry(
        &self,
        user_id: &str,
        new: &NewDataEntry,
    ) -> Result<DataEntry, AppError> {
        let entry = DataEntry {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            girl_id: new.girl_id.clone(),
            date: new.date,
            amount_spent: new.amount_spent,
            duration_minutes: new.duration_minutes,
            number_of_nuts: new.number_of_nuts,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO data_entries (id, user_id, girl_id, date, amount_spent, duration_minutes,
                                       number_of_nuts, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(&entry.girl_id)
        .bind(entry.date)
        .bind(entry.amount_spent)
        .bind(entry.duration_minutes)
        .bind(entry.number_of_nuts)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(entry)
    }

    pub async fn update_entry(
        &self,
        user_id: &str,
        id: &str,
        update: &DataEntryUpdate,
    ) -> Result<Option<DataEntry>, AppError> {
        let Some(mut entry) = self.entry(user_id, id).await? else {
            return Ok(None);
        };

        update.apply(&mut entry);
        entry.updated_at = Utc::now();

        sqlx::query(
            "UPDATE data_entries SET girl_id = ?, date = ?, amount_spent = ?, duration_minutes = ?,
                                     number_of_nuts = ?, updated_at = ?
             WHERE id = ? AND user_id = ?",
        )
        .bind(&entry.girl_id)
        .bind(entry.date)
        .bind(entry.amount_spent)
        .bind(entry.duration_minutes)
        .bind(entry.number_of_nuts)
        .bind(entry.updated_at)
        .bind(&entry.id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(Some(entry))
    }

    pub async fn delete_entry(&self, user_id: &str, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM data_entries WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ─── Settings Operations ─────────────────────────────────────

    pub async fn settings_for_user(&self, user_id: &str) -> Result<Option<UserSettings>, AppError> {
        let settings =
            sqlx::query_as::<_, UserSettings>("SELECT * FROM user_settings WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(settings)
    }

    /// Fetch settings, creating the default row on first access.
    pub async fn get_or_create_settings(&self, user_id: &str) -> Result<UserSettings, AppError> {
        if let Some(settings) = self.settings_for_user(user_id).await? {
            return Ok(settings);
        }

        let settings = UserSettings {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            display_name: String::new(),
            avatar_url: None,
            theme: "dark".to_string(),
            accent_color: "yellow".to_string(),
            compact_mode: false,
            animations_enabled: true,
            date_format: "MM/DD/YYYY".to_string(),
            time_format: "12h".to_string(),
            week_start: "sunday".to_string(),
            privacy_settings: Json(PrivacySettings::default()),
            notification_settings: Json(NotificationSettings::default()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO user_settings (id, user_id, display_name, avatar_url, theme, accent_color,
                                        compact_mode, animations_enabled, date_format, time_format,
                                        week_start, privacy_settings, notification_settings,
                                        created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&settings.id)
        .bind(&settings.user_id)
        .bind(&settings.display_name)
        .bind(&settings.avatar_url)
        .bind(&settings.theme)
        .bind(&settings.accent_color)
        .bind(settings.compact_mode)
        .bind(settings.animations_enabled)
        .bind(&settings.date_format)
        .bind(&settings.time_format)
        .bind(&settings.week_start)
        .bind(&settings.privacy_settings)
        .bind(&settings.notification_settings)
        .bind(settings.created_at)
        .bind(settings.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(settings)
    }

    pub async fn update_settings(
        &self,
        user_id: &str,
        update: &SettingsUpdate,
    ) -> Result<UserSettings, AppError> {
        let mut settings = self.get_or_create_settings(user_id).await?;
        update.apply(&mut settings);
        settings.updated_at = Utc::now();

        sqlx::query(
            "UPDATE user_settings SET display_name = ?, avatar_url = ?, theme = ?, accent_color = ?,
                                      compact_mode = ?, animations_enabled = ?, date_format = ?,
                                      time_format = ?, week_start = ?, privacy_settings = ?,
                                      notification_settings = ?, updated_at = ?
             WHERE user_id = ?",
        )
        .bind(&settings.display_name)
        .bind(&settings.avatar_url)
        .bind(&settings.theme)
        .bind(&settings.accent_color)
        .bind(settings.compact_mode)
        .bind(settings.animations_enabled)
        .bind(&settings.date_format)
        .bind(&settings.time_format)
        .bind(&settings.week_start)
        .bind(&settings.privacy_settings)
        .bind(&settings.notification_settings)
        .bind(settings.updated_at)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(settings)
    }

    // ─── Onboarding Operations ───────────────────────────────────

    pub async fn onboarding_for_user(
        &self,
        user_id: &str,
    ) -> Result<Option<OnboardingState>, AppError> {
        let state =
            sqlx::query_as::<_, OnboardingState>("SELECT * FROM onboarding_state WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(state)
    }

    pub async fn get_or_create_onboarding(
        &self,
        user_id: &str,
    ) -> Result<OnboardingState, AppError> {
        if let Some(state) = self.onboarding_for_user(user_id).await? {
            return Ok(state);
        }

        let state = OnboardingState {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            current_step: 1,
            completed_steps: Json(Vec::new()),
            onboarding_data: Json(serde_json::json!({})),
            is_completed: false,
            completed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO onboarding_state (id, user_id, current_step, completed_steps,
                                           onboarding_data, is_completed, completed_at,
                                           created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&state.id)
        .bind(&state.user_id)
        .bind(state.current_step)
        .bind(&state.completed_steps)
        .bind(&state.onboarding_data)
        .bind(state.is_completed)
        .bind(state.completed_at)
        .bind(state.created_at)
        .bind(state.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(state)
    }

    pub async fn update_onboarding(
        &self,
        user_id: &str,
        update: &OnboardingUpdate,
    ) -> Result<OnboardingState, AppError> {
        let mut state = self.get_or_create_onboarding(user_id).await?;
        update.apply(&mut state);
        state.updated_at = Utc::now();
        self.write_onboarding(&state).await?;
        Ok(state)
    }

    /// Mark onboarding finished, stamping `completed_at`.
    pub async fn complete_onboarding(&self, user_id: &str) -> Result<OnboardingState, AppError> {
        let mut state = self.get_or_create_onboarding(user_id).await?;
        state.is_completed = true;
        state.completed_at = Some(Utc::now());
        state.updated_at = Utc::now();
        self.write_onboarding(&state).await?;
        Ok(state)
    }

    /// Drop the onboarding row entirely; the next fetch recreates it fresh.
    pub async fn clear_onboarding(&self, user_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM onboarding_state WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn write_onboarding(&self, state: &OnboardingState) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE onboarding_state SET current_step = ?, completed_steps = ?, onboarding_data = ?,
                                         is_completed = ?, completed_at = ?, updated_at = ?
             WHERE user_id = ?",
        )
        .bind(state.current_step)
        .bind(&state.completed_steps)
        .bind(&state.onboarding_data)
        .bind(state.is_completed)
        .bind(state.completed_at)
        .bind(state.updated_at)
        .bind(&state.user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // ─── Achievement Operations ──────────────────────────────────

    /// Unlocked achievements, newest first.
    pub async fn achievements_for_user(&self, user_id: &str) -> Result<Vec<Achievement>, AppError> {
        let achievements = sqlx::query_as::<_, Achievement>(
            "SELECT * FROM achievements WHERE user_id = ? ORDER BY unlocked_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(achievements)
    }

    pub async fn total_points(&self, user_id: &str) -> Result<i64, AppError> {
        let points: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(points), 0) FROM achievements WHERE user_id = ?")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(points)
    }

    pub async fn unlock_achievement(
        &self,
        user_id: &str,
        new: &NewAchievement,
    ) -> Result<Achievement, AppError> {
        let achievement = Achievement {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            achievement_type: new.achievement_type.clone(),
            achievement_id: new.achievement_id.clone(),
            tier: new.tier.clone(),
            title: new.title.clone(),
            description: new.description.clone(),
            icon: new.icon.clone(),
            points: new.points,
            unlocked_at: Utc::now(),
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO achievements (id, user_id, achievement_type, achievement_id, tier, title,
                                       description, icon, points, unlocked_at, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&achievement.id)
        .bind(&achievement.user_id)
        .bind(&achievement.achievement_type)
        .bind(&achievement.achievement_id)
        .bind(&achievement.tier)
        .bind(&achievement.title)
        .bind(&achievement.description)
        .bind(&achievement.icon)
        .bind(achievement.points)
        .bind(achievement.unlocked_at)
        .bind(achievement.created_at)
        .execute(&self.pool)
        .await?;

        Ok(achievement)
    }

    pub async fn progress_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<AchievementProgress>, AppError> {
        let progress = sqlx::query_as::<_, AchievementProgress>(
            "SELECT * FROM achievement_progress WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(progress)
    }

    /// Upsert progress on (user, achievement_type).
    pub async fn upsert_progress(
        &self,
        user_id: &str,
        achievement_type: &str,
        current_value: f64,
        target_value: f64,
    ) -> Result<AchievementProgress, AppError> {
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO achievement_progress (id, user_id, achievement_type, current_value,
                                               target_value, last_checked, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(user_id, achievement_type) DO UPDATE SET
                 current_value = excluded.current_value,
                 target_value = excluded.target_value,
                 last_checked = excluded.last_checked,
                 updated_at = excluded.updated_at",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(achievement_type)
        .bind(current_value)
        .bind(target_value)
        .bind(now)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let progress = sqlx::query_as::<_, AchievementProgress>(
            "SELECT * FROM achievement_progress WHERE user_id = ? AND achievement_type = ?",
        )
        .bind(user_id)
        .bind(achievement_type)
        .fetch_one(&self.pool)
        .await?;
        Ok(progress)
    }

    // ─── Leaderboard Operations ──────────────────────────────────

    /// Create a group and auto-join the creator with zeroed stats.
    pub async fn create_group(
        &self,
        user_id: &str,
        name: &str,
    ) -> Result<LeaderboardGroup, AppError> {
        let invite_token = Uuid::new_v4().to_string()[..8].to_string();
        let group = LeaderboardGroup {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_by: user_id.to_string(),
            invite_token,
            is_private: true,
            member_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO leaderboard_groups (id, name, created_by, invite_token, is_private,
                                             member_count, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&group.id)
        .bind(&group.name)
        .bind(&group.created_by)
        .bind(&group.invite_token)
        .bind(group.is_private)
        .bind(group.member_count)
        .bind(group.created_at)
        .bind(group.updated_at)
        .execute(&self.pool)
        .await?;

        self.join_group(&group.id, user_id, "Player").await?;

        // Re-read for the bumped member_count
        let group = sqlx::query_as::<_, LeaderboardGroup>(
            "SELECT * FROM leaderboard_groups WHERE id = ?",
        )
        .bind(&group.id)
        .fetch_one(&self.pool)
        .await?;
        Ok(group)
    }

    pub async fn group_by_id(&self, group_id: &str) -> Result<Option<LeaderboardGroup>, AppError> {
        let group = sqlx::query_as::<_, LeaderboardGroup>(
            "SELECT * FROM leaderboard_groups WHERE id = ?",
        )
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(group)
    }

    /// Groups the user belongs to, newest first.
    pub async fn groups_for_user(&self, user_id: &str) -> Result<Vec<LeaderboardGroup>, AppError> {
        let groups = sqlx::query_as::<_, LeaderboardGroup>(
            "SELECT g.* FROM leaderboard_groups g
             JOIN leaderboard_memberships m ON m.group_id = g.id
             WHERE m.user_id = ?
             ORDER BY g.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(groups)
    }

    pub async fn group_by_invite_token(
        &self,
        invite_token: &str,
    ) -> Result<Option<LeaderboardGroup>, AppError> {
        let group = sqlx::query_as::<_, LeaderboardGroup>(
            "SELECT * FROM leaderboard_groups WHERE invite_token = ?",
        )
        .bind(invite_token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(group)
    }

    /// Add a member with zeroed stats. Returns None if already a member.
    pub async fn join_group(
        &self,
        group_id: &str,
        user_id: &str,
        username: &str,
    ) -> Result<Option<LeaderboardMembership>, AppError> {
        let membership = LeaderboardMembership {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            user_id: user_id.to_string(),
            username: username.to_string(),
            stats_cache: Json(LeaderboardStats::default()),
            joined_at: Utc::now(),
            last_updated: Utc::now(),
        };

        let result = sqlx::query(
            "INSERT INTO leaderboard_memberships (id, group_id, user_id, username, stats_cache,
                                                  joined_at, last_updated)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&membership.id)
        .bind(&membership.group_id)
        .bind(&membership.user_id)
        .bind(&membership.username)
        .bind(&membership.stats_cache)
        .bind(membership.joined_at)
        .bind(membership.last_updated)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        }

        sqlx::query(
            "UPDATE leaderboard_groups SET member_count = member_count + 1, updated_at = ? WHERE id = ?",
        )
        .bind(Utc::now())
        .bind(group_id)
        .execute(&self.pool)
        .await?;

        Ok(Some(membership))
    }

    /// Members of a group, most recently updated first.
    pub async fn members_for_group(
        &self,
        group_id: &str,
    ) -> Result<Vec<LeaderboardMembership>, AppError> {
        let members = sqlx::query_as::<_, LeaderboardMembership>(
            "SELECT * FROM leaderboard_memberships WHERE group_id = ? ORDER BY last_updated DESC",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    /// Replace the caller's cached stats snapshot. Last write wins.
    pub async fn update_member_stats(
        &self,
        group_id: &str,
        user_id: &str,
        stats: &LeaderboardStats,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE leaderboard_memberships SET stats_cache = ?, last_updated = ?
             WHERE group_id = ? AND user_id = ?",
        )
        .bind(Json(*stats))
        .bind(Utc::now())
        .bind(group_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn leave_group(&self, group_id: &str, user_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM leaderboard_memberships WHERE group_id = ? AND user_id = ?",
        )
        .bind(group_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(
            "UPDATE leaderboard_groups SET member_count = MAX(member_count - 1, 0), updated_at = ?
             WHERE id = ?",
        )
        .bind(Utc::now())
        .bind(group_id)
        .execute(&self.pool)
        .await?;

        Ok(true)
    }
}
