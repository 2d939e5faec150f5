// SPDX-License-Identifier: MIT

//! Schema definition, applied idempotently at startup.
//!
//! Timestamps are RFC3339 TEXT; JSON blobs (stats_cache, settings bundles,
//! onboarding data) are serialized TEXT columns. Foreign keys are enforced
//! with `PRAGMA foreign_keys = ON` on every connection, so deleting a girl
//! cascades her entries inside the store rather than in route code.

/// Idempotent DDL, executed in order.
pub const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        session_token TEXT NOT NULL UNIQUE,
        is_anonymous INTEGER NOT NULL DEFAULT 1,
        subscription_tier TEXT NOT NULL DEFAULT 'free',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS girls (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        age INTEGER NOT NULL,
        nationality TEXT NOT NULL,
        ethnicity TEXT,
        hair_color TEXT,
        location_city TEXT,
        location_country TEXT,
        rating REAL NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_girls_user ON girls(user_id)",
    r#"
    CREATE TABLE IF NOT EXISTS data_entries (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        girl_id TEXT NOT NULL REFERENCES girls(id) ON DELETE CASCADE,
        date TEXT NOT NULL,
        amount_spent REAL NOT NULL,
        duration_minutes INTEGER NOT NULL,
        number_of_nuts INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_entries_user ON data_entries(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_entries_girl ON data_entries(girl_id)",
    r#"
    CREATE TABLE IF NOT EXISTS user_settings (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
        display_name TEXT NOT NULL DEFAULT '',
        avatar_url TEXT,
        theme TEXT NOT NULL DEFAULT 'dark',
        accent_color TEXT NOT NULL DEFAULT 'yellow',
        compact_mode INTEGER NOT NULL DEFAULT 0,
        animations_enabled INTEGER NOT NULL DEFAULT 1,
        date_format TEXT NOT NULL DEFAULT 'MM/DD/YYYY',
        time_format TEXT NOT NULL DEFAULT '12h',
        week_start TEXT NOT NULL DEFAULT 'sunday',
        privacy_settings TEXT NOT NULL,
        notification_settings TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS onboarding_state (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
        current_step INTEGER NOT NULL DEFAULT 1,
        completed_steps TEXT NOT NULL DEFAULT '[]',
        onboarding_data TEXT NOT NULL DEFAULT '{}',
        is_completed INTEGER NOT NULL DEFAULT 0,
        completed_at TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS achievements (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        achievement_type TEXT NOT NULL,
        achievement_id TEXT NOT NULL,
        tier TEXT NOT NULL,
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        icon TEXT NOT NULL DEFAULT '',
        points INTEGER NOT NULL DEFAULT 0,
        unlocked_at TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS achievement_progress (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        achievement_type TEXT NOT NULL,
        current_value REAL NOT NULL DEFAULT 0,
        target_value REAL NOT NULL DEFAULT 0,
        last_checked TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        UNIQUE(user_id, achievement_type)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS leaderboard_groups (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        created_by TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        invite_token TEXT NOT NULL UNIQUE,
        is_private INTEGER NOT NULL DEFAULT 1,
        member_count INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS leaderboard_memberships (
        id TEXT PRIMARY KEY,
        group_id TEXT NOT NULL REFERENCES leaderboard_groups(id) ON DELETE CASCADE,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        username TEXT NOT NULL,
        stats_cache TEXT NOT NULL,
        joined_at TEXT NOT NULL,
        last_updated TEXT NOT NULL,
        UNIQUE(group_id, user_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_memberships_group ON leaderboard_memberships(group_id)",
    "CREATE INDEX IF NOT EXISTS idx_memberships_user ON leaderboard_memberships(user_id)",
];
