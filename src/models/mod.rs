// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod achievement;
pub mod entry;
pub mod girl;
pub mod leaderboard;
pub mod onboarding;
pub mod settings;
pub mod stats;
pub mod user;

pub use achievement::{Achievement, AchievementProgress, NewAchievement};
pub use entry::{DataEntry, DataEntryUpdate, NewDataEntry};
pub use girl::{Girl, GirlUpdate, NewGirl};
pub use leaderboard::{LeaderboardGroup, LeaderboardMembership, LeaderboardStats};
pub use onboarding::OnboardingState;
pub use settings::UserSettings;
pub use stats::{GirlMetrics, GirlWithMetrics, GlobalStats};
pub use user::User;
