// SPDX-License-Identifier: MIT

//! Onboarding flow state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// Per-user onboarding progress, created lazily on first fetch.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingState {
    pub id: String,
    #[serde(skip)]
    pub user_id: String,
    pub current_step: i64,
    pub completed_steps: Json<Vec<i64>>,
    /// Free-form per-step answers collected during the flow
    pub onboarding_data: Json<serde_json::Value>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for `PUT /api/onboarding`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnboardingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_step: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_steps: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl OnboardingUpdate {
    /// Apply the set fields to an existing record.
    pub fn apply(&self, state: &mut OnboardingState) {
        if let Some(step) = self.current_step {
            state.current_step = step;
        }
        if let Some(steps) = &self.completed_steps {
            state.completed_steps = Json(steps.clone());
        }
        if let Some(data) = &self.onboarding_data {
            state.onboarding_data = Json(data.clone());
        }
        if let Some(is_completed) = self.is_completed {
            state.is_completed = is_completed;
        }
    }
}
