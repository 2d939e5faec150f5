// SPDX-License-Identifier: MIT

//! Data entry model: a dated spend/time/activity record against a girl.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single dated record. Many entries per girl; deleting a girl cascades
/// its entries in the store.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DataEntry {
    pub id: String,
    #[serde(skip)]
    pub user_id: String,
    pub girl_id: String,
    pub date: NaiveDate,
    pub amount_spent: f64,
    pub duration_minutes: i64,
    pub number_of_nuts: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /api/data-entries`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewDataEntry {
    #[validate(length(min = 1, message = "girlId is required"))]
    pub girl_id: String,
    pub date: NaiveDate,
    #[validate(range(min = 0.0, message = "amountSpent must be non-negative"))]
    pub amount_spent: f64,
    #[validate(range(min = 0, message = "durationMinutes must be non-negative"))]
    pub duration_minutes: i64,
    #[validate(range(min = 0, message = "numberOfNuts must be non-negative"))]
    pub number_of_nuts: i64,
}

/// Partial update for `PUT /api/data-entries/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct DataEntryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub girl_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "amountSpent must be non-negative"))]
    pub amount_spent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "durationMinutes must be non-negative"))]
    pub duration_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "numberOfNuts must be non-negative"))]
    pub number_of_nuts: Option<i64>,
}

impl DataEntryUpdate {
    /// Apply the set fields to an existing record.
    pub fn apply(&self, entry: &mut DataEntry) {
        if let Some(girl_id) = &self.girl_id {
            entry.girl_id = girl_id.clone();
        }
        if let Some(date) = self.date {
            entry.date = date;
        }
        if let Some(amount) = self.amount_spent {
            entry.amount_spent = amount;
        }
        if let Some(minutes) = self.duration_minutes {
            entry.duration_minutes = minutes;
        }
        if let Some(nuts) = self.number_of_nuts {
            entry.number_of_nuts = nuts;
        }
    }
}
