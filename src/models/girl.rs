// SPDX-License-Identifier: MIT

//! Girl (tracked profile) model and request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A tracked profile, owned by exactly one user.
///
/// Stored in snake_case columns; serialized as camelCase on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Girl {
    pub id: String,
    /// Owner; scoped server-side and never exposed on the wire.
    #[serde(skip)]
    pub user_id: String,
    pub name: String,
    pub age: i64,
    pub nationality: String,
    pub ethnicity: Option<String>,
    pub hair_color: Option<String>,
    pub location_city: Option<String>,
    pub location_country: Option<String>,
    /// 0.0 - 10.0 scale
    pub rating: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /api/girls`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewGirl {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 18, message = "age must be at least 18"))]
    pub age: i64,
    #[validate(length(min = 1, message = "nationality is required"))]
    pub nationality: String,
    #[validate(range(min = 0.0, max = 10.0, message = "rating must be between 0 and 10"))]
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_country: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Partial update for `PUT /api/girls/{id}`.
///
/// Explicit optional-field struct: absent fields leave the stored value
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GirlUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hair_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl GirlUpdate {
    /// Apply the set fields to an existing record.
    pub fn apply(&self, girl: &mut Girl) {
        if let Some(name) = &self.name {
            girl.name = name.clone();
        }
        if let Some(age) = self.age {
            girl.age = age;
        }
        if let Some(nationality) = &self.nationality {
            girl.nationality = nationality.clone();
        }
        if let Some(ethnicity) = &self.ethnicity {
            girl.ethnicity = Some(ethnicity.clone());
        }
        if let Some(hair_color) = &self.hair_color {
            girl.hair_color = Some(hair_color.clone());
        }
        if let Some(city) = &self.location_city {
            girl.location_city = Some(city.clone());
        }
        if let Some(country) = &self.location_country {
            girl.location_country = Some(country.clone());
        }
        if let Some(rating) = self.rating {
            girl.rating = rating;
        }
        if let Some(is_active) = self.is_active {
            girl.is_active = is_active;
        }
    }
}
