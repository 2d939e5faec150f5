// SPDX-License-Identifier: MIT

//! Local-to-remote migration.
//!
//! Moves locally stored girls and entries into the API, once. Girl
//! creation failures abort the run (entries would dangle without their
//! girl); entry failures are logged and skipped. Old local ids never
//! reach the server: each created girl gets a fresh server id, and
//! entries are remapped through an old-to-new table.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::client::api::ApiClient;
use crate::client::local::{
    LocalStorage, DATA_ENTRIES_KEY, GIRLS_KEY,
};
use crate::client::session::SessionResolver;
use crate::client::Result;
use crate::models::entry::NewDataEntry;
use crate::models::girl::NewGirl;

/// What a migration would touch, without touching it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationStatus {
    pub already_migrated: bool,
    pub has_local_data: bool,
    pub local_girls: usize,
    pub local_entries: usize,
}

/// Outcome of a migration run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub success: bool,
    pub girls_migrated: usize,
    pub entries_migrated: usize,
    pub entries_skipped: usize,
    pub error: Option<String>,
}

pub struct Migrator<'a> {
    api: &'a ApiClient,
    storage: &'a LocalStorage,
}

impl<'a> Migrator<'a> {
    pub fn new(api: &'a ApiClient, storage: &'a LocalStorage) -> Self {
        Self { api, storage }
    }

    /// Read-only look at what is waiting locally.
    pub fn check_status(&self) -> MigrationStatus {
        let local_girls = self.storage.girls().len();
        let local_entries = self.storage.data_entries().len();
        MigrationStatus {
            already_migrated: self.storage.migration_flag(),
            has_local_data: local_girls > 0 || local_entries > 0,
            local_girls,
            local_entries,
        }
    }

    /// Run the migration. A failed run leaves the flag unset so it can be
    /// retried; local data is never deleted here (see `clear_local_data`).
    pub async fn migrate(&self) -> MigrationReport {
        if self.storage.migration_flag() {
            return MigrationReport {
                success: true,
                girls_migrated: 0,
                entries_migrated: 0,
                entries_skipped: 0,
                error: None,
            };
        }

        match self.run().await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "Migration failed");
                MigrationReport {
                    success: false,
                    girls_migrated: 0,
                    entries_migrated: 0,
                    entries_skipped: 0,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    async fn run(&self) -> Result<MigrationReport> {
        SessionResolver::new(self.api, self.storage)
            .get_or_create_session()
            .await?;

        let local_girls = self.storage.girls();
        let local_entries = self.storage.data_entries();

        // Nothing local: succeed without setting the flag, so data that
        // appears later still gets picked up
        if local_girls.is_empty() && local_entries.is_empty() {
            return Ok(MigrationReport {
                success: true,
                girls_migrated: 0,
                entries_migrated: 0,
                entries_skipped: 0,
                error: None,
            });
        }

        // Old local id -> server id
        let mut id_map: HashMap<String, String> = HashMap::new();

        for local in &local_girls {
            let created = self
                .api
                .create_girl(&NewGirl {
                    name: local.name.clone(),
                    age: local.age,
                    nationality: local.nationality.clone(),
                    rating: local.rating,
                    ethnicity: local.ethnicity.clone(),
                    hair_color: local.hair_color.clone(),
                    location_city: local.location_city.clone(),
                    location_country: local.location_country.clone(),
                    is_active: local.is_active,
                })
                .await?;
            id_map.insert(local.id.clone(), created.id);
        }

        let mut entries_migrated = 0;
        let mut entries_skipped = 0;

        for local in &local_entries {
            let Some(girl_id) = id_map.get(&local.girl_id) else {
                tracing::warn!(
                    entry_id = %local.id,
                    girl_id = %local.girl_id,
                    "Skipping entry with unknown girl id"
                );
                entries_skipped += 1;
                continue;
            };

            let Some(date) = parse_local_date(&local.date) else {
                tracing::warn!(entry_id = %local.id, date = %local.date, "Skipping entry with unparseable date");
                entries_skipped += 1;
                continue;
            };

            let result = self
                .api
                .create_entry(&NewDataEntry {
                    girl_id: girl_id.clone(),
                    date,
                    amount_spent: local.amount_spent,
                    duration_minutes: local.duration_minutes,
                    number_of_nuts: local.number_of_nuts,
                })
                .await;

            match result {
                Ok(_) => entries_migrated += 1,
                Err(e) => {
                    tracing::warn!(entry_id = %local.id, error = %e, "Skipping entry that failed to migrate");
                    entries_skipped += 1;
                }
            }
        }

        self.storage.set_migration_flag(true)?;
        tracing::info!(
            girls = id_map.len(),
            entries = entries_migrated,
            skipped = entries_skipped,
            "Migration complete"
        );

        Ok(MigrationReport {
            success: true,
            girls_migrated: id_map.len(),
            entries_migrated,
            entries_skipped,
            error: None,
        })
    }

    /// Remove the migrated collections from local storage and leave the
    /// flag set. Called after the user confirms the server copy looks
    /// right.
    pub fn clear_local_data(&self) -> Result<()> {
        self.storage.remove(GIRLS_KEY)?;
        self.storage.remove(DATA_ENTRIES_KEY)?;
        self.storage.set_migration_flag(true)
    }

    /// Allow a re-run, for support scenarios.
    pub fn reset_migration_flag(&self) -> Result<()> {
        self.storage.set_migration_flag(false)
    }
}

/// Local dates are usually full ISO timestamps; the date is the first ten
/// characters.
fn parse_local_date(raw: &str) -> Option<NaiveDate> {
    let prefix = raw.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_date_from_iso_timestamp() {
        assert_eq!(
            parse_local_date("2026-03-14T22:11:05.123Z"),
            NaiveDate::from_ymd_opt(2026, 3, 14)
        );
    }

    #[test]
    fn test_parse_local_date_plain() {
        assert_eq!(
            parse_local_date("2026-01-02"),
            NaiveDate::from_ymd_opt(2026, 1, 2)
        );
    }

    #[test]
    fn test_parse_local_date_garbage() {
        assert_eq!(parse_local_date("not a date"), None);
        assert_eq!(parse_local_date(""), None);
    }
}
