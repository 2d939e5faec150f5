// SPDX-License-Identifier: MIT

//! File-backed local storage.
//!
//! A single JSON file of key/value pairs standing in for browser
//! localStorage. Reads are lenient: a missing or corrupt file behaves as
//! empty storage, matching how the web client shrugs off bad localStorage.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::client::Result;

/// Storage key for locally saved girls.
pub const GIRLS_KEY: &str = "cpn_girls";
/// Storage key for locally saved data entries.
pub const DATA_ENTRIES_KEY: &str = "cpn_data_entries";
/// Set once local data has been migrated to the API.
pub const MIGRATION_FLAG_KEY: &str = "cpn_migrated_to_db";
/// The locally persisted session token.
pub const SESSION_TOKEN_KEY: &str = "cpn_session_token";

/// A girl as saved locally before migration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalGirl {
    pub id: String,
    pub name: String,
    pub age: i64,
    pub nationality: String,
    #[serde(default)]
    pub ethnicity: Option<String>,
    #[serde(default)]
    pub hair_color: Option<String>,
    #[serde(default)]
    pub location_city: Option<String>,
    #[serde(default)]
    pub location_country: Option<String>,
    pub rating: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// A data entry as saved locally before migration. The date is whatever
/// string the old client wrote, usually a full ISO timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalDataEntry {
    pub id: String,
    pub girl_id: String,
    pub date: String,
    pub amount_spent: f64,
    pub duration_minutes: i64,
    pub number_of_nuts: i64,
}

/// File-backed key/value storage.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> BTreeMap<String, Value> {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        serde_json::from_str(&contents).unwrap_or_default()
    }

    fn write_map(&self, map: &BTreeMap<String, Value>) -> Result<()> {
        fs::write(&self.path, serde_json::to_string_pretty(map)?)?;
        Ok(())
    }

    /// Read a value. Missing keys and undecodable values both come back
    /// as None.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let map = self.read_map();
        let value = map.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let mut map = self.read_map();
        map.insert(key.to_string(), serde_json::to_value(value)?);
        self.write_map(&map)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }

    // ─── Typed accessors ─────────────────────────────────────────

    pub fn girls(&self) -> Vec<LocalGirl> {
        self.get(GIRLS_KEY).unwrap_or_default()
    }

    pub fn set_girls(&self, girls: &[LocalGirl]) -> Result<()> {
        self.set(GIRLS_KEY, &girls)
    }

    pub fn data_entries(&self) -> Vec<LocalDataEntry> {
        self.get(DATA_ENTRIES_KEY).unwrap_or_default()
    }

    pub fn set_data_entries(&self, entries: &[LocalDataEntry]) -> Result<()> {
        self.set(DATA_ENTRIES_KEY, &entries)
    }

    pub fn migration_flag(&self) -> bool {
        self.get(MIGRATION_FLAG_KEY).unwrap_or(false)
    }

    pub fn set_migration_flag(&self, migrated: bool) -> Result<()> {
        self.set(MIGRATION_FLAG_KEY, &migrated)
    }

    pub fn session_token(&self) -> Option<String> {
        self.get(SESSION_TOKEN_KEY)
    }

    pub fn set_session_token(&self, token: &str) -> Result<()> {
        self.set(SESSION_TOKEN_KEY, &token)
    }

    pub fn clear_session_token(&self) -> Result<()> {
        self.remove(SESSION_TOKEN_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn storage_in(dir: &tempfile::TempDir) -> LocalStorage {
        LocalStorage::new(dir.path().join("storage.json"))
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempdir().unwrap();
        let storage = storage_in(&dir);

        assert!(storage.girls().is_empty());
        assert!(storage.data_entries().is_empty());
        assert!(!storage.migration_flag());
        assert_eq!(storage.session_token(), None);
    }

    #[test]
    fn test_corrupt_file_reads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not valid json").unwrap();

        let storage = LocalStorage::new(path);
        assert!(storage.girls().is_empty());
    }

    #[test]
    fn test_round_trip_and_remove() {
        let dir = tempdir().unwrap();
        let storage = storage_in(&dir);

        storage.set_session_token("abc-123").unwrap();
        storage.set_migration_flag(true).unwrap();

        assert_eq!(storage.session_token().as_deref(), Some("abc-123"));
        assert!(storage.migration_flag());

        storage.clear_session_token().unwrap();
        assert_eq!(storage.session_token(), None);
        // Other keys survive the removal
        assert!(storage.migration_flag());
    }

    #[test]
    fn test_undecodable_value_reads_as_none() {
        let dir = tempdir().unwrap();
        let storage = storage_in(&dir);

        storage.set(GIRLS_KEY, &"not a list").unwrap();
        assert!(storage.girls().is_empty());
    }
}
