// SPDX-License-Identifier: MIT

//! In-memory app state with derived collections.
//!
//! Mirrors the reducer the UI runs on: every action recomputes
//! `girls_with_metrics` and `global_stats` synchronously before
//! `dispatch` returns, so readers never observe stale derived data.

use crate::client::api::ApiClient;
use crate::client::local::LocalStorage;
use crate::client::session::SessionResolver;
use crate::models::entry::DataEntry;
use crate::models::girl::Girl;
use crate::models::leaderboard::LeaderboardStats;
use crate::models::stats::{girl_with_metrics, global_stats, GirlWithMetrics, GlobalStats};

/// State mutations.
#[derive(Debug, Clone)]
pub enum AppAction {
    LoadData {
        girls: Vec<Girl>,
        entries: Vec<DataEntry>,
    },
    AddGirl(Girl),
    UpdateGirl(Girl),
    DeleteGirl { id: String },
    AddDataEntry(DataEntry),
    UpdateDataEntry(DataEntry),
    DeleteDataEntry { id: String },
}

/// Application state plus derived collections.
#[derive(Debug, Default)]
pub struct AppStore {
    pub girls: Vec<Girl>,
    pub data_entries: Vec<DataEntry>,
    pub girls_with_metrics: Vec<GirlWithMetrics>,
    pub global_stats: GlobalStats,
    pub is_loading: bool,
}

impl AppStore {
    pub fn new() -> Self {
        Self {
            is_loading: true,
            ..Default::default()
        }
    }

    /// Apply an action and recompute derived collections.
    pub fn dispatch(&mut self, action: AppAction) {
        match action {
            AppAction::LoadData { girls, entries } => {
                self.girls = girls;
                self.data_entries = entries;
                self.is_loading = false;
            }
            AppAction::AddGirl(girl) => {
                self.girls.insert(0, girl);
            }
            AppAction::UpdateGirl(girl) => {
                if let Some(existing) = self.girls.iter_mut().find(|g| g.id == girl.id) {
                    *existing = girl;
                }
            }
            AppAction::DeleteGirl { id } => {
                self.girls.retain(|g| g.id != id);
                // Local cascade, matching the server-side foreign key
                self.data_entries.retain(|e| e.girl_id != id);
            }
            AppAction::AddDataEntry(entry) => {
                self.data_entries.insert(0, entry);
            }
            AppAction::UpdateDataEntry(entry) => {
                if let Some(existing) = self.data_entries.iter_mut().find(|e| e.id == entry.id) {
                    *existing = entry;
                }
            }
            AppAction::DeleteDataEntry { id } => {
                self.data_entries.retain(|e| e.id != id);
            }
        }

        self.recompute();
    }

    fn recompute(&mut self) {
        self.girls_with_metrics = self
            .girls
            .iter()
            .map(|g| girl_with_metrics(g, &self.data_entries))
            .collect();
        self.global_stats = global_stats(&self.girls, &self.data_entries);
    }

    /// Resolve a session and pull everything from the API. Any failure
    /// degrades to empty collections; the product always renders.
    pub async fn load(&mut self, api: &ApiClient, storage: &LocalStorage) {
        let resolver = SessionResolver::new(api, storage);
        if let Err(e) = resolver.get_or_create_session().await {
            tracing::warn!(error = %e, "Session resolution failed, loading empty state");
            self.dispatch(AppAction::LoadData {
                girls: Vec::new(),
                entries: Vec::new(),
            });
            return;
        }

        let girls = match api.girls().await {
            Ok(girls) => girls,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load girls");
                Vec::new()
            }
        };
        let entries = match api.data_entries().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load entries");
                Vec::new()
            }
        };

        self.dispatch(AppAction::LoadData { girls, entries });
    }

    /// The snapshot this user would push to a leaderboard group.
    pub fn leaderboard_stats(&self) -> LeaderboardStats {
        LeaderboardStats::from_global(&self.global_stats)
    }
}
