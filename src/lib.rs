// SPDX-License-Identifier: MIT

//! CPN Tracker: anonymous session-based personal tracking.
//!
//! This crate provides the backend API for tracking girls and dated data
//! entries, derived metrics and leaderboard groups, plus the client-side
//! companion layers (local storage, session resolution, migration, app
//! store).

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Db;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
}
