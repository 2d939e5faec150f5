// SPDX-License-Identifier: MIT

//! Client-side companion library.
//!
//! Mirrors what the web client does against the API: a file-backed local
//! storage layer, a thin HTTP client, session resolution with one
//! self-heal retry, the local-to-remote migration routine, and an
//! in-memory app store with synchronously recomputed derived stats.

pub mod api;
pub mod local;
pub mod migration;
pub mod session;
pub mod store;

pub use api::ApiClient;
pub use local::LocalStorage;
pub use migration::{MigrationReport, MigrationStatus, Migrator};
pub use session::SessionResolver;
pub use store::{AppAction, AppStore};

use thiserror::Error;

/// Errors surfaced by the client-side layers.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
