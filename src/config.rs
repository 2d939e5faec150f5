// SPDX-License-Identifier: MIT

//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// SQLite connection string
    pub database_url: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable has a local-development default; a malformed `PORT`
    /// is the only hard failure.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => 8080,
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://cpn.db?mode=rwc".to_string()),
            port,
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            database_url: "sqlite::memory:".to_string(),
            port: 8080,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
