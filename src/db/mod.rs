// SPDX-License-Identifier: MIT

//! Database layer (sqlx/SQLite).

pub mod schema;
pub mod store;

pub use store::Db;
