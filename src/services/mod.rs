// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod ranking;

pub use ranking::{rank_members, RankedMember, SortBy};
