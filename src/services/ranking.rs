// SPDX-License-Identifier: MIT

//! Leaderboard ranking.
//!
//! Pure ordering over membership snapshots. Ranks are 1-based positions
//! after a stable sort, so members with equal stats keep their incoming
//! order and get distinct consecutive ranks (no tie sharing).

use serde::{Deserialize, Serialize};

use crate::models::leaderboard::LeaderboardMembership;

/// Metric to rank a group by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    /// Nuts per hour, descending.
    #[default]
    Efficiency,
    /// Cost per nut, ascending (cheaper is better).
    CostPerNut,
    /// Total nuts, descending.
    TotalNuts,
}

/// A membership with its computed position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedMember {
    pub rank: u32,
    #[serde(flatten)]
    pub member: LeaderboardMembership,
    /// Rank movement since the previous ranking. Always 0 until rank
    /// history is persisted.
    pub change: i32,
}

/// Rank members by the chosen metric.
pub fn rank_members(members: Vec<LeaderboardMembership>, sort_by: SortBy) -> Vec<RankedMember> {
    let mut members = members;

    match sort_by {
        SortBy::Efficiency => {
            members.sort_by(|a, b| {
                b.stats_cache.efficiency.total_cmp(&a.stats_cache.efficiency)
            });
        }
        SortBy::CostPerNut => {
            members.sort_by(|a, b| {
                a.stats_cache.cost_per_nut.total_cmp(&b.stats_cache.cost_per_nut)
            });
        }
        SortBy::TotalNuts => {
            members.sort_by(|a, b| b.stats_cache.total_nuts.cmp(&a.stats_cache.total_nuts));
        }
    }

    members
        .into_iter()
        .enumerate()
        .map(|(i, member)| RankedMember {
            rank: (i + 1) as u32,
            member,
            change: 0,
        })
        .collect()
}
