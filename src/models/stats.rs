// SPDX-License-Identifier: MIT

//! Derived statistics: per-girl metrics and user-wide aggregates.
//!
//! Everything here is a pure function of (girls, entries). Nothing is
//! persisted; callers recompute on every mutation. Input sets are bounded
//! by a single user's manually entered data, so there is no caching.

use serde::{Deserialize, Serialize};

use crate::models::{DataEntry, Girl};

/// Per-girl aggregates derived from her entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GirlMetrics {
    pub total_spent: f64,
    pub total_nuts: i64,
    /// Total duration in minutes
    pub total_time: i64,
    pub total_entries: i64,
    /// totalSpent / totalNuts; 0.0 when there are no nuts (see [`guarded_div`])
    pub cost_per_nut: f64,
    /// totalTime / totalNuts, same sentinel rule
    pub time_per_nut: f64,
}

/// A girl paired with her derived metrics, as consumed by the UI layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GirlWithMetrics {
    #[serde(flatten)]
    pub girl: Girl,
    pub metrics: GirlMetrics,
}

/// Aggregates across all of a user's girls and entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_girls: i64,
    pub active_girls: i64,
    pub total_spent: f64,
    pub total_nuts: i64,
    pub total_time: i64,
    /// Arithmetic mean of all girls' ratings; 0.0 when there are no girls
    pub average_rating: f64,
}

/// Division that yields the 0.0 sentinel instead of Infinity/NaN when the
/// denominator is zero. All derived ratios in this crate use this rule so
/// the UI layer never sees a non-finite number.
pub fn guarded_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Compute aggregates for a single girl from an entry collection.
///
/// Only entries whose `girl_id` matches exactly are counted; passing the
/// user's full entry list is fine.
pub fn metrics_for_girl(girl: &Girl, entries: &[DataEntry]) -> GirlMetrics {
    let mut metrics = GirlMetrics::default();
    for entry in entries.iter().filter(|e| e.girl_id == girl.id) {
        metrics.total_spent += entry.amount_spent;
        metrics.total_nuts += entry.number_of_nuts;
        metrics.total_time += entry.duration_minutes;
        metrics.total_entries += 1;
    }
    metrics.cost_per_nut = guarded_div(metrics.total_spent, metrics.total_nuts as f64);
    metrics.time_per_nut = guarded_div(metrics.total_time as f64, metrics.total_nuts as f64);
    metrics
}

/// Pair a girl with her derived metrics.
pub fn girl_with_metrics(girl: &Girl, entries: &[DataEntry]) -> GirlWithMetrics {
    GirlWithMetrics {
        metrics: metrics_for_girl(girl, entries),
        girl: girl.clone(),
    }
}

/// Compute user-wide aggregates.
pub fn global_stats(girls: &[Girl], entries: &[DataEntry]) -> GlobalStats {
    let mut stats = GlobalStats {
        total_girls: girls.len() as i64,
        active_girls: girls.iter().filter(|g| g.is_active).count() as i64,
        ..Default::default()
    };

    for entry in entries {
        stats.total_spent += entry.amount_spent;
        stats.total_nuts += entry.number_of_nuts;
        stats.total_time += entry.duration_minutes;
    }

    let rating_sum: f64 = girls.iter().map(|g| g.rating).sum();
    stats.average_rating = guarded_div(rating_sum, girls.len() as f64);
    stats
}
