//! Driver Ranking
//!
//! Turns a model's feature-importance vector into the signed driver list
//! shown next to a prediction.

use super::types::{DriverEntry, FeatureImportance};

/// Drivers returned to the dashboard
pub const RANK_LIMIT: usize = 10;

/// Drivers printed in the report
pub const REPORT_DRIVER_LIMIT: usize = 5;

/// Rank features by |weight| descending, keeping the top `limit`.
///
/// The sort is stable, so equal magnitudes keep registry order. A NaN weight
/// ranks with magnitude 0. Empty importance yields an empty list.
pub fn rank(importance: &FeatureImportance, limit: usize) -> Vec<DriverEntry> {
    let mut drivers: Vec<DriverEntry> = importance
        .iter()
        .map(|(name, &weight)| DriverEntry {
            name: name.to_string(),
            magnitude: if weight.is_nan() { 0.0 } else { weight.abs() },
            signed_weight: weight,
        })
        .collect();

    drivers.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
    drivers.truncate(limit);
    drivers
}

/// Largest magnitude, used to normalize report bars
pub fn max_magnitude(drivers: &[DriverEntry]) -> f64 {
    drivers.iter().map(|d| d.magnitude).fold(0.0, f64::max)
}
