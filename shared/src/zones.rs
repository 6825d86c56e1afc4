//! Recovery zone classification
//!
//! Maps a 0-100 recovery score onto four ordered bands. Buckets use
//! inclusive upper bounds and are checked in ascending order.

use serde::{Deserialize, Serialize};

/// Recovery zone, ordered from worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryZone {
    Poor,
    Fair,
    Good,
    Excellent,
}

/// Inclusive upper bound for each zone, ascending
const ZONE_BOUNDS: [(f64, RecoveryZone); 4] = [
    (39.0, RecoveryZone::Poor),
    (55.0, RecoveryZone::Fair),
    (75.0, RecoveryZone::Good),
    (100.0, RecoveryZone::Excellent),
];

impl RecoveryZone {
    /// Wire key, matching the serde name
    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryZone::Poor => "poor",
            RecoveryZone::Fair => "fair",
            RecoveryZone::Good => "good",
            RecoveryZone::Excellent => "excellent",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            RecoveryZone::Poor => "Poor",
            RecoveryZone::Fair => "Fair",
            RecoveryZone::Good => "Good",
            RecoveryZone::Excellent => "Excellent",
        }
    }
}

/// Zone with its label, as rendered in the calendar legend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneInfo {
    pub zone: RecoveryZone,
    pub label: &'static str,
}

impl From<RecoveryZone> for ZoneInfo {
    fn from(zone: RecoveryZone) -> Self {
        Self {
            zone,
            label: zone.label(),
        }
    }
}

/// Classify a score into its recovery zone
///
/// Scores outside 0-100 are clamped; NaN is treated as poor.
pub fn classify_zone(score: f64) -> RecoveryZone {
    if score.is_nan() {
        return RecoveryZone::Poor;
    }
    let score = score.clamp(0.0, 100.0);
    ZONE_BOUNDS
        .iter()
        .find(|(upper, _)| score <= *upper)
        .map(|(_, zone)| *zone)
        .unwrap_or(RecoveryZone::Excellent)
}

/// Classify a score and attach the display label
pub fn classify(score: f64) -> ZoneInfo {
    classify_zone(score).into()
}
