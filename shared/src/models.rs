//! Data models for daily logs and recovery predictions
//!
//! Every optional attribute of an upstream row is an explicit `Option`.
//! Defaults are applied here, while parsing, and nowhere else.

use crate::sleep::sleep_hours;
use crate::trained::deserialize_trained;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Macro-nutrient intake in grams
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub carbs: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
}

/// One user's log for one calendar date
///
/// Morning fields (sleep, wellness) and evening fields (training, nutrition)
/// are filled independently, so any subset may be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLogRecord {
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_trained")]
    pub trained: bool,

    // Morning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_quality: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resting_hr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hrv: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soreness: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivation: Option<i32>,
    /// User-supplied fallback score (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_rating: Option<f64>,

    // Evening
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sets: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_sets: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_rir: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_intake_l: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macros: Option<Macros>,
}

impl DailyLogRecord {
    /// Create an empty log for a date
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            trained: false,
            sleep_start: None,
            sleep_end: None,
            sleep_quality: None,
            resting_hr: None,
            hrv: None,
            soreness: None,
            stress: None,
            motivation: None,
            recovery_rating: None,
            total_sets: None,
            failure_sets: None,
            total_rir: None,
            calories: None,
            water_intake_l: None,
            macros: None,
        }
    }

    /// Hours slept, if both sleep times are present and well formed
    pub fn sleep_hours(&self) -> Option<f64> {
        sleep_hours(self.sleep_start.as_deref(), self.sleep_end.as_deref())
    }
}

/// Model-predicted recovery score for a date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecoveryPrediction {
    pub date: NaiveDate,
    pub score: f64,
}

/// Index logs by date; a later row for the same date wins
pub fn index_logs(logs: impl IntoIterator<Item = DailyLogRecord>) -> BTreeMap<NaiveDate, DailyLogRecord> {
    logs.into_iter().map(|log| (log.date, log)).collect()
}

/// Index recovery scores by date; a later prediction for the same date wins
pub fn index_scores(
    predictions: impl IntoIterator<Item = RecoveryPrediction>,
) -> BTreeMap<NaiveDate, f64> {
    predictions.into_iter().map(|p| (p.date, p.score)).collect()
}
