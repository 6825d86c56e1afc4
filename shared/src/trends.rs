//! Trend summaries for the week and month charts
//!
//! # Design Principles
//!
//! 1. **Sensor means skip missing data**: a day without sleep times does not
//!    pull the average sleep toward zero. Missing macro intake is different:
//!    it counts as nothing eaten.
//! 2. **Stable bucket order**: weekday buckets run Monday to Sunday, month
//!    buckets run `Week 1` to `Week 5`.
//! 3. **Empty is zero**: every statistic over no data is 0.

use crate::aggregate::mean_and_sd;
use crate::day_state::CalendarView;
use crate::models::{DailyLogRecord, Macros, RecoveryPrediction};
use crate::nutrition::MacroTargets;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One point of the trend charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendBucket {
    pub label: String,
    /// Mean predicted recovery
    pub recovery: f64,
    /// Mean hours slept
    pub sleep: f64,
    pub hrv: f64,
    /// Total working sets
    pub volume: i64,
    /// Total sets taken to failure
    pub failures: i64,
}

/// Header statistics and chart series for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub view: CalendarView,
    pub recovery_average: f64,
    pub recovery_sd: f64,
    pub avg_sleep_hours: f64,
    pub workouts: u32,
    pub macro_adherence_pct: f64,
    pub buckets: Vec<TrendBucket>,
}

/// Bucket position: weekday index in week view, week-of-month in month view
fn bucket_key(view: CalendarView, date: NaiveDate) -> u32 {
    match view {
        CalendarView::Week => date.weekday().num_days_from_monday(),
        CalendarView::Month => date.day().div_ceil(7),
    }
}

fn bucket_label(view: CalendarView, key: u32) -> String {
    match view {
        CalendarView::Week => WEEKDAY_LABELS
            .get(key as usize)
            .copied()
            .unwrap_or_default()
            .to_string(),
        CalendarView::Month => format!("Week {key}"),
    }
}

fn mean(values: &[f64]) -> f64 {
    mean_and_sd(values).0
}

/// Fraction of the macro targets met on one day
///
/// Missing intake counts as zero. `None` when any target is zero.
fn day_adherence(macros: Option<&Macros>, targets: &MacroTargets) -> Option<f64> {
    if targets.protein == 0 || targets.carbs == 0 || targets.fat == 0 {
        return None;
    }
    let intake = macros.cloned().unwrap_or_default();
    let ratio = |value: Option<f64>, target: i64| value.unwrap_or(0.0) / target as f64;
    Some(
        (ratio(intake.protein, targets.protein)
            + ratio(intake.carbs, targets.carbs)
            + ratio(intake.fat, targets.fat))
            / 3.0,
    )
}

#[derive(Default)]
struct BucketAccumulator {
    recovery: Vec<f64>,
    sleep: Vec<f64>,
    hrv: Vec<f64>,
    volume: i64,
    failures: i64,
}

/// Summarise logs and predictions for a period
pub fn summarize_trends(
    view: CalendarView,
    logs: &BTreeMap<NaiveDate, DailyLogRecord>,
    predictions: &[RecoveryPrediction],
    targets: &MacroTargets,
) -> TrendSummary {
    let scores: Vec<f64> = predictions.iter().map(|p| p.score).collect();
    let (recovery_average, recovery_sd) = mean_and_sd(&scores);

    let sleep: Vec<f64> = logs.values().filter_map(DailyLogRecord::sleep_hours).collect();
    let workouts = logs.values().filter(|log| log.trained).count() as u32;

    let adherence: Vec<f64> = logs
        .values()
        .filter_map(|log| day_adherence(log.macros.as_ref(), targets))
        .collect();

    let mut buckets: BTreeMap<u32, BucketAccumulator> = BTreeMap::new();
    for log in logs.values() {
        let bucket = buckets.entry(bucket_key(view, log.date)).or_default();
        if let Some(hours) = log.sleep_hours() {
            bucket.sleep.push(hours);
        }
        if let Some(hrv) = log.hrv {
            bucket.hrv.push(hrv);
        }
        bucket.volume += i64::from(log.total_sets.unwrap_or(0));
        bucket.failures += i64::from(log.failure_sets.unwrap_or(0));
    }
    for prediction in predictions {
        buckets
            .entry(bucket_key(view, prediction.date))
            .or_default()
            .recovery
            .push(prediction.score);
    }

    let buckets = buckets
        .into_iter()
        .map(|(key, acc)| TrendBucket {
            label: bucket_label(view, key),
            recovery: mean(&acc.recovery),
            sleep: mean(&acc.sleep),
            hrv: mean(&acc.hrv),
            volume: acc.volume,
            failures: acc.failures,
        })
        .collect();

    TrendSummary {
        view,
        recovery_average,
        recovery_sd,
        avg_sleep_hours: mean(&sleep),
        workouts,
        macro_adherence_pct: mean(&adherence) * 100.0,
        buckets,
    }
}
