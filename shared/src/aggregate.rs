//! Period statistics over resolved day states

use crate::day_state::DayState;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary of a calendar range
///
/// `training_days + rest_days + pending_days` always equals the number of
/// days aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PeriodStats {
    /// Mean score over `scored` and `rest-scored` days, 0 when none
    pub average: f64,
    /// Population standard deviation of the same scores
    pub sd: f64,
    pub training_days: u32,
    pub rest_days: u32,
    pub pending_days: u32,
}

/// Mean and population standard deviation, `(0, 0)` for an empty slice
pub fn mean_and_sd(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Aggregate a range of day states
pub fn aggregate(states: &BTreeMap<NaiveDate, DayState>) -> PeriodStats {
    let mut stats = PeriodStats::default();
    let mut scores = Vec::with_capacity(states.len());

    for state in states.values() {
        match state {
            DayState::Pending => stats.pending_days += 1,
            DayState::Rest => stats.rest_days += 1,
            DayState::RestScored { score, .. } => {
                stats.rest_days += 1;
                scores.push(*score);
            }
            DayState::Scored { score } => {
                stats.training_days += 1;
                scores.push(*score);
            }
        }
    }

    let (average, sd) = mean_and_sd(&scores);
    stats.average = average;
    stats.sd = sd;
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day_state::{resolve_range, DateRange, ScoreSource};
    use crate::models::DailyLogRecord;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_period() {
        assert_eq!(aggregate(&BTreeMap::new()), PeriodStats::default());
    }

    #[test]
    fn test_counts_and_spread() {
        let states: BTreeMap<NaiveDate, DayState> = vec![
            (date(2024, 1, 1), DayState::Scored { score: 80.0 }),
            (date(2024, 1, 2), DayState::RestScored { score: 60.0, source: ScoreSource::Predicted }),
            (date(2024, 1, 3), DayState::Rest),
            (date(2024, 1, 4), DayState::Pending),
            (date(2024, 1, 5), DayState::Pending),
        ]
        .into_iter()
        .collect();

        let stats = aggregate(&states);
        assert_eq!(stats.training_days, 1);
        assert_eq!(stats.rest_days, 2);
        assert_eq!(stats.pending_days, 2);
        assert!((stats.average - 70.0).abs() < 1e-9);
        assert!((stats.sd - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_score_has_zero_spread() {
        let states: BTreeMap<NaiveDate, DayState> =
            vec![(date(2024, 5, 1), DayState::Scored { score: 42.0 })].into_iter().collect();
        let stats = aggregate(&states);
        assert_eq!(stats.average, 42.0);
        assert_eq!(stats.sd, 0.0);
    }

    #[test]
    fn test_self_rated_counts_as_rest() {
        let states: BTreeMap<NaiveDate, DayState> = vec![(
            date(2024, 5, 1),
            DayState::RestScored { score: 50.0, source: ScoreSource::SelfRated },
        )]
        .into_iter()
        .collect();
        let stats = aggregate(&states);
        assert_eq!(stats.rest_days, 1);
        assert_eq!(stats.training_days, 0);
        assert_eq!(stats.average, 50.0);
    }

    /// Per-day fixture: (has log, trained, rating, score)
    fn day_strategy() -> impl Strategy<Value = (bool, bool, Option<f64>, Option<f64>)> {
        (
            any::<bool>(),
            any::<bool>(),
            proptest::option::of(0.0f64..=100.0),
            proptest::option::of(0.0f64..=100.0),
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: an N-day range yields N states whose counts sum to N
        #[test]
        fn prop_partition_covers_range(days in proptest::collection::vec(day_strategy(), 0..40)) {
            let start = date(2024, 1, 1);
            let range = DateRange::new(start, days.len() as u32);

            let mut logs = BTreeMap::new();
            let mut scores = BTreeMap::new();
            for (day, (has_log, trained, rating, score)) in range.dates().zip(days.iter()) {
                if *has_log {
                    let mut log = DailyLogRecord::new(day);
                    log.trained = *trained;
                    log.recovery_rating = *rating;
                    logs.insert(day, log);
                }
                if let Some(score) = score {
                    scores.insert(day, *score);
                }
            }

            let states = resolve_range(&range, &logs, &scores);
            prop_assert_eq!(states.len(), days.len());

            let stats = aggregate(&states);
            prop_assert_eq!(
                (stats.training_days + stats.rest_days + stats.pending_days) as usize,
                days.len()
            );
            prop_assert!(stats.sd >= 0.0);
            prop_assert!(stats.average >= 0.0 && stats.average <= 100.0 + 1e-9);
        }
    }
}
