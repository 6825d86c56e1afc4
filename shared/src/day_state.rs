//! Day-state derivation for the recovery calendar
//!
//! Each calendar date resolves to exactly one of four states from two inputs:
//! the day's log (if any) and the model's recovery score (if any).
//!
//! | log | trained | score | recovery_rating | state |
//! |-----|---------|-------|-----------------|-------|
//! | no  | -       | -     | -               | `pending` |
//! | yes | no      | no    | -               | `rest` |
//! | yes | no      | yes   | -               | `rest-scored` (predicted) |
//! | yes | yes     | yes   | -               | `scored` |
//! | yes | yes     | no    | yes             | `rest-scored` (self rated) |
//! | yes | yes     | no    | no              | `pending` |

use crate::errors::ParseError;
use crate::models::DailyLogRecord;
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Where a `rest-scored` score came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// Recovery model prediction for a rest day
    Predicted,
    /// The user's own `recovery_rating`, used when a trained day has no prediction
    SelfRated,
}

/// Derived state of one calendar date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum DayState {
    /// No log exists for the date
    Pending,
    /// Logged rest day without a score
    Rest,
    /// Rest day with a score, or a trained day scored from the user's rating
    RestScored { score: f64, source: ScoreSource },
    /// Trained day with a model score
    Scored { score: f64 },
}

impl DayState {
    /// Score carried by the state, if any
    pub fn score(&self) -> Option<f64> {
        match self {
            DayState::RestScored { score, .. } | DayState::Scored { score } => Some(*score),
            DayState::Pending | DayState::Rest => None,
        }
    }
}

/// Resolve the state of one date
pub fn resolve_day_state(log: Option<&DailyLogRecord>, score: Option<f64>) -> DayState {
    let Some(log) = log else {
        return DayState::Pending;
    };

    if !log.trained {
        return match score {
            Some(score) => DayState::RestScored {
                score,
                source: ScoreSource::Predicted,
            },
            None => DayState::Rest,
        };
    }

    match (score, log.recovery_rating) {
        (Some(score), _) => DayState::Scored { score },
        (None, Some(rating)) => DayState::RestScored {
            score: rating,
            source: ScoreSource::SelfRated,
        },
        (None, None) => DayState::Pending,
    }
}

// ============================================================================
// Date Ranges
// ============================================================================

/// Contiguous run of `days` dates starting at `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub days: u32,
}

impl DateRange {
    pub fn new(start: NaiveDate, days: u32) -> Self {
        Self { start, days }
    }

    /// Range whose every date is representable
    pub fn try_new(start: NaiveDate, days: u32) -> Result<Self, ParseError> {
        let range = Self::new(start, days);
        if !range.is_empty() && range.end().is_none() {
            return Err(ParseError::DateRange { start, days });
        }
        Ok(range)
    }

    /// Every date in the range, in order
    ///
    /// Stops at the last representable date; ranges built with `try_new`
    /// always yield `days` dates.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.days).filter_map(move |offset| self.start.checked_add_days(Days::new(u64::from(offset))))
    }

    /// Last date of the range, `None` when empty
    pub fn end(&self) -> Option<NaiveDate> {
        let last = self.days.checked_sub(1)?;
        self.start.checked_add_days(Days::new(u64::from(last)))
    }

    pub fn is_empty(&self) -> bool {
        self.days == 0
    }
}

/// Calendar page layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Week,
    #[default]
    Month,
}

impl CalendarView {
    /// Range displayed for a cursor date
    ///
    /// Weeks start on Sunday. Months cover every day of the cursor's month.
    /// Fails for cursors at the edges of the calendar whose page would
    /// extend past `NaiveDate::MIN` or `NaiveDate::MAX`.
    pub fn range_for(&self, cursor: NaiveDate) -> Result<DateRange, ParseError> {
        let out_of_range = || ParseError::DateRange {
            start: cursor,
            days: self.page_len(),
        };
        match self {
            CalendarView::Week => {
                let back = u64::from(cursor.weekday().num_days_from_sunday());
                let start = cursor.checked_sub_days(Days::new(back)).ok_or_else(out_of_range)?;
                DateRange::try_new(start, 7)
            }
            CalendarView::Month => {
                let first = cursor
                    .checked_sub_days(Days::new(u64::from(cursor.day0())))
                    .ok_or_else(out_of_range)?;
                let next = first.checked_add_months(Months::new(1)).ok_or_else(out_of_range)?;
                DateRange::try_new(first, (next - first).num_days() as u32)
            }
        }
    }

    /// Nominal page length, used in error reports
    fn page_len(&self) -> u32 {
        match self {
            CalendarView::Week => 7,
            CalendarView::Month => 31,
        }
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarView::Week => write!(f, "week"),
            CalendarView::Month => write!(f, "month"),
        }
    }
}

impl std::str::FromStr for CalendarView {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(CalendarView::Week),
            "month" => Ok(CalendarView::Month),
            _ => Err(ParseError::CalendarView(s.to_string())),
        }
    }
}

/// Resolve every date of a range
///
/// The result has exactly one entry per date in `range`; logs and scores for
/// dates outside the range are ignored.
pub fn resolve_range(
    range: &DateRange,
    logs: &BTreeMap<NaiveDate, DailyLogRecord>,
    scores: &BTreeMap<NaiveDate, f64>,
) -> BTreeMap<NaiveDate, DayState> {
    range
        .dates()
        .map(|date| {
            let state = resolve_day_state(logs.get(&date), scores.get(&date).copied());
            (date, state)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn log(trained: bool, rating: Option<f64>) -> DailyLogRecord {
        let mut log = DailyLogRecord::new(date(2024, 1, 1));
        log.trained = trained;
        log.recovery_rating = rating;
        log
    }

    // =========================================================================
    // Resolver Tests
    // =========================================================================

    #[test]
    fn test_missing_log_is_pending() {
        assert_eq!(resolve_day_state(None, None), DayState::Pending);
        // A score without a log still means nothing was logged
        assert_eq!(resolve_day_state(None, Some(70.0)), DayState::Pending);
    }

    #[test]
    fn test_rest_day_states() {
        assert_eq!(resolve_day_state(Some(&log(false, None)), None), DayState::Rest);
        assert_eq!(
            resolve_day_state(Some(&log(false, Some(50.0))), Some(64.0)),
            DayState::RestScored { score: 64.0, source: ScoreSource::Predicted }
        );
        // Rating is only a fallback for trained days
        assert_eq!(resolve_day_state(Some(&log(false, Some(50.0))), None), DayState::Rest);
    }

    #[test]
    fn test_trained_day_states() {
        assert_eq!(
            resolve_day_state(Some(&log(true, Some(40.0))), Some(81.0)),
            DayState::Scored { score: 81.0 }
        );
        assert_eq!(
            resolve_day_state(Some(&log(true, Some(40.0))), None),
            DayState::RestScored { score: 40.0, source: ScoreSource::SelfRated }
        );
        assert_eq!(resolve_day_state(Some(&log(true, None)), None), DayState::Pending);
    }

    #[test]
    fn test_trained_without_score_or_rating_is_pending() {
        let row = json!({
            "date": "2024-01-01",
            "trained": 1,
            "sleep_start": "23:00",
            "sleep_end": "07:00"
        });
        let log: DailyLogRecord = serde_json::from_value(row).unwrap();
        let scores: BTreeMap<NaiveDate, f64> = BTreeMap::new();

        let state = resolve_day_state(Some(&log), scores.get(&log.date).copied());
        assert_eq!(state, DayState::Pending);
    }

    #[test]
    fn test_day_state_serialization() {
        assert_eq!(serde_json::to_value(DayState::Pending).unwrap(), json!({"state": "pending"}));
        assert_eq!(
            serde_json::to_value(DayState::Scored { score: 72.0 }).unwrap(),
            json!({"state": "scored", "score": 72.0})
        );
        assert_eq!(
            serde_json::to_value(DayState::RestScored { score: 55.0, source: ScoreSource::SelfRated })
                .unwrap(),
            json!({"state": "rest-scored", "score": 55.0, "source": "self_rated"})
        );
    }

    // =========================================================================
    // Range Tests
    // =========================================================================

    #[test]
    fn test_week_starts_on_sunday() {
        // 2024-01-03 is a Wednesday
        let range = CalendarView::Week.range_for(date(2024, 1, 3)).unwrap();
        assert_eq!(range, DateRange::new(date(2023, 12, 31), 7));
        assert_eq!(range.end(), Some(date(2024, 1, 6)));

        // A Sunday is its own week start
        let range = CalendarView::Week.range_for(date(2024, 1, 7)).unwrap();
        assert_eq!(range.start, date(2024, 1, 7));
    }

    #[test]
    fn test_month_covers_every_day() {
        assert_eq!(
            CalendarView::Month.range_for(date(2024, 2, 17)),
            Ok(DateRange::new(date(2024, 2, 1), 29))
        );
        assert_eq!(
            CalendarView::Month.range_for(date(2023, 2, 1)),
            Ok(DateRange::new(date(2023, 2, 1), 28))
        );
        assert_eq!(
            CalendarView::Month.range_for(date(2024, 12, 31)),
            Ok(DateRange::new(date(2024, 12, 1), 31))
        );
    }

    #[test]
    fn test_range_for_calendar_edges() {
        let last_month: NaiveDate = "+262142-12-15".parse().unwrap();
        assert!(matches!(
            CalendarView::Month.range_for(last_month),
            Err(ParseError::DateRange { .. })
        ));
        assert!(CalendarView::Week.range_for(NaiveDate::MIN).is_err());
        assert!(CalendarView::Week.range_for(NaiveDate::MAX).is_err());
        assert!(CalendarView::Month.range_for(NaiveDate::MAX).is_err());

        // The first month of the calendar still has a complete page
        let range = CalendarView::Month.range_for(NaiveDate::MIN).unwrap();
        assert_eq!(range.start, NaiveDate::MIN);
        assert_eq!(range.dates().count() as u32, range.days);
    }

    #[test]
    fn test_try_new_rejects_ranges_past_max() {
        let start = NaiveDate::MAX.pred_opt().unwrap();
        assert!(DateRange::try_new(start, 2).is_ok());
        assert_eq!(
            DateRange::try_new(start, 3),
            Err(ParseError::DateRange { start, days: 3 })
        );
        assert!(DateRange::try_new(NaiveDate::MAX, 0).is_ok());
    }

    #[test]
    fn test_view_parsing() {
        assert_eq!("Week".parse::<CalendarView>().unwrap(), CalendarView::Week);
        assert_eq!("month".parse::<CalendarView>().unwrap(), CalendarView::Month);
        assert!("year".parse::<CalendarView>().is_err());
        assert_eq!(CalendarView::Week.to_string(), "week");
    }

    #[test]
    fn test_empty_range() {
        let range = DateRange::new(date(2024, 1, 1), 0);
        assert!(range.is_empty());
        assert_eq!(range.end(), None);
        assert!(resolve_range(&range, &BTreeMap::new(), &BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_resolve_range_ignores_out_of_range_inputs() {
        let range = DateRange::new(date(2024, 1, 1), 3);
        let mut logs = BTreeMap::new();
        let mut day_two = DailyLogRecord::new(date(2024, 1, 2));
        day_two.trained = true;
        logs.insert(day_two.date, day_two);
        logs.insert(date(2024, 1, 9), DailyLogRecord::new(date(2024, 1, 9)));

        let mut scores = BTreeMap::new();
        scores.insert(date(2024, 1, 2), 77.0);
        scores.insert(date(2023, 12, 31), 20.0);

        let states = resolve_range(&range, &logs, &scores);
        let expected: Vec<(NaiveDate, DayState)> = vec![
            (date(2024, 1, 1), DayState::Pending),
            (date(2024, 1, 2), DayState::Scored { score: 77.0 }),
            (date(2024, 1, 3), DayState::Pending),
        ];
        assert_eq!(states.into_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_day_state_map_uses_iso_keys() {
        let range = DateRange::new(date(2024, 3, 9), 1);
        let states = resolve_range(&range, &BTreeMap::new(), &BTreeMap::new());
        assert_eq!(
            serde_json::to_value(&states).unwrap(),
            json!({"2024-03-09": {"state": "pending"}})
        );
    }
}
