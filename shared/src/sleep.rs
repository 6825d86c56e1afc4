//! Sleep duration from bedtime and wake time
//!
//! Logs carry only times of day, so a bedtime later than the wake time means
//! the night crossed midnight.

use crate::errors::ParseError;
use chrono::{NaiveTime, Timelike};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parse `HH:MM` (or `HH:MM:SS`, as the upstream serialises time columns)
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, ParseError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| ParseError::TimeOfDay(value.to_string()))
}

/// Hours slept between `start` and `end`, wrapping past midnight
///
/// Returns `None` when either side is missing or malformed.
pub fn sleep_hours(start: Option<&str>, end: Option<&str>) -> Option<f64> {
    let start = parse_time_of_day(start?).ok()?;
    let end = parse_time_of_day(end?).ok()?;

    let to_minutes = |t: NaiveTime| i64::from(t.hour()) * 60 + i64::from(t.minute());
    let mut minutes = to_minutes(end) - to_minutes(start);
    if minutes < 0 {
        minutes += MINUTES_PER_DAY;
    }
    Some(minutes as f64 / 60.0)
}
