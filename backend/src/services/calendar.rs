//! Calendar service
//!
//! Fetches one calendar page of logs and predictions and derives the
//! per-day states, zone colours and period statistics.

use crate::error::ApiError;
use crate::upstream::{Session, UpstreamClient};
use chrono::NaiveDate;
use recovery_calendar_shared::validation::validate_history_days;
use recovery_calendar_shared::{
    aggregate, classify, index_logs, index_scores, resolve_range, CalendarView, DailyLogRecord,
    DateRange, DayState, PeriodStats, RecoveryPrediction, ZoneInfo,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// One rendered calendar page
#[derive(Debug, Clone, Serialize)]
pub struct CalendarResponse {
    pub view: CalendarView,
    pub start: NaiveDate,
    pub days: u32,
    pub day_states: BTreeMap<NaiveDate, DayState>,
    /// Zone colouring, only for trained days with a model score
    pub zones: BTreeMap<NaiveDate, ZoneInfo>,
    pub stats: PeriodStats,
}

/// Calendar service
pub struct CalendarService;

impl CalendarService {
    /// Build one week or month calendar page
    pub async fn get_calendar(
        upstream: &UpstreamClient,
        session: &Session,
        view: CalendarView,
        range: DateRange,
    ) -> Result<CalendarResponse, ApiError> {
        validate_history_days(range.days)?;

        let (logs, predictions) = tokio::try_join!(
            upstream.fetch_log_history(session, range.start, range.days),
            upstream.fetch_recovery_history(session, range.start, range.days),
        )?;
        debug!(
            logs = logs.len(),
            predictions = predictions.len(),
            "Fetched calendar inputs"
        );

        Ok(build_calendar(view, range, logs, predictions))
    }
}

/// Derive a calendar page from fetched rows
pub fn build_calendar(
    view: CalendarView,
    range: DateRange,
    logs: Vec<DailyLogRecord>,
    predictions: Vec<RecoveryPrediction>,
) -> CalendarResponse {
    let logs = index_logs(logs);
    let scores = index_scores(predictions);
    let day_states = resolve_range(&range, &logs, &scores);

    let zones = day_states
        .iter()
        .filter_map(|(date, state)| match state {
            DayState::Scored { score } => Some((*date, classify(*score))),
            _ => None,
        })
        .collect();

    CalendarResponse {
        view,
        start: range.start,
        days: range.days,
        stats: aggregate(&day_states),
        day_states,
        zones,
    }
}
