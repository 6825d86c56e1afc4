//! Trends service

use crate::error::ApiError;
use crate::upstream::{Session, UpstreamClient};
use recovery_calendar_shared::validation::validate_history_days;
use recovery_calendar_shared::{
    index_logs, summarize_trends, CalendarView, DateRange, TrendSummary,
};

/// Trends service
pub struct TrendsService;

impl TrendsService {
    /// Summarise one week or month page
    pub async fn get_trends(
        upstream: &UpstreamClient,
        session: &Session,
        view: CalendarView,
        range: DateRange,
    ) -> Result<TrendSummary, ApiError> {
        validate_history_days(range.days)?;

        let (profile, logs, predictions) = tokio::try_join!(
            upstream.fetch_me(session),
            upstream.fetch_log_history(session, range.start, range.days),
            upstream.fetch_recovery_history(session, range.start, range.days),
        )?;

        Ok(summarize_trends(
            view,
            &index_logs(logs),
            &predictions,
            &profile.macro_targets(),
        ))
    }
}
