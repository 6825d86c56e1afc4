//! Recovery score service
//!
//! Provides the single-day views:
//! - Model recovery score with its zone
//! - Daily log with derived sleep duration

use crate::error::ApiError;
use crate::upstream::{Session, UpstreamClient};
use chrono::NaiveDate;
use recovery_calendar_shared::{classify, DailyLogRecord, ZoneInfo};
use serde::Serialize;

/// Recovery score for one date; both fields null when not computable yet
#[derive(Debug, Clone, Serialize)]
pub struct RecoveryScoreResponse {
    pub date: NaiveDate,
    pub score: Option<f64>,
    pub zone: Option<ZoneInfo>,
}

/// Daily log with derived values
#[derive(Debug, Clone, Serialize)]
pub struct DailyLogResponse {
    #[serde(flatten)]
    pub log: DailyLogRecord,
    pub sleep_hours: Option<f64>,
}

impl From<DailyLogRecord> for DailyLogResponse {
    fn from(log: DailyLogRecord) -> Self {
        Self {
            sleep_hours: log.sleep_hours(),
            log,
        }
    }
}

/// Recovery service
pub struct RecoveryService;

impl RecoveryService {
    /// Model score for a date, classified into a zone
    pub async fn get_score(
        upstream: &UpstreamClient,
        session: &Session,
        date: NaiveDate,
    ) -> Result<RecoveryScoreResponse, ApiError> {
        let profile = upstream.fetch_me(session).await?;
        let score = upstream.predict_recovery(session, &profile.id, date).await?;

        Ok(RecoveryScoreResponse {
            date,
            score,
            zone: score.map(classify),
        })
    }

    /// Log for a date; `NotFound` when nothing was logged
    pub async fn get_daily_log(
        upstream: &UpstreamClient,
        session: &Session,
        date: NaiveDate,
    ) -> Result<DailyLogResponse, ApiError> {
        upstream
            .get_daily_log(session, date)
            .await?
            .map(DailyLogResponse::from)
            .ok_or_else(|| ApiError::NotFound(format!("No log for {date}")))
    }
}
