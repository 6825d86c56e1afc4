//! Calendar and trends API routes

use crate::auth::AuthSession;
use crate::error::ApiError;
use crate::services::{CalendarService, TrendsService};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::Response,
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use recovery_calendar_shared::{CalendarView, DateRange};
use serde::Deserialize;

/// `?view=week|month&date=YYYY-MM-DD`; defaults to this month
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub view: Option<String>,
    pub date: Option<NaiveDate>,
}

impl PeriodQuery {
    fn resolve(&self) -> Result<(CalendarView, DateRange), ApiError> {
        let view: CalendarView = match self.view.as_deref() {
            Some(view) => view.parse()?,
            None => CalendarView::default(),
        };
        let cursor = self.date.unwrap_or_else(|| Utc::now().date_naive());
        Ok((view, view.range_for(cursor)?))
    }
}

/// Create calendar routes
pub fn calendar_routes() -> Router<AppState> {
    Router::new().route("/", get(get_calendar))
}

/// Create trends routes
pub fn trends_routes() -> Router<AppState> {
    Router::new().route("/", get(get_trends))
}

/// GET /api/v1/calendar - Day states, zones and stats for a week or month
async fn get_calendar(
    State(state): State<AppState>,
    auth: AuthSession,
    Query(query): Query<PeriodQuery>,
) -> Result<Response, ApiError> {
    let (view, range) = query.resolve()?;
    let page = CalendarService::get_calendar(state.upstream(), &auth.0, view, range).await;
    Ok(auth.respond(page.map(Json)).await)
}

/// GET /api/v1/trends - Trend summary for a week or month
async fn get_trends(
    State(state): State<AppState>,
    auth: AuthSession,
    Query(query): Query<PeriodQuery>,
) -> Result<Response, ApiError> {
    let (view, range) = query.resolve()?;
    let summary = TrendsService::get_trends(state.upstream(), &auth.0, view, range).await;
    Ok(auth.respond(summary.map(Json)).await)
}
