//! Single-day API routes

use crate::auth::AuthSession;
use crate::services::RecoveryService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;

/// Create recovery routes
pub fn recovery_routes() -> Router<AppState> {
    Router::new().route("/:date", get(get_recovery))
}

/// Create daily log routes
pub fn daily_log_routes() -> Router<AppState> {
    Router::new().route("/:date", get(get_daily_log))
}

/// GET /api/v1/recovery/:date - Recovery score and zone, null when not computable
async fn get_recovery(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(date): Path<NaiveDate>,
) -> Response {
    let score = RecoveryService::get_score(state.upstream(), &auth.0, date).await;
    auth.respond(score.map(Json)).await
}

/// GET /api/v1/daily-log/:date - Log with derived sleep hours
async fn get_daily_log(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(date): Path<NaiveDate>,
) -> Response {
    let log = RecoveryService::get_daily_log(state.upstream(), &auth.0, date).await;
    auth.respond(log.map(Json)).await
}
