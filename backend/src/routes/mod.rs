//! Route definitions for the Recovery Calendar API
//!
//! This module organizes all API routes and applies middleware.

use crate::auth::{ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER};
use crate::state::AppState;
use axum::{
    http::{header, HeaderName, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod calendar;
mod health;
mod nutrition;
mod recovery;

pub use calendar::{calendar_routes, trends_routes};
pub use nutrition::nutrition_routes;
pub use recovery::{daily_log_routes, recovery_routes};

/// Largest request body accepted; only the nutrition profile takes one
pub const MAX_BODY_BYTES: usize = 16 * 1024;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config().server.request_timeout_secs);
    let token_headers = [
        HeaderName::from_static(ACCESS_TOKEN_HEADER),
        HeaderName::from_static(REFRESH_TOKEN_HEADER),
    ];

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes())
        // Apply middleware layers
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([
                    header::CONTENT_TYPE,
                    header::AUTHORIZATION,
                    HeaderName::from_static(REFRESH_TOKEN_HEADER),
                ])
                .expose_headers(token_headers),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "Recovery Calendar API v1" }))
        .nest("/calendar", calendar::calendar_routes())
        .nest("/trends", calendar::trends_routes())
        .nest("/recovery", recovery::recovery_routes())
        .nest("/daily-log", recovery::daily_log_routes())
        .nest("/nutrition", nutrition::nutrition_routes())
}
