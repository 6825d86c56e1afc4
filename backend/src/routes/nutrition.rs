//! Nutrition API routes

use crate::error::ApiError;
use crate::services::NutritionService;
use crate::state::AppState;
use axum::{routing::post, Json, Router};
use recovery_calendar_shared::{NutritionInput, NutritionProfile};

/// Create nutrition routes
pub fn nutrition_routes() -> Router<AppState> {
    Router::new().route("/profile", post(compute_profile))
}

/// POST /api/v1/nutrition/profile - BMR, maintenance calories and macro targets
async fn compute_profile(Json(input): Json<NutritionInput>) -> Result<Json<NutritionProfile>, ApiError> {
    Ok(Json(NutritionService::profile(&input)?))
}
