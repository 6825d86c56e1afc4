//! Nutrition service
//!
//! Onboarding calculator; runs locally without touching the upstream.

use crate::error::ApiError;
use recovery_calendar_shared::validation::validate_nutrition_input;
use recovery_calendar_shared::{compute_nutrition_profile, NutritionInput, NutritionProfile};
use tracing::debug;

/// Nutrition service
pub struct NutritionService;

impl NutritionService {
    /// Validate the profile and compute calorie and macro targets
    pub fn profile(input: &NutritionInput) -> Result<NutritionProfile, ApiError> {
        validate_nutrition_input(input)?;
        let profile = compute_nutrition_profile(input);
        debug!(
            maintenance_calories = profile.maintenance_calories,
            "Computed nutrition profile"
        );
        Ok(profile)
    }
}
