//! Nutrition targets module
//!
//! Derives basal metabolic rate, maintenance calories and daily macro targets
//! from the onboarding profile.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Total**: Unknown enum strings fall back to a default instead of failing
//! 3. **SI Internally**: Weight and height are converted to kg/cm first

use crate::units::{HeightUnit, WeightUnit};
use serde::{Deserialize, Serialize};

/// Roughly 1100 kcal per week for each kilogram of body-weight change
pub const CAL_ADJUST_PER_KG: f64 = 1100.0 / 7.0;

// ============================================================================
// Profile Enums
// ============================================================================

/// Biological sex for the BMR equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    Male,
    Female,
}

impl BiologicalSex {
    /// Only a case-insensitive "male" takes the male branch; any other value
    /// uses the female constant.
    pub fn from_profile(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("male") {
            BiologicalSex::Male
        } else {
            BiologicalSex::Female
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Low,
    #[default]
    Moderate,
    High,
}

impl ActivityLevel {
    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Low => 1.2,
            ActivityLevel::Moderate => 1.375,
            ActivityLevel::High => 1.55,
        }
    }

    /// Parse a profile value; unset or unrecognised values mean moderate
    pub fn from_profile(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("low") => ActivityLevel::Low,
            Some("high") => ActivityLevel::High,
            _ => ActivityLevel::Moderate,
        }
    }
}

/// Training goal, which selects the macro table row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    GainMuscle,
    #[default]
    Maintenance,
    FatLoss,
    WeightLoss,
}

impl Goal {
    /// Parse a profile value; unset or unrecognised goals mean maintenance
    pub fn from_profile(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("gain muscle") => Goal::GainMuscle,
            Some("fat loss") => Goal::FatLoss,
            Some("weight loss") => Goal::WeightLoss,
            _ => Goal::Maintenance,
        }
    }

    /// Grams per kilogram of bodyweight as (protein, carbs, fat)
    pub fn grams_per_kg(&self) -> (f64, f64, f64) {
        match self {
            Goal::GainMuscle => (2.0, 4.0, 1.0),
            Goal::Maintenance => (1.8, 3.0, 0.8),
            Goal::FatLoss => (2.2, 2.5, 0.8),
            Goal::WeightLoss => (2.0, 2.0, 0.8),
        }
    }
}

// ============================================================================
// BMR
// ============================================================================

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr_mifflin(weight_kg: f64, height_cm: f64, age_years: i32, sex: BiologicalSex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    match sex {
        BiologicalSex::Male => base + 5.0,
        BiologicalSex::Female => base - 161.0,
    }
}

/// BMR from raw profile values in the user's units
pub fn compute_bmr(
    sex: &str,
    age_years: i32,
    weight: f64,
    height: f64,
    height_unit: &str,
    weight_unit: &str,
) -> f64 {
    let weight_kg = WeightUnit::parse_lenient(weight_unit).to_kg(weight);
    let height_cm = HeightUnit::parse_lenient(height_unit).to_cm(height);
    calculate_bmr_mifflin(weight_kg, height_cm, age_years, BiologicalSex::from_profile(sex))
}

// ============================================================================
// Nutrition Profile
// ============================================================================

/// Onboarding profile fields needed for nutrition targets
///
/// Mirrors the upstream user row, so enum-like fields stay strings here and
/// are interpreted by [`compute_nutrition_profile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionInput {
    pub sex: String,
    pub age: i32,
    pub weight: f64,
    pub height: f64,
    #[serde(default = "default_height_unit")]
    pub height_unit: String,
    #[serde(default = "default_weight_unit")]
    pub weight_unit: String,
    #[serde(default)]
    pub activity_level: Option<String>,
    #[serde(default)]
    pub weight_target: Option<f64>,
    #[serde(default)]
    pub weight_target_unit: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
}

fn default_height_unit() -> String {
    HeightUnit::Cm.to_string()
}

fn default_weight_unit() -> String {
    WeightUnit::Kg.to_string()
}

/// Daily macro targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

/// Nutrition targets with the intermediate energy figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionProfile {
    /// Basal Metabolic Rate, one decimal
    pub bmr: f64,
    /// Total Daily Energy Expenditure, one decimal
    pub tdee: f64,
    /// TDEE adjusted toward the target weight
    pub maintenance_calories: i64,
    pub macro_targets: MacroTargets,
}

/// Compute maintenance calories and macro targets
///
/// The calorie adjustment is weight-target driven: moving toward a target
/// weight adds `CAL_ADJUST_PER_KG` per kilogram of difference. It is applied
/// only when both the target and its unit are present.
pub fn compute_nutrition_profile(input: &NutritionInput) -> NutritionProfile {
    let weight_unit = WeightUnit::parse_lenient(&input.weight_unit);
    let weight_kg = weight_unit.to_kg(input.weight);

    let bmr = compute_bmr(
        &input.sex,
        input.age,
        input.weight,
        input.height,
        &input.height_unit,
        &input.weight_unit,
    );
    let tdee = bmr * ActivityLevel::from_profile(input.activity_level.as_deref()).multiplier();

    let cal_adjust = match (input.weight_target, input.weight_target_unit.as_deref()) {
        (Some(target), Some(unit)) if !unit.trim().is_empty() => {
            let target_kg = WeightUnit::parse_lenient(unit).to_kg(target);
            CAL_ADJUST_PER_KG * (target_kg - weight_kg)
        }
        _ => 0.0,
    };

    NutritionProfile {
        bmr: round_to_tenth(bmr),
        tdee: round_to_tenth(tdee),
        maintenance_calories: (tdee + cal_adjust).round() as i64,
        macro_targets: macro_targets(Goal::from_profile(input.goal.as_deref()), weight_kg),
    }
}

/// Macro targets for a goal at a bodyweight
pub fn macro_targets(goal: Goal, weight_kg: f64) -> MacroTargets {
    let (protein, carbs, fat) = goal.grams_per_kg();
    MacroTargets {
        protein: (protein * weight_kg).round() as i64,
        carbs: (carbs * weight_kg).round() as i64,
        fat: (fat * weight_kg).round() as i64,
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
