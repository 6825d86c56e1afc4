//! Input validation functions
//!
//! Boundary checks for query parameters and request bodies. The calculators
//! themselves accept anything; these run before a request reaches them.

use crate::errors::ValidationError;
use crate::nutrition::NutritionInput;

/// Longest history window the upstream serves in one request
pub const MAX_HISTORY_DAYS: u32 = 31;

/// Validate a history window length (0-31 days)
pub fn validate_history_days(days: u32) -> Result<(), ValidationError> {
    if days > MAX_HISTORY_DAYS {
        return Err(ValidationError::new(
            "days",
            format!("History window must be at most {MAX_HISTORY_DAYS} days"),
        ));
    }
    Ok(())
}

fn validate_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new(field, "Must be a valid number"));
    }
    if value <= 0.0 {
        return Err(ValidationError::new(field, "Must be greater than zero"));
    }
    Ok(())
}

/// Validate the numeric fields of a nutrition request
pub fn validate_nutrition_input(input: &NutritionInput) -> Result<(), ValidationError> {
    if !(1..=150).contains(&input.age) {
        return Err(ValidationError::new("age", "Age must be between 1 and 150"));
    }
    validate_positive("weight", input.weight)?;
    validate_positive("height", input.height)?;
    if let Some(target) = input.weight_target {
        validate_positive("weight_target", target)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn input() -> NutritionInput {
        NutritionInput {
            sex: "male".to_string(),
            age: 30,
            weight: 80.0,
            height: 180.0,
            height_unit: "cm".to_string(),
            weight_unit: "kg".to_string(),
            activity_level: None,
            weight_target: None,
            weight_target_unit: None,
            goal: None,
        }
    }

    #[test]
    fn test_validate_history_days() {
        assert!(validate_history_days(0).is_ok());
        assert!(validate_history_days(31).is_ok());
        let err = validate_history_days(32).unwrap_err();
        assert_eq!(err.field, "days");
    }

    #[test]
    fn test_validate_nutrition_input() {
        assert!(validate_nutrition_input(&input()).is_ok());

        let mut bad = input();
        bad.age = 0;
        assert_eq!(validate_nutrition_input(&bad).unwrap_err().field, "age");

        let mut bad = input();
        bad.height = f64::NAN;
        assert_eq!(validate_nutrition_input(&bad).unwrap_err().field, "height");

        let mut bad = input();
        bad.weight_target = Some(-5.0);
        assert_eq!(validate_nutrition_input(&bad).unwrap_err().field, "weight_target");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("age", "Age must be between 1 and 150");
        assert_eq!(err.to_string(), "age: Age must be between 1 and 150");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_history_days_cap(days in 0u32..200) {
            prop_assert_eq!(validate_history_days(days).is_ok(), days <= MAX_HISTORY_DAYS);
        }
    }
}
