//! Recovery Calendar WASM Module
//!
//! Browser bindings for the calendar derivations, so a page can colour days
//! and compute targets without a round trip. Structured values cross the
//! boundary as JSON strings.

use chrono::NaiveDate;
use recovery_calendar_shared::{
    aggregate, classify, classify_zone, index_logs, index_scores, resolve_range, sleep_hours, DailyLogRecord,
    DateRange, DayState, NutritionInput, PeriodStats, RecoveryPrediction,
};
use serde::Serialize;
use std::collections::BTreeMap;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct CalendarOutput {
    day_states: BTreeMap<NaiveDate, DayState>,
    stats: PeriodStats,
}

fn to_js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Zone key (`poor`, `fair`, `good`, `excellent`) for a recovery score
#[wasm_bindgen]
pub fn classify_recovery(score: f64) -> String {
    classify_zone(score).as_str().to_string()
}

/// Display label for a recovery score's zone
#[wasm_bindgen]
pub fn recovery_label(score: f64) -> String {
    classify(score).label.to_string()
}

/// Mifflin-St Jeor BMR from raw profile values
#[wasm_bindgen]
pub fn compute_bmr(
    sex: &str,
    age_years: i32,
    weight: f64,
    height: f64,
    height_unit: &str,
    weight_unit: &str,
) -> f64 {
    recovery_calendar_shared::compute_bmr(sex, age_years, weight, height, height_unit, weight_unit)
}

/// Hours slept between two `HH:MM` times, undefined if either is malformed
#[wasm_bindgen]
pub fn sleep_duration(start: &str, end: &str) -> Option<f64> {
    sleep_hours(Some(start), Some(end))
}

/// Nutrition profile for a JSON onboarding profile
#[wasm_bindgen]
pub fn nutrition_profile(input_json: &str) -> Result<String, JsValue> {
    nutrition_profile_json(input_json).map_err(to_js_error)
}

/// Day states and stats for `days` dates from `start`
///
/// `logs_json` is an array of daily logs, `scores_json` an array of
/// `{date, score}` predictions.
#[wasm_bindgen]
pub fn resolve_calendar(
    logs_json: &str,
    scores_json: &str,
    start: &str,
    days: u32,
) -> Result<String, JsValue> {
    resolve_calendar_json(logs_json, scores_json, start, days).map_err(to_js_error)
}

fn nutrition_profile_json(input_json: &str) -> Result<String, String> {
    let input: NutritionInput =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid profile: {e}"))?;
    let profile = recovery_calendar_shared::compute_nutrition_profile(&input);
    serde_json::to_string(&profile).map_err(|e| e.to_string())
}

fn resolve_calendar_json(
    logs_json: &str,
    scores_json: &str,
    start: &str,
    days: u32,
) -> Result<String, String> {
    let logs: Vec<DailyLogRecord> =
        serde_json::from_str(logs_json).map_err(|e| format!("Invalid logs: {e}"))?;
    let predictions: Vec<RecoveryPrediction> =
        serde_json::from_str(scores_json).map_err(|e| format!("Invalid scores: {e}"))?;
    let start: NaiveDate = start
        .parse()
        .map_err(|e| format!("Invalid start date {start}: {e}"))?;

    let range = DateRange::try_new(start, days).map_err(|e| e.to_string())?;
    let day_states = resolve_range(&range, &index_logs(logs), &index_scores(predictions));
    let output = CalendarOutput {
        stats: aggregate(&day_states),
        day_states,
    };
    serde_json::to_string(&output).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_classify_recovery() {
        assert_eq!(classify_recovery(39.0), "poor");
        assert_eq!(classify_recovery(76.0), "excellent");
        assert_eq!(recovery_label(50.0), "Fair");
    }

    #[test]
    fn test_compute_bmr() {
        assert!((compute_bmr("male", 30, 80.0, 180.0, "cm", "kg") - 1780.0).abs() < 1e-9);
    }

    #[test]
    fn test_sleep_duration() {
        assert_eq!(sleep_duration("23:30", "07:00"), Some(7.5));
        assert_eq!(sleep_duration("", "07:00"), None);
    }

    #[test]
    fn test_nutrition_profile_json() {
        let output = nutrition_profile_json(
            r#"{"sex": "female", "age": 25, "weight": 60, "height": 165}"#,
        )
        .unwrap();
        let profile: Value = serde_json::from_str(&output).unwrap();
        // BMR 1345.25 at the moderate multiplier
        assert_eq!(profile["maintenance_calories"], 1850);
        assert_eq!(profile["macro_targets"], json!({"protein": 108, "carbs": 180, "fat": 48}));
    }

    #[test]
    fn test_resolve_calendar_json() {
        let logs = json!([
            {"date": "2024-01-01", "trained": 1},
            {"date": "2024-01-02", "trained": 0}
        ]);
        let scores = json!([{"date": "2024-01-01", "score": 70}]);

        let output = resolve_calendar_json(&logs.to_string(), &scores.to_string(), "2024-01-01", 3).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["day_states"]["2024-01-01"], json!({"state": "scored", "score": 70.0}));
        assert_eq!(value["day_states"]["2024-01-02"], json!({"state": "rest"}));
        assert_eq!(value["day_states"]["2024-01-03"], json!({"state": "pending"}));
        assert_eq!(value["stats"]["training_days"], 1);
        assert_eq!(value["stats"]["rest_days"], 1);
        assert_eq!(value["stats"]["pending_days"], 1);
    }

    #[test]
    fn test_resolve_calendar_rejects_bad_input() {
        let err = resolve_calendar_json("[]", "[]", "01/02/2024", 7).unwrap_err();
        assert!(err.contains("Invalid start date"));

        let err = resolve_calendar_json("{", "[]", "2024-01-01", 7).unwrap_err();
        assert!(err.starts_with("Invalid logs"));
    }

    #[test]
    fn test_resolve_calendar_rejects_range_past_last_date() {
        let err = resolve_calendar_json("[]", "[]", "+262142-12-30", 3).unwrap_err();
        assert!(err.starts_with("Date range out of bounds"));

        // Ending exactly on the last date still yields one state per day
        let output = resolve_calendar_json("[]", "[]", "+262142-12-30", 2).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["day_states"].as_object().unwrap().len(), 2);
        assert_eq!(value["stats"]["pending_days"], 2);
    }
}
