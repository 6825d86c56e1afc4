//! Recovery Calendar Shared Library
//!
//! Pure computation core: day-state derivation, recovery zones, period
//! statistics and nutrition targets. Used by the backend gateway and the
//! WASM bindings.

pub mod aggregate;
pub mod day_state;
pub mod errors;
pub mod models;
pub mod nutrition;
pub mod sleep;
pub mod trained;
pub mod trends;
pub mod units;
pub mod validation;
pub mod zones;

// Re-export commonly used items
pub use aggregate::{aggregate, PeriodStats};
pub use day_state::{resolve_day_state, resolve_range, CalendarView, DateRange, DayState, ScoreSource};
pub use errors::*;
pub use models::{index_logs, index_scores, DailyLogRecord, Macros, RecoveryPrediction};
pub use nutrition::{
    compute_bmr, compute_nutrition_profile, MacroTargets, NutritionInput, NutritionProfile,
};
pub use sleep::sleep_hours;
pub use trained::normalize_trained;
pub use trends::{summarize_trends, TrendBucket, TrendSummary};
pub use units::*;
pub use zones::{classify, classify_zone, RecoveryZone, ZoneInfo};
