//! Business logic services
//!
//! Services coordinate upstream fetches and the pure derivations in
//! `recovery-calendar-shared`.

pub mod calendar;
pub mod nutrition;
pub mod recovery;
pub mod trends;

pub use calendar::CalendarService;
pub use nutrition::NutritionService;
pub use recovery::RecoveryService;
pub use trends::TrendsService;
