//! Error types for the recovery calendar core
//!
//! The calculators themselves are total functions. Errors only appear when
//! parsing user-supplied strings into the strongly typed enums, or when a
//! requested date range runs past the representable calendar.

use thiserror::Error;

/// Errors produced while parsing enum-like strings at the API boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown weight unit: {0}")]
    WeightUnit(String),

    #[error("Unknown height unit: {0}")]
    HeightUnit(String),

    #[error("Unknown calendar view: {0}")]
    CalendarView(String),

    #[error("Invalid time of day: {0}")]
    TimeOfDay(String),

    #[error("Date range out of bounds: {days} days from {start}")]
    DateRange { start: chrono::NaiveDate, days: u32 },
}

/// Boundary validation failure with the offending field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
