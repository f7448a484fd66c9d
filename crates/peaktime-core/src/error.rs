//! Core error types for peaktime-core.
//!
//! Contract violations by upstream data producers surface as
//! [`ValidationError`]s instead of being silently accepted; sparse-data
//! situations (empty days, under-filled selections) are never errors and are
//! handled by the selector fallback tiers.

use thiserror::Error;

use crate::activity::Weekday;

/// Core error type for peaktime-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Hour outside the notification-eligible daytime window
    #[error("Hour {hour} outside the daytime window 6-23")]
    HourOutOfRange { hour: u8 },

    /// Negative or non-finite activity value
    #[error("Invalid activity for {weekday:?} {hour:02}:00: {minutes} minutes")]
    InvalidActivity {
        weekday: Weekday,
        hour: u8,
        minutes: f64,
    },

    /// More than one row for the same (weekday, hour) bucket
    #[error("Duplicate activity bucket for {weekday:?} {hour:02}:00")]
    DuplicateBucket { weekday: Weekday, hour: u8 },

    /// Peak count outside the 1-4 range the downstream schema allows
    #[error("Peak count must be between 1 and 4, got {count}")]
    InvalidPeakCount { count: usize },

    /// Schedule is missing a weekday entirely
    #[error("Schedule has no entry for {weekday:?}")]
    MissingDay { weekday: Weekday },

    /// Hours within a day are not strictly ascending
    #[error("Hours for {weekday:?} must be distinct and ascending, got {hours:?}")]
    UnorderedHours { weekday: Weekday, hours: Vec<u8> },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
