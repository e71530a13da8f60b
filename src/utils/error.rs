//! Error handling for the engine
//!
//! This module defines all error types used throughout the engine.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for the engine
pub type Result<T> = std::result::Result<T, EngineError>;

/// Main error type for the engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filter ranges where the start date falls after the end date
    ///
    /// Raised at the `FilterState` boundary; the engine itself assumes a
    /// validated, well-ordered range.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange {
        /// Requested start of the range
        start: NaiveDate,
        /// Requested end of the range
        end: NaiveDate,
    },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}
