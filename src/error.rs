//! Error types for the random test filter
//!
//! Configuration problems and grouping failures are fatal for a run. A malformed
//! seed is deliberately not represented here: it falls back to a generated seed.

use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Test limit must be positive, got {value}")]
    InvalidLimit { value: i64 },

    #[error("Cannot determine the group of test '{id}': {reason}")]
    UngroupableIdentifier { id: String, reason: String },

    #[error("Test '{id}' was discovered more than once")]
    DuplicateIdentifier { id: String },

    #[error("Failed to read config file '{path}': {source}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration in '{path}': {reason}")]
    ConfigValidationFailed { path: String, reason: String },

    #[error("Failed to read test identifiers from '{path}': {source}")]
    InputRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render selection report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;
