//! Custom error types for kassebog
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for kassebog operations
#[derive(Error, Debug)]
pub enum KassebogError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// A required column could not be located in the input headers
    #[error("Missing required column: no header matched any of {0}")]
    MissingColumn(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl KassebogError {
    /// Create a missing-column error listing the candidate headers that were tried
    pub fn missing_column(candidates: &[&str]) -> Self {
        Self::MissingColumn(candidates.join(", "))
    }

    /// Create a "not found" error for input files
    pub fn input_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Input file",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a missing-column error
    pub fn is_missing_column(&self) -> bool {
        matches!(self, Self::MissingColumn(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for KassebogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for KassebogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for KassebogError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for kassebog operations
pub type KassebogResult<T> = Result<T, KassebogError>;
