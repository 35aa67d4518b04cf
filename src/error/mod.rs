//! Error handling for dataset loading and chart rendering.

use std::io;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

pub mod util;

/// Specialized error type for the birthrate charts
#[derive(Debug, thiserror::Error)]
pub enum FertilityError {
    /// Error opening or reading a file
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Error decoding CSV data or adapting Arrow arrays
    #[error("Arrow error: {0}")]
    ArrowError(#[from] ArrowError),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    ParquetError(#[from] ParquetError),

    /// Error with the column layout of the source
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// A required field is absent from the source
    #[error("Missing required field '{field}' in {origin}")]
    MissingField {
        /// Canonical name of the missing field
        field: String,
        /// Where the field was expected
        origin: String,
    },

    /// A row holds a value that cannot be used
    #[error("Invalid value for field '{field}' at row {row}: {reason}")]
    InvalidValue {
        /// Canonical name of the offending field
        field: String,
        /// One-based data row (header excluded)
        row: usize,
        /// What is wrong with the value
        reason: String,
    },

    /// Error in configuration values or files
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error decoding a JSON configuration file
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error drawing or serializing a chart
    #[error("Render error: {0}")]
    RenderError(String),

    /// The source format cannot be read
    #[error("Unsupported data source: {0}")]
    UnsupportedSource(String),

    /// Internal state could not be accessed
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl FertilityError {
    /// Create a missing field error
    #[must_use]
    pub fn missing_field(field: &str, origin: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.to_string(),
            origin: origin.into(),
        }
    }

    /// Create an invalid value error for a one-based data row
    #[must_use]
    pub fn invalid_value(field: &str, row: usize, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            row,
            reason: reason.into(),
        }
    }

    /// Wrap any displayable drawing failure
    pub fn render<E: std::fmt::Display>(error: E) -> Self {
        Self::RenderError(error.to_string())
    }

    /// Name of the field this error is about, if any
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field, .. } | Self::InvalidValue { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Result type for dataset and chart operations
pub type Result<T> = std::result::Result<T, FertilityError>;
