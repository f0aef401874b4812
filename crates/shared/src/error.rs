//! Application-wide error types.
//!
//! These are the hard failures of the ambient layer. Recoverable problems in
//! the input data are reported as issues by the core crate instead.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or deserialized.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Configuration or input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A table lacks a column the reader cannot work without.
    #[error("Table '{table}' has no column '{column}'")]
    MissingColumn {
        /// Table name.
        table: String,
        /// Expected column header.
        column: String,
    },

    /// Serialization of an output object failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Returns a stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::MissingColumn { .. } => "MISSING_COLUMN",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}
