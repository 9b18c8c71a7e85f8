//! Client error types.

use quiz_core::ValidationError;
use thiserror::Error;

/// Invalid client configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{key} must be a non-negative integer, got `{value}`")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must be at most {max}, got {value}")]
    OutOfRange {
        key: &'static str,
        value: u64,
        max: u64,
    },
}

/// Failure of a single question source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no question URL configured")]
    NotConfigured,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Source returned HTTP {0}")]
    Status(u16),

    #[error("Invalid JSON: {0}")]
    Json(String),

    #[error("Invalid questions: {0}")]
    Validation(#[from] ValidationError),
}

/// Both the remote source and the bundled fallback failed.
#[derive(Debug, Error)]
#[error("{primary}; fallback: {fallback}")]
pub struct LoadError {
    pub primary: SourceError,
    pub fallback: SourceError,
}

/// Errors while uploading finished results.
#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: {status} - {message}")]
    Backend { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Session is not finished")]
    NotFinished,
}
