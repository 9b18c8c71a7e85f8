//! Error types for quiz-core.

use thiserror::Error;

/// Result type alias using ValidationError.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors that can occur while validating a question payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("payload must be an array of questions or an object with a `questions` array")]
    Shape,

    #[error("invalid question {id}: {reason}")]
    Entry { id: String, reason: String },
}

impl ValidationError {
    pub(crate) fn entry(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Entry {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Invalid quiz configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("test count must be greater than zero")]
    ZeroCount,

    #[error("test count {0} is not divisible by 3")]
    NotDivisibleByThree(usize),

    #[error("not enough questions in every difficulty tier for {per_tier} per tier")]
    InsufficientPool { per_tier: usize },
}

/// Errors raised when building a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot start a session without questions")]
    EmptySample,
}
