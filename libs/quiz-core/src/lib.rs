//! Core quiz engine shared by the client and backend applications.
//!
//! Provides:
//! - Validation of untrusted question payloads
//! - Stratified sampling across difficulty tiers
//! - Session state machine with a timed reveal lock
//! - Difficulty-weighted scoring and level classification
//! - Usage statistics aggregation with an expiring cache

pub mod error;
pub mod quiz;
pub mod sampler;
pub mod scoring;
pub mod session;
pub mod stats;
pub mod types;
pub mod validator;

pub use error::{ConfigError, Result, SessionError, ValidationError};
pub use quiz::{Quiz, QuizState};
pub use sampler::{sample, sample_with_rng};
pub use scoring::{classify, evaluate};
pub use session::{Advance, AnswerOutcome, IgnoreReason, Session, SessionPhase};
pub use stats::{aggregate, ExpiringCache, LikeCount, ResultSummary, UsageStats};
pub use types::{
    AnswerRecord, Classification, Difficulty, Level, Progress, Question, QuizSettings,
    TestResultSnapshot, TierAccuracy, MAX_REVEAL_MS,
};
pub use validator::validate;
