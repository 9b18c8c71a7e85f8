//! Core types for the vocabulary quiz.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Question difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All tiers in ascending order.
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Points awarded for a correct answer in this tier.
    pub const fn points(self) -> u32 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Parse from a label, ignoring case and surrounding whitespace.
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

/// A single quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_options: Vec<usize>,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Question {
    /// Whether the given option index is one of the correct ones.
    pub fn is_correct(&self, selected_index: usize) -> bool {
        self.correct_options.contains(&selected_index)
    }
}

/// Answer given for one question in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub selected_index: usize,
    pub is_correct: bool,
}

/// Proficiency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Beginner,
    Intermediate,
    Expert,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "expert" => Some(Self::Expert),
            _ => None,
        }
    }
}

/// Accuracy per difficulty tier, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TierAccuracy {
    pub easy: f64,
    pub medium: f64,
    pub hard: f64,
}

impl TierAccuracy {
    pub fn get(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Scoring and level for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub points: u32,
    pub max_points: u32,
    pub accuracy: TierAccuracy,
    pub level: Level,
}

/// Position within a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Zero-based index of the current question.
    pub position: usize,
    pub answered: usize,
    pub total: usize,
}

/// Scoring snapshot of a finished session, handed to persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResultSnapshot {
    pub points: u32,
    pub max_points: u32,
    pub accuracy: TierAccuracy,
    pub level: Level,
    pub answered: u32,
    pub correct: u32,
    pub total: u32,
    pub completed_at: DateTime<Utc>,
}

/// Longest accepted reveal lock: one hour.
pub const MAX_REVEAL_MS: u64 = 60 * 60 * 1000;

/// Quiz configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    /// Total questions per session.
    pub test_count: usize,
    /// Reveal lock duration after each answer.
    pub reveal_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_url: Option<String>,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            test_count: 15,
            reveal_ms: 3000,
            test_url: None,
        }
    }
}

impl QuizSettings {
    /// Questions drawn from each difficulty tier.
    pub fn per_tier(&self) -> std::result::Result<usize, ConfigError> {
        if self.test_count == 0 {
            return Err(ConfigError::ZeroCount);
        }
        if self.test_count % 3 != 0 {
            return Err(ConfigError::NotDivisibleByThree(self.test_count));
        }
        Ok(self.test_count / 3)
    }

    /// Reveal lock duration, capped at [`MAX_REVEAL_MS`].
    pub fn reveal(&self) -> chrono::Duration {
        let millis = i64::try_from(self.reveal_ms.min(MAX_REVEAL_MS)).unwrap_or(0);
        chrono::Duration::milliseconds(millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_tier_divides_count() {
        let settings = QuizSettings {
            test_count: 9,
            ..Default::default()
        };
        assert_eq!(settings.per_tier(), Ok(3));
    }

    #[test]
    fn per_tier_rejects_indivisible_count() {
        let settings = QuizSettings {
            test_count: 7,
            ..Default::default()
        };
        assert_eq!(settings.per_tier(), Err(ConfigError::NotDivisibleByThree(7)));
    }

    #[test]
    fn per_tier_rejects_zero() {
        let settings = QuizSettings {
            test_count: 0,
            ..Default::default()
        };
        assert_eq!(settings.per_tier(), Err(ConfigError::ZeroCount));
    }

    #[test]
    fn reveal_is_capped_instead_of_wrapping() {
        let settings = QuizSettings {
            reveal_ms: u64::MAX,
            ..Default::default()
        };
        assert_eq!(settings.reveal(), chrono::Duration::hours(1));

        let settings = QuizSettings {
            reveal_ms: 1500,
            ..Default::default()
        };
        assert_eq!(settings.reveal(), chrono::Duration::milliseconds(1500));
    }

    #[test]
    fn difficulty_labels() {
        assert_eq!(Difficulty::from_label(" Hard "), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_label("extreme"), None);
        assert_eq!(Difficulty::Medium.points(), 2);
    }

    #[test]
    fn level_round_trips_through_str() {
        for level in [Level::Beginner, Level::Intermediate, Level::Expert] {
            assert_eq!(Level::from_str(level.as_str()), Some(level));
        }
    }
}
