//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from quiz-core
pub use quiz_core::{Level, TestResultSnapshot, TierAccuracy, UsageStats};

use quiz_core::Difficulty;

const MAX_POINTS_PER_QUESTION: u32 = Difficulty::Hard.points();

// === Database Entity Types ===

/// Test result stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTestResult {
    pub id: Uuid,
    pub user_id: String,
    pub points: i32,
    pub max_points: i32,
    pub easy_accuracy: f64,
    pub medium_accuracy: f64,
    pub hard_accuracy: f64,
    pub level: String,
    pub answered: i32,
    pub correct: i32,
    pub total: i32,
    pub completed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl DbTestResult {
    /// Create a row from a quiz-core snapshot that passed [`check_snapshot`]
    pub fn from_snapshot(user_id: &str, snapshot: &TestResultSnapshot) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            points: snapshot.points as i32,
            max_points: snapshot.max_points as i32,
            easy_accuracy: snapshot.accuracy.easy,
            medium_accuracy: snapshot.accuracy.medium,
            hard_accuracy: snapshot.accuracy.hard,
            level: snapshot.level.as_str().to_string(),
            answered: snapshot.answered as i32,
            correct: snapshot.correct as i32,
            total: snapshot.total as i32,
            completed_at: snapshot.completed_at,
            created_at: Utc::now(),
        }
    }

    /// Convert back to a quiz-core snapshot
    pub fn to_snapshot(&self) -> TestResultSnapshot {
        TestResultSnapshot {
            points: self.points.max(0) as u32,
            max_points: self.max_points.max(0) as u32,
            accuracy: TierAccuracy {
                easy: self.easy_accuracy,
                medium: self.medium_accuracy,
                hard: self.hard_accuracy,
            },
            level: Level::from_str(&self.level).unwrap_or(Level::Beginner),
            answered: self.answered.max(0) as u32,
            correct: self.correct.max(0) as u32,
            total: self.total.max(0) as u32,
            completed_at: self.completed_at,
        }
    }

    /// Convert to API response type
    pub fn to_api_result(&self) -> TestResultResponse {
        TestResultResponse {
            id: self.id,
            user_id: self.user_id.clone(),
            snapshot: self.to_snapshot(),
            created_at: self.created_at,
        }
    }
}

/// Like stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLike {
    pub user_id: String,
    pub word_id: String,
    pub created_at: DateTime<Utc>,
}

/// Profile stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProfile {
    pub user_id: String,
    pub display_name: String,
    pub updated_at: DateTime<Utc>,
}

/// Reject snapshots that no finished session could produce.
pub fn check_snapshot(snapshot: &TestResultSnapshot) -> std::result::Result<(), String> {
    if i32::try_from(snapshot.total).is_err() || i32::try_from(snapshot.max_points).is_err() {
        return Err("counts must fit in a 32-bit signed integer".to_string());
    }
    if u64::from(snapshot.max_points) > u64::from(snapshot.total) * u64::from(MAX_POINTS_PER_QUESTION) {
        return Err("max_points exceeds what the questions can award".to_string());
    }
    if snapshot.points > snapshot.max_points {
        return Err("points exceed max_points".to_string());
    }
    let TierAccuracy { easy, medium, hard } = snapshot.accuracy;
    if [easy, medium, hard].iter().any(|a| !(0.0..=1.0).contains(a)) {
        return Err("accuracy must be between 0 and 1".to_string());
    }
    if snapshot.correct > snapshot.answered || snapshot.answered > snapshot.total {
        return Err("expected correct <= answered <= total".to_string());
    }
    if snapshot.total == 0 {
        return Err("total must be greater than zero".to_string());
    }
    Ok(())
}

// === API Request/Response Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct TestResultResponse {
    pub id: Uuid,
    pub user_id: String,
    #[serde(flatten)]
    pub snapshot: TestResultSnapshot,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TestResultListResponse {
    pub results: Vec<TestResultResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikesResponse {
    pub word_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikeChangeResponse {
    pub word_id: String,
    pub liked: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub display_name: String,
    pub updated_at: DateTime<Utc>,
}

impl From<DbProfile> for ProfileResponse {
    fn from(profile: DbProfile) -> Self {
        Self {
            user_id: profile.user_id,
            display_name: profile.display_name,
            updated_at: profile.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: UsageStats,
    pub cached_until: Option<DateTime<Utc>>,
}
