//! Aggregate usage statistics and a time-bounded cache for them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::types::Level;

const TOP_LIKED_LIMIT: usize = 5;

/// One stored test result, reduced to what aggregation needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSummary {
    pub user_id: String,
    pub points: u32,
    pub level: Level,
}

/// Number of likes a word has received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeCount {
    pub word_id: String,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LevelCounts {
    pub beginner: u64,
    pub intermediate: u64,
    pub expert: u64,
}

/// Usage statistics across all users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageStats {
    pub total_tests: u64,
    pub total_users: u64,
    pub average_points: f64,
    pub level_counts: LevelCounts,
    pub total_likes: u64,
    pub top_liked: Vec<LikeCount>,
}

/// Aggregate stored results and per-word like counts.
pub fn aggregate(results: &[ResultSummary], likes: &[LikeCount]) -> UsageStats {
    let mut level_counts = LevelCounts::default();
    let mut users = HashSet::new();
    let mut point_sum: u64 = 0;

    for result in results {
        users.insert(result.user_id.as_str());
        point_sum += result.points as u64;
        match result.level {
            Level::Beginner => level_counts.beginner += 1,
            Level::Intermediate => level_counts.intermediate += 1,
            Level::Expert => level_counts.expert += 1,
        }
    }

    let average_points = if results.is_empty() {
        0.0
    } else {
        point_sum as f64 / results.len() as f64
    };

    let mut top_liked: Vec<LikeCount> = likes.iter().filter(|l| l.count > 0).cloned().collect();
    top_liked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word_id.cmp(&b.word_id)));
    top_liked.truncate(TOP_LIKED_LIMIT);

    UsageStats {
        total_tests: results.len() as u64,
        total_users: users.len() as u64,
        average_points,
        level_counts,
        total_likes: likes.iter().map(|l| l.count).sum(),
        top_liked,
    }
}

/// Single-value cache that expires after a fixed time-to-live.
///
/// Callers pass the current time, so expiry is fully under their control.
#[derive(Debug, Clone)]
pub struct ExpiringCache<T> {
    data: Option<T>,
    expires_at: Option<DateTime<Utc>>,
    ttl: Duration,
}

impl<T: Clone> ExpiringCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            data: None,
            expires_at: None,
            ttl,
        }
    }

    /// Cached value if it has not expired at `now`.
    pub fn get(&self, now: DateTime<Utc>) -> Option<T> {
        match (&self.data, self.expires_at) {
            (Some(data), Some(expires_at)) if now < expires_at => Some(data.clone()),
            _ => None,
        }
    }

    pub fn store(&mut self, data: T, now: DateTime<Utc>) {
        self.data = Some(data);
        self.expires_at = Some(now + self.ttl);
    }

    pub fn invalidate(&mut self) {
        self.data = None;
        self.expires_at = None;
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}
