//! Cached usage statistics.

use chrono::{DateTime, Duration, Utc};
use quiz_core::{aggregate, ExpiringCache, UsageStats};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::db::Database;
use crate::error::Result;

pub const DEFAULT_TTL_SECS: i64 = 300;

#[derive(Debug, Error)]
pub enum StatsConfigError {
    #[error("STATS_TTL_SECS must be a non-negative integer, got {0:?}")]
    InvalidTtl(String),
}

/// Computes usage statistics and keeps them for a fixed time-to-live.
///
/// Writes do not invalidate the cache; readers may see numbers up to one
/// TTL old.
pub struct StatsService {
    cache: Mutex<ExpiringCache<UsageStats>>,
}

impl StatsService {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Mutex::new(ExpiringCache::new(ttl)),
        }
    }

    /// Create the service from `STATS_TTL_SECS`, falling back to five minutes.
    pub fn from_env() -> std::result::Result<Self, StatsConfigError> {
        let ttl = parse_ttl(std::env::var("STATS_TTL_SECS").ok().as_deref())?;
        Ok(Self::new(ttl))
    }

    /// Current statistics and the time they stop being served from cache.
    pub async fn get(&self, db: &Database) -> Result<(UsageStats, Option<DateTime<Utc>>)> {
        let now = Utc::now();
        let mut cache = self.cache.lock().await;

        if let Some(stats) = cache.get(now) {
            return Ok((stats, cache.expires_at()));
        }

        tracing::debug!("Stats cache expired, recomputing");
        let summaries = db.get_result_summaries().await?;
        let like_counts = db.get_like_counts().await?;
        let stats = aggregate(&summaries, &like_counts);

        cache.store(stats.clone(), now);
        Ok((stats, cache.expires_at()))
    }
}

fn parse_ttl(value: Option<&str>) -> std::result::Result<Duration, StatsConfigError> {
    match value.map(str::trim) {
        None | Some("") => Ok(Duration::seconds(DEFAULT_TTL_SECS)),
        Some(raw) => raw
            .parse::<u32>()
            .map(|secs| Duration::seconds(secs as i64))
            .map_err(|_| StatsConfigError::InvalidTtl(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_defaults_to_five_minutes() {
        assert_eq!(parse_ttl(None).unwrap(), Duration::seconds(300));
        assert_eq!(parse_ttl(Some("  ")).unwrap(), Duration::seconds(300));
    }

    #[test]
    fn ttl_parses_seconds() {
        assert_eq!(parse_ttl(Some("60")).unwrap(), Duration::seconds(60));
        assert_eq!(parse_ttl(Some("0")).unwrap(), Duration::zero());
    }

    #[test]
    fn ttl_rejects_garbage() {
        assert!(matches!(
            parse_ttl(Some("-5")),
            Err(StatsConfigError::InvalidTtl(_))
        ));
        assert!(parse_ttl(Some("five")).is_err());
    }
}
