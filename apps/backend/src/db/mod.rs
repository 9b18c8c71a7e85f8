//! PostgreSQL database operations

use sqlx::{postgres::PgPoolOptions, PgPool, Row};

use crate::error::{ApiError, Result};
use crate::models::*;
use quiz_core::{LikeCount, ResultSummary};

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Test Result Repository ===

    /// Store a finished test result
    pub async fn insert_test_result(&self, result: &DbTestResult) -> Result<DbTestResult> {
        let stored = sqlx::query_as::<_, DbTestResult>(
            r#"
            INSERT INTO test_results (
                id, user_id, points, max_points,
                easy_accuracy, medium_accuracy, hard_accuracy,
                level, answered, correct, total, completed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, user_id, points, max_points,
                      easy_accuracy, medium_accuracy, hard_accuracy,
                      level, answered, correct, total, completed_at, created_at
            "#,
        )
        .bind(result.id)
        .bind(&result.user_id)
        .bind(result.points)
        .bind(result.max_points)
        .bind(result.easy_accuracy)
        .bind(result.medium_accuracy)
        .bind(result.hard_accuracy)
        .bind(&result.level)
        .bind(result.answered)
        .bind(result.correct)
        .bind(result.total)
        .bind(result.completed_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    /// Get a user's test results, newest first
    pub async fn get_test_results(&self, user_id: &str) -> Result<Vec<DbTestResult>> {
        let results = sqlx::query_as::<_, DbTestResult>(
            r#"
            SELECT id, user_id, points, max_points,
                   easy_accuracy, medium_accuracy, hard_accuracy,
                   level, answered, correct, total, completed_at, created_at
            FROM test_results
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }

    /// Summaries of every stored result, for usage statistics
    pub async fn get_result_summaries(&self) -> Result<Vec<ResultSummary>> {
        let rows = sqlx::query("SELECT user_id, points, level FROM test_results")
            .fetch_all(&self.pool)
            .await?;

        let summaries = rows
            .iter()
            .filter_map(|row| {
                let level: String = row.get("level");
                let Some(level) = Level::from_str(&level) else {
                    tracing::warn!("Skipping test result with unknown level {:?}", level);
                    return None;
                };
                let points: i32 = row.get("points");
                Some(ResultSummary {
                    user_id: row.get("user_id"),
                    points: points.max(0) as u32,
                    level,
                })
            })
            .collect();

        Ok(summaries)
    }

    // === Like Repository ===

    /// Like a word. Liking twice is a no-op.
    pub async fn add_like(&self, user_id: &str, word_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO likes (user_id, word_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, word_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(word_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove a like. Returns false if the word was not liked.
    pub async fn remove_like(&self, user_id: &str, word_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND word_id = $2")
            .bind(user_id)
            .bind(word_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get the words a user liked, oldest first
    pub async fn get_likes(&self, user_id: &str) -> Result<Vec<DbLike>> {
        let likes = sqlx::query_as::<_, DbLike>(
            r#"
            SELECT user_id, word_id, created_at
            FROM likes
            WHERE user_id = $1
            ORDER BY created_at ASC, word_id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(likes)
    }

    /// Like counts per word across all users
    pub async fn get_like_counts(&self) -> Result<Vec<LikeCount>> {
        let rows = sqlx::query(
            r#"
            SELECT word_id, COUNT(*) AS count
            FROM likes
            GROUP BY word_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let counts = rows
            .iter()
            .map(|row| {
                let count: i64 = row.get("count");
                LikeCount {
                    word_id: row.get("word_id"),
                    count: count.max(0) as u64,
                }
            })
            .collect();

        Ok(counts)
    }

    // === Profile Repository ===

    /// Get a user's profile
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<DbProfile>> {
        let profile = sqlx::query_as::<_, DbProfile>(
            "SELECT user_id, display_name, updated_at FROM profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Create or replace a user's profile
    pub async fn upsert_profile(&self, user_id: &str, display_name: &str) -> Result<DbProfile> {
        let profile = sqlx::query_as::<_, DbProfile>(
            r#"
            INSERT INTO profiles (user_id, display_name, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id) DO UPDATE SET
                display_name = EXCLUDED.display_name,
                updated_at = NOW()
            RETURNING user_id, display_name, updated_at
            "#,
        )
        .bind(user_id)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }
}
