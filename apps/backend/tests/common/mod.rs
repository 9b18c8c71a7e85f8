//! Common test utilities for integration tests.
//!
//! # Requirements
//! Integration tests require a PostgreSQL database (set DATABASE_URL env var).

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use chrono::Duration;
use uuid::Uuid;

use vocab_quiz_backend::db::Database;
use vocab_quiz_backend::services::stats::StatsService;
use vocab_quiz_backend::{router, AppState};

/// Test context containing database connection and router.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a new test context with the default stats TTL.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        Self::with_stats_ttl(Duration::seconds(300)).await
    }

    pub async fn with_stats_ttl(ttl: Duration) -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        let db = Arc::new(db);
        let state = AppState {
            db: db.clone(),
            stats: Arc::new(StatsService::new(ttl)),
        };

        Self {
            db,
            app: router(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// A user id no other test run shares.
    pub fn unique_user() -> String {
        format!("test-{}", Uuid::new_v4())
    }

    /// Remove everything stored for a user.
    pub async fn cleanup_user(&self, user_id: &str) {
        for table in ["test_results", "likes", "profiles"] {
            let _ = sqlx::query(&format!("DELETE FROM {} WHERE user_id = $1", table))
                .bind(user_id)
                .execute(self.db.pool())
                .await;
        }
    }
}
