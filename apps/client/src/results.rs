//! Upload of finished test results to the backend.

use chrono::{DateTime, Utc};
use quiz_core::TestResultSnapshot;
use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ResultsError;

/// Result row as stored by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredResult {
    pub id: Uuid,
    pub user_id: String,
    #[serde(flatten)]
    pub snapshot: TestResultSnapshot,
    pub created_at: DateTime<Utc>,
}

/// HTTP client for the results backend.
#[derive(Debug, Clone)]
pub struct ResultsClient {
    client: Client,
    backend_url: String,
}

impl ResultsClient {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            backend_url: backend_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn results_url(&self, user_id: &str) -> String {
        format!("{}/api/users/{}/test-results", self.backend_url, user_id)
    }

    /// Store a finished session's snapshot for `user_id`.
    pub async fn submit(
        &self,
        user_id: &str,
        snapshot: &TestResultSnapshot,
    ) -> Result<StoredResult, ResultsError> {
        let resp = self
            .client
            .post(self.results_url(user_id))
            .json(snapshot)
            .send()
            .await
            .map_err(|e| ResultsError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(ResultsError::Backend { status, message });
        }

        let stored: StoredResult = resp
            .json()
            .await
            .map_err(|e| ResultsError::Parse(e.to_string()))?;

        tracing::info!("Stored test result {} for {}", stored.id, user_id);
        Ok(stored)
    }
}
