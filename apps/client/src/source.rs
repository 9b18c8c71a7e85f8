//! Question source: remote JSON with a bundled fallback dataset.

use quiz_core::{validate, Question};
use reqwest::Client;
use serde_json::Value;

use crate::error::{LoadError, SourceError};

/// Question set shipped with the client.
pub const BUNDLED_QUESTIONS: &str = include_str!("../assets/questions.json");

/// Fetches and validates the question pool.
#[derive(Debug, Clone)]
pub struct QuestionSource {
    client: Client,
    url: Option<String>,
    fallback: String,
}

impl QuestionSource {
    /// Source reading from `url`, falling back to the bundled questions.
    pub fn new(url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            url,
            fallback: BUNDLED_QUESTIONS.to_string(),
        }
    }

    /// Replace the fallback dataset.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Fetch the raw payload from the configured URL.
    pub async fn fetch(&self) -> Result<Value, SourceError> {
        let url = self.url.as_deref().ok_or(SourceError::NotConfigured)?;

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status().as_u16()));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| SourceError::Json(e.to_string()))
    }

    /// Load the pool, trying the remote source once and then the fallback.
    pub async fn load(&self) -> Result<Vec<Question>, LoadError> {
        let primary = match self.fetch().await {
            Ok(raw) => validate(&raw).map_err(SourceError::from),
            Err(e) => Err(e),
        };

        match primary {
            Ok(questions) => {
                tracing::info!("Loaded {} questions from {:?}", questions.len(), self.url);
                Ok(questions)
            }
            Err(primary) => {
                tracing::warn!("Question source failed, using bundled set: {}", primary);
                let questions = parse_questions(&self.fallback)
                    .map_err(|fallback| LoadError { primary, fallback })?;
                tracing::info!("Loaded {} bundled questions", questions.len());
                Ok(questions)
            }
        }
    }
}

/// Parse and validate JSON question text.
pub fn parse_questions(text: &str) -> Result<Vec<Question>, SourceError> {
    let raw: Value = serde_json::from_str(text).map_err(|e| SourceError::Json(e.to_string()))?;
    Ok(validate(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::sampler::tier_counts;
    use quiz_core::QuizSettings;

    #[test]
    fn bundled_questions_cover_default_test() {
        let questions = parse_questions(BUNDLED_QUESTIONS).unwrap();
        let per_tier = QuizSettings::default().per_tier().unwrap();
        let (easy, medium, hard) = tier_counts(&questions);
        assert!(easy >= per_tier && medium >= per_tier && hard >= per_tier);
    }

    #[test]
    fn parse_questions_reports_bad_json() {
        assert!(matches!(parse_questions("{ not json"), Err(SourceError::Json(_))));
    }

    #[test]
    fn parse_questions_reports_bad_shape() {
        assert!(matches!(
            parse_questions(r#"{"items": []}"#),
            Err(SourceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn missing_url_falls_back_to_bundled_set() {
        let source = QuestionSource::new(None);
        let questions = source.load().await.unwrap();
        assert_eq!(questions.len(), 18);
    }

    #[tokio::test]
    async fn failing_fallback_reports_both_errors() {
        let source = QuestionSource::new(None).with_fallback("[]x");
        let error = source.load().await.unwrap_err();
        assert!(matches!(error.primary, SourceError::NotConfigured));
        assert!(matches!(error.fallback, SourceError::Json(_)));
        assert!(error.to_string().starts_with("no question URL configured; fallback:"));
    }
}
