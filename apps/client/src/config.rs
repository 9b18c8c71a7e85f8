//! Client configuration from environment variables.

use quiz_core::{QuizSettings, MAX_REVEAL_MS};

use crate::error::SettingsError;

/// Runtime configuration for the quiz client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub quiz: QuizSettings,
    /// Base URL of the results backend; uploads are skipped when unset.
    pub backend_url: Option<String>,
    pub user_id: Option<String>,
}

impl ClientConfig {
    /// Read configuration from the process environment.
    ///
    /// Recognized variables:
    /// - TEST_COUNT: questions per session (default 15)
    /// - TEST_REVEAL_MS: reveal lock in milliseconds (default 3000)
    /// - TEST_URL: question source URL
    /// - BACKEND_URL: results backend base URL
    /// - USER_ID: opaque user identifier for uploads
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = QuizSettings::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let test_count = match non_empty("TEST_COUNT") {
            Some(value) => parse_number("TEST_COUNT", &value)? as usize,
            None => defaults.test_count,
        };
        let reveal_ms = match non_empty("TEST_REVEAL_MS") {
            Some(value) => {
                let reveal_ms = parse_number("TEST_REVEAL_MS", &value)?;
                if reveal_ms > MAX_REVEAL_MS {
                    return Err(SettingsError::OutOfRange {
                        key: "TEST_REVEAL_MS",
                        value: reveal_ms,
                        max: MAX_REVEAL_MS,
                    });
                }
                reveal_ms
            }
            None => defaults.reveal_ms,
        };

        Ok(Self {
            quiz: QuizSettings {
                test_count,
                reveal_ms,
                test_url: non_empty("TEST_URL"),
            },
            backend_url: non_empty("BACKEND_URL").map(|url| url.trim_end_matches('/').to_string()),
            user_id: non_empty("USER_ID"),
        })
    }
}

fn parse_number(key: &'static str, value: &str) -> Result<u64, SettingsError> {
    value.parse::<u64>().map_err(|_| SettingsError::InvalidNumber {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use pretty_assertions::assert_eq;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.quiz, QuizSettings::default());
        assert_eq!(config.backend_url, None);
        assert_eq!(config.user_id, None);
    }

    #[test]
    fn reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("TEST_COUNT", "9"),
            ("TEST_REVEAL_MS", "1500"),
            ("TEST_URL", "https://example.com/test.json"),
            ("BACKEND_URL", "http://localhost:3000/"),
            ("USER_ID", "user-1"),
        ]))
        .unwrap();
        assert_eq!(config.quiz.test_count, 9);
        assert_eq!(config.quiz.reveal_ms, 1500);
        assert_eq!(config.quiz.test_url.as_deref(), Some("https://example.com/test.json"));
        assert_eq!(config.backend_url.as_deref(), Some("http://localhost:3000"));
        assert_eq!(config.user_id.as_deref(), Some("user-1"));
    }

    #[test]
    fn indivisible_count_is_accepted_here_and_rejected_by_quiz() {
        let config = ClientConfig::from_lookup(lookup(&[("TEST_COUNT", "7")])).unwrap();
        assert!(config.quiz.per_tier().is_err());
    }

    #[test]
    fn rejects_non_numeric_count() {
        let result = ClientConfig::from_lookup(lookup(&[("TEST_COUNT", "zece")]));
        assert!(matches!(
            result,
            Err(SettingsError::InvalidNumber { key: "TEST_COUNT", .. })
        ));
    }

    #[test]
    fn rejects_reveal_longer_than_an_hour() {
        let result = ClientConfig::from_lookup(lookup(&[("TEST_REVEAL_MS", "10000000000000000")]));
        assert!(matches!(
            result,
            Err(SettingsError::OutOfRange { key: "TEST_REVEAL_MS", .. })
        ));

        let config = ClientConfig::from_lookup(lookup(&[("TEST_REVEAL_MS", "3600000")])).unwrap();
        assert_eq!(config.quiz.reveal_ms, MAX_REVEAL_MS);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[("TEST_URL", "  "), ("TEST_REVEAL_MS", "")])).unwrap();
        assert_eq!(config.quiz.test_url, None);
        assert_eq!(config.quiz.reveal_ms, 3000);
    }
}
