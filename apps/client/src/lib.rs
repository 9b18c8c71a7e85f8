pub mod config;
pub mod controller;
pub mod driver;
pub mod error;
pub mod results;
pub mod source;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ClientConfig;
use crate::controller::QuizController;
use crate::results::ResultsClient;
use crate::source::QuestionSource;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env()?;
    tracing::info!(
        "Starting quiz: {} questions, {} ms reveal",
        config.quiz.test_count,
        config.quiz.reveal_ms
    );

    let source = QuestionSource::new(config.quiz.test_url.clone());
    let results = match (&config.backend_url, &config.user_id) {
        (Some(url), Some(user_id)) => Some((ResultsClient::new(url.clone()), user_id.clone())),
        _ => {
            tracing::info!("BACKEND_URL or USER_ID not set, results will not be stored");
            None
        }
    };

    let controller = QuizController::new(config.quiz);
    driver::run_session(&controller, &source, results).await
}
