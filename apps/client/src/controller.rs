//! Async quiz controller with a cancellable reveal timer.

use chrono::{DateTime, Utc};
use quiz_core::{
    Advance, AnswerOutcome, Classification, Progress, Question, Quiz, QuizSettings, QuizState,
    TestResultSnapshot,
};
use serde::Serialize;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;

use crate::source::QuestionSource;

/// Load status for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuizStatus {
    Loading,
    Ready,
    Finished,
    Invalid { message: String },
    Failed { message: String },
}

/// Read-only view of the quiz for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct QuizView {
    pub status: QuizStatus,
    pub current_question: Option<Question>,
    pub progress: Option<Progress>,
    pub remaining_reveal_seconds: Option<u64>,
    pub can_advance: bool,
    pub is_finished: bool,
    pub classification: Option<Classification>,
}

struct ControllerInner {
    quiz: Mutex<Quiz>,
    timer: Mutex<Option<JoinHandle<()>>>,
    reveal: Duration,
    /// Signalled when the reveal timer moves the quiz on its own.
    advanced: Notify,
}

impl Drop for ControllerInner {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.get_mut().take() {
            handle.abort();
        }
    }
}

/// Drives a [`Quiz`] from user events and the reveal timer.
///
/// Clone-able; all clones share the same quiz. At most one reveal timer is
/// pending at a time and it is cancelled by `on_next`, `on_reset`, `load`,
/// `shutdown`, or dropping the last clone.
#[derive(Clone)]
pub struct QuizController {
    inner: Arc<ControllerInner>,
}

impl QuizController {
    pub fn new(settings: QuizSettings) -> Self {
        let reveal = settings.reveal().to_std().unwrap_or_default();
        Self {
            inner: Arc::new(ControllerInner {
                quiz: Mutex::new(Quiz::new(settings)),
                timer: Mutex::new(None),
                reveal,
                advanced: Notify::new(),
            }),
        }
    }

    /// Load the pool from `source` and start a session.
    ///
    /// Failures leave the quiz in the failed state; call again to retry.
    pub async fn load(&self, source: &QuestionSource) -> QuizView {
        self.cancel_timer().await;
        match source.load().await {
            Ok(pool) => self.load_pool(pool).await,
            Err(e) => {
                tracing::error!("Failed to load questions: {}", e);
                self.inner.quiz.lock().await.fail(e.to_string());
                self.view().await
            }
        }
    }

    /// Start a session from an already validated pool.
    pub async fn load_pool(&self, pool: Vec<Question>) -> QuizView {
        self.cancel_timer().await;
        {
            let mut quiz = self.inner.quiz.lock().await;
            if let QuizState::Invalid(e) = quiz.load(pool) {
                tracing::warn!("Cannot start test: {}", e);
            }
        }
        self.view().await
    }

    /// Answer the current question and start the reveal timer.
    pub async fn on_answer(&self, selected_index: usize) -> Option<AnswerOutcome> {
        let (outcome, pending) = {
            let mut quiz = self.inner.quiz.lock().await;
            let outcome = quiz.on_answer(selected_index, Utc::now());
            let pending = match outcome {
                Some(AnswerOutcome::Accepted { .. }) => quiz
                    .reveal_deadline()
                    .map(|deadline| (quiz.generation(), deadline)),
                _ => None,
            };
            (outcome, pending)
        };

        if let Some((generation, deadline)) = pending {
            self.schedule_reveal(generation, deadline).await;
        } else if let Some(AnswerOutcome::Ignored(reason)) = outcome {
            tracing::debug!("Answer ignored: {:?}", reason);
        }
        outcome
    }

    /// Move on explicitly, cancelling any pending reveal.
    pub async fn on_next(&self) -> Option<Advance> {
        self.cancel_timer().await;
        self.inner.quiz.lock().await.on_next()
    }

    /// Discard the session and draw a new sample.
    pub async fn on_reset(&self) -> QuizView {
        self.cancel_timer().await;
        self.inner.quiz.lock().await.on_reset();
        self.view().await
    }

    /// Cancel the pending timer, e.g. when the quiz view goes away.
    pub async fn shutdown(&self) {
        self.cancel_timer().await;
    }

    pub async fn snapshot(&self) -> Option<TestResultSnapshot> {
        self.inner.quiz.lock().await.snapshot(Utc::now())
    }

    /// Wait until the reveal timer advances the quiz.
    pub async fn timer_advanced(&self) {
        self.inner.advanced.notified().await;
    }

    pub async fn view(&self) -> QuizView {
        let quiz = self.inner.quiz.lock().await;
        build_view(&quiz, Utc::now())
    }

    async fn schedule_reveal(&self, generation: u64, deadline: DateTime<Utc>) {
        let mut timer = self.inner.timer.lock().await;
        if let Some(handle) = timer.take() {
            handle.abort();
        }

        let weak: Weak<ControllerInner> = Arc::downgrade(&self.inner);
        let delay = self.inner.reveal;
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let mut quiz = inner.quiz.lock().await;
            if quiz.generation() != generation {
                tracing::debug!("Dropping reveal timeout for replaced session");
                return;
            }
            // A lock taken after this timer was scheduled has a later deadline.
            let advance = quiz.on_tick(deadline);
            drop(quiz);
            if let Some(advance) = advance {
                tracing::debug!("Reveal window elapsed: {:?}", advance);
                inner.advanced.notify_one();
            }
        }));
    }

    async fn cancel_timer(&self) {
        if let Some(handle) = self.inner.timer.lock().await.take() {
            handle.abort();
        }
    }

    #[cfg(test)]
    async fn has_pending_timer(&self) -> bool {
        self.inner
            .timer
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

fn build_view(quiz: &Quiz, now: DateTime<Utc>) -> QuizView {
    let status = match quiz.state() {
        QuizState::Loading => QuizStatus::Loading,
        QuizState::Ready(session) if session.is_finished() => QuizStatus::Finished,
        QuizState::Ready(_) => QuizStatus::Ready,
        QuizState::Invalid(e) => QuizStatus::Invalid {
            message: e.to_string(),
        },
        QuizState::Failed(message) => QuizStatus::Failed {
            message: message.clone(),
        },
    };

    QuizView {
        status,
        current_question: quiz.current_question().cloned(),
        progress: quiz.progress(),
        remaining_reveal_seconds: quiz.remaining_reveal_seconds(now),
        can_advance: quiz.can_advance(),
        is_finished: quiz.is_finished(),
        classification: quiz.classification(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::{Difficulty, IgnoreReason};

    fn question(id: &str, difficulty: Difficulty) -> Question {
        Question {
            id: id.to_string(),
            question: format!("Ce înseamnă {}?", id),
            options: vec!["da".to_string(), "nu".to_string()],
            correct_options: vec![0],
            difficulty,
            image: None,
        }
    }

    fn pool() -> Vec<Question> {
        Difficulty::ALL
            .iter()
            .flat_map(|&d| (0..2).map(move |i| question(&format!("{}-{}", d.as_str(), i), d)))
            .collect()
    }

    fn controller(test_count: usize) -> QuizController {
        QuizController::new(QuizSettings {
            test_count,
            reveal_ms: 3000,
            test_url: None,
        })
    }

    #[tokio::test(start_paused = true)]
    async fn reveal_timer_advances_after_window() {
        let ctl = controller(3);
        ctl.load_pool(pool()).await;

        let outcome = ctl.on_answer(0).await;
        assert_eq!(outcome, Some(AnswerOutcome::Accepted { is_correct: true }));
        let view = ctl.view().await;
        assert!(!view.can_advance);
        assert!(ctl.has_pending_timer().await);

        tokio::time::sleep(Duration::from_millis(2900)).await;
        assert_eq!(ctl.view().await.progress.unwrap().position, 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        let view = ctl.view().await;
        assert_eq!(view.progress.unwrap().position, 1);
        assert!(view.can_advance);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_advance_is_signalled() {
        let ctl = controller(3);
        ctl.load_pool(pool()).await;
        ctl.on_answer(0).await;

        tokio::time::timeout(Duration::from_secs(5), ctl.timer_advanced())
            .await
            .expect("reveal timer should signal the advance");
        assert_eq!(ctl.view().await.progress.unwrap().position, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn double_tap_is_ignored() {
        let ctl = controller(3);
        ctl.load_pool(pool()).await;
        ctl.on_answer(0).await;
        assert_eq!(
            ctl.on_answer(1).await,
            Some(AnswerOutcome::Ignored(IgnoreReason::RevealLocked))
        );
        assert_eq!(ctl.view().await.progress.unwrap().answered, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn explicit_next_cancels_timer() {
        let ctl = controller(3);
        ctl.load_pool(pool()).await;
        ctl.on_answer(0).await;
        assert_eq!(ctl.on_next().await, Some(Advance::Moved { position: 1 }));
        assert!(!ctl.has_pending_timer().await);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(ctl.view().await.progress.unwrap().position, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_pending_reveal() {
        let ctl = controller(3);
        ctl.load_pool(pool()).await;
        ctl.on_answer(0).await;
        assert!(ctl.has_pending_timer().await);

        ctl.shutdown().await;
        assert!(!ctl.has_pending_timer().await);

        tokio::time::sleep(Duration::from_secs(10)).await;
        let view = ctl.view().await;
        assert_eq!(view.progress.unwrap().position, 0);
        assert!(!view.can_advance);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_last_clone_releases_state() {
        let ctl = controller(3);
        ctl.load_pool(pool()).await;
        ctl.on_answer(0).await;

        let inner = Arc::downgrade(&ctl.inner);
        let clone = ctl.clone();
        drop(ctl);
        assert!(inner.upgrade().is_some());
        assert!(clone.has_pending_timer().await);

        drop(clone);
        assert!(inner.upgrade().is_none());

        // The aborted timer held only a weak reference.
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(inner.upgrade().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn reset_cancels_timer_and_starts_fresh() {
        let ctl = controller(3);
        ctl.load_pool(pool()).await;
        ctl.on_answer(0).await;

        let view = ctl.on_reset().await;
        assert_eq!(view.status, QuizStatus::Ready);
        assert!(!ctl.has_pending_timer().await);

        tokio::time::sleep(Duration::from_secs(10)).await;
        let progress = ctl.view().await.progress.unwrap();
        assert_eq!(progress.position, 0);
        assert_eq!(progress.answered, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn full_run_finishes_and_snapshots() {
        let ctl = controller(3);
        ctl.load_pool(pool()).await;
        for _ in 0..3 {
            ctl.on_answer(0).await;
            tokio::time::sleep(Duration::from_millis(3100)).await;
        }

        let view = ctl.view().await;
        assert_eq!(view.status, QuizStatus::Finished);
        assert!(view.current_question.is_none());
        assert_eq!(view.classification.unwrap().points, 6);

        let snapshot = ctl.snapshot().await.unwrap();
        assert_eq!(snapshot.correct, 3);
    }

    #[tokio::test]
    async fn indivisible_count_reports_invalid() {
        let ctl = controller(7);
        let view = ctl.load_pool(pool()).await;
        assert!(matches!(view.status, QuizStatus::Invalid { .. }));
        assert_eq!(ctl.on_answer(0).await, None);
    }

    #[tokio::test]
    async fn failed_source_reports_failure() {
        let ctl = controller(3);
        let source = QuestionSource::new(None).with_fallback("not json");
        let view = ctl.load(&source).await;
        assert!(matches!(view.status, QuizStatus::Failed { .. }));
    }

    #[tokio::test]
    async fn bundled_fallback_starts_default_test() {
        let ctl = QuizController::new(QuizSettings::default());
        let view = ctl.load(&QuestionSource::new(None)).await;
        assert_eq!(view.status, QuizStatus::Ready);
        assert_eq!(view.progress.unwrap().total, 15);
    }
}
