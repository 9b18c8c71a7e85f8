//! Quiz controller: load states plus the presentation entry points.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::error::ConfigError;
use crate::sampler::sample_with_rng;
use crate::session::{AnswerOutcome, Advance, Session};
use crate::types::{Classification, Progress, Question, QuizSettings, TestResultSnapshot};

/// Load state of the quiz screen.
#[derive(Debug, Clone)]
pub enum QuizState {
    /// No question pool yet.
    Loading,
    Ready(Session),
    /// Pool or settings cannot produce a full test.
    Invalid(ConfigError),
    /// Question source failed; needs a manual reload.
    Failed(String),
}

/// Owns the question pool and the current session.
#[derive(Debug, Clone)]
pub struct Quiz {
    settings: QuizSettings,
    pool: Vec<Question>,
    state: QuizState,
    generation: u64,
}

impl Quiz {
    pub fn new(settings: QuizSettings) -> Self {
        Self {
            settings,
            pool: Vec::new(),
            state: QuizState::Loading,
            generation: 0,
        }
    }

    /// Install a validated pool and start a session from it.
    pub fn load(&mut self, pool: Vec<Question>) -> &QuizState {
        self.load_with_rng(pool, &mut rand::thread_rng())
    }

    pub fn load_with_rng<R: Rng + ?Sized>(&mut self, pool: Vec<Question>, rng: &mut R) -> &QuizState {
        self.pool = pool;
        self.start(rng);
        &self.state
    }

    /// Mark the load as failed.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.pool.clear();
        self.generation += 1;
        self.state = QuizState::Failed(message.into());
    }

    /// Answer the current question. `None` when no session is running.
    pub fn on_answer(&mut self, selected_index: usize, now: DateTime<Utc>) -> Option<AnswerOutcome> {
        let session = self.session_mut()?;
        let question_id = session.current_question()?.id.clone();
        Some(session.answer(&question_id, selected_index, now))
    }

    pub fn on_next(&mut self) -> Option<Advance> {
        self.session_mut().map(Session::next)
    }

    /// Reveal-lock timeout check.
    pub fn on_tick(&mut self, now: DateTime<Utc>) -> Option<Advance> {
        self.session_mut()?.expire(now)
    }

    /// Discard the session and draw a fresh one from the same pool.
    pub fn on_reset(&mut self) -> &QuizState {
        self.reset_with_rng(&mut rand::thread_rng())
    }

    pub fn reset_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &QuizState {
        if matches!(self.state, QuizState::Ready(_) | QuizState::Invalid(_)) {
            self.start(rng);
        }
        &self.state
    }

    fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.generation += 1;
        self.state = match self.settings.per_tier() {
            Err(e) => QuizState::Invalid(e),
            Ok(per_tier) => {
                let sampled = sample_with_rng(&self.pool, per_tier, rng);
                match Session::new(sampled, self.settings.reveal()) {
                    Ok(session) => QuizState::Ready(session),
                    Err(_) => QuizState::Invalid(ConfigError::InsufficientPool { per_tier }),
                }
            }
        };
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    pub fn pool(&self) -> &[Question] {
        &self.pool
    }

    /// Incremented whenever the session is replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            QuizState::Ready(session) => Some(session),
            _ => None,
        }
    }

    fn session_mut(&mut self) -> Option<&mut Session> {
        match &mut self.state {
            QuizState::Ready(session) => Some(session),
            _ => None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.session()?.current_question()
    }

    pub fn progress(&self) -> Option<Progress> {
        self.session().map(Session::progress)
    }

    pub fn remaining_reveal_seconds(&self, now: DateTime<Utc>) -> Option<u64> {
        self.session()?.remaining_reveal_seconds(now)
    }

    pub fn reveal_deadline(&self) -> Option<DateTime<Utc>> {
        self.session()?.reveal_deadline()
    }

    pub fn can_advance(&self) -> bool {
        self.session().is_some_and(Session::can_advance)
    }

    pub fn is_finished(&self) -> bool {
        self.session().is_some_and(Session::is_finished)
    }

    pub fn classification(&self) -> Option<Classification> {
        self.session().map(Session::classification)
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> Option<TestResultSnapshot> {
        self.session()?.snapshot(now)
    }
}
