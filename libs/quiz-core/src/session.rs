//! Quiz session state machine.
//!
//! A session walks a fixed sample of questions. After each accepted answer it
//! holds a reveal lock until either the deadline passes ([`Session::expire`])
//! or the next question is requested explicitly ([`Session::next`]).

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::error::SessionError;
use crate::scoring::evaluate;
use crate::types::{AnswerRecord, Classification, Progress, Question, TestResultSnapshot};

/// Phase of a running session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionPhase {
    /// Waiting for an answer to the current question.
    Idle,
    /// Current question answered; showing feedback until `deadline`.
    AnsweredWaiting {
        question_id: String,
        deadline: DateTime<Utc>,
    },
    Finished,
}

/// Why an answer was not recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    AlreadyAnswered,
    NotCurrentQuestion,
    RevealLocked,
    Finished,
    OptionOutOfRange,
}

/// Result of submitting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Accepted { is_correct: bool },
    Ignored(IgnoreReason),
}

/// Result of moving past the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved { position: usize },
    Finished,
    /// Session was already finished.
    Unchanged,
}

/// State of one quiz attempt.
#[derive(Debug, Clone)]
pub struct Session {
    questions: Vec<Question>,
    answers: HashMap<String, AnswerRecord>,
    position: usize,
    phase: SessionPhase,
    reveal: Duration,
}

impl Session {
    /// Start a session over a sampled set of questions.
    pub fn new(questions: Vec<Question>, reveal: Duration) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptySample);
        }
        Ok(Self {
            questions,
            answers: HashMap::new(),
            position: 0,
            phase: SessionPhase::Idle,
            reveal,
        })
    }

    /// Record an answer for the question at the current position.
    pub fn answer(&mut self, question_id: &str, selected_index: usize, now: DateTime<Utc>) -> AnswerOutcome {
        match self.phase {
            SessionPhase::Finished => return AnswerOutcome::Ignored(IgnoreReason::Finished),
            SessionPhase::AnsweredWaiting { .. } => {
                return AnswerOutcome::Ignored(IgnoreReason::RevealLocked)
            }
            SessionPhase::Idle => {}
        }

        if self.answers.contains_key(question_id) {
            return AnswerOutcome::Ignored(IgnoreReason::AlreadyAnswered);
        }

        let current = &self.questions[self.position];
        if current.id != question_id {
            return AnswerOutcome::Ignored(IgnoreReason::NotCurrentQuestion);
        }
        if selected_index >= current.options.len() {
            return AnswerOutcome::Ignored(IgnoreReason::OptionOutOfRange);
        }

        let is_correct = current.is_correct(selected_index);
        self.answers.insert(
            current.id.clone(),
            AnswerRecord {
                question_id: current.id.clone(),
                selected_index,
                is_correct,
            },
        );
        self.phase = SessionPhase::AnsweredWaiting {
            question_id: current.id.clone(),
            deadline: now
                .checked_add_signed(self.reveal)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };

        AnswerOutcome::Accepted { is_correct }
    }

    /// Move to the next question, finishing after the last one.
    ///
    /// Clears any reveal lock. Unanswered questions are skipped.
    pub fn next(&mut self) -> Advance {
        if self.phase == SessionPhase::Finished {
            return Advance::Unchanged;
        }

        if self.position + 1 >= self.questions.len() {
            self.phase = SessionPhase::Finished;
            Advance::Finished
        } else {
            self.position += 1;
            self.phase = SessionPhase::Idle;
            Advance::Moved {
                position: self.position,
            }
        }
    }

    /// Advance if the reveal deadline has passed. Returns `None` when nothing changed.
    pub fn expire(&mut self, now: DateTime<Utc>) -> Option<Advance> {
        let deadline = self.reveal_deadline()?;
        if now >= deadline {
            Some(self.next())
        } else {
            None
        }
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &HashMap<String, AnswerRecord> {
        &self.answers
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&AnswerRecord> {
        self.answers.get(question_id)
    }

    /// The question at the cursor, or `None` once finished.
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            SessionPhase::Finished => None,
            _ => self.questions.get(self.position),
        }
    }

    pub fn progress(&self) -> Progress {
        Progress {
            position: self.position,
            answered: self.answers.len(),
            total: self.questions.len(),
        }
    }

    /// Deadline of the active reveal lock.
    pub fn reveal_deadline(&self) -> Option<DateTime<Utc>> {
        match self.phase {
            SessionPhase::AnsweredWaiting { deadline, .. } => Some(deadline),
            _ => None,
        }
    }

    /// Whole seconds left in the reveal lock, rounded up.
    pub fn remaining_reveal_seconds(&self, now: DateTime<Utc>) -> Option<u64> {
        self.reveal_deadline().map(|deadline| {
            let millis = (deadline - now).num_milliseconds().max(0) as u64;
            millis.div_ceil(1000)
        })
    }

    pub fn is_reveal_locked(&self) -> bool {
        matches!(self.phase, SessionPhase::AnsweredWaiting { .. })
    }

    /// Whether user-driven navigation is allowed.
    pub fn can_advance(&self) -> bool {
        self.phase == SessionPhase::Idle
    }

    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    pub fn classification(&self) -> Classification {
        evaluate(&self.questions, &self.answers)
    }

    /// Scoring snapshot for persistence; only available once finished.
    pub fn snapshot(&self, completed_at: DateTime<Utc>) -> Option<TestResultSnapshot> {
        if !self.is_finished() {
            return None;
        }
        let classification = self.classification();
        let correct = self.answers.values().filter(|a| a.is_correct).count();
        Some(TestResultSnapshot {
            points: classification.points,
            max_points: classification.max_points,
            accuracy: classification.accuracy,
            level: classification.level,
            answered: self.answers.len() as u32,
            correct: correct as u32,
            total: self.questions.len() as u32,
            completed_at,
        })
    }
}
