use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

use ichimon_core::mastery::Mark;
use ichimon_core::model::QuestionItem;

use crate::error::SessionError;

//
// ─── OUTCOME ───────────────────────────────────────────────────────────────────
//

/// Result of finishing one play-through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Questions not marked unknown.
    pub known_count: usize,
    /// The unknown subset, in the order of the pool the session started from.
    pub wrong_pool: Vec<QuestionItem>,
}

/// Derive the outcome for a played pool and the question texts marked
/// unknown during it.
#[must_use]
pub fn complete_session(
    session_pool: &[QuestionItem],
    unknown_texts: &[String],
) -> SessionOutcome {
    let wrong_pool: Vec<QuestionItem> = session_pool
        .iter()
        .filter(|q| unknown_texts.iter().any(|t| *t == q.question))
        .cloned()
        .collect();

    SessionOutcome {
        known_count: session_pool.len() - unknown_texts.len(),
        wrong_pool,
    }
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One flashcard play-through over a shuffled pool.
///
/// The pre-shuffle base pool is kept alongside the play order: retries
/// reshuffle from that stable base instead of compounding shuffles, and the
/// wrong subset reported by [`outcome`](Self::outcome) preserves base order.
#[derive(Clone)]
pub struct StudySession {
    base: Vec<QuestionItem>,
    order: Vec<QuestionItem>,
    current: usize,
    unknown: Vec<String>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl StudySession {
    /// Start a session over `pool`, playing a freshly shuffled order.
    ///
    /// `started_at` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` for an empty pool.
    pub fn start<R: Rng + ?Sized>(
        pool: Vec<QuestionItem>,
        rng: &mut R,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if pool.is_empty() {
            return Err(SessionError::Empty);
        }

        let mut order = pool.clone();
        order.shuffle(rng);

        Ok(Self {
            base: pool,
            order,
            current: 0,
            unknown: Vec::new(),
            started_at,
            completed_at: None,
        })
    }

    /// The pool this session was started from, pre-shuffle.
    #[must_use]
    pub fn base_pool(&self) -> &[QuestionItem] {
        &self.base
    }

    /// The shuffled play order.
    #[must_use]
    pub fn play_order(&self) -> &[QuestionItem] {
        &self.order
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn answered(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.order.len().saturating_sub(self.current)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.total(),
            answered: self.answered(),
            remaining: self.remaining(),
            is_complete: self.is_complete(),
        }
    }

    /// The question currently facing the learner, if any remain.
    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionItem> {
        self.order.get(self.current)
    }

    /// Mark the current question and advance.
    ///
    /// `marked_at` should come from the services layer clock; it stamps
    /// `completed_at` when this was the final question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if every question is already marked.
    pub fn mark(&mut self, mark: Mark, marked_at: DateTime<Utc>) -> Result<(), SessionError> {
        let Some(question) = self.order.get(self.current) else {
            return Err(SessionError::Completed);
        };

        if mark == Mark::Unknown {
            self.unknown.push(question.question.clone());
        }

        self.current += 1;
        if self.current >= self.order.len() {
            self.completed_at = Some(marked_at);
        }
        Ok(())
    }

    /// Question texts marked unknown so far, in play order.
    #[must_use]
    pub fn unknown_texts(&self) -> &[String] {
        &self.unknown
    }

    /// Known count and the wrong subset, reflecting the marks so far.
    #[must_use]
    pub fn outcome(&self) -> SessionOutcome {
        complete_session(&self.base, &self.unknown)
    }
}

impl fmt::Debug for StudySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudySession")
            .field("total", &self.order.len())
            .field("current", &self.current)
            .field("unknown_len", &self.unknown.len())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
