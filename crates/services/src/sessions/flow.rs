use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;

use ichimon_core::mastery::Mark;
use ichimon_core::model::{HistoryStore, QuestionItem, QuizBank};

use super::blocks::{partition_into_blocks, BLOCK_SIZE};
use super::pool;
use super::pool::StudyMode;
use super::session::{SessionOutcome, StudySession};
use crate::error::SessionError;

/// Where a [`StudyFlow`] currently stands in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStage {
    Idle,
    PoolBuilt,
    InSession,
    Completed,
}

#[derive(Debug)]
enum FlowState {
    Idle,
    PoolBuilt {
        pending: Vec<QuestionItem>,
    },
    InSession {
        session: StudySession,
        /// The block the session was started from, pre-shuffle; retry-all
        /// reshuffles this exact set.
        block_pool: Vec<QuestionItem>,
    },
    Completed {
        outcome: SessionOutcome,
        total: usize,
        block_pool: Vec<QuestionItem>,
    },
}

/// Drives the session lifecycle against one bank:
///
/// ```text
/// idle → pool-built → in-session → completed → (retry → in-session | back → idle)
/// ```
///
/// Category selection and study mode survive every transition; "back to
/// start" is available from any state and only resets the stage, matching
/// how a player abandons a run without losing their selection.
#[derive(Debug)]
pub struct StudyFlow {
    bank: Arc<QuizBank>,
    selected: HashSet<String>,
    mode: StudyMode,
    state: FlowState,
}

impl StudyFlow {
    #[must_use]
    pub fn new(bank: Arc<QuizBank>) -> Self {
        Self {
            bank,
            selected: HashSet::new(),
            mode: StudyMode::default(),
            state: FlowState::Idle,
        }
    }

    #[must_use]
    pub fn stage(&self) -> FlowStage {
        match self.state {
            FlowState::Idle => FlowStage::Idle,
            FlowState::PoolBuilt { .. } => FlowStage::PoolBuilt,
            FlowState::InSession { .. } => FlowStage::InSession,
            FlowState::Completed { .. } => FlowStage::Completed,
        }
    }

    #[must_use]
    pub fn bank(&self) -> &QuizBank {
        &self.bank
    }

    //
    // ─── CATEGORY SELECTION ────────────────────────────────────────────────
    //

    /// Add or remove one category title from the selection.
    pub fn toggle_category(&mut self, title: &str) {
        if !self.selected.remove(title) {
            self.selected.insert(title.to_owned());
        }
    }

    /// Select every category in the bank, or clear the selection if all are
    /// already selected.
    pub fn toggle_select_all(&mut self) {
        let all_selected = self
            .bank
            .categories
            .iter()
            .all(|c| self.selected.contains(&c.title));
        if all_selected {
            self.selected.clear();
        } else {
            self.selected = self
                .bank
                .categories
                .iter()
                .map(|c| c.title.clone())
                .collect();
        }
    }

    #[must_use]
    pub fn is_selected(&self, title: &str) -> bool {
        self.selected.contains(title)
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn set_mode(&mut self, mode: StudyMode) {
        self.mode = mode;
    }

    #[must_use]
    pub fn mode(&self) -> StudyMode {
        self.mode
    }

    //
    // ─── POOL AND BLOCKS ───────────────────────────────────────────────────
    //

    /// Build the candidate pool from the current selection and mode.
    ///
    /// Moves the flow to the pool-built stage and returns the pool size.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when the selection is empty or (in
    /// weakness mode) every selected question is already mastered; the stage
    /// is left unchanged. Returns `SessionError::InvalidState` while a
    /// session is running or awaiting retry.
    pub fn build_pool(&mut self, history: &HistoryStore) -> Result<usize, SessionError> {
        if !matches!(self.state, FlowState::Idle | FlowState::PoolBuilt { .. }) {
            return Err(SessionError::InvalidState);
        }

        let pending = pool::build_pool(&self.selected, self.mode, &self.bank, history);
        if pending.is_empty() {
            return Err(SessionError::Empty);
        }

        let len = pending.len();
        self.state = FlowState::PoolBuilt { pending };
        Ok(len)
    }

    /// The candidate pool awaiting a block choice, if the flow is there.
    #[must_use]
    pub fn pending_pool(&self) -> Option<&[QuestionItem]> {
        match &self.state {
            FlowState::PoolBuilt { pending } => Some(pending),
            _ => None,
        }
    }

    /// The selectable blocks of the pending pool.
    #[must_use]
    pub fn blocks(&self) -> Vec<Vec<QuestionItem>> {
        self.pending_pool()
            .map(|pending| partition_into_blocks(pending, BLOCK_SIZE))
            .unwrap_or_default()
    }

    //
    // ─── SESSIONS ──────────────────────────────────────────────────────────
    //

    /// Start a session over one block of the pending pool.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` outside the pool-built stage and
    /// `SessionError::UnknownBlock` for an out-of-range index.
    pub fn start_block<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        let FlowState::PoolBuilt { pending } = &self.state else {
            return Err(SessionError::InvalidState);
        };

        let blocks = partition_into_blocks(pending, BLOCK_SIZE);
        let Some(block) = blocks.into_iter().nth(index) else {
            return Err(SessionError::UnknownBlock { index });
        };

        let session = StudySession::start(block.clone(), rng, now)?;
        self.state = FlowState::InSession {
            session,
            block_pool: block,
        };
        Ok(())
    }

    /// Start a session over the whole pending pool instead of one block.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` outside the pool-built stage.
    pub fn start_all<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        let FlowState::PoolBuilt { pending } = &self.state else {
            return Err(SessionError::InvalidState);
        };

        let pool = pending.clone();
        let session = StudySession::start(pool.clone(), rng, now)?;
        self.state = FlowState::InSession {
            session,
            block_pool: pool,
        };
        Ok(())
    }

    /// The running session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&StudySession> {
        match &self.state {
            FlowState::InSession { session, .. } => Some(session),
            _ => None,
        }
    }

    /// The question currently facing the learner.
    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionItem> {
        self.session().and_then(StudySession::current_question)
    }

    /// Mark the current question and advance the running session.
    ///
    /// Returns the session outcome when this mark completed the session,
    /// moving the flow to the completed stage.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` when no session is running.
    pub fn mark(
        &mut self,
        mark: Mark,
        now: DateTime<Utc>,
    ) -> Result<Option<SessionOutcome>, SessionError> {
        let FlowState::InSession {
            session,
            block_pool,
        } = &mut self.state
        else {
            return Err(SessionError::InvalidState);
        };

        session.mark(mark, now)?;
        if !session.is_complete() {
            return Ok(None);
        }

        let outcome = session.outcome();
        let total = session.total();
        let block_pool = std::mem::take(block_pool);
        self.state = FlowState::Completed {
            outcome: outcome.clone(),
            total,
            block_pool,
        };
        Ok(Some(outcome))
    }

    //
    // ─── RESULTS AND RETRIES ───────────────────────────────────────────────
    //

    /// The finished session's outcome, while in the completed stage.
    #[must_use]
    pub fn outcome(&self) -> Option<&SessionOutcome> {
        match &self.state {
            FlowState::Completed { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    /// Question count of the finished session, for score display.
    #[must_use]
    pub fn completed_total(&self) -> Option<usize> {
        match &self.state {
            FlowState::Completed { total, .. } => Some(*total),
            _ => None,
        }
    }

    /// Replay only the questions missed in the finished session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` outside the completed stage and
    /// `SessionError::Empty` when nothing was missed.
    pub fn retry_wrong<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        let FlowState::Completed {
            outcome,
            block_pool,
            ..
        } = &self.state
        else {
            return Err(SessionError::InvalidState);
        };
        if outcome.wrong_pool.is_empty() {
            return Err(SessionError::Empty);
        }

        let wrong = outcome.wrong_pool.clone();
        let block_pool = block_pool.clone();
        let session = StudySession::start(wrong, rng, now)?;
        self.state = FlowState::InSession {
            session,
            block_pool,
        };
        Ok(())
    }

    /// Replay the whole block the finished session came from.
    ///
    /// The new session reshuffles the original pre-shuffle block, so
    /// repeated retries never compound earlier shuffles.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` outside the completed stage.
    pub fn retry_all<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        let FlowState::Completed { block_pool, .. } = &self.state else {
            return Err(SessionError::InvalidState);
        };

        let pool = block_pool.clone();
        let session = StudySession::start(pool.clone(), rng, now)?;
        self.state = FlowState::InSession {
            session,
            block_pool: pool,
        };
        Ok(())
    }

    /// Abandon the current run and return to the start, from any stage.
    ///
    /// Category selection and study mode are kept.
    pub fn back_to_start(&mut self) {
        self.state = FlowState::Idle;
    }
}
