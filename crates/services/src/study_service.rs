use std::sync::Arc;

use tracing::debug;

use ichimon_core::mastery::{
    self, aggregate_progress, mastery_progress, weak_questions, Mark, MasteryProgress,
};
use ichimon_core::model::{HistoryStore, QuestionItem, QuizBank};
use ichimon_core::Clock;
use storage::HistoryRepository;

/// Front door for the presentation layer: owns the loaded bank, the
/// in-memory history, and the persistence handle.
///
/// History is read once at construction and rewritten (whole blob, best
/// effort) after every recorded mark; storage trouble degrades to an empty
/// history or a dropped write, never an error for the caller.
#[derive(Clone)]
pub struct StudyService {
    bank: Arc<QuizBank>,
    history: HistoryStore,
    repository: Arc<dyn HistoryRepository>,
    clock: Clock,
}

impl StudyService {
    /// Build a service over a validated bank, loading whatever history the
    /// repository currently holds.
    #[must_use]
    pub fn new(bank: Arc<QuizBank>, repository: Arc<dyn HistoryRepository>) -> Self {
        let history = repository.load_or_default();
        Self {
            bank,
            history,
            repository,
            clock: Clock::default(),
        }
    }

    /// Use the given clock for `last_played` stamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn bank(&self) -> &Arc<QuizBank> {
        &self.bank
    }

    #[must_use]
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Record a known/unknown mark for a question.
    ///
    /// The owning category is resolved from the bank by question text; marks
    /// for texts the bank does not know are dropped, leaving history
    /// unchanged. The updated history is persisted best-effort.
    pub fn mark(&mut self, question_text: &str, mark: Mark) {
        let Some(category_title) = self.bank.category_for_question(question_text) else {
            debug!(question = question_text, "mark for unknown question dropped");
            return;
        };
        let category_title = category_title.to_owned();

        self.history =
            self.history
                .record_mark(&category_title, question_text, mark, self.clock.now());
        self.repository.save_best_effort(&self.history);
    }

    //
    // ─── READ SIDE ─────────────────────────────────────────────────────────
    //

    /// Questions in a category mastered to the threshold.
    #[must_use]
    pub fn mastered_count(&self, category_title: &str) -> usize {
        self.history
            .category(category_title)
            .map_or(0, mastery::mastered_count)
    }

    /// Mastery progress for one category; zero for unknown titles.
    #[must_use]
    pub fn mastery_progress(&self, category_title: &str) -> MasteryProgress {
        self.bank
            .category(category_title)
            .map_or_else(MasteryProgress::default, |category| {
                mastery_progress(category, &self.history)
            })
    }

    /// Mastery progress summed over the whole bank.
    #[must_use]
    pub fn overall_progress(&self) -> MasteryProgress {
        aggregate_progress(self.bank.categories.iter(), &self.history)
    }

    /// The not-yet-mastered questions of a category; empty for unknown
    /// titles.
    #[must_use]
    pub fn weak_questions(&self, category_title: &str) -> Vec<QuestionItem> {
        self.bank
            .category(category_title)
            .map_or_else(Vec::new, |category| {
                weak_questions(&category.questions, category_title, &self.history)
            })
    }
}
