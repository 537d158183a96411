//! Per-question mastery tracking.
//!
//! Each question carries a bounded counter in `[0, MASTERY_THRESHOLD]` that
//! grows on a successful self-assessment and decays on a failed one — and
//! only then; strength never expires with time. Reaching the threshold marks
//! the question as mastered and drops it from the weak set.

use chrono::{DateTime, Utc};

use crate::model::{CategoryHistory, HistoryStore, QuestionItem, QuizCategory};

/// Mastery level at which a question counts as mastered.
pub const MASTERY_THRESHOLD: u8 = 3;

/// A learner's self-assessment for one flashcard pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// The learner knew the answer; mastery moves up one step.
    Known,
    /// The learner did not; mastery moves down one step.
    Unknown,
}

impl HistoryStore {
    /// Record a mark for one question, returning the updated store.
    ///
    /// The category history and the question's stats are created on first
    /// use with zeroed counters. `Known` raises the mastery level (capped at
    /// [`MASTERY_THRESHOLD`]) and bumps the correct counter; `Unknown` lowers
    /// it (floored at 0) and bumps the incorrect counter. `last_played` is
    /// stamped with `now` either way. The prior store is left untouched.
    #[must_use]
    pub fn record_mark(
        &self,
        category_title: &str,
        question_text: &str,
        mark: Mark,
        now: DateTime<Utc>,
    ) -> Self {
        let mut category = self.category(category_title).cloned().unwrap_or_default();

        let stats = category
            .question_stats
            .entry(question_text.to_owned())
            .or_default();
        match mark {
            Mark::Known => {
                stats.mastery_level = (stats.mastery_level + 1).min(MASTERY_THRESHOLD);
                stats.correct += 1;
            }
            Mark::Unknown => {
                stats.mastery_level = stats.mastery_level.saturating_sub(1);
                stats.incorrect += 1;
            }
        }
        category.last_played = Some(now);

        self.with_category(category_title, category)
    }
}

/// Number of questions in a category's history at or above the threshold.
#[must_use]
pub fn mastered_count(history: &CategoryHistory) -> usize {
    history
        .question_stats
        .values()
        .filter(|stats| stats.mastery_level >= MASTERY_THRESHOLD)
        .count()
}

/// The subset of `questions` not yet mastered.
///
/// A question is weak when it has no recorded stats or its mastery level is
/// below the threshold. A category with no history at all is entirely weak.
#[must_use]
pub fn weak_questions(
    questions: &[QuestionItem],
    category_title: &str,
    history: &HistoryStore,
) -> Vec<QuestionItem> {
    let Some(category) = history.category(category_title) else {
        return questions.to_vec();
    };

    questions
        .iter()
        .filter(|q| {
            category
                .stats(&q.question)
                .is_none_or(|stats| stats.mastery_level < MASTERY_THRESHOLD)
        })
        .cloned()
        .collect()
}

/// Accumulated mastery over a set of questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MasteryProgress {
    /// Sum of mastery levels over the questions.
    pub current_score: u32,
    /// Question count times [`MASTERY_THRESHOLD`].
    pub max_score: u32,
    /// `round(100 * current / max)`; 0 when there are no questions.
    pub percentage: u8,
}

impl MasteryProgress {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_scores(current_score: u32, max_score: u32) -> Self {
        let percentage = if max_score == 0 {
            0
        } else {
            (f64::from(current_score) * 100.0 / f64::from(max_score)).round() as u8
        };
        Self {
            current_score,
            max_score,
            percentage,
        }
    }
}

/// Mastery progress for a single category.
#[must_use]
pub fn mastery_progress(category: &QuizCategory, history: &HistoryStore) -> MasteryProgress {
    let max_score = category.questions.len() as u32 * u32::from(MASTERY_THRESHOLD);

    let current_score = history.category(&category.title).map_or(0, |cat_history| {
        category
            .questions
            .iter()
            .map(|q| {
                cat_history
                    .stats(&q.question)
                    .map_or(0, |stats| u32::from(stats.mastery_level))
            })
            .sum()
    });

    MasteryProgress::from_scores(current_score, max_score)
}

/// Mastery progress summed over several categories.
#[must_use]
pub fn aggregate_progress<'a>(
    categories: impl IntoIterator<Item = &'a QuizCategory>,
    history: &HistoryStore,
) -> MasteryProgress {
    let (current, max) = categories
        .into_iter()
        .map(|category| mastery_progress(category, history))
        .fold((0, 0), |(current, max), progress| {
            (current + progress.current_score, max + progress.max_score)
        });
    MasteryProgress::from_scores(current, max)
}
