use std::collections::HashSet;

use ichimon_core::mastery::weak_questions;
use ichimon_core::model::{HistoryStore, QuestionItem, QuizBank};

/// Which questions each selected category contributes to a study pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StudyMode {
    /// Every question in the category.
    #[default]
    Normal,
    /// Only questions below the mastery threshold.
    Weakness,
}

/// Concatenate the selected categories' questions into one candidate pool.
///
/// Categories contribute in bank order regardless of selection order, and
/// each keeps its internal question order. Titles not present in the bank
/// are ignored; an empty selection yields an empty pool.
#[must_use]
pub fn build_pool(
    selected_titles: &HashSet<String>,
    mode: StudyMode,
    bank: &QuizBank,
    history: &HistoryStore,
) -> Vec<QuestionItem> {
    let mut pool = Vec::new();
    for category in bank
        .categories
        .iter()
        .filter(|c| selected_titles.contains(&c.title))
    {
        match mode {
            StudyMode::Normal => pool.extend(category.questions.iter().cloned()),
            StudyMode::Weakness => {
                pool.extend(weak_questions(&category.questions, &category.title, history));
            }
        }
    }
    pool
}
