use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-question mark counters and the bounded mastery score.
///
/// Created lazily the first time a question is marked. Field names follow
/// the persisted JSON format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionStats {
    pub correct: u32,
    pub incorrect: u32,
    #[serde(rename = "masteryLevel", default)]
    pub mastery_level: u8,
}

/// Study history for one category: best session score, last activity, and
/// per-question stats keyed by question text.
///
/// Exists only after at least one mark has been recorded for the category.
/// `question_stats` is ordered so the persisted blob is byte-stable across
/// load/save round-trips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryHistory {
    #[serde(rename = "bestScore")]
    pub best_score: u32,
    #[serde(rename = "lastPlayed")]
    pub last_played: Option<DateTime<Utc>>,
    #[serde(rename = "questionStats")]
    pub question_stats: BTreeMap<String, QuestionStats>,
}

impl CategoryHistory {
    /// Stats for a question, if it has ever been marked.
    #[must_use]
    pub fn stats(&self, question_text: &str) -> Option<&QuestionStats> {
        self.question_stats.get(question_text)
    }
}

/// The whole persisted study history: category title → [`CategoryHistory`].
///
/// The sole piece of mutable cross-session state. Updates are functional:
/// operations return a new store and leave the prior value untouched, so
/// callers can compare or discard freely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryStore {
    categories: BTreeMap<String, CategoryHistory>,
}

impl HistoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// History for a category, if any marks were ever recorded for it.
    #[must_use]
    pub fn category(&self, title: &str) -> Option<&CategoryHistory> {
        self.categories.get(title)
    }

    /// A copy of this store with one category's history replaced.
    #[must_use]
    pub fn with_category(&self, title: impl Into<String>, history: CategoryHistory) -> Self {
        let mut categories = self.categories.clone();
        categories.insert(title.into(), history);
        Self { categories }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryHistory)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, CategoryHistory)> for HistoryStore {
    fn from_iter<I: IntoIterator<Item = (String, CategoryHistory)>>(iter: I) -> Self {
        Self {
            categories: iter.into_iter().collect(),
        }
    }
}
