use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Minimum number of unique answers a bank must carry system-wide.
///
/// Four-option quizzes cannot produce distinct option sets below this,
/// so smaller banks are rejected at validation time instead of failing
/// mid-generation.
pub const MIN_UNIQUE_ANSWERS: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("duplicate question {question:?} in category {category:?}")]
    DuplicateQuestion { category: String, question: String },

    #[error("bank has only {found} unique answers, need at least {needed}")]
    TooFewUniqueAnswers { found: usize, needed: usize },
}

/// A single question/answer pair from the static bank.
///
/// Question text is the natural key: unique within its category, and the
/// handle by which history and session results refer back to the bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionItem {
    #[serde(rename = "q")]
    pub question: String,
    #[serde(rename = "a")]
    pub answer: String,
}

/// An ordered group of questions under one title.
///
/// Owned by the static bank; never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCategory {
    pub title: String,
    pub questions: Vec<QuestionItem>,
}

/// The full read-only question bank for one chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizBank {
    #[serde(rename = "chapterNumber")]
    pub chapter_number: String,
    pub title: String,
    pub description: String,
    pub categories: Vec<QuizCategory>,
}

impl QuizBank {
    /// Check the bank invariants: question text unique within each category,
    /// and at least [`MIN_UNIQUE_ANSWERS`] unique answers overall.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a `BankError`.
    pub fn validate(&self) -> Result<(), BankError> {
        for category in &self.categories {
            let mut seen = HashSet::with_capacity(category.questions.len());
            for item in &category.questions {
                if !seen.insert(item.question.as_str()) {
                    return Err(BankError::DuplicateQuestion {
                        category: category.title.clone(),
                        question: item.question.clone(),
                    });
                }
            }
        }

        let found = self.unique_answer_count();
        if found < MIN_UNIQUE_ANSWERS {
            return Err(BankError::TooFewUniqueAnswers {
                found,
                needed: MIN_UNIQUE_ANSWERS,
            });
        }

        Ok(())
    }

    /// Every answer in the bank, in category order, duplicates included.
    ///
    /// This is the answer universe distractors are drawn from.
    #[must_use]
    pub fn all_answers(&self) -> Vec<String> {
        self.categories
            .iter()
            .flat_map(|c| c.questions.iter().map(|q| q.answer.clone()))
            .collect()
    }

    /// Number of distinct answer strings across the whole bank.
    #[must_use]
    pub fn unique_answer_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| c.questions.iter().map(|q| q.answer.as_str()))
            .collect::<HashSet<_>>()
            .len()
    }

    /// The category a question belongs to, by exact question text.
    ///
    /// Returns the first match in bank order, or `None` for unknown text.
    #[must_use]
    pub fn category_for_question(&self, question_text: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.questions.iter().any(|q| q.question == question_text))
            .map(|c| c.title.as_str())
    }

    /// Look up a category by title.
    #[must_use]
    pub fn category(&self, title: &str) -> Option<&QuizCategory> {
        self.categories.iter().find(|c| c.title == title)
    }

    /// Total question count across all categories.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.categories.iter().map(|c| c.questions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(question: &str, answer: &str) -> QuestionItem {
        QuestionItem {
            question: question.to_owned(),
            answer: answer.to_owned(),
        }
    }

    fn build_bank() -> QuizBank {
        QuizBank {
            chapter_number: "6".to_owned(),
            title: "イスラーム世界".to_owned(),
            description: "test".to_owned(),
            categories: vec![
                QuizCategory {
                    title: "成立期".to_owned(),
                    questions: vec![
                        item("開祖は?", "ムハンマド"),
                        item("聖典は?", "『コーラン』(『クルアーン』)"),
                    ],
                },
                QuizCategory {
                    title: "発展期".to_owned(),
                    questions: vec![
                        item("都は?", "バグダード"),
                        item("王朝は?", "アッバース朝"),
                    ],
                },
            ],
        }
    }

    #[test]
    fn valid_bank_passes() {
        build_bank().validate().unwrap();
    }

    #[test]
    fn duplicate_question_in_category_rejected() {
        let mut bank = build_bank();
        bank.categories[0]
            .questions
            .push(item("開祖は?", "別の答え"));

        let err = bank.validate().unwrap_err();
        assert!(matches!(
            err,
            BankError::DuplicateQuestion { ref category, .. } if category == "成立期"
        ));
    }

    #[test]
    fn same_question_text_allowed_across_categories() {
        let mut bank = build_bank();
        bank.categories[1].questions.push(item("開祖は?", "カリフ"));
        bank.validate().unwrap();
    }

    #[test]
    fn too_few_unique_answers_rejected() {
        let mut bank = build_bank();
        bank.categories.truncate(1);
        bank.categories[0].questions.truncate(2);

        let err = bank.validate().unwrap_err();
        assert_eq!(
            err,
            BankError::TooFewUniqueAnswers {
                found: 2,
                needed: MIN_UNIQUE_ANSWERS
            }
        );
    }

    #[test]
    fn answer_universe_keeps_duplicates() {
        let mut bank = build_bank();
        bank.categories[1].questions.push(item("預言者は?", "ムハンマド"));

        assert_eq!(bank.all_answers().len(), 5);
        assert_eq!(bank.unique_answer_count(), 4);
    }

    #[test]
    fn category_for_question_resolves_owner() {
        let bank = build_bank();
        assert_eq!(bank.category_for_question("都は?"), Some("発展期"));
        assert_eq!(bank.category_for_question("存在しない問題"), None);
    }

    #[test]
    fn deserializes_short_field_names() {
        let json = r#"{
            "chapterNumber": "6",
            "title": "t",
            "description": "d",
            "categories": [
                { "title": "c", "questions": [ { "q": "Q1", "a": "A1" } ] }
            ]
        }"#;
        let bank: QuizBank = serde_json::from_str(json).unwrap();
        assert_eq!(bank.categories[0].questions[0].question, "Q1");
        assert_eq!(bank.categories[0].questions[0].answer, "A1");
    }
}
