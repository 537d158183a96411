mod bank;
mod history;

pub use bank::{BankError, QuestionItem, QuizBank, QuizCategory, MIN_UNIQUE_ANSWERS};
pub use history::{CategoryHistory, HistoryStore, QuestionStats};
