use std::fs;
use std::path::Path;

use thiserror::Error;

use ichimon_core::model::{BankError, QuizBank};

/// Errors raised while reading the static question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankLoadError {
    #[error("failed to read bank file: {0}")]
    Io(String),

    #[error("failed to parse bank: {0}")]
    Parse(String),

    #[error(transparent)]
    Invalid(#[from] BankError),
}

/// Parse and validate a question bank from its JSON source.
///
/// # Errors
///
/// Returns `BankLoadError::Parse` for malformed JSON and
/// `BankLoadError::Invalid` when the bank violates its invariants
/// (duplicate question text in a category, or too few unique answers).
pub fn parse_bank(json: &str) -> Result<QuizBank, BankLoadError> {
    let bank: QuizBank =
        serde_json::from_str(json).map_err(|e| BankLoadError::Parse(e.to_string()))?;
    bank.validate()?;
    Ok(bank)
}

/// Read, parse and validate a question bank file.
///
/// # Errors
///
/// Returns `BankLoadError::Io` when the file cannot be read, plus the
/// [`parse_bank`] errors.
pub fn load_bank(path: impl AsRef<Path>) -> Result<QuizBank, BankLoadError> {
    let raw = fs::read_to_string(path).map_err(|e| BankLoadError::Io(e.to_string()))?;
    parse_bank(&raw)
}
