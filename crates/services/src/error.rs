//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by study sessions and the study flow.
///
/// Empty inputs are surfaced this way so the presentation layer can show a
/// notice; the engine never panics on them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,

    #[error("session already completed")]
    Completed,

    #[error("block {index} is out of range")]
    UnknownBlock { index: usize },

    #[error("operation is not valid in the current flow state")]
    InvalidState,
}
