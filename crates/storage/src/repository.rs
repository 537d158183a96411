use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, warn};

use ichimon_core::model::HistoryStore;

/// Errors surfaced by history storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("no stored history")]
    NotFound,

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Key-value persistence contract for the study history.
///
/// The history is one opaque blob under a single key: `load` reads the whole
/// store, `save` rewrites it. There is no partial update, so concurrent
/// writers clobber each other — last writer wins, an accepted limitation.
///
/// Callers that must not fail (the engine reads once at startup and writes
/// after every mark) go through [`load_or_default`](Self::load_or_default)
/// and [`save_best_effort`](Self::save_best_effort) instead of the raw
/// operations.
pub trait HistoryRepository: Send + Sync {
    /// Read the stored history.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when nothing has been saved yet, or
    /// another `StorageError` when the backend fails.
    fn load(&self) -> Result<HistoryStore, StorageError>;

    /// Replace the stored history with `history`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the backend fails.
    fn save(&self, history: &HistoryStore) -> Result<(), StorageError>;

    /// Load, degrading to an empty store when data is missing or unreadable.
    ///
    /// Corruption is logged and never propagated; a missing store is the
    /// normal first-run case and only logged at debug level.
    fn load_or_default(&self) -> HistoryStore {
        match self.load() {
            Ok(history) => history,
            Err(StorageError::NotFound) => {
                debug!("no stored study history, starting empty");
                HistoryStore::default()
            }
            Err(err) => {
                warn!("failed to load study history, starting empty: {err}");
                HistoryStore::default()
            }
        }
    }

    /// Save, logging failures instead of propagating them.
    fn save_best_effort(&self, history: &HistoryStore) {
        if let Err(err) = self.save(history) {
            warn!("failed to save study history: {err}");
        }
    }
}

/// In-memory history store for tests and prototyping.
///
/// Behaves like an empty backend until the first save.
#[derive(Clone, Default)]
pub struct InMemoryHistory {
    inner: Arc<Mutex<Option<HistoryStore>>>,
}

impl InMemoryHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository pre-seeded with `history`.
    #[must_use]
    pub fn with_store(history: HistoryStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(history))),
        }
    }
}

impl HistoryRepository for InMemoryHistory {
    fn load(&self) -> Result<HistoryStore, StorageError> {
        let guard = self.inner.lock().map_err(|e| StorageError::Io(e.to_string()))?;
        guard.clone().ok_or(StorageError::NotFound)
    }

    fn save(&self, history: &HistoryStore) -> Result<(), StorageError> {
        let mut guard = self.inner.lock().map_err(|e| StorageError::Io(e.to_string()))?;
        *guard = Some(history.clone());
        Ok(())
    }
}
