use std::fs;
use std::io;
use std::path::PathBuf;

use ichimon_core::model::HistoryStore;

use crate::repository::{HistoryRepository, StorageError};

/// History persisted as a single JSON document on disk.
///
/// The whole blob is rewritten on every save; there is no locking, so two
/// processes writing the same file race and the last writer wins.
#[derive(Debug, Clone)]
pub struct JsonFileHistory {
    path: PathBuf,
}

impl JsonFileHistory {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl HistoryRepository for JsonFileHistory {
    fn load(&self) -> Result<HistoryStore, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound);
            }
            Err(err) => return Err(StorageError::Io(err.to_string())),
        };
        serde_json::from_str(&raw).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn save(&self, history: &HistoryStore) -> Result<(), StorageError> {
        let raw = serde_json::to_string(history)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| StorageError::Io(e.to_string()))
    }
}
