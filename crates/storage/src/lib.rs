#![forbid(unsafe_code)]

pub mod bank;
pub mod json_file;
pub mod repository;

pub use bank::{load_bank, parse_bank, BankLoadError};
pub use json_file::JsonFileHistory;
pub use repository::{HistoryRepository, InMemoryHistory, StorageError};
