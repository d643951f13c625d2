//! Storage layer for persistent history and preferences.
//!
//! A single string key-value [`Storage`] backend is shared by the history store
//! and the theme preference. The default backend is a JSON file with atomic
//! writes; [`MemoryStorage`] stands in when the file cannot be opened.
//!
//! # Modules
//!
//! - `backend`: storage trait, shared handle and in-memory backend
//! - `json`: JSON file-based backend
//! - `history`: bounded recent-query list
//! - `preferences`: theme preference
//! - `models`: persisted record types

pub mod backend;
pub mod history;
pub mod json;
pub mod models;
pub mod preferences;

pub use backend::{shared, MemoryStorage, SharedStorage, Storage};
pub use history::{HistoryMatch, HistoryStore, HISTORY_CAPACITY, HISTORY_KEY};
pub use json::JsonStorage;
pub use models::HistoryEntry;
pub use preferences::{ThemePreference, THEME_KEY};

use std::path::Path;

/// File name of the JSON store inside the data directory.
pub const STORE_FILE: &str = "cinesearch.json";

/// Opens the JSON store in `data_dir`, falling back to memory if that fails.
///
/// A corrupt file is set aside by [`JsonStorage::new`] and replaced on the next
/// write. Only I/O failures, such as an uncreatable directory, end up in memory,
/// where history starts empty and is not persisted for this run.
pub fn open_default(data_dir: &Path) -> SharedStorage {
    match JsonStorage::new(data_dir.join(STORE_FILE)) {
        Ok(storage) => shared(storage),
        Err(e) => {
            tracing::error!(error = %e, dir = ?data_dir, "cannot open storage file, using in-memory storage");
            shared(MemoryStorage::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Query;
    use tempfile::TempDir;

    #[test]
    fn history_recorded_over_corrupt_file_survives_restart() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(STORE_FILE), "{ not json").unwrap();

        {
            let mut history = HistoryStore::open(open_default(dir.path()));
            assert!(history.is_empty());
            history.record(&Query::parse("batman").unwrap());
        }

        let history = HistoryStore::open(open_default(dir.path()));
        let queries: Vec<&str> = history.entries().iter().map(|e| e.query.as_str()).collect();
        assert_eq!(queries, ["batman"]);
    }

    #[test]
    fn uncreatable_directory_falls_back_to_memory() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let storage = open_default(&blocker.join("data"));
        let mut history = HistoryStore::open(storage);
        history.record(&Query::parse("heat").unwrap());
        assert_eq!(history.entries().len(), 1);
    }
}
