//! JSON file-based storage backend.
//!
//! All keys live in one human-readable JSON file. Writes go to a temporary file
//! that is then renamed over the original, so a crash never leaves a half-written
//! store behind.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "entries": {
//!     "movie-app-theme": "dark",
//!     "movie-search-history": "[{\"query\":\"batman\",\"timestamp\":1717000000000}]"
//!   }
//! }
//! ```

use crate::domain::error::{CinesearchError, Result};
use crate::storage::backend::Storage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const STORAGE_VERSION: u32 = 1;

/// Top-level structure serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    version: u32,

    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: STORAGE_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file storage backend.
///
/// The whole store is kept in memory and rewritten on every modification.
/// This type is `Send` but not `Sync`; share it through
/// [`SharedStorage`](crate::storage::SharedStorage).
pub struct JsonStorage {
    file_path: PathBuf,
    data: StorageData,
    dirty: bool,
}

impl JsonStorage {
    /// Creates or opens a JSON store at `file_path`.
    ///
    /// Parent directories are created as needed. A missing file starts an empty
    /// store. A file that does not parse is moved aside to `<name>.corrupt` and
    /// the store starts empty, so the next write replaces it.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the file
    /// exists but cannot be read.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cinesearch::storage::JsonStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonStorage::new(PathBuf::from("/tmp/cinesearch/store.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            let contents = std::fs::read_to_string(&file_path)?;
            match Self::parse(&contents) {
                Ok(data) => data,
                Err(e) => {
                    tracing::error!(error = %e, path = ?file_path, "storage file is corrupt, starting empty");
                    Self::quarantine(&file_path);
                    StorageData::default()
                }
            }
        } else {
            tracing::debug!("no storage file yet, starting empty");
            StorageData::default()
        };

        tracing::debug!(entries = data.entries.len(), "storage opened");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn parse(contents: &str) -> Result<StorageData> {
        let data: StorageData = serde_json::from_str(contents)
            .map_err(|e| CinesearchError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version > STORAGE_VERSION {
            tracing::warn!(
                version = data.version,
                supported = STORAGE_VERSION,
                "storage file written by a newer version"
            );
        }

        Ok(data)
    }

    /// Moves an unreadable store out of the way, keeping it for inspection.
    fn quarantine(path: &Path) {
        let mut aside = path.as_os_str().to_owned();
        aside.push(".corrupt");
        let aside = PathBuf::from(aside);

        match std::fs::rename(path, &aside) {
            Ok(()) => tracing::warn!(path = ?aside, "corrupt storage file moved aside"),
            // The next save overwrites the file anyway.
            Err(e) => tracing::warn!(error = %e, "could not move corrupt storage file aside"),
        }
    }

    /// Writes the store to disk via a temporary file and rename.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| CinesearchError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "storage saved");
        Ok(())
    }
}

impl Storage for JsonStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let value = self.data.entries.get(key).cloned();
        tracing::trace!(key = %key, found = value.is_some(), "json storage read");
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_storage_write", key = %key, bytes = value.len()).entered();

        // An unchanged value still goes to disk while an earlier save is pending.
        if !self.dirty && self.data.entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }

        self.data.entries.insert(key.to_string(), value.to_string());
        self.dirty = true;
        self.save_to_file()
    }
}

impl Drop for JsonStorage {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        {
            let mut storage = JsonStorage::new(path.clone()).unwrap();
            storage.write("movie-app-theme", "light").unwrap();
        }

        let storage = JsonStorage::new(path).unwrap();
        assert_eq!(
            storage.read("movie-app-theme").unwrap().as_deref(),
            Some("light")
        );
    }

    #[test]
    fn missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(dir.path().join("store.json")).unwrap();
        assert_eq!(storage.read("anything").unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_moved_aside_and_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut storage = JsonStorage::new(path.clone()).unwrap();
        assert_eq!(storage.read("movie-app-theme").unwrap(), None);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("store.json.corrupt")).unwrap(),
            "{ not json"
        );

        storage.write("movie-app-theme", "dark").unwrap();
        drop(storage);

        let reopened = JsonStorage::new(path).unwrap();
        assert_eq!(
            reopened.read("movie-app-theme").unwrap().as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn unchanged_value_retries_a_failed_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let mut storage = JsonStorage::new(path.clone()).unwrap();

        // A directory in the temp file's place makes the save fail.
        let blocker = path.with_extension("tmp");
        std::fs::create_dir(&blocker).unwrap();
        assert!(storage.write("k", "v").is_err());
        assert!(!path.exists());

        std::fs::remove_dir(&blocker).unwrap();
        storage.write("k", "v").unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["entries"]["k"], "v");
    }

    #[test]
    fn write_leaves_no_temporary_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let mut storage = JsonStorage::new(path.clone()).unwrap();
        storage.write("k", "v").unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["version"], 1);
        assert_eq!(parsed["entries"]["k"], "v");
    }
}
