//! Persisted light/dark theme preference.

use crate::domain::error::{CinesearchError, Result};
use crate::storage::backend::SharedStorage;
use crate::ui::theme::ThemeMode;

/// Storage key holding `"light"` or `"dark"`.
pub const THEME_KEY: &str = "movie-app-theme";

/// Reads and writes the theme preference through the shared storage handle.
///
/// Like history, failures are logged and never returned.
#[derive(Clone)]
pub struct ThemePreference {
    storage: SharedStorage,
}

impl ThemePreference {
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    /// The saved mode, or `None` if nothing valid is stored.
    #[must_use]
    pub fn load(&self) -> Option<ThemeMode> {
        match self.read_raw() {
            Ok(Some(raw)) => {
                let mode = raw.parse::<ThemeMode>().ok();
                if mode.is_none() {
                    tracing::warn!(value = %raw, "ignoring unknown stored theme");
                }
                mode
            }
            Ok(None) => None,
            Err(e) => {
                tracing::error!(error = %e, "failed to read theme preference");
                None
            }
        }
    }

    pub fn save(&self, mode: ThemeMode) {
        let result = self
            .storage
            .lock()
            .map_err(|e| CinesearchError::Storage(format!("storage lock poisoned: {e}")))
            .and_then(|mut storage| storage.write(THEME_KEY, mode.as_str()));

        match result {
            Ok(()) => tracing::debug!(mode = %mode, "theme preference saved"),
            Err(e) => tracing::error!(error = %e, "failed to save theme preference"),
        }
    }

    fn read_raw(&self) -> Result<Option<String>> {
        self.storage
            .lock()
            .map_err(|e| CinesearchError::Storage(format!("storage lock poisoned: {e}")))?
            .read(THEME_KEY)
    }
}

impl std::fmt::Debug for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemePreference").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::backend::{shared, MemoryStorage};

    #[test]
    fn round_trips_through_storage() {
        let storage = shared(MemoryStorage::default());
        let pref = ThemePreference::new(storage.clone());
        assert_eq!(pref.load(), None);

        pref.save(ThemeMode::Dark);
        assert_eq!(pref.load(), Some(ThemeMode::Dark));
        assert_eq!(
            storage.lock().unwrap().read(THEME_KEY).unwrap().as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn unknown_value_is_ignored() {
        let storage = shared(MemoryStorage::default());
        storage.lock().unwrap().write(THEME_KEY, "sepia").unwrap();
        assert_eq!(ThemePreference::new(storage).load(), None);
    }
}
