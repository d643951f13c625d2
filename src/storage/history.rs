//! Recent-query history.
//!
//! [`HistoryStore`] keeps a bounded, deduplicated, newest-first list of past
//! searches under a single storage key. Storage failures never reach the caller:
//! they are logged and the in-memory list stays authoritative for the session.

use crate::domain::error::{CinesearchError, Result};
use crate::domain::Query;
use crate::storage::backend::SharedStorage;
use crate::storage::models::HistoryEntry;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Storage key holding the serialized history list.
pub const HISTORY_KEY: &str = "movie-search-history";

/// Maximum number of remembered queries.
pub const HISTORY_CAPACITY: usize = 10;

/// A history entry that matched a filter, with highlight ranges for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryMatch {
    /// Position in [`HistoryStore::entries`].
    pub index: usize,
    pub entry: HistoryEntry,
    /// `(start, end)` character ranges of the query that matched the filter.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Bounded, most-recent-first list of past queries.
///
/// # Examples
///
/// ```
/// use cinesearch::domain::Query;
/// use cinesearch::storage::{shared, HistoryStore, MemoryStorage};
///
/// let mut history = HistoryStore::open(shared(MemoryStorage::default()));
/// for raw in ["batman", "superman", "batman"] {
///     history.record(&Query::parse(raw).unwrap());
/// }
///
/// let queries: Vec<_> = history.entries().iter().map(|e| e.query.as_str()).collect();
/// assert_eq!(queries, ["batman", "superman"]);
/// ```
pub struct HistoryStore {
    storage: SharedStorage,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Creates a store over `storage` and loads whatever it already holds.
    pub fn open(storage: SharedStorage) -> Self {
        let mut store = Self {
            storage,
            entries: Vec::new(),
        };
        store.load();
        store
    }

    /// Re-reads the persisted list.
    ///
    /// Missing, unreadable or corrupt data yields an empty list; the condition is
    /// logged and never returned as an error.
    pub fn load(&mut self) -> &[HistoryEntry] {
        let _span = tracing::debug_span!("history_load").entered();

        self.entries = match self.read_persisted() {
            Ok(Some(entries)) => normalize(entries),
            Ok(None) => {
                tracing::debug!("no stored history");
                Vec::new()
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load search history, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(count = self.entries.len(), "history loaded");
        &self.entries
    }

    /// Moves `query` to the front of the list, stamped with the current time.
    ///
    /// Any previous entry for the same query is dropped and the list is truncated
    /// to [`HISTORY_CAPACITY`] before being persisted.
    pub fn record(&mut self, query: &Query) {
        let _span = tracing::debug_span!("history_record", query = %query).entered();

        self.entries.retain(|entry| entry.query != *query);
        self.entries.insert(0, HistoryEntry::now(query.clone()));
        self.entries.truncate(HISTORY_CAPACITY);

        self.persist();
    }

    /// Forgets every entry and persists the empty list.
    pub fn clear(&mut self) {
        let _span = tracing::debug_span!("history_clear", count = self.entries.len()).entered();

        self.entries.clear();
        self.persist();
    }

    /// The in-memory list, newest first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose query fuzzy-matches `filter`, in recency order.
    ///
    /// An empty or blank filter matches everything with no highlights.
    #[must_use]
    pub fn matching(&self, filter: &str) -> Vec<HistoryMatch> {
        let filter = filter.trim();
        if filter.is_empty() {
            return self
                .entries
                .iter()
                .enumerate()
                .map(|(index, entry)| HistoryMatch {
                    index,
                    entry: entry.clone(),
                    highlight_ranges: Vec::new(),
                })
                .collect();
        }

        let matcher = SkimMatcherV2::default().ignore_case();
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                matcher
                    .fuzzy_indices(entry.query.as_str(), filter)
                    .map(|(_score, indices)| HistoryMatch {
                        index,
                        entry: entry.clone(),
                        highlight_ranges: coalesce_indices(&indices),
                    })
            })
            .collect()
    }

    fn read_persisted(&self) -> Result<Option<Vec<HistoryEntry>>> {
        let raw = {
            let storage = self
                .storage
                .lock()
                .map_err(|e| CinesearchError::Storage(format!("storage lock poisoned: {e}")))?;
            storage.read(HISTORY_KEY)?
        };

        raw.map(|json| {
            serde_json::from_str(&json)
                .map_err(|e| CinesearchError::Storage(format!("corrupt history: {e}")))
        })
        .transpose()
    }

    fn persist(&self) {
        if let Err(e) = self.write_persisted() {
            tracing::error!(error = %e, "failed to persist search history, keeping it in memory");
        }
    }

    fn write_persisted(&self) -> Result<()> {
        let json = serde_json::to_string(&self.entries)
            .map_err(|e| CinesearchError::Storage(format!("failed to serialize history: {e}")))?;

        let mut storage = self
            .storage
            .lock()
            .map_err(|e| CinesearchError::Storage(format!("storage lock poisoned: {e}")))?;
        storage.write(HISTORY_KEY, &json)
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

/// Drops later duplicates and anything past capacity from a stored list.
fn normalize(entries: Vec<HistoryEntry>) -> Vec<HistoryEntry> {
    let mut seen = Vec::with_capacity(HISTORY_CAPACITY);
    for entry in entries {
        if seen.len() == HISTORY_CAPACITY {
            break;
        }
        if !seen.iter().any(|kept: &HistoryEntry| kept.query == entry.query) {
            seen.push(entry);
        }
    }
    seen
}

/// Collapses sorted match indices into contiguous `(start, end)` ranges.
fn coalesce_indices(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}
