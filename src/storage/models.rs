//! Persisted record types.
//!
//! These are the shapes written into storage values. The history list is stored
//! as a JSON array of `{ "query": string, "timestamp": number }` objects.

use crate::domain::Query;
use serde::{Deserialize, Serialize};

const MILLIS_PER_MINUTE: i64 = 60_000;
const MILLIS_PER_HOUR: i64 = 3_600_000;
const MILLIS_PER_DAY: i64 = 86_400_000;

/// One remembered search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: Query,

    /// Unix timestamp in milliseconds.
    #[serde(rename = "timestamp")]
    pub recorded_at: i64,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time.
    #[must_use]
    pub fn now(query: Query) -> Self {
        Self {
            query,
            recorded_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Returns a short description of how long ago the search was made.
    ///
    /// - under a minute: "just now"
    /// - under an hour: "5m ago"
    /// - under a day: "3h ago"
    /// - otherwise: "7d ago"
    ///
    /// # Examples
    ///
    /// ```
    /// use cinesearch::domain::Query;
    /// use cinesearch::storage::HistoryEntry;
    ///
    /// let entry = HistoryEntry::now(Query::parse("alien").unwrap());
    /// assert_eq!(entry.time_ago(), "just now");
    /// ```
    #[must_use]
    pub fn time_ago(&self) -> String {
        self.time_ago_from(chrono::Utc::now().timestamp_millis())
    }

    /// Like [`HistoryEntry::time_ago`], measured against `now_millis`.
    #[must_use]
    pub fn time_ago_from(&self, now_millis: i64) -> String {
        let diff = now_millis - self.recorded_at;

        if diff < MILLIS_PER_MINUTE {
            "just now".to_string()
        } else if diff < MILLIS_PER_HOUR {
            format!("{}m ago", diff / MILLIS_PER_MINUTE)
        } else if diff < MILLIS_PER_DAY {
            format!("{}h ago", diff / MILLIS_PER_HOUR)
        } else {
            format!("{}d ago", diff / MILLIS_PER_DAY)
        }
    }
}
