//! Movie domain models.
//!
//! [`ResultItem`] is the summary row returned by a keyword search, and
//! [`DetailRecord`] is the full record fetched for a single identifier. Both are
//! immutable once received; the session accumulates result items while detail
//! records belong to whichever view asked for them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of results the movie service returns per page.
pub const PAGE_SIZE: u64 = 10;

/// Kind of title a result refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    Movie,
    Series,
    Episode,
    Game,
    Other(String),
}

impl MediaType {
    /// Maps the service's `Type` field, case-insensitively.
    #[must_use]
    pub fn from_service(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "movie" => Self::Movie,
            "series" => Self::Series,
            "episode" => Self::Episode,
            "game" => Self::Game,
            _ => Self::Other(raw.trim().to_string()),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => f.write_str("movie"),
            Self::Series => f.write_str("series"),
            Self::Episode => f.write_str("episode"),
            Self::Game => f.write_str("game"),
            Self::Other(other) => f.write_str(other),
        }
    }
}

/// Summary record for one search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Service identifier (IMDb id), used to fetch details.
    pub id: String,
    pub title: String,
    /// Release year as reported, e.g. `"1999"` or `"2008–2013"`.
    pub year: String,
    /// `None` when the service has no poster.
    pub poster_url: Option<String>,
    pub media_type: MediaType,
}

/// One page of search results plus the total the service reports for the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub items: Vec<ResultItem>,
    pub total_available: u64,
}

/// A rating from one review source, e.g. `Rotten Tomatoes: 87%`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub source: String,
    pub value: String,
}

/// Full record for a single title.
///
/// Text fields the service reports as `"N/A"` are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: String,
    pub title: String,
    pub year: Option<String>,
    pub rated: Option<String>,
    pub runtime: Option<String>,
    pub genres: Vec<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub box_office: Option<String>,
    pub poster_url: Option<String>,
    pub imdb_rating: Option<String>,
    pub ratings: Vec<Rating>,
}

impl DetailRecord {
    /// Looks up a rating by source name, e.g. `"Metacritic"`.
    #[must_use]
    pub fn rating_from(&self, source: &str) -> Option<&str> {
        self.ratings
            .iter()
            .find(|r| r.source.eq_ignore_ascii_case(source))
            .map(|r| r.value.as_str())
    }
}

/// Normalizes a service text field: trims it and maps `"N/A"` or blank to `None`.
#[must_use]
pub fn available(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("N/A"))
        .map(String::from)
}
