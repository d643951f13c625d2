//! Display-ready views computed from core state.
//!
//! View models hold no logic and no colours: only the strings and flags the
//! components need. Computing them separately from rendering keeps the text
//! testable without parsing ANSI output.

use crate::app::{FailureKind, SessionSnapshot, SessionStatus};
use crate::domain::{DetailRecord, PAGE_SIZE};
use crate::storage::HistoryMatch;
use crate::ui::helpers::format_count;

/// Everything needed to draw the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub header: HeaderInfo,
    /// `Found 1,234 results`, present once a page has loaded.
    pub summary: Option<String>,
    pub display_items: Vec<DisplayItem>,
    /// Loading indicator or load-more hint below the list.
    pub status_line: Option<String>,
    pub footer: FooterInfo,
    pub empty_state: Option<EmptyState>,
}

/// One row of the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// 1-based number the user types after `:open`.
    pub position: usize,
    pub title: String,
    pub year: String,
    pub media_type: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// One row of the recent-searches list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub position: usize,
    pub query: String,
    pub time_ago: String,
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// A title's details, already reduced to what is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    /// `1999 · R · 136 min`, skipping unknown parts.
    pub subtitle: String,
    pub genres: Vec<String>,
    pub plot: Option<String>,
    /// Labelled facts such as director and cast, unknown ones omitted.
    pub fields: Vec<(&'static str, String)>,
    pub ratings: Vec<(String, String)>,
}

const RESULTS_FOOTER: &str =
    ":open N details · :more next page · :history recent · :theme · :help · :quit";

/// `Found 1 result` / `Found 2,345 results`.
#[must_use]
pub fn summary_line(total: u64) -> String {
    let plural = if total == 1 { "" } else { "s" };
    format!("Found {} result{plural}", format_count(total))
}

#[must_use]
pub fn results_view(snapshot: &SessionSnapshot) -> ResultsView {
    let title = snapshot.query.as_ref().map_or_else(
        || "Movie Search".to_string(),
        |q| format!("Movie Search · \"{q}\""),
    );

    let display_items: Vec<DisplayItem> = snapshot
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| DisplayItem {
            position: i + 1,
            title: item.title.clone(),
            year: item.year.clone(),
            media_type: item.media_type.to_string(),
            id: item.id.clone(),
        })
        .collect();

    let summary = (!display_items.is_empty()).then(|| summary_line(snapshot.total_available));

    let status_line = match &snapshot.status {
        SessionStatus::Loading { page: 1 } => Some("Searching…".to_string()),
        SessionStatus::Loading { .. } => Some("Loading more…".to_string()),
        SessionStatus::Loaded if snapshot.can_load_more => {
            let shown = display_items.len() as u64;
            let remaining = snapshot.total_available.saturating_sub(shown);
            Some(format!(
                "Showing {} of {} · :more for the next {}",
                format_count(shown),
                format_count(snapshot.total_available),
                remaining.min(PAGE_SIZE)
            ))
        }
        SessionStatus::Exhausted if !display_items.is_empty() => {
            Some("End of results".to_string())
        }
        _ => None,
    };

    let empty_state = if display_items.is_empty() {
        match &snapshot.status {
            SessionStatus::Idle => Some(EmptyState {
                message: "Search for a movie".to_string(),
                subtitle: "Type a title and press Enter".to_string(),
            }),
            SessionStatus::Failed(FailureKind::NoResults { .. }) => Some(EmptyState {
                message: "No movies found".to_string(),
                subtitle: "Try different keywords or check your spelling".to_string(),
            }),
            SessionStatus::Failed(FailureKind::Transport { .. }) => Some(EmptyState {
                message: "Search failed".to_string(),
                subtitle: "Check your connection and try again".to_string(),
            }),
            _ => None,
        }
    } else {
        None
    };

    ResultsView {
        header: HeaderInfo { title },
        summary,
        display_items,
        status_line,
        footer: FooterInfo {
            keybindings: RESULTS_FOOTER.to_string(),
        },
        empty_state,
    }
}

/// Rows for the recent-searches list, relative to `now_millis`.
#[must_use]
pub fn history_rows(entries: &[HistoryMatch], now_millis: i64) -> Vec<HistoryRow> {
    entries
        .iter()
        .map(|m| HistoryRow {
            position: m.index + 1,
            query: m.entry.query.to_string(),
            time_ago: m.entry.time_ago_from(now_millis),
            highlight_ranges: m.highlight_ranges.clone(),
        })
        .collect()
}

#[must_use]
pub fn detail_view(record: &DetailRecord) -> DetailView {
    let subtitle = [&record.year, &record.rated, &record.runtime]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" · ");

    let fields = [
        ("Director", &record.director),
        ("Writer", &record.writer),
        ("Cast", &record.actors),
        ("Language", &record.language),
        ("Country", &record.country),
        ("Box office", &record.box_office),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.as_ref().map(|v| (label, v.clone())))
    .collect();

    let mut ratings: Vec<(String, String)> = record
        .ratings
        .iter()
        .map(|r| (r.source.clone(), r.value.clone()))
        .collect();
    if let Some(imdb) = &record.imdb_rating {
        if record.rating_from("Internet Movie Database").is_none() {
            ratings.insert(0, ("IMDb".to_string(), format!("{imdb}/10")));
        }
    }

    DetailView {
        title: record.title.clone(),
        subtitle,
        genres: record.genres.clone(),
        plot: record.plot.clone(),
        fields,
        ratings,
    }
}
