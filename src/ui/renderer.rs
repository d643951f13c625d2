//! Top-level rendering coordinator.
//!
//! Turns core data into finished ANSI text: compute the view model, then hand
//! it to the components. Nothing here writes to the terminal.
//!
//! # Example
//!
//! ```rust
//! use cinesearch::app::SearchSession;
//! use cinesearch::ui::{render_session, Theme};
//!
//! let session = SearchSession::new();
//! let text = render_session(&session.snapshot(), &Theme::default(), 80);
//! assert!(text.contains("Search for a movie"));
//! ```

use crate::app::{NoticeLevel, SessionSnapshot};
use crate::domain::{DetailRecord, ErrorKind};
use crate::storage::HistoryMatch;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{detail_view, history_rows, results_view};

const HELP_LINES: &[(&str, &str)] = &[
    ("<text>", "search for movies (at least 2 characters)"),
    (":more, :m", "load the next page of results"),
    (":open N|ID, :o", "show details for result N or a title id"),
    (":back, :b", "close the detail view"),
    (":history [filter], :h", "list recent searches, optionally fuzzy-filtered"),
    (":recall N, :r", "run recent search N again"),
    (":clear", "forget recent searches"),
    (":theme, :t", "switch between light and dark"),
    (":help, :?", "show this help"),
    (":quit, :q", "exit"),
];

#[must_use]
pub fn render_session(snapshot: &SessionSnapshot, theme: &Theme, cols: usize) -> String {
    let mut out = String::new();
    components::render_results_screen(&mut out, &results_view(snapshot), theme, cols);
    out
}

#[must_use]
pub fn render_history(entries: &[HistoryMatch], theme: &Theme, now_millis: i64) -> String {
    let mut out = String::new();
    components::render_history(&mut out, &history_rows(entries, now_millis), theme);
    out
}

#[must_use]
pub fn render_detail(record: &DetailRecord, theme: &Theme, cols: usize) -> String {
    let mut out = String::new();
    components::render_detail_screen(&mut out, &detail_view(record), theme, cols);
    out
}

/// A single coloured line for errors.
#[must_use]
pub fn render_error(kind: ErrorKind, message: &str, theme: &Theme) -> String {
    let prefix = match kind {
        ErrorKind::Validation => "!",
        _ => "✗",
    };
    format!(
        "{}{prefix} {message}{}\n",
        Theme::fg(&theme.colors.error_fg),
        Theme::reset()
    )
}

/// A single coloured line for notices.
#[must_use]
pub fn render_notice(level: NoticeLevel, message: &str, theme: &Theme) -> String {
    let (colour, prefix) = match level {
        NoticeLevel::Info => (&theme.colors.info_fg, "ℹ"),
        NoticeLevel::Success => (&theme.colors.success_fg, "✓"),
    };
    format!("{}{prefix} {message}{}\n", Theme::fg(colour), Theme::reset())
}

#[must_use]
pub fn render_help(theme: &Theme) -> String {
    let width = HELP_LINES.iter().map(|(cmd, _)| cmd.len()).max().unwrap_or(0) + 2;
    let mut out = String::new();

    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str("Commands\n");
    out.push_str(Theme::reset());

    for (command, description) in HELP_LINES {
        out.push_str(&Theme::fg(&theme.colors.accent));
        out.push_str(&format!("  {command:<width$}"));
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        out.push_str(description);
        out.push_str(Theme::reset());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SessionStatus;
    use crate::domain::{MediaType, Query, ResultItem};

    #[test]
    fn loaded_session_renders_summary_and_rows() {
        let snapshot = SessionSnapshot {
            status: SessionStatus::Loaded,
            query: Some(Query::parse("star wars").unwrap()),
            current_page: 1,
            total_available: 1234,
            items: vec![ResultItem {
                id: "tt0076759".into(),
                title: "Star Wars".into(),
                year: "1977".into(),
                poster_url: None,
                media_type: MediaType::Movie,
            }],
            can_load_more: true,
        };

        let text = render_session(&snapshot, &Theme::default(), 80);
        assert!(text.contains("Found 1,234 results"));
        assert!(text.contains("Star Wars"));
        assert!(text.contains("\"star wars\""));
        assert!(text.contains(":more"));
    }

    #[test]
    fn notices_and_errors_carry_their_message() {
        let theme = Theme::default();
        assert!(render_error(ErrorKind::Transport, "boom", &theme).contains("✗ boom"));
        assert!(render_notice(NoticeLevel::Success, "Search history cleared", &theme)
            .contains("✓ Search history cleared"));
    }

    #[test]
    fn help_lists_every_command() {
        let text = render_help(&Theme::default());
        for (command, _) in HELP_LINES {
            assert!(text.contains(command));
        }
    }
}
