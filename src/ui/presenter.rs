//! ANSI terminal implementation of [`Presenter`].
//!
//! Output is line-oriented so it can share the terminal with the input prompt:
//! every callback renders a block of text and writes it in one call. Write
//! failures are logged and otherwise ignored, since the core cannot act on
//! them.

use std::io::Write;

use crate::app::{NoticeLevel, Presenter, SessionSnapshot};
use crate::domain::{DetailRecord, ErrorKind};
use crate::storage::HistoryMatch;
use crate::ui::renderer;
use crate::ui::theme::{Theme, ThemeMode, ThemeSet};

const DEFAULT_WIDTH: usize = 80;
const MAX_WIDTH: usize = 120;

pub struct TerminalPresenter<W> {
    out: W,
    themes: ThemeSet,
    mode: ThemeMode,
    width: Option<usize>,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, themes: ThemeSet, mode: ThemeMode) -> Self {
        Self {
            out,
            themes,
            mode,
            width: None,
        }
    }

    /// Fixes the render width instead of querying the terminal.
    #[must_use]
    pub const fn with_width(mut self, cols: usize) -> Self {
        self.width = Some(cols);
        self
    }

    #[must_use]
    pub const fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn theme(&self) -> &Theme {
        self.themes.get(self.mode)
    }

    fn cols(&self) -> usize {
        self.width.unwrap_or_else(|| {
            terminal_size::terminal_size()
                .map_or(DEFAULT_WIDTH, |(terminal_size::Width(w), _)| usize::from(w))
                .min(MAX_WIDTH)
        })
    }

    /// Writes the prompt marker without a newline.
    pub fn prompt(&mut self) {
        let text = format!(
            "{}🎬 ›{} ",
            Theme::fg(&self.theme().colors.accent),
            Theme::reset()
        );
        self.emit(&text);
    }

    fn emit(&mut self, text: &str) {
        let result = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to write to terminal");
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn on_session_state_changed(&mut self, snapshot: &SessionSnapshot) {
        tracing::debug!(status = snapshot.status.label(), items = snapshot.items.len(), "presenting session");
        let text = renderer::render_session(snapshot, self.theme(), self.cols());
        self.emit(&text);
    }

    fn on_history_changed(&mut self, entries: &[HistoryMatch]) {
        // Cleared history is announced by the notice that follows.
        if entries.is_empty() {
            return;
        }
        let now = chrono::Utc::now().timestamp_millis();
        let text = renderer::render_history(entries, self.theme(), now);
        self.emit(&text);
    }

    fn on_detail_ready(&mut self, record: &DetailRecord) {
        let text = renderer::render_detail(record, self.theme(), self.cols());
        self.emit(&text);
    }

    fn on_error(&mut self, kind: ErrorKind, message: &str) {
        let text = renderer::render_error(kind, message, self.theme());
        self.emit(&text);
    }

    fn on_notice(&mut self, level: NoticeLevel, message: &str) {
        let text = renderer::render_notice(level, message, self.theme());
        self.emit(&text);
    }

    fn on_theme_changed(&mut self, mode: ThemeMode) {
        self.mode = mode;
        let text = renderer::render_notice(
            NoticeLevel::Info,
            &format!("Switched to {mode} theme"),
            self.theme(),
        );
        self.emit(&text);
    }

    fn on_detail_closed(&mut self) {
        let text = renderer::render_notice(NoticeLevel::Info, "Back to results", self.theme());
        self.emit(&text);
    }

    fn on_help(&mut self) {
        let text = renderer::render_help(self.theme());
        self.emit(&text);
    }
}
