//! Application state container.
//!
//! [`AppState`] is built once at startup from injected collaborators and passed
//! by `&mut` to the event handler. It owns the search session, the history
//! store, the theme preference and the bookkeeping for detail lookups. There is
//! no global instance.
//!
//! # Example
//!
//! ```rust
//! use cinesearch::app::AppState;
//! use cinesearch::storage::{shared, HistoryStore, MemoryStorage, ThemePreference};
//! use cinesearch::ui::ThemeMode;
//!
//! let storage = shared(MemoryStorage::default());
//! let state = AppState::new(
//!     HistoryStore::open(storage.clone()),
//!     ThemePreference::new(storage),
//!     ThemeMode::Dark,
//! );
//! assert!(state.session.items().is_empty());
//! ```

use super::actions::DetailRequest;
use super::session::{RequestToken, SearchSession, TokenCounter};
use crate::storage::{HistoryStore, ThemePreference};
use crate::ui::theme::ThemeMode;

/// Central application state.
#[derive(Debug)]
pub struct AppState {
    /// Pagination state for the active query.
    pub session: SearchSession,

    /// Recent queries, persisted.
    pub history: HistoryStore,

    theme_preference: ThemePreference,
    theme_mode: ThemeMode,

    detail_tokens: TokenCounter,

    /// Latest detail lookup still awaited. Older responses are dropped.
    pending_detail: Option<RequestToken>,

    /// Identifier of the title whose details are on screen.
    open_detail: Option<String>,
}

impl AppState {
    #[must_use]
    pub fn new(history: HistoryStore, theme_preference: ThemePreference, theme_mode: ThemeMode) -> Self {
        Self {
            session: SearchSession::new(),
            history,
            theme_preference,
            theme_mode,
            detail_tokens: TokenCounter::default(),
            pending_detail: None,
            open_detail: None,
        }
    }

    #[must_use]
    pub const fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    /// Flips between light and dark and persists the choice.
    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme_mode = self.theme_mode.toggled();
        self.theme_preference.save(self.theme_mode);
        self.theme_mode
    }

    /// Issues a detail lookup for `id`, superseding any earlier one.
    pub fn request_detail(&mut self, id: String) -> DetailRequest {
        let token = self.detail_tokens.mint();
        self.pending_detail = Some(token);
        tracing::debug!(token = %token, id = %id, "detail request issued");
        DetailRequest { token, id }
    }

    /// Consumes the pending detail token if `token` is it.
    ///
    /// Returns `false` for stale or unexpected responses.
    pub fn accept_detail(&mut self, token: RequestToken) -> bool {
        if self.pending_detail == Some(token) {
            self.pending_detail = None;
            true
        } else {
            false
        }
    }

    pub fn show_detail(&mut self, id: String) {
        self.open_detail = Some(id);
    }

    /// Closes the detail view and abandons any pending lookup.
    pub fn close_detail(&mut self) -> bool {
        self.pending_detail = None;
        self.open_detail.take().is_some()
    }

    #[must_use]
    pub fn open_detail(&self) -> Option<&str> {
        self.open_detail.as_deref()
    }
}
