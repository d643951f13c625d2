//! Contract between the core and whatever displays it.
//!
//! The core emits [`PresenterEvent`]s; a [`Presenter`] implementation decides
//! how to render them. [`present`] routes each event to the matching callback.

use super::session::SessionSnapshot;
use crate::domain::{DetailRecord, ErrorKind};
use crate::storage::HistoryMatch;
use crate::ui::theme::ThemeMode;

/// Severity of a non-error notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
}

/// Events flowing from the core to the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    SessionStateChanged(SessionSnapshot),
    /// History entries to show, already filtered when a filter was given.
    HistoryChanged(Vec<HistoryMatch>),
    DetailReady(DetailRecord),
    DetailClosed,
    Error { kind: ErrorKind, message: String },
    Notice { level: NoticeLevel, message: String },
    ThemeChanged(ThemeMode),
    Help,
}

impl PresenterEvent {
    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Error {
            kind,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::Notice {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }
}

/// Receives state changes from the core.
///
/// Callbacks must not fail; rendering problems are the presenter's own concern.
pub trait Presenter {
    fn on_session_state_changed(&mut self, snapshot: &SessionSnapshot);

    fn on_history_changed(&mut self, entries: &[HistoryMatch]);

    fn on_detail_ready(&mut self, record: &DetailRecord);

    fn on_error(&mut self, kind: ErrorKind, message: &str);

    fn on_notice(&mut self, level: NoticeLevel, message: &str);

    fn on_theme_changed(&mut self, mode: ThemeMode);

    fn on_detail_closed(&mut self) {}

    fn on_help(&mut self) {}
}

/// Routes `event` to the matching [`Presenter`] callback.
pub fn present<P: Presenter + ?Sized>(presenter: &mut P, event: &PresenterEvent) {
    match event {
        PresenterEvent::SessionStateChanged(snapshot) => presenter.on_session_state_changed(snapshot),
        PresenterEvent::HistoryChanged(entries) => presenter.on_history_changed(entries),
        PresenterEvent::DetailReady(record) => presenter.on_detail_ready(record),
        PresenterEvent::DetailClosed => presenter.on_detail_closed(),
        PresenterEvent::Error { kind, message } => presenter.on_error(*kind, message),
        PresenterEvent::Notice { level, message } => presenter.on_notice(*level, message),
        PresenterEvent::ThemeChanged(mode) => presenter.on_theme_changed(*mode),
        PresenterEvent::Help => presenter.on_help(),
    }
}

/// Presenter that keeps every event it receives, for tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub events: Vec<PresenterEvent>,
}

impl RecordingPresenter {
    /// The most recent session snapshot, if any.
    #[must_use]
    pub fn last_snapshot(&self) -> Option<&SessionSnapshot> {
        self.events.iter().rev().find_map(|e| match e {
            PresenterEvent::SessionStateChanged(s) => Some(s),
            _ => None,
        })
    }

    /// Every error delivered so far.
    #[must_use]
    pub fn errors(&self) -> Vec<(ErrorKind, &str)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::Error { kind, message } => Some((*kind, message.as_str())),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn on_session_state_changed(&mut self, snapshot: &SessionSnapshot) {
        self.events
            .push(PresenterEvent::SessionStateChanged(snapshot.clone()));
    }

    fn on_history_changed(&mut self, entries: &[HistoryMatch]) {
        self.events.push(PresenterEvent::HistoryChanged(entries.to_vec()));
    }

    fn on_detail_ready(&mut self, record: &DetailRecord) {
        self.events.push(PresenterEvent::DetailReady(record.clone()));
    }

    fn on_error(&mut self, kind: ErrorKind, message: &str) {
        self.events.push(PresenterEvent::error(kind, message));
    }

    fn on_notice(&mut self, level: NoticeLevel, message: &str) {
        self.events.push(PresenterEvent::Notice {
            level,
            message: message.to_string(),
        });
    }

    fn on_theme_changed(&mut self, mode: ThemeMode) {
        self.events.push(PresenterEvent::ThemeChanged(mode));
    }

    fn on_detail_closed(&mut self) {
        self.events.push(PresenterEvent::DetailClosed);
    }

    fn on_help(&mut self) {
        self.events.push(PresenterEvent::Help);
    }
}
