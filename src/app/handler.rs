//! Event handling and state transition logic.
//!
//! User commands and fetch completions both arrive as [`Event`]s. The handler
//! mutates [`AppState`] and returns the [`Action`]s the runtime should perform.
//!
//! ```text
//! stdin ─► Event ─► handle_event ─► AppState mutations ─► Vec<Action>
//!                        ▲                                     │
//!                        └──── PageLoaded / DetailLoaded ◄─────┘ (spawned fetches)
//! ```
//!
//! # Example
//!
//! ```rust
//! use cinesearch::app::{handle_event, Action, AppState, Event};
//! use cinesearch::storage::{shared, HistoryStore, MemoryStorage, ThemePreference};
//! use cinesearch::ui::ThemeMode;
//!
//! let storage = shared(MemoryStorage::default());
//! let mut state = AppState::new(
//!     HistoryStore::open(storage.clone()),
//!     ThemePreference::new(storage),
//!     ThemeMode::Light,
//! );
//!
//! let actions = handle_event(&mut state, &Event::SubmitSearch("alien".into()))?;
//! assert!(actions.iter().any(|a| matches!(a, Action::FetchPage(_))));
//! # Ok::<(), cinesearch::CinesearchError>(())
//! ```

use super::actions::Action;
use super::presenter::PresenterEvent;
use super::session::{FailureKind, PageOutcome, RequestToken};
use super::state::AppState;
use crate::domain::error::Result;
use crate::domain::{DetailRecord, ErrorKind, PageResult, SearchError};

/// Error text the service uses when a search matches nothing.
const SERVICE_NOT_FOUND: &str = "Movie not found!";

const TRANSPORT_MESSAGE: &str =
    "Failed to fetch movies. Please check your connection and try again.";
const DETAIL_FAILED_MESSAGE: &str = "Failed to load movie details";
const NO_MORE_RESULTS_MESSAGE: &str = "No more results available";
const HISTORY_CLEARED_MESSAGE: &str = "Search history cleared";

/// How the user refers to a search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultRef {
    /// 1-based position in the accumulated result list.
    Index(usize),
    /// Service identifier, e.g. `tt0133093`.
    Id(String),
}

/// User commands and completions of background fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Start a new search with the raw input text.
    SubmitSearch(String),
    /// Fetch the next page of the active search.
    LoadMore,
    /// Open the details of a result.
    SelectResult(ResultRef),
    /// List recent searches, fuzzy-filtered when `filter` is non-empty.
    ShowHistory { filter: String },
    /// Re-run the n-th (1-based) recent search.
    RecallHistory(usize),
    ClearHistory,
    ToggleTheme,
    CloseDetail,
    Help,
    Quit,
    /// An input line that could not be parsed; reported as a validation error.
    CommandRejected(String),

    /// A page fetch finished.
    PageLoaded {
        token: RequestToken,
        result: std::result::Result<PageResult, SearchError>,
    },
    /// A detail fetch finished.
    DetailLoaded {
        token: RequestToken,
        result: std::result::Result<DetailRecord, SearchError>,
    },
}

impl Event {
    /// Short name for span fields; avoids logging whole result payloads.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SubmitSearch(_) => "submit_search",
            Self::LoadMore => "load_more",
            Self::SelectResult(_) => "select_result",
            Self::ShowHistory { .. } => "show_history",
            Self::RecallHistory(_) => "recall_history",
            Self::ClearHistory => "clear_history",
            Self::ToggleTheme => "toggle_theme",
            Self::CloseDetail => "close_detail",
            Self::Help => "help",
            Self::Quit => "quit",
            Self::CommandRejected(_) => "command_rejected",
            Self::PageLoaded { .. } => "page_loaded",
            Self::DetailLoaded { .. } => "detail_loaded",
        }
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Every failure the core knows about becomes a presenter event; the `Result`
/// is reserved for infrastructure problems.
///
/// # Errors
///
/// Currently infallible for all events; the signature leaves room for handlers
/// that touch fallible infrastructure.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<Vec<Action>> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    let actions = match event {
        Event::SubmitSearch(raw) => submit_search(state, raw),
        Event::LoadMore => load_more(state),
        Event::PageLoaded { token, result } => page_loaded(state, *token, result.clone()),
        Event::SelectResult(reference) => select_result(state, reference),
        Event::DetailLoaded { token, result } => detail_loaded(state, *token, result),
        Event::ShowHistory { filter } => show_history(state, filter),
        Event::RecallHistory(position) => recall_history(state, *position),
        Event::ClearHistory => {
            state.history.clear();
            vec![
                Action::Notify(PresenterEvent::HistoryChanged(Vec::new())),
                Action::Notify(PresenterEvent::success(HISTORY_CLEARED_MESSAGE)),
            ]
        }
        Event::ToggleTheme => {
            let mode = state.toggle_theme();
            tracing::debug!(mode = %mode, "theme toggled");
            vec![Action::Notify(PresenterEvent::ThemeChanged(mode))]
        }
        Event::CloseDetail => {
            if state.close_detail() {
                vec![Action::Notify(PresenterEvent::DetailClosed)]
            } else {
                vec![]
            }
        }
        Event::Help => vec![Action::Notify(PresenterEvent::Help)],
        Event::Quit => vec![Action::Quit],
        Event::CommandRejected(message) => vec![Action::Notify(PresenterEvent::error(
            ErrorKind::Validation,
            message.clone(),
        ))],
    };

    tracing::debug!(action_count = actions.len(), "event handled");
    Ok(actions)
}

fn snapshot(state: &AppState) -> Action {
    Action::Notify(PresenterEvent::SessionStateChanged(state.session.snapshot()))
}

fn submit_search(state: &mut AppState, raw: &str) -> Vec<Action> {
    match state.session.start_search(raw) {
        Ok(request) => {
            state.close_detail();
            vec![snapshot(state), Action::FetchPage(request)]
        }
        Err(e) => {
            tracing::debug!(error = %e, "search rejected");
            vec![Action::Notify(PresenterEvent::error(
                ErrorKind::Validation,
                e.to_string(),
            ))]
        }
    }
}

fn load_more(state: &mut AppState) -> Vec<Action> {
    if let Some(request) = state.session.load_more() {
        return vec![snapshot(state), Action::FetchPage(request)];
    }

    if *state.session.status() == super::session::SessionStatus::Exhausted {
        vec![Action::Notify(PresenterEvent::info(NO_MORE_RESULTS_MESSAGE))]
    } else {
        vec![]
    }
}

fn page_loaded(
    state: &mut AppState,
    token: RequestToken,
    result: std::result::Result<PageResult, SearchError>,
) -> Vec<Action> {
    match state.session.apply_page(token, result) {
        PageOutcome::Stale => vec![],
        PageOutcome::Applied {
            query, first_page, ..
        } => {
            let mut actions = vec![snapshot(state)];
            if first_page {
                state.history.record(&query);
                actions.push(Action::Notify(PresenterEvent::HistoryChanged(
                    state.history.matching(""),
                )));
            }
            actions
        }
        PageOutcome::NoMorePages => vec![
            snapshot(state),
            Action::Notify(PresenterEvent::info(NO_MORE_RESULTS_MESSAGE)),
        ],
        PageOutcome::Failed(FailureKind::NoResults { message }) => {
            let query = state
                .session
                .active_query()
                .map(ToString::to_string)
                .unwrap_or_default();
            vec![
                snapshot(state),
                Action::Notify(PresenterEvent::error(
                    ErrorKind::NoResults,
                    no_results_message(&query, &message),
                )),
            ]
        }
        PageOutcome::Failed(FailureKind::Transport { detail }) => {
            tracing::warn!(detail = %detail, "search request failed");
            vec![
                snapshot(state),
                Action::Notify(PresenterEvent::error(ErrorKind::Transport, TRANSPORT_MESSAGE)),
            ]
        }
    }
}

/// Tailors the service's "not found" text into a friendlier sentence.
fn no_results_message(query: &str, service_message: &str) -> String {
    if service_message == SERVICE_NOT_FOUND {
        format!(
            "We couldn't find any movies matching \"{query}\". Try different keywords or check your spelling."
        )
    } else {
        service_message.to_string()
    }
}

fn select_result(state: &mut AppState, reference: &ResultRef) -> Vec<Action> {
    let id = match reference {
        ResultRef::Index(position) => position
            .checked_sub(1)
            .and_then(|i| state.session.items().get(i))
            .map(|item| item.id.clone()),
        ResultRef::Id(id) => Some(id.trim().to_string()).filter(|id| !id.is_empty()),
    };

    match id {
        Some(id) => vec![Action::FetchDetail(state.request_detail(id))],
        None => {
            let message = match reference {
                ResultRef::Index(position) => format!(
                    "There is no result #{position} ({} shown)",
                    state.session.items().len()
                ),
                ResultRef::Id(_) => "Enter a result number or title id".to_string(),
            };
            vec![Action::Notify(PresenterEvent::error(ErrorKind::Validation, message))]
        }
    }
}

fn detail_loaded(
    state: &mut AppState,
    token: RequestToken,
    result: &std::result::Result<DetailRecord, SearchError>,
) -> Vec<Action> {
    if !state.accept_detail(token) {
        tracing::debug!(token = %token, "discarding stale detail response");
        return vec![];
    }

    match result {
        Ok(record) => {
            state.show_detail(record.id.clone());
            vec![Action::Notify(PresenterEvent::DetailReady(record.clone()))]
        }
        Err(e) => {
            tracing::warn!(error = %e, "detail request failed");
            let kind = if matches!(e, SearchError::DetailNotFound { .. }) {
                ErrorKind::DetailNotFound
            } else {
                ErrorKind::Transport
            };
            vec![Action::Notify(PresenterEvent::error(kind, DETAIL_FAILED_MESSAGE))]
        }
    }
}

fn show_history(state: &AppState, filter: &str) -> Vec<Action> {
    if state.history.is_empty() {
        return vec![Action::Notify(PresenterEvent::info("No recent searches yet"))];
    }

    let matches = state.history.matching(filter);
    if matches.is_empty() {
        return vec![Action::Notify(PresenterEvent::info(format!(
            "No recent searches match \"{}\"",
            filter.trim()
        )))];
    }

    vec![Action::Notify(PresenterEvent::HistoryChanged(matches))]
}

fn recall_history(state: &mut AppState, position: usize) -> Vec<Action> {
    let query = position
        .checked_sub(1)
        .and_then(|i| state.history.get(i))
        .map(|entry| entry.query.to_string());

    match query {
        Some(query) => {
            tracing::debug!(position, query = %query, "recalling history entry");
            submit_search(state, &query)
        }
        None => vec![Action::Notify(PresenterEvent::error(
            ErrorKind::Validation,
            format!("There is no recent search #{position}"),
        ))],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::presenter::NoticeLevel;
    use crate::app::session::{PageRequest, SessionStatus};
    use crate::domain::{MediaType, ResultItem};
    use crate::storage::{shared, HistoryStore, MemoryStorage, ThemePreference};
    use crate::ui::theme::ThemeMode;

    fn new_state() -> AppState {
        let storage = shared(MemoryStorage::default());
        AppState::new(
            HistoryStore::open(storage.clone()),
            ThemePreference::new(storage),
            ThemeMode::Dark,
        )
    }

    fn fetch_page(actions: &[Action]) -> PageRequest {
        actions
            .iter()
            .find_map(|a| match a {
                Action::FetchPage(request) => Some(request.clone()),
                _ => None,
            })
            .expect("expected a page fetch")
    }

    fn errors(actions: &[Action]) -> Vec<(ErrorKind, String)> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::Notify(PresenterEvent::Error { kind, message }) => {
                    Some((*kind, message.clone()))
                }
                _ => None,
            })
            .collect()
    }

    fn result_page(count: usize, total: u64) -> std::result::Result<PageResult, SearchError> {
        Ok(PageResult {
            items: (0..count)
                .map(|i| ResultItem {
                    id: format!("tt{i}"),
                    title: format!("Film {i}"),
                    year: "1990".into(),
                    poster_url: None,
                    media_type: MediaType::Movie,
                })
                .collect(),
            total_available: total,
        })
    }

    fn history_queries(state: &AppState) -> Vec<String> {
        state
            .history
            .entries()
            .iter()
            .map(|e| e.query.to_string())
            .collect()
    }

    #[test]
    fn invalid_query_reports_validation_error_without_fetch() {
        let mut state = new_state();
        let actions = handle_event(&mut state, &Event::SubmitSearch(" a ".into())).unwrap();

        assert_eq!(
            errors(&actions),
            vec![(
                ErrorKind::Validation,
                "Search term must be at least 2 characters".to_string()
            )]
        );
        assert!(!actions.iter().any(|a| matches!(a, Action::FetchPage(_))));
        assert_eq!(state.session.status(), &SessionStatus::Idle);
    }

    #[test]
    fn history_is_recorded_only_after_first_page_succeeds() {
        let mut state = new_state();
        let actions = handle_event(&mut state, &Event::SubmitSearch("batman".into())).unwrap();
        let request = fetch_page(&actions);
        assert!(history_queries(&state).is_empty());

        let actions = handle_event(
            &mut state,
            &Event::PageLoaded {
                token: request.token,
                result: result_page(10, 25),
            },
        )
        .unwrap();

        assert_eq!(history_queries(&state), ["batman"]);
        assert!(actions
            .iter()
            .any(|a| matches!(a, Action::Notify(PresenterEvent::HistoryChanged(h)) if h.len() == 1)));

        let actions = handle_event(&mut state, &Event::LoadMore).unwrap();
        let second = fetch_page(&actions);
        handle_event(
            &mut state,
            &Event::PageLoaded {
                token: second.token,
                result: result_page(10, 25),
            },
        )
        .unwrap();
        assert_eq!(history_queries(&state), ["batman"]);
    }

    #[test]
    fn failed_searches_do_not_enter_history() {
        let mut state = new_state();
        let actions = handle_event(&mut state, &Event::SubmitSearch("zzqqxx".into())).unwrap();
        let request = fetch_page(&actions);

        let actions = handle_event(
            &mut state,
            &Event::PageLoaded {
                token: request.token,
                result: Err(SearchError::NoResults {
                    message: SERVICE_NOT_FOUND.into(),
                }),
            },
        )
        .unwrap();

        assert!(history_queries(&state).is_empty());
        assert_eq!(
            errors(&actions),
            vec![(
                ErrorKind::NoResults,
                "We couldn't find any movies matching \"zzqqxx\". Try different keywords or check your spelling."
                    .to_string()
            )]
        );
    }

    #[test]
    fn transport_failure_uses_connection_message() {
        let mut state = new_state();
        let request = fetch_page(&handle_event(&mut state, &Event::SubmitSearch("heat".into())).unwrap());

        let actions = handle_event(
            &mut state,
            &Event::PageLoaded {
                token: request.token,
                result: Err(SearchError::transport("connection refused")),
            },
        )
        .unwrap();

        assert_eq!(
            errors(&actions),
            vec![(ErrorKind::Transport, TRANSPORT_MESSAGE.to_string())]
        );
    }

    #[test]
    fn stale_page_produces_no_actions() {
        let mut state = new_state();
        let cat = fetch_page(&handle_event(&mut state, &Event::SubmitSearch("cat".into())).unwrap());
        let dog = fetch_page(&handle_event(&mut state, &Event::SubmitSearch("dog".into())).unwrap());

        let actions = handle_event(
            &mut state,
            &Event::PageLoaded {
                token: cat.token,
                result: result_page(10, 40),
            },
        )
        .unwrap();
        assert!(actions.is_empty());
        assert!(history_queries(&state).is_empty());

        handle_event(
            &mut state,
            &Event::PageLoaded {
                token: dog.token,
                result: result_page(3, 3),
            },
        )
        .unwrap();
        assert_eq!(history_queries(&state), ["dog"]);
    }

    #[test]
    fn load_more_when_exhausted_is_informational() {
        let mut state = new_state();
        let request = fetch_page(&handle_event(&mut state, &Event::SubmitSearch("jaws".into())).unwrap());
        handle_event(
            &mut state,
            &Event::PageLoaded {
                token: request.token,
                result: result_page(4, 4),
            },
        )
        .unwrap();

        let actions = handle_event(&mut state, &Event::LoadMore).unwrap();
        assert_eq!(
            actions,
            vec![Action::Notify(PresenterEvent::Notice {
                level: NoticeLevel::Info,
                message: NO_MORE_RESULTS_MESSAGE.to_string(),
            })]
        );
    }

    #[test]
    fn load_more_when_idle_does_nothing() {
        let mut state = new_state();
        assert!(handle_event(&mut state, &Event::LoadMore).unwrap().is_empty());
    }

    #[test]
    fn selecting_by_index_fetches_detail_and_latest_wins() {
        let mut state = new_state();
        let request = fetch_page(&handle_event(&mut state, &Event::SubmitSearch("film".into())).unwrap());
        handle_event(
            &mut state,
            &Event::PageLoaded {
                token: request.token,
                result: result_page(5, 5),
            },
        )
        .unwrap();

        let first = handle_event(&mut state, &Event::SelectResult(ResultRef::Index(2))).unwrap();
        let Action::FetchDetail(first) = &first[0] else {
            panic!("expected detail fetch");
        };
        assert_eq!(first.id, "tt1");

        let second = handle_event(&mut state, &Event::SelectResult(ResultRef::Id("tt4".into()))).unwrap();
        let Action::FetchDetail(second) = &second[0] else {
            panic!("expected detail fetch");
        };

        let record = |id: &str| DetailRecord {
            id: id.to_string(),
            title: "Film".into(),
            year: None,
            rated: None,
            runtime: None,
            genres: vec![],
            director: None,
            writer: None,
            actors: None,
            plot: None,
            language: None,
            country: None,
            box_office: None,
            poster_url: None,
            imdb_rating: None,
            ratings: vec![],
        };

        let stale = handle_event(
            &mut state,
            &Event::DetailLoaded {
                token: first.token,
                result: Ok(record("tt1")),
            },
        )
        .unwrap();
        assert!(stale.is_empty());

        let fresh = handle_event(
            &mut state,
            &Event::DetailLoaded {
                token: second.token,
                result: Ok(record("tt4")),
            },
        )
        .unwrap();
        assert!(matches!(&fresh[0], Action::Notify(PresenterEvent::DetailReady(r)) if r.id == "tt4"));
        assert_eq!(state.open_detail(), Some("tt4"));

        let closed = handle_event(&mut state, &Event::CloseDetail).unwrap();
        assert_eq!(closed, vec![Action::Notify(PresenterEvent::DetailClosed)]);
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let mut state = new_state();
        for reference in [ResultRef::Index(0), ResultRef::Index(3), ResultRef::Id("  ".into())] {
            let actions = handle_event(&mut state, &Event::SelectResult(reference)).unwrap();
            assert_eq!(errors(&actions).len(), 1);
            assert_eq!(errors(&actions)[0].0, ErrorKind::Validation);
        }
    }

    #[test]
    fn detail_not_found_is_reported() {
        let mut state = new_state();
        let actions = handle_event(&mut state, &Event::SelectResult(ResultRef::Id("tt000".into()))).unwrap();
        let Action::FetchDetail(request) = &actions[0] else {
            panic!("expected detail fetch");
        };

        let actions = handle_event(
            &mut state,
            &Event::DetailLoaded {
                token: request.token,
                result: Err(SearchError::DetailNotFound { id: "tt000".into() }),
            },
        )
        .unwrap();
        assert_eq!(
            errors(&actions),
            vec![(ErrorKind::DetailNotFound, DETAIL_FAILED_MESSAGE.to_string())]
        );
    }

    #[test]
    fn recall_reruns_stored_query() {
        let mut state = new_state();
        for raw in ["alien", "heat"] {
            let request = fetch_page(&handle_event(&mut state, &Event::SubmitSearch(raw.into())).unwrap());
            handle_event(
                &mut state,
                &Event::PageLoaded {
                    token: request.token,
                    result: result_page(1, 1),
                },
            )
            .unwrap();
        }

        let actions = handle_event(&mut state, &Event::RecallHistory(2)).unwrap();
        assert_eq!(fetch_page(&actions).query.as_str(), "alien");

        let actions = handle_event(&mut state, &Event::RecallHistory(9)).unwrap();
        assert_eq!(errors(&actions)[0].0, ErrorKind::Validation);
    }

    #[test]
    fn clear_history_notifies_and_empties() {
        let mut state = new_state();
        let request = fetch_page(&handle_event(&mut state, &Event::SubmitSearch("rocky".into())).unwrap());
        handle_event(
            &mut state,
            &Event::PageLoaded {
                token: request.token,
                result: result_page(1, 1),
            },
        )
        .unwrap();

        let actions = handle_event(&mut state, &Event::ClearHistory).unwrap();
        assert!(state.history.is_empty());
        assert_eq!(
            actions,
            vec![
                Action::Notify(PresenterEvent::HistoryChanged(vec![])),
                Action::Notify(PresenterEvent::success(HISTORY_CLEARED_MESSAGE)),
            ]
        );

        let actions = handle_event(&mut state, &Event::ShowHistory { filter: String::new() }).unwrap();
        assert_eq!(actions, vec![Action::Notify(PresenterEvent::info("No recent searches yet"))]);
    }

    #[test]
    fn toggle_theme_flips_and_notifies() {
        let mut state = new_state();
        let actions = handle_event(&mut state, &Event::ToggleTheme).unwrap();
        assert_eq!(actions, vec![Action::Notify(PresenterEvent::ThemeChanged(ThemeMode::Light))]);
        assert_eq!(state.theme_mode(), ThemeMode::Light);
    }

    #[test]
    fn rejected_commands_surface_as_validation_errors() {
        let mut state = new_state();
        let actions =
            handle_event(&mut state, &Event::CommandRejected("Unknown command \":x\"".into())).unwrap();
        assert_eq!(errors(&actions), vec![(ErrorKind::Validation, "Unknown command \":x\"".to_string())]);
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut state = new_state();
        assert_eq!(handle_event(&mut state, &Event::Quit).unwrap(), vec![Action::Quit]);
    }
}
