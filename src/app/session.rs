//! Search session state machine.
//!
//! A [`SearchSession`] tracks one active query's pagination progress:
//!
//! ```text
//!              start_search              apply_page(Ok, more)
//!   Idle ─────────────────► Loading ─────────────────────────► Loaded
//!     ▲                       │  ▲                               │
//!     │                       │  └──────────── load_more ────────┘
//!     │                       ├── apply_page(Ok, last page) ──► Exhausted
//!     │                       ├── apply_page(NoMorePages) ────► Exhausted
//!     │                       └── apply_page(NoResults | Transport) ──► Failed
//!     └── (start_search is accepted from every state)
//! ```
//!
//! The session never performs I/O. Starting a search or loading more returns a
//! [`PageRequest`] tagged with a fresh [`RequestToken`]; the runtime executes it
//! and feeds the outcome back through [`SearchSession::apply_page`]. Only the
//! most recently issued token is accepted, so a response for a superseded query
//! can never overwrite newer state.

use crate::domain::{PageResult, Query, ResultItem, SearchError, ValidationError, PAGE_SIZE};

/// Monotonically increasing identifier attached to each issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mints [`RequestToken`]s, each strictly greater than the last.
#[derive(Debug, Default)]
pub struct TokenCounter {
    last: u64,
}

impl TokenCounter {
    pub fn mint(&mut self) -> RequestToken {
        self.last += 1;
        RequestToken(self.last)
    }
}

/// A page fetch the runtime should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub token: RequestToken,
    pub query: Query,
    pub page: u32,
}

/// Why the session entered [`SessionStatus::Failed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The service found nothing for the query.
    NoResults { message: String },
    /// Network, HTTP or decoding failure.
    Transport { detail: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Loading { page: u32 },
    Loaded,
    Exhausted,
    Failed(FailureKind),
}

impl SessionStatus {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading { .. } => "loading",
            Self::Loaded => "loaded",
            Self::Exhausted => "exhausted",
            Self::Failed(FailureKind::NoResults { .. }) => "no-results",
            Self::Failed(FailureKind::Transport { .. }) => "failed",
        }
    }
}

/// Result of feeding a completed fetch into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The token was not the latest in flight; nothing changed.
    Stale,
    /// Items were stored. `first_page` is true for the page-1 response of a new query.
    Applied {
        query: Query,
        page: u32,
        first_page: bool,
        added: usize,
    },
    /// A later page came back empty; the session is now exhausted.
    NoMorePages,
    /// The fetch failed; the session is now `Failed`.
    Failed(FailureKind),
}

/// Read-only copy of the session handed to presenters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub query: Option<Query>,
    pub current_page: u32,
    pub total_available: u64,
    pub items: Vec<ResultItem>,
    pub can_load_more: bool,
}

#[derive(Debug, Clone)]
struct InFlight {
    token: RequestToken,
    query: Query,
    page: u32,
}

/// Pagination state for the active query.
#[derive(Debug)]
pub struct SearchSession {
    active_query: Option<Query>,
    current_page: u32,
    total_available: u64,
    items: Vec<ResultItem>,
    status: SessionStatus,
    in_flight: Option<InFlight>,
    tokens: TokenCounter,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            active_query: None,
            current_page: 1,
            total_available: 0,
            items: Vec::new(),
            status: SessionStatus::Idle,
            in_flight: None,
            tokens: TokenCounter::default(),
        }
    }

    /// Begins a new search for `raw`, superseding any fetch still in flight.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for blank or too-short input. The session is
    /// left untouched in that case.
    pub fn start_search(&mut self, raw: &str) -> Result<PageRequest, ValidationError> {
        let query = Query::parse(raw)?;

        if let Some(previous) = &self.in_flight {
            tracing::debug!(
                superseded = %previous.token,
                superseded_query = %previous.query,
                "new search supersedes in-flight request"
            );
        }

        self.items.clear();
        self.current_page = 1;
        self.total_available = 0;
        self.active_query = Some(query.clone());
        Ok(self.issue(query, 1))
    }

    /// Requests the next page of the active query.
    ///
    /// Returns `None`, without touching state, unless the session is `Loaded`.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if self.status != SessionStatus::Loaded {
            tracing::debug!(status = self.status.label(), "load more ignored");
            return None;
        }

        let query = self.active_query.clone()?;
        self.current_page += 1;
        Some(self.issue(query, self.current_page))
    }

    /// Applies the outcome of the fetch identified by `token`.
    pub fn apply_page(
        &mut self,
        token: RequestToken,
        result: Result<PageResult, SearchError>,
    ) -> PageOutcome {
        if self.pending_token() != Some(token) {
            tracing::debug!(token = %token, "discarding stale page response");
            return PageOutcome::Stale;
        }
        let Some(InFlight { query, page, .. }) = self.in_flight.take() else {
            return PageOutcome::Stale;
        };

        match result {
            Ok(found) => {
                let added = found.items.len();
                if page == 1 {
                    self.items = found.items;
                } else {
                    self.items.extend(found.items);
                }
                self.total_available = found.total_available;
                self.status = if self.has_more_pages() {
                    SessionStatus::Loaded
                } else {
                    SessionStatus::Exhausted
                };

                tracing::debug!(
                    query = %query,
                    page,
                    added,
                    total = self.total_available,
                    status = self.status.label(),
                    "page applied"
                );

                PageOutcome::Applied {
                    query,
                    page,
                    first_page: page == 1,
                    added,
                }
            }
            Err(SearchError::NoMorePages) => self.exhaust(page),
            Err(SearchError::NoResults { .. }) if page > 1 => self.exhaust(page),
            Err(SearchError::NoResults { message }) => {
                self.fail(FailureKind::NoResults { message })
            }
            Err(SearchError::Transport { detail }) => self.fail(FailureKind::Transport { detail }),
            Err(SearchError::DetailNotFound { id }) => self.fail(FailureKind::Transport {
                detail: format!("unexpected detail response for {id}"),
            }),
        }
    }

    #[must_use]
    pub const fn status(&self) -> &SessionStatus {
        &self.status
    }

    #[must_use]
    pub const fn active_query(&self) -> Option<&Query> {
        self.active_query.as_ref()
    }

    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub const fn total_available(&self) -> u64 {
        self.total_available
    }

    #[must_use]
    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    /// True exactly when another page may be requested.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.status == SessionStatus::Loaded && self.has_more_pages()
    }

    /// Token of the fetch currently awaited, if any.
    #[must_use]
    pub fn pending_token(&self) -> Option<RequestToken> {
        self.in_flight.as_ref().map(|f| f.token)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status.clone(),
            query: self.active_query.clone(),
            current_page: self.current_page,
            total_available: self.total_available,
            items: self.items.clone(),
            can_load_more: self.can_load_more(),
        }
    }

    fn has_more_pages(&self) -> bool {
        u64::from(self.current_page) * PAGE_SIZE < self.total_available
    }

    fn issue(&mut self, query: Query, page: u32) -> PageRequest {
        let token = self.tokens.mint();
        self.status = SessionStatus::Loading { page };
        self.in_flight = Some(InFlight {
            token,
            query: query.clone(),
            page,
        });

        tracing::debug!(token = %token, query = %query, page, "page request issued");
        PageRequest { token, query, page }
    }

    fn exhaust(&mut self, page: u32) -> PageOutcome {
        tracing::debug!(page, kept = self.items.len(), "no more pages");
        self.status = SessionStatus::Exhausted;
        PageOutcome::NoMorePages
    }

    fn fail(&mut self, kind: FailureKind) -> PageOutcome {
        tracing::debug!(failure = ?kind, kept = self.items.len(), "search failed");
        self.status = SessionStatus::Failed(kind.clone());
        PageOutcome::Failed(kind)
    }
}
