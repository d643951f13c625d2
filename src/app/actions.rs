//! Side effects produced by the event handler.
//!
//! [`handle_event`](super::handle_event) never performs I/O itself. It returns a
//! `Vec<Action>` that the [`Runtime`](crate::runtime::Runtime) executes in order:
//! fetches are spawned as background tasks, notifications go to the presenter.
//!
//! # Example
//!
//! ```rust
//! use cinesearch::app::{Action, PresenterEvent};
//!
//! let actions = vec![Action::Notify(PresenterEvent::Help), Action::Quit];
//! assert_eq!(actions.len(), 2);
//! ```

use super::presenter::PresenterEvent;
use super::session::{PageRequest, RequestToken};

/// A detail lookup the runtime should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub token: RequestToken,
    pub id: String,
}

/// Commands executed by the runtime after an event is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fetch a page of search results and report back with `Event::PageLoaded`.
    FetchPage(PageRequest),

    /// Fetch a title's details and report back with `Event::DetailLoaded`.
    FetchDetail(DetailRequest),

    /// Deliver an event to the presenter.
    Notify(PresenterEvent),

    /// Stop the event loop.
    Quit,
}
