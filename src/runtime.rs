//! Event loop driving the application.
//!
//! The runtime owns [`AppState`] and processes one [`Event`] at a time. Fetch
//! actions are spawned as tokio tasks that only hold an `Arc<SearchClient>` and
//! an [`EventSender`]; when a fetch completes its result is posted back onto the
//! same channel as `PageLoaded` / `DetailLoaded`, so state is never touched off
//! the loop.
//!
//! ```text
//!  input task ──┐
//!               ├──► mpsc ──► Runtime::dispatch ──► handle_event ──► actions
//!  fetch tasks ─┘                                                     │
//!       ▲                                                             │
//!       └───────────────────── tokio::spawn ◄─────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::app::{
    handle_event, present, Action, AppState, DetailRequest, Event, PageRequest, Presenter,
};
use crate::client::{SearchClient, Transport};
use crate::domain::error::Result;

/// Handle for posting events into a running [`Runtime`].
pub type EventSender = mpsc::UnboundedSender<Event>;

pub struct Runtime<T, P> {
    state: AppState,
    client: Arc<SearchClient<T>>,
    presenter: P,
    sender: EventSender,
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl<T, P> Runtime<T, P>
where
    T: Transport + 'static,
    P: Presenter,
{
    pub fn new(state: AppState, client: SearchClient<T>, presenter: P) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            state,
            client: Arc::new(client),
            presenter,
            sender,
            receiver,
        }
    }

    /// A sender for input sources. Events are processed in arrival order.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        self.sender.clone()
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Handles `event` and executes the resulting actions in order.
    ///
    /// Must be called from within a tokio runtime, since fetches are spawned.
    /// Returns `false` once the application should stop.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn dispatch(&mut self, event: Event) -> Result<bool> {
        let span = tracing::debug_span!("dispatch", event_type = event.name());
        let _guard = span.enter();

        let actions = handle_event(&mut self.state, &event)?;

        for action in actions {
            match action {
                Action::FetchPage(request) => self.spawn_page_fetch(request),
                Action::FetchDetail(request) => self.spawn_detail_fetch(request),
                Action::Notify(presenter_event) => present(&mut self.presenter, &presenter_event),
                Action::Quit => {
                    tracing::debug!("quit requested");
                    return Ok(false);
                }
            }
        }

        Ok(true)
    }

    /// Waits for the next event and dispatches it.
    ///
    /// Returns `false` when the application should stop.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Runtime::dispatch`].
    pub async fn pump(&mut self) -> Result<bool> {
        match self.receiver.recv().await {
            Some(event) => self.dispatch(event),
            None => {
                tracing::debug!("event channel closed");
                Ok(false)
            }
        }
    }

    /// Processes events until quit is requested.
    ///
    /// # Errors
    ///
    /// Stops at the first error returned by [`Runtime::dispatch`].
    pub async fn run(&mut self) -> Result<()> {
        tracing::info!("event loop started");
        while self.pump().await? {}
        tracing::info!("event loop stopped");
        Ok(())
    }

    fn spawn_page_fetch(&self, request: PageRequest) {
        tracing::debug!(token = %request.token, page = request.page, "spawning page fetch");
        let client = Arc::clone(&self.client);
        let sender = self.sender.clone();

        tokio::spawn(async move {
            let result = client.search_page(&request.query, request.page).await;
            let event = Event::PageLoaded {
                token: request.token,
                result,
            };
            if sender.send(event).is_err() {
                tracing::debug!(token = %request.token, "runtime gone, dropping page result");
            }
        });
    }

    fn spawn_detail_fetch(&self, request: DetailRequest) {
        tracing::debug!(token = %request.token, id = %request.id, "spawning detail fetch");
        let client = Arc::clone(&self.client);
        let sender = self.sender.clone();

        tokio::spawn(async move {
            let result = client.fetch_detail(&request.id).await;
            let event = Event::DetailLoaded {
                token: request.token,
                result,
            };
            if sender.send(event).is_err() {
                tracing::debug!(token = %request.token, "runtime gone, dropping detail result");
            }
        });
    }
}
