//! Application layer coordinating state, events, and actions.
//!
//! Sits between the runtime and the domain/client/storage layers. Input lines
//! become [`Event`]s, the handler mutates [`AppState`] and emits [`Action`]s,
//! and the runtime executes them:
//!
//! ```text
//! Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                       ↑                                  ↓
//!                       └──────── Fetch completions ───────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`command`]: Parsing of input lines into events
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`presenter`]: Contract for whatever displays the application
//! - [`session`]: Search pagination state machine
//! - [`state`]: Central application state container

pub mod actions;
pub mod command;
pub mod handler;
pub mod presenter;
pub mod session;
pub mod state;

pub use actions::{Action, DetailRequest};
pub use command::{parse_command, CommandError};
pub use handler::{handle_event, Event, ResultRef};
pub use presenter::{present, NoticeLevel, Presenter, PresenterEvent, RecordingPresenter};
pub use session::{
    FailureKind, PageOutcome, PageRequest, RequestToken, SearchSession, SessionSnapshot,
    SessionStatus,
};
pub use state::AppState;
