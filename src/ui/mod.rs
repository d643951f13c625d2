//! Terminal presentation layer.
//!
//! Core state reaches the screen in three steps:
//!
//! ```text
//! PresenterEvent → TerminalPresenter → viewmodel → components → ANSI text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready views computed from core state
//! - [`renderer`]: Builds finished text for each kind of presenter event
//! - [`components`]: Composable component renderers
//! - [`helpers`]: Highlighting, truncation and number formatting
//! - [`theme`]: Light/dark palettes and ANSI escape generation
//! - [`presenter`]: [`TerminalPresenter`], the `Presenter` the binary uses

pub mod components;
pub mod helpers;
pub mod presenter;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use presenter::TerminalPresenter;
pub use renderer::{render_detail, render_help, render_history, render_session};
pub use theme::{Theme, ThemeMode, ThemeSet};
pub use viewmodel::{
    DetailView, DisplayItem, EmptyState, FooterInfo, HeaderInfo, HistoryRow, ResultsView,
};
