//! Cinesearch: a terminal client for searching a movie database.
//!
//! Cinesearch provides:
//! - Paginated keyword search against an OMDb-compatible service
//! - Title details with ratings
//! - Persistent, fuzzy-filterable history of the last ten searches
//! - Light and dark palettes with a persisted preference
//! - OpenTelemetry traces written to a local OTLP JSON file

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Binary (main.rs): config, stdin reader, runtime    │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime.rs)                               │  ← Event loop
//! │  - Event channel                                    │
//! │  - Spawned fetch tasks                              │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Search session and request tokens                │
//! │  - Event handling, actions, presenter contract      │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Client Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (client/)     │
//! │ - Presenter   │   │ - JSON file   │   │ - HTTP        │
//! │ - Theming     │   │ - History     │   │ - OMDb wire   │
//! │ - Components  │   │ - Preferences │   │   format      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Query, results, details, errors (domain/)        │
//! │  - Platform paths (infrastructure/)                 │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! Read from `$CINESEARCH_CONFIG` or `<config_dir>/cinesearch/config.toml`:
//!
//! ```toml
//! api_key = "your-omdb-key"
//! base_url = "https://www.omdbapi.com/"
//! data_dir = "~/.local/share/cinesearch"
//! theme = "dark"
//! theme_file = "~/.config/cinesearch/midnight.toml"
//! trace_level = "debug"
//! request_timeout_secs = 15
//! ```
//!
//! Environment variables override the file: `OMDB_API_KEY`,
//! `CINESEARCH_BASE_URL`, `CINESEARCH_DATA_DIR`, `CINESEARCH_THEME`,
//! `CINESEARCH_TRACE_LEVEL`.
//!
//! # Example
//!
//! ```rust
//! use cinesearch::{handle_event, initialize, Action, Config, Event};
//! use cinesearch::storage::{shared, MemoryStorage};
//!
//! let config = Config::default();
//! let mut state = initialize(&config, shared(MemoryStorage::default()));
//!
//! let actions = handle_event(&mut state, &Event::SubmitSearch("blade runner".into()))?;
//! assert!(actions.iter().any(|a| matches!(a, Action::FetchPage(_))));
//! # Ok::<(), cinesearch::CinesearchError>(())
//! ```

pub mod app;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod runtime;
pub mod storage;
pub mod ui;

pub mod observability;

pub use app::{handle_event, parse_command, Action, AppState, Event, Presenter};
pub use domain::{CinesearchError, Result};
pub use runtime::{EventSender, Runtime};
pub use ui::{Theme, ThemeMode, ThemeSet};

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use client::{ReqwestTransport, SearchClient, DEFAULT_BASE_URL};
use storage::{HistoryStore, SharedStorage, ThemePreference};

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Application configuration.
///
/// Every field has a default, so an empty or missing file is valid. Only the
/// API key has no usable default; [`build_client`] refuses to start without it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Key sent as `apikey` with every request.
    pub api_key: Option<String>,

    /// Service endpoint. Default: `https://www.omdbapi.com/`
    pub base_url: String,

    /// Holds `cinesearch.json` (history, theme) and the trace file.
    pub data_dir: PathBuf,

    /// Initial theme when no preference has been saved yet.
    pub theme: Option<ThemeMode>,

    /// Custom TOML palette. See [`ui::theme`] for the format.
    pub theme_file: Option<PathBuf>,

    /// `EnvFilter` directive for traces, e.g. `"debug"`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Per-request timeout in seconds; `0` disables it.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: infrastructure::default_data_dir(),
            theme: None,
            theme_file: None,
            trace_level: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Parses TOML, ignoring unknown keys and expanding `~` in paths.
    ///
    /// # Errors
    ///
    /// Returns [`CinesearchError::Config`] for invalid TOML or mistyped values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cinesearch::{Config, ThemeMode};
    ///
    /// let config = Config::from_toml_str("theme = \"dark\"\nrequest_timeout_secs = 5")?;
    /// assert_eq!(config.theme, Some(ThemeMode::Dark));
    /// assert_eq!(config.request_timeout_secs, 5);
    /// # Ok::<(), cinesearch::CinesearchError>(())
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| CinesearchError::Config(e.to_string()))?;
        Ok(config.expand_paths())
    }

    /// Reads `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CinesearchError::Io`] if the file exists but cannot be read,
    /// or [`CinesearchError::Config`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents).map_err(|e| match e {
                CinesearchError::Config(msg) => {
                    CinesearchError::Config(format!("{}: {msg}", path.display()))
                }
                other => other,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Loads the config file from its usual location and applies environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn discover() -> Result<Self> {
        let config = match infrastructure::config_path() {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Applies `OMDB_API_KEY`, `CINESEARCH_BASE_URL`, `CINESEARCH_DATA_DIR`,
    /// `CINESEARCH_THEME` and `CINESEARCH_TRACE_LEVEL` from `lookup`.
    ///
    /// Empty values are ignored, as is an unrecognised theme.
    #[must_use]
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = var("OMDB_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(url) = var("CINESEARCH_BASE_URL") {
            self.base_url = url;
        }
        if let Some(dir) = var("CINESEARCH_DATA_DIR") {
            self.data_dir = infrastructure::expand_tilde(&dir);
        }
        if let Some(theme) = var("CINESEARCH_THEME") {
            match theme.parse() {
                Ok(mode) => self.theme = Some(mode),
                Err(e) => tracing::warn!(error = %e, "ignoring CINESEARCH_THEME"),
            }
        }
        if let Some(level) = var("CINESEARCH_TRACE_LEVEL") {
            self.trace_level = Some(level);
        }
        self
    }

    /// `None` when timeouts are disabled.
    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout_secs))
        }
    }

    /// Picks the starting theme: saved preference, then this config, then the
    /// terminal's `COLORFGBG` hint, then light.
    #[must_use]
    pub fn resolve_theme(&self, saved: Option<ThemeMode>, colorfgbg: Option<&str>) -> ThemeMode {
        saved
            .or(self.theme)
            .or_else(|| colorfgbg.and_then(ThemeMode::from_terminal_hint))
            .unwrap_or_default()
    }

    fn expand_paths(mut self) -> Self {
        if let Some(dir) = self.data_dir.to_str() {
            self.data_dir = infrastructure::expand_tilde(dir);
        }
        if let Some(file) = self.theme_file.as_ref().and_then(|p| p.to_str()) {
            self.theme_file = Some(infrastructure::expand_tilde(file));
        }
        self
    }
}

/// Builds the application state on top of `storage`.
///
/// History is loaded and the starting theme resolved. Nothing here fails:
/// unreadable stored data is logged and treated as absent.
pub fn initialize(config: &Config, storage: SharedStorage) -> AppState {
    tracing::debug!(data_dir = %config.data_dir.display(), "initializing cinesearch");

    let history = HistoryStore::open(storage.clone());
    let preference = ThemePreference::new(storage);

    let colorfgbg = std::env::var("COLORFGBG").ok();
    let mode = config.resolve_theme(preference.load(), colorfgbg.as_deref());
    tracing::debug!(mode = %mode, history = history.entries().len(), "state initialized");

    AppState::new(history, preference, mode)
}

/// The palettes to render with, including the configured custom theme.
///
/// A theme file that cannot be loaded is logged and skipped.
#[must_use]
pub fn load_themes(config: &Config) -> ThemeSet {
    let themes = ThemeSet::default();
    match &config.theme_file {
        None => themes,
        Some(path) => match Theme::from_file(path) {
            Ok(custom) => {
                tracing::debug!(theme = %custom.name, "loaded custom theme");
                themes.with_override(custom)
            }
            Err(e) => {
                tracing::warn!(theme_file = %path.display(), error = %e, "failed to load theme, using built-ins");
                themes
            }
        },
    }
}

/// The HTTP-backed search client described by `config`.
///
/// # Errors
///
/// Returns [`CinesearchError::Config`] when no API key is configured, or
/// [`CinesearchError::Transport`] if the HTTP client cannot be built.
pub fn build_client(config: &Config) -> Result<SearchClient<ReqwestTransport>> {
    let api_key = config
        .api_key
        .clone()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| {
            CinesearchError::Config(
                "no API key configured; set OMDB_API_KEY or api_key in config.toml".to_string(),
            )
        })?;

    let transport = ReqwestTransport::new(config.request_timeout())?;
    Ok(SearchClient::new(transport, api_key).with_base_url(config.base_url.clone()))
}
