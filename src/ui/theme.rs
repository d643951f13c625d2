//! Light/dark palettes and ANSI escape sequence generation.
//!
//! Two palettes ship with the binary (`themes/light.toml`, `themes/dark.toml`).
//! A custom TOML file can replace either of them; its optional `mode` key says
//! which one, and a file without `mode` replaces both.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//! mode = "dark"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! text_normal = "#cdd6f4"
//! text_dim = "#7f849c"
//! border = "#45475a"
//! accent = "#89b4fa"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! rating_fg = "#f9e2af"
//! error_fg = "#f38ba8"
//! success_fg = "#a6e3a1"
//! info_fg = "#89dceb"
//! ```
//!
//! # Example
//!
//! ```rust
//! use cinesearch::ui::{Theme, ThemeMode};
//!
//! let theme = Theme::for_mode(ThemeMode::Dark);
//! print!("{}{}Bold{}", Theme::fg(&theme.colors.header_fg), Theme::bold(), Theme::reset());
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::{CinesearchError, Result};

/// Light or dark presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Persisted form, `"light"` or `"dark"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Guesses the mode from a `COLORFGBG` value such as `"15;0"`.
    ///
    /// The last field is the background colour index; 0-6 and 8 are dark.
    #[must_use]
    pub fn from_terminal_hint(colorfgbg: &str) -> Option<Self> {
        let background: u8 = colorfgbg.rsplit(';').next()?.trim().parse().ok()?;
        Some(if background <= 6 || background == 8 {
            Self::Dark
        } else {
            Self::Light
        })
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = CinesearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(CinesearchError::Theme(format!(
                "unknown theme mode \"{other}\", expected \"light\" or \"dark\""
            ))),
        }
    }
}

/// A named colour palette.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    /// Which mode this palette is for. `None` means either.
    #[serde(default)]
    pub mode: Option<ThemeMode>,
    pub colors: ThemeColors,
}

/// Hex colour strings (e.g. `"#cdd6f4"`) for each UI element.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Secondary text: years, timestamps, footer hints.
    pub text_dim: String,
    pub border: String,

    /// Result numbers and field labels.
    pub accent: String,

    /// Fuzzy match highlight in the history list.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,
    pub rating_fg: String,

    pub error_fg: String,
    pub success_fg: String,
    pub info_fg: String,
}

impl Theme {
    fn builtin(mode: ThemeMode) -> Result<Self> {
        let toml_str = match mode {
            ThemeMode::Light => include_str!("../../themes/light.toml"),
            ThemeMode::Dark => include_str!("../../themes/dark.toml"),
        };
        toml::from_str(toml_str).map_err(|e| CinesearchError::Theme(e.to_string()))
    }

    /// The built-in palette for `mode`.
    ///
    /// # Panics
    ///
    /// Panics if a bundled theme file fails to parse, which the tests rule out.
    #[must_use]
    pub fn for_mode(mode: ThemeMode) -> Self {
        Self::builtin(mode).expect("bundled theme files should always parse")
    }

    /// Loads a palette from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CinesearchError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            CinesearchError::Theme(format!("failed to read {}: {e}", path.display()))
        })?;

        toml::from_str(&contents)
            .map_err(|e| CinesearchError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Parses `#rrggbb`; anything malformed renders as white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for a hex colour.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex colour.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_mode(ThemeMode::default())
    }
}

/// The palettes for both modes, with any custom override applied.
#[derive(Debug, Clone)]
pub struct ThemeSet {
    light: Theme,
    dark: Theme,
}

impl Default for ThemeSet {
    fn default() -> Self {
        Self {
            light: Theme::for_mode(ThemeMode::Light),
            dark: Theme::for_mode(ThemeMode::Dark),
        }
    }
}

impl ThemeSet {
    /// Replaces the palette for the custom theme's mode, or both if it has none.
    #[must_use]
    pub fn with_override(mut self, custom: Theme) -> Self {
        match custom.mode {
            Some(ThemeMode::Light) => self.light = custom,
            Some(ThemeMode::Dark) => self.dark = custom,
            None => {
                self.light = custom.clone();
                self.dark = custom;
            }
        }
        self
    }

    #[must_use]
    pub const fn get(&self, mode: ThemeMode) -> &Theme {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }
}
