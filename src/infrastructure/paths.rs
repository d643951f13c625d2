//! Platform locations for data and configuration.
//!
//! Uses the `dirs` crate so the usual per-platform conventions apply
//! (`~/.local/share`, `~/Library/Application Support`, `%APPDATA%`).

use std::path::{Path, PathBuf};

const APP_DIR: &str = "cinesearch";
const CONFIG_FILE: &str = "config.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CINESEARCH_CONFIG";

/// Where history, preferences and traces live by default.
///
/// Falls back to `./.cinesearch` when the platform has no data directory.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".cinesearch"), |dir| dir.join(APP_DIR))
}

/// The config file to read: `$CINESEARCH_CONFIG`, else
/// `<config_dir>/cinesearch/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    config_path_from(std::env::var_os(CONFIG_ENV).map(PathBuf::from), dirs::config_dir())
}

fn config_path_from(explicit: Option<PathBuf>, config_dir: Option<PathBuf>) -> Option<PathBuf> {
    explicit
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| config_dir.map(|dir| dir.join(APP_DIR).join(CONFIG_FILE)))
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a tilde, or when no home directory is known, come back
/// unchanged.
///
/// ```
/// use cinesearch::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/srv/cinesearch"), std::path::PathBuf::from("/srv/cinesearch"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, dirs::home_dir().as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home.to_path_buf()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_config_path_wins() {
        assert_eq!(
            config_path_from(Some("/etc/cs.toml".into()), Some("/home/u/.config".into())),
            Some(PathBuf::from("/etc/cs.toml"))
        );
        assert_eq!(
            config_path_from(Some(PathBuf::new()), Some("/home/u/.config".into())),
            Some(PathBuf::from("/home/u/.config/cinesearch/config.toml"))
        );
        assert_eq!(config_path_from(None, None), None);
    }

    #[test]
    fn tilde_expands_against_home() {
        let home = Path::new("/home/u");
        assert_eq!(expand_tilde_with("~", Some(home)), PathBuf::from("/home/u"));
        assert_eq!(
            expand_tilde_with("~/movies/data", Some(home)),
            PathBuf::from("/home/u/movies/data")
        );
        assert_eq!(expand_tilde_with("~other/x", Some(home)), PathBuf::from("~other/x"));
        assert_eq!(expand_tilde_with("~/x", None), PathBuf::from("~/x"));
    }

    #[test]
    fn default_data_dir_ends_in_app_name() {
        assert!(default_data_dir().ends_with("cinesearch") || default_data_dir().ends_with(".cinesearch"));
    }
}
