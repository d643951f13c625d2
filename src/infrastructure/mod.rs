//! Filesystem and environment lookups.

pub mod paths;

pub use paths::{config_path, default_data_dir, expand_tilde, CONFIG_ENV};
