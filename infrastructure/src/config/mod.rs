//! Configuration file loading for huddle
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `HUDDLE_*` environment variables (`HUDDLE_COLLECTION__MAX_TIME=60`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./huddle.toml` or `./.huddle.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/huddle/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, DEFAULT_MAX_TIME_SECS, FileCollectionConfig, FileConfig, FileLoggingConfig,
    FileOutputConfig, FileTextsConfig, Severity,
};
pub use loader::{ConfigError, ConfigLoader};
