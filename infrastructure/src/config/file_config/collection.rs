//! Collection defaults from TOML (`[collection]` section)

use huddle_domain::ResponseCap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default run length in seconds
pub const DEFAULT_MAX_TIME_SECS: u64 = 300;

/// Raw collection configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCollectionConfig {
    /// Seconds before a run stops on its own
    pub max_time: u64,
    /// Per-participant cap for free-text collection; unset means unlimited
    pub max_responses: Option<usize>,
}

impl Default for FileCollectionConfig {
    fn default() -> Self {
        Self {
            max_time: DEFAULT_MAX_TIME_SECS,
            max_responses: None,
        }
    }
}

impl FileCollectionConfig {
    pub fn max_time(&self) -> Duration {
        Duration::from_secs(self.max_time)
    }

    pub fn response_cap(&self) -> ResponseCap {
        ResponseCap::from(self.max_responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileCollectionConfig::default();
        assert_eq!(config.max_time(), Duration::from_secs(300));
        assert_eq!(config.response_cap(), ResponseCap::Unlimited);
    }

    #[test]
    fn test_deserialize_cap() {
        let config: FileCollectionConfig = toml::from_str("max_responses = 3").unwrap();
        assert_eq!(config.response_cap(), ResponseCap::Limited(3));
        assert_eq!(config.max_time, DEFAULT_MAX_TIME_SECS);
    }
}
