//! Infrastructure layer for huddle
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: local channels, configuration file loading,
//! and transcript logging.

pub mod channel;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use channel::{ConsoleContactable, InMemoryContactable, LocalContactableGateway};
pub use config::{
    ConfigError, ConfigIssue, ConfigLoader, FileCollectionConfig, FileConfig, FileLoggingConfig,
    FileOutputConfig, FileTextsConfig, Severity,
};
pub use logging::JsonlConversationLogger;
