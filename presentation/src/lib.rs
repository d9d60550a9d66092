//! Presentation layer for huddle
//!
//! This crate contains CLI definitions, output formatters, and progress
//! reporters.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{
    Cli, CollectArgs, Command, FlowArgs, ForEachArgs, OutputFormat, PairwiseArgs, RunArgs,
};
pub use config::OutputConfig;
pub use output::console::ConsoleFormatter;
pub use output::flow::JsonLinesFlowOutput;
pub use output::formatter::ResultDisplay;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use progress::tally::{RunTally, TallySnapshot};
