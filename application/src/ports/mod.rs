//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod composite_progress;
pub mod contactable;
pub mod conversation_logger;
pub mod progress;
pub mod result_observer;
