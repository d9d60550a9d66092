//! Output formatting for finished runs and flow events

pub mod console;
pub mod flow;
pub mod formatter;
