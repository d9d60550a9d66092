//! Per-statement reaction

use super::statement::Statement;
use serde::{Deserialize, Serialize};

/// One participant's answer to one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    /// Snapshot of the statement being answered
    pub statement: Statement,
    /// Text of the matched option
    pub response: String,
    /// Raw text the participant sent
    pub response_trigger: String,
    /// Participant id
    pub id: String,
    /// Unix timestamp (milliseconds) of receipt
    pub timestamp: i64,
}
