//! Free-text response

use serde::{Deserialize, Serialize};

/// One free-text contribution from a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub text: String,
    /// Participant id
    pub id: String,
    /// Unix timestamp (milliseconds) of receipt
    pub timestamp: i64,
}

impl Response {
    pub fn new(text: impl Into<String>, id: impl Into<String>, timestamp: i64) -> Self {
        Self {
            text: text.into(),
            id: id.into(),
            timestamp,
        }
    }
}
