//! Overridable notification texts

use super::template::{MessageTemplate, RulesFormatter};
use crate::collection::ResponseCap;

/// Sent to a participant once they reach their cap
pub const DEFAULT_MAX_RESPONSES_TEXT: &str = "You've reached the limit of responses. Thanks for participating. You will be notified when everyone has completed.";
/// Broadcast when every participant finished before the timer
pub const DEFAULT_ALL_COMPLETED_TEXT: &str = "Everyone has completed. Thanks for participating.";
/// Broadcast when the timer ended the run
pub const DEFAULT_TIMEOUT_TEXT: &str =
    "The max time has been reached. Stopping now. Thanks for participating.";
/// Sent for each response that fails validation
pub const DEFAULT_INVALID_RESPONSE_TEXT: &str = "That response was not valid. Please try again.";

/// Texts used by one collection run.
///
/// Defaults come from the constants in this module; each field can be
/// replaced per run.
#[derive(Debug, Clone)]
pub struct CollectionTexts {
    pub rules: RulesFormatter,
    pub max_responses_text: String,
    pub all_completed_text: String,
    pub timeout_text: String,
    pub invalid_response_text: String,
}

impl Default for CollectionTexts {
    fn default() -> Self {
        Self {
            rules: MessageTemplate::rules_text,
            max_responses_text: DEFAULT_MAX_RESPONSES_TEXT.to_string(),
            all_completed_text: DEFAULT_ALL_COMPLETED_TEXT.to_string(),
            timeout_text: DEFAULT_TIMEOUT_TEXT.to_string(),
            invalid_response_text: DEFAULT_INVALID_RESPONSE_TEXT.to_string(),
        }
    }
}

impl CollectionTexts {
    pub fn with_rules(mut self, rules: RulesFormatter) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_max_responses_text(mut self, text: impl Into<String>) -> Self {
        self.max_responses_text = text.into();
        self
    }

    pub fn with_all_completed_text(mut self, text: impl Into<String>) -> Self {
        self.all_completed_text = text.into();
        self
    }

    pub fn with_timeout_text(mut self, text: impl Into<String>) -> Self {
        self.timeout_text = text.into();
        self
    }

    pub fn with_invalid_response_text(mut self, text: impl Into<String>) -> Self {
        self.invalid_response_text = text.into();
        self
    }

    /// Apply whichever overrides are present
    pub fn with_overrides(
        mut self,
        max_responses_text: Option<String>,
        all_completed_text: Option<String>,
        timeout_text: Option<String>,
        invalid_response_text: Option<String>,
    ) -> Self {
        if let Some(text) = max_responses_text {
            self.max_responses_text = text;
        }
        if let Some(text) = all_completed_text {
            self.all_completed_text = text;
        }
        if let Some(text) = timeout_text {
            self.timeout_text = text;
        }
        if let Some(text) = invalid_response_text {
            self.invalid_response_text = text;
        }
        self
    }

    pub fn rules_text(&self, max_responses: ResponseCap, max_time_secs: u64) -> String {
        (self.rules)(max_responses, max_time_secs)
    }

    /// Closing broadcast for a resolved run
    pub fn closing_text(&self, timed_out: bool) -> &str {
        if timed_out {
            &self.timeout_text
        } else {
            &self.all_completed_text
        }
    }
}
