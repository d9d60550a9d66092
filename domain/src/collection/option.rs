//! Fixed answer options and trigger matching

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Trigger that matches any response text.
pub const WILDCARD_TRIGGER: &str = "*";

/// One labeled answer participants can give.
///
/// A response selects this option when it equals one of the `triggers`
/// exactly (case-sensitive), or when the trigger list contains
/// [`WILDCARD_TRIGGER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseOption {
    pub text: String,
    pub triggers: Vec<String>,
}

impl ResponseOption {
    pub fn new<I, S>(text: impl Into<String>, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into(),
            triggers: triggers.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse the `TEXT=trigger1,trigger2` form used on the command line.
    ///
    /// ```
    /// use huddle_domain::ResponseOption;
    ///
    /// let option = ResponseOption::parse_spec("Agree=a,yes").unwrap();
    /// assert_eq!(option.text, "Agree");
    /// assert_eq!(option.triggers, vec!["a", "yes"]);
    /// ```
    pub fn parse_spec(spec: &str) -> Result<Self, DomainError> {
        let (text, triggers) = spec
            .split_once('=')
            .ok_or_else(|| DomainError::InvalidOptionSpec(spec.to_string()))?;
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::InvalidOptionSpec(spec.to_string()));
        }
        let triggers: Vec<String> = triggers
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
        if triggers.is_empty() {
            return Err(DomainError::OptionWithoutTriggers(text.to_string()));
        }
        Ok(Self {
            text: text.to_string(),
            triggers,
        })
    }

    /// Whether `text` selects this option
    pub fn is_triggered_by(&self, text: &str) -> bool {
        self.triggers
            .iter()
            .any(|trigger| trigger == text || trigger == WILDCARD_TRIGGER)
    }
}

/// Resolves free text to one of a fixed set of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionMatcher {
    options: Vec<ResponseOption>,
}

impl OptionMatcher {
    pub fn new(options: Vec<ResponseOption>) -> Self {
        Self { options }
    }

    /// Build a matcher, rejecting an empty option list
    pub fn try_new(options: Vec<ResponseOption>) -> Result<Self, DomainError> {
        if options.is_empty() {
            return Err(DomainError::NoOptions);
        }
        Ok(Self::new(options))
    }

    /// The first option triggered by `text`, in declaration order
    pub fn find(&self, text: &str) -> Option<&ResponseOption> {
        self.options.iter().find(|option| option.is_triggered_by(text))
    }

    pub fn options(&self) -> &[ResponseOption] {
        &self.options
    }
}
