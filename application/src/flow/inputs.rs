//! Named component inputs
//!
//! Each component reads a flat JSON object whose keys are its input port
//! names. `max_time` is in seconds.

use crate::use_cases::{CollectResponsesInput, PairwiseComparisonInput, ResponseForEachInput};
use huddle_domain::{CollectionTexts, ContactableConfig, ResponseCap, ResponseOption, Statement};
use serde::Deserialize;
use std::time::Duration;

/// Channel ports shared by every component
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelInputs {
    pub contactable_configs: Vec<ContactableConfig>,
    /// Channel-family credentials, passed through to the gateway untouched
    pub bot_configs: serde_json::Value,
}

/// Optional message overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TextOverrides {
    #[serde(default)]
    pub max_responses_text: Option<String>,
    #[serde(default)]
    pub all_completed_text: Option<String>,
    #[serde(default)]
    pub timeout_text: Option<String>,
    #[serde(default)]
    pub invalid_response_text: Option<String>,
}

impl TextOverrides {
    pub fn apply(self, texts: CollectionTexts) -> CollectionTexts {
        texts.with_overrides(
            self.max_responses_text,
            self.all_completed_text,
            self.timeout_text,
            self.invalid_response_text,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseForEachInputs {
    pub options: Vec<ResponseOption>,
    pub statements: Vec<Statement>,
    pub max_time: u64,
    #[serde(flatten)]
    pub channels: ChannelInputs,
    #[serde(flatten)]
    pub texts: TextOverrides,
}

impl ResponseForEachInputs {
    pub fn into_parts(self) -> (ChannelInputs, ResponseForEachInput) {
        let input = ResponseForEachInput::new(
            self.statements,
            self.options,
            Duration::from_secs(self.max_time),
        )
        .with_texts(self.texts.apply(CollectionTexts::default()));
        (self.channels, input)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PairwiseComparisonInputs {
    pub choice: String,
    pub statements: Vec<Statement>,
    pub max_time: u64,
    #[serde(flatten)]
    pub channels: ChannelInputs,
    #[serde(flatten)]
    pub texts: TextOverrides,
}

impl PairwiseComparisonInputs {
    pub fn into_parts(self) -> (ChannelInputs, PairwiseComparisonInput) {
        let input = PairwiseComparisonInput::new(
            self.statements,
            self.choice,
            Duration::from_secs(self.max_time),
        )
        .with_texts(self.texts.apply(CollectionTexts::default()));
        (self.channels, input)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectResponsesInputs {
    pub prompt: String,
    /// Absent or `null` means unlimited
    #[serde(default)]
    pub max_responses: ResponseCap,
    pub max_time: u64,
    #[serde(flatten)]
    pub channels: ChannelInputs,
    #[serde(flatten)]
    pub texts: TextOverrides,
}

impl CollectResponsesInputs {
    pub fn into_parts(self) -> (ChannelInputs, CollectResponsesInput) {
        let input = CollectResponsesInput::new(
            self.prompt,
            self.max_responses,
            Duration::from_secs(self.max_time),
        )
        .with_texts(self.texts.apply(CollectionTexts::default()));
        (self.channels, input)
    }
}
