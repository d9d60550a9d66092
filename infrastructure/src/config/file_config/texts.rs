//! Message overrides from TOML (`[texts]` section)

use huddle_domain::CollectionTexts;
use serde::{Deserialize, Serialize};

/// Raw text overrides from TOML; unset entries keep the built-in wording
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTextsConfig {
    pub max_responses_text: Option<String>,
    pub all_completed_text: Option<String>,
    pub timeout_text: Option<String>,
    pub invalid_response_text: Option<String>,
}

impl FileTextsConfig {
    pub fn to_collection_texts(&self) -> CollectionTexts {
        CollectionTexts::default().with_overrides(
            self.max_responses_text.clone(),
            self.all_completed_text.clone(),
            self.timeout_text.clone(),
            self.invalid_response_text.clone(),
        )
    }

    /// Names of overrides that are set but blank
    pub(crate) fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("texts.max_responses_text", &self.max_responses_text),
            ("texts.all_completed_text", &self.all_completed_text),
            ("texts.timeout_text", &self.timeout_text),
            ("texts.invalid_response_text", &self.invalid_response_text),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_some_and(|v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_domain::prompt::DEFAULT_TIMEOUT_TEXT;

    #[test]
    fn test_overrides_apply_only_when_set() {
        let config = FileTextsConfig {
            all_completed_text: Some("All done!".to_string()),
            ..Default::default()
        };
        let texts = config.to_collection_texts();
        assert_eq!(texts.all_completed_text, "All done!");
        assert_eq!(texts.timeout_text, DEFAULT_TIMEOUT_TEXT);
    }

    #[test]
    fn test_blank_fields() {
        let config = FileTextsConfig {
            timeout_text: Some("  ".to_string()),
            invalid_response_text: Some("Nope".to_string()),
            ..Default::default()
        };
        assert_eq!(config.blank_fields(), vec!["texts.timeout_text"]);
    }
}
