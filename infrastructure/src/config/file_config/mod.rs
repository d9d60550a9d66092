//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod collection;
mod logging;
mod output;
mod texts;

pub use collection::{DEFAULT_MAX_TIME_SECS, FileCollectionConfig};
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use texts::FileTextsConfig;

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Run defaults
    pub collection: FileCollectionConfig,
    /// Message overrides
    pub texts: FileTextsConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Transcript settings
    pub logging: FileLoggingConfig,
}

/// How serious a configuration issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The value is used but probably not what was meant
    Warning,
    /// The configuration cannot be used
    Error,
}

/// One problem found by [`FileConfig::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.collection.max_time == 0 {
            issues.push(ConfigIssue::error(
                "collection.max_time",
                "must be at least 1 second",
            ));
        }

        if self.collection.max_responses == Some(0) {
            issues.push(ConfigIssue::error(
                "collection.max_responses",
                "must be at least 1; remove it for unlimited responses",
            ));
        }

        for field in self.texts.blank_fields() {
            issues.push(ConfigIssue::warning(
                field,
                "is blank; participants will receive an empty message",
            ));
        }

        issues
    }

    /// Whether any issue makes the configuration unusable
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_domain::{OutputFormat, ResponseCap};
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[collection]
max_time = 120
max_responses = 2

[texts]
timeout_text = "Time is up."

[output]
format = "full"
color = false

[logging]
transcript = "runs/latest.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.collection.max_time, 120);
        assert_eq!(config.collection.response_cap(), ResponseCap::Limited(2));
        assert_eq!(config.texts.timeout_text.as_deref(), Some("Time is up."));
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert_eq!(
            config.logging.transcript,
            Some(PathBuf::from("runs/latest.jsonl"))
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[output]\ncolor = false\n").unwrap();
        assert_eq!(config.collection, FileCollectionConfig::default());
        assert!(config.texts.timeout_text.is_none());
        assert!(config.logging.transcript.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let mut config = FileConfig::default();
        config.collection.max_time = 0;
        config.collection.max_responses = Some(0);
        config.texts.all_completed_text = Some(String::new());

        let issues = config.validate();
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "collection.max_time",
                "collection.max_responses",
                "texts.all_completed_text"
            ]
        );
        assert!(FileConfig::has_errors(&issues));
        assert_eq!(issues[2].severity, Severity::Warning);
    }

    #[test]
    fn test_to_toml_round_trips_values() {
        let mut config = FileConfig::default();
        config.collection.max_time = 45;
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("max_time = 45"));
        let parsed: FileConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
