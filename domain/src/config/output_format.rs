//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished run is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Summary, per-participant tally and every result
    Full,
    /// One line per result (default)
    #[default]
    Results,
    /// The outcome as JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_results() {
        assert_eq!(OutputFormat::default(), OutputFormat::Results);
    }

    #[test]
    fn test_deserialize_lowercase() {
        let format: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, OutputFormat::Json);
        assert!(serde_json::from_str::<OutputFormat>("\"synthesis\"").is_err());
    }
}
