//! Statement value object

use serde::{Deserialize, Serialize};

/// An item that participants are asked to respond to.
///
/// Statements are supplied by the caller and cloned into result snapshots,
/// so a [`Reaction`](super::Reaction) keeps the text it answered even if the
/// caller's list changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Statement {
    pub text: String,
}

impl Statement {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<&str> for Statement {
    fn from(s: &str) -> Self {
        Statement::new(s)
    }
}

impl From<String> for Statement {
    fn from(s: String) -> Self {
        Statement::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_from_str() {
        let s: Statement = "Cats are great".into();
        assert_eq!(s.text(), "Cats are great");
        assert_eq!(s.to_string(), "Cats are great");
    }

    #[test]
    fn test_statement_deserialize() {
        let s: Statement = serde_json::from_str(r#"{"text": "hello"}"#).unwrap();
        assert_eq!(s, Statement::new("hello"));
    }
}
