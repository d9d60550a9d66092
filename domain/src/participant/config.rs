//! Channel identity snapshot

use serde::{Deserialize, Serialize};

/// Identity of one participant's channel.
///
/// `kind` names the channel family (`"cli"`, `"memory"`, `"telegram"`, ...)
/// and decides which adapter the gateway initializes. `id` is unique within
/// that family.
///
/// # Example
///
/// ```
/// use huddle_domain::ContactableConfig;
///
/// let config = ContactableConfig::new("memory", "p1").with_name("Pat");
/// assert_eq!(config.display_name(), "Pat");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactableConfig {
    /// Channel family
    #[serde(rename = "type")]
    pub kind: String,
    /// Identifier within the channel family
    pub id: String,
    /// Optional human readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ContactableConfig {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name if set, id otherwise
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl std::fmt::Display for ContactableConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
