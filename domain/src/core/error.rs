//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No options configured for responses")]
    NoOptions,

    #[error("Option '{0}' has no triggers")]
    OptionWithoutTriggers(String),

    #[error("Invalid pairwise choice: {0}")]
    InvalidChoice(String),

    #[error("Invalid statement: {0}")]
    InvalidStatement(String),

    #[error("Invalid option spec: {0}")]
    InvalidOptionSpec(String),
}

impl DomainError {
    /// Check if this error comes from malformed option input
    pub fn is_option_error(&self) -> bool {
        matches!(
            self,
            DomainError::NoOptions
                | DomainError::OptionWithoutTriggers(_)
                | DomainError::InvalidOptionSpec(_)
        )
    }
}
