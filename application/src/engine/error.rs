//! Collection errors

use crate::ports::contactable::ContactableError;
use huddle_domain::DomainError;
use thiserror::Error;

/// Errors that fail a collection run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    #[error("Channel error: {0}")]
    Channel(#[from] ContactableError),

    #[error("Invalid input: {0}")]
    Domain(#[from] DomainError),

    #[error("Policy failed: {0}")]
    Policy(String),

    #[error("Collection already resolved")]
    AlreadyResolved,
}
