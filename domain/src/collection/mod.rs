//! Response collection domain
//!
//! Value objects exchanged between participants and a collection run:
//!
//! - [`Statement`]: an item participants respond to
//! - [`ResponseOption`] / [`OptionMatcher`]: fixed answer set with triggers
//! - [`ResponseCap`]: per-participant response limit (finite or unlimited)
//! - [`Reaction`]: one participant's answer to one statement
//! - [`Response`]: one free-text contribution
//! - [`CollectionOutcome`]: the ordered results of a finished run

pub mod cap;
pub mod option;
pub mod outcome;
pub mod reaction;
pub mod response;
pub mod statement;

pub use cap::ResponseCap;
pub use option::{OptionMatcher, ResponseOption, WILDCARD_TRIGGER};
pub use outcome::CollectionOutcome;
pub use reaction::Reaction;
pub use response::Response;
pub use statement::Statement;
