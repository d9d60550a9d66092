//! Domain layer for huddle
//!
//! This crate contains the value objects exchanged during a collection run.
//! It has no dependencies on channels, timers, or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Collection run
//!
//! A run asks every participant for responses, accepts up to a per-participant
//! [`ResponseCap`], and ends when everyone has finished or time runs out. The
//! outcome is a [`CollectionOutcome`] whose results are in arrival order.
//!
//! ## Result kinds
//!
//! - [`Reaction`]: an answer from a fixed option set to one [`Statement`]
//! - [`PairwiseVote`]: a `0`/`1` choice between two statements
//! - [`Response`]: free text

pub mod collection;
pub mod config;
pub mod core;
pub mod pairwise;
pub mod participant;
pub mod prompt;

// Re-export commonly used types
pub use collection::{
    CollectionOutcome, OptionMatcher, Reaction, Response, ResponseCap, ResponseOption, Statement,
    WILDCARD_TRIGGER,
};
pub use config::OutputFormat;
pub use core::error::DomainError;
pub use pairwise::{PairwiseChoice, PairwiseSide, PairwiseVote, generate_pairs, pair_count};
pub use participant::ContactableConfig;
pub use prompt::{CollectionTexts, MessageTemplate, RulesFormatter};
