//! Use cases
//!
//! One use case per collection kind. Each sends its intro messages, drives
//! a [`CollectionEngine`](crate::engine::CollectionEngine) with its own
//! policy, and broadcasts the closing text once the run resolves.

pub mod collect_responses;
pub mod pairwise_comparison;
pub mod response_for_each;
pub(crate) mod shared;

pub use collect_responses::{CollectResponsesInput, CollectResponsesUseCase};
pub use pairwise_comparison::{PairwiseComparisonInput, PairwiseComparisonUseCase};
pub use response_for_each::{ResponseForEachInput, ResponseForEachUseCase};
