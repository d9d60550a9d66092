//! Pairwise comparison domain
//!
//! Every unordered pair of statements is put to each participant, who picks
//! one side by answering `0` (first) or `1` (second).
//!
//! # Pair order
//!
//! ```text
//! statements: [A, B, C, D]
//!
//! index  first  second
//!   0      A      B
//!   1      A      C
//!   2      A      D
//!   3      B      C
//!   4      B      D
//!   5      C      D
//! ```
//!
//! `first` is always the statement that appears earlier in the input, so a
//! vote of `0` always means "the earlier statement".

pub mod choice;
pub mod vote;

pub use choice::{PairwiseChoice, generate_pairs, pair_count};
pub use vote::{PairwiseSide, PairwiseVote};
