//! Pair enumeration

use crate::collection::Statement;
use serde::{Deserialize, Serialize};

/// Two statements presented side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairwiseChoice {
    /// Selected by answering `0`
    #[serde(rename = "A")]
    pub first: Statement,
    /// Selected by answering `1`
    #[serde(rename = "B")]
    pub second: Statement,
}

impl PairwiseChoice {
    pub fn new(first: Statement, second: Statement) -> Self {
        Self { first, second }
    }
}

/// Number of unordered pairs among `n` items
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Enumerate every unordered pair of `statements`.
///
/// Pairs are ordered by the index of the first member, then the second.
/// Identical statement texts at different positions still form a pair; only
/// positions are compared.
pub fn generate_pairs(statements: &[Statement]) -> Vec<PairwiseChoice> {
    let mut pairs = Vec::with_capacity(pair_count(statements.len()));
    for (i, first) in statements.iter().enumerate() {
        for second in &statements[i + 1..] {
            pairs.push(PairwiseChoice::new(first.clone(), second.clone()));
        }
    }
    pairs
}
