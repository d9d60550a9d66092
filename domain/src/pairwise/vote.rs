//! Pairwise vote

use super::choice::PairwiseChoice;
use crate::core::error::DomainError;
use crate::participant::ContactableConfig;
use serde::{Deserialize, Serialize};

/// Which side of a pair was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairwiseSide {
    /// Answer `0`
    First,
    /// Answer `1`
    Second,
}

impl PairwiseSide {
    /// Parse a raw reply; only the literal strings `"0"` and `"1"` are accepted
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        match text {
            "0" => Ok(PairwiseSide::First),
            "1" => Ok(PairwiseSide::Second),
            other => Err(DomainError::InvalidChoice(other.to_string())),
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            PairwiseSide::First => 0,
            PairwiseSide::Second => 1,
        }
    }
}

/// One participant's choice on one pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairwiseVote {
    pub choices: PairwiseChoice,
    /// `0` for `choices.first`, `1` for `choices.second`
    pub choice: u8,
    /// Channel of the voter
    pub contact: ContactableConfig,
    /// Unix timestamp (milliseconds) of receipt
    pub timestamp: i64,
}

impl PairwiseVote {
    pub fn new(
        choices: PairwiseChoice,
        side: PairwiseSide,
        contact: ContactableConfig,
        timestamp: i64,
    ) -> Self {
        Self {
            choices,
            choice: side.index(),
            contact,
            timestamp,
        }
    }

    /// The chosen statement text
    pub fn chosen_text(&self) -> &str {
        if self.choice == 0 {
            self.choices.first.text()
        } else {
            self.choices.second.text()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Statement;

    #[test]
    fn test_parse_side() {
        assert_eq!(PairwiseSide::parse("0"), Ok(PairwiseSide::First));
        assert_eq!(PairwiseSide::parse("1"), Ok(PairwiseSide::Second));
        assert!(PairwiseSide::parse("2").is_err());
        assert!(PairwiseSide::parse(" 1").is_err());
        assert!(PairwiseSide::parse("").is_err());
    }

    #[test]
    fn test_chosen_text() {
        let pair = PairwiseChoice::new(Statement::new("tea"), Statement::new("coffee"));
        let contact = ContactableConfig::new("memory", "p1");
        let vote = PairwiseVote::new(pair.clone(), PairwiseSide::Second, contact.clone(), 0);
        assert_eq!(vote.choice, 1);
        assert_eq!(vote.chosen_text(), "coffee");

        let vote = PairwiseVote::new(pair, PairwiseSide::First, contact, 0);
        assert_eq!(vote.chosen_text(), "tea");
    }
}
