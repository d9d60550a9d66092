//! Per-result rendering

use huddle_domain::{PairwiseVote, Reaction, Response};

/// A collected result that can be listed on the console
pub trait ResultDisplay {
    /// Who produced the result
    fn participant(&self) -> &str;

    /// One-line description, without the participant
    fn describe(&self) -> String;
}

impl ResultDisplay for Reaction {
    fn participant(&self) -> &str {
        &self.id
    }

    fn describe(&self) -> String {
        format!(
            "{} -> {} ({:?})",
            self.statement.text(),
            self.response,
            self.response_trigger
        )
    }
}

impl ResultDisplay for PairwiseVote {
    fn participant(&self) -> &str {
        &self.contact.id
    }

    fn describe(&self) -> String {
        let (chosen, other) = if self.choice == 0 {
            (&self.choices.first, &self.choices.second)
        } else {
            (&self.choices.second, &self.choices.first)
        };
        format!("{} over {}", chosen.text(), other.text())
    }
}

impl ResultDisplay for Response {
    fn participant(&self) -> &str {
        &self.id
    }

    fn describe(&self) -> String {
        self.text.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_domain::{ContactableConfig, PairwiseChoice, PairwiseSide, Statement};

    #[test]
    fn test_vote_names_the_winner_first() {
        let vote = PairwiseVote::new(
            PairwiseChoice::new(Statement::new("cats"), Statement::new("dogs")),
            PairwiseSide::Second,
            ContactableConfig::new("cli", "me"),
            0,
        );
        assert_eq!(vote.participant(), "me");
        assert_eq!(vote.describe(), "dogs over cats");
    }

    #[test]
    fn test_reaction_shows_trigger() {
        let reaction = Reaction {
            statement: Statement::new("Tea is best"),
            response: "Agree".to_string(),
            response_trigger: "y".to_string(),
            id: "p1".to_string(),
            timestamp: 0,
        };
        assert_eq!(reaction.describe(), "Tea is best -> Agree (\"y\")");
    }
}
