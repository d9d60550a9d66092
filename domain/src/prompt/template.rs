//! Message templates for collection runs

use crate::collection::{ResponseCap, ResponseOption, Statement};
use crate::pairwise::PairwiseChoice;

/// Produces the rules intro from `(max_responses, max_time_secs)`.
pub type RulesFormatter = fn(ResponseCap, u64) -> String;

/// Templates for generating participant-facing messages
pub struct MessageTemplate;

impl MessageTemplate {
    /// Rules intro sent before anything else.
    ///
    /// The cap line is the only part that varies: a finite cap reads
    /// "up to N responses", an unlimited one "unlimited responses".
    pub fn rules_text(max_responses: ResponseCap, _max_time_secs: u64) -> String {
        let cap = match max_responses {
            ResponseCap::Limited(n) => format!("up to {} responses", n),
            ResponseCap::Unlimited => "unlimited responses".to_string(),
        };
        format!(
            "Contribute one response per message. \nYou can contribute {}. \nThe process will stop automatically after a few seconds.",
            cap
        )
    }

    /// Lists every option with its triggers
    pub fn options_text(options: &[ResponseOption]) -> String {
        let described = options
            .iter()
            .map(|o| format!("{} ({})", o.text, o.triggers.join(", ")))
            .collect::<Vec<_>>()
            .join(", ");
        format!("The options for each statement are: {}", described)
    }

    /// Prompt for the statement at `index`, prefixed with how many follow it
    pub fn statement_prompt(statements: &[Statement], index: usize) -> Option<String> {
        let statement = statements.get(index)?;
        let remaining = statements.len() - 1 - index;
        Some(format!("({} remaining) {}", remaining, statement.text))
    }

    /// Explains what choosing one side of a pair means
    pub fn choice_text(choice: &str) -> String {
        format!("{} Respond with 0 or 1.", choice)
    }

    /// Prompt for the pair at `index`, prefixed with how many follow it
    pub fn pair_prompt(pairs: &[PairwiseChoice], index: usize) -> Option<String> {
        let pair = pairs.get(index)?;
        let remaining = pairs.len() - 1 - index;
        Some(format!(
            "({} remaining)\n0) {}\n1) {}",
            remaining, pair.first.text, pair.second.text
        ))
    }
}
