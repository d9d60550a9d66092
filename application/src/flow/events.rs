//! Named component outputs

use huddle_domain::{PairwiseVote, Reaction, Response};
use serde::Serialize;

/// Final results of a component run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlowResults {
    Reactions(Vec<Reaction>),
    PairwiseVotes(Vec<PairwiseVote>),
    Responses(Vec<Response>),
}

impl FlowResults {
    pub fn len(&self) -> usize {
        match self {
            FlowResults::Reactions(r) => r.len(),
            FlowResults::PairwiseVotes(r) => r.len(),
            FlowResults::Responses(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One packet on an output port.
///
/// Serializes as `{"<port>": <payload>}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowEvent {
    Reaction(Reaction),
    PairwiseVote(PairwiseVote),
    Response(Response),
    Results(FlowResults),
    Error(String),
}

impl FlowEvent {
    /// Output port name
    pub fn port(&self) -> &'static str {
        match self {
            FlowEvent::Reaction(_) => "reaction",
            FlowEvent::PairwiseVote(_) => "pairwise_vote",
            FlowEvent::Response(_) => "response",
            FlowEvent::Results(_) => "results",
            FlowEvent::Error(_) => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowEvent::Results(_) | FlowEvent::Error(_))
    }
}

/// Receiver of component output packets
pub trait FlowOutput: Send + Sync {
    fn send(&self, event: FlowEvent);
}
