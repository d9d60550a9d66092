//! Flow component layer
//!
//! Exposes the collection use cases as components of a message-passing
//! flow graph. A component takes named JSON inputs, opens channels through a
//! [`ContactableGateway`](crate::ports::contactable::ContactableGateway),
//! runs, and emits named output events.
//!
//! ```text
//!  inputs (JSON) ──▶ FlowRunner ──▶ gateway.init ──▶ use case ──▶ gateway.shutdown
//!                        │                               │
//!                        │                    reaction / pairwise_vote / response
//!                        ▼                               ▼
//!                     FlowOutput ◀──────── results | error (exactly one)
//! ```

pub mod events;
pub mod inputs;
pub mod runner;

pub use events::{FlowEvent, FlowOutput, FlowResults};
pub use inputs::{
    ChannelInputs, CollectResponsesInputs, PairwiseComparisonInputs, ResponseForEachInputs,
    TextOverrides,
};
pub use runner::{FlowComponent, FlowError, FlowRunner};
