//! Application layer for huddle
//!
//! This crate contains the collection engine, the use cases built on it,
//! the flow component adapter, and the port definitions adapters implement.
//! It depends only on the domain layer.

pub mod engine;
pub mod flow;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use engine::{CollectionEngine, CollectionError, CollectionPolicy};
pub use flow::{FlowComponent, FlowError, FlowEvent, FlowOutput, FlowResults, FlowRunner};
pub use ports::{
    composite_progress::CompositeProgress,
    contactable::{
        Contactable, ContactableError, ContactableGateway, InboundMessage, MessageListener,
    },
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{CollectionProgress, NoProgress},
    result_observer::{NoResultObserver, ResultObserver},
};
pub use use_cases::{
    CollectResponsesInput, CollectResponsesUseCase, PairwiseComparisonInput,
    PairwiseComparisonUseCase, ResponseForEachInput, ResponseForEachUseCase,
};
