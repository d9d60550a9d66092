//! Flow runner
//!
//! Drives one component run: parse inputs, bring channels up, execute the
//! matching use case, emit outputs, bring channels down.

use super::events::{FlowEvent, FlowOutput, FlowResults};
use super::inputs::{
    ChannelInputs, CollectResponsesInputs, PairwiseComparisonInputs, ResponseForEachInputs,
};
use crate::engine::CollectionError;
use crate::ports::contactable::{Contactable, ContactableError, ContactableGateway};
use crate::ports::conversation_logger::{ConversationLogger, NoConversationLogger};
use crate::ports::progress::{CollectionProgress, NoProgress};
use crate::ports::result_observer::ResultObserver;
use crate::use_cases::{
    CollectResponsesInput, CollectResponsesUseCase, PairwiseComparisonInput,
    PairwiseComparisonUseCase, ResponseForEachInput, ResponseForEachUseCase,
};
use huddle_domain::{PairwiseVote, Reaction, Response};
use serde::de::DeserializeOwned;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors from a component run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    #[error("Invalid inputs for {component}: {reason}")]
    InvalidInputs {
        component: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Channel(#[from] ContactableError),

    #[error(transparent)]
    Collection(#[from] CollectionError),
}

/// Available flow components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowComponent {
    ResponseForEach,
    PairwiseComparison,
    CollectResponses,
}

impl FlowComponent {
    pub const ALL: [FlowComponent; 3] = [
        FlowComponent::ResponseForEach,
        FlowComponent::PairwiseComparison,
        FlowComponent::CollectResponses,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlowComponent::ResponseForEach => "response_for_each",
            FlowComponent::PairwiseComparison => "pairwise_comparison",
            FlowComponent::CollectResponses => "collect_responses",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FlowComponent::ResponseForEach => {
                "For a list of statements, collect a response for each from every participant"
            }
            FlowComponent::PairwiseComparison => {
                "Collect a choice between every pair of statements from every participant"
            }
            FlowComponent::CollectResponses => {
                "Collect free-text responses to a prompt from every participant"
            }
        }
    }
}

impl std::fmt::Display for FlowComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FlowComponent {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        FlowComponent::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| FlowError::UnknownComponent(s.to_string()))
    }
}

enum Job {
    ResponseForEach(ResponseForEachInput),
    PairwiseComparison(PairwiseComparisonInput),
    CollectResponses(CollectResponsesInput),
}

/// Forwards each accepted result to its output port
struct FlowObserver<'a> {
    output: &'a dyn FlowOutput,
}

impl ResultObserver<Reaction> for FlowObserver<'_> {
    fn on_result(&self, result: &Reaction) {
        self.output.send(FlowEvent::Reaction(result.clone()));
    }
}

impl ResultObserver<PairwiseVote> for FlowObserver<'_> {
    fn on_result(&self, result: &PairwiseVote) {
        self.output.send(FlowEvent::PairwiseVote(result.clone()));
    }
}

impl ResultObserver<Response> for FlowObserver<'_> {
    fn on_result(&self, result: &Response) {
        self.output.send(FlowEvent::Response(result.clone()));
    }
}

/// Runs flow components against a channel gateway
pub struct FlowRunner<G: ContactableGateway + 'static> {
    gateway: Arc<G>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<G: ContactableGateway + 'static> FlowRunner<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub async fn run(
        &self,
        component: FlowComponent,
        inputs: serde_json::Value,
        output: &dyn FlowOutput,
    ) -> Result<(), FlowError> {
        self.run_with_progress(component, inputs, output, &NoProgress)
            .await
    }

    /// Run one component.
    ///
    /// Inputs that do not parse are rejected before any channel is touched
    /// and emit nothing. Past that point exactly one of `results` or `error`
    /// is emitted, and the gateway is shut down.
    pub async fn run_with_progress(
        &self,
        component: FlowComponent,
        inputs: serde_json::Value,
        output: &dyn FlowOutput,
        progress: &dyn CollectionProgress,
    ) -> Result<(), FlowError> {
        let (channels, job) = parse_job(component, inputs)?;

        info!(
            "Running component {} with {} participants",
            component,
            channels.contactable_configs.len()
        );

        let participants = match self
            .gateway
            .init(&channels.contactable_configs, &channels.bot_configs)
            .await
        {
            Ok(participants) => participants,
            Err(e) => {
                warn!("Channel initialization failed: {}", e);
                output.send(FlowEvent::Error(e.to_string()));
                self.shutdown().await;
                return Err(e.into());
            }
        };

        let result = self.execute(job, participants, output, progress).await;
        match &result {
            Ok(results) => output.send(FlowEvent::Results(results.clone())),
            Err(e) => {
                warn!("Component {} failed: {}", component, e);
                output.send(FlowEvent::Error(e.to_string()));
            }
        }

        self.shutdown().await;
        result.map(|_| ()).map_err(FlowError::from)
    }

    async fn execute(
        &self,
        job: Job,
        participants: Vec<Arc<dyn Contactable>>,
        output: &dyn FlowOutput,
        progress: &dyn CollectionProgress,
    ) -> Result<FlowResults, CollectionError> {
        let observer = FlowObserver { output };
        let logger = Arc::clone(&self.conversation_logger);

        match job {
            Job::ResponseForEach(input) => {
                let outcome = ResponseForEachUseCase::new(participants)
                    .with_conversation_logger(logger)
                    .execute_with_progress(input, &observer, progress)
                    .await?;
                Ok(FlowResults::Reactions(outcome.results))
            }
            Job::PairwiseComparison(input) => {
                let outcome = PairwiseComparisonUseCase::new(participants)
                    .with_conversation_logger(logger)
                    .execute_with_progress(input, &observer, progress)
                    .await?;
                Ok(FlowResults::PairwiseVotes(outcome.results))
            }
            Job::CollectResponses(input) => {
                let outcome = CollectResponsesUseCase::new(participants)
                    .with_conversation_logger(logger)
                    .execute_with_progress(input, &observer, progress)
                    .await?;
                Ok(FlowResults::Responses(outcome.results))
            }
        }
    }

    async fn shutdown(&self) {
        if let Err(e) = self.gateway.shutdown().await {
            warn!("Channel shutdown failed: {}", e);
        }
    }
}

fn parse_job(
    component: FlowComponent,
    inputs: serde_json::Value,
) -> Result<(ChannelInputs, Job), FlowError> {
    match component {
        FlowComponent::ResponseForEach => {
            let (channels, input) = parse::<ResponseForEachInputs>(component, inputs)?.into_parts();
            Ok((channels, Job::ResponseForEach(input)))
        }
        FlowComponent::PairwiseComparison => {
            let (channels, input) =
                parse::<PairwiseComparisonInputs>(component, inputs)?.into_parts();
            Ok((channels, Job::PairwiseComparison(input)))
        }
        FlowComponent::CollectResponses => {
            let (channels, input) =
                parse::<CollectResponsesInputs>(component, inputs)?.into_parts();
            Ok((channels, Job::CollectResponses(input)))
        }
    }
}

fn parse<T: DeserializeOwned>(
    component: FlowComponent,
    inputs: serde_json::Value,
) -> Result<T, FlowError> {
    serde_json::from_value(inputs).map_err(|e| FlowError::InvalidInputs {
        component: component.as_str(),
        reason: e.to_string(),
    })
}
