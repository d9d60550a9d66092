//! Collect responses use case
//!
//! Gathers free-text contributions after a single prompt. Every message is a
//! valid response; only the per-participant cap and the time limit end it.

use crate::engine::{CollectionEngine, CollectionError, CollectionPolicy};
use crate::ports::contactable::Contactable;
use crate::ports::conversation_logger::{ConversationLogger, NoConversationLogger};
use crate::ports::progress::{CollectionProgress, NoProgress};
use crate::ports::result_observer::{NoResultObserver, ResultObserver};
use crate::use_cases::shared::{broadcast, introduce, now_millis, speak_logged};
use async_trait::async_trait;
use huddle_domain::{CollectionOutcome, CollectionTexts, Response, ResponseCap};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Input for the CollectResponses use case
#[derive(Debug, Clone)]
pub struct CollectResponsesInput {
    pub prompt: String,
    pub max_responses: ResponseCap,
    pub max_time: Duration,
    pub texts: CollectionTexts,
}

impl CollectResponsesInput {
    pub fn new(prompt: impl Into<String>, max_responses: ResponseCap, max_time: Duration) -> Self {
        Self {
            prompt: prompt.into(),
            max_responses,
            max_time,
            texts: CollectionTexts::default(),
        }
    }

    pub fn with_texts(mut self, texts: CollectionTexts) -> Self {
        self.texts = texts;
        self
    }
}

/// Use case for collecting free-text responses to one prompt
pub struct CollectResponsesUseCase {
    participants: Vec<Arc<dyn Contactable>>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl CollectResponsesUseCase {
    pub fn new(participants: Vec<Arc<dyn Contactable>>) -> Self {
        Self {
            participants,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub async fn execute(
        &self,
        input: CollectResponsesInput,
    ) -> Result<CollectionOutcome<Response>, CollectionError> {
        self.execute_with_progress(input, &NoResultObserver, &NoProgress)
            .await
    }

    pub async fn execute_with_progress(
        &self,
        input: CollectResponsesInput,
        observer: &dyn ResultObserver<Response>,
        progress: &dyn CollectionProgress,
    ) -> Result<CollectionOutcome<Response>, CollectionError> {
        let logger = self.conversation_logger.as_ref();

        info!(
            "Collecting responses from {} participants (cap: {})",
            self.participants.len(),
            input.max_responses
        );

        let intro = [
            input
                .texts
                .rules_text(input.max_responses, input.max_time.as_secs()),
            input.prompt.clone(),
        ];
        let policy = FreeTextPolicy {
            cap: input.max_responses,
            texts: &input.texts,
            participant_count: self.participants.len(),
            observer,
            logger,
        };
        let engine =
            CollectionEngine::new().with_conversation_logger(Arc::clone(&self.conversation_logger));
        let outcome = engine
            .collect_with_intro(
                &self.participants,
                input.max_time,
                &policy,
                progress,
                introduce(&self.participants, &intro, logger),
            )
            .await?;

        broadcast(
            &self.participants,
            input.texts.closing_text(outcome.timed_out),
            logger,
        )
        .await?;

        Ok(outcome)
    }
}

struct FreeTextPolicy<'a> {
    cap: ResponseCap,
    texts: &'a CollectionTexts,
    participant_count: usize,
    observer: &'a dyn ResultObserver<Response>,
    logger: &'a dyn ConversationLogger,
}

#[async_trait]
impl<'a> CollectionPolicy for FreeTextPolicy<'a> {
    type Output = Response;

    fn validate(&self, _text: &str) -> bool {
        true
    }

    fn is_personal_complete(&self, personal: &[Response]) -> bool {
        self.cap.is_reached(personal.len())
    }

    async fn on_personal_complete(
        &self,
        _personal: &[Response],
        participant: &dyn Contactable,
    ) -> Result<(), CollectionError> {
        speak_logged(participant, &self.texts.max_responses_text, self.logger).await?;
        Ok(())
    }

    fn convert(
        &self,
        text: &str,
        _personal: &[Response],
        participant: &dyn Contactable,
    ) -> Result<Response, CollectionError> {
        Ok(Response::new(text, participant.id(), now_millis()))
    }

    async fn on_result(
        &self,
        result: &Response,
        _personal: &[Response],
        _participant: &dyn Contactable,
    ) -> Result<(), CollectionError> {
        self.observer.on_result(result);
        Ok(())
    }

    fn is_total_complete(&self, all: &[Response]) -> bool {
        // Nobody to wait for, even without a cap
        if self.participant_count == 0 {
            return true;
        }
        self.expected_total() == Some(all.len())
    }

    fn expected_total(&self) -> Option<usize> {
        self.cap.total_for(self.participant_count)
    }
}
