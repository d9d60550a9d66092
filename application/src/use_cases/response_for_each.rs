//! Response-for-each use case
//!
//! Walks every participant through the same list of statements. Each reply
//! is matched against a fixed option set; a match records a [`Reaction`] and
//! advances that participant to the next statement.

use crate::engine::{CollectionEngine, CollectionError, CollectionPolicy};
use crate::ports::contactable::Contactable;
use crate::ports::conversation_logger::{ConversationLogger, NoConversationLogger};
use crate::ports::progress::{CollectionProgress, NoProgress};
use crate::ports::result_observer::{NoResultObserver, ResultObserver};
use crate::use_cases::shared::{broadcast, introduce, now_millis, speak_logged};
use async_trait::async_trait;
use huddle_domain::{
    CollectionOutcome, CollectionTexts, MessageTemplate, OptionMatcher, Reaction, ResponseCap,
    ResponseOption, Statement,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Input for the ResponseForEach use case
#[derive(Debug, Clone)]
pub struct ResponseForEachInput {
    /// Statements to react to, in the order they are presented
    pub statements: Vec<Statement>,
    /// Options participants pick from
    pub options: Vec<ResponseOption>,
    pub max_time: Duration,
    pub texts: CollectionTexts,
}

impl ResponseForEachInput {
    pub fn new(statements: Vec<Statement>, options: Vec<ResponseOption>, max_time: Duration) -> Self {
        Self {
            statements,
            options,
            max_time,
            texts: CollectionTexts::default(),
        }
    }

    pub fn with_texts(mut self, texts: CollectionTexts) -> Self {
        self.texts = texts;
        self
    }
}

/// Use case for collecting a reaction to every statement from every participant
pub struct ResponseForEachUseCase {
    participants: Vec<Arc<dyn Contactable>>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ResponseForEachUseCase {
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

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: ResponseForEachInput,
    ) -> Result<CollectionOutcome<Reaction>, CollectionError> {
        self.execute_with_progress(input, &NoResultObserver, &NoProgress)
            .await
    }

    /// Execute the use case, reporting each reaction as it is accepted
    pub async fn execute_with_progress(
        &self,
        input: ResponseForEachInput,
        observer: &dyn ResultObserver<Reaction>,
        progress: &dyn CollectionProgress,
    ) -> Result<CollectionOutcome<Reaction>, CollectionError> {
        let matcher = OptionMatcher::try_new(input.options.clone())?;
        let logger = self.conversation_logger.as_ref();

        info!(
            "Starting response-for-each with {} statements, {} options, {} participants",
            input.statements.len(),
            input.options.len(),
            self.participants.len()
        );

        let mut intro = vec![
            input.texts.rules_text(
                ResponseCap::Limited(input.statements.len()),
                input.max_time.as_secs(),
            ),
            MessageTemplate::options_text(matcher.options()),
        ];
        if let Some(first) = MessageTemplate::statement_prompt(&input.statements, 0) {
            intro.push(first);
        }
        let policy = ReactionPolicy {
            statements: &input.statements,
            matcher: &matcher,
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

struct ReactionPolicy<'a> {
    statements: &'a [Statement],
    matcher: &'a OptionMatcher,
    texts: &'a CollectionTexts,
    participant_count: usize,
    observer: &'a dyn ResultObserver<Reaction>,
    logger: &'a dyn ConversationLogger,
}

#[async_trait]
impl<'a> CollectionPolicy for ReactionPolicy<'a> {
    type Output = Reaction;

    fn validate(&self, text: &str) -> bool {
        self.matcher.find(text).is_some()
    }

    async fn on_invalid(
        &self,
        _text: &str,
        participant: &dyn Contactable,
    ) -> Result<(), CollectionError> {
        speak_logged(participant, &self.texts.invalid_response_text, self.logger).await?;
        Ok(())
    }

    fn is_personal_complete(&self, personal: &[Reaction]) -> bool {
        personal.len() == self.statements.len()
    }

    async fn on_personal_complete(
        &self,
        _personal: &[Reaction],
        participant: &dyn Contactable,
    ) -> Result<(), CollectionError> {
        speak_logged(participant, &self.texts.max_responses_text, self.logger).await?;
        Ok(())
    }

    fn convert(
        &self,
        text: &str,
        personal: &[Reaction],
        participant: &dyn Contactable,
    ) -> Result<Reaction, CollectionError> {
        let option = self
            .matcher
            .find(text)
            .ok_or_else(|| CollectionError::Policy(format!("no option matches {:?}", text)))?;
        let statement = self.statements.get(personal.len()).ok_or_else(|| {
            CollectionError::Policy(format!("no statement at index {}", personal.len()))
        })?;
        Ok(Reaction {
            statement: statement.clone(),
            response: option.text.clone(),
            response_trigger: text.to_string(),
            id: participant.id(),
            timestamp: now_millis(),
        })
    }

    async fn on_result(
        &self,
        result: &Reaction,
        personal: &[Reaction],
        participant: &dyn Contactable,
    ) -> Result<(), CollectionError> {
        if let Some(next) = MessageTemplate::statement_prompt(self.statements, personal.len()) {
            speak_logged(participant, &next, self.logger).await?;
        }
        self.observer.on_result(result);
        Ok(())
    }

    fn is_total_complete(&self, all: &[Reaction]) -> bool {
        all.len() == self.participant_count * self.statements.len()
    }

    fn expected_total(&self) -> Option<usize> {
        Some(self.participant_count * self.statements.len())
    }
}
