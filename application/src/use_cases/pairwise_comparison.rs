//! Pairwise comparison use case
//!
//! Puts every unordered pair of statements to each participant, one pair at
//! a time, and records which side they picked.

use crate::engine::{CollectionEngine, CollectionError, CollectionPolicy};
use crate::ports::contactable::Contactable;
use crate::ports::conversation_logger::{ConversationLogger, NoConversationLogger};
use crate::ports::progress::{CollectionProgress, NoProgress};
use crate::ports::result_observer::{NoResultObserver, ResultObserver};
use crate::use_cases::shared::{broadcast, introduce, now_millis, speak_logged};
use async_trait::async_trait;
use huddle_domain::{
    CollectionOutcome, CollectionTexts, MessageTemplate, PairwiseChoice, PairwiseSide,
    PairwiseVote, ResponseCap, Statement, generate_pairs,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Input for the PairwiseComparison use case
#[derive(Debug, Clone)]
pub struct PairwiseComparisonInput {
    pub statements: Vec<Statement>,
    /// Question shown before the first pair, e.g. "Which do you prefer?"
    pub choice: String,
    pub max_time: Duration,
    pub texts: CollectionTexts,
}

impl PairwiseComparisonInput {
    pub fn new(statements: Vec<Statement>, choice: impl Into<String>, max_time: Duration) -> Self {
        Self {
            statements,
            choice: choice.into(),
            max_time,
            texts: CollectionTexts::default(),
        }
    }

    pub fn with_texts(mut self, texts: CollectionTexts) -> Self {
        self.texts = texts;
        self
    }
}

/// Use case for collecting one vote per pair from every participant
pub struct PairwiseComparisonUseCase {
    participants: Vec<Arc<dyn Contactable>>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl PairwiseComparisonUseCase {
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
        input: PairwiseComparisonInput,
    ) -> Result<CollectionOutcome<PairwiseVote>, CollectionError> {
        self.execute_with_progress(input, &NoResultObserver, &NoProgress)
            .await
    }

    pub async fn execute_with_progress(
        &self,
        input: PairwiseComparisonInput,
        observer: &dyn ResultObserver<PairwiseVote>,
        progress: &dyn CollectionProgress,
    ) -> Result<CollectionOutcome<PairwiseVote>, CollectionError> {
        let pairs = generate_pairs(&input.statements);
        let logger = self.conversation_logger.as_ref();

        info!(
            "Starting pairwise comparison: {} statements, {} pairs, {} participants",
            input.statements.len(),
            pairs.len(),
            self.participants.len()
        );

        let mut intro = vec![
            input
                .texts
                .rules_text(ResponseCap::Limited(pairs.len()), input.max_time.as_secs()),
            MessageTemplate::choice_text(&input.choice),
        ];
        if let Some(first) = MessageTemplate::pair_prompt(&pairs, 0) {
            intro.push(first);
        }
        let policy = VotePolicy {
            pairs: &pairs,
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

struct VotePolicy<'a> {
    pairs: &'a [PairwiseChoice],
    texts: &'a CollectionTexts,
    participant_count: usize,
    observer: &'a dyn ResultObserver<PairwiseVote>,
    logger: &'a dyn ConversationLogger,
}

#[async_trait]
impl<'a> CollectionPolicy for VotePolicy<'a> {
    type Output = PairwiseVote;

    fn validate(&self, text: &str) -> bool {
        PairwiseSide::parse(text).is_ok()
    }

    async fn on_invalid(
        &self,
        _text: &str,
        participant: &dyn Contactable,
    ) -> Result<(), CollectionError> {
        speak_logged(participant, &self.texts.invalid_response_text, self.logger).await?;
        Ok(())
    }

    fn is_personal_complete(&self, personal: &[PairwiseVote]) -> bool {
        personal.len() == self.pairs.len()
    }

    async fn on_personal_complete(
        &self,
        _personal: &[PairwiseVote],
        participant: &dyn Contactable,
    ) -> Result<(), CollectionError> {
        speak_logged(participant, &self.texts.max_responses_text, self.logger).await?;
        Ok(())
    }

    fn convert(
        &self,
        text: &str,
        personal: &[PairwiseVote],
        participant: &dyn Contactable,
    ) -> Result<PairwiseVote, CollectionError> {
        let side = PairwiseSide::parse(text)?;
        let pair = self.pairs.get(personal.len()).ok_or_else(|| {
            CollectionError::Policy(format!("no pair at index {}", personal.len()))
        })?;
        Ok(PairwiseVote::new(
            pair.clone(),
            side,
            participant.config(),
            now_millis(),
        ))
    }

    async fn on_result(
        &self,
        result: &PairwiseVote,
        personal: &[PairwiseVote],
        participant: &dyn Contactable,
    ) -> Result<(), CollectionError> {
        if let Some(next) = MessageTemplate::pair_prompt(self.pairs, personal.len()) {
            speak_logged(participant, &next, self.logger).await?;
        }
        self.observer.on_result(result);
        Ok(())
    }

    fn is_total_complete(&self, all: &[PairwiseVote]) -> bool {
        all.len() == self.participant_count * self.pairs.len()
    }

    fn expected_total(&self) -> Option<usize> {
        Some(self.participant_count * self.pairs.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockContactable, as_participants};
    use huddle_domain::ContactableConfig;
    use huddle_domain::prompt::{
        DEFAULT_ALL_COMPLETED_TEXT, DEFAULT_INVALID_RESPONSE_TEXT, DEFAULT_MAX_RESPONSES_TEXT,
        DEFAULT_TIMEOUT_TEXT,
    };

    fn statements() -> Vec<Statement> {
        vec![
            Statement::new("cats"),
            Statement::new("dogs"),
            Statement::new("fish"),
        ]
    }

    fn spawn_run(
        mocks: &[Arc<MockContactable>],
        input: PairwiseComparisonInput,
    ) -> tokio::task::JoinHandle<Result<CollectionOutcome<PairwiseVote>, CollectionError>> {
        let use_case = PairwiseComparisonUseCase::new(as_participants(mocks));
        tokio::spawn(async move { use_case.execute(input).await })
    }

    #[tokio::test(start_paused = true)]
    async fn test_votes_follow_pair_order() {
        let a = MockContactable::new("a");
        let input =
            PairwiseComparisonInput::new(statements(), "Which pet?", Duration::from_secs(30));
        let run = spawn_run(&[Arc::clone(&a)], input);
        a.wait_for_listener().await;

        a.trigger("0");
        a.trigger("1");
        a.trigger("1");

        let outcome = run.await.unwrap().unwrap();
        assert!(!outcome.timed_out);
        let chosen: Vec<&str> = outcome.results.iter().map(|v| v.chosen_text()).collect();
        assert_eq!(chosen, vec!["cats", "fish", "fish"]);
        assert_eq!(outcome.results[0].contact, ContactableConfig::new("mock", "a"));

        assert_eq!(
            a.spoken(),
            vec![
                MessageTemplate::rules_text(ResponseCap::Limited(3), 30),
                "Which pet? Respond with 0 or 1.".to_string(),
                "(2 remaining)\n0) cats\n1) dogs".to_string(),
                "(1 remaining)\n0) cats\n1) fish".to_string(),
                "(0 remaining)\n0) dogs\n1) fish".to_string(),
                DEFAULT_MAX_RESPONSES_TEXT.to_string(),
                DEFAULT_ALL_COMPLETED_TEXT.to_string(),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_zero_and_one_are_accepted() {
        let a = MockContactable::new("a");
        let input = PairwiseComparisonInput::new(
            vec![Statement::new("x"), Statement::new("y")],
            "Pick",
            Duration::from_secs(30),
        );
        let run = spawn_run(&[Arc::clone(&a)], input);
        a.wait_for_listener().await;

        for text in ["2", " 0", "first", "1"] {
            a.trigger(text);
        }

        let outcome = run.await.unwrap().unwrap();
        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.results[0].choice, 1);
        let invalid = a
            .spoken()
            .iter()
            .filter(|m| *m == DEFAULT_INVALID_RESPONSE_TEXT)
            .count();
        assert_eq!(invalid, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_capped_participant_messages_are_ignored() {
        let a = MockContactable::new("a");
        let b = MockContactable::new("b");
        let input = PairwiseComparisonInput::new(
            vec![Statement::new("x"), Statement::new("y")],
            "Pick",
            Duration::from_secs(30),
        );
        let run = spawn_run(&[Arc::clone(&a), Arc::clone(&b)], input);
        a.wait_for_listener().await;
        b.wait_for_listener().await;

        a.trigger("0");
        a.trigger("nonsense");
        a.trigger("1");
        b.trigger("1");

        let outcome = run.await.unwrap().unwrap();
        assert_eq!(outcome.len(), 2);
        assert!(!a.spoken().iter().any(|m| m == DEFAULT_INVALID_RESPONSE_TEXT));
        let caps = a
            .spoken()
            .iter()
            .filter(|m| *m == DEFAULT_MAX_RESPONSES_TEXT)
            .count();
        assert_eq!(caps, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_keeps_partial_votes() {
        let a = MockContactable::new("a");
        let input =
            PairwiseComparisonInput::new(statements(), "Which pet?", Duration::from_secs(3));
        let run = spawn_run(&[Arc::clone(&a)], input);
        a.wait_for_listener().await;

        a.trigger("0");

        let outcome = run.await.unwrap().unwrap();
        assert!(outcome.timed_out);
        assert_eq!(outcome.len(), 1);
        assert_eq!(
            a.spoken().last().map(String::as_str),
            Some(DEFAULT_TIMEOUT_TEXT)
        );
        assert_eq!(a.listener_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_statement_has_no_pairs() {
        let a = MockContactable::new("a");
        let use_case = PairwiseComparisonUseCase::new(as_participants(&[Arc::clone(&a)]));
        let input = PairwiseComparisonInput::new(
            vec![Statement::new("alone")],
            "Pick",
            Duration::from_secs(30),
        );

        let outcome = use_case.execute(input).await.unwrap();

        assert!(!outcome.timed_out);
        assert!(outcome.is_empty());
        assert_eq!(
            a.spoken().last().map(String::as_str),
            Some(DEFAULT_ALL_COMPLETED_TEXT)
        );
    }
}
