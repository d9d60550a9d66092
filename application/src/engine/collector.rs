//! Collection engine event loop

use super::error::CollectionError;
use super::policy::CollectionPolicy;
use super::state::RunState;
use crate::ports::contactable::{
    Contactable, ContactableError, InboundMessage, MessageListener,
};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::CollectionProgress;
use huddle_domain::CollectionOutcome;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Collects responses from many participants until everyone is done or
/// time runs out.
///
/// All participants feed one queue that a single loop drains, racing it
/// against one timer. Each message is handled to completion (including any
/// messages the policy sends back) before the next event is taken.
pub struct CollectionEngine {
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Default for CollectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionEngine {
    pub fn new() -> Self {
        Self {
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Run one collection over `participants`.
    ///
    /// Resolves with `timed_out = false` as soon as
    /// [`is_total_complete`](CollectionPolicy::is_total_complete) holds, or
    /// with `timed_out = true` once `max_time` elapses. A policy that is
    /// already complete with no results resolves immediately.
    pub async fn collect<P: CollectionPolicy>(
        &self,
        participants: &[Arc<dyn Contactable>],
        max_time: Duration,
        policy: &P,
        progress: &dyn CollectionProgress,
    ) -> Result<CollectionOutcome<P::Output>, CollectionError> {
        self.collect_with_intro(participants, max_time, policy, progress, async { Ok(()) })
            .await
    }

    /// Like [`collect`](Self::collect), delivering `intro` as part of the run.
    ///
    /// Listeners and the timer are in place before `intro` is first polled,
    /// so a participant may answer as soon as its own intro arrives, and
    /// `max_time` counts from the start of the intro. An `intro` failure
    /// fails the run.
    pub async fn collect_with_intro<P, F>(
        &self,
        participants: &[Arc<dyn Contactable>],
        max_time: Duration,
        policy: &P,
        progress: &dyn CollectionProgress,
        intro: F,
    ) -> Result<CollectionOutcome<P::Output>, CollectionError>
    where
        P: CollectionPolicy,
        F: Future<Output = Result<(), ContactableError>>,
    {
        if policy.is_total_complete(&[]) {
            intro.await?;
            info!(
                "Nothing to collect from {} participants, resolving immediately",
                participants.len()
            );
            progress.on_collection_complete(false, 0);
            self.log_resolved(false, 0);
            return Ok(CollectionOutcome::completed(Vec::new()));
        }

        // Detaches every listener when the run resolves or this future is dropped.
        let detach = CancellationToken::new();
        let _detach_on_exit = detach.clone().drop_guard();

        let (sender, mut inbound) = mpsc::unbounded_channel::<InboundMessage>();
        for (index, participant) in participants.iter().enumerate() {
            participant.listen(MessageListener::new(index, sender.clone(), detach.clone()));
        }
        drop(sender);

        let mut state = RunState::new(participants.len(), detach);
        info!(
            "Collecting from {} participants for up to {:?}",
            participants.len(),
            max_time
        );
        progress.on_collection_start(participants.len(), policy.expected_total());

        let timer = tokio::time::sleep(max_time);
        tokio::pin!(timer);
        tokio::pin!(intro);
        let mut intro_pending = true;
        let mut inbound_open = true;

        loop {
            tokio::select! {
                biased;
                () = &mut timer => {
                    info!("Max time reached with {} results", state.all().len());
                    return self.finish(&mut state, true, progress);
                }
                sent = &mut intro, if intro_pending => {
                    sent?;
                    intro_pending = false;
                    debug!("Intro delivered to {} participants", participants.len());
                }
                message = inbound.recv(), if inbound_open => {
                    let Some(message) = message else {
                        debug!("All channels stopped delivering; waiting for the timer");
                        inbound_open = false;
                        continue;
                    };
                    let Some(participant) = participants.get(message.participant) else {
                        warn!("Message from unknown participant index {}", message.participant);
                        continue;
                    };
                    let total_complete = self
                        .handle_message(&mut state, policy, message.participant, participant.as_ref(), &message.text, progress)
                        .await?;
                    if total_complete {
                        info!("All participants completed with {} results", state.all().len());
                        return self.finish(&mut state, false, progress);
                    }
                }
            }
        }
    }

    /// Apply one inbound message; returns whether the run is now complete
    async fn handle_message<P: CollectionPolicy>(
        &self,
        state: &mut RunState<P::Output>,
        policy: &P,
        index: usize,
        participant: &dyn Contactable,
        text: &str,
        progress: &dyn CollectionProgress,
    ) -> Result<bool, CollectionError> {
        if state.is_resolved() {
            return Ok(false);
        }

        let id = participant.id();

        if state.is_capped(index) {
            trace!("Dropping message from capped participant {}", id);
            return Ok(false);
        }

        if !policy.validate(text) {
            debug!("Invalid response from {}: {:?}", id, text);
            progress.on_response_rejected(&id, text);
            self.conversation_logger.log(ConversationEvent::new(
                "response_invalid",
                serde_json::json!({ "participant": id, "text": text }),
            ));
            policy.on_invalid(text, participant).await?;
            return Ok(false);
        }

        let result = policy.convert(text, state.personal(index), participant)?;
        state.accept(index, result.clone());
        debug!(
            "Accepted response {} from {} ({} total)",
            state.personal(index).len(),
            id,
            state.all().len()
        );
        progress.on_response_accepted(&id, state.all().len());
        self.conversation_logger.log(ConversationEvent::new(
            "response_accepted",
            serde_json::json!({
                "participant": id,
                "text": text,
                "personal_count": state.personal(index).len(),
            }),
        ));
        policy
            .on_result(&result, state.personal(index), participant)
            .await?;

        if policy.is_personal_complete(state.personal(index)) && state.mark_capped(index) {
            info!("Participant {} reached their cap", id);
            policy
                .on_personal_complete(state.personal(index), participant)
                .await?;
            progress.on_participant_complete(&id);
            self.conversation_logger.log(ConversationEvent::new(
                "participant_capped",
                serde_json::json!({ "participant": id }),
            ));
        }

        Ok(policy.is_total_complete(state.all()))
    }

    fn finish<R: Clone>(
        &self,
        state: &mut RunState<R>,
        timed_out: bool,
        progress: &dyn CollectionProgress,
    ) -> Result<CollectionOutcome<R>, CollectionError> {
        let outcome = state
            .resolve(timed_out)
            .ok_or(CollectionError::AlreadyResolved)?;
        progress.on_collection_complete(timed_out, outcome.len());
        self.log_resolved(timed_out, outcome.len());
        Ok(outcome)
    }

    fn log_resolved(&self, timed_out: bool, results: usize) {
        self.conversation_logger.log(ConversationEvent::new(
            "collection_resolved",
            serde_json::json!({ "timed_out": timed_out, "results": results }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use crate::testing::{MockContactable, as_participants};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Accepts any text except "bad", caps at `cap`, echoes what happened
    struct EchoPolicy {
        cap: usize,
        participants: usize,
        invalid: Mutex<Vec<String>>,
        completed: Mutex<Vec<String>>,
    }

    impl EchoPolicy {
        fn new(cap: usize, participants: usize) -> Self {
            Self {
                cap,
                participants,
                invalid: Mutex::new(Vec::new()),
                completed: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CollectionPolicy for EchoPolicy {
        type Output = String;

        fn validate(&self, text: &str) -> bool {
            text != "bad"
        }

        async fn on_invalid(
            &self,
            text: &str,
            _participant: &dyn Contactable,
        ) -> Result<(), CollectionError> {
            self.invalid.lock().unwrap().push(text.to_string());
            Ok(())
        }

        fn is_personal_complete(&self, personal: &[String]) -> bool {
            personal.len() == self.cap
        }

        async fn on_personal_complete(
            &self,
            _personal: &[String],
            participant: &dyn Contactable,
        ) -> Result<(), CollectionError> {
            self.completed.lock().unwrap().push(participant.id());
            Ok(())
        }

        fn convert(
            &self,
            text: &str,
            _personal: &[String],
            _participant: &dyn Contactable,
        ) -> Result<String, CollectionError> {
            if text == "explode" {
                return Err(CollectionError::Policy("cannot convert".to_string()));
            }
            Ok(text.to_string())
        }

        fn is_total_complete(&self, all: &[String]) -> bool {
            all.len() == self.cap * self.participants
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_participants_resolves_without_timer() {
        let engine = CollectionEngine::new();
        let policy = EchoPolicy::new(2, 0);
        let started = tokio::time::Instant::now();

        let outcome = engine
            .collect(&[], Duration::from_secs(60), &policy, &NoProgress)
            .await
            .unwrap();

        assert!(!outcome.timed_out);
        assert!(outcome.results.is_empty());
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_follow_arrival_order_across_participants() {
        let a = MockContactable::new("a");
        let b = MockContactable::new("b");
        let mocks = vec![Arc::clone(&a), Arc::clone(&b)];
        let engine = Arc::new(CollectionEngine::new());
        let policy = Arc::new(EchoPolicy::new(2, 2));

        let run = {
            let engine = Arc::clone(&engine);
            let policy = Arc::clone(&policy);
            let participants = as_participants(&mocks);
            tokio::spawn(async move {
                engine
                    .collect(&participants, Duration::from_secs(4), policy.as_ref(), &NoProgress)
                    .await
            })
        };
        a.wait_for_listener().await;
        b.wait_for_listener().await;

        a.trigger("hi");
        b.trigger("idea");
        a.trigger("hi again");
        b.trigger("idea again");

        let outcome = run.await.unwrap().unwrap();
        assert!(!outcome.timed_out);
        assert_eq!(outcome.results, vec!["hi", "idea", "hi again", "idea again"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_capped_messages_are_dropped_silently() {
        let a = MockContactable::new("a");
        let b = MockContactable::new("b");
        let mocks = vec![Arc::clone(&a), Arc::clone(&b)];
        let engine = Arc::new(CollectionEngine::new());
        let policy = Arc::new(EchoPolicy::new(1, 2));

        let run = {
            let engine = Arc::clone(&engine);
            let policy = Arc::clone(&policy);
            let participants = as_participants(&mocks);
            tokio::spawn(async move {
                engine
                    .collect(&participants, Duration::from_secs(4), policy.as_ref(), &NoProgress)
                    .await
            })
        };
        a.wait_for_listener().await;
        b.wait_for_listener().await;

        a.trigger("first");
        a.trigger("bad");
        a.trigger("third");
        b.trigger("other");

        let outcome = run.await.unwrap().unwrap();
        assert_eq!(outcome.results, vec!["first", "other"]);
        // "bad" arrived after the cap, so it is dropped rather than reported invalid
        assert!(policy.invalid.lock().unwrap().is_empty());
        assert_eq!(*policy.completed.lock().unwrap(), vec!["a", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_messages_do_not_count() {
        let a = MockContactable::new("a");
        let mocks = vec![Arc::clone(&a)];
        let engine = Arc::new(CollectionEngine::new());
        let policy = Arc::new(EchoPolicy::new(1, 1));

        let run = {
            let engine = Arc::clone(&engine);
            let policy = Arc::clone(&policy);
            let participants = as_participants(&mocks);
            tokio::spawn(async move {
                engine
                    .collect(&participants, Duration::from_secs(4), policy.as_ref(), &NoProgress)
                    .await
            })
        };
        a.wait_for_listener().await;

        a.trigger("bad");
        a.trigger("bad");
        a.trigger("good");

        let outcome = run.await.unwrap().unwrap();
        assert_eq!(outcome.results, vec!["good"]);
        assert_eq!(*policy.invalid.lock().unwrap(), vec!["bad", "bad"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_resolves_with_partial_results_and_detaches() {
        let a = MockContactable::new("a");
        let b = MockContactable::new("b");
        let mocks = vec![Arc::clone(&a), Arc::clone(&b)];
        let engine = Arc::new(CollectionEngine::new());
        let policy = Arc::new(EchoPolicy::new(2, 2));

        let run = {
            let engine = Arc::clone(&engine);
            let policy = Arc::clone(&policy);
            let participants = as_participants(&mocks);
            tokio::spawn(async move {
                engine
                    .collect(&participants, Duration::from_secs(1), policy.as_ref(), &NoProgress)
                    .await
            })
        };
        a.wait_for_listener().await;
        b.wait_for_listener().await;
        a.trigger("only one");

        let outcome = run.await.unwrap().unwrap();
        assert!(outcome.timed_out);
        assert_eq!(outcome.results, vec!["only one"]);

        assert!(!a.trigger("too late"));
        assert_eq!(a.listener_count(), 0);
        assert_eq!(b.listener_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_policy_error_fails_run_and_detaches() {
        let a = MockContactable::new("a");
        let mocks = vec![Arc::clone(&a)];
        let engine = Arc::new(CollectionEngine::new());
        let policy = Arc::new(EchoPolicy::new(2, 1));

        let run = {
            let engine = Arc::clone(&engine);
            let policy = Arc::clone(&policy);
            let participants = as_participants(&mocks);
            tokio::spawn(async move {
                engine
                    .collect(&participants, Duration::from_secs(4), policy.as_ref(), &NoProgress)
                    .await
            })
        };
        a.wait_for_listener().await;
        a.trigger("explode");

        let result = run.await.unwrap();
        assert_eq!(
            result,
            Err(CollectionError::Policy("cannot convert".to_string()))
        );
        assert!(!a.trigger("after failure"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_runs_are_independent() {
        let a = MockContactable::new("a");
        let mocks = vec![Arc::clone(&a)];
        let engine = Arc::new(CollectionEngine::new());

        let spawn_run = |cap: usize| {
            let engine = Arc::clone(&engine);
            let participants = as_participants(&mocks);
            tokio::spawn(async move {
                let policy = EchoPolicy::new(cap, 1);
                engine
                    .collect(&participants, Duration::from_secs(4), &policy, &NoProgress)
                    .await
            })
        };
        let short = spawn_run(1);
        let long = spawn_run(2);
        while a.listener_count() < 2 {
            tokio::task::yield_now().await;
        }

        a.trigger("x");
        a.trigger("y");

        assert_eq!(short.await.unwrap().unwrap().results, vec!["x"]);
        assert_eq!(long.await.unwrap().unwrap().results, vec!["x", "y"]);
    }
}
