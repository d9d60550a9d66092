//! Contactable port
//!
//! Defines how the application layer talks to participants. A channel
//! adapter (chat bot, terminal, in-memory double) implements [`Contactable`]
//! for one participant and [`ContactableGateway`] for bringing a set of them
//! up and down.
//!
//! # Inbound delivery
//!
//! ```text
//! participant A ─┐  listener(0).deliver("hi")
//! participant B ─┼──────────────────────────────▶ run queue (one mpsc) ──▶ engine
//! participant C ─┘  listener(2).deliver("idea")
//! ```
//!
//! Every listener of a run shares one queue, so queue order is arrival
//! order across all participants. Listeners are detached when the run
//! resolves; channels must stop delivering to (and may drop) a detached
//! listener.

use async_trait::async_trait;
use huddle_domain::ContactableConfig;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Errors raised by channel adapters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactableError {
    #[error("Channel initialization failed: {0}")]
    InitFailed(String),

    #[error("Unsupported channel type: {0}")]
    UnsupportedChannel(String),

    #[error("Failed to send message to {participant}: {reason}")]
    SendFailed { participant: String, reason: String },

    #[error("Channel closed")]
    Closed,

    #[error("Other error: {0}")]
    Other(String),
}

/// A message received from one participant of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Index of the sender in the run's participant list
    pub participant: usize,
    pub text: String,
}

/// Handle a channel uses to push inbound text into a run.
#[derive(Debug, Clone)]
pub struct MessageListener {
    participant: usize,
    sender: mpsc::UnboundedSender<InboundMessage>,
    detached: CancellationToken,
}

impl MessageListener {
    pub fn new(
        participant: usize,
        sender: mpsc::UnboundedSender<InboundMessage>,
        detached: CancellationToken,
    ) -> Self {
        Self {
            participant,
            sender,
            detached,
        }
    }

    /// Push a message into the run.
    ///
    /// Returns `false` once the listener is detached; the channel should then
    /// forget it.
    pub fn deliver(&self, text: impl Into<String>) -> bool {
        if self.is_detached() {
            return false;
        }
        self.sender
            .send(InboundMessage {
                participant: self.participant,
                text: text.into(),
            })
            .is_ok()
    }

    pub fn is_detached(&self) -> bool {
        self.detached.is_cancelled() || self.sender.is_closed()
    }
}

/// One participant reachable over some channel
#[async_trait]
pub trait Contactable: Send + Sync {
    /// Identity snapshot of this channel
    fn config(&self) -> ContactableConfig;

    /// Participant id (shorthand for `config().id`)
    fn id(&self) -> String {
        self.config().id
    }

    /// Send text to the participant.
    ///
    /// Resolves once the channel accepted the message, so consecutive awaited
    /// calls arrive in order.
    async fn speak(&self, text: &str) -> Result<(), ContactableError>;

    /// Start delivering inbound text to `listener`.
    ///
    /// Channels must support several listeners at once (overlapping runs).
    fn listen(&self, listener: MessageListener);
}

/// Brings channels up for a set of participant configs and tears them down
#[async_trait]
pub trait ContactableGateway: Send + Sync {
    /// Initialize channels and return one [`Contactable`] per config, in order.
    ///
    /// `bot_configs` carries channel-family credentials and is opaque to the
    /// application layer.
    async fn init(
        &self,
        configs: &[ContactableConfig],
        bot_configs: &serde_json::Value,
    ) -> Result<Vec<Arc<dyn Contactable>>, ContactableError>;

    /// Release every channel opened by [`init`](Self::init)
    async fn shutdown(&self) -> Result<(), ContactableError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listener_tags_messages_with_participant() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let listener = MessageListener::new(3, tx, CancellationToken::new());

        assert!(listener.deliver("hello"));
        let message = rx.try_recv().unwrap();
        assert_eq!(message.participant, 3);
        assert_eq!(message.text, "hello");
    }

    #[test]
    fn test_detached_listener_drops_messages() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let listener = MessageListener::new(0, tx, token.clone());

        token.cancel();
        assert!(listener.is_detached());
        assert!(!listener.deliver("late"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_listener_detached_when_run_queue_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        let listener = MessageListener::new(0, tx, CancellationToken::new());
        drop(rx);
        assert!(listener.is_detached());
        assert!(!listener.deliver("nobody listening"));
    }
}
