//! In-memory channel

use async_trait::async_trait;
use huddle_application::ports::contactable::{Contactable, ContactableError, MessageListener};
use huddle_domain::ContactableConfig;
use std::sync::Mutex;
use tokio::sync::broadcast;

const OUTBOX_CAPACITY: usize = 256;

/// A participant whose messages are exchanged in-process.
///
/// Everything the run says is kept in order and also published to
/// subscribers; [`send`](Self::send) plays the participant's side. Any
/// number of runs may listen at once.
pub struct InMemoryContactable {
    config: ContactableConfig,
    spoken: Mutex<Vec<String>>,
    listeners: Mutex<Vec<MessageListener>>,
    outbox: broadcast::Sender<String>,
}

impl InMemoryContactable {
    pub fn new(config: ContactableConfig) -> Self {
        let (outbox, _) = broadcast::channel(OUTBOX_CAPACITY);
        Self {
            config,
            spoken: Mutex::new(Vec::new()),
            listeners: Mutex::new(Vec::new()),
            outbox,
        }
    }

    /// Deliver `text` from the participant to every listening run.
    ///
    /// Returns how many runs received it.
    pub fn send(&self, text: &str) -> usize {
        let Ok(mut listeners) = self.listeners.lock() else {
            return 0;
        };
        listeners.retain(|l| !l.is_detached());
        listeners.iter().filter(|l| l.deliver(text)).count()
    }

    /// Everything said to this participant so far
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Stream of messages said to this participant from now on
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.outbox.subscribe()
    }

    /// Number of runs currently listening
    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .map(|l| l.iter().filter(|l| !l.is_detached()).count())
            .unwrap_or(0)
    }
}

#[async_trait]
impl Contactable for InMemoryContactable {
    fn config(&self) -> ContactableConfig {
        self.config.clone()
    }

    async fn speak(&self, text: &str) -> Result<(), ContactableError> {
        self.spoken
            .lock()
            .map_err(|_| ContactableError::Closed)?
            .push(text.to_string());
        // No subscribers is fine
        let _ = self.outbox.send(text.to_string());
        Ok(())
    }

    fn listen(&self, listener: MessageListener) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(listener);
        }
    }
}
