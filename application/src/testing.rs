//! Test doubles shared by the engine and use case tests.

use crate::ports::contactable::{Contactable, ContactableError, MessageListener};
use async_trait::async_trait;
use huddle_domain::ContactableConfig;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// In-process participant that records what it was told and lets tests
/// inject replies.
pub(crate) struct MockContactable {
    config: ContactableConfig,
    spoken: Mutex<Vec<String>>,
    listeners: Mutex<Vec<MessageListener>>,
    listener_added: Notify,
    fail_speak: bool,
    speak_delay: Option<Duration>,
}

impl MockContactable {
    pub(crate) fn new(id: &str) -> Arc<Self> {
        Arc::new(Self::build(id, false))
    }

    /// A participant whose every `speak` fails
    pub(crate) fn unreachable(id: &str) -> Arc<Self> {
        Arc::new(Self::build(id, true))
    }

    /// A participant whose every `speak` takes `delay` before it is accepted
    pub(crate) fn slow(id: &str, delay: Duration) -> Arc<Self> {
        let mut mock = Self::build(id, false);
        mock.speak_delay = Some(delay);
        Arc::new(mock)
    }

    fn build(id: &str, fail_speak: bool) -> Self {
        Self {
            config: ContactableConfig::new("mock", id),
            spoken: Mutex::new(Vec::new()),
            listeners: Mutex::new(Vec::new()),
            listener_added: Notify::new(),
            fail_speak,
            speak_delay: None,
        }
    }

    /// Deliver `text` as if the participant sent it; returns whether any run received it
    pub(crate) fn trigger(&self, text: &str) -> bool {
        let mut listeners = self.listeners.lock().unwrap();
        listeners.retain(|l| !l.is_detached());
        let mut delivered = false;
        for listener in listeners.iter() {
            delivered |= listener.deliver(text);
        }
        delivered
    }

    pub(crate) fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap()
            .iter()
            .filter(|l| !l.is_detached())
            .count()
    }

    /// Wait until some run listens to this participant
    pub(crate) async fn wait_for_listener(&self) {
        loop {
            let notified = self.listener_added.notified();
            if self.listener_count() > 0 {
                return;
            }
            notified.await;
        }
    }
}

#[async_trait]
impl Contactable for MockContactable {
    fn config(&self) -> ContactableConfig {
        self.config.clone()
    }

    async fn speak(&self, text: &str) -> Result<(), ContactableError> {
        if let Some(delay) = self.speak_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_speak {
            return Err(ContactableError::SendFailed {
                participant: self.config.id.clone(),
                reason: "unreachable".to_string(),
            });
        }
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn listen(&self, listener: MessageListener) {
        self.listeners.lock().unwrap().push(listener);
        self.listener_added.notify_waiters();
    }
}

/// Upcast a list of mocks for use case inputs
pub(crate) fn as_participants(mocks: &[Arc<MockContactable>]) -> Vec<Arc<dyn Contactable>> {
    mocks
        .iter()
        .map(|m| Arc::clone(m) as Arc<dyn Contactable>)
        .collect()
}
