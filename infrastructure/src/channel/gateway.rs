//! Gateway for local channels

use super::console::ConsoleContactable;
use super::memory::InMemoryContactable;
use async_trait::async_trait;
use huddle_application::ports::contactable::{Contactable, ContactableError, ContactableGateway};
use huddle_domain::ContactableConfig;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// `type` of the terminal channel
pub const CONSOLE_CHANNEL: &str = "cli";
/// `type` of the in-memory channel
pub const MEMORY_CHANNEL: &str = "memory";

/// Opens `cli` and `memory` channels; every other type is rejected.
///
/// In-memory participants are kept by id across runs so the embedding code
/// can reach them through [`memory_contactable`](Self::memory_contactable).
pub struct LocalContactableGateway {
    memory: Mutex<HashMap<String, Arc<InMemoryContactable>>>,
    console_shutdown: Mutex<Option<CancellationToken>>,
    console_enabled: bool,
}

impl Default for LocalContactableGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalContactableGateway {
    pub fn new() -> Self {
        Self {
            memory: Mutex::new(HashMap::new()),
            console_shutdown: Mutex::new(None),
            console_enabled: true,
        }
    }

    /// A gateway that refuses `cli` participants.
    ///
    /// For callers that already own stdin or stdout, such as a flow run
    /// streaming its events to stdout.
    pub fn without_console() -> Self {
        Self {
            console_enabled: false,
            ..Self::new()
        }
    }

    /// In-memory participant for `id`, created on first use
    pub fn memory_contactable(&self, id: &str) -> Arc<InMemoryContactable> {
        let mut memory = self
            .memory
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(memory.entry(id.to_string()).or_insert_with(|| {
            Arc::new(InMemoryContactable::new(ContactableConfig::new(
                MEMORY_CHANNEL,
                id,
            )))
        }))
    }

    fn check_supported(&self, configs: &[ContactableConfig]) -> Result<(), ContactableError> {
        let mut consoles = 0;
        for config in configs {
            match config.kind.as_str() {
                CONSOLE_CHANNEL if !self.console_enabled => {
                    return Err(ContactableError::InitFailed(format!(
                        "'{}' participants are not available here because stdin and stdout are in use",
                        CONSOLE_CHANNEL
                    )));
                }
                CONSOLE_CHANNEL => consoles += 1,
                MEMORY_CHANNEL => {}
                other => return Err(ContactableError::UnsupportedChannel(other.to_string())),
            }
        }
        if consoles > 1 {
            return Err(ContactableError::InitFailed(format!(
                "only one '{}' participant can share a terminal, got {}",
                CONSOLE_CHANNEL, consoles
            )));
        }
        Ok(())
    }

    fn console_token(&self) -> CancellationToken {
        let mut slot = self
            .console_shutdown
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        slot.get_or_insert_with(CancellationToken::new).clone()
    }
}

#[async_trait]
impl ContactableGateway for LocalContactableGateway {
    async fn init(
        &self,
        configs: &[ContactableConfig],
        _bot_configs: &serde_json::Value,
    ) -> Result<Vec<Arc<dyn Contactable>>, ContactableError> {
        self.check_supported(configs)?;

        let participants = configs
            .iter()
            .map(|config| -> Arc<dyn Contactable> {
                if config.kind == CONSOLE_CHANNEL {
                    ConsoleContactable::stdio(config.clone(), self.console_token())
                } else {
                    self.memory_contactable(&config.id)
                }
            })
            .collect::<Vec<_>>();

        info!("Initialized {} local channels", participants.len());
        Ok(participants)
    }

    async fn shutdown(&self) -> Result<(), ContactableError> {
        let token = self
            .console_shutdown
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(token) = token {
            debug!("Stopping console reader");
            token.cancel();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_init_memory_participants_in_order() {
        let gateway = LocalContactableGateway::new();
        let configs = vec![
            ContactableConfig::new("memory", "b"),
            ContactableConfig::new("memory", "a"),
        ];

        let participants = gateway.init(&configs, &json!({})).await.unwrap();

        let ids: Vec<String> = participants.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_memory_handles_are_shared() {
        let gateway = LocalContactableGateway::new();
        let participants = gateway
            .init(&[ContactableConfig::new("memory", "p1")], &json!({}))
            .await
            .unwrap();

        participants[0].speak("hello").await.unwrap();

        assert_eq!(gateway.memory_contactable("p1").spoken(), vec!["hello"]);
    }

    #[tokio::test]
    async fn test_unknown_channel_type_fails() {
        let gateway = LocalContactableGateway::new();
        let configs = vec![
            ContactableConfig::new("memory", "ok"),
            ContactableConfig::new("telegram", "42"),
        ];

        let result = gateway.init(&configs, &json!({})).await;

        assert!(matches!(
            result,
            Err(ContactableError::UnsupportedChannel(kind)) if kind == "telegram"
        ));
    }

    #[tokio::test]
    async fn test_two_console_participants_fail() {
        let gateway = LocalContactableGateway::new();
        let configs = vec![
            ContactableConfig::new("cli", "one"),
            ContactableConfig::new("cli", "two"),
        ];

        let result = gateway.init(&configs, &json!(null)).await;

        assert!(matches!(result, Err(ContactableError::InitFailed(_))));
    }

    #[tokio::test]
    async fn test_console_refused_when_disabled() {
        let gateway = LocalContactableGateway::without_console();
        let configs = vec![
            ContactableConfig::new("memory", "p1"),
            ContactableConfig::new("cli", "me"),
        ];

        let result = gateway.init(&configs, &json!({})).await;

        match result {
            Err(ContactableError::InitFailed(reason)) => assert!(reason.contains("'cli'")),
            other => panic!("expected InitFailed, got {:?}", other.map(|p| p.len())),
        }
        assert!(gateway.console_shutdown.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_still_opens_when_console_disabled() {
        let gateway = LocalContactableGateway::without_console();
        let participants = gateway
            .init(&[ContactableConfig::new("memory", "p1")], &json!({}))
            .await
            .unwrap();
        assert_eq!(participants.len(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_without_console_is_ok() {
        let gateway = LocalContactableGateway::new();
        assert!(gateway.shutdown().await.is_ok());
    }
}
