//! Shared utilities for use cases.
//!
//! Intro and closing message delivery used by every collection use case.

use crate::ports::contactable::{Contactable, ContactableError};
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::debug;

/// Send `messages` to every participant.
///
/// Participants are served concurrently; each one receives the messages in
/// order, waiting for one to be accepted before sending the next.
pub(crate) async fn introduce(
    participants: &[Arc<dyn Contactable>],
    messages: &[String],
    logger: &dyn ConversationLogger,
) -> Result<(), ContactableError> {
    try_join_all(participants.iter().map(|participant| async move {
        for message in messages {
            speak_logged(participant.as_ref(), message, logger).await?;
        }
        Ok::<(), ContactableError>(())
    }))
    .await?;
    debug!(
        "Sent {} intro messages to {} participants",
        messages.len(),
        participants.len()
    );
    Ok(())
}

/// Send one message to every participant, concurrently
pub(crate) async fn broadcast(
    participants: &[Arc<dyn Contactable>],
    text: &str,
    logger: &dyn ConversationLogger,
) -> Result<(), ContactableError> {
    try_join_all(
        participants
            .iter()
            .map(|participant| speak_logged(participant.as_ref(), text, logger)),
    )
    .await?;
    Ok(())
}

/// Send one message and record it in the transcript
pub(crate) async fn speak_logged(
    participant: &dyn Contactable,
    text: &str,
    logger: &dyn ConversationLogger,
) -> Result<(), ContactableError> {
    participant.speak(text).await?;
    logger.log(ConversationEvent::new(
        "message_sent",
        serde_json::json!({ "participant": participant.id(), "text": text }),
    ));
    Ok(())
}

/// Milliseconds since the unix epoch, stamped on every collected result
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
