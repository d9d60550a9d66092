//! Collection policy

use super::error::CollectionError;
use crate::ports::contactable::Contactable;
use async_trait::async_trait;

/// Decides what a run accepts and when it is done.
///
/// Hooks run inside the engine's single event loop: each one finishes
/// before the next inbound message or the timer is looked at, so a policy
/// never observes a half-applied message. Errors returned from any hook fail
/// the run.
///
/// `personal` is always the sender's accepted results in arrival order;
/// `all` is every participant's accepted results in arrival order.
#[async_trait]
pub trait CollectionPolicy: Send + Sync {
    type Output: Clone + Send + Sync;

    /// Whether `text` is an acceptable response
    fn validate(&self, text: &str) -> bool;

    /// Called for each message that fails [`validate`](Self::validate)
    async fn on_invalid(
        &self,
        _text: &str,
        _participant: &dyn Contactable,
    ) -> Result<(), CollectionError> {
        Ok(())
    }

    /// Whether the sender has given every response they may give
    fn is_personal_complete(&self, personal: &[Self::Output]) -> bool;

    /// Called once per participant, right after they complete
    async fn on_personal_complete(
        &self,
        _personal: &[Self::Output],
        _participant: &dyn Contactable,
    ) -> Result<(), CollectionError> {
        Ok(())
    }

    /// Build a result from a valid message.
    ///
    /// `personal` does not yet contain the new result.
    fn convert(
        &self,
        text: &str,
        personal: &[Self::Output],
        participant: &dyn Contactable,
    ) -> Result<Self::Output, CollectionError>;

    /// Called after `result` was appended; `personal` includes it
    async fn on_result(
        &self,
        _result: &Self::Output,
        _personal: &[Self::Output],
        _participant: &dyn Contactable,
    ) -> Result<(), CollectionError> {
        Ok(())
    }

    /// Whether the run as a whole is done
    fn is_total_complete(&self, all: &[Self::Output]) -> bool;

    /// Number of results that completes the run, if the count can ever do so
    fn expected_total(&self) -> Option<usize> {
        None
    }
}
