//! Progress notification port
//!
//! Defines the interface for reporting progress during a collection run.

/// Callback for progress updates during a collection run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain text, etc.)
pub trait CollectionProgress: Send + Sync {
    /// Called once listeners are attached and the timer has started.
    ///
    /// `expected` is the total number of responses that completes the run,
    /// or `None` when only the timer can end it.
    fn on_collection_start(&self, participants: usize, expected: Option<usize>);

    /// Called when a response is accepted
    fn on_response_accepted(&self, participant: &str, total_accepted: usize);

    /// Called when a response fails validation
    fn on_response_rejected(&self, _participant: &str, _text: &str) {}

    /// Called when a participant reaches their cap
    fn on_participant_complete(&self, _participant: &str) {}

    /// Called exactly once when the run resolves
    fn on_collection_complete(&self, timed_out: bool, total_accepted: usize);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl CollectionProgress for NoProgress {
    fn on_collection_start(&self, _participants: usize, _expected: Option<usize>) {}
    fn on_response_accepted(&self, _participant: &str, _total_accepted: usize) {}
    fn on_collection_complete(&self, _timed_out: bool, _total_accepted: usize) {}
}
