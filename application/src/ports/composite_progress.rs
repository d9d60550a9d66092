//! Composite progress notifier that delegates to multiple notifiers.
//!
//! Used to fan out run events to both the terminal progress bar and the
//! per-participant tally shown in the final report.

use super::progress::CollectionProgress;

/// A progress notifier that delegates to multiple inner notifiers.
///
/// Uses borrowed references with a lifetime parameter so both owned and
/// borrowed notifiers can be composed without wrapper types.
pub struct CompositeProgress<'a> {
    delegates: Vec<&'a dyn CollectionProgress>,
}

impl<'a> CompositeProgress<'a> {
    pub fn new(delegates: Vec<&'a dyn CollectionProgress>) -> Self {
        Self { delegates }
    }
}

/// Macro to delegate a method call to all inner notifiers.
macro_rules! delegate {
    ($self:ident, $method:ident $(, $arg:expr)*) => {
        for d in &$self.delegates {
            d.$method($($arg),*);
        }
    };
}

impl CollectionProgress for CompositeProgress<'_> {
    fn on_collection_start(&self, participants: usize, expected: Option<usize>) {
        delegate!(self, on_collection_start, participants, expected);
    }

    fn on_response_accepted(&self, participant: &str, total_accepted: usize) {
        delegate!(self, on_response_accepted, participant, total_accepted);
    }

    fn on_response_rejected(&self, participant: &str, text: &str) {
        delegate!(self, on_response_rejected, participant, text);
    }

    fn on_participant_complete(&self, participant: &str) {
        delegate!(self, on_participant_complete, participant);
    }

    fn on_collection_complete(&self, timed_out: bool, total_accepted: usize) {
        delegate!(self, on_collection_complete, timed_out, total_accepted);
    }
}
