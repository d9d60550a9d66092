//! Run counters

use huddle_application::ports::progress::CollectionProgress;
use std::sync::Mutex;

/// Counts what happened during a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallySnapshot {
    pub participants: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Participants that reached their cap, in order
    pub completed: Vec<String>,
    pub timed_out: Option<bool>,
}

impl TallySnapshot {
    /// One-line human summary
    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!("{} accepted", self.accepted),
            format!("{} invalid", self.rejected),
            format!(
                "{}/{} participants finished",
                self.completed.len(),
                self.participants
            ),
        ];
        if self.timed_out == Some(true) {
            parts.push("stopped by time limit".to_string());
        }
        parts.join(", ")
    }
}

/// Progress sink that only counts
#[derive(Default)]
pub struct RunTally {
    inner: Mutex<TallySnapshot>,
}

impl RunTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> TallySnapshot {
        self.inner.lock().map(|t| t.clone()).unwrap_or_default()
    }

    fn update(&self, f: impl FnOnce(&mut TallySnapshot)) {
        if let Ok(mut tally) = self.inner.lock() {
            f(&mut tally);
        }
    }
}

impl CollectionProgress for RunTally {
    fn on_collection_start(&self, participants: usize, _expected: Option<usize>) {
        self.update(|t| t.participants = participants);
    }

    fn on_response_accepted(&self, _participant: &str, total_accepted: usize) {
        self.update(|t| t.accepted = total_accepted);
    }

    fn on_response_rejected(&self, _participant: &str, _text: &str) {
        self.update(|t| t.rejected += 1);
    }

    fn on_participant_complete(&self, participant: &str) {
        self.update(|t| t.completed.push(participant.to_string()));
    }

    fn on_collection_complete(&self, timed_out: bool, total_accepted: usize) {
        self.update(|t| {
            t.accepted = total_accepted;
            t.timed_out = Some(timed_out);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_events() {
        let tally = RunTally::new();
        tally.on_collection_start(2, Some(2));
        tally.on_response_rejected("p1", "maybe");
        tally.on_response_accepted("p1", 1);
        tally.on_participant_complete("p1");
        tally.on_collection_complete(true, 1);

        let snapshot = tally.snapshot();
        assert_eq!(snapshot.accepted, 1);
        assert_eq!(snapshot.rejected, 1);
        assert_eq!(snapshot.completed, vec!["p1"]);
        assert_eq!(
            snapshot.summary(),
            "1 accepted, 1 invalid, 1/2 participants finished, stopped by time limit"
        );
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(
            TallySnapshot::default().summary(),
            "0 accepted, 0 invalid, 0/0 participants finished"
        );
    }
}
