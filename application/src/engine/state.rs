//! Per-run state machine

use huddle_domain::CollectionOutcome;
use tokio_util::sync::CancellationToken;

/// Phase of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Collecting,
    Resolved { timed_out: bool },
}

#[derive(Debug)]
struct ParticipantProgress<R> {
    results: Vec<R>,
    capped: bool,
}

impl<R> Default for ParticipantProgress<R> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            capped: false,
        }
    }
}

/// Everything one run knows: results, caps, and whether it is over.
///
/// Owned by exactly one run and only touched from its event loop.
/// [`resolve`](Self::resolve) is the single terminal transition; its entry
/// action cancels `detach`, which detaches every listener of the run.
#[derive(Debug)]
pub struct RunState<R> {
    phase: RunPhase,
    all: Vec<R>,
    participants: Vec<ParticipantProgress<R>>,
    detach: CancellationToken,
}

impl<R: Clone> RunState<R> {
    pub fn new(participants: usize, detach: CancellationToken) -> Self {
        Self {
            phase: RunPhase::Collecting,
            all: Vec::new(),
            participants: (0..participants).map(|_| ParticipantProgress::default()).collect(),
            detach,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, RunPhase::Resolved { .. })
    }

    /// Whether participant `index` has been capped; unknown indexes count as capped
    pub fn is_capped(&self, index: usize) -> bool {
        self.participants.get(index).is_none_or(|p| p.capped)
    }

    /// Mark participant `index` capped.
    ///
    /// Returns `true` only on the first call for that participant.
    pub fn mark_capped(&mut self, index: usize) -> bool {
        match self.participants.get_mut(index) {
            Some(p) if !p.capped => {
                p.capped = true;
                true
            }
            _ => false,
        }
    }

    /// Append `result` to participant `index` and to the global list
    pub fn accept(&mut self, index: usize, result: R) {
        if let Some(p) = self.participants.get_mut(index) {
            p.results.push(result.clone());
            self.all.push(result);
        }
    }

    /// Accepted results of participant `index`, in arrival order
    pub fn personal(&self, index: usize) -> &[R] {
        self.participants
            .get(index)
            .map(|p| p.results.as_slice())
            .unwrap_or(&[])
    }

    /// Accepted results of everyone, in arrival order
    pub fn all(&self) -> &[R] {
        &self.all
    }

    /// Enter `Resolved`, detaching all listeners.
    ///
    /// Returns the outcome on the first call and `None` on every later call.
    pub fn resolve(&mut self, timed_out: bool) -> Option<CollectionOutcome<R>> {
        if self.is_resolved() {
            return None;
        }
        self.phase = RunPhase::Resolved { timed_out };
        self.detach.cancel();
        Some(CollectionOutcome {
            timed_out,
            results: std::mem::take(&mut self.all),
        })
    }
}
