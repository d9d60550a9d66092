//! Result of a finished collection run

use serde::{Deserialize, Serialize};

/// Ordered results of one run and how it ended.
///
/// `results` is in arrival order across all participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionOutcome<R> {
    /// `true` when the timer ended the run, `false` when every participant finished
    pub timed_out: bool,
    pub results: Vec<R>,
}

impl<R> CollectionOutcome<R> {
    pub fn completed(results: Vec<R>) -> Self {
        Self {
            timed_out: false,
            results,
        }
    }

    pub fn timed_out(results: Vec<R>) -> Self {
        Self {
            timed_out: true,
            results,
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Convert the results while keeping the resolution flag
    pub fn map<T>(self, f: impl FnMut(R) -> T) -> CollectionOutcome<T> {
        CollectionOutcome {
            timed_out: self.timed_out,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_constructors() {
        let done = CollectionOutcome::completed(vec![1, 2]);
        assert!(!done.timed_out);
        assert_eq!(done.len(), 2);

        let late: CollectionOutcome<i32> = CollectionOutcome::timed_out(vec![]);
        assert!(late.timed_out);
        assert!(late.is_empty());
    }

    #[test]
    fn test_outcome_serializes_timed_out_flag() {
        let json = serde_json::to_string(&CollectionOutcome::timed_out(vec!["x"])).unwrap();
        assert_eq!(json, r#"{"timedOut":true,"results":["x"]}"#);
    }
}
