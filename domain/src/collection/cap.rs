//! Per-participant response cap

use serde::{Deserialize, Serialize};

/// Maximum number of accepted responses per participant.
///
/// `Unlimited` never completes by count, so a run using it can only finish
/// by timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "Option<usize>", into = "Option<usize>")]
pub enum ResponseCap {
    Limited(usize),
    #[default]
    Unlimited,
}

impl ResponseCap {
    /// The finite limit, if any
    pub fn limit(&self) -> Option<usize> {
        match self {
            ResponseCap::Limited(n) => Some(*n),
            ResponseCap::Unlimited => None,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, ResponseCap::Unlimited)
    }

    /// Whether `count` responses fill this cap
    pub fn is_reached(&self, count: usize) -> bool {
        match self {
            ResponseCap::Limited(n) => count >= *n,
            ResponseCap::Unlimited => false,
        }
    }

    /// Total responses expected from `participants` participants
    ///
    /// Returns `None` for an unlimited cap.
    pub fn total_for(&self, participants: usize) -> Option<usize> {
        self.limit().map(|n| n * participants)
    }
}

impl From<Option<usize>> for ResponseCap {
    fn from(value: Option<usize>) -> Self {
        match value {
            Some(n) => ResponseCap::Limited(n),
            None => ResponseCap::Unlimited,
        }
    }
}

impl From<ResponseCap> for Option<usize> {
    fn from(cap: ResponseCap) -> Self {
        cap.limit()
    }
}

impl std::fmt::Display for ResponseCap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseCap::Limited(n) => write!(f, "{}", n),
            ResponseCap::Unlimited => write!(f, "unlimited"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limited_cap() {
        let cap = ResponseCap::Limited(2);
        assert!(!cap.is_reached(1));
        assert!(cap.is_reached(2));
        assert_eq!(cap.total_for(3), Some(6));
    }

    #[test]
    fn test_unlimited_cap_never_reached() {
        let cap = ResponseCap::Unlimited;
        assert!(!cap.is_reached(usize::MAX));
        assert_eq!(cap.total_for(3), None);
        assert_eq!(cap.to_string(), "unlimited");
    }

    #[test]
    fn test_cap_serde_as_optional_number() {
        let cap: ResponseCap = serde_json::from_str("3").unwrap();
        assert_eq!(cap, ResponseCap::Limited(3));

        let cap: ResponseCap = serde_json::from_str("null").unwrap();
        assert_eq!(cap, ResponseCap::Unlimited);

        assert_eq!(serde_json::to_string(&ResponseCap::Limited(1)).unwrap(), "1");
    }
}
