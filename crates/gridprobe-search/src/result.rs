//! Search outcomes.

use std::time::Duration;

use gridprobe_core::Point;

use crate::trace::RunTrace;

/// What a strategy returns when it terminates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// Start-to-goal cell sequence; empty on failure.
    pub path: Vec<Point>,
    /// Expansions performed during the run.
    pub nodes_explored: usize,
    /// Whether the goal was reached.
    pub success: bool,
}

impl SearchResult {
    /// A failed result carrying the expansion count.
    pub fn failure(nodes_explored: usize) -> Self {
        Self {
            path: Vec::new(),
            nodes_explored,
            success: false,
        }
    }

    /// A successful result with a reconstructed path.
    pub fn success(path: Vec<Point>, nodes_explored: usize) -> Self {
        Self {
            path,
            nodes_explored,
            success: true,
        }
    }
}

/// A finished run: the result, wall-clock duration, and the full trace
/// for snapshotting and tree projection.
#[derive(Debug)]
pub struct RunReport {
    pub result: SearchResult,
    pub elapsed: Duration,
    pub trace: RunTrace,
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn search_result_round_trip() {
        let r = SearchResult::success(vec![Point::new(1, 1), Point::new(1, 2)], 7);
        let json = serde_json::to_string(&r).unwrap();
        let back: SearchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
