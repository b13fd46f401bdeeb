/// Query-driven graph traversal
///
/// This module runs a stream of query k-mers against a graph and folds the
/// nodes found into statistics. Three drivers share one skeleton:
/// - `traverse_graph`: eager, calls a handler for every node found
/// - `traverse_graph_stats`: eager, statistics only
/// - `KmerWalker`: lazy, pull-based; `walk_graph_stats` drains it

pub mod eager;
pub mod report;
pub mod walker;

pub use eager::{
    traverse_graph, traverse_graph_stats, traverse_graph_stats_with, traverse_graph_with,
    traverse_source, traverse_source_stats,
};
pub use report::TraversalReport;
pub use walker::{walk_graph, walk_graph_stats, walk_graph_stats_with, KmerWalker, Pull};

use crate::graph::GraphError;
use crate::query::{LinePolicy, QueryError};
use thiserror::Error;

/// Traversal errors
#[derive(Error, Debug)]
pub enum TraversalError {
    #[error("Graph error: {0}")]
    GraphError(#[from] GraphError),

    #[error("Query error: {0}")]
    QueryError(#[from] QueryError),
}

pub type TraversalResult<T> = Result<T, TraversalError>;

/// What the statistics-only driver does with a k-mer absent from the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissPolicy {
    /// Count the miss as a node with no successors and no colors
    #[default]
    CountAsEmpty,
    /// Leave the miss out of the statistics
    Skip,
}

/// Traversal options
#[derive(Debug, Clone)]
pub struct TraversalOptions {
    /// How query lines become lookup keys
    pub line_policy: LinePolicy,
    /// Miss handling for the statistics-only driver
    pub miss_policy: MissPolicy,
    /// Progress log interval in lines (0 = off)
    pub progress_interval: usize,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            line_policy: LinePolicy::Trimmed,
            miss_policy: MissPolicy::CountAsEmpty,
            progress_interval: 100_000,
        }
    }
}

impl TraversalOptions {
    pub(crate) fn progress(&self) -> Progress {
        Progress::new(self.progress_interval)
    }
}

/// Progress logging every `interval` query lines
///
/// Fires on the first check at or past each threshold, so line counts that
/// jump (skipped blank lines, misses pulled through by the walker) still log.
#[derive(Debug, Clone)]
pub(crate) struct Progress {
    interval: usize,
    next: usize,
}

impl Progress {
    pub(crate) fn new(interval: usize) -> Self {
        Self { interval, next: interval }
    }

    /// Log if a threshold was crossed; returns whether it logged
    pub(crate) fn check(&mut self, lines_read: usize, found: u64) -> bool {
        if self.interval == 0 || lines_read < self.next {
            return false;
        }
        tracing::debug!(lines_read, found, "Traversal progress");
        self.next = (lines_read / self.interval + 1) * self.interval;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_fires_on_exact_threshold() {
        let mut progress = Progress::new(2);
        assert!(!progress.check(1, 1));
        assert!(progress.check(2, 2));
        assert!(!progress.check(3, 3));
        assert!(progress.check(4, 4));
    }

    #[test]
    fn test_progress_survives_jumps() {
        let mut progress = Progress::new(10);
        assert!(!progress.check(7, 1));
        // 7 -> 13 skips line 10
        assert!(progress.check(13, 2));
        assert!(!progress.check(19, 3));
        // 19 -> 45 crosses several thresholds; logs once
        assert!(progress.check(45, 4));
        assert!(!progress.check(49, 5));
        assert!(progress.check(50, 6));
    }

    #[test]
    fn test_progress_disabled() {
        let mut progress = Progress::new(0);
        assert!(!progress.check(0, 0));
        assert!(!progress.check(1_000_000, 10));
    }
}
