/// Traversal report
///
/// Wraps the finalized statistics with the counters a driver keeps about
/// its query stream, and the query error (if any) that was reported
/// instead of aborting the run.

use crate::query::QueryError;
use crate::stats::{GraphStats, StatsAccumulator};
use serde::{Serialize, Serializer};
use std::fmt;

/// Outcome of one traversal run
#[derive(Debug, Serialize)]
pub struct TraversalReport {
    pub stats: GraphStats,
    /// Raw lines consumed from the query source
    pub lines_read: usize,
    /// Graph lookups performed
    pub lookups: usize,
    /// Lookups that found no node
    pub misses: usize,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<QueryError>,
}

impl TraversalReport {
    pub(crate) fn new(
        accumulator: StatsAccumulator,
        lines_read: usize,
        lookups: usize,
        misses: usize,
        error: Option<QueryError>,
    ) -> Self {
        Self {
            stats: accumulator.finalize(),
            lines_read,
            lookups,
            misses,
            error,
        }
    }

    /// Report for a run whose query source could not be opened
    pub(crate) fn unopened(error: QueryError) -> Self {
        Self::new(StatsAccumulator::new(), 0, 0, 0, Some(error))
    }

    /// Check if the run hit a query error
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Print the statistics to stdout, then the query error (if any) to stderr
    pub fn print(&self) {
        println!("{}", self.stats);
        if let Some(error) = &self.error {
            eprintln!("{}", error);
        }
    }

    /// JSON form of the report
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for TraversalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stats)
    }
}

fn serialize_error<S: Serializer>(error: &Option<QueryError>, serializer: S) -> Result<S::Ok, S::Error> {
    match error {
        Some(error) => serializer.serialize_some(&error.to_string()),
        None => serializer.serialize_none(),
    }
}
