/// Traversal statistics
///
/// Accumulation is staged: a `StatsAccumulator` only collects counts and
/// running sums, and `finalize` consumes it to produce the `GraphStats`
/// report holding per-node means.

use crate::types::Node;
use serde::Serialize;
use std::fmt;

/// In-progress statistics for one traversal run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StatsAccumulator {
    num_nodes: u64,
    num_edges: u64,
    edge_sum: f64,
    color_sum: f64,
}

impl StatsAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one resolved node into the running totals
    pub fn observe(&mut self, node: &Node) {
        self.observe_counts(node.out_degree(), node.num_colors());
    }

    /// Fold a lookup miss as a node with no successors and no colors
    pub fn observe_absent(&mut self) {
        self.observe_counts(0, 0);
    }

    fn observe_counts(&mut self, edges: usize, colors: usize) {
        self.num_nodes += 1;
        self.num_edges += edges as u64;
        self.edge_sum += edges as f64;
        self.color_sum += colors as f64;
    }

    /// Nodes folded so far
    pub fn num_nodes(&self) -> u64 {
        self.num_nodes
    }

    /// Successor edges folded so far
    pub fn num_edges(&self) -> u64 {
        self.num_edges
    }

    /// Turn the running sums into per-node means
    ///
    /// The division is unconditional: with no nodes observed both averages
    /// are NaN.
    pub fn finalize(self) -> GraphStats {
        let n = self.num_nodes as f64;
        GraphStats {
            num_nodes: self.num_nodes,
            num_edges: self.num_edges,
            avg_num_edges: self.edge_sum / n,
            avg_num_colors: self.color_sum / n,
            num_components: 0,
        }
    }
}

/// Finalized statistics report
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GraphStats {
    pub num_nodes: u64,
    pub num_edges: u64,
    pub avg_num_edges: f64,
    pub avg_num_colors: f64,
    /// Reserved; connected components are not computed
    pub num_components: u64,
}

impl GraphStats {
    /// Render the five-line text report
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of nodes: {}", self.num_nodes)?;
        writeln!(f, "Number of edges: {}", self.num_edges)?;
        writeln!(f, "Average number of edges per node: {:.6}", self.avg_num_edges)?;
        writeln!(f, "Average number of colors per node: {:.6}", self.avg_num_colors)?;
        writeln!(f, "Number of components: {}", self.num_components)
    }
}
