/// K-mer Graph Traversal
///
/// Looks up a stream of query k-mers in a colored k-mer graph and
/// summarizes the nodes found.
///
/// # Architecture
///
/// ```text
/// ┌──────────────────────────────────────────────────┐
/// │           K-mer Graph Traversal                  │
/// ├──────────────────────────────────────────────────┤
/// │  ┌────────────────────────────────┐              │
/// │  │   Query Source (one k-mer/line)│              │
/// │  └────────────┬───────────────────┘              │
/// │               ↓                                   │
/// │  ┌────────────────────────────────┐              │
/// │  │   Traversal Driver             │              │
/// │  │   callback | stats | walker    │              │
/// │  └──────┬─────────────────┬───────┘              │
/// │         ↓                 ↓                       │
/// │  ┌──────────────┐  ┌──────────────────┐          │
/// │  │  KmerGraph   │  │ StatsAccumulator │          │
/// │  │  (lookup)    │  │  → GraphStats    │          │
/// │  └──────────────┘  └──────────────────┘          │
/// └──────────────────────────────────────────────────┘
/// ```
///
/// # Modules
///
/// - `types`: Core data types (Kmer, Node, ColorId)
/// - `graph`: Graph lookup interface, in-memory graph and file loading
/// - `query`: Line-oriented query k-mer source
/// - `stats`: Statistics accumulator and finalized report
/// - `traversal`: Callback, statistics-only and pull-based drivers
/// - `config`: Logging configuration

pub mod config;
pub mod graph;
pub mod query;
pub mod stats;
pub mod traversal;
pub mod types;

// Re-export commonly used types
pub use types::{ColorId, Kmer, KmerError, Node};

// Re-export graph types
pub use graph::{open_graph, GraphBuilder, GraphError, GraphFormat, GraphResult, InMemoryGraph, KmerGraph, Lookup};

// Re-export query types
pub use query::{LinePolicy, QueryError, QuerySource, SourceState};

// Re-export statistics types
pub use stats::{GraphStats, StatsAccumulator};

// Re-export traversal types
pub use traversal::{
    traverse_graph, traverse_graph_stats, walk_graph, walk_graph_stats, KmerWalker, MissPolicy, Pull,
    TraversalError, TraversalOptions, TraversalReport, TraversalResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
