/// Pull-based traversal
///
/// `KmerWalker` produces resolved nodes one at a time. It owns its graph
/// handle and its query source for its whole active lifetime, and releases
/// the source exactly once: when the stream ends, on `close`, or on drop.

use super::{TraversalOptions, TraversalReport, TraversalResult};
use crate::graph::{open_graph, InMemoryGraph, KmerGraph, Lookup};
use crate::query::{LinePolicy, QueryError, QueryResult, QuerySource};
use crate::stats::StatsAccumulator;
use crate::types::Node;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter::FusedIterator;
use std::path::Path;
use std::sync::Arc;

/// Result of one pull
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pull {
    /// Next node found, in query order
    Node(Arc<Node>),
    /// Query stream is over; returned on every later pull too
    End,
}

/// Lazy k-mer traversal
///
/// Each pull reads query lines and looks them up until one resolves to a
/// node. Misses are skipped and counted.
pub struct KmerWalker<G, R = BufReader<File>> {
    graph: G,
    source: Option<QuerySource<R>>,
    lines_read: usize,
    lookups: usize,
    misses: usize,
    error: Option<QueryError>,
}

impl<G: KmerGraph> KmerWalker<G> {
    /// Open a walker over a query file
    pub fn open<Q: AsRef<Path>>(graph: G, query_path: Q, policy: LinePolicy) -> QueryResult<Self> {
        let source = QuerySource::open(query_path, policy)?;
        Ok(Self::new(graph, source))
    }
}

impl<G: KmerGraph, R: BufRead> KmerWalker<G, R> {
    /// Create a walker over any query source
    pub fn new(graph: G, source: QuerySource<R>) -> Self {
        Self {
            graph,
            source: Some(source),
            lines_read: 0,
            lookups: 0,
            misses: 0,
            error: None,
        }
    }

    /// Produce the next resolved node, or `Pull::End`
    pub fn next_node(&mut self) -> Pull {
        let Some(source) = self.source.as_mut() else {
            return Pull::End;
        };

        loop {
            let Some(kmer) = source.next_kmer() else {
                self.release();
                return Pull::End;
            };

            self.lookups += 1;
            match self.graph.lookup(kmer) {
                Lookup::Found(node) => return Pull::Node(node),
                Lookup::NotFound => self.misses += 1,
            }
        }
    }

    /// Release the query source now; later pulls return `Pull::End`
    pub fn close(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut source) = self.source.take() {
            self.lines_read = source.lines_read();
            self.error = source.take_error();
            if let Some(e) = &self.error {
                tracing::debug!("{}", e);
            }
            tracing::debug!(
                lines_read = self.lines_read,
                lookups = self.lookups,
                misses = self.misses,
                "Walker released query source"
            );
        }
    }

    /// Check if the walker still holds its query source
    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }

    /// Raw query lines consumed so far
    pub fn lines_read(&self) -> usize {
        match &self.source {
            Some(source) => source.lines_read(),
            None => self.lines_read,
        }
    }

    /// Lookups performed so far
    pub fn lookups(&self) -> usize {
        self.lookups
    }

    /// Lookups that found no node
    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Read failure that ended the stream, if any
    pub fn error(&self) -> Option<&QueryError> {
        self.error.as_ref()
    }

    /// Get the graph handle
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Drain the walker into a finalized report
    pub fn into_report(mut self, options: &TraversalOptions) -> TraversalReport {
        let mut accumulator = StatsAccumulator::new();
        let mut progress = options.progress();

        while let Pull::Node(node) = self.next_node() {
            accumulator.observe(&node);
            progress.check(self.lines_read(), accumulator.num_nodes());
        }

        TraversalReport::new(
            accumulator,
            self.lines_read,
            self.lookups,
            self.misses,
            self.error.take(),
        )
    }
}

impl<G, R> Drop for KmerWalker<G, R> {
    fn drop(&mut self) {
        if self.source.take().is_some() {
            tracing::debug!("Walker dropped with query source still open");
        }
    }
}

impl<G: KmerGraph, R: BufRead> Iterator for KmerWalker<G, R> {
    type Item = Arc<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_node() {
            Pull::Node(node) => Some(node),
            Pull::End => None,
        }
    }
}

impl<G: KmerGraph, R: BufRead> FusedIterator for KmerWalker<G, R> {}

/// Open a graph file and a walker over a query file
pub fn walk_graph<P, Q>(
    graph_path: P,
    query_path: Q,
    policy: LinePolicy,
) -> TraversalResult<KmerWalker<InMemoryGraph>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let graph = open_graph(graph_path)?;
    Ok(KmerWalker::open(graph, query_path, policy)?)
}

/// Pull-based statistics traversal of a graph file with a query file
///
/// A query file that cannot be opened is reported and yields an empty
/// report, as with the eager drivers.
pub fn walk_graph_stats<P, Q>(
    graph_path: P,
    query_path: Q,
    options: &TraversalOptions,
) -> TraversalResult<TraversalReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let graph = open_graph(graph_path)?;
    Ok(walk_graph_stats_with(&graph, query_path, options))
}

/// Pull-based statistics traversal over an already loaded graph
pub fn walk_graph_stats_with<G, Q>(graph: &G, query_path: Q, options: &TraversalOptions) -> TraversalReport
where
    G: KmerGraph + ?Sized,
    Q: AsRef<Path>,
{
    match KmerWalker::open(graph, query_path, options.line_policy) {
        Ok(walker) => walker.into_report(options),
        Err(e) => {
            // Surfaced to the user through the report
            tracing::debug!("{}", e);
            TraversalReport::unopened(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::types::Kmer;
    use std::cell::Cell;
    use std::io::{self, Cursor, Read};
    use std::rc::Rc;

    fn kmer(s: &str) -> Kmer {
        Kmer::new(s).unwrap()
    }

    fn scenario_graph() -> InMemoryGraph {
        let mut builder = GraphBuilder::new();
        builder
            .add_node(Node::new(kmer("ACG"), vec![kmer("CGA"), kmer("CGT")], [0]))
            .unwrap()
            .add_node(Node::new(
                kmer("CGT"),
                ["GTA", "GTC", "GTG", "GTT", "GTN"].into_iter().map(kmer).collect(),
                [0, 1, 2],
            ))
            .unwrap();
        builder.build()
    }

    fn walker<'a>(graph: &'a InMemoryGraph, input: &str) -> KmerWalker<&'a InMemoryGraph, Cursor<String>> {
        let source = QuerySource::from_reader(Cursor::new(input.to_string()), LinePolicy::Trimmed);
        KmerWalker::new(graph, source)
    }

    fn pulled_kmer(pull: Pull) -> String {
        match pull {
            Pull::Node(node) => node.kmer().to_string(),
            Pull::End => panic!("expected a node"),
        }
    }

    #[test]
    fn test_pulls_nodes_in_order_then_end() {
        let graph = scenario_graph();
        let mut walker = walker(&graph, "ACG\nTTT\nCGT\n");

        assert_eq!(pulled_kmer(walker.next_node()), "ACG");
        assert_eq!(pulled_kmer(walker.next_node()), "CGT");
        assert!(walker.is_open());

        assert_eq!(walker.next_node(), Pull::End);
        assert!(!walker.is_open());
        assert_eq!(walker.next_node(), Pull::End);
        assert_eq!(walker.next_node(), Pull::End);

        assert_eq!(walker.lookups(), 3);
        assert_eq!(walker.misses(), 1);
        assert_eq!(walker.lines_read(), 3);
    }

    #[test]
    fn test_close_before_exhaustion() {
        let graph = scenario_graph();
        let mut walker = walker(&graph, "ACG\nCGT\n");

        assert!(matches!(walker.next_node(), Pull::Node(_)));
        walker.close();
        assert!(!walker.is_open());
        assert_eq!(walker.next_node(), Pull::End);

        // Closing twice is a no-op
        walker.close();
        assert_eq!(walker.lines_read(), 1);
    }

    #[test]
    fn test_iterator_is_fused() {
        let graph = scenario_graph();
        let mut walker = walker(&graph, "TTT\nCGT\nACG\n");

        let kmers: Vec<String> = walker.by_ref().map(|n| n.kmer().to_string()).collect();
        assert_eq!(kmers, vec!["CGT", "ACG"]);
        assert!(walker.next().is_none());
    }

    #[test]
    fn test_into_report_matches_callback_stats() {
        let graph = scenario_graph();
        let report = walker(&graph, "ACG\nTTT\nCGT\n").into_report(&TraversalOptions::default());

        assert_eq!(report.stats.num_nodes, 2);
        assert_eq!(report.stats.num_edges, 7);
        assert!((report.stats.avg_num_edges - 3.5).abs() < 1e-9);
        assert!((report.stats.avg_num_colors - 2.0).abs() < 1e-9);
        assert_eq!(report.misses, 1);
    }

    struct FailingReader {
        data: Cursor<Vec<u8>>,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::Other, "device gone")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_read_failure_keeps_partial_stats() {
        let graph = scenario_graph();
        let reader = io::BufReader::new(FailingReader {
            data: Cursor::new(b"ACG\n".to_vec()),
        });
        let walker = KmerWalker::new(&graph, QuerySource::from_reader(reader, LinePolicy::Trimmed));

        let report = walker.into_report(&TraversalOptions::default());
        assert_eq!(report.stats.num_nodes, 1);
        assert_eq!(report.stats.num_edges, 2);
        assert!(matches!(report.error, Some(QueryError::Read { line: 1, .. })));
    }

    /// Reader that counts how many times it is dropped
    struct DropCounting {
        data: Cursor<Vec<u8>>,
        drops: Rc<Cell<u32>>,
    }

    impl Read for DropCounting {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.data.read(buf)
        }
    }

    impl Drop for DropCounting {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    fn counted_walker<'a>(
        graph: &'a InMemoryGraph,
        drops: &Rc<Cell<u32>>,
    ) -> KmerWalker<&'a InMemoryGraph, BufReader<DropCounting>> {
        let reader = BufReader::new(DropCounting {
            data: Cursor::new(b"ACG\nTTT\nCGT\n".to_vec()),
            drops: Rc::clone(drops),
        });
        KmerWalker::new(graph, QuerySource::from_reader(reader, LinePolicy::Trimmed))
    }

    #[test]
    fn test_drop_mid_stream_releases_reader_once() {
        let graph = scenario_graph();
        let drops = Rc::new(Cell::new(0));
        let mut walker = counted_walker(&graph, &drops);

        assert_eq!(pulled_kmer(walker.next_node()), "ACG");
        assert!(walker.is_open());
        assert_eq!(drops.get(), 0);

        drop(walker);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_close_then_drop_releases_reader_once() {
        let graph = scenario_graph();
        let drops = Rc::new(Cell::new(0));
        let mut walker = counted_walker(&graph, &drops);

        assert_eq!(pulled_kmer(walker.next_node()), "ACG");
        walker.close();
        assert_eq!(drops.get(), 1);

        walker.close();
        drop(walker);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_exhaustion_then_drop_releases_reader_once() {
        let graph = scenario_graph();
        let drops = Rc::new(Cell::new(0));
        let mut walker = counted_walker(&graph, &drops);

        assert_eq!(walker.by_ref().count(), 2);
        assert_eq!(drops.get(), 1);

        drop(walker);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_walker_owns_graph() {
        let graph = Arc::new(scenario_graph());
        let source = QuerySource::from_reader(Cursor::new("CGT\n".to_string()), LinePolicy::Trimmed);
        let mut walker = KmerWalker::new(Arc::clone(&graph), source);
        drop(graph);

        assert_eq!(pulled_kmer(walker.next_node()), "CGT");
        assert_eq!(walker.graph().node_count(), 2);
    }

    #[test]
    fn test_walk_missing_query_file() {
        let graph = scenario_graph();
        let temp_dir = tempfile::TempDir::new().unwrap();

        let report = walk_graph_stats_with(
            &graph,
            temp_dir.path().join("missing.txt"),
            &TraversalOptions::default(),
        );
        assert!(report.has_error());
        assert_eq!(report.stats.num_nodes, 0);
        assert!(report.stats.avg_num_edges.is_nan());
    }
}
