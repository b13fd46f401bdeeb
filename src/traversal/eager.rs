/// Eager traversal drivers
///
/// Both drivers read the whole query stream in one call, one line at a
/// time, and return a finalized report. The query source is owned by the
/// driver and dropped on every exit path.

use super::{MissPolicy, TraversalOptions, TraversalReport, TraversalResult};
use crate::graph::{open_graph, KmerGraph, Lookup};
use crate::query::QuerySource;
use crate::stats::StatsAccumulator;
use crate::types::Node;
use std::io::BufRead;
use std::path::Path;

/// Traverse a graph file with a query file, calling `handler` for every node found
///
/// Misses are skipped: they reach neither the statistics nor the handler.
/// The handler runs in-line, before the next query line is read.
///
/// # Returns
/// * `Ok(report)` once the query stream ends; a query file that cannot be
///   opened or read is recorded in `report.error`
/// * `Err(TraversalError::GraphError)` if the graph cannot be loaded
pub fn traverse_graph<P, Q, F>(
    graph_path: P,
    query_path: Q,
    options: &TraversalOptions,
    handler: F,
) -> TraversalResult<TraversalReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: FnMut(&Node),
{
    let graph = open_graph(graph_path)?;
    Ok(traverse_graph_with(&graph, query_path, options, handler))
}

/// Traverse a graph file with a query file, statistics only
///
/// Misses are handled by `options.miss_policy`.
pub fn traverse_graph_stats<P, Q>(
    graph_path: P,
    query_path: Q,
    options: &TraversalOptions,
) -> TraversalResult<TraversalReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let graph = open_graph(graph_path)?;
    Ok(traverse_graph_stats_with(&graph, query_path, options))
}

/// Callback traversal over an already loaded graph
pub fn traverse_graph_with<G, Q, F>(
    graph: &G,
    query_path: Q,
    options: &TraversalOptions,
    handler: F,
) -> TraversalReport
where
    G: KmerGraph + ?Sized,
    Q: AsRef<Path>,
    F: FnMut(&Node),
{
    match QuerySource::open(query_path, options.line_policy) {
        Ok(source) => traverse_source(graph, source, options, handler),
        Err(e) => {
            // Surfaced to the user through the report
            tracing::debug!("{}", e);
            TraversalReport::unopened(e)
        }
    }
}

/// Statistics-only traversal over an already loaded graph
pub fn traverse_graph_stats_with<G, Q>(
    graph: &G,
    query_path: Q,
    options: &TraversalOptions,
) -> TraversalReport
where
    G: KmerGraph + ?Sized,
    Q: AsRef<Path>,
{
    match QuerySource::open(query_path, options.line_policy) {
        Ok(source) => traverse_source_stats(graph, source, options),
        Err(e) => {
            // Surfaced to the user through the report
            tracing::debug!("{}", e);
            TraversalReport::unopened(e)
        }
    }
}

/// Callback traversal over any query source
pub fn traverse_source<G, R, F>(
    graph: &G,
    source: QuerySource<R>,
    options: &TraversalOptions,
    handler: F,
) -> TraversalReport
where
    G: KmerGraph + ?Sized,
    R: BufRead,
    F: FnMut(&Node),
{
    drive(graph, source, options, MissPolicy::Skip, handler)
}

/// Statistics-only traversal over any query source
pub fn traverse_source_stats<G, R>(
    graph: &G,
    source: QuerySource<R>,
    options: &TraversalOptions,
) -> TraversalReport
where
    G: KmerGraph + ?Sized,
    R: BufRead,
{
    drive(graph, source, options, options.miss_policy, |_| {})
}

fn drive<G, R, F>(
    graph: &G,
    mut source: QuerySource<R>,
    options: &TraversalOptions,
    miss_policy: MissPolicy,
    mut on_found: F,
) -> TraversalReport
where
    G: KmerGraph + ?Sized,
    R: BufRead,
    F: FnMut(&Node),
{
    let mut accumulator = StatsAccumulator::new();
    let mut lookups = 0;
    let mut misses = 0;
    let mut progress = options.progress();

    tracing::info!(graph_nodes = graph.node_count(), ?miss_policy, "Starting traversal");

    while let Some(kmer) = source.next_kmer() {
        lookups += 1;
        match graph.lookup(kmer) {
            Lookup::Found(node) => {
                accumulator.observe(&node);
                on_found(&node);
            }
            Lookup::NotFound => {
                misses += 1;
                if miss_policy == MissPolicy::CountAsEmpty {
                    accumulator.observe_absent();
                }
            }
        }
        progress.check(source.lines_read(), accumulator.num_nodes());
    }

    let error = source.take_error();
    if let Some(e) = &error {
        tracing::debug!("{}", e);
    }

    let lines_read = source.lines_read();
    drop(source);

    tracing::info!(lines_read, lookups, misses, "Traversal finished");

    TraversalReport::new(accumulator, lines_read, lookups, misses, error)
}
