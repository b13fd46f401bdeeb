/// In-memory k-mer graph
///
/// Nodes are indexed by k-mer text in a hash map and shared as `Arc<Node>`
/// so lookups hand out cheap handles without borrowing the graph.

use super::{GraphError, GraphResult, KmerGraph, Lookup};
use crate::types::{Kmer, Node};
use std::collections::HashMap;
use std::sync::Arc;

/// Hash-indexed k-mer graph
#[derive(Debug, Default, Clone)]
pub struct InMemoryGraph {
    nodes: HashMap<Kmer, Arc<Node>>,
    k: Option<usize>,
}

impl InMemoryGraph {
    /// Start building a graph
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Iterate over all nodes, in no particular order
    pub fn nodes(&self) -> impl Iterator<Item = &Arc<Node>> {
        self.nodes.values()
    }

    /// Check if a k-mer is a node
    pub fn contains(&self, kmer: &str) -> bool {
        self.nodes.contains_key(kmer)
    }

    /// Total number of successor edges
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.out_degree()).sum()
    }
}

impl KmerGraph for InMemoryGraph {
    fn lookup(&self, kmer: &str) -> Lookup {
        self.nodes.get(kmer).cloned().into()
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn k(&self) -> Option<usize> {
        self.k
    }
}

/// Builder for InMemoryGraph
///
/// Validates that every node k-mer has the same length and that no k-mer
/// is declared twice. Successors may name k-mers that are not nodes; they
/// are edge targets only.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: HashMap<Kmer, Arc<Node>>,
    k: Option<usize>,
}

impl GraphBuilder {
    /// Create an empty builder; k is taken from the first node
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the k-mer length up front
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }

    /// Add a node
    ///
    /// # Returns
    /// * `Err(GraphError::InconsistentLength)` if the k-mer length differs from k
    /// * `Err(GraphError::DuplicateKmer)` if the k-mer was already added
    pub fn add_node(&mut self, node: Node) -> GraphResult<&mut Self> {
        let len = node.kmer.len();
        match self.k {
            Some(k) if k != len => {
                return Err(GraphError::InconsistentLength {
                    kmer: node.kmer.to_string(),
                    expected: k,
                    found: len,
                });
            }
            Some(_) => {}
            None => self.k = Some(len),
        }

        if self.nodes.contains_key(&node.kmer) {
            return Err(GraphError::DuplicateKmer(node.kmer.to_string()));
        }

        self.nodes.insert(node.kmer.clone(), Arc::new(node));
        Ok(self)
    }

    /// Number of nodes added so far
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if no nodes were added
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Finish the graph
    pub fn build(self) -> InMemoryGraph {
        InMemoryGraph {
            nodes: self.nodes,
            k: self.k,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kmer(s: &str) -> Kmer {
        Kmer::new(s).unwrap()
    }

    fn sample_graph() -> InMemoryGraph {
        let mut builder = InMemoryGraph::builder();
        builder
            .add_node(Node::new(kmer("ACG"), vec![kmer("CGT"), kmer("CGA")], [0]))
            .unwrap()
            .add_node(Node::new(kmer("CGT"), vec![kmer("GTA")], [0, 1]))
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_lookup_found() {
        let graph = sample_graph();

        match graph.lookup("ACG") {
            Lookup::Found(node) => {
                assert_eq!(node.kmer().as_str(), "ACG");
                assert_eq!(node.out_degree(), 2);
            }
            Lookup::NotFound => panic!("ACG should be found"),
        }
    }

    #[test]
    fn test_lookup_not_found() {
        let graph = sample_graph();

        // Dangling successor is not a node
        assert_eq!(graph.lookup("CGA"), Lookup::NotFound);
        assert_eq!(graph.lookup("ACGT"), Lookup::NotFound);
        assert_eq!(graph.lookup(""), Lookup::NotFound);
    }

    #[test]
    fn test_graph_counts() {
        let graph = sample_graph();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.k(), Some(3));
        assert!(graph.contains("CGT"));
    }

    #[test]
    fn test_builder_rejects_inconsistent_length() {
        let mut builder = GraphBuilder::new();
        builder.add_node(Node::new_empty(kmer("ACG"))).unwrap();

        let result = builder.add_node(Node::new_empty(kmer("ACGT")));
        assert!(matches!(
            result,
            Err(GraphError::InconsistentLength { expected: 3, found: 4, .. })
        ));
    }

    #[test]
    fn test_builder_with_k() {
        let mut builder = GraphBuilder::new().with_k(4);
        let result = builder.add_node(Node::new_empty(kmer("ACG")));
        assert!(matches!(result, Err(GraphError::InconsistentLength { .. })));
        assert!(builder.is_empty());
    }

    #[test]
    fn test_builder_rejects_duplicate() {
        let mut builder = GraphBuilder::new();
        builder.add_node(Node::new_empty(kmer("ACG"))).unwrap();

        let result = builder.add_node(Node::new(kmer("ACG"), vec![], [7]));
        assert!(matches!(result, Err(GraphError::DuplicateKmer(ref k)) if k == "ACG"));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_graph_through_shared_handles() {
        let graph = Arc::new(sample_graph());
        let by_ref = &graph;

        assert!(by_ref.lookup("ACG").is_found());
        assert_eq!(KmerGraph::node_count(&graph), 2);

        let boxed: Box<dyn KmerGraph> = Box::new(sample_graph());
        assert!(boxed.lookup("CGT").into_node().is_some());
    }

    #[test]
    fn test_empty_graph() {
        let graph = GraphBuilder::new().build();
        assert_eq!(graph.k(), None);
        assert_eq!(graph.lookup("ACG"), Lookup::NotFound);
    }
}
