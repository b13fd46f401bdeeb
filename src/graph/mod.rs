/// K-mer graph abstraction
///
/// This module provides the lookup interface traversals consume and the
/// in-memory implementation loaded from disk:
/// - KmerGraph trait: k-mer lookup returning a discriminated result
/// - InMemoryGraph: hash-indexed graph built by GraphBuilder
/// - Loader: JSON and CSV graph files

pub mod error;
pub mod loader;
pub mod memory;

pub use error::{GraphError, GraphResult};
pub use loader::{open_graph, GraphFormat};
pub use memory::{GraphBuilder, InMemoryGraph};

use crate::types::Node;
use std::sync::Arc;

/// Outcome of a single k-mer lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The k-mer is a node of the graph
    Found(Arc<Node>),
    /// The k-mer is absent
    NotFound,
}

impl Lookup {
    /// Check if the lookup resolved to a node
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// Convert into the resolved node, if any
    pub fn into_node(self) -> Option<Arc<Node>> {
        match self {
            Lookup::Found(node) => Some(node),
            Lookup::NotFound => None,
        }
    }
}

impl From<Option<Arc<Node>>> for Lookup {
    fn from(node: Option<Arc<Node>>) -> Self {
        match node {
            Some(node) => Lookup::Found(node),
            None => Lookup::NotFound,
        }
    }
}

/// Read-only k-mer graph
///
/// Traversals only need point lookups. Implementations must return
/// `Lookup::NotFound` for any string that is not a node, including strings
/// of the wrong length or with characters outside the graph's alphabet.
pub trait KmerGraph {
    /// Look up a k-mer by its text
    fn lookup(&self, kmer: &str) -> Lookup;

    /// Number of nodes in the graph
    fn node_count(&self) -> usize;

    /// The k-mer length, if the graph has any nodes
    fn k(&self) -> Option<usize>;
}

impl<G: KmerGraph + ?Sized> KmerGraph for &G {
    fn lookup(&self, kmer: &str) -> Lookup {
        (**self).lookup(kmer)
    }

    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn k(&self) -> Option<usize> {
        (**self).k()
    }
}

impl<G: KmerGraph + ?Sized> KmerGraph for Arc<G> {
    fn lookup(&self, kmer: &str) -> Lookup {
        (**self).lookup(kmer)
    }

    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn k(&self) -> Option<usize> {
        (**self).k()
    }
}

impl<G: KmerGraph + ?Sized> KmerGraph for Box<G> {
    fn lookup(&self, kmer: &str) -> Lookup {
        (**self).lookup(kmer)
    }

    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn k(&self) -> Option<usize> {
        (**self).k()
    }
}
