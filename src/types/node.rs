use super::kmer::Kmer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Integer tag identifying a source sample or dataset
pub type ColorId = u32;

/// Node (k-mer vertex) in the graph
///
/// Represents one k-mer with:
/// - Identifier (Kmer)
/// - Ordered successor k-mers (outgoing edges)
/// - Color ids of the samples that contain the k-mer
///
/// Nodes are owned by the graph; traversals only hold them for one step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node {
    /// K-mer identifier
    pub kmer: Kmer,

    /// Successor k-mers, in stored order
    pub successors: Vec<Kmer>,

    /// Color ids (sorted, unique)
    pub color_ids: BTreeSet<ColorId>,
}

impl Node {
    /// Create a new node
    pub fn new(
        kmer: Kmer,
        successors: Vec<Kmer>,
        color_ids: impl IntoIterator<Item = ColorId>,
    ) -> Self {
        Self {
            kmer,
            successors,
            color_ids: color_ids.into_iter().collect(),
        }
    }

    /// Create a node with no successors and no colors
    pub fn new_empty(kmer: Kmer) -> Self {
        Self::new(kmer, Vec::new(), [])
    }

    /// Get the k-mer identifier
    pub fn kmer(&self) -> &Kmer {
        &self.kmer
    }

    /// Get the successor k-mers
    pub fn successors(&self) -> &[Kmer] {
        &self.successors
    }

    /// Get the color id set
    pub fn color_ids(&self) -> &BTreeSet<ColorId> {
        &self.color_ids
    }

    /// Number of outgoing edges
    pub fn out_degree(&self) -> usize {
        self.successors.len()
    }

    /// Number of distinct colors
    pub fn num_colors(&self) -> usize {
        self.color_ids.len()
    }

    /// Check if the node carries a given color
    pub fn has_color(&self, color: ColorId) -> bool {
        self.color_ids.contains(&color)
    }
}
