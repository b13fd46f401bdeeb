/// Core data types for the k-mer graph
///
/// This module defines the fundamental types used throughout the system:
/// - Kmer: validated k-mer identifier
/// - Node: graph vertex for one k-mer, with successors and color ids
/// - ColorId: integer tag naming a source sample or dataset

pub mod kmer;
pub mod node;

pub use kmer::{Kmer, KmerError};
pub use node::{ColorId, Node};
