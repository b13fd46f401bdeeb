/// Error types for graph loading

use thiserror::Error;

/// Graph loading errors
#[derive(Error, Debug)]
pub enum GraphError {
    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Malformed k-mer in the graph file
    #[error("Invalid k-mer at record {record}: {source}")]
    InvalidKmer {
        record: usize,
        #[source]
        source: crate::types::KmerError,
    },

    /// K-mer length differs from the graph's k
    #[error("K-mer {kmer} has length {found}, expected {expected}")]
    InconsistentLength {
        kmer: String,
        expected: usize,
        found: usize,
    },

    /// Same k-mer declared twice
    #[error("Duplicate k-mer: {0}")]
    DuplicateKmer(String),

    /// Color id field does not parse as an integer
    #[error("Invalid color id {value:?} for k-mer {kmer}")]
    InvalidColorId { kmer: String, value: String },

    /// File extension not recognised as a graph format
    #[error("Unsupported graph format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;
