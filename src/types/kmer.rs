use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use thiserror::Error;

/// Error types for Kmer operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KmerError {
    #[error("K-mer is empty")]
    Empty,

    #[error("K-mer {0:?} contains whitespace")]
    Whitespace(String),
}

/// Kmer: identifier of one graph node
///
/// A fixed-length substring over a small alphabet. The graph decides the
/// length k; a `Kmer` on its own only guarantees a non-empty token without
/// whitespace, so it can round-trip through a one-k-mer-per-line file.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Kmer(String);

impl Kmer {
    /// Create a new Kmer
    ///
    /// # Returns
    /// * `Ok(Kmer)` for a non-empty token without whitespace
    /// * `Err(KmerError)` otherwise
    pub fn new(value: impl Into<String>) -> Result<Self, KmerError> {
        let value = value.into();
        if value.is_empty() {
            return Err(KmerError::Empty);
        }
        if value.chars().any(char::is_whitespace) {
            return Err(KmerError::Whitespace(value));
        }
        Ok(Self(value))
    }

    /// Get the k-mer text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length k of this k-mer, in characters
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Check if the k-mer is empty (never true once validated)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Kmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Kmer {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Kmer {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Kmer {
    type Error = KmerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Kmer::new(value)
    }
}

impl TryFrom<&str> for Kmer {
    type Error = KmerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Kmer::new(value)
    }
}

impl From<Kmer> for String {
    fn from(kmer: Kmer) -> Self {
        kmer.0
    }
}
