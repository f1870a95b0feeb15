//! The retrieval unit produced by the chunker.

use serde::{Deserialize, Serialize};

/// A bounded slice of source text used as a retrieval unit.
///
/// `order` preserves the chunk's position in the source document.
/// Neighboring chunks may share up to the configured overlap of
/// characters. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Contiguous slice of the source document
    pub text: String,

    /// Zero-based position in the source document
    pub order: usize,
}

impl Chunk {
    /// Create a new chunk.
    pub fn new(text: impl Into<String>, order: usize) -> Self {
        Self {
            text: text.into(),
            order,
        }
    }

    /// Length of the chunk text in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
