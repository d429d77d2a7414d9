//! Chunk types produced by the indexer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Term → occurrence count. Ordered so that any computation folding over
/// the terms visits them in the same order every run.
pub type KeywordCounts = BTreeMap<String, u32>;

/// A contiguous, bounded slice of a conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Sequential position among the chunks of one indexing pass (0-based).
    pub id: usize,
    /// Trimmed text of `transcript[start..end]`.
    pub text: String,
    /// Byte offset of the untrimmed slice start.
    pub start: usize,
    /// Byte offset one past the untrimmed slice end.
    pub end: usize,
    /// Keyword frequencies within this chunk.
    pub keywords: KeywordCounts,
}

impl Chunk {
    /// How many times `term` occurs in this chunk.
    pub fn term_frequency(&self, term: &str) -> u32 {
        self.keywords.get(term).copied().unwrap_or(0)
    }
}

/// A chunk paired with the relevance score it was ranked by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f64,
}
