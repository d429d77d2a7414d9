//! The retrieval engine.
//!
//! `RagEngine` owns at most one [`IndexSnapshot`]. Re-indexing builds a
//! complete new snapshot and swaps it in; nothing is ever mutated in
//! place, so an `Arc<IndexSnapshot>` handed out earlier keeps answering
//! consistently against the chunk set it was built from.

use std::sync::Arc;

use chatrag_config::RetrievalConfig;
use chatrag_core::{Chunk, Message, ScoredChunk, render_transcript};
use serde::Serialize;
use tracing::{debug, info};

use crate::assembler::{ContextBudget, assemble_context};
use crate::chunker::Chunker;
use crate::index::InvertedIndex;
use crate::scorer::Scorer;

/// Summary numbers for an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub chunks: usize,
    pub vocabulary: usize,
    pub transcript_len: usize,
}

/// Immutable chunks + inverted index for one transcript.
#[derive(Debug)]
pub struct IndexSnapshot {
    chunks: Vec<Chunk>,
    index: InvertedIndex,
    transcript_len: usize,
    recency_weight: f64,
}

impl IndexSnapshot {
    /// Chunk and index `transcript`.
    pub fn build(transcript: &str, config: &RetrievalConfig) -> Self {
        let chunks = Chunker::new(config).chunk(transcript);
        let index = InvertedIndex::build(&chunks);
        Self {
            chunks,
            index,
            transcript_len: transcript.len(),
            recency_weight: config.recency_weight,
        }
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            chunks: self.chunks.len(),
            vocabulary: self.index.vocabulary_size(),
            transcript_len: self.transcript_len,
        }
    }

    /// Ranked chunks with their scores, in document order.
    pub fn search_scored(&self, query: &str, top_k: usize) -> Vec<ScoredChunk> {
        Scorer::new(&self.chunks, &self.index, self.recency_weight).rank(query, top_k)
    }
}

/// Conversation retrieval engine. One per chat session.
#[derive(Debug, Clone, Default)]
pub struct RagEngine {
    config: RetrievalConfig,
    snapshot: Option<Arc<IndexSnapshot>>,
}

impl RagEngine {
    pub fn new(config: RetrievalConfig) -> Self {
        Self {
            config,
            snapshot: None,
        }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Rebuild the index from `messages`, replacing whatever was indexed
    /// before. Returns the number of chunks produced.
    ///
    /// An empty message list leaves the engine unindexed.
    pub fn index_conversation(&mut self, messages: &[Message]) -> usize {
        if messages.is_empty() {
            debug!("No messages to index");
            self.clear();
            return 0;
        }
        self.index_transcript(&render_transcript(messages))
    }

    /// Rebuild the index from an already rendered transcript.
    pub fn index_transcript(&mut self, transcript: &str) -> usize {
        let snapshot = IndexSnapshot::build(transcript, &self.config);
        let stats = snapshot.stats();
        info!(
            chunks = stats.chunks,
            vocabulary = stats.vocabulary,
            transcript_len = stats.transcript_len,
            "Indexed conversation"
        );
        self.snapshot = Some(Arc::new(snapshot));
        stats.chunks
    }

    /// Drop the index.
    pub fn clear(&mut self) {
        self.snapshot = None;
    }

    pub fn is_indexed(&self) -> bool {
        self.snapshot.is_some()
    }

    /// The current snapshot, if any. Stays valid across later rebuilds.
    pub fn snapshot(&self) -> Option<Arc<IndexSnapshot>> {
        self.snapshot.clone()
    }

    pub fn chunks(&self) -> &[Chunk] {
        self.snapshot.as_deref().map(IndexSnapshot::chunks).unwrap_or(&[])
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks().len()
    }

    pub fn stats(&self) -> IndexStats {
        self.snapshot
            .as_deref()
            .map(IndexSnapshot::stats)
            .unwrap_or_default()
    }

    /// The `top_k` most relevant chunks for `query`, in document order.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<Chunk> {
        self.search_scored(query, top_k)
            .into_iter()
            .map(|scored| scored.chunk)
            .collect()
    }

    /// Like [`search`](Self::search), keeping the scores.
    pub fn search_scored(&self, query: &str, top_k: usize) -> Vec<ScoredChunk> {
        match self.snapshot.as_deref() {
            Some(snapshot) => snapshot.search_scored(query, top_k),
            None => Vec::new(),
        }
    }

    /// Relevant conversation history for `query`, bounded by
    /// `max_context_chars`. Empty when nothing matches or nothing is
    /// indexed.
    pub fn context_for_query(&self, query: &str) -> String {
        let chunks = self.search(query, self.config.default_top_k);
        if chunks.is_empty() {
            return String::new();
        }
        assemble_context(&chunks, ContextBudget::from(&self.config))
    }
}
