//! TF-IDF ranking with a recency bias.
//!
//! For a query with keywords `q`, a chunk scores
//! `Σ tf_chunk(t) · ln(N / df(t)) · tf_query(t)` over the terms it shares
//! with `q`, multiplied by `1 + (id / N) · recency_weight` so later turns
//! win close calls. A query without keywords falls back to the most
//! recent chunks.

use chatrag_core::{Chunk, ScoredChunk};
use tracing::debug;

use crate::index::InvertedIndex;
use crate::keywords::extract_keywords;

/// Ranks the chunks of one index snapshot.
pub struct Scorer<'a> {
    chunks: &'a [Chunk],
    index: &'a InvertedIndex,
    recency_weight: f64,
}

impl<'a> Scorer<'a> {
    pub fn new(chunks: &'a [Chunk], index: &'a InvertedIndex, recency_weight: f64) -> Self {
        Self {
            chunks,
            index,
            recency_weight,
        }
    }

    /// The `top_k` best chunks for `query`, in document order.
    pub fn rank(&self, query: &str, top_k: usize) -> Vec<ScoredChunk> {
        if self.chunks.is_empty() || top_k == 0 {
            return Vec::new();
        }

        let query_terms = extract_keywords(query);
        if query_terms.is_empty() {
            debug!(top_k, "Query has no keywords, returning most recent chunks");
            return self.most_recent(top_k);
        }

        let total = self.chunks.len();
        let mut scores = vec![0.0_f64; total];
        for (term, &query_tf) in &query_terms {
            let Some(idf) = self.index.idf(term, total) else {
                continue;
            };
            for &id in self.index.postings(term) {
                if let Some(chunk) = self.chunks.get(id) {
                    scores[id] += f64::from(chunk.term_frequency(term)) * idf * f64::from(query_tf);
                }
            }
        }

        let mut ranked: Vec<ScoredChunk> = self
            .chunks
            .iter()
            .zip(scores)
            .map(|(chunk, score)| ScoredChunk {
                score: score * self.recency_boost(chunk.id),
                chunk: chunk.clone(),
            })
            .filter(|scored| scored.score > 0.0)
            .collect();

        debug!(
            terms = query_terms.len(),
            candidates = ranked.len(),
            top_k,
            "Scored chunks"
        );

        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.chunk.id.cmp(&b.chunk.id))
        });
        ranked.truncate(top_k);
        ranked.sort_by_key(|scored| scored.chunk.start);
        ranked
    }

    fn recency_boost(&self, id: usize) -> f64 {
        1.0 + (id as f64 / self.chunks.len() as f64) * self.recency_weight
    }

    fn most_recent(&self, top_k: usize) -> Vec<ScoredChunk> {
        let skip = self.chunks.len().saturating_sub(top_k);
        self.chunks[skip..]
            .iter()
            .map(|chunk| ScoredChunk {
                chunk: chunk.clone(),
                score: 0.0,
            })
            .collect()
    }
}
