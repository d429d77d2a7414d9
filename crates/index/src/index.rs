//! Inverted index over chunk keywords.

use std::collections::HashMap;

use chatrag_core::Chunk;

/// term → ascending ids of the chunks containing it.
pub type Postings = HashMap<String, Vec<usize>>;

/// term → number of distinct chunks containing it.
pub type DocumentFrequency = HashMap<String, usize>;

/// Build posting lists and document frequencies from a chunk set.
///
/// Each chunk counts once per distinct keyword, however often the
/// keyword repeats inside it.
pub fn build_index(chunks: &[Chunk]) -> (Postings, DocumentFrequency) {
    let mut postings = Postings::new();
    let mut document_frequency = DocumentFrequency::new();

    for chunk in chunks {
        for term in chunk.keywords.keys() {
            postings.entry(term.clone()).or_default().push(chunk.id);
            *document_frequency.entry(term.clone()).or_insert(0) += 1;
        }
    }

    (postings, document_frequency)
}

/// Read-only lookup structure derived from one chunk set.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: Postings,
    document_frequency: DocumentFrequency,
}

impl InvertedIndex {
    pub fn build(chunks: &[Chunk]) -> Self {
        let (postings, document_frequency) = build_index(chunks);
        Self {
            postings,
            document_frequency,
        }
    }

    /// Ids of the chunks containing `term`.
    pub fn postings(&self, term: &str) -> &[usize] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn document_frequency(&self, term: &str) -> usize {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    /// `ln(total_chunks / df)`, or `None` for a term no chunk contains.
    pub fn idf(&self, term: &str, total_chunks: usize) -> Option<f64> {
        match self.document_frequency(term) {
            0 => None,
            df => Some((total_chunks as f64 / df as f64).ln()),
        }
    }

    /// Number of distinct terms.
    pub fn vocabulary_size(&self) -> usize {
        self.postings.len()
    }
}
