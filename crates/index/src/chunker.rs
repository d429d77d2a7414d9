//! Boundary-aware transcript chunker.
//!
//! Splits a rendered transcript into overlapping chunks of roughly
//! `chunk_size` bytes. Before cutting, the chunker looks back over a
//! short window for a turn boundary, the end of a sentence, or a line
//! break, so chunks end on whole turns or sentences where possible.

use chatrag_config::RetrievalConfig;
use chatrag_core::{Chunk, Role};
use tracing::warn;

use crate::keywords::extract_keywords;

/// A place the chunker may cut: the pattern, and how far into it the cut
/// lands.
struct Boundary {
    pattern: &'static str,
    cut_after: usize,
}

/// Cut candidates. A turn boundary cuts after the blank line so the next
/// turn opens the following chunk.
const BOUNDARIES: &[Boundary] = &[
    Boundary { pattern: Role::User.turn_marker(), cut_after: 2 },
    Boundary { pattern: Role::Assistant.turn_marker(), cut_after: 2 },
    Boundary { pattern: ". ", cut_after: 2 },
    Boundary { pattern: "! ", cut_after: 2 },
    Boundary { pattern: "? ", cut_after: 2 },
    Boundary { pattern: "\n", cut_after: 1 },
];

/// Splits transcripts into [`Chunk`]s.
#[derive(Debug, Clone)]
pub struct Chunker {
    chunk_size: usize,
    chunk_overlap: usize,
    min_chunk_len: usize,
    max_iterations: usize,
    boundary_window: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(&RetrievalConfig::default())
    }
}

impl Chunker {
    pub fn new(config: &RetrievalConfig) -> Self {
        Self {
            chunk_size: config.chunk_size.max(1),
            chunk_overlap: config.chunk_overlap,
            min_chunk_len: config.min_chunk_len,
            max_iterations: config.max_iterations,
            boundary_window: config.boundary_window,
        }
    }

    /// Chunk `text`. Chunk ids are assigned sequentially from 0 in
    /// document order; fragments whose trimmed text is not longer than
    /// `min_chunk_len` are dropped without consuming an id.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let len = text.len();
        let stop_at = len.saturating_sub(self.min_chunk_len);
        let mut chunks = Vec::new();
        let mut start = 0;
        let mut iterations = 0;

        while start < stop_at {
            if iterations == self.max_iterations {
                warn!(
                    iterations,
                    offset = start,
                    unchunked_bytes = len - start,
                    "Chunker iteration cap reached, remaining text not indexed"
                );
                break;
            }
            iterations += 1;

            let mut end = floor_char_boundary(text, start + self.chunk_size);
            if end <= start {
                end = ceil_char_boundary(text, start + 1);
            }
            if end < len {
                if let Some(cut) = self.find_boundary(text, start, end) {
                    end = cut;
                }
            }

            let trimmed = text[start..end].trim();
            if trimmed.len() > self.min_chunk_len {
                chunks.push(Chunk {
                    id: chunks.len(),
                    text: trimmed.to_string(),
                    start,
                    end,
                    keywords: extract_keywords(trimmed),
                });
            }

            let next = end.saturating_sub(self.chunk_overlap).max(start + 1);
            start = ceil_char_boundary(text, next);
        }

        chunks
    }

    /// Latest cut point in the window `[start + chunk_size - boundary_window, end)`.
    ///
    /// A pattern may straddle `end` (a period at `end - 1` with its space
    /// at `end`); such a cut is clamped to `end`.
    fn find_boundary(&self, text: &str, start: usize, end: usize) -> Option<usize> {
        let window_start = (start + self.chunk_size)
            .saturating_sub(self.boundary_window)
            .max(start);
        let window_start = ceil_char_boundary(text, window_start);
        if window_start >= end {
            return None;
        }

        BOUNDARIES
            .iter()
            .filter_map(|b| {
                let scan_end = floor_char_boundary(text, end + b.pattern.len() - 1);
                text[window_start..scan_end]
                    .rfind(b.pattern)
                    .map(|at| (window_start + at + b.cut_after).min(end))
            })
            .filter(|&cut| cut > start)
            .max()
    }
}

/// Largest char boundary `<= index`, clamped to the text length.
fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut index = index;
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Smallest char boundary `>= index`, clamped to the text length.
fn ceil_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut index = index;
    while !text.is_char_boundary(index) {
        index += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatrag_core::{Message, render_transcript};

    fn sentences(topic: &str, count: usize) -> String {
        (0..count)
            .map(|i| format!("Sentence {i} talks about {topic} in some detail. "))
            .collect()
    }

    fn assert_invariants(text: &str, chunks: &[Chunk]) {
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.id, i);
            assert!(chunk.start < chunk.end);
            assert!(chunk.end <= text.len());
            assert!(chunk.text.trim().len() > 30);
            assert_eq!(chunk.text, text[chunk.start..chunk.end].trim());
        }
        for pair in chunks.windows(2) {
            assert!(pair[1].start > pair[0].start);
            assert!(pair[1].start <= pair[0].end);
        }
    }

    #[test]
    fn empty_text() {
        assert!(Chunker::default().chunk("").is_empty());
    }

    #[test]
    fn text_at_or_below_minimum_yields_nothing() {
        let chunker = Chunker::default();
        assert!(chunker.chunk("User: hi").is_empty());
        assert!(chunker.chunk(&"x".repeat(30)).is_empty());
    }

    #[test]
    fn short_text_is_single_chunk() {
        let text = "User: How do I read a file line by line in Rust?";
        let chunks = Chunker::default().chunk(text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, text);
        assert_eq!(chunks[0].start, 0);
        assert_eq!(chunks[0].end, text.len());
        assert!(chunks[0].keywords.contains_key("file"));
    }

    #[test]
    fn long_text_overlaps_and_covers_the_end() {
        let text = sentences("lifetimes", 60);
        let chunks = Chunker::default().chunk(&text);

        assert!(chunks.len() > 2);
        assert_invariants(&text, &chunks);
        assert_eq!(chunks.last().unwrap().end, text.len());
    }

    #[test]
    fn cuts_after_sentence_terminators() {
        let text = sentences("iterators", 60);
        let chunks = Chunker::default().chunk(&text);

        for chunk in chunks.iter().filter(|c| c.end < text.len()) {
            assert!(chunk.text.ends_with('.'), "chunk {} ends mid-sentence", chunk.id);
            assert!(chunk.end <= chunk.start + 800);
            assert!(chunk.end >= chunk.start + 700);
        }
    }

    #[test]
    fn prefers_turn_boundaries() {
        // A turn change sits just inside the search window; the cut must
        // land right before "Assistant:".
        let question = format!("{}?", "a".repeat(740));
        let messages = vec![
            Message::user(question),
            Message::assistant(sentences("closures", 30)),
        ];
        let text = render_transcript(&messages);
        let chunks = Chunker::default().chunk(&text);

        assert!(chunks.len() > 1);
        assert!(text[chunks[0].end..].starts_with("Assistant: "));
        assert_invariants(&text, &chunks);
    }

    #[test]
    fn hard_cut_without_boundaries() {
        let text = "z".repeat(2000);
        let chunks = Chunker::default().chunk(&text);

        let spans: Vec<(usize, usize)> = chunks.iter().take(4).map(|c| (c.start, c.end)).collect();
        assert_eq!(spans, vec![(0, 800), (650, 1450), (1300, 2000), (1850, 2000)]);
        assert_invariants(&text, &chunks);
    }

    #[test]
    fn tail_steps_one_byte_until_minimum_remains() {
        // After the chunk that reaches the end, the start advances by one
        // byte per step and stops once 30 or fewer bytes are left.
        let text = "z".repeat(2000);
        let chunks = Chunker::default().chunk(&text);

        assert_eq!(chunks.len(), 123);
        let last = chunks.last().unwrap();
        assert_eq!((last.start, last.end), (1969, 2000));
        assert!(chunks[3..].iter().all(|c| c.end == text.len()));
        assert!(chunks[3..].windows(2).all(|w| w[1].start == w[0].start + 1));
    }

    #[test]
    fn terminator_straddling_the_cut_is_found() {
        // '.' is the last byte of the first 800 and its space is byte 800;
        // the cut must prefer it over the earlier "? ".
        let text = format!("{}? {}. {}", "a".repeat(740), "a".repeat(57), "b".repeat(500));
        assert_eq!(&text[799..801], ". ");

        let chunks = Chunker::default().chunk(&text);
        assert_eq!(chunks[0].end, 800);
        assert!(chunks[0].text.ends_with('.'));
    }

    #[test]
    fn multibyte_text_stays_on_char_boundaries() {
        let text = "ünïcödé wörds ärë fïnë hërë. ".repeat(80);
        let chunks = Chunker::default().chunk(&text);

        assert!(chunks.len() > 1);
        assert_invariants(&text, &chunks);
    }

    #[test]
    fn iteration_cap_truncates() {
        let config = RetrievalConfig {
            max_iterations: 2,
            ..RetrievalConfig::default()
        };
        let text = sentences("traits", 200);
        let chunks = Chunker::new(&config).chunk(&text);

        assert_eq!(chunks.len(), 2);
        assert!(chunks[1].end < text.len());
    }

    #[test]
    fn chunking_is_deterministic() {
        let text = sentences("generics", 50);
        let chunker = Chunker::default();
        assert_eq!(chunker.chunk(&text), chunker.chunk(&text));
    }
}
