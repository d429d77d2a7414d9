//! Keyword extraction.
//!
//! Lower-cases the text, blanks out everything that is not an ASCII
//! letter, digit, or whitespace, and counts the surviving tokens. Short
//! tokens, stop-words, and bare numbers carry no signal for lexical
//! matching and are dropped.

use chatrag_core::KeywordCounts;

/// Tokens this short or shorter are dropped.
const MIN_TOKEN_LEN: usize = 2;

/// Common English function words. Must stay sorted (binary search).
const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "all", "also", "and", "any", "are", "because", "been",
    "before", "being", "below", "between", "both", "but", "can", "could", "did", "does", "doing",
    "down", "during", "each", "few", "for", "from", "further", "had", "has", "have", "having",
    "her", "here", "hers", "him", "his", "how", "into", "its", "just", "more", "most", "not",
    "now", "off", "once", "only", "other", "our", "ours", "out", "over", "own", "same", "she",
    "should", "some", "such", "than", "that", "the", "their", "them", "then", "there", "these",
    "they", "this", "those", "through", "too", "under", "until", "very", "was", "were", "what",
    "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you",
    "your", "yours",
];

/// Whether `token` is a stop-word. Expects a lower-cased token.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

fn is_keyword(token: &str) -> bool {
    token.len() > MIN_TOKEN_LEN
        && !is_stop_word(token)
        && !token.bytes().all(|b| b.is_ascii_digit())
}

/// Count the keywords in `text`.
pub fn extract_keywords(text: &str) -> KeywordCounts {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut counts = KeywordCounts::new();
    for token in normalized.split_whitespace().filter(|t| is_keyword(t)) {
        *counts.entry(token.to_string()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_word_list_is_sorted() {
        assert!(STOP_WORDS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn counts_repeated_terms() {
        let counts = extract_keywords("Rust borrows. Rust moves. RUST!");
        assert_eq!(counts.get("rust"), Some(&3));
        assert_eq!(counts.get("borrows"), Some(&1));
        assert_eq!(counts.get("moves"), Some(&1));
    }

    #[test]
    fn punctuation_splits_tokens() {
        let counts = extract_keywords("async/await, tokio::spawn");
        assert!(counts.contains_key("async"));
        assert!(counts.contains_key("await"));
        assert!(counts.contains_key("tokio"));
        assert!(counts.contains_key("spawn"));
    }

    #[test]
    fn drops_short_tokens_stop_words_and_numbers() {
        let counts = extract_keywords("It is the 2024 release of an OS with 64 bit support");
        assert!(!counts.contains_key("it"));
        assert!(!counts.contains_key("the"));
        assert!(!counts.contains_key("with"));
        assert!(!counts.contains_key("2024"));
        assert!(!counts.contains_key("64"));
        assert!(counts.contains_key("release"));
        assert!(counts.contains_key("bit"));
        assert!(counts.contains_key("support"));
    }

    #[test]
    fn mixed_alphanumerics_survive() {
        let counts = extract_keywords("Upgrade to utf8 and sha256");
        assert!(counts.contains_key("utf8"));
        assert!(counts.contains_key("sha256"));
    }

    #[test]
    fn non_ascii_letters_are_separators() {
        let counts = extract_keywords("naïve café");
        assert!(counts.contains_key("caf"));
        assert!(!counts.contains_key("café"));
    }

    #[test]
    fn only_noise_yields_nothing() {
        assert!(extract_keywords("what is it and why, 42?").is_empty());
        assert!(extract_keywords("").is_empty());
    }
}
