//! `chatrag search` — Rank conversation chunks against a query.

use std::path::Path;

use chatrag_config::AppConfig;
use chatrag_index::RagEngine;

use super::load_conversation;

/// Longest chunk preview printed per result, in characters.
const PREVIEW_CHARS: usize = 160;

pub fn run(
    config: &AppConfig,
    file: &Path,
    query: &str,
    top_k: Option<usize>,
    scores: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let conversation = load_conversation(file)?;
    let mut engine = RagEngine::new(config.retrieval.clone());
    engine.index_conversation(&conversation.messages);

    let top_k = top_k.unwrap_or(engine.config().default_top_k);
    let results = engine.search_scored(query, top_k);

    if results.is_empty() {
        println!("No matching chunks for \"{query}\"");
        return Ok(());
    }

    println!("🔎 {} chunk(s) for \"{query}\"", results.len());
    for scored in &results {
        let chunk = &scored.chunk;
        println!();
        if scores {
            println!(
                "── chunk {} [{}..{}] score {:.4}",
                chunk.id, chunk.start, chunk.end, scored.score
            );
        } else {
            println!("── chunk {} [{}..{}]", chunk.id, chunk.start, chunk.end);
        }
        println!("{}", preview(&chunk.text));
    }
    Ok(())
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_helpers::write_conversation;

    #[test]
    fn searches_with_and_without_scores() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_conversation(dir.path());
        let config = AppConfig::default();

        assert!(run(&config, &path, "sourdough starter", Some(2), true).is_ok());
        assert!(run(&config, &path, "sourdough starter", None, false).is_ok());
        assert!(run(&config, &path, "zeppelin", None, false).is_ok());
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(run(&AppConfig::default(), &missing, "anything", None, false).is_err());
    }

    #[test]
    fn preview_flattens_whitespace() {
        assert_eq!(preview("User: hi\n\nAssistant:   hello"), "User: hi Assistant: hello");
    }

    #[test]
    fn preview_truncates_long_text() {
        let long = "word ".repeat(100);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 3);
    }
}
