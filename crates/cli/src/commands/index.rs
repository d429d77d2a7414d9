//! `chatrag index` — Index a conversation and report what was built.

use std::path::Path;

use chatrag_config::AppConfig;
use chatrag_index::RagEngine;

use super::load_conversation;

pub fn run(config: &AppConfig, file: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let conversation = load_conversation(file)?;
    let mut engine = RagEngine::new(config.retrieval.clone());
    engine.index_conversation(&conversation.messages);
    let stats = engine.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("📚 Indexed {}", file.display());
    println!("   Messages:    {}", conversation.messages.len());
    println!("   Transcript:  {} bytes", stats.transcript_len);
    println!("   Chunks:      {}", stats.chunks);
    println!("   Vocabulary:  {} terms", stats.vocabulary);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_helpers::write_conversation;

    #[test]
    fn indexes_a_conversation_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_conversation(dir.path());
        let config = AppConfig::default();

        assert!(run(&config, &path, false).is_ok());
        assert!(run(&config, &path, true).is_ok());
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "\"just a string\"").unwrap();

        let err = run(&AppConfig::default(), &path, false).unwrap_err();
        assert!(err.to_string().contains("Invalid conversation transcript"));
    }
}
