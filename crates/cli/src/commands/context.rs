//! `chatrag context` — Print the history that would accompany a query.

use std::path::Path;

use chatrag_config::AppConfig;
use chatrag_index::ChatSession;

use super::load_conversation;

pub fn run(
    config: &AppConfig,
    file: &Path,
    query: &str,
    prompt: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let conversation = load_conversation(file)?;
    let mut session = ChatSession::from_conversation(conversation, config.retrieval.clone());
    session.reindex();

    if prompt {
        println!("{}", session.build_prompt(query));
        return Ok(());
    }

    let context = session.context_for(query);
    if context.is_empty() {
        tracing::info!("No relevant history for query");
    } else {
        println!("{context}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_helpers::write_conversation;

    #[test]
    fn prints_context_and_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_conversation(dir.path());
        let config = AppConfig::default();

        assert!(run(&config, &path, "telescope eyepiece", false).is_ok());
        assert!(run(&config, &path, "telescope eyepiece", true).is_ok());
        assert!(run(&config, &path, "unrelated zeppelin", false).is_ok());
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(run(&AppConfig::default(), &missing, "anything", true).is_err());
    }
}
