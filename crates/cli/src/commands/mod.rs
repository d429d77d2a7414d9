//! CLI subcommand implementations.

pub mod config_cmd;
pub mod context;
pub mod index;
pub mod search;

use std::path::Path;

use chatrag_core::Conversation;

/// Read a conversation file (an object with `messages`, or a bare array).
pub fn load_conversation(path: &Path) -> chatrag_core::Result<Conversation> {
    let raw = std::fs::read_to_string(path)?;
    Conversation::from_json(&raw)
}
