//! # ChatRAG Core
//!
//! Domain types and error definitions shared by every ChatRAG crate.
//! This crate holds no retrieval logic; it defines the conversation model
//! the engine indexes and the chunk type the engine hands back.

pub mod chunk;
pub mod error;
pub mod message;

// Re-export key types at crate root for ergonomics
pub use chunk::{Chunk, KeywordCounts, ScoredChunk};
pub use error::{Error, Result};
pub use message::{
    Conversation, ConversationId, Message, Role, TURN_SEPARATOR, render_transcript,
};
