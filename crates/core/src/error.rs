//! Error types for ChatRAG.
//!
//! The retrieval engine itself never fails; every error here comes from
//! reading and decoding conversation files. Configuration failures are
//! `chatrag_config::ConfigError`.

use thiserror::Error;

/// The top-level error type for ChatRAG operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- I/O ---
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Conversation input ---
    #[error("Invalid conversation transcript: {0}")]
    Transcript(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;
