//! # ChatRAG Index
//!
//! Lexical retrieval over a single conversation. A conversation is
//! rendered to a transcript, split into overlapping boundary-aware
//! chunks, indexed by keyword, ranked against a query with TF-IDF plus a
//! recency bias, and the best chunks are joined into a context string
//! that fits a character budget.
//!
//! ```
//! use chatrag_core::Message;
//! use chatrag_index::RagEngine;
//!
//! let mut engine = RagEngine::default();
//! engine.index_conversation(&[
//!     Message::user("How do lifetimes interact with struct fields that hold references?"),
//!     Message::assistant("A struct holding a reference needs a lifetime parameter on the struct."),
//! ]);
//! let context = engine.context_for_query("lifetimes in structs");
//! assert!(context.len() <= 3000);
//! ```

pub mod assembler;
pub mod chunker;
pub mod engine;
pub mod index;
pub mod keywords;
pub mod scorer;
pub mod session;

pub use assembler::{ContextBudget, assemble_context};
pub use chunker::Chunker;
pub use engine::{IndexSnapshot, IndexStats, RagEngine};
pub use index::{DocumentFrequency, InvertedIndex, Postings, build_index};
pub use keywords::extract_keywords;
pub use scorer::Scorer;
pub use session::ChatSession;
