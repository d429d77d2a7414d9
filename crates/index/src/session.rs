//! A chat session that owns its conversation and its retrieval engine.

use chatrag_config::RetrievalConfig;
use chatrag_core::{Conversation, ConversationId, Message};

use crate::engine::RagEngine;

/// Header line of the history block in a prompt prefix.
const HISTORY_HEADER: &str = "Relevant earlier conversation:";
const HISTORY_FENCE: &str = "---";

/// One conversation plus the index built over it.
///
/// Messages pushed after the last [`reindex`](Self::reindex) are not
/// searchable until the next one.
#[derive(Debug, Clone)]
pub struct ChatSession {
    conversation: Conversation,
    engine: RagEngine,
    indexed_messages: usize,
}

impl ChatSession {
    pub fn new(config: RetrievalConfig) -> Self {
        Self::from_conversation(Conversation::new(), config)
    }

    /// Wrap an existing conversation. Call [`reindex`](Self::reindex)
    /// before querying.
    pub fn from_conversation(conversation: Conversation, config: RetrievalConfig) -> Self {
        Self {
            conversation,
            engine: RagEngine::new(config),
            indexed_messages: 0,
        }
    }

    pub fn id(&self) -> &ConversationId {
        &self.conversation.id
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn engine(&self) -> &RagEngine {
        &self.engine
    }

    pub fn push(&mut self, message: Message) {
        self.conversation.push(message);
    }

    /// Whether messages were added since the index was last built.
    pub fn needs_reindex(&self) -> bool {
        self.indexed_messages != self.conversation.messages.len()
    }

    /// Rebuild the index over the whole conversation.
    pub fn reindex(&mut self) -> usize {
        self.indexed_messages = self.conversation.messages.len();
        self.engine.index_conversation(&self.conversation.messages)
    }

    /// Drop the index without touching the conversation.
    pub fn clear_index(&mut self) {
        self.indexed_messages = 0;
        self.engine.clear();
    }

    pub fn context_for(&self, query: &str) -> String {
        self.engine.context_for_query(query)
    }

    /// `query` prefixed with the relevant history block, or `query`
    /// alone when there is nothing relevant to add.
    pub fn build_prompt(&self, query: &str) -> String {
        let context = self.context_for(query);
        if context.is_empty() {
            return query.to_string();
        }
        format!("{HISTORY_HEADER}\n{HISTORY_FENCE}\n{context}\n{HISTORY_FENCE}\n\n{query}")
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(RetrievalConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_session() -> ChatSession {
        let mut session = ChatSession::default();
        for i in 0..6 {
            session.push(Message::user(
                format!("Question {i}: how do I configure module number {i} properly? ").repeat(6),
            ));
            let answer = if i == 3 {
                "Answer: set the gigawatt threshold before enabling time circuits. ".to_string()
            } else {
                format!("Answer {i}: open the settings panel and toggle the matching switch. ")
            };
            session.push(Message::assistant(answer.repeat(6)));
        }
        session
    }

    #[test]
    fn new_session_is_empty_and_unindexed() {
        let session = ChatSession::default();
        assert!(session.conversation().messages.is_empty());
        assert!(!session.engine().is_indexed());
        assert!(!session.needs_reindex());
    }

    #[test]
    fn push_marks_index_stale() {
        let mut session = filled_session();
        assert!(session.needs_reindex());

        let count = session.reindex();
        assert!(count > 0);
        assert!(!session.needs_reindex());

        session.push(Message::user("One more question about plutonium supply chains."));
        assert!(session.needs_reindex());
    }

    #[test]
    fn prompt_embeds_context_verbatim() {
        let mut session = filled_session();
        session.reindex();

        let query = "gigawatt threshold?";
        let context = session.context_for(query);
        let prompt = session.build_prompt(query);

        assert!(!context.is_empty());
        assert!(prompt.starts_with(HISTORY_HEADER));
        assert!(prompt.contains(&context));
        assert!(prompt.ends_with(query));
    }

    #[test]
    fn prompt_without_index_is_just_the_query() {
        let session = filled_session();
        assert_eq!(session.build_prompt("gigawatt?"), "gigawatt?");
    }

    #[test]
    fn clear_index_keeps_conversation() {
        let mut session = filled_session();
        session.reindex();
        session.clear_index();

        assert_eq!(session.conversation().messages.len(), 12);
        assert_eq!(session.context_for("gigawatt"), "");
        assert!(session.needs_reindex());
    }

    #[test]
    fn sessions_are_independent() {
        let mut first = filled_session();
        let second = ChatSession::default();
        first.reindex();

        assert!(first.engine().is_indexed());
        assert!(!second.engine().is_indexed());
        assert_ne!(first.id(), second.id());
    }
}
