//! Context assembly under a character budget.

use chatrag_config::RetrievalConfig;
use chatrag_core::Chunk;

/// Placed between consecutive chunks.
pub const CHUNK_SEPARATOR: &str = "\n\n";

/// Appended to a chunk cut short by the budget.
pub const ELLIPSIS: &str = "...";

/// Character budget for an assembled context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextBudget {
    /// Upper bound on the assembled string, in characters
    pub max_chars: usize,
    /// Characters held back from a truncated final chunk
    pub ellipsis_reserve: usize,
}

impl Default for ContextBudget {
    fn default() -> Self {
        Self::from(&RetrievalConfig::default())
    }
}

impl From<&RetrievalConfig> for ContextBudget {
    fn from(config: &RetrievalConfig) -> Self {
        Self {
            max_chars: config.max_context_chars,
            ellipsis_reserve: config.ellipsis_reserve,
        }
    }
}

/// Join chunk texts, in the order given, until the budget runs out.
///
/// The first chunk that does not fit is cut to the remaining room minus
/// `ellipsis_reserve` characters and marked with [`ELLIPSIS`]; nothing
/// after it is considered.
pub fn assemble_context(chunks: &[Chunk], budget: ContextBudget) -> String {
    let separator_chars = CHUNK_SEPARATOR.chars().count();
    let mut context = String::new();
    let mut used = 0;

    for chunk in chunks {
        let separator = if context.is_empty() { 0 } else { separator_chars };
        let text_chars = chunk.text.chars().count();

        if used + separator + text_chars <= budget.max_chars {
            if separator > 0 {
                context.push_str(CHUNK_SEPARATOR);
            }
            context.push_str(&chunk.text);
            used += separator + text_chars;
            continue;
        }

        let room = budget
            .max_chars
            .saturating_sub(used + separator)
            .saturating_sub(budget.ellipsis_reserve);
        if room > 0 {
            if separator > 0 {
                context.push_str(CHUNK_SEPARATOR);
            }
            context.extend(chunk.text.chars().take(room));
            context.push_str(ELLIPSIS);
        }
        break;
    }

    context
}
