//! In-memory conversation history

use crate::llm::Message;

/// Ordered, append-only list of user and assistant turns
///
/// The system prompt is not stored here; it is prepended per request so a
/// reloaded knowledge base takes effect on the next turn.
#[derive(Debug, Default, Clone)]
pub struct Conversation {
    turns: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished turn
    pub fn push(&mut self, message: Message) {
        self.turns.push(message);
    }

    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Drop every turn
    pub fn reset(&mut self) {
        self.turns.clear();
    }

    /// Messages for a chat request: the system prompt followed by history
    pub fn to_request(&self, system_prompt: &str) -> Vec<Message> {
        std::iter::once(Message::system(system_prompt))
            .chain(self.turns.iter().cloned())
            .collect()
    }
}
