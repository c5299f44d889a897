//! Append-only conversation memory.

use finsight_chat::ChatMessage;
use serde::Serialize;

/// One completed question/answer exchange.
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub question: String,
    pub answer: String,
}

/// Ordered (question, answer) turns for one session.
///
/// Turns are only appended after a model call succeeds, and cleared only by
/// a session reset, so the history fed to the model never contains a
/// half-finished exchange.
#[derive(Debug, Default)]
pub struct ConversationMemory {
    turns: Vec<Turn>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.turns.push(Turn {
            question: question.into(),
            answer: answer.into(),
        });
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Flatten the turns into alternating user/assistant messages for the
    /// model call.
    pub fn as_messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.turns.len() * 2);
        for turn in &self.turns {
            messages.push(ChatMessage::user(&turn.question));
            messages.push(ChatMessage::assistant(&turn.answer));
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_flattens_turns_in_order() {
        let mut memory = ConversationMemory::new();
        memory.record("q1", "a1");
        memory.record("q2", "a2");

        assert_eq!(memory.len(), 2);
        let messages = memory.as_messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[0].content, "q1");
        assert_eq!(messages[1].role, "assistant");
        assert_eq!(messages[1].content, "a1");
        assert_eq!(messages[3].content, "a2");
    }

    #[test]
    fn clear_empties_the_history() {
        let mut memory = ConversationMemory::new();
        memory.record("q", "a");
        memory.clear();
        assert!(memory.is_empty());
        assert!(memory.as_messages().is_empty());
    }
}
