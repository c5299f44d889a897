//! Prompt assembly for retrieval-augmented answering.

use crate::types::ChatMessage;

/// Build the provider message list: a system prompt carrying the retrieved
/// excerpts, the prior conversation turns, then the new question.
pub fn build_messages(
    excerpts: &[String],
    history: &[ChatMessage],
    question: &str,
) -> Vec<ChatMessage> {
    let system_prompt = if excerpts.is_empty() {
        "You are an equity research analyst assistant. No report excerpts matched this \
         question; say so if you cannot answer from the conversation alone."
            .to_string()
    } else {
        let context: String = excerpts
            .iter()
            .enumerate()
            .map(|(i, excerpt)| format!("[{}]: {}", i + 1, excerpt))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            "You are an equity research analyst assistant. Answer the user's question \
             using the following excerpts from the uploaded research reports. If the \
             excerpts do not contain the information, say so instead of guessing.\n\n\
             Excerpts:\n{context}"
        )
    };

    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend(history.iter().cloned());
    messages.push(ChatMessage::user(question));
    messages
}
