//! FinSight Chat: the language-model capability and prompt construction for
//! retrieval-augmented answering.

pub mod prompt;
pub mod provider;
pub mod tasks;
pub mod types;

pub use prompt::build_messages;
pub use provider::{HttpChatModel, LanguageModel};
pub use tasks::AnalysisTask;
pub use types::ChatMessage;
