//! The retrieval session: a bound vector index plus conversation memory.

use finsight_chat::{build_messages, ChatMessage, LanguageModel};
use finsight_core::{Error, Result};
use finsight_embed::Embedder;
use finsight_index::VectorIndex;
use ndarray::Array1;
use tracing::debug;

use crate::memory::ConversationMemory;

/// A ready-to-answer session. Constructed only from a successfully built
/// index, so holding one is the proof that ingestion succeeded.
pub struct RetrievalSession {
    index: VectorIndex,
    memory: ConversationMemory,
    top_k: usize,
}

impl RetrievalSession {
    pub fn new(index: VectorIndex, top_k: usize) -> Self {
        Self {
            index,
            memory: ConversationMemory::new(),
            top_k,
        }
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    pub fn reset_memory(&mut self) {
        self.memory.clear();
    }

    /// Answer one question: embed it, retrieve the top-k chunks, assemble
    /// the prompt with the conversation so far, and call the model.
    ///
    /// The (question, answer) turn is recorded only after the model call
    /// succeeds; a failure leaves the memory exactly as it was.
    pub async fn answer(
        &mut self,
        embedder: &dyn Embedder,
        model: &dyn LanguageModel,
        question: &str,
    ) -> Result<String> {
        let query = self.embed_question(embedder, question).await?;
        let hits = self.index.search(&query, self.top_k)?;
        debug!("Retrieved {} chunks for question", hits.len());

        let excerpts: Vec<String> = hits.into_iter().map(|h| h.text).collect();
        let messages: Vec<ChatMessage> =
            build_messages(&excerpts, &self.memory.as_messages(), question);

        let answer = model.complete(&messages).await?;
        self.memory.record(question, answer.as_str());
        Ok(answer)
    }

    async fn embed_question(
        &self,
        embedder: &dyn Embedder,
        question: &str,
    ) -> Result<Array1<f32>> {
        let mut vectors = embedder
            .embed_batch(&[question.to_string()])
            .await
            .map_err(|e| Error::ModelInvocation(e.to_string()))?;

        let vector = vectors
            .pop()
            .ok_or_else(|| Error::ModelInvocation("empty embedding response".into()))?;
        Ok(Array1::from_vec(vector))
    }
}
