//! The analyst facade: the surface the presentation shell talks to.
//!
//! Holds the capabilities and at most one retrieval session. Ingestion runs
//! the whole extract -> chunk -> build pipeline to completion and only then
//! binds a fresh session; until that happens every question fails with
//! `NotInitialized` before any external call is made.

use std::sync::Arc;
use std::time::Duration;

use finsight_chat::{AnalysisTask, LanguageModel};
use finsight_core::{AnalystConfig, Error, Result};
use finsight_embed::Embedder;
use finsight_ingest::{extract_documents, ExtractionFailure, SourceDocument, TextSplitter};
use serde::Serialize;
use tracing::info;

use crate::builder::IndexBuilder;
use crate::session::RetrievalSession;

/// Aggregate result of one ingestion cycle. `indexed_count` can trail
/// `chunk_count` when embedding batches failed; the gap is the partial
/// failure the caller is owed visibility into.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    #[serde(rename = "chunkCount")]
    pub chunk_count: usize,
    #[serde(rename = "indexedCount")]
    pub indexed_count: usize,
    #[serde(rename = "failedBatches")]
    pub failed_batches: usize,
    #[serde(rename = "extractionFailures")]
    pub extraction_failures: Vec<ExtractionFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalystStatus {
    pub ready: bool,
    #[serde(rename = "indexedChunks")]
    pub indexed_chunks: usize,
    pub turns: usize,
}

/// Facade binding the pipeline, the capabilities, and one optional session.
pub struct Analyst {
    config: AnalystConfig,
    embedder: Arc<dyn Embedder>,
    model: Arc<dyn LanguageModel>,
    session: Option<RetrievalSession>,
}

impl Analyst {
    pub fn new(
        config: AnalystConfig,
        embedder: Arc<dyn Embedder>,
        model: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            config,
            embedder,
            model,
            session: None,
        }
    }

    pub fn config(&self) -> &AnalystConfig {
        &self.config
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    /// Run the full ingestion pipeline and bind a fresh session on success.
    ///
    /// `on_progress` receives fractional completion after every embedding
    /// batch. A successful re-ingestion replaces the previous session
    /// (fresh index, fresh conversation); a failed one leaves it untouched.
    pub async fn ingest(
        &mut self,
        documents: &[SourceDocument],
        on_progress: impl FnMut(f64),
    ) -> Result<IngestReport> {
        let extraction = extract_documents(documents);

        let splitter = TextSplitter::new(self.config.chunk_size, self.config.chunk_overlap);
        let chunks = splitter.split(&extraction.text);
        if chunks.is_empty() {
            return Err(Error::EmptyContent);
        }

        let builder = IndexBuilder::new(
            self.embedder.as_ref(),
            self.config.embed_batch_size,
            Duration::from_millis(self.config.batch_pause_ms),
        );
        let outcome = builder.build(&chunks, on_progress).await?;

        info!(
            "Ingested {} documents: {}/{} chunks indexed, {} failed batches",
            documents.len(),
            outcome.indexed,
            outcome.submitted,
            outcome.failed_batches
        );

        self.session = Some(RetrievalSession::new(
            outcome.index,
            self.config.retrieval_top_k,
        ));

        Ok(IngestReport {
            chunk_count: outcome.submitted,
            indexed_count: outcome.indexed,
            failed_batches: outcome.failed_batches,
            extraction_failures: extraction.failures,
        })
    }

    /// Answer a free-form question against the bound session.
    pub async fn ask(&mut self, question: &str) -> Result<String> {
        let session = self.session.as_mut().ok_or(Error::NotInitialized)?;
        session
            .answer(self.embedder.as_ref(), self.model.as_ref(), question)
            .await
    }

    /// Run one of the fixed analytical prompts through the ordinary ask
    /// path.
    pub async fn run_task(&mut self, task: AnalysisTask) -> Result<String> {
        self.ask(task.prompt()).await
    }

    pub fn status(&self) -> AnalystStatus {
        AnalystStatus {
            ready: self.is_ready(),
            indexed_chunks: self.session.as_ref().map_or(0, |s| s.index().len()),
            turns: self.session.as_ref().map_or(0, |s| s.memory().len()),
        }
    }

    /// Clear the conversation memory, keeping the index.
    pub fn reset(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.reset_memory();
        }
    }
}
