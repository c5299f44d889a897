//! Error types for FinSight.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Per-document extraction failure. Absorbed by the extractor and
    /// recorded in the ingest report; never propagated out of it.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The supplied documents produced no chunkable text. Halts ingestion
    /// before any embedding call is made.
    #[error("No text content extracted from the supplied documents")]
    EmptyContent,

    /// One embedding batch failed. Absorbed by the index builder, which
    /// skips the batch and carries on.
    #[error("Embedding batch error: {0}")]
    EmbeddingBatch(String),

    /// Every embedding batch failed; nothing was indexed.
    #[error("No index produced: every embedding batch failed")]
    NoIndexProduced,

    /// A question arrived before any successful ingestion.
    #[error("Session not initialized: ingest documents first")]
    NotInitialized,

    /// The embedding or language-model capability failed while answering.
    #[error("Model invocation error: {0}")]
    ModelInvocation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
