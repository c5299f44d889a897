//! FinSight Ingest: report text extraction and chunking.

pub mod chunking;
pub mod extract;

pub use chunking::{Chunk, TextSplitter, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
pub use extract::{extract_documents, DocumentKind, Extraction, ExtractionFailure, SourceDocument};
