//! Batched, rate-limited vector index construction.
//!
//! Chunks are sanitized, grouped into fixed-size batches, and embedded
//! strictly sequentially. A failed batch is skipped for good; the pause
//! after every attempt keeps the request rate under the provider's ceiling.
//! The resulting index may therefore hold fewer chunks than were submitted,
//! and the outcome says so explicitly.

use std::time::Duration;

use finsight_core::{Error, Result};
use finsight_embed::Embedder;
use finsight_index::VectorIndex;
use finsight_ingest::Chunk;
use tracing::{debug, warn};

/// Outcome of one build: the accumulated index plus the accounting that
/// reveals how much of the input actually made it in.
#[derive(Debug)]
pub struct BuildOutcome {
    pub index: VectorIndex,
    /// Sanitized chunks submitted for embedding.
    pub submitted: usize,
    /// Chunks whose vectors ended up in the index.
    pub indexed: usize,
    pub failed_batches: usize,
}

/// Incremental index builder over an embedding backend.
pub struct IndexBuilder<'a> {
    embedder: &'a dyn Embedder,
    batch_size: usize,
    batch_pause: Duration,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(embedder: &'a dyn Embedder, batch_size: usize, batch_pause: Duration) -> Self {
        Self {
            embedder,
            batch_size: batch_size.max(1),
            batch_pause,
        }
    }

    /// Sanitize chunk text for embedding: newlines folded to spaces, leading
    /// and trailing whitespace trimmed, empties dropped.
    pub fn sanitize(chunks: &[Chunk]) -> Vec<String> {
        chunks
            .iter()
            .map(|c| c.text.replace(['\n', '\r'], " ").trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Build a vector index from the chunk sequence.
    ///
    /// `on_progress` receives submitted/total after every batch attempt,
    /// success or failure; the final report is always 1.0. Returns
    /// `EmptyContent` when sanitization leaves nothing to embed and
    /// `NoIndexProduced` when every batch fails.
    pub async fn build(
        &self,
        chunks: &[Chunk],
        mut on_progress: impl FnMut(f64),
    ) -> Result<BuildOutcome> {
        let texts = Self::sanitize(chunks);
        if texts.is_empty() {
            return Err(Error::EmptyContent);
        }

        let total = texts.len();
        let mut index: Option<VectorIndex> = None;
        let mut submitted = 0usize;
        let mut indexed = 0usize;
        let mut failed_batches = 0usize;

        for batch in texts.chunks(self.batch_size) {
            submitted += batch.len();

            match self.embedder.embed_batch(batch).await {
                Ok(vectors) => {
                    match index.as_mut() {
                        Some(existing) => existing.insert(batch.to_vec(), vectors)?,
                        None => {
                            index = Some(VectorIndex::from_pairs(
                                self.embedder.dimension(),
                                batch.to_vec(),
                                vectors,
                            )?)
                        }
                    }
                    indexed += batch.len();
                    debug!("Embedded batch: {}/{} chunks indexed", indexed, total);
                }
                Err(e) => {
                    // Deliberate best-effort policy: the batch is skipped,
                    // never retried or re-queued.
                    failed_batches += 1;
                    warn!("Embedding batch failed, skipping {} chunks: {}", batch.len(), e);
                }
            }

            on_progress(submitted as f64 / total as f64);
            tokio::time::sleep(self.batch_pause).await;
        }

        match index {
            Some(index) => Ok(BuildOutcome {
                index,
                submitted: total,
                indexed,
                failed_batches,
            }),
            None => Err(Error::NoIndexProduced),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted embedder: fails the batches whose (1-based) ordinal is
    /// listed, succeeds otherwise.
    struct ScriptedEmbedder {
        dim: usize,
        fail_batches: Vec<usize>,
        calls: AtomicUsize,
    }

    impl ScriptedEmbedder {
        fn new(dim: usize, fail_batches: Vec<usize>) -> Self {
            Self {
                dim,
                fail_batches,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Embedder for ScriptedEmbedder {
        async fn embed_batch(&self, texts: &[String]) -> finsight_core::Result<Vec<Vec<f32>>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_batches.contains(&call) {
                return Err(Error::EmbeddingBatch("scripted failure".into()));
            }
            Ok(texts.iter().map(|t| {
                let mut v = vec![0.0; self.dim];
                v[0] = t.len() as f32;
                v
            }).collect())
        }

        fn dimension(&self) -> usize {
            self.dim
        }
    }

    fn chunks(n: usize) -> Vec<Chunk> {
        (0..n)
            .map(|i| Chunk {
                text: format!("chunk number {i}"),
                index: i,
                start: 0,
                end: 0,
            })
            .collect()
    }

    fn builder(embedder: &ScriptedEmbedder) -> IndexBuilder<'_> {
        IndexBuilder::new(embedder, 10, Duration::ZERO)
    }

    #[test]
    fn sanitize_folds_newlines_and_drops_empties() {
        let input = vec![
            Chunk { text: "line one\nline two".into(), index: 0, start: 0, end: 0 },
            Chunk { text: "  \n\r  ".into(), index: 1, start: 0, end: 0 },
            Chunk { text: "  padded  ".into(), index: 2, start: 0, end: 0 },
        ];
        let sanitized = IndexBuilder::sanitize(&input);
        assert_eq!(sanitized, vec!["line one line two", "padded"]);
    }

    #[tokio::test]
    async fn failed_batch_is_skipped_not_retried() {
        let embedder = ScriptedEmbedder::new(4, vec![2]);
        let outcome = builder(&embedder).build(&chunks(25), |_| {}).await.unwrap();

        assert_eq!(outcome.submitted, 25);
        assert_eq!(outcome.indexed, 15);
        assert_eq!(outcome.failed_batches, 1);
        assert_eq!(outcome.index.len(), 15);
        // Three batches, three calls: nothing was retried.
        assert_eq!(embedder.calls(), 3);
    }

    #[tokio::test]
    async fn progress_is_monotone_and_ends_at_one() {
        let embedder = ScriptedEmbedder::new(4, vec![2]);
        let mut reports = Vec::new();
        builder(&embedder)
            .build(&chunks(25), |p| reports.push(p))
            .await
            .unwrap();

        assert_eq!(reports, vec![0.4, 0.8, 1.0]);
        for pair in reports.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[tokio::test]
    async fn all_batches_failing_produces_no_index() {
        let embedder = ScriptedEmbedder::new(4, vec![1, 2, 3]);
        let mut reports = Vec::new();
        let err = builder(&embedder)
            .build(&chunks(25), |p| reports.push(p))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NoIndexProduced));
        // Progress still ran to completion over the attempted batches.
        assert_eq!(reports.last().copied(), Some(1.0));
    }

    #[tokio::test]
    async fn empty_sanitized_input_fails_before_any_embedding_call() {
        let embedder = ScriptedEmbedder::new(4, vec![]);
        let input = vec![Chunk { text: "\n \n".into(), index: 0, start: 0, end: 0 }];
        let err = builder(&embedder).build(&input, |_| {}).await.unwrap_err();

        assert!(matches!(err, Error::EmptyContent));
        assert_eq!(embedder.calls(), 0);
    }

    #[tokio::test]
    async fn first_batch_creates_later_batches_extend() {
        let embedder = ScriptedEmbedder::new(4, vec![]);
        let outcome = builder(&embedder).build(&chunks(25), |_| {}).await.unwrap();

        assert_eq!(outcome.index.len(), 25);
        assert_eq!(outcome.indexed, 25);
        assert_eq!(outcome.failed_batches, 0);
    }
}
