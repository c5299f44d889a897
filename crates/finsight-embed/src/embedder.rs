//! Embedding capability trait.

use async_trait::async_trait;
use finsight_core::Result;

/// Batch embedding capability.
///
/// Calls are never retried by this system; a failed call fails the whole
/// batch it carried, and the caller decides what to do with the gap.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts, returning one vector per input in input
    /// order. A response with a different vector count is an error, never a
    /// partially populated result.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Dimension of the vectors this backend produces.
    fn dimension(&self) -> usize;
}
