//! OpenAI-compatible `/embeddings` HTTP backend.

use async_trait::async_trait;
use finsight_core::{Error, ProviderConfig, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::embedder::Embedder;

/// Remote embedding backend speaking the OpenAI-compatible embeddings API.
pub struct HttpEmbedder {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    dim: usize,
}

impl HttpEmbedder {
    pub fn new(provider: &ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: embeddings_endpoint(&provider.base_url),
            api_key: provider.api_key.clone(),
            model: provider.embed_model.clone(),
            dim: provider.embedding_dim,
        }
    }
}

fn embeddings_endpoint(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with("/embeddings") {
        base.to_string()
    } else {
        format!("{base}/embeddings")
    }
}

#[derive(Serialize)]
struct EmbeddingRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let body = EmbeddingRequest {
            model: self.model.clone(),
            input: texts.to_vec(),
        };

        debug!("Embedding {} texts with {}", texts.len(), self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::EmbeddingBatch(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::EmbeddingBatch(format!("API error {status}: {body}")));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Error::EmbeddingBatch(format!("malformed response: {e}")))?;

        if parsed.data.len() != texts.len() {
            return Err(Error::EmbeddingBatch(format!(
                "expected {} vectors, got {}",
                texts.len(),
                parsed.data.len()
            )));
        }

        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }

    fn dimension(&self) -> usize {
        self.dim
    }
}

#[cfg(test)]
mod tests {
    use super::embeddings_endpoint;

    #[test]
    fn endpoint_appends_embeddings_to_versioned_base() {
        assert_eq!(
            embeddings_endpoint("https://open.bigmodel.cn/api/paas/v4"),
            "https://open.bigmodel.cn/api/paas/v4/embeddings"
        );
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        assert_eq!(
            embeddings_endpoint("https://api.example.com/v1/"),
            "https://api.example.com/v1/embeddings"
        );
    }

    #[test]
    fn endpoint_preserves_explicit_embeddings_url() {
        assert_eq!(
            embeddings_endpoint("https://api.example.com/v1/embeddings"),
            "https://api.example.com/v1/embeddings"
        );
    }
}
