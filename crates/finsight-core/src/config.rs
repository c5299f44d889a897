//! Pipeline and provider configuration.

use serde::Serialize;

use crate::{Error, Result};

/// Settings for the hosted embedding and chat endpoints.
///
/// Both capabilities are reached through an OpenAI-compatible API surface;
/// `base_url` carries the full versioned prefix (e.g. `.../api/paas/v4`).
#[derive(Debug, Clone, Serialize)]
pub struct ProviderConfig {
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    /// Never serialized; the status route must not leak it.
    #[serde(skip_serializing)]
    pub api_key: String,
    #[serde(rename = "embedModel")]
    pub embed_model: String,
    #[serde(rename = "chatModel")]
    pub chat_model: String,
    #[serde(rename = "embeddingDim")]
    pub embedding_dim: usize,
    pub temperature: f64,
    #[serde(rename = "maxTokens")]
    pub max_tokens: usize,
}

/// Top-level analyst configuration.
#[derive(Debug, Clone, Serialize)]
pub struct AnalystConfig {
    /// Maximum chunk length in bytes.
    #[serde(rename = "chunkSize")]
    pub chunk_size: usize,
    /// Content shared between adjacent chunks, in bytes.
    #[serde(rename = "chunkOverlap")]
    pub chunk_overlap: usize,
    /// Chunks submitted per embedding request.
    #[serde(rename = "embedBatchSize")]
    pub embed_batch_size: usize,
    /// Unconditional pause after every batch attempt, in milliseconds.
    #[serde(rename = "batchPauseMs")]
    pub batch_pause_ms: u64,
    /// Chunks retrieved per question.
    #[serde(rename = "retrievalTopK")]
    pub retrieval_top_k: usize,
    pub provider: ProviderConfig,
}

impl AnalystConfig {
    /// Build configuration from `FINSIGHT_*` environment variables.
    ///
    /// Only the API key is required; everything else has a default tuned
    /// for the embedding-2 / glm-4 pair the pipeline was built against.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("FINSIGHT_API_KEY")
            .map_err(|_| Error::Config("FINSIGHT_API_KEY is not set".into()))?;

        let provider = ProviderConfig {
            base_url: env_or("FINSIGHT_BASE_URL", "https://open.bigmodel.cn/api/paas/v4"),
            api_key,
            embed_model: env_or("FINSIGHT_EMBED_MODEL", "embedding-2"),
            chat_model: env_or("FINSIGHT_CHAT_MODEL", "glm-4"),
            embedding_dim: env_parse("FINSIGHT_EMBEDDING_DIM", 1024),
            temperature: env_parse("FINSIGHT_TEMPERATURE", 0.1),
            max_tokens: env_parse("FINSIGHT_MAX_TOKENS", 2048),
        };

        Ok(Self {
            chunk_size: env_parse("FINSIGHT_CHUNK_SIZE", 500),
            chunk_overlap: env_parse("FINSIGHT_CHUNK_OVERLAP", 100),
            embed_batch_size: env_parse("FINSIGHT_EMBED_BATCH_SIZE", 10),
            batch_pause_ms: env_parse("FINSIGHT_BATCH_PAUSE_MS", 300),
            retrieval_top_k: env_parse("FINSIGHT_RETRIEVAL_TOP_K", 4),
            provider,
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
