//! OpenAI-compatible `/chat/completions` backend.

use async_trait::async_trait;
use finsight_core::{Error, ProviderConfig, Result};
use serde_json::json;
use tracing::debug;

use crate::types::ChatMessage;

/// Language-model capability: one prepared message list in, one answer out.
///
/// Failures are surfaced to the caller; nothing is retried here.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// Remote chat model speaking the OpenAI-compatible completions API,
/// non-streaming.
pub struct HttpChatModel {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f64,
    max_tokens: usize,
}

impl HttpChatModel {
    pub fn new(provider: &ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: chat_endpoint(&provider.base_url),
            api_key: provider.api_key.clone(),
            model: provider.chat_model.clone(),
            temperature: provider.temperature,
            max_tokens: provider.max_tokens,
        }
    }
}

fn chat_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

#[async_trait]
impl LanguageModel for HttpChatModel {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        });

        debug!("Completing with {} ({} messages)", self.model, messages.len());

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::ModelInvocation(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ModelInvocation(format!("API error {status}: {body}")));
        }

        let parsed: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::ModelInvocation(format!("malformed response: {e}")))?;

        let answer = parsed["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| Error::ModelInvocation("completion response has no content".into()))?;

        Ok(answer.to_string())
    }
}
