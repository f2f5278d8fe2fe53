// Ollama-specific client implementation

use crate::config::OllamaConfig;
use crate::streaming::{parse_ndjson_stream, StreamEvent};
use crate::traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse};
use crate::types::Message;
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::Stream;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::pin::Pin;

/// Ollama client (HTTP direct, no SDK)
pub struct OllamaClient {
    http_client: reqwest::Client,
    chat_url: String,
}

impl OllamaClient {
    /// Create new client against `base_url` (e.g. `http://localhost:11434`)
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::from_config(&OllamaConfig::new(base_url))
    }

    pub fn from_config(config: &OllamaConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            chat_url: config.chat_url(),
        })
    }

    /// Build chat request payload
    fn build_chat_request(
        &self,
        model: &str,
        messages: &[Message],
        options: &ChatOptions,
        stream: bool,
    ) -> Result<Value> {
        let mut request = serde_json::json!({
            "model": model,
            "messages": serde_json::to_value(messages)?,
            "stream": stream,
            "raw": options.raw,
        });

        if let Some(temp) = options.temperature {
            if let Some(obj) = request.as_object_mut() {
                obj.insert("options".to_string(), serde_json::json!({ "temperature": temp }));
            }
        }

        Ok(request)
    }

    async fn post(&self, payload: &Value) -> Result<reqwest::Response> {
        let response = self
            .http_client
            .post(&self.chat_url)
            .json(payload)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Ollama API error ({}): {}", status, error_text);
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatClient for OllamaClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let payload = self.build_chat_request(
            &request.model,
            &request.messages,
            &request.options,
            false,
        )?;

        tracing::debug!(model = %request.model, messages = request.messages.len(), "sending chat request");

        let response = self.post(&payload).await?;

        let raw: Value = response
            .json()
            .await
            .context("Failed to parse response")?;

        let parsed: OllamaChatResponse = serde_json::from_value(raw.clone())
            .context("Unexpected response shape")?;

        let message = parsed
            .message
            .context("Response is missing the assistant message")?;

        Ok(ChatResponse {
            content: message.content,
            model: parsed.model,
            done: parsed.done,
            raw,
        })
    }

    async fn chat_stream(
        &self,
        request: ChatRequest,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<StreamEvent>> + Send>>> {
        let payload = self.build_chat_request(
            &request.model,
            &request.messages,
            &request.options,
            true,
        )?;

        tracing::debug!(model = %request.model, "opening chat stream");

        let response = self.post(&payload).await?;

        Ok(parse_ndjson_stream(response))
    }
}

// ============================================================================
// OLLAMA-SPECIFIC RESPONSE TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OllamaChatResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub message: Option<ResponseMessage>,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResponseMessage {
    pub role: String,
    pub content: String,
}
