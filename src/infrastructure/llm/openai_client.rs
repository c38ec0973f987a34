use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use crate::application::ports::{Embedder, LlmClient, ServiceError};
use crate::domain::{Embedding, Message};
use crate::presentation::config::{LlmProvider, LlmSettings};

/// Chat-completion and embedding client for OpenAI and Azure OpenAI deployments.
pub struct OpenAiClient {
    client: Client,
    provider: LlmProvider,
    endpoint: String,
    api_key: String,
    api_version: String,
    chat_model: String,
    embedding_model: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a [&'a str],
    model: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

impl OpenAiClient {
    pub fn new(settings: &LlmSettings) -> Result<Self, ServiceError> {
        if settings.api_key.trim().is_empty() {
            return Err(ServiceError::Authentication(
                "LLM API key is not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| ServiceError::Unavailable(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            client,
            provider: settings.provider,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            api_version: settings.api_version.clone(),
            chat_model: settings.chat_model.clone(),
            embedding_model: settings.embedding_model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        })
    }

    fn url(&self, model: &str, operation: &str) -> String {
        match self.provider {
            LlmProvider::Azure => format!(
                "{}/openai/deployments/{}/{}?api-version={}",
                self.endpoint, model, operation, self.api_version
            ),
            LlmProvider::OpenAi => format!("{}/{}", self.endpoint, operation),
        }
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match self.provider {
            LlmProvider::Azure => request.header("api-key", &self.api_key),
            LlmProvider::OpenAi => request.bearer_auth(&self.api_key),
        }
    }

    async fn post_json<B, R>(&self, url: String, body: &B) -> Result<R, ServiceError>
    where
        B: Serialize + Sync,
        R: for<'de> Deserialize<'de>,
    {
        let response = self
            .apply_auth(self.client.post(url))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(ServiceError::from_status(status, &text));
        }

        response
            .json()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    #[tracing::instrument(skip(self, messages), fields(model = %self.chat_model, messages = messages.len()))]
    async fn chat(&self, messages: &[Message]) -> Result<String, ServiceError> {
        let request_body = ChatCompletionRequest {
            model: &self.chat_model,
            messages: messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response: ChatCompletionResponse = self
            .post_json(self.url(&self.chat_model, "chat/completions"), &request_body)
            .await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ServiceError::InvalidResponse("empty choices".to_string()))?;

        tracing::debug!(chars = content.len(), "Completion received");
        Ok(content)
    }
}

#[async_trait]
impl Embedder for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Embedding, ServiceError> {
        let results = self.embed_batch(&[text]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::InvalidResponse("empty embedding response".to_string()))
    }

    #[tracing::instrument(skip(self, texts), fields(model = %self.embedding_model, count = texts.len()))]
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, ServiceError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request_body = EmbeddingRequest {
            input: texts,
            model: &self.embedding_model,
        };

        let mut response: EmbeddingResponse = self
            .post_json(self.url(&self.embedding_model, "embeddings"), &request_body)
            .await?;

        response.data.sort_by_key(|d| d.index);
        Ok(response
            .data
            .into_iter()
            .map(|d| Embedding::new(d.embedding))
            .collect())
    }
}
