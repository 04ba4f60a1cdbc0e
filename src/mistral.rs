use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::config::MistralConfig;
use crate::util::truncate_for_log;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP error: {0}")] Http(String),
    #[error("status={status} body={body}")] Status { status: u16, body: String },
    #[error("decode error: {0}")] Decode(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role { System, User }

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self { Self { role: Role::System, content: content.into() } }
    pub fn user(content: impl Into<String>) -> Self { Self { role: Role::User, content: content.into() } }
}

/// Body of a chat-completions call.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// A response with a single assistant choice holding `text`.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { choices: vec![Choice { message: ResponseMessage { content: Some(text.into()) } }] }
    }

    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.message.content.as_deref())
    }
}

/// Anything that can answer a list of role-tagged messages with text.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletionResponse, ChatError>;
}

pub struct MistralClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for MistralClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MistralClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl MistralClient {
    pub fn new(config: &MistralConfig) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ChatError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ChatCompletion for MistralClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletionResponse, ChatError> {
        let url = format!("{}/chat/completions", self.base_url);
        info!("🔗 Calling {} (model={}, messages={})", url, request.model, request.messages.len());

        let response = self.client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ChatError::Http(e.to_string()))?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        let body = response.text().await.map_err(|e| ChatError::Http(e.to_string()))?;
        if !status.is_success() {
            error!("❌ Mistral API error response: {}", truncate_for_log(&body, 2000));
            return Err(ChatError::Status { status: status.as_u16(), body });
        }

        serde_json::from_str(&body)
            .map_err(|e| ChatError::Decode(format!("{}: {}", e, truncate_for_log(&body, 500))))
    }
}
