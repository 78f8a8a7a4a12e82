//! Inference service client
//!
//! Talks to any OpenAI-compatible chat completions endpoint. The orchestrator
//! only sees the [`InferenceClient`] trait, so tests can substitute scripted,
//! failing or slow clients.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::model::InferenceConfig;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// A single chat completion round trip
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Send the instruction and the case, return the raw reply content
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError>;

    /// Model identifier used for logging
    fn model(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    content: Option<String>,
}

/// HTTP client for the configured inference endpoint
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    endpoint: String,
    model: String,
    temperature: f32,
    api_key: String,
}

impl LlmClient {
    /// Build a client, or `None` when no credential is configured
    pub fn from_config(config: &InferenceConfig) -> Result<Option<Self>, LlmError> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        let client = Client::builder()
            .user_agent(concat!("hackcourt-arbiter/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Some(Self {
            client,
            endpoint: completions_endpoint(&config.base_url),
            model: config.model.clone(),
            temperature: config.temperature,
            api_key,
        }))
    }
}

#[async_trait]
impl InferenceClient for LlmClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            model = %self.model,
            prompt_length = system.len() + user.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::ParseError(format!("Failed to deserialize completion: {}", e)))?;

        reply_content(body)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn completions_endpoint(base_url: &Url) -> String {
    format!("{}/chat/completions", base_url.as_str().trim_end_matches('/'))
}

/// Content of the first choice
fn reply_content(response: ChatResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| LlmError::ParseError("Completion has no message content".to_string()))
}
