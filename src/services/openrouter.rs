// src/services/openrouter.rs
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

use crate::config::Config;

pub const SYSTEM_PROMPT: &str = "You are a helpful AI assistant. Provide clear, well-structured responses with bullet points and headings when appropriate.";
pub const TEMPERATURE: f32 = 0.3;
pub const MAX_TOKENS: u32 = 1000;
pub const APP_TITLE: &str = "AI Chatbot";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    Upstream(String),
    #[error("Invalid response format")]
    InvalidResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionMessage {
    pub role: Role,
    pub content: String,
}

/// Body of the upstream chat-completion call.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<CompletionMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![
                CompletionMessage {
                    role: Role::System,
                    content: SYSTEM_PROMPT.to_string(),
                },
                CompletionMessage {
                    role: Role::User,
                    content: user_message.into(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// Pull `choices[0].message.content` out of a successful upstream body.
pub fn extract_reply(data: &Value) -> Result<String, RelayError> {
    data.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(RelayError::InvalidResponse)
}

/// Parse an error body, treating anything unparseable as `{}`.
pub fn parse_error_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|_| Value::Object(Default::default()))
}

/// `error.message` from the upstream body, else `HTTP <status>`.
pub fn upstream_error_message(status: StatusCode, body: &Value) -> String {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .filter(|msg| !msg.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    referer: String,
}

impl OpenRouterClient {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.upstream_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            referer: config.referer(),
        })
    }

    /// Send one message upstream and return the reply text. Never retries.
    pub async fn complete(&self, message: &str) -> Result<String, RelayError> {
        info!(model = %self.model, "Sending message upstream: {}", message);

        let payload = CompletionRequest::new(&self.model, message);
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", APP_TITLE)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RelayError::Upstream(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let data = parse_error_body(&body);
            error!(status = status.as_u16(), "Upstream API error: {}", data);
            return Err(RelayError::Upstream(upstream_error_message(status, &data)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RelayError::Upstream(e.to_string()))?;
        let data: Value = serde_json::from_slice(&body).map_err(|_| RelayError::InvalidResponse)?;
        let reply = extract_reply(&data)?;

        info!("Response received successfully");
        Ok(reply)
    }
}
