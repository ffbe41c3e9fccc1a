//! Provider abstraction for the completion backends
//!
//! Both backends honor the same two-call contract: a one-shot
//! [`LLMProvider::generate`] returning the full text, and
//! [`LLMProvider::stream`] yielding text fragments in emission order.
//!
//! ## Message Role Mapping
//!
//! ### OpenAI Responses API
//! - `developer`, `user`, `assistant` and `system` are passed through.
//!
//! ### Gemini API
//! - Only `user` and `model` exist; the provider flattens the whole
//!   conversation into a single user turn, so role strings are informational.

use crate::config::constants::message_roles;
use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;

/// Universal LLM request structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMRequest {
    pub messages: Vec<Message>,
    pub model: String,
    pub stream: bool,
}

impl LLMRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            messages,
            model: model.into(),
            stream: false,
        }
    }

    pub fn streaming(mut self) -> Self {
        self.stream = true;
        self
    }
}

/// Role/content pair sent to a backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }

    /// Instruction message; OpenAI treats `developer` above `user`
    pub fn developer(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Developer,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    Developer,
    User,
    Assistant,
}

impl MessageRole {
    /// Get the role string for the OpenAI Responses API
    pub fn as_openai_str(&self) -> &'static str {
        match self {
            MessageRole::System => message_roles::SYSTEM,
            MessageRole::Developer => message_roles::DEVELOPER,
            MessageRole::User => message_roles::USER,
            MessageRole::Assistant => message_roles::ASSISTANT,
        }
    }
}

/// Universal LLM response
#[derive(Debug, Clone, Default)]
pub struct LLMResponse {
    pub content: Option<String>,
}

impl LLMResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }

    /// Response text, empty when the backend produced none
    pub fn into_text(self) -> String {
        self.content.unwrap_or_default()
    }
}

/// Finite stream of answer fragments
pub type LLMStream = Pin<Box<dyn Stream<Item = Result<String, LLMError>> + Send>>;

/// Universal LLM provider trait
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Provider name (e.g., "openai", "gemini")
    fn name(&self) -> &str;

    /// Model the provider was configured with
    fn model(&self) -> &str;

    /// Generate completion
    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError>;

    /// Stream completion
    ///
    /// The default falls back to a single fragment holding the full response.
    async fn stream(&self, request: LLMRequest) -> Result<LLMStream, LLMError> {
        let response = self.generate(request).await?;
        let text = response.into_text();
        Ok(Box::pin(futures::stream::once(async move { Ok(text) })))
    }

    /// Validate request for this provider
    fn validate_request(&self, request: &LLMRequest) -> Result<(), LLMError> {
        if request.messages.is_empty() {
            return Err(LLMError::InvalidRequest(
                "Messages cannot be empty".to_string(),
            ));
        }
        if request.model.is_empty() {
            return Err(LLMError::InvalidRequest(
                "Model cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Rate limit exceeded")]
    RateLimit,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Provider error: {0}")]
    Provider(String),
}

impl LLMError {
    /// Categorize a non-success HTTP status from a backend
    pub fn from_status(provider: &str, status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 | 403 => LLMError::Authentication(format!("{provider}: {body}")),
            429 => LLMError::RateLimit,
            400 | 404 | 422 => LLMError::InvalidRequest(format!("{provider} HTTP {status}: {body}")),
            _ => LLMError::Provider(format!("{provider} HTTP {status}: {body}")),
        }
    }
}
