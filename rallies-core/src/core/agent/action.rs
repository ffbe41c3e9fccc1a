//! Client for the remote data-retrieval endpoint
//!
//! Every failure is an [`ActionError`] whose rendered text starts with
//! [`ERROR_MARKER`]. The manager aborts a turn on any `Err`; payloads of
//! successful actions are never inspected for the marker.

use crate::config::RalliesConfig;
use crate::config::constants::{limits, urls};
use reqwest::{Client as HttpClient, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix shared by every user-facing action failure
pub const ERROR_MARKER: &str = "⚠";

const NO_RESULTS: &str = "No results returned";

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("⚠ Rate limit reached: {0}")]
    RateLimited(String),
    #[error("⚠ Authentication failed: Invalid API key")]
    InvalidApiKey,
    #[error("⚠ Access denied: {0}")]
    AccessDenied(String),
    #[error("⚠ API Error: Request failed with status {0}")]
    Http(u16),
    #[error("⚠ Network Error: {0}")]
    Network(String),
    #[error("⚠ Error: {0}")]
    Other(String),
}

impl ActionError {
    /// Categorize a denial message from an `allowed: false` response
    pub fn from_denial(message: &str) -> Self {
        if message.contains("Rate limit exceeded") {
            ActionError::RateLimited(message.to_string())
        } else if message.contains("Invalid API key") {
            ActionError::InvalidApiKey
        } else {
            ActionError::AccessDenied(message.to_string())
        }
    }
}

/// Last usage figures reported by the endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageCounters {
    pub current_usage: i64,
    pub limit: i64,
}

impl UsageCounters {
    pub fn remaining(&self) -> i64 {
        self.limit - self.current_usage
    }
}

#[derive(Debug, Serialize)]
struct ActionRequest<'a> {
    question: &'a str,
    title: &'a str,
    description: &'a str,
}

#[derive(Debug, Deserialize)]
struct ActionResponse {
    #[serde(default)]
    allowed: Option<bool>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    results: Option<Value>,
    #[serde(default)]
    current_usage: Option<i64>,
    #[serde(default)]
    limit: Option<i64>,
}

/// Successful action payload plus the usage it reported
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub results: Value,
    pub usage: UsageCounters,
}

#[derive(Debug, Clone)]
pub struct ActionClient {
    http_client: HttpClient,
    endpoint: String,
    api_key: Option<String>,
}

impl ActionClient {
    pub fn new(config: &RalliesConfig) -> Self {
        Self {
            http_client: HttpClient::new(),
            endpoint: format!(
                "{}{}",
                config.api_base_url.trim_end_matches('/'),
                urls::COMPLETE_ACTION_PATH
            ),
            api_key: config.action_api_key().map(str::to_string),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Replace the bearer credential from a fresh configuration snapshot
    pub fn set_api_key(&mut self, config: &RalliesConfig) {
        self.api_key = config.action_api_key().map(str::to_string);
    }

    /// Run one retrieval step; no retry, bounded by the action timeout
    pub async fn complete(
        &self,
        question: &str,
        title: &str,
        description: &str,
    ) -> Result<ActionOutcome, ActionError> {
        let payload = ActionRequest {
            question,
            title,
            description,
        };
        tracing::debug!(endpoint = %self.endpoint, title, "running action");

        let mut request = self
            .http_client
            .post(&self.endpoint)
            .timeout(limits::ACTION_TIMEOUT)
            .json(&payload);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ActionError::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), "action endpoint returned an error status");
            return Err(ActionError::Http(status.as_u16()));
        }

        let body: ActionResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                ActionError::Other(e.to_string())
            } else {
                ActionError::Network(e.to_string())
            }
        })?;

        if body.allowed == Some(false) {
            let message = body.error.unwrap_or_else(|| "Unknown error".to_string());
            tracing::warn!(error = %message, "action denied");
            return Err(ActionError::from_denial(&message));
        }

        Ok(ActionOutcome {
            results: body
                .results
                .unwrap_or_else(|| Value::String(NO_RESULTS.to_string())),
            usage: UsageCounters {
                current_usage: body.current_usage.unwrap_or(0),
                limit: body.limit.unwrap_or(0),
            },
        })
    }
}
