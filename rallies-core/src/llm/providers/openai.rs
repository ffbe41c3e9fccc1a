use super::sse::SseBuffer;
use crate::config::constants::{models, urls};
use crate::llm::provider::{LLMError, LLMProvider, LLMRequest, LLMResponse, LLMStream};
use async_stream::try_stream;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client as HttpClient;
use serde_json::{Value, json};

const OUTPUT_TEXT_DELTA: &str = "response.output_text.delta";

/// OpenAI Responses API backend
pub struct OpenAIProvider {
    api_key: String,
    http_client: HttpClient,
    base_url: String,
    model: String,
}

impl OpenAIProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, models::openai::DEFAULT_MODEL.to_string())
    }

    pub fn with_model(api_key: String, model: String) -> Self {
        Self {
            api_key,
            http_client: HttpClient::new(),
            base_url: urls::OPENAI_API_BASE.to_string(),
            model,
        }
    }

    fn convert_to_openai_format(&self, request: &LLMRequest) -> Value {
        let input: Vec<Value> = request
            .messages
            .iter()
            .map(|msg| {
                json!({
                    "role": msg.role.as_openai_str(),
                    "content": msg.content
                })
            })
            .collect();

        let mut openai_request = json!({
            "model": request.model,
            "input": input
        });
        if request.stream {
            openai_request["stream"] = Value::Bool(true);
        }
        openai_request
    }

    async fn send(&self, request: &LLMRequest) -> Result<reqwest::Response, LLMError> {
        self.validate_request(request)?;
        let url = format!("{}/responses", self.base_url);
        tracing::debug!(model = %request.model, stream = request.stream, "openai request");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.convert_to_openai_format(request))
            .send()
            .await
            .map_err(|e| LLMError::Network(format!("OpenAI: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LLMError::from_status("OpenAI", status, &error_text));
        }
        Ok(response)
    }
}

/// Concatenated `output_text` parts of a Responses API payload
pub(crate) fn parse_output_text(response_json: &Value) -> Result<String, LLMError> {
    if let Some(text) = response_json.get("output_text").and_then(Value::as_str) {
        return Ok(text.to_string());
    }

    let output = response_json
        .get("output")
        .and_then(Value::as_array)
        .ok_or_else(|| LLMError::Provider("Invalid response format: missing output".to_string()))?;

    let text = output
        .iter()
        .filter(|item| item.get("type").and_then(Value::as_str) == Some("message"))
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter(|part| part.get("type").and_then(Value::as_str) == Some("output_text"))
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect::<String>();
    Ok(text)
}

/// Text delta carried by one streaming event, if any
pub(crate) fn parse_stream_event(payload: &Value) -> Option<String> {
    if payload.get("type").and_then(Value::as_str) != Some(OUTPUT_TEXT_DELTA) {
        return None;
    }
    payload
        .get("delta")
        .and_then(Value::as_str)
        .filter(|delta| !delta.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        let response = self.send(&request).await?;
        let openai_response: Value = response
            .json()
            .await
            .map_err(|e| LLMError::Provider(format!("OpenAI: failed to parse response: {e}")))?;

        Ok(LLMResponse::text(parse_output_text(&openai_response)?))
    }

    async fn stream(&self, request: LLMRequest) -> Result<LLMStream, LLMError> {
        let request = LLMRequest {
            stream: true,
            ..request
        };
        let response = self.send(&request).await?;

        let stream = try_stream! {
            let mut body_stream = response.bytes_stream();
            let mut sse = SseBuffer::new();

            while let Some(chunk_result) = body_stream.next().await {
                let chunk = chunk_result
                    .map_err(|e| LLMError::Network(format!("OpenAI streaming error: {e}")))?;
                for data in sse.push(&chunk) {
                    let payload: Value = serde_json::from_str(&data).map_err(|e| {
                        LLMError::Provider(format!("OpenAI: failed to parse stream payload: {e}"))
                    })?;
                    if let Some(delta) = parse_stream_event(&payload) {
                        yield delta;
                    }
                }
            }

            for data in sse.finish() {
                if let Ok(payload) = serde_json::from_str::<Value>(&data) {
                    if let Some(delta) = parse_stream_event(&payload) {
                        yield delta;
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}
