use super::sse::SseBuffer;
use crate::config::constants::{models, urls};
use crate::llm::provider::{LLMError, LLMProvider, LLMRequest, LLMResponse, LLMStream};
use async_stream::try_stream;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client as HttpClient;
use serde_json::{Value, json};

/// Gemini `generateContent` backend
///
/// The conversation is flattened into one user turn: message contents joined
/// with newlines, instruction first.
pub struct GeminiProvider {
    api_key: String,
    http_client: HttpClient,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, models::google::DEFAULT_MODEL.to_string())
    }

    pub fn with_model(api_key: String, model: String) -> Self {
        Self {
            api_key,
            http_client: HttpClient::new(),
            base_url: urls::GEMINI_API_BASE.to_string(),
            model,
        }
    }

    fn convert_to_gemini_format(&self, request: &LLMRequest) -> Value {
        let prompt = request
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        })
    }

    async fn send(&self, request: &LLMRequest) -> Result<reqwest::Response, LLMError> {
        self.validate_request(request)?;
        let url = if request.stream {
            format!(
                "{}/models/{}:streamGenerateContent?alt=sse&key={}",
                self.base_url, request.model, self.api_key
            )
        } else {
            format!(
                "{}/models/{}:generateContent?key={}",
                self.base_url, request.model, self.api_key
            )
        };
        tracing::debug!(model = %request.model, stream = request.stream, "gemini request");

        let response = self
            .http_client
            .post(&url)
            .json(&self.convert_to_gemini_format(request))
            .send()
            .await
            .map_err(|e| LLMError::Network(format!("Gemini: {}", e.without_url())))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            if error_text.contains("quota") || error_text.contains("rate limit") {
                return Err(LLMError::RateLimit);
            }
            return Err(LLMError::from_status("Gemini", status, &error_text));
        }
        Ok(response)
    }
}

/// Text of the first candidate's parts
pub(crate) fn candidate_text(response_json: &Value) -> String {
    response_json
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect::<String>()
        })
        .unwrap_or_default()
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        let response = self.send(&request).await?;
        let gemini_response: Value = response
            .json()
            .await
            .map_err(|e| LLMError::Provider(format!("Gemini: failed to parse response: {e}")))?;

        if gemini_response.get("candidates").is_none() {
            return Err(LLMError::Provider(
                "Gemini: response carried no candidates".to_string(),
            ));
        }

        Ok(LLMResponse::text(candidate_text(&gemini_response)))
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
                    .map_err(|e| LLMError::Network(format!("Gemini streaming error: {e}")))?;
                for data in sse.push(&chunk) {
                    let payload: Value = serde_json::from_str(&data).map_err(|e| {
                        LLMError::Provider(format!("Gemini: failed to parse stream payload: {e}"))
                    })?;
                    let text = candidate_text(&payload);
                    if !text.is_empty() {
                        yield text;
                    }
                }
            }

            for data in sse.finish() {
                if let Ok(payload) = serde_json::from_str::<Value>(&data) {
                    let text = candidate_text(&payload);
                    if !text.is_empty() {
                        yield text;
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::Message;

    #[test]
    fn conversation_is_flattened_into_one_user_turn() {
        let provider = GeminiProvider::new("g-key".to_string());
        let request = LLMRequest::new(
            models::google::DEFAULT_MODEL,
            vec![Message::developer("Summarize."), Message::assistant("[]"), Message::user("Q")],
        );
        let body = provider.convert_to_gemini_format(&request);

        assert_eq!(body["contents"].as_array().unwrap().len(), 1);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Summarize.\n[]\nQ");
    }

    #[test]
    fn candidate_parts_are_concatenated() {
        let payload = json!({
            "candidates": [{ "content": { "parts": [{ "text": "a" }, { "text": "b" }] } }]
        });
        assert_eq!(candidate_text(&payload), "ab");
    }

    #[test]
    fn missing_candidates_yield_empty_text() {
        assert_eq!(candidate_text(&json!({ "promptFeedback": {} })), "");
    }
}
