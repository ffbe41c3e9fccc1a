use super::provider::{LLMError, LLMProvider, LLMRequest, LLMStream, Message};
use super::providers::{GeminiProvider, OpenAIProvider};
use crate::config::constants::limits;
use crate::config::{LlmProviderKind, RalliesConfig};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Completion client shared by every agent operation
///
/// The backend is chosen once at construction; every call goes through the
/// same one-shot, streaming and structured-retry contract.
#[derive(Clone)]
pub struct LlmClient {
    provider: Arc<dyn LLMProvider>,
    model: String,
}

impl LlmClient {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        let model = provider.model().to_string();
        Self { provider, model }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model_id(&self) -> &str {
        &self.model
    }

    /// One-shot completion returning raw text
    pub async fn prompt(&self, messages: Vec<Message>) -> Result<String, LLMError> {
        let request = LLMRequest::new(self.model.clone(), messages);
        let response = self.provider.generate(request).await?;
        Ok(response.into_text())
    }

    /// Completion parsed as JSON into `T`.
    ///
    /// Unparseable output re-issues the whole call, at most
    /// [`limits::STRUCTURED_OUTPUT_ATTEMPTS`] times in total, then degrades to
    /// `T::default()`. Backend errors are returned immediately.
    pub async fn prompt_structured<T>(&self, messages: Vec<Message>) -> Result<T, LLMError>
    where
        T: DeserializeOwned + Default,
    {
        for attempt in 1..=limits::STRUCTURED_OUTPUT_ATTEMPTS {
            let text = self.prompt(messages.clone()).await?;
            match parse_structured::<T>(&text) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::debug!(attempt, error = %e, "structured output did not parse");
                }
            }
        }

        tracing::warn!(
            attempts = limits::STRUCTURED_OUTPUT_ATTEMPTS,
            "structured output never parsed, using empty result"
        );
        Ok(T::default())
    }

    /// Streaming completion yielding fragments in emission order
    pub async fn prompt_stream(&self, messages: Vec<Message>) -> Result<LLMStream, LLMError> {
        let request = LLMRequest::new(self.model.clone(), messages).streaming();
        self.provider.stream(request).await
    }
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("provider", &self.provider.name())
            .field("model", &self.model)
            .finish()
    }
}

/// Parse model output as JSON, tolerating a surrounding markdown code fence
fn parse_structured<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);
    serde_json::from_str(body.trim())
}

/// Create a client for the provider selected in `config`
pub fn make_client(config: &RalliesConfig, api_key: String) -> LlmClient {
    let model = config.model().to_string();
    let provider: Arc<dyn LLMProvider> = match config.llm_provider {
        LlmProviderKind::OpenAI => Arc::new(OpenAIProvider::with_model(api_key, model)),
        LlmProviderKind::Gemini => Arc::new(GeminiProvider::with_model(api_key, model)),
    };
    LlmClient::new(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::LLMResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Scripted {
        replies: Mutex<Vec<String>>,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn new(replies: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.iter().rev().map(|s| s.to_string()).collect()),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl LLMProvider for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted-1"
        }

        async fn generate(&self, _request: LLMRequest) -> Result<LLMResponse, LLMError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = self.replies.lock().unwrap().pop().unwrap_or_default();
            Ok(LLMResponse::text(reply))
        }
    }

    #[derive(Debug, Default, PartialEq, serde::Deserialize)]
    struct Step {
        title: String,
    }

    #[tokio::test]
    async fn structured_prompt_retries_until_parse() {
        let provider = Scripted::new(&["not json", "[{\"title\": \"Quote\"}]"]);
        let client = LlmClient::new(provider.clone());

        let steps: Vec<Step> = client
            .prompt_structured(vec![Message::user("q")])
            .await
            .unwrap();

        assert_eq!(steps, vec![Step { title: "Quote".into() }]);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn structured_prompt_gives_up_after_three_attempts() {
        let provider = Scripted::new(&["nope", "nope", "nope", "[]"]);
        let client = LlmClient::new(provider.clone());

        let steps: Vec<Step> = client
            .prompt_structured(vec![Message::user("q")])
            .await
            .unwrap();

        assert!(steps.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn fenced_json_is_accepted() {
        let parsed: Vec<u32> = parse_structured("```json\n[1, 2]\n```").unwrap();
        assert_eq!(parsed, vec![1, 2]);
    }

    #[test]
    fn client_reports_configured_backend() {
        let config = RalliesConfig::default().with_provider(LlmProviderKind::Gemini);
        let client = make_client(&config, "g-key".to_string());
        assert_eq!(client.provider_name(), "gemini");
        assert_eq!(client.model_id(), config.gemini_model);
    }
}
