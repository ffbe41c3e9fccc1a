//! Shared fixtures: a scripted completion backend and mock endpoint bodies

#![allow(dead_code)]

use async_trait::async_trait;
use rallies_core::config::RalliesConfig;
use rallies_core::core::agent::Agent;
use rallies_core::llm::LlmClient;
use rallies_core::llm::provider::{LLMError, LLMProvider, LLMRequest, LLMResponse, LLMStream};
use rallies_core::prompts::system::{COMPACT_PROMPT, PLANNER_PROMPT, SUMMARY_PROMPT};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const ANSWER: &str = "AAPL closed **higher** today.";
pub const SUMMARY: &str = "AAPL last traded at 189.50.";
pub const COMPACTED: &str = "User asked about AAPL; it closed at 189.50.";

/// Which agent operation a request belonged to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Plan,
    Summary,
    Compact,
    Answer,
}

/// Backend answering by operation; plans are served in order, then `[]`
pub struct ScriptedProvider {
    plans: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<CallKind>>,
    answer_fragments: Option<Vec<&'static str>>,
}

impl ScriptedProvider {
    pub fn new(plans: &[Value]) -> Arc<Self> {
        Arc::new(Self {
            plans: Mutex::new(plans.iter().map(Value::to_string).collect()),
            calls: Mutex::new(Vec::new()),
            answer_fragments: None,
        })
    }

    /// Streams the answer as the given pieces instead of one fragment
    pub fn fragmented(plans: &[Value], fragments: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            plans: Mutex::new(plans.iter().map(Value::to_string).collect()),
            calls: Mutex::new(Vec::new()),
            answer_fragments: Some(fragments.to_vec()),
        })
    }

    pub fn calls(&self) -> Vec<CallKind> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, kind: CallKind) -> usize {
        self.calls().iter().filter(|k| **k == kind).count()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-1"
    }

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        self.validate_request(&request)?;
        let instruction = request.messages[0].content.as_str();
        let kind = if instruction == PLANNER_PROMPT {
            CallKind::Plan
        } else if instruction == SUMMARY_PROMPT {
            CallKind::Summary
        } else if instruction.starts_with(COMPACT_PROMPT) {
            CallKind::Compact
        } else {
            CallKind::Answer
        };
        self.calls.lock().unwrap().push(kind);

        let text = match kind {
            CallKind::Plan => self
                .plans
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| "[]".to_string()),
            CallKind::Summary => SUMMARY.to_string(),
            CallKind::Compact => COMPACTED.to_string(),
            CallKind::Answer => ANSWER.to_string(),
        };
        Ok(LLMResponse::text(text))
    }

    async fn stream(&self, request: LLMRequest) -> Result<LLMStream, LLMError> {
        let text = self.generate(request).await?.into_text();
        let pieces: Vec<Result<String, LLMError>> = match &self.answer_fragments {
            Some(fragments) if text == ANSWER => {
                fragments.iter().map(|f| Ok(f.to_string())).collect()
            }
            _ => vec![Ok(text)],
        };
        Ok(Box::pin(futures::stream::iter(pieces)))
    }
}

pub fn config_for(base_url: &str) -> RalliesConfig {
    RalliesConfig::default().with_api_base_url(base_url)
}

pub fn agent_for(provider: Arc<ScriptedProvider>, config: &RalliesConfig) -> Agent {
    Agent::new(LlmClient::new(provider), config)
}

pub fn one_step_plan() -> Value {
    json!([{ "title": "Quote", "description": "Fetch the latest AAPL quote" }])
}

pub fn two_step_plan() -> Value {
    json!([
        { "title": "Quote", "description": "Fetch the latest AAPL quote" },
        { "title": "News", "description": "Fetch AAPL headlines" }
    ])
}

pub fn allowed_body() -> Value {
    json!({
        "allowed": true,
        "results": { "symbol": "AAPL", "price": 189.5 },
        "current_usage": 3,
        "limit": 10
    })
}

pub fn denied_body(message: &str) -> Value {
    json!({ "allowed": false, "error": message })
}
