//! Agent operations: plan, act, summarize, answer and compact
//!
//! Each LLM-backed operation prepends one `developer` instruction to the
//! projected conversation and issues a single call through [`LlmClient`].

use super::action::{ActionClient, ActionError, UsageCounters};
use super::conversation::{ConversationEntry, to_messages};
use super::plan::Plan;
use crate::config::RalliesConfig;
use crate::core::tokens::TokenCounter;
use crate::llm::LlmClient;
use crate::llm::provider::{LLMError, LLMStream, Message};
use crate::prompts::system::{PLANNER_PROMPT, SUMMARY_PROMPT};
use crate::prompts::{answer_prompt, compact_prompt};
use serde_json::Value;

/// Result of a compaction request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompactOutcome {
    /// The conversation was empty; nothing was sent to the backend
    NothingToCompact,
    /// The conversation now holds one user entry of roughly `tokens` tokens
    Compacted { tokens: usize },
}

#[derive(Debug, Clone)]
pub struct Agent {
    llm: LlmClient,
    actions: ActionClient,
    usage: Option<UsageCounters>,
}

impl Agent {
    pub fn new(llm: LlmClient, config: &RalliesConfig) -> Self {
        Self::with_action_client(llm, ActionClient::new(config))
    }

    pub fn with_action_client(llm: LlmClient, actions: ActionClient) -> Self {
        Self {
            llm,
            actions,
            usage: None,
        }
    }

    pub fn llm(&self) -> &LlmClient {
        &self.llm
    }

    /// Usage counters from the most recent successful action
    pub fn usage(&self) -> Option<UsageCounters> {
        self.usage
    }

    /// Swap the action credential for the one in `config`
    pub fn set_api_key(&mut self, config: &RalliesConfig) {
        self.actions.set_api_key(config);
    }

    fn instructed(instruction: impl Into<String>, conversation: &[ConversationEntry]) -> Vec<Message> {
        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(Message::developer(instruction));
        messages.extend(to_messages(conversation));
        messages
    }

    /// Next plan for the conversation; empty when no more data is needed
    pub async fn run(&self, conversation: &[ConversationEntry]) -> Result<Plan, LLMError> {
        let plan: Plan = self
            .llm
            .prompt_structured(Self::instructed(PLANNER_PROMPT, conversation))
            .await?;
        tracing::debug!(steps = plan.len(), "planner returned");
        Ok(plan)
    }

    /// Execute one step against the retrieval endpoint
    pub async fn action(
        &mut self,
        question: &str,
        title: &str,
        description: &str,
    ) -> Result<Value, ActionError> {
        let outcome = self.actions.complete(question, title, description).await?;
        self.usage = Some(outcome.usage);
        Ok(outcome.results)
    }

    pub async fn summarize(&self, conversation: &[ConversationEntry]) -> Result<String, LLMError> {
        self.llm
            .prompt(Self::instructed(SUMMARY_PROMPT, conversation))
            .await
    }

    /// Stream the final answer for `question`
    pub async fn answer(
        &self,
        question: &str,
        conversation: &[ConversationEntry],
    ) -> Result<LLMStream, LLMError> {
        self.llm
            .prompt_stream(Self::instructed(answer_prompt(question), conversation))
            .await
    }

    /// Replace the conversation with a single compacted user entry.
    ///
    /// On a backend error the conversation is left untouched.
    pub async fn compact(
        &self,
        conversation: &mut Vec<ConversationEntry>,
        extra_instructions: Option<&str>,
    ) -> Result<CompactOutcome, LLMError> {
        if conversation.is_empty() {
            return Ok(CompactOutcome::NothingToCompact);
        }

        let summary = self
            .llm
            .prompt(Self::instructed(compact_prompt(extra_instructions), conversation))
            .await?;

        conversation.clear();
        conversation.push(ConversationEntry::user(summary));
        let tokens = TokenCounter::new().count_conversation_tokens(conversation);
        tracing::debug!(tokens, "conversation compacted");
        Ok(CompactOutcome::Compacted { tokens })
    }
}
