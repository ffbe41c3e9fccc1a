//! # rallies-core - Runtime for the Rallies financial research assistant
//!
//! `rallies-core` powers the `rallies` terminal assistant. It answers
//! financial questions by letting an LLM plan retrieval steps, running each
//! step against the Rallies action API, summarizing what came back and
//! finally streaming a markdown answer to the terminal.
//!
//! ## Highlights
//!
//! - **Provider Abstraction**: one [`llm::LLMProvider`] trait with adapters
//!   for the OpenAI Responses API and Google Gemini, both streaming over SSE.
//! - **Plan / Act / Summarize**: [`core::agent::Agent`] produces structured
//!   plans, calls the action endpoint and condenses each payload.
//! - **Turn Orchestration**: [`core::orchestrator::Manager`] drives a single
//!   user turn, intercepts slash commands and keeps bulk retrieved data out of
//!   the persisted conversation.
//! - **Sessions**: every shell session is a JSON file under `~/.rallies`
//!   that can be continued or resumed later.
//!
//! ## Architecture Overview
//!
//! - `config/`: persisted configuration, constants and credential lookup.
//! - `llm/`: provider clients, SSE decoding and structured-output retries.
//! - `prompts/`: planner, summary, answer and compaction prompts.
//! - `core/`: the agent, the per-turn manager and token accounting.
//! - `commands/`: slash command parsing and the public feed.
//! - `ui/`: spinners, banner, styled output and live markdown rendering.
//! - `utils/`: the dot folder and session files.
//!
//! ## Quickstart
//!
//! ```rust,no_run
//! use rallies_core::{ConversationEntry, DotManager, Manager};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), anyhow::Error> {
//!     let store = DotManager::new()?;
//!     store.initialize()?;
//!     let config = store.load_config();
//!
//!     let mut manager = Manager::new(config, store);
//!     let mut conversation = vec![ConversationEntry::user("How is NVDA trading today?")];
//!     let outcome = manager
//!         .process_prompt("How is NVDA trading today?", &mut conversation)
//!         .await?;
//!     println!("{}", outcome.answer_text());
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod config;
pub mod core;
pub mod llm;
pub mod prompts;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use commands::{FeedClient, SlashCommand};
pub use config::{LlmProviderKind, RalliesConfig};
pub use core::agent::{Agent, ConversationEntry, PlanStep};
pub use core::orchestrator::{Manager, TurnError, TurnOutcome};
pub use llm::{LLMError, LLMProvider, LlmClient, make_client};
pub use utils::dot_config::{DotError, DotManager};
pub use utils::session_archive::{SessionArchive, SessionListing, SessionRecord};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = RalliesConfig::default();
        assert_eq!(config.llm_provider, LlmProviderKind::OpenAI);
        assert_eq!(SlashCommand::parse("/help"), Some(SlashCommand::Help));
    }
}
