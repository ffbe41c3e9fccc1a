//! # Core Agent Architecture
//!
//! - **Agent**: planning, retrieval, summarization, answering and compaction
//! - **Orchestrator**: the [`orchestrator::Manager`] driving one user turn
//! - **Tokens**: approximate token accounting for the usage footer
//!
//! ```rust,no_run
//! use rallies_core::core::agent::ConversationEntry;
//! use rallies_core::core::orchestrator::Manager;
//! use rallies_core::utils::dot_config::DotManager;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let store = DotManager::new()?;
//! let mut manager = Manager::new(store.load_config(), store);
//! let mut conversation = vec![ConversationEntry::user("How is NVDA doing today?")];
//! let outcome = manager
//!     .process_prompt("How is NVDA doing today?", &mut conversation)
//!     .await?;
//! println!("{}", outcome.answer_text());
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod orchestrator;
pub mod tokens;
