//! # LLM Integration Layer
//!
//! A single [`LlmClient`] fronts one of two completion backends:
//!
//! | Provider | API | Default model |
//! |----------|-----|---------------|
//! | OpenAI | Responses API (`/v1/responses`) | gpt-4.1 |
//! | Gemini | `generateContent` | gemini-2.5-pro |
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use rallies_core::config::RalliesConfig;
//! use rallies_core::llm::make_client;
//! use rallies_core::llm::provider::Message;
//!
//! # async fn demo() -> Result<(), rallies_core::llm::provider::LLMError> {
//! let config = RalliesConfig::default();
//! let client = make_client(&config, std::env::var("OPENAI_API_KEY").unwrap_or_default());
//! let text = client.prompt(vec![Message::user("Hello")]).await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod provider;
pub mod providers;

pub use client::{LlmClient, make_client};
pub use provider::{LLMError, LLMProvider, LLMStream};
