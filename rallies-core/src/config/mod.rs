//! Rallies configuration
//!
//! The persisted configuration is a small JSON mapping stored in the user's
//! dot folder (see [`crate::utils::dot_config`]). A [`RalliesConfig`] value is
//! an immutable snapshot: it is loaded once per process, passed by reference
//! into the LLM client and agent constructors, and updated by producing a new
//! snapshot (`with_api_key`, `with_provider`) that the caller persists.

pub mod api_keys;
pub mod constants;

use constants::{models, urls};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Completion backend selected in the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderKind {
    #[default]
    OpenAI,
    Gemini,
}

impl LlmProviderKind {
    pub const ALL: [LlmProviderKind; 2] = [LlmProviderKind::OpenAI, LlmProviderKind::Gemini];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Gemini => "gemini",
        }
    }

    /// Name shown in the shell prompt, e.g. `(Openai) > `
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OpenAI => "Openai",
            Self::Gemini => "Gemini",
        }
    }
}

impl fmt::Display for LlmProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid provider: {0}. Please use 'openai' or 'gemini'.")]
pub struct UnknownProvider(pub String);

impl FromStr for LlmProviderKind {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "gemini" => Ok(Self::Gemini),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

/// Snapshot of the persisted configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RalliesConfig {
    /// Credential for the Rallies action API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default)]
    pub llm_provider: LlmProviderKind,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Upper bound on planning rounds per turn; unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_planning_rounds: Option<usize>,

    /// Keys written by other tools are carried through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for RalliesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            llm_provider: LlmProviderKind::default(),
            api_base_url: default_api_base_url(),
            openai_model: default_openai_model(),
            gemini_model: default_gemini_model(),
            max_planning_rounds: None,
            extra: serde_json::Map::new(),
        }
    }
}

impl RalliesConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_provider(mut self, provider: LlmProviderKind) -> Self {
        self.llm_provider = provider;
        self
    }

    pub fn with_api_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into();
        self
    }

    /// Model identifier for the active provider
    pub fn model(&self) -> &str {
        match self.llm_provider {
            LlmProviderKind::OpenAI => &self.openai_model,
            LlmProviderKind::Gemini => &self.gemini_model,
        }
    }

    /// Non-empty action API credential, if configured
    pub fn action_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

fn default_api_base_url() -> String {
    urls::RALLIES_API_BASE.to_string()
}

fn default_openai_model() -> String {
    models::openai::DEFAULT_MODEL.to_string()
}

fn default_gemini_model() -> String {
    models::google::DEFAULT_MODEL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_provider_names_case_insensitively() {
        assert_eq!("OpenAI".parse::<LlmProviderKind>(), Ok(LlmProviderKind::OpenAI));
        assert_eq!(" gemini ".parse::<LlmProviderKind>(), Ok(LlmProviderKind::Gemini));
        assert!("anthropic".parse::<LlmProviderKind>().is_err());
    }

    #[test]
    fn minimal_document_fills_defaults() {
        let config: RalliesConfig = serde_json::from_value(json!({ "api_key": "abc" })).unwrap();
        assert_eq!(config.action_api_key(), Some("abc"));
        assert_eq!(config.llm_provider, LlmProviderKind::OpenAI);
        assert_eq!(config.api_base_url, urls::RALLIES_API_BASE);
        assert_eq!(config.model(), models::openai::DEFAULT_MODEL);
        assert!(config.max_planning_rounds.is_none());
    }

    #[test]
    fn unknown_keys_survive_a_round_trip() {
        let config: RalliesConfig = serde_json::from_value(json!({
            "llm_provider": "gemini",
            "theme": "dark"
        }))
        .unwrap();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["theme"], "dark");
        assert_eq!(value["llm_provider"], "gemini");
    }

    #[test]
    fn snapshot_updates_leave_the_original_untouched() {
        let original = RalliesConfig::default();
        let updated = original
            .clone()
            .with_api_key("key-1")
            .with_provider(LlmProviderKind::Gemini);

        assert!(original.api_key.is_none());
        assert_eq!(updated.action_api_key(), Some("key-1"));
        assert_eq!(updated.model(), models::google::DEFAULT_MODEL);
    }

    #[test]
    fn blank_api_key_is_treated_as_missing() {
        let config = RalliesConfig::default().with_api_key("   ");
        assert!(config.action_api_key().is_none());
    }
}
