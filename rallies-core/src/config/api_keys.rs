//! API key management for the completion backends.
//!
//! LLM credentials come from the environment only (optionally seeded from a
//! `.env` file); the Rallies action API key lives in the persisted config.

use super::LlmProviderKind;
use super::constants::env as env_vars;
use std::env;

/// Load environment variables from a `.env` file in the working directory.
///
/// A missing file is fine; a malformed one is logged and ignored.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded environment from .env"),
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(error = %e, "failed to load .env file"),
    }
}

/// Environment variables consulted for a provider, in priority order
pub fn env_candidates(provider: LlmProviderKind) -> &'static [&'static str] {
    match provider {
        LlmProviderKind::OpenAI => &[env_vars::OPENAI_API_KEY],
        LlmProviderKind::Gemini => &[env_vars::GEMINI_API_KEY, env_vars::GOOGLE_API_KEY],
    }
}

/// Resolve the LLM API key for `provider` from the process environment
pub fn llm_api_key(provider: LlmProviderKind) -> Option<String> {
    llm_api_key_with(provider, |name| env::var(name).ok())
}

/// Resolve the LLM API key using a custom variable lookup
pub fn llm_api_key_with<F>(provider: LlmProviderKind, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    env_candidates(provider)
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// Guidance shown when the active provider has no credential
pub fn missing_key_guidance(provider: LlmProviderKind) -> (String, String) {
    let var = env_candidates(provider)[0];
    let (label, example) = match provider {
        LlmProviderKind::OpenAI => ("OpenAI", "sk-..."),
        LlmProviderKind::Gemini => ("Gemini", "AIza..."),
    };
    (
        format!(
            "⚠ We need to set our {label} key first. Please set {var} environment variable with your {label} key."
        ),
        format!("e.g export {var}={example} - once done open rallies again"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn openai_key_comes_from_openai_var() {
        let lookup = lookup_from(&[("OPENAI_API_KEY", "sk-test")]);
        assert_eq!(
            llm_api_key_with(LlmProviderKind::OpenAI, lookup),
            Some("sk-test".to_string())
        );
    }

    #[test]
    fn gemini_falls_back_to_google_var() {
        let lookup = lookup_from(&[("GEMINI_API_KEY", "  "), ("GOOGLE_API_KEY", "g-key")]);
        assert_eq!(
            llm_api_key_with(LlmProviderKind::Gemini, lookup),
            Some("g-key".to_string())
        );
    }

    #[test]
    fn missing_key_yields_none() {
        let lookup = lookup_from(&[("GEMINI_API_KEY", "g-key")]);
        assert_eq!(llm_api_key_with(LlmProviderKind::OpenAI, lookup), None);
    }

    #[test]
    fn guidance_names_the_variable() {
        let (headline, hint) = missing_key_guidance(LlmProviderKind::Gemini);
        assert!(headline.contains("GEMINI_API_KEY"));
        assert!(hint.starts_with("e.g export GEMINI_API_KEY="));
    }
}
