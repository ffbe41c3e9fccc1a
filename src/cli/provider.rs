//! `rallies provider set <name>`

use anyhow::{Context, Result};
use rallies_core::config::LlmProviderKind;
use rallies_core::ui::styled;
use rallies_core::utils::dot_config::DotManager;

/// Persist `name` as the active provider; `false` when the name is invalid
pub fn set_provider(store: &DotManager, name: &str) -> Result<bool> {
    let provider: LlmProviderKind = match name.parse() {
        Ok(provider) => provider,
        Err(e) => {
            styled::error(&e.to_string());
            return Ok(false);
        }
    };

    let updated = store.load_config().with_provider(provider);
    store
        .save_config(&updated)
        .context("failed to save configuration")?;
    styled::success(&format!("LLM provider set to: {provider}"));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_provider_is_persisted() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let store = DotManager::with_root(temp_dir.path());

        assert!(set_provider(&store, "Gemini")?);
        assert_eq!(store.load_config().llm_provider, LlmProviderKind::Gemini);
        Ok(())
    }

    #[test]
    fn invalid_provider_leaves_config_alone() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let store = DotManager::with_root(temp_dir.path());

        assert!(!set_provider(&store, "anthropic")?);
        assert!(!store.config_file().exists());
        Ok(())
    }
}
