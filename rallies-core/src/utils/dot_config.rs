//! Dot folder management for the Rallies configuration, history and sessions

use crate::config::RalliesConfig;
use crate::config::constants::{env as env_vars, files};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Dot folder manager rooted at `~/.rallies` (or `$RALLIES_HOME`)
#[derive(Debug, Clone)]
pub struct DotManager {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl DotManager {
    pub fn new() -> Result<Self, DotError> {
        if let Some(custom) = env::var_os(env_vars::RALLIES_HOME) {
            return Ok(Self::with_root(PathBuf::from(custom)));
        }
        let home_dir = dirs::home_dir().ok_or(DotError::HomeDirNotFound)?;
        Ok(Self::with_root(home_dir.join(files::CONFIG_DIR_NAME)))
    }

    /// Manager for an explicit configuration directory
    pub fn with_root(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        let config_file = config_dir.join(files::CONFIG_FILE);
        Self {
            config_dir,
            config_file,
        }
    }

    /// Create the dot folder if needed
    pub fn initialize(&self) -> Result<(), DotError> {
        fs::create_dir_all(&self.config_dir)?;
        Ok(())
    }

    /// Load the configuration snapshot.
    ///
    /// A missing or unreadable file yields the defaults.
    pub fn load_config(&self) -> RalliesConfig {
        let content = match fs::read_to_string(&self.config_file) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return RalliesConfig::default();
            }
            Err(e) => {
                tracing::warn!(path = %self.config_file.display(), error = %e, "failed to read config, using defaults");
                return RalliesConfig::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %self.config_file.display(), error = %e, "malformed config, using defaults");
                RalliesConfig::default()
            }
        }
    }

    /// Persist a configuration snapshot
    pub fn save_config(&self, config: &RalliesConfig) -> Result<(), DotError> {
        self.initialize()?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_file, content)?;
        Ok(())
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Line-edit history file for the interactive shell
    pub fn history_file(&self) -> PathBuf {
        self.config_dir.join(files::HISTORY_FILE)
    }

    /// Sessions share the configuration directory
    pub fn sessions_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }
}

/// Dot folder management errors
#[derive(Debug, thiserror::Error)]
pub enum DotError {
    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
