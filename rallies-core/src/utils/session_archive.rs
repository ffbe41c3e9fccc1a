//! Session files: `{subject, messages}` documents named by creation time.
//!
//! A session is loaded wholesale on resume and rewritten wholesale after
//! every turn. Nothing here ever deletes a session.

use crate::config::constants::{files, limits};
use crate::core::agent::conversation::ConversationEntry;
use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionRecord {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub messages: Vec<ConversationEntry>,
}

#[derive(Debug, Clone)]
pub struct SessionListing {
    pub path: PathBuf,
    /// `None` when the file could not be read or parsed
    pub subject: Option<String>,
    pub readable: bool,
}

impl SessionListing {
    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }
}

#[derive(Debug, Clone)]
pub struct SessionArchive {
    path: PathBuf,
}

impl SessionArchive {
    /// New session file in `dir`, named for the current local time.
    /// Nothing is written until [`SessionArchive::save`].
    pub fn create(dir: &Path) -> Self {
        let stamp = Local::now().format(files::SESSION_TIMESTAMP_FORMAT);
        Self {
            path: session_path(dir, &stamp.to_string()),
        }
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }

    pub fn load(&self) -> Result<SessionRecord> {
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read session file: {}", self.path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("failed to parse session file: {}", self.path.display()))
    }

    pub fn save(&self, record: &SessionRecord) -> Result<()> {
        let payload =
            serde_json::to_string_pretty(record).context("failed to serialize session")?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create session directory: {}", parent.display())
            })?;
        }
        fs::write(&self.path, payload)
            .with_context(|| format!("failed to write session file: {}", self.path.display()))
    }
}

/// Path of the session identified by its timestamp, e.g. `2024-05-01_09-30-00`
pub fn session_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!(
        "{}{}.{}",
        files::SESSION_FILE_PREFIX,
        id,
        files::SESSION_FILE_EXTENSION
    ))
}

/// Sessions in `dir`, most recently modified first
pub fn list_sessions(dir: &Path) -> Result<Vec<SessionListing>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut entries: Vec<(SystemTime, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("failed to read session directory: {}", dir.display()))?
    {
        let entry = entry
            .with_context(|| format!("failed to read session entry in {}", dir.display()))?;
        let path = entry.path();
        if !is_session_file(&path) {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        entries.push((modified, path));
    }

    entries.sort_by(|a, b| b.0.cmp(&a.0));

    Ok(entries
        .into_iter()
        .map(|(_, path)| match SessionArchive::open(&path).load() {
            Ok(record) => SessionListing {
                path,
                subject: record.subject,
                readable: true,
            },
            Err(e) => {
                tracing::warn!(error = %e, "unreadable session file");
                SessionListing {
                    path,
                    subject: None,
                    readable: false,
                }
            }
        })
        .collect())
}

/// Subject line for a new session from its first question
pub fn subject_from_input(input: &str) -> String {
    if input.chars().count() > limits::SESSION_SUBJECT_MAX_CHARS {
        let head: String = input
            .chars()
            .take(limits::SESSION_SUBJECT_MAX_CHARS)
            .collect();
        format!("{head}...")
    } else {
        input.to_string()
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_session_file(path: &Path) -> bool {
    let name = file_name_of(path);
    name.starts_with(files::SESSION_FILE_PREFIX)
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(files::SESSION_FILE_EXTENSION))
            .unwrap_or(false)
}
