//! Picking a session for `--continue` and `--resume`

use anyhow::{Context, Result};
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use rallies_core::ui::styled;
use rallies_core::utils::session_archive::{SessionListing, list_sessions, session_path};
use std::path::{Path, PathBuf};

/// Which session the shell should open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChoice {
    New,
    Resume(PathBuf),
    /// Nothing to run; the reason was already printed
    Cancel,
}

/// Most recently modified session, or a new one when none exist
pub fn continue_latest(sessions_dir: &Path) -> Result<SessionChoice> {
    let listings = list_sessions(sessions_dir)?;
    match listings.into_iter().next() {
        Some(latest) => Ok(SessionChoice::Resume(latest.path)),
        None => {
            styled::warning("No sessions found to continue.");
            Ok(SessionChoice::New)
        }
    }
}

/// Session named by `id`, or an interactive pick when `id` is `None`
pub fn resume(sessions_dir: &Path, id: Option<&str>) -> Result<SessionChoice> {
    let listings = list_sessions(sessions_dir)?;
    if listings.is_empty() {
        styled::warning("No sessions found to resume.");
        return Ok(SessionChoice::New);
    }

    if let Some(id) = id {
        return Ok(resolve_id(sessions_dir, id));
    }

    let items: Vec<String> = listings.iter().map(listing_label).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Available sessions to resume (Esc to cancel)")
        .items(&items)
        .default(0)
        .interact_opt()
        .context("failed to read session selection")?;

    Ok(match selection {
        Some(index) => SessionChoice::Resume(listings[index].path.clone()),
        None => SessionChoice::Cancel,
    })
}

fn resolve_id(sessions_dir: &Path, id: &str) -> SessionChoice {
    let path = session_path(sessions_dir, id);
    if path.exists() {
        SessionChoice::Resume(path)
    } else {
        styled::error(&format!("Session '{id}' not found."));
        SessionChoice::Cancel
    }
}

fn listing_label(listing: &SessionListing) -> String {
    let subject = if listing.readable {
        listing.subject.as_deref().unwrap_or("No subject")
    } else {
        "Error reading session"
    };
    format!("{} - {}", listing.file_name(), subject)
}
