//! # Utility Functions and Helpers
//!
//! ### Configuration Management (`dot_config`)
//! - **Dot folder**: `~/.rallies` (or `$RALLIES_HOME`) holding `config.json`,
//!   the shell history and session files
//!
//! ### Sessions (`session_archive`)
//! - **Persistence**: one `session_<timestamp>.json` per shell session
//! - **Listing**: most recently modified first, for `--continue` and `--resume`
//!
//! ```rust,no_run
//! use rallies_core::utils::dot_config::DotManager;
//! use rallies_core::utils::session_archive::list_sessions;
//!
//! # fn main() -> anyhow::Result<()> {
//! let store = DotManager::new()?;
//! for listing in list_sessions(&store.sessions_dir())? {
//!     println!("{} - {:?}", listing.file_name(), listing.subject);
//! }
//! # Ok(())
//! # }
//! ```

pub mod dot_config;
pub mod session_archive;
