//! CLI argument parsing

use clap::{Parser, Subcommand};

/// Main CLI structure for rallies
#[derive(Parser, Debug)]
#[command(
    name = "rallies",
    version,
    about = "AI powered investment research, backed by real-time data"
)]
pub struct Cli {
    /// Continue the most recently modified session
    #[arg(long = "continue", conflicts_with = "resume")]
    pub continue_session: bool,

    /// Resume a session by ID (e.g. 2024-05-01_09-30-00); lists sessions when no ID is given
    #[arg(long, value_name = "ID")]
    pub resume: Option<Option<String>>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the LLM provider
    Provider {
        #[command(subcommand)]
        action: ProviderAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProviderAction {
    /// Persist the provider used for planning and answers
    Set {
        /// openai or gemini
        name: String,
    },
}
