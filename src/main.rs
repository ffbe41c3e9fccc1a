mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::sessions::{self, SessionChoice};
use cli::{Cli, Commands, ProviderAction, Shell, ShellExit};
use rallies_core::config::api_keys::load_dotenv;
use rallies_core::utils::dot_config::DotManager;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    init_tracing(args.verbose);
    load_dotenv();

    let store = DotManager::new().context("cannot locate the rallies configuration directory")?;
    store
        .initialize()
        .context("failed to create the rallies configuration directory")?;

    if let Some(Commands::Provider {
        action: ProviderAction::Set { name },
    }) = args.command
    {
        let ok = cli::provider::set_provider(&store, &name)?;
        return Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    let sessions_dir = store.sessions_dir();
    let choice = if args.continue_session {
        sessions::continue_latest(&sessions_dir)?
    } else if let Some(id) = &args.resume {
        sessions::resume(&sessions_dir, id.as_deref())?
    } else {
        SessionChoice::New
    };

    let resume = match choice {
        SessionChoice::Cancel => return Ok(ExitCode::SUCCESS),
        SessionChoice::New => None,
        SessionChoice::Resume(path) => Some(path),
    };

    let config = store.load_config();
    tracing::debug!(provider = %config.llm_provider, model = config.model(), "starting shell");
    let mut shell = Shell::new(store, config, resume);
    match shell.run().await? {
        ShellExit::Normal => Ok(ExitCode::SUCCESS),
        ShellExit::MissingCredential => Ok(ExitCode::FAILURE),
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
