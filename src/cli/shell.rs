//! Interactive shell: line editing, session persistence and provider switching

use super::completion::ShellHelper;
use anstyle::{AnsiColor, Color, Style};
use anyhow::{Context, Result};
use rallies_core::config::{LlmProviderKind, RalliesConfig};
use rallies_core::core::agent::conversation::{ConversationEntry, Role};
use rallies_core::core::orchestrator::{Manager, TurnError, TurnOutcome};
use rallies_core::ui::banner::{print_banner, print_tips};
use rallies_core::ui::styled::{self, paint};
use rallies_core::utils::dot_config::DotManager;
use rallies_core::utils::session_archive::{SessionArchive, SessionRecord, subject_from_input};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use std::path::{Path, PathBuf};

const RESUMED_SUBJECT: &str = "Resumed Session";

/// How the shell ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellExit {
    Normal,
    /// The selected provider has no credential; guidance was printed
    MissingCredential,
}

#[derive(Debug, PartialEq, Eq)]
enum LineOutcome {
    Continue,
    Exit(ShellExit),
}

impl LineOutcome {
    /// A turn refused for lack of a credential leaves nothing worth saving
    fn keeps_session(&self) -> bool {
        !matches!(self, LineOutcome::Exit(ShellExit::MissingCredential))
    }
}

pub struct Shell {
    store: DotManager,
    manager: Manager,
    archive: SessionArchive,
    session: SessionRecord,
}

impl Shell {
    /// Open `resume` when given and readable, otherwise start a new session
    pub fn new(store: DotManager, config: RalliesConfig, resume: Option<PathBuf>) -> Self {
        let manager = Manager::new(config, store.clone());
        let sessions_dir = store.sessions_dir();

        let resumed = resume.and_then(|path| {
            let archive = SessionArchive::open(path);
            match archive.load() {
                Ok(session) => Some((archive, session)),
                Err(e) => {
                    tracing::warn!(error = %e, "falling back to a new session");
                    styled::error(&format!("Could not load session: {}", archive.file_name()));
                    None
                }
            }
        });

        let (archive, session) = match resumed {
            Some((archive, mut session)) => {
                let subject = session
                    .subject
                    .get_or_insert_with(|| RESUMED_SUBJECT.to_string())
                    .clone();
                styled::styled(
                    &styled::Styles::bold_success(),
                    &format!("Resumed session: {}", archive.file_name()),
                );
                styled::styled(&styled::Styles::bold(), &format!("Subject: {subject}"));
                print_history(&session.messages);
                (archive, session)
            }
            None => (
                SessionArchive::create(&sessions_dir),
                SessionRecord::default(),
            ),
        };

        Self {
            store,
            manager,
            archive,
            session,
        }
    }

    pub async fn run(&mut self) -> Result<ShellExit> {
        print_banner();
        print_tips();

        let history_file = self.store.history_file();
        let mut editor: Editor<ShellHelper, FileHistory> =
            Editor::new().context("failed to initialize line editor")?;
        editor.set_helper(Some(ShellHelper));
        if let Err(e) = editor.load_history(&history_file) {
            tracing::debug!(error = %e, "no line history loaded");
        }

        anstream::println!("\nType your queries below. Press Ctrl+C to exit.\n");

        loop {
            let prompt = format!(
                "({}) > ",
                self.manager.config().llm_provider.display_name()
            );
            match editor.readline(&prompt) {
                Ok(line) => {
                    record_history(&mut editor, &line, &history_file);
                    if let LineOutcome::Exit(exit) = self.handle_line(&line).await? {
                        return Ok(exit);
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                    anstream::println!("\n\nGoodbye!");
                    return Ok(ShellExit::Normal);
                }
                Err(e) => return Err(e).context("failed to read input"),
            }
        }
    }

    async fn handle_line(&mut self, line: &str) -> Result<LineOutcome> {
        let input = line.trim();

        if let Some(args) = input.strip_prefix("/provider") {
            if args.is_empty() || args.starts_with(char::is_whitespace) {
                self.switch_provider(args);
                return Ok(LineOutcome::Continue);
            }
        }

        if input.starts_with('/') {
            return self.run_prompt(input).await;
        }

        if input.is_empty() {
            styled::warning("Please enter a query.");
            anstream::println!();
            return Ok(LineOutcome::Continue);
        }

        if self.session.subject.is_none() {
            let subject = subject_from_input(line);
            styled::styled(
                &styled::Styles::bold_success(),
                &format!("Started new session: {}", self.archive.file_name()),
            );
            styled::styled(&styled::Styles::bold(), &format!("Subject: {subject}"));
            self.session.subject = Some(subject);
        }

        self.session.messages.push(ConversationEntry::user(line));
        let outcome = self.run_prompt(line).await;
        if outcome.as_ref().is_ok_and(LineOutcome::keeps_session) {
            self.persist();
        }
        outcome
    }

    async fn run_prompt(&mut self, prompt: &str) -> Result<LineOutcome> {
        match self
            .manager
            .process_prompt(prompt, &mut self.session.messages)
            .await
        {
            Ok(TurnOutcome::Exit) => {
                anstream::println!("\nGoodbye!");
                Ok(LineOutcome::Exit(ShellExit::Normal))
            }
            Ok(_) => Ok(LineOutcome::Continue),
            Err(TurnError::MissingCredential(provider)) => {
                tracing::error!(%provider, "missing LLM credential");
                Ok(LineOutcome::Exit(ShellExit::MissingCredential))
            }
            Err(TurnError::Io(e)) => Err(e).context("terminal output failed"),
            Err(e) => {
                tracing::warn!(error = %e, "turn failed");
                styled::error(&e.to_string());
                anstream::println!();
                Ok(LineOutcome::Continue)
            }
        }
    }

    fn switch_provider(&mut self, args: &str) {
        let parts: Vec<&str> = args.split_whitespace().collect();
        let [name] = parts.as_slice() else {
            styled::error("Usage: /provider <openai|gemini>");
            anstream::println!();
            return;
        };

        let provider: LlmProviderKind = match name.parse() {
            Ok(provider) => provider,
            Err(e) => {
                styled::error(&e.to_string());
                anstream::println!();
                return;
            }
        };

        let updated = self.manager.config().clone().with_provider(provider);
        if let Err(e) = self.store.save_config(&updated) {
            tracing::warn!(error = %e, "failed to persist provider");
        }
        self.manager = Manager::new(updated, self.store.clone());
        styled::success(&format!(
            "LLM provider switched to: {}",
            provider.display_name()
        ));
        anstream::println!();
    }

    fn persist(&self) {
        if let Err(e) = self.archive.save(&self.session) {
            tracing::warn!(error = %e, "failed to save session");
            styled::error(&format!("Failed to save session: {}", self.archive.file_name()));
        }
    }
}

/// Append a non-blank line to the editor history and flush it to disk
fn record_history<H: rustyline::Helper>(
    editor: &mut Editor<H, FileHistory>,
    line: &str,
    history_file: &Path,
) {
    if line.trim().is_empty() {
        return;
    }
    if let Err(e) = editor.add_history_entry(line) {
        tracing::debug!(error = %e, "failed to record line history");
    }
    if let Err(e) = editor.save_history(history_file) {
        tracing::warn!(error = %e, "failed to save line history");
    }
}

fn print_history(messages: &[ConversationEntry]) {
    let user = Style::new()
        .fg_color(Some(Color::Ansi(AnsiColor::Cyan)))
        .bold();
    let agent = Style::new()
        .fg_color(Some(Color::Ansi(AnsiColor::Magenta)))
        .bold();
    for message in messages {
        let label = match message.role {
            Role::User => paint(&user, "User:"),
            _ => paint(&agent, "Agent:"),
        };
        anstream::println!("{label} {}", message.content);
    }
}
