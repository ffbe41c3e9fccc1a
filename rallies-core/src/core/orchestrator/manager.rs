//! Single-turn driver: command interception, plan/act/summarize rounds,
//! answer streaming and conversation hygiene.

use super::progress::{ProgressRenderer, RETRIEVING_MESSAGE};
use crate::commands::{FeedClient, SlashCommand, show_feed};
use crate::config::constants::urls;
use crate::config::{LlmProviderKind, RalliesConfig, api_keys};
use crate::core::agent::conversation::{ConversationEntry, prune_data_entries, render_payload};
use crate::core::agent::plan::plan_to_text;
use crate::core::agent::{Agent, CompactOutcome, PlanStep};
use crate::core::tokens::{TokenCounter, group_thousands};
use crate::llm::make_client;
use crate::llm::provider::LLMError;
use crate::ui::markdown::LiveMarkdown;
use crate::ui::slash::help_lines;
use crate::ui::spinner::Spinner;
use crate::ui::styled::{self, Styles, paint};
use crate::ui::terminal::{get_terminal_width, right_align};
use crate::utils::dot_config::{DotError, DotManager};
use futures::StreamExt;

/// How a call to [`Manager::process_prompt`] ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// A slash command was handled; the LLM loop never ran
    Command,
    /// `/exit` or `/quit`
    Exit,
    /// A retrieval step failed; the error was shown and no answer produced
    Aborted,
    Answered(String),
}

impl TurnOutcome {
    /// Final answer text, empty for commands and aborted turns
    pub fn answer_text(&self) -> &str {
        match self {
            TurnOutcome::Answered(text) => text,
            _ => "",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error("no credential configured for the {0} provider")]
    MissingCredential(LlmProviderKind),
    #[error(transparent)]
    Llm(#[from] LLMError),
    #[error("failed to persist configuration: {0}")]
    Config(#[from] DotError),
    #[error("terminal output failed: {0}")]
    Io(#[from] std::io::Error),
}

pub struct Manager {
    config: RalliesConfig,
    store: DotManager,
    agent: Agent,
    feed: FeedClient,
    has_llm_credential: bool,
    token_counter: TokenCounter,
}

impl Manager {
    /// Build a manager for the provider selected in `config`, resolving the
    /// LLM credential from the environment
    pub fn new(config: RalliesConfig, store: DotManager) -> Self {
        let llm_key = api_keys::llm_api_key(config.llm_provider);
        let has_llm_credential = llm_key.is_some();
        let llm = make_client(&config, llm_key.unwrap_or_default());
        let agent = Agent::new(llm, &config);
        Self::with_agent(config, store, agent, has_llm_credential)
    }

    pub fn with_agent(
        config: RalliesConfig,
        store: DotManager,
        agent: Agent,
        has_llm_credential: bool,
    ) -> Self {
        let feed = FeedClient::new(&config);
        Self {
            config,
            store,
            agent,
            feed,
            has_llm_credential,
            token_counter: TokenCounter::new(),
        }
    }

    pub fn config(&self) -> &RalliesConfig {
        &self.config
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Drive one user turn.
    ///
    /// The caller has already appended `prompt` as a user entry unless it is
    /// a slash command. Data-tagged entries never survive the call.
    pub async fn process_prompt(
        &mut self,
        prompt: &str,
        conversation: &mut Vec<ConversationEntry>,
    ) -> Result<TurnOutcome, TurnError> {
        if let Some(command) = SlashCommand::parse(prompt) {
            return self.handle_command(command, conversation).await;
        }

        if !self.has_llm_credential {
            let (headline, hint) = api_keys::missing_key_guidance(self.config.llm_provider);
            styled::error(&headline);
            styled::dim(&hint);
            anstream::println!();
            return Err(TurnError::MissingCredential(self.config.llm_provider));
        }

        let result = self.run_turn(prompt, conversation).await;
        let pruned = prune_data_entries(conversation);
        tracing::debug!(pruned, "dropped data entries after turn");

        let outcome = result?;
        if let TurnOutcome::Answered(_) = outcome {
            self.print_footer(conversation);
        }
        Ok(outcome)
    }

    async fn run_turn(
        &mut self,
        prompt: &str,
        conversation: &mut Vec<ConversationEntry>,
    ) -> Result<TurnOutcome, TurnError> {
        anstream::println!();
        let mut rounds = 0usize;

        loop {
            if let Some(cap) = self.config.max_planning_rounds {
                if rounds >= cap {
                    tracing::warn!(rounds, "planning round cap reached, answering with current data");
                    break;
                }
            }

            let spinner = Spinner::new("Planning...");
            let plan = self.agent.run(conversation).await;
            spinner.finish_and_clear();
            let plan = plan?;
            rounds += 1;

            if plan.is_empty() {
                break;
            }
            conversation.push(ConversationEntry::assistant(plan_to_text(&plan)));

            for step in &plan {
                if !self.execute_step(prompt, step, conversation).await? {
                    return Ok(TurnOutcome::Aborted);
                }
            }
        }

        let answer = self.stream_answer(prompt, conversation).await?;
        conversation.push(ConversationEntry::assistant(answer.clone()));
        Ok(TurnOutcome::Answered(answer))
    }

    /// Run one step; `false` when the turn must abort
    async fn execute_step(
        &mut self,
        prompt: &str,
        step: &PlanStep,
        conversation: &mut Vec<ConversationEntry>,
    ) -> Result<bool, TurnError> {
        anstream::println!("{} {}", paint(&Styles::bullet(), "●"), step.description);

        let spinner = Spinner::step(&format!("{RETRIEVING_MESSAGE} (0s)"));
        let renderer = ProgressRenderer::start(spinner.clone_inner());
        let result = self
            .agent
            .action(prompt, &step.title, &step.description)
            .await;
        renderer.stop().await;

        let rendered = match result {
            Ok(payload) => render_payload(&payload),
            Err(e) => {
                tracing::warn!(title = %step.title, error = %e, "retrieval step failed, aborting turn");
                styled::error(&e.to_string());
                anstream::println!();
                let support = format!(
                    "Contact us at {} in case of any issues",
                    urls::SUPPORT_EMAIL
                );
                styled::dim(&right_align(&support, get_terminal_width()));
                return Ok(false);
            }
        };

        conversation.push(ConversationEntry::user(step.heading()));
        conversation.push(ConversationEntry::data(rendered));

        let spinner = Spinner::step("Summarizing...");
        let summary = self.agent.summarize(conversation).await;
        spinner.finish_and_clear();
        let summary = summary?;
        conversation.push(ConversationEntry::user(summary.clone()));

        anstream::println!("└─ {}", paint(&Styles::muted(), summary.trim()));
        anstream::println!();
        Ok(true)
    }

    async fn stream_answer(
        &self,
        prompt: &str,
        conversation: &[ConversationEntry],
    ) -> Result<String, TurnError> {
        let mut stream = self.agent.answer(prompt, conversation).await?;
        let mut live = LiveMarkdown::new();
        while let Some(fragment) = stream.next().await {
            live.push(&fragment?)?;
        }
        Ok(live.finish()?)
    }

    fn print_footer(&self, conversation: &[ConversationEntry]) {
        let tokens = self.token_counter.count_conversation_tokens(conversation);
        let usage_left = self.agent.usage().map(|usage| usage.remaining());
        let footer = footer_text(usage_left, tokens);
        anstream::println!("{}", right_align(&footer, get_terminal_width()));
    }

    async fn handle_command(
        &mut self,
        command: SlashCommand,
        conversation: &mut Vec<ConversationEntry>,
    ) -> Result<TurnOutcome, TurnError> {
        tracing::debug!(?command, "slash command");
        match command {
            SlashCommand::Help => {
                anstream::println!();
                styled::styled(&Styles::header(), "Available Commands:");
                for line in help_lines() {
                    anstream::println!("{line}");
                }
                anstream::println!();
            }
            SlashCommand::Feed => show_feed(&self.feed).await,
            SlashCommand::Clear => {
                conversation.clear();
                styled::success("Conversation history cleared.");
            }
            SlashCommand::Compact(instructions) => {
                self.compact(conversation, instructions.as_deref()).await?;
            }
            SlashCommand::Key(None) => styled::error("Usage: /key API_KEY"),
            SlashCommand::Key(Some(api_key)) => {
                let updated = self.config.clone().with_api_key(api_key);
                match self.store.save_config(&updated) {
                    Ok(()) => {
                        self.agent.set_api_key(&updated);
                        self.config = updated;
                        styled::success("API key saved and activated.");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to save API key");
                        styled::error("Failed to save API key.");
                    }
                }
            }
            SlashCommand::Exit => return Ok(TurnOutcome::Exit),
            SlashCommand::Unknown(name) => {
                styled::error(&format!("Unknown command: {name}"));
                anstream::println!();
            }
        }
        Ok(TurnOutcome::Command)
    }

    async fn compact(
        &self,
        conversation: &mut Vec<ConversationEntry>,
        instructions: Option<&str>,
    ) -> Result<(), TurnError> {
        if conversation.is_empty() {
            styled::error("No conversation history to compact.");
            return Ok(());
        }

        anstream::println!("Let us compact the conversation to reduce tokens");
        let spinner = Spinner::new("Compacting...");
        let outcome = self.agent.compact(conversation, instructions).await;
        spinner.finish_and_clear();

        if let CompactOutcome::Compacted { tokens } = outcome? {
            styled::success(&format!(
                "✓ Conversation condensed to {tokens} tokens. You can continue asking more questions now."
            ));
            anstream::println!();
        }
        Ok(())
    }
}

/// Footer line; the usage part appears once an action has reported counters
pub fn footer_text(usage_left: Option<i64>, tokens: usize) -> String {
    let usage = usage_left
        .map(|left| {
            format!(
                "{}{} | ",
                paint(&Styles::dim(), "Usage left: "),
                paint(&Styles::accent(), &left.to_string())
            )
        })
        .unwrap_or_default();
    format!(
        "{usage}{}{} | {}{} {}",
        paint(&Styles::dim(), "Tokens used: "),
        group_thousands(tokens as i64),
        paint(&Styles::dim(), "with "),
        paint(&Styles::accent(), "♥"),
        paint(&Styles::dim(), "by rallies.ai")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> String {
        console::strip_ansi_codes(text).to_string()
    }

    #[test]
    fn footer_omits_usage_until_reported() {
        assert_eq!(
            plain(&footer_text(None, 1234)),
            "Tokens used: 1,234 | with ♥ by rallies.ai"
        );
        assert_eq!(
            plain(&footer_text(Some(42), 7)),
            "Usage left: 42 | Tokens used: 7 | with ♥ by rallies.ai"
        );
    }

    #[test]
    fn answer_text_is_empty_for_non_answers() {
        assert_eq!(TurnOutcome::Aborted.answer_text(), "");
        assert_eq!(TurnOutcome::Command.answer_text(), "");
        assert_eq!(TurnOutcome::Answered("hi".into()).answer_text(), "hi");
    }
}
