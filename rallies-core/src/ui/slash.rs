use once_cell::sync::Lazy;

/// Metadata describing a slash command supported by the shell.
#[derive(Clone, Copy, Debug)]
pub struct SlashCommandInfo {
    pub name: &'static str,
    /// Usage as shown in `/help`
    pub usage: &'static str,
    pub description: &'static str,
    /// Optional second help line
    pub detail: Option<&'static str>,
    /// Listed in `/help`
    pub listed: bool,
}

/// Collection of slash command definitions in the order they should be displayed.
pub static SLASH_COMMANDS: Lazy<Vec<SlashCommandInfo>> = Lazy::new(|| {
    vec![
        SlashCommandInfo {
            name: "key",
            usage: "/key API_KEY",
            description: "Set up your API key",
            detail: None,
            listed: true,
        },
        SlashCommandInfo {
            name: "feed",
            usage: "/feed",
            description: "Show recent high-scoring questions from the community",
            detail: None,
            listed: true,
        },
        SlashCommandInfo {
            name: "clear",
            usage: "/clear",
            description: "Clear conversation history and free up context",
            detail: None,
            listed: true,
        },
        SlashCommandInfo {
            name: "compact",
            usage: "/compact",
            description: "Clear conversation history but keep a summary in context.",
            detail: Some("Optional: /compact [instructions for summarization]"),
            listed: true,
        },
        SlashCommandInfo {
            name: "exit",
            usage: "/exit (quit)",
            description: "Exit the REPL",
            detail: None,
            listed: true,
        },
        SlashCommandInfo {
            name: "help",
            usage: "/help",
            description: "Show help and available commands",
            detail: None,
            listed: true,
        },
        SlashCommandInfo {
            name: "provider",
            usage: "/provider <openai|gemini>",
            description: "Switch LLM provider",
            detail: None,
            listed: false,
        },
        SlashCommandInfo {
            name: "quit",
            usage: "/quit",
            description: "Exit the REPL",
            detail: None,
            listed: false,
        },
    ]
});

const USAGE_COLUMN: usize = 20;

/// Lines printed by `/help`
pub fn help_lines() -> Vec<String> {
    let mut lines = Vec::new();
    for info in SLASH_COMMANDS.iter().filter(|info| info.listed) {
        lines.push(format!(
            "  {:<width$}{}",
            info.usage,
            info.description,
            width = USAGE_COLUMN
        ));
        if let Some(detail) = info.detail {
            lines.push(format!("  {:<width$}{}", "", detail, width = USAGE_COLUMN));
        }
    }
    lines
}

/// Returns slash command metadata that match the provided prefix (case insensitive).
pub fn suggestions_for(prefix: &str) -> Vec<&'static SlashCommandInfo> {
    if prefix.is_empty() {
        return SLASH_COMMANDS.iter().collect();
    }
    let query = prefix.to_ascii_lowercase();
    let mut matches: Vec<&SlashCommandInfo> = SLASH_COMMANDS
        .iter()
        .filter(|info| info.name.starts_with(&query))
        .collect();
    matches.sort_by(|a, b| a.name.cmp(b.name));
    matches
}
