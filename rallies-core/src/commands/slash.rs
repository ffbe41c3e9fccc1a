//! Parsing of in-turn slash commands

/// Slash command recognized by the manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    Feed,
    Clear,
    /// `/compact [instructions]`
    Compact(Option<String>),
    /// `/key API_KEY`; `None` when the key is missing
    Key(Option<String>),
    Exit,
    Unknown(String),
}

impl SlashCommand {
    /// Parse `input`; `None` unless it starts with `/`
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let body = trimmed.strip_prefix('/')?;

        let (name, rest) = match body.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (body, ""),
        };
        let argument = (!rest.is_empty()).then(|| rest.to_string());

        let command = match name {
            "help" if argument.is_none() => Self::Help,
            "feed" if argument.is_none() => Self::Feed,
            "clear" if argument.is_none() => Self::Clear,
            "compact" => Self::Compact(argument),
            "key" => Self::Key(argument),
            "exit" | "quit" if argument.is_none() => Self::Exit,
            _ => Self::Unknown(format!("/{name}")),
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(SlashCommand::parse("what is AAPL doing"), None);
    }

    #[test]
    fn simple_commands_parse() {
        assert_eq!(SlashCommand::parse(" /help "), Some(SlashCommand::Help));
        assert_eq!(SlashCommand::parse("/feed"), Some(SlashCommand::Feed));
        assert_eq!(SlashCommand::parse("/clear"), Some(SlashCommand::Clear));
        assert_eq!(SlashCommand::parse("/quit"), Some(SlashCommand::Exit));
        assert_eq!(SlashCommand::parse("/exit"), Some(SlashCommand::Exit));
    }

    #[test]
    fn arguments_are_captured() {
        assert_eq!(
            SlashCommand::parse("/compact keep price levels"),
            Some(SlashCommand::Compact(Some("keep price levels".into())))
        );
        assert_eq!(SlashCommand::parse("/compact"), Some(SlashCommand::Compact(None)));
        assert_eq!(
            SlashCommand::parse("/key   rk-live-123 "),
            Some(SlashCommand::Key(Some("rk-live-123".into())))
        );
        assert_eq!(SlashCommand::parse("/key"), Some(SlashCommand::Key(None)));
    }

    #[test]
    fn unknown_names_are_reported() {
        assert_eq!(
            SlashCommand::parse("/portfolio now"),
            Some(SlashCommand::Unknown("/portfolio".into()))
        );
        assert_eq!(
            SlashCommand::parse("/help me"),
            Some(SlashCommand::Unknown("/help".into()))
        );
    }
}
