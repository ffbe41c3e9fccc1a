//! Approximate token accounting for the usage footer

use crate::core::agent::conversation::ConversationEntry;

/// Character-based token estimator (about four characters per token)
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenCounter;

impl TokenCounter {
    const CHARS_PER_TOKEN: usize = 4;

    pub fn new() -> Self {
        Self
    }

    pub fn count_tokens(&self, text: &str) -> usize {
        text.chars().count().div_ceil(Self::CHARS_PER_TOKEN)
    }

    pub fn count_conversation_tokens(&self, conversation: &[ConversationEntry]) -> usize {
        conversation
            .iter()
            .map(|entry| self.count_tokens(&entry.content))
            .sum()
    }

    pub fn format_token_count(&self, token_count: usize) -> String {
        if token_count >= 1000 {
            format!("{:.1}k tokens", token_count as f64 / 1000.0)
        } else {
            format!("{token_count} tokens")
        }
    }
}

/// Thousands-separated integer, e.g. `12,345`
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_counts_zero() {
        assert_eq!(TokenCounter::new().count_tokens(""), 0);
    }

    #[test]
    fn partial_tokens_round_up() {
        let counter = TokenCounter::new();
        assert_eq!(counter.count_tokens("abc"), 1);
        assert_eq!(counter.count_tokens("abcde"), 2);
        assert_eq!(counter.count_tokens("ééééé"), 2);
    }

    #[test]
    fn conversation_total_sums_entries() {
        let conversation = vec![
            ConversationEntry::user("abcd"),
            ConversationEntry::assistant("abcdefgh"),
        ];
        assert_eq!(TokenCounter::new().count_conversation_tokens(&conversation), 3);
    }

    #[test]
    fn large_counts_use_k_suffix() {
        let counter = TokenCounter::new();
        assert_eq!(counter.format_token_count(999), "999 tokens");
        assert_eq!(counter.format_token_count(1234), "1.2k tokens");
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-1500), "-1,500");
    }
}
