//! Community feed: recent high-scoring questions

use crate::config::RalliesConfig;
use crate::config::constants::{limits, urls};
use crate::ui::styled::{self, Styles};
use reqwest::Client as HttpClient;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeedConversation {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub unique_link: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    conversations: Vec<FeedConversation>,
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Request timed out. Please try again.")]
    Timeout,
    #[error("API request failed with status {0}")]
    Status(u16),
    #[error("Failed to load feed data.")]
    Unavailable,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Error loading feed: {0}")]
    Decode(String),
}

#[derive(Debug, Clone)]
pub struct FeedClient {
    http_client: HttpClient,
    url: String,
}

impl FeedClient {
    pub fn new(config: &RalliesConfig) -> Self {
        Self {
            http_client: HttpClient::new(),
            url: format!(
                "{}{}",
                config.api_base_url.trim_end_matches('/'),
                urls::FEED_PATH
            ),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the raw feed; an unsuccessful or empty body is an error
    pub async fn fetch(&self) -> Result<Vec<FeedConversation>, FeedError> {
        tracing::debug!(url = %self.url, "fetching feed");
        let response = self
            .http_client
            .get(&self.url)
            .timeout(limits::FEED_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FeedError::Timeout
                } else {
                    FeedError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body: FeedResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                FeedError::Timeout
            } else {
                FeedError::Decode(e.to_string())
            }
        })?;

        if !body.success || body.conversations.is_empty() {
            return Err(FeedError::Unavailable);
        }
        Ok(body.conversations)
    }
}

/// Keep scores above the threshold, newest first, capped
pub fn select_feed_items(conversations: Vec<FeedConversation>) -> Vec<FeedConversation> {
    let mut selected: Vec<FeedConversation> = conversations
        .into_iter()
        .filter(|c| c.score.unwrap_or(0.0) > limits::FEED_MIN_SCORE as f64)
        .collect();
    selected.sort_by(|a, b| {
        let a_created = a.created_at.as_deref().unwrap_or("");
        let b_created = b.created_at.as_deref().unwrap_or("");
        b_created.cmp(a_created)
    });
    selected.truncate(limits::FEED_MAX_ITEMS);
    selected
}

/// Numbered markdown links; numbering counts skipped entries too
pub fn render_feed_lines(items: &[FeedConversation]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let question = item.question.as_deref().map(str::trim).unwrap_or("");
            let link = item.unique_link.as_deref().unwrap_or("");
            if question.is_empty() || link.is_empty() {
                return None;
            }
            Some(format!(
                "{:2}. [{}]({}/{})",
                i + 1,
                truncate_question(question),
                urls::CHAT_LINK_BASE,
                link
            ))
        })
        .collect()
}

fn truncate_question(question: &str) -> String {
    if question.chars().count() > limits::FEED_QUESTION_MAX_CHARS {
        let head: String = question
            .chars()
            .take(limits::FEED_QUESTION_MAX_CHARS - 3)
            .collect();
        format!("{head}...")
    } else {
        question.to_string()
    }
}

/// Handle `/feed`: fetch, filter and print. Failures are printed, never raised.
pub async fn show_feed(client: &FeedClient) {
    styled::warning("Loading feed...");

    let conversations = match client.fetch().await {
        Ok(conversations) => conversations,
        Err(e) => {
            tracing::warn!(error = %e, "feed request failed");
            styled::error(&e.to_string());
            return;
        }
    };

    let items = select_feed_items(conversations);
    if items.is_empty() {
        styled::warning("No high-scoring questions found in the feed.");
        return;
    }

    anstream::println!();
    styled::styled(&Styles::header(), "Rallies feed, recent questions:");
    let lines = render_feed_lines(&items);
    if lines.is_empty() {
        return;
    }
    crate::ui::render_markdown(&lines.join("\n"));
    anstream::println!();
    styled::dim("Click any question to open it in your browser");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(question: &str, link: &str, score: f64, created_at: &str) -> FeedConversation {
        FeedConversation {
            question: Some(question.to_string()),
            unique_link: Some(link.to_string()),
            score: Some(score),
            created_at: Some(created_at.to_string()),
        }
    }

    #[test]
    fn selection_filters_and_orders_newest_first() {
        let items = vec![
            item("a", "l1", 5.0, "2024-05-01"),
            item("b", "l2", 3.0, "2024-05-05"),
            item("c", "l3", 6.0, "2024-05-03"),
            item("d", "l4", 4.0, "2024-05-04"),
            item("e", "l5", 10.0, "2024-05-02"),
        ];
        let selected = select_feed_items(items);
        let scores: Vec<f64> = selected.iter().filter_map(|c| c.score).collect();
        assert_eq!(scores, vec![6.0, 10.0, 5.0]);
    }

    #[test]
    fn selection_is_capped() {
        let items = (0..40)
            .map(|i| item("q", "l", 9.0, &format!("2024-01-{:02}", i % 28 + 1)))
            .collect();
        assert_eq!(select_feed_items(items).len(), limits::FEED_MAX_ITEMS);
    }

    #[test]
    fn lines_skip_incomplete_entries_but_keep_numbering() {
        let items = vec![
            item("What is SPY doing?", "abc", 9.0, "2024"),
            FeedConversation {
                question: None,
                ..item("", "def", 9.0, "2024")
            },
            item("TSLA gex", "ghi", 9.0, "2024"),
        ];
        let lines = render_feed_lines(&items);
        assert_eq!(
            lines,
            vec![
                " 1. [What is SPY doing?](https://rallies.ai/chat/abc)".to_string(),
                " 3. [TSLA gex](https://rallies.ai/chat/ghi)".to_string(),
            ]
        );
    }

    #[test]
    fn long_questions_are_truncated() {
        let question = "x".repeat(100);
        let truncated = truncate_question(&question);
        assert_eq!(truncated.chars().count(), 80);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_question("short"), "short");
    }
}
