//! In-turn slash commands and the community feed

pub mod feed;
pub mod slash;

pub use feed::{FeedClient, FeedConversation, FeedError, select_feed_items, show_feed};
pub use slash::SlashCommand;
