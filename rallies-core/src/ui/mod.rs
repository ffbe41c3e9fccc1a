//! User interface utilities and shared UI components
//!
//! Loading indicators, styled output, live markdown rendering and the
//! slash-command table used by the shell.

pub mod banner;
pub mod markdown;
pub mod slash;
pub mod spinner;
pub mod styled;
pub mod terminal;

pub use markdown::{LiveMarkdown, render_markdown};
pub use spinner::*;
pub use styled::*;
pub use terminal::*;
