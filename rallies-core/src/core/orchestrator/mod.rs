//! Turn orchestration

pub mod manager;
pub mod progress;

pub use manager::{Manager, TurnError, TurnOutcome};
pub use progress::{FILLER_MESSAGES, ProgressRenderer, progress_message};
