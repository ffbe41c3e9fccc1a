//! Loading spinner utilities for terminal UI using indicatif crate

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

fn spinner_style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(TICK_CHARS)
}

/// A wrapper around indicatif's ProgressBar for easy spinner management
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    /// Create a new spinner with the given message
    pub fn new(message: &str) -> Self {
        Self::with_template("{spinner:.green} {msg:.magenta}", message)
    }

    /// Spinner for a running retrieval step, e.g. `Retrieving data... (3s)`
    pub fn step(message: &str) -> Self {
        Self::with_template("  {spinner:.yellow} {msg:.yellow}", message)
    }

    fn with_template(template: &str, message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(spinner_style(template));
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.tick(); // Ensure spinner displays immediately

        Self { pb }
    }

    /// Finish the spinner and clear the line
    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }

    /// Get a clone of the ProgressBar for use in other tasks
    pub fn clone_inner(&self) -> ProgressBar {
        self.pb.clone()
    }
}
