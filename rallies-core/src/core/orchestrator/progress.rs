//! Elapsed-time progress line shown while a retrieval step runs

use crate::config::constants::limits;
use indicatif::ProgressBar;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const RETRIEVING_MESSAGE: &str = "Retrieving data...";

/// Phrases rotated once the initial retrieving phase has passed
pub const FILLER_MESSAGES: [&str; 32] = [
    "Cogitating...",
    "Deep dive...",
    "Percolating...",
    "Synthesizing...",
    "Triangulating...",
    "Crystallizing...",
    "Distilling...",
    "Calibrating...",
    "Optimizing...",
    "Finalizing...",
    "Polishing...",
    "Contemplating...",
    "Deliberating...",
    "Ruminating...",
    "Pondering...",
    "Mulling over...",
    "Reflecting...",
    "Meditating...",
    "Concentrating...",
    "Focusing...",
    "Absorbing...",
    "Digesting...",
    "Assimilating...",
    "Integrating...",
    "Harmonizing...",
    "Balancing...",
    "Aligning...",
    "Orchestrating...",
    "Weaving...",
    "Crafting...",
    "Sculpting...",
    "Refining...",
];

/// Message for a step that has been running for `elapsed`
pub fn progress_message(elapsed: Duration) -> &'static str {
    let secs = elapsed.as_secs_f64();
    let retrieving = limits::RETRIEVING_PHASE_SECS as f64;
    if secs < retrieving {
        return RETRIEVING_MESSAGE;
    }
    let bucket = ((secs - retrieving) / limits::FILLER_ROTATION_SECS as f64).floor() as usize;
    FILLER_MESSAGES[bucket % FILLER_MESSAGES.len()]
}

/// Message with the whole elapsed seconds appended, e.g. `Deep dive... (25s)`
pub fn progress_line(elapsed: Duration) -> String {
    format!("{} ({}s)", progress_message(elapsed), elapsed.as_secs())
}

/// Background task refreshing a progress bar until signalled to stop
pub struct ProgressRenderer {
    done: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ProgressRenderer {
    /// Spawn the renderer; it ticks every poll interval
    pub fn start(bar: ProgressBar) -> Self {
        Self::start_with_interval(bar, limits::PROGRESS_POLL_INTERVAL)
    }

    pub fn start_with_interval(bar: ProgressBar, interval: Duration) -> Self {
        let (done, mut done_rx) = watch::channel(false);
        let started = Instant::now();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        bar.set_message(progress_line(started.elapsed()));
                    }
                    changed = done_rx.changed() => {
                        if changed.is_err() || *done_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            bar.finish_and_clear();
        });

        Self { done, handle }
    }

    /// Signal completion and wait for the renderer to clear its line
    pub async fn stop(self) {
        let _ = self.done.send(true);
        if let Err(e) = self.handle.await {
            tracing::debug!(error = %e, "progress renderer ended abnormally");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_ten_seconds_show_retrieving() {
        assert_eq!(progress_message(Duration::from_secs(0)), RETRIEVING_MESSAGE);
        assert_eq!(progress_message(Duration::from_millis(9_999)), RETRIEVING_MESSAGE);
    }

    #[test]
    fn fillers_rotate_every_ten_seconds() {
        assert_eq!(progress_message(Duration::from_secs(10)), FILLER_MESSAGES[0]);
        assert_eq!(progress_message(Duration::from_secs(19)), FILLER_MESSAGES[0]);
        assert_eq!(progress_message(Duration::from_secs(25)), FILLER_MESSAGES[1]);
    }

    #[test]
    fn fillers_wrap_around() {
        let wrap = 10 + 10 * FILLER_MESSAGES.len() as u64;
        assert_eq!(progress_message(Duration::from_secs(wrap)), FILLER_MESSAGES[0]);
        assert_eq!(progress_message(Duration::from_secs(wrap + 10)), FILLER_MESSAGES[1]);
    }

    #[test]
    fn line_appends_elapsed_seconds() {
        assert_eq!(progress_line(Duration::from_millis(3_400)), "Retrieving data... (3s)");
    }

    #[tokio::test]
    async fn renderer_updates_and_stops_on_signal() {
        let bar = ProgressBar::hidden();
        let renderer = ProgressRenderer::start_with_interval(bar.clone(), Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(bar.message(), "Retrieving data... (0s)");

        renderer.stop().await;
        assert!(bar.is_finished());
    }
}
