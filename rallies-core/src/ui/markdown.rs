//! Live markdown rendering for streamed answers.
//!
//! While fragments arrive the accumulated text is re-rendered in place. The
//! live region is cropped to the terminal height; once the stream ends the
//! live region is cleared and the complete rendering printed once.

use super::terminal::{get_terminal_height, get_terminal_width};
use console::Term;
use std::io::{self, Write};
use termimad::MadSkin;

/// Render markdown text for a terminal `width` columns wide
pub fn render_markdown_to_string(skin: &MadSkin, markdown: &str, width: usize) -> String {
    skin.text(markdown, Some(width)).to_string()
}

/// Print markdown once, no live updates
pub fn render_markdown(markdown: &str) {
    let skin = MadSkin::default();
    let rendered = render_markdown_to_string(&skin, markdown, get_terminal_width());
    print!("{rendered}");
    super::terminal::flush_stdout();
}

pub struct LiveMarkdown {
    term: Term,
    skin: MadSkin,
    text: String,
    drawn_lines: usize,
    live: bool,
}

impl LiveMarkdown {
    pub fn new() -> Self {
        let term = Term::stdout();
        let live = term.is_term();
        Self {
            term,
            skin: MadSkin::default(),
            text: String::new(),
            drawn_lines: 0,
            live,
        }
    }

    /// Accumulated markdown so far
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Append a fragment and redraw
    pub fn push(&mut self, fragment: &str) -> io::Result<()> {
        self.text.push_str(fragment);
        if !self.live {
            return Ok(());
        }

        let rendered = render_markdown_to_string(&self.skin, &self.text, get_terminal_width());
        let max_lines = get_terminal_height().saturating_sub(2).max(1);
        let visible = crop_lines(&rendered, max_lines);

        self.clear_live_region()?;
        self.term.write_str(&visible)?;
        self.drawn_lines = visible.lines().count();
        self.term.flush()
    }

    /// Clear the live region and print the full rendering; returns the raw text
    pub fn finish(mut self) -> io::Result<String> {
        self.clear_live_region()?;
        let rendered = render_markdown_to_string(&self.skin, &self.text, get_terminal_width());
        self.term.write_str(&rendered)?;
        if !rendered.ends_with('\n') {
            self.term.write_line("")?;
        }
        self.term.flush()?;
        Ok(std::mem::take(&mut self.text))
    }

    fn clear_live_region(&mut self) -> io::Result<()> {
        if self.drawn_lines > 0 {
            self.term.clear_last_lines(self.drawn_lines)?;
            self.drawn_lines = 0;
        }
        Ok(())
    }
}

impl Default for LiveMarkdown {
    fn default() -> Self {
        Self::new()
    }
}

/// First `max_lines` lines of `rendered`, with an ellipsis line when cut
fn crop_lines(rendered: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = rendered.lines().collect();
    if lines.len() <= max_lines {
        let mut out = lines.join("\n");
        out.push('\n');
        return out;
    }
    let mut out = lines[..max_lines - 1].join("\n");
    out.push_str("\n...\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_renderings_are_not_cropped() {
        assert_eq!(crop_lines("a\nb", 5), "a\nb\n");
    }

    #[test]
    fn long_renderings_end_with_ellipsis() {
        let cropped = crop_lines("1\n2\n3\n4\n5", 3);
        assert_eq!(cropped, "1\n2\n...\n");
        assert_eq!(cropped.lines().count(), 3);
    }

    #[test]
    fn markdown_renders_plain_words() {
        let skin = MadSkin::no_style();
        let rendered = render_markdown_to_string(&skin, "**AAPL** is up", 40);
        assert!(rendered.contains("AAPL"));
        assert!(rendered.contains("is up"));
    }

    #[test]
    fn text_accumulates_without_a_terminal() {
        let mut live = LiveMarkdown::new();
        live.live = false;
        live.push("Hello ").unwrap();
        live.push("world").unwrap();
        assert_eq!(live.text(), "Hello world");
    }
}
