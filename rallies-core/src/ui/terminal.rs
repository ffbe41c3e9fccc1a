//! Terminal utilities and helpers

use std::io::Write;

/// Get the terminal width, fallback to 80 if unable to determine
pub fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .unwrap_or(80)
}

/// Get the terminal height, fallback to 24 if unable to determine
pub fn get_terminal_height() -> usize {
    terminal_size::terminal_size()
        .map(|(_, terminal_size::Height(h))| h as usize)
        .unwrap_or(24)
}

/// Flush stdout to ensure output is displayed immediately
pub fn flush_stdout() {
    std::io::stdout().flush().ok();
}

/// Left-pad `text` so it ends at column `width`; ANSI codes are not counted
pub fn right_align(text: &str, width: usize) -> String {
    let visible = console::measure_text_width(text);
    if visible >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat(width - visible), text)
}
