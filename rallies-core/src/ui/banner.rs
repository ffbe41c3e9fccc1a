//! Startup banner and tips

use super::styled::{Styles, paint};
use anstyle::{AnsiColor, Color, Style};

const LOGO: &str = r#"██╗    ██████╗ █████╗ ██╗     ██╗     ██╗███████╗███████╗
  ██╗  ██╔══██╗██╔══██╗██║     ██║     ██║██╔════╝██╔════╝
    ██ ╗█████╔╝███████║██║     ██║     ██║█████╗  ███████╗
  ██╔╝ ██╔══██╗██╔══██║██║     ██║     ██║██╔══╝  ╚════██║
██╔╝   ██║  ██║██║  ██║███████╗███████╗██║███████╗███████║
╚╝     ╚═╝  ╚═╝╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚══════╝╚══════╝"#;

const GRADIENT: [AnsiColor; 6] = [
    AnsiColor::BrightBlue,
    AnsiColor::Blue,
    AnsiColor::Cyan,
    AnsiColor::BrightCyan,
    AnsiColor::Magenta,
    AnsiColor::BrightMagenta,
];

pub const SUBTITLE: &str = "AI powered investment research, backed by real-time data";

pub const TIPS: [&str; 4] = [
    "1. Ask questions about stocks, analyze trends, or get market insights.",
    "2. Be specific for the best results.",
    "3. Type /provider <openai|gemini> to switch LLM provider.",
    "4. Type /help for more information.",
];

/// Logo lines painted with the row gradient
pub fn banner_lines() -> Vec<String> {
    LOGO.lines()
        .enumerate()
        .map(|(i, line)| {
            let style = Style::new()
                .fg_color(Some(Color::Ansi(GRADIENT[i % GRADIENT.len()])))
                .bold();
            paint(&style, line)
        })
        .collect()
}

pub fn print_banner() {
    anstream::println!("\n");
    for line in banner_lines() {
        anstream::println!("{line}");
    }
    anstream::println!();
    anstream::println!("{}", paint(&Styles::accent().bold(), SUBTITLE));
}

pub fn print_tips() {
    anstream::println!();
    anstream::println!("{}", paint(&Styles::dim(), "Tips for getting started:"));
    for tip in TIPS {
        anstream::println!("{tip}");
    }
    anstream::println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_logo_row_is_painted() {
        let lines = banner_lines();
        assert_eq!(lines.len(), 6);
        assert!(lines.iter().all(|l| l.ends_with(&Styles::render_reset())));
    }
}
