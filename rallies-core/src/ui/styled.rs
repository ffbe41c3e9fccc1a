use anstream::println as styled_println;
use anstyle::{AnsiColor, Color, Effects, Reset, Style};

fn fg(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

/// Style presets for consistent terminal output
pub struct Styles;

impl Styles {
    /// Error message style (red)
    pub fn error() -> Style {
        fg(AnsiColor::Red)
    }

    /// Warning and progress style (yellow)
    pub fn warning() -> Style {
        fg(AnsiColor::Yellow)
    }

    /// Success message style (green)
    pub fn success() -> Style {
        fg(AnsiColor::Green)
    }

    /// Section header style (bright cyan)
    pub fn header() -> Style {
        fg(AnsiColor::BrightCyan)
    }

    /// Step bullet style (bright green)
    pub fn bullet() -> Style {
        fg(AnsiColor::BrightGreen)
    }

    /// Planner activity style (bright magenta)
    pub fn accent() -> Style {
        fg(AnsiColor::BrightMagenta)
    }

    /// Secondary text such as step summaries
    pub fn muted() -> Style {
        fg(AnsiColor::BrightBlack)
    }

    pub fn dim() -> Style {
        Style::new().effects(Effects::DIMMED)
    }

    /// Bold text style
    pub fn bold() -> Style {
        Style::new().effects(Effects::BOLD)
    }

    pub fn bold_success() -> Style {
        Self::success().bold()
    }

    /// Render style to ANSI string
    pub fn render(style: &Style) -> String {
        format!("{}", style)
    }

    /// Render reset ANSI string
    pub fn render_reset() -> String {
        format!("{}", Reset)
    }
}

/// Wrap `text` in `style` for inline composition
pub fn paint(style: &Style, text: &str) -> String {
    format!("{}{}{}", Styles::render(style), text, Styles::render_reset())
}

/// Print a styled error message
pub fn error(message: &str) {
    styled(&Styles::error(), message);
}

/// Print a styled warning message
pub fn warning(message: &str) {
    styled(&Styles::warning(), message);
}

/// Print a styled success message
pub fn success(message: &str) {
    styled(&Styles::success(), message);
}

/// Print a dimmed hint
pub fn dim(message: &str) {
    styled(&Styles::dim(), message);
}

/// Print a styled message with custom style
pub fn styled(style: &Style, message: &str) {
    styled_println!(
        "{}{}{}",
        Styles::render(style),
        message,
        Styles::render_reset()
    );
}
