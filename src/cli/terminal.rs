//! Terminal capability detection and colouring.

use owo_colors::{OwoColorize, colors::css};

/// Whether stdout accepts ANSI colours.
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Terminal width in columns, if stdout is a terminal.
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(width, _)| width.0)
}

/// Narrow terminals (< 60 columns) get stacked rather than tabular output.
pub fn is_narrow() -> bool {
    terminal_width().is_some_and(|width| width < 60)
}

/// Extension trait for colouring report output.
pub trait Colorize {
    /// Passed (green)
    fn success(&self) -> String;
    /// Advisory finding (amber)
    fn warning(&self) -> String;
    /// Violation (red)
    fn error(&self) -> String;
    /// Section header (blue)
    fn info(&self) -> String;
    /// De-emphasised detail
    fn dim(&self) -> String;
}

fn paint(text: &str, style: impl FnOnce(&str) -> String) -> String {
    if supports_color() {
        style(text)
    } else {
        text.to_string()
    }
}

impl Colorize for str {
    fn success(&self) -> String {
        paint(self, |s| s.fg::<css::Green>().to_string())
    }

    fn warning(&self) -> String {
        paint(self, |s| s.fg::<css::Orange>().to_string())
    }

    fn error(&self) -> String {
        paint(self, |s| s.fg::<css::Red>().to_string())
    }

    fn info(&self) -> String {
        paint(self, |s| s.fg::<css::LightBlue>().bold().to_string())
    }

    fn dim(&self) -> String {
        paint(self, |s| s.dimmed().to_string())
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn error(&self) -> String {
        self.as_str().error()
    }

    fn info(&self) -> String {
        self.as_str().info()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }
}
