//! Terminal capability detection and colouring

use owo_colors::{OwoColorize, colors::css};

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Detects terminal width, returning None if not available
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Check if terminal is narrow (< 60 columns)
pub fn is_narrow() -> bool {
    terminal_width().is_some_and(|w| w < 60)
}

/// Colours output when enabled, and passes text through untouched otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Colour if stdout supports it
    pub fn detect() -> Self {
        Self {
            enabled: supports_color(),
        }
    }

    /// Never colour
    #[cfg(test)]
    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    /// Color as success (green)
    pub fn success(self, text: &str) -> String {
        self.paint(text, |t| t.fg::<css::Green>().to_string())
    }

    /// Color as warning (amber)
    pub fn warning(self, text: &str) -> String {
        self.paint(text, |t| t.fg::<css::Orange>().to_string())
    }

    /// Color as info (blue)
    pub fn info(self, text: &str) -> String {
        self.paint(text, |t| t.fg::<css::LightBlue>().to_string())
    }

    /// Dim the text
    pub fn dim(self, text: &str) -> String {
        self.paint(text, |t| t.dimmed().to_string())
    }

    fn paint(self, text: &str, style: impl FnOnce(&str) -> String) -> String {
        if self.enabled {
            style(text)
        } else {
            text.to_string()
        }
    }
}
