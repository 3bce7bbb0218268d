//! Colour and width of the terminal the log is written to.

use owo_colors::{colors::css, OwoColorize};
use supports_color::Stream;

/// Below this many columns the table drops its time column.
const NARROW_COLUMNS: u16 = 40;

/// Whether the terminal is too narrow for the full table.
pub fn is_narrow() -> bool {
    terminal_size::terminal_size().is_some_and(|(width, _)| width.0 < NARROW_COLUMNS)
}

/// Styles messages for one output stream.
///
/// Colour is decided per stream, so messages sent to a terminal on stderr are
/// coloured even when stdout is piped, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// A palette for messages written to stdout.
    pub fn stdout() -> Self {
        Self::detect(Stream::Stdout)
    }

    /// A palette for messages written to stderr.
    pub fn stderr() -> Self {
        Self::detect(Stream::Stderr)
    }

    /// A palette that never colours.
    #[cfg(test)]
    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    fn detect(stream: Stream) -> Self {
        Self {
            enabled: supports_color::on(stream).is_some(),
        }
    }

    /// A run was accepted.
    pub fn success(self, text: &str) -> String {
        self.paint(text, |text| text.fg::<css::Green>().to_string())
    }

    /// A run or file was rejected.
    pub fn error(self, text: &str) -> String {
        self.paint(text, |text| text.fg::<css::Crimson>().to_string())
    }

    /// Progress, such as how many runs were imported.
    pub fn info(self, text: &str) -> String {
        self.paint(text, |text| text.fg::<css::LightBlue>().to_string())
    }

    /// Hints and secondary detail.
    pub fn dim(self, text: &str) -> String {
        self.paint(text, |text| text.dimmed().to_string())
    }

    fn paint(self, text: &str, style: impl FnOnce(&str) -> String) -> String {
        if self.enabled {
            style(text)
        } else {
            text.to_string()
        }
    }
}
