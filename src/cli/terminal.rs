//! Terminal capability detection and styling

use std::io::IsTerminal;

use owo_colors::{OwoColorize, colors::css};

/// What the attached terminal can do, probed once per command.
#[derive(Debug, Clone, Copy)]
pub struct Terminal {
    color: bool,
    width: Option<u16>,
    interactive: bool,
}

impl Terminal {
    pub fn detect() -> Self {
        Self {
            color: supports_color::on(supports_color::Stream::Stdout).is_some(),
            width: terminal_size::terminal_size().map(|(w, _)| w.0),
            interactive: std::io::stdin().is_terminal(),
        }
    }

    /// Whether stdout accepts ANSI colors
    pub const fn color(self) -> bool {
        self.color
    }

    /// Narrow terminals (< 60 columns) get a reduced set of columns
    pub fn is_narrow(self) -> bool {
        self.width.is_some_and(|w| w < 60)
    }

    /// Whether stdin is attached to a person rather than a pipe
    pub const fn is_interactive(self) -> bool {
        self.interactive
    }
}

/// Semantic styles used in human-readable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Ratings of 4 and above, confirmations
    Good,
    /// Ratings of 2 and below, errors
    Poor,
    /// Everything in between, headings
    Neutral,
    /// Tags, hints and prompts
    Muted,
}

impl Tone {
    pub fn for_rating(rating: f64) -> Self {
        if rating >= 4.0 {
            Self::Good
        } else if rating <= 2.0 {
            Self::Poor
        } else {
            Self::Neutral
        }
    }

    pub fn paint(self, text: &str) -> String {
        match self {
            Self::Good => text.fg::<css::Green>().to_string(),
            Self::Poor => text.fg::<css::Orange>().to_string(),
            Self::Neutral => text.fg::<css::LightBlue>().to_string(),
            Self::Muted => text.dimmed().to_string(),
        }
    }
}
