//! Terminal colours.
//!
//! Colours are plain ANSI escapes and are only emitted when the palette is
//! enabled, which by default means stdout is a terminal.

use std::io::{self, IsTerminal};

use rust_decimal::Decimal;

/// Severity of a marginal tax rate, used to colour rate badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateTier {
    /// Up to 15%.
    Low,
    /// Up to 24%.
    Moderate,
    /// Up to 35%.
    High,
    Top,
}

impl RateTier {
    /// Classifies a whole-number rate percentage such as `24`.
    pub fn from_percent(percent: Decimal) -> Self {
        if percent <= Decimal::from(15) {
            Self::Low
        } else if percent <= Decimal::from(24) {
            Self::Moderate
        } else if percent <= Decimal::from(35) {
            Self::High
        } else {
            Self::Top
        }
    }
}

/// What a piece of text represents; each maps to one colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Heading,
    Muted,
    /// Net pay.
    Positive,
    /// Deductions.
    Negative,
    /// Taxable income.
    Accent,
    /// Applied rates.
    Highlight,
    /// Active mode or enabled toggle.
    Selected,
    Tier(RateTier),
}

impl Style {
    fn code(&self) -> Option<&'static str> {
        match self {
            Style::Plain => None,
            Style::Heading => Some("1"),
            Style::Muted => Some("2"),
            Style::Positive => Some("1;32"),
            Style::Negative => Some("31"),
            Style::Accent => Some("35"),
            Style::Highlight => Some("33"),
            Style::Selected => Some("1;7"),
            Style::Tier(RateTier::Low) => Some("1;32"),
            Style::Tier(RateTier::Moderate) => Some("1;33"),
            Style::Tier(RateTier::High) => Some("1;38;5;208"),
            Style::Tier(RateTier::Top) => Some("1;31"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Colours on when stdout is a terminal.
    pub fn detect() -> Self {
        Self {
            enabled: io::stdout().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn colored() -> Self {
        Self { enabled: true }
    }

    /// Wraps `text` in the escape sequence for `style`.
    pub fn paint(
        &self,
        text: &str,
        style: Style,
    ) -> String {
        match style.code() {
            Some(code) if self.enabled => format!("\x1b[{code}m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    }
}
