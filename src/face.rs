//! Faces and the styles they name
//!
//! A [`Face`] is an opaque reference carried by triggers and overlays.
//! Only the renderer looks inside, resolving the name to a [`Style`].

use std::fmt;

/// Name of the host's standard line-highlight face
pub const HL_LINE: &str = "hl-line";

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Underlined text
    pub underline: bool,
    /// Reverse video (swap fg/bg)
    pub reverse: bool,
}

impl Style {
    /// Create a style with just background color
    pub fn bg(color: Color) -> Self {
        Self {
            bg: color,
            ..Default::default()
        }
    }

    /// Create a reverse video style (for selections)
    pub fn reverse() -> Self {
        Self {
            reverse: true,
            ..Default::default()
        }
    }

    /// Builder: set foreground color
    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A named style reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Face(String);

impl Face {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Resolve the face to a concrete style.
    /// Unknown names fall back to reverse video so the region stays visible.
    pub fn style(&self) -> Style {
        match self.0.as_str() {
            HL_LINE => Style::bg(Color::BrightBlack),
            "highlight" => Style::bg(Color::Cyan).with_fg(Color::Black),
            "region" => Style::reverse(),
            "isearch" => Style::bg(Color::Magenta).with_fg(Color::BrightWhite),
            "success" => Style::bg(Color::Green).with_fg(Color::Black),
            "warning" => Style::bg(Color::Yellow).with_fg(Color::Black).with_bold(),
            "error" => Style::bg(Color::Red).with_fg(Color::BrightWhite).with_bold(),
            "underline" => Style::default().with_underline(),
            _ => Style::reverse(),
        }
    }
}

impl Default for Face {
    fn default() -> Self {
        Self::new(HL_LINE)
    }
}

impl From<&str> for Face {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
