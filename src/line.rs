//! Line representation and text queries

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// A single line of text in a buffer
#[derive(Debug, Clone, Default)]
pub struct Line {
    /// The text content (without trailing newline)
    text: String,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Empty or only whitespace
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Byte offset of display column `col`, or None past the end of the line
    pub fn col_to_byte(&self, col: usize) -> Option<usize> {
        let mut width = 0;
        for (byte_idx, ch) in self.text.char_indices() {
            if width >= col {
                return Some(byte_idx);
            }
            width += ch.width().unwrap_or(1);
        }
        (width >= col).then_some(self.text.len())
    }

    /// Display column of byte offset `byte_pos`
    pub fn byte_to_col(&self, byte_pos: usize) -> usize {
        self.safe_slice_to(byte_pos).width()
    }

    /// Slice by byte offsets, widening to char boundaries; empty when the
    /// range is out of bounds or inverted
    pub fn safe_slice(&self, start: usize, end: usize) -> &str {
        let len = self.text.len();
        if start >= len {
            return "";
        }
        let start = (0..=start)
            .rev()
            .find(|&i| self.text.is_char_boundary(i))
            .unwrap_or(0);
        let end = (end.min(len)..=len)
            .find(|&i| self.text.is_char_boundary(i))
            .unwrap_or(len);
        self.text.get(start..end).unwrap_or("")
    }

    pub fn safe_slice_to(&self, end: usize) -> &str {
        self.safe_slice(0, end)
    }

    pub fn safe_slice_from(&self, start: usize) -> &str {
        self.safe_slice(start, self.text.len())
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self { text: s.to_string() }
    }
}

impl From<String> for Line {
    fn from(s: String) -> Self {
        Self { text: s }
    }
}
