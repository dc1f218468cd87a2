//! Buffer representation - a collection of lines with associated metadata

use std::path::{Path, PathBuf};

use crate::line::Line;
use crate::region::Pos;

/// A buffer containing text and metadata
#[derive(Debug)]
pub struct Buffer {
    /// Lines of text
    lines: Vec<Line>,
    /// Buffer name (e.g., "main.rs", "*scratch*")
    name: String,
    /// Associated file path (None for unnamed buffers)
    filename: Option<PathBuf>,
}

impl Buffer {
    /// Create a buffer holding `text`
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let lines: Vec<Line> = text.lines().map(Line::from).collect();

        // Always have at least one line
        let lines = if lines.is_empty() {
            vec![Line::new()]
        } else {
            lines
        };

        Self {
            lines,
            name: name.into(),
            filename: None,
        }
    }

    /// Create a buffer from file contents
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        let mut buffer = Self::from_text(name, &content);
        buffer.filename = Some(path.to_path_buf());
        Ok(buffer)
    }

    /// Get buffer name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get filename if set
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Get number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get a line by index
    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    /// Get all lines
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Length in bytes of a line (0 past the end)
    pub fn line_len(&self, idx: usize) -> usize {
        self.lines.get(idx).map(|l| l.len()).unwrap_or(0)
    }

    /// Position just past the last character
    pub fn end_pos(&self) -> Pos {
        let last = self.lines.len().saturating_sub(1);
        Pos::new(last, self.line_len(last))
    }

    /// Whole buffer as one string, lines joined with '\n'
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(line.text());
        }
        text
    }

    /// Byte offset of `pos` within [`Buffer::to_text`]
    pub fn offset_of(&self, pos: Pos) -> usize {
        let line = pos.line.min(self.lines.len().saturating_sub(1));
        let before: usize = self.lines[..line].iter().map(|l| l.len() + 1).sum();
        before + pos.col.min(self.line_len(line))
    }

    /// Position of a byte offset within [`Buffer::to_text`]
    pub fn pos_at(&self, offset: usize) -> Pos {
        let mut remaining = offset;
        for (idx, line) in self.lines.iter().enumerate() {
            if remaining <= line.len() {
                return Pos::new(idx, remaining);
            }
            remaining -= line.len() + 1;
        }
        self.end_pos()
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::from_text("*scratch*", "")
    }
}
