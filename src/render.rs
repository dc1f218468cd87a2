//! Frame rendering
//!
//! Draws the visible part of the window as one frame: a caption line, the
//! text rows with overlays painted in their face's style, and a status line.
//! Output goes to any writer so frames can be printed in sequence without
//! taking over the terminal.

use std::io::Write;

use crossterm::{
    queue,
    style::{self, Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
};

use crate::editor::Editor;
use crate::error::Result;
use crate::face::{Color, Face, Style};
use crate::line::Line;

/// Frame renderer
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    /// Emit ANSI styling; otherwise highlighted spans are bracketed
    color: bool,
    /// Maximum display columns per text row
    cols: usize,
}

impl Renderer {
    pub fn new(color: bool, cols: u16) -> Self {
        Self {
            color,
            cols: cols.max(1) as usize,
        }
    }

    /// Render one frame of `editor`, headed by `caption`
    pub fn render<W: Write>(&self, out: &mut W, editor: &Editor, caption: &str) -> Result<()> {
        let window = editor.window();
        let buffer = editor.buffer();

        self.render_rule(out, caption)?;

        for row in 0..window.height() as usize {
            let line_idx = window.top_line() + row;
            match buffer.line(line_idx) {
                Some(line) => {
                    let text = line.text();
                    let span = editor.overlays().iter().rev().find_map(|overlay| {
                        overlay
                            .region
                            .line_intersection(line_idx, text.len())
                            .map(|span| (span, &overlay.face))
                    });
                    match span {
                        Some(((start, end), face)) => {
                            self.render_line_with_face(out, line, start, end, face)?
                        }
                        None => queue!(out, Print(truncate_to_width(text, self.cols)))?,
                    }
                }
                // Empty line indicator
                None => self.render_dim(out, "~")?,
            }
            queue!(out, Print("\n"))?;
        }

        let cursor = window.cursor();
        let status = format!(
            "{}  L{} C{}",
            buffer.name(),
            cursor.line + 1,
            cursor.col
        );
        self.render_rule(out, &status)?;
        out.flush()?;
        Ok(())
    }

    /// Render a line in three parts: before, highlighted, after
    fn render_line_with_face<W: Write>(
        &self,
        out: &mut W,
        line: &Line,
        start: usize,
        end: usize,
        face: &Face,
    ) -> Result<()> {
        let before = truncate_to_width(line.safe_slice_to(start), self.cols);
        let mut remaining = self.cols.saturating_sub(line.byte_to_col(start));
        queue!(out, Print(&before))?;

        let highlighted = truncate_to_width(line.safe_slice(start, end), remaining);
        remaining = remaining.saturating_sub(unicode_width::UnicodeWidthStr::width(highlighted.as_str()));
        if self.color {
            apply_style(out, face.style())?;
            queue!(out, Print(&highlighted), SetAttribute(Attribute::Reset))?;
        } else {
            queue!(out, Print('['), Print(&highlighted), Print(']'))?;
        }

        let after = truncate_to_width(line.safe_slice_from(end), remaining);
        queue!(out, Print(after))?;
        Ok(())
    }

    fn render_rule<W: Write>(&self, out: &mut W, label: &str) -> Result<()> {
        let rule = truncate_to_width(&format!("-- {label} --"), self.cols);
        self.render_dim(out, &rule)?;
        queue!(out, Print("\n"))?;
        Ok(())
    }

    fn render_dim<W: Write>(&self, out: &mut W, text: &str) -> Result<()> {
        if self.color {
            queue!(
                out,
                SetAttribute(Attribute::Dim),
                Print(text),
                SetAttribute(Attribute::NormalIntensity)
            )?;
        } else {
            queue!(out, Print(text))?;
        }
        Ok(())
    }
}

/// Queue the attributes and colors of `style`
fn apply_style<W: Write>(out: &mut W, style: Style) -> Result<()> {
    if let Some(fg) = to_crossterm(style.fg) {
        queue!(out, SetForegroundColor(fg))?;
    }
    if let Some(bg) = to_crossterm(style.bg) {
        queue!(out, SetBackgroundColor(bg))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if style.reverse {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

fn to_crossterm(color: Color) -> Option<style::Color> {
    Some(match color {
        Color::Default => return None,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
        Color::BrightBlack => style::Color::DarkGrey,
        Color::BrightRed => style::Color::Red,
        Color::BrightGreen => style::Color::Green,
        Color::BrightYellow => style::Color::Yellow,
        Color::BrightBlue => style::Color::Blue,
        Color::BrightMagenta => style::Color::Magenta,
        Color::BrightCyan => style::Color::Cyan,
        Color::BrightWhite => style::Color::White,
    })
}

/// Truncate string to fit within max display width
fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::OverlayHost;
    use crate::region::{Pos, Region};

    fn frame(editor: &Editor, renderer: Renderer) -> String {
        let mut out = Vec::new();
        renderer.render(&mut out, editor, "test").unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_frame_brackets_overlay() {
        let mut editor = Editor::with_height("alpha beta\ngamma", 3);
        editor.add_overlay(Region::on_line(0, 6, 10), &Face::default());

        let text = frame(&editor, Renderer::new(false, 80));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec!["-- test --", "alpha [beta]", "gamma", "~", "-- *scratch*  L1 C0 --"]
        );
    }

    #[test]
    fn test_multiline_overlay() {
        let mut editor = Editor::with_height("ab\ncd\nef", 3);
        editor.add_overlay(
            Region::new(Pos::new(0, 1), Pos::new(2, 1)),
            &Face::new("region"),
        );

        let text = frame(&editor, Renderer::new(false, 80));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(&lines[1..4], &["a[b]", "[cd]", "[e]f"]);
    }

    #[test]
    fn test_truncates_to_columns() {
        let editor = Editor::with_height("abcdefghij", 1);
        let text = frame(&editor, Renderer::new(false, 4));
        assert_eq!(text.lines().nth(1), Some("abcd"));
    }

    #[test]
    fn test_color_frame_uses_escape_codes() {
        let mut editor = Editor::with_height("alpha", 1);
        editor.add_overlay(Region::on_line(0, 0, 5), &Face::new("highlight"));

        let text = frame(&editor, Renderer::new(true, 80));
        assert!(text.contains("\x1b["));
        assert!(!text.contains("[alpha]"));
        assert!(text.contains("alpha"));
    }
}
