//! Window representation - a viewport into a buffer

use crate::region::Pos;

/// A window displaying a portion of a buffer
#[derive(Debug)]
pub struct Window {
    /// First visible line in the window
    top_line: usize,
    /// Cursor line position (0-indexed)
    cursor_line: usize,
    /// Cursor column position (byte offset within line)
    cursor_col: usize,
    /// Mark position (for region operations)
    mark: Option<Pos>,
    /// Number of text rows in window
    height: u16,
    /// Goal column for vertical movement
    goal_col: usize,
}

impl Window {
    /// Create a new window of `height` rows
    pub fn new(height: u16) -> Self {
        Self {
            top_line: 0,
            cursor_line: 0,
            cursor_col: 0,
            mark: None,
            height: height.max(1),
            goal_col: 0,
        }
    }

    /// Get the top visible line
    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Set the top visible line
    pub fn set_top_line(&mut self, line: usize) {
        self.top_line = line;
    }

    /// Get cursor line
    pub fn cursor_line(&self) -> usize {
        self.cursor_line
    }

    /// Get cursor column (byte offset)
    pub fn cursor_col(&self) -> usize {
        self.cursor_col
    }

    /// Cursor as a position
    pub fn cursor(&self) -> Pos {
        Pos::new(self.cursor_line, self.cursor_col)
    }

    /// Set cursor position
    pub fn set_cursor(&mut self, line: usize, col: usize) {
        self.cursor_line = line;
        self.cursor_col = col;
    }

    /// Get the goal column for vertical movement
    pub fn goal_col(&self) -> usize {
        self.goal_col
    }

    /// Set the goal column
    pub fn set_goal_col(&mut self, col: usize) {
        self.goal_col = col;
    }

    /// Get mark position
    pub fn mark(&self) -> Option<Pos> {
        self.mark
    }

    /// Set mark at current cursor position
    pub fn set_mark(&mut self) {
        self.mark = Some(self.cursor());
    }

    /// Set mark at an arbitrary position
    pub fn set_mark_at(&mut self, pos: Pos) {
        self.mark = Some(pos);
    }

    /// Clear the mark
    pub fn clear_mark(&mut self) {
        self.mark = None;
    }

    /// Get window height in rows
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Set window height
    pub fn set_height(&mut self, height: u16) {
        self.height = height.max(1);
    }

    /// Last visible line, given the buffer's line count
    pub fn bottom_line(&self, line_count: usize) -> usize {
        (self.top_line + self.height as usize)
            .min(line_count)
            .saturating_sub(1)
            .max(self.top_line.min(line_count.saturating_sub(1)))
    }

    /// Check if a line is visible in the window
    pub fn is_line_visible(&self, line: usize) -> bool {
        line >= self.top_line && line < self.top_line + self.height as usize
    }

    /// Ensure cursor is visible, adjusting top_line if needed
    pub fn ensure_cursor_visible(&mut self) {
        if self.cursor_line < self.top_line {
            self.top_line = self.cursor_line;
        } else if self.cursor_line >= self.top_line + self.height as usize {
            self.top_line = self.cursor_line - self.height as usize + 1;
        }
    }

    /// Put the cursor line in the middle of the window
    pub fn recenter(&mut self) {
        self.top_line = self.cursor_line.saturating_sub(self.height as usize / 2);
    }

    /// Scroll down by n lines
    pub fn scroll_down(&mut self, n: usize, max_line: usize) {
        let new_top = self.top_line.saturating_add(n);
        self.top_line = new_top.min(max_line.saturating_sub(1));
        // Move cursor to stay in view
        if self.cursor_line < self.top_line {
            self.cursor_line = self.top_line;
        }
    }

    /// Scroll up by n lines
    pub fn scroll_up(&mut self, n: usize) {
        self.top_line = self.top_line.saturating_sub(n);
        // Move cursor to stay in view
        let bottom = self.top_line + self.height as usize - 1;
        if self.cursor_line > bottom {
            self.cursor_line = bottom;
        }
    }
}
