//! Editor state - the built-in host
//!
//! A single buffer shown in a single window, a table of named commands,
//! after-hooks on those commands, overlays, and timers driven by a virtual
//! clock. `Editor` implements every host capability the highlight engine
//! consumes.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::at_point;
use crate::buffer::Buffer;
use crate::command::{CommandFn, CommandStatus, CommandTable};
use crate::error::{FlashError, Result};
use crate::face::Face;
use crate::host::{
    AfterHook, EditorContext, HookId, InterceptionHost, OverlayHost, OverlayId, TimerCallback,
    TimerHost, TimerId,
};
use crate::region::{Pos, Region};
use crate::thing::ThingKind;
use crate::window::Window;

/// Default window height when none is given
pub const DEFAULT_HEIGHT: u16 = 24;

/// A displayed overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub id: OverlayId,
    pub region: Region,
    pub face: Face,
}

/// A timer waiting for the clock to reach `due`
struct PendingTimer {
    id: TimerId,
    due: Duration,
    callback: TimerCallback,
}

/// Main editor state
pub struct Editor {
    /// The buffer being edited
    buffer: Buffer,
    /// The window showing it
    window: Window,
    /// Named commands
    commands: CommandTable,
    /// After-hooks per command name, in installation order
    hooks: HashMap<String, Vec<(HookId, AfterHook)>>,
    /// Displayed overlays
    overlays: Vec<Overlay>,
    /// Pending timers, in scheduling order
    timers: Vec<PendingTimer>,
    /// Virtual time since the editor was created
    clock: Duration,
    next_id: u64,
}

impl Editor {
    /// Create an editor showing `buffer` in a window of `height` rows
    pub fn new(buffer: Buffer, height: u16) -> Self {
        Self {
            buffer,
            window: Window::new(height),
            commands: CommandTable::with_defaults(),
            hooks: HashMap::new(),
            overlays: Vec::new(),
            timers: Vec::new(),
            clock: Duration::ZERO,
            next_id: 1,
        }
    }

    /// Create an editor on a scratch buffer holding `text`
    pub fn from_text(text: &str) -> Self {
        Self::with_height(text, DEFAULT_HEIGHT)
    }

    pub fn with_height(text: &str, height: u16) -> Self {
        Self::new(Buffer::from_text("*scratch*", text), height)
    }

    /// Open a file in a new editor
    pub fn open(path: &Path, height: u16) -> Result<Self> {
        Ok(Self::new(Buffer::from_file(path)?, height))
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    /// Define (or redefine) a named command
    pub fn define_command(&mut self, name: &'static str, function: CommandFn) {
        self.commands.define(name, function);
    }

    /// Remove a command; hooks on it stay installed but never run
    pub fn undefine_command(&mut self, name: &str) {
        self.commands.undefine(name);
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.commands.lookup(name).is_some()
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.commands.command_names()
    }

    /// Run a command by name.
    ///
    /// Timers that came due since the last event run first. After-hooks
    /// for the command run only if it succeeded.
    pub fn execute_command(&mut self, name: &str, n: i32) -> Result<CommandStatus> {
        self.run_due_timers();

        let function = self
            .commands
            .lookup(name)
            .ok_or_else(|| FlashError::UnknownCommand(name.to_string()))?;
        let status = function(self, n != 1, n)?;
        tracing::trace!(command = name, ?status, "command executed");

        if status == CommandStatus::Success {
            let hooks: Vec<AfterHook> = self
                .hooks
                .get(name)
                .map(|hooks| hooks.iter().map(|(_, hook)| hook.clone()).collect())
                .unwrap_or_default();
            for hook in hooks {
                hook(self);
            }
        }

        Ok(status)
    }

    /// Number of after-hooks installed on `name`
    pub fn hook_count(&self, name: &str) -> usize {
        self.hooks.get(name).map(Vec::len).unwrap_or(0)
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Move the clock forward and run every timer that comes due
    pub fn advance(&mut self, by: Duration) {
        self.clock = self.clock.saturating_add(by);
        self.run_due_timers();
    }

    /// Run due timers, earliest first; ties run in scheduling order
    pub fn run_due_timers(&mut self) {
        loop {
            let next = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, timer)| timer.due <= self.clock)
                .min_by_key(|(idx, timer)| (timer.due, *idx))
                .map(|(idx, _)| idx);

            let Some(idx) = next else { break };
            let timer = self.timers.remove(idx);
            tracing::trace!(timer = timer.id.0, "timer fired");
            (timer.callback)(self);
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Ensure cursor is visible, scrolling if needed
    pub fn ensure_cursor_visible(&mut self) {
        self.window.ensure_cursor_visible();
    }

    /// Convert display column to byte offset in a line
    fn col_to_byte_in_line(&self, line_idx: usize, display_col: usize) -> usize {
        if let Some(line) = self.buffer.line(line_idx) {
            line.col_to_byte(display_col).unwrap_or(line.len())
        } else {
            0
        }
    }

    /// Move cursor right
    pub fn move_cursor_right(&mut self) {
        let cursor_line = self.window.cursor_line();
        let cursor_col = self.window.cursor_col();

        if let Some(line) = self.buffer.line(cursor_line) {
            if cursor_col < line.len() {
                if let Some(ch) = line.text()[cursor_col..].chars().next() {
                    self.window.set_cursor(cursor_line, cursor_col + ch.len_utf8());
                }
            } else if cursor_line + 1 < self.buffer.line_count() {
                self.window.set_cursor(cursor_line + 1, 0);
            }
        }

        self.sync_goal_col();
        self.ensure_cursor_visible();
    }

    /// Move cursor left
    pub fn move_cursor_left(&mut self) {
        let cursor_line = self.window.cursor_line();
        let cursor_col = self.window.cursor_col();

        if cursor_col > 0 {
            if let Some(line) = self.buffer.line(cursor_line) {
                if let Some(ch) = line.text()[..cursor_col].chars().next_back() {
                    self.window.set_cursor(cursor_line, cursor_col - ch.len_utf8());
                }
            }
        } else if cursor_line > 0 {
            let prev_line_len = self.buffer.line_len(cursor_line - 1);
            self.window.set_cursor(cursor_line - 1, prev_line_len);
        }

        self.sync_goal_col();
        self.ensure_cursor_visible();
    }

    /// Move cursor down, keeping the goal column
    pub fn move_cursor_down(&mut self) {
        let cursor_line = self.window.cursor_line();
        if cursor_line + 1 < self.buffer.line_count() {
            let new_col = self.col_to_byte_in_line(cursor_line + 1, self.window.goal_col());
            self.window.set_cursor(cursor_line + 1, new_col);
        }
        self.ensure_cursor_visible();
    }

    /// Move cursor up, keeping the goal column
    pub fn move_cursor_up(&mut self) {
        let cursor_line = self.window.cursor_line();
        if cursor_line > 0 {
            let new_col = self.col_to_byte_in_line(cursor_line - 1, self.window.goal_col());
            self.window.set_cursor(cursor_line - 1, new_col);
        }
        self.ensure_cursor_visible();
    }

    /// Move to beginning of line
    pub fn move_to_bol(&mut self) {
        let cursor_line = self.window.cursor_line();
        self.window.set_cursor(cursor_line, 0);
        self.window.set_goal_col(0);
    }

    /// Move to end of line
    pub fn move_to_eol(&mut self) {
        let cursor_line = self.window.cursor_line();
        self.window.set_cursor(cursor_line, self.buffer.line_len(cursor_line));
        self.sync_goal_col();
    }

    /// Move to an arbitrary position, clamped to the buffer
    pub fn goto(&mut self, pos: Pos) {
        let line = pos.line.min(self.buffer.line_count().saturating_sub(1));
        let col = pos.col.min(self.buffer.line_len(line));
        self.window.set_cursor(line, col);
        self.sync_goal_col();
        self.ensure_cursor_visible();
    }

    /// Page down
    pub fn page_down(&mut self) {
        let height = self.window.height() as usize;
        let max_line = self.buffer.line_count();
        self.window.scroll_down(height.saturating_sub(2).max(1), max_line);
        self.cursor_to_top_of_view();
    }

    /// Page up
    pub fn page_up(&mut self) {
        let height = self.window.height() as usize;
        self.window.scroll_up(height.saturating_sub(2).max(1));
        self.cursor_to_top_of_view();
    }

    fn cursor_to_top_of_view(&mut self) {
        let new_cursor = self.window.top_line();
        let new_col = self.col_to_byte_in_line(new_cursor, self.window.goal_col());
        self.window.set_cursor(new_cursor, new_col);
    }

    /// Move to beginning of buffer
    pub fn move_to_buffer_start(&mut self) {
        self.window.set_cursor(0, 0);
        self.window.set_top_line(0);
        self.window.set_goal_col(0);
    }

    /// Move to end of buffer
    pub fn move_to_buffer_end(&mut self) {
        self.goto(self.buffer.end_pos());
    }

    /// Check if a line is blank (empty or only whitespace)
    pub fn is_blank_line(&self, line_idx: usize) -> bool {
        self.buffer.line(line_idx).map(|l| l.is_blank()).unwrap_or(true)
    }

    /// Move backward to start of paragraph
    pub fn backward_paragraph(&mut self) {
        let mut line = self.window.cursor_line();

        // If on a non-blank line, first skip to a blank line
        while line > 0 && !self.is_blank_line(line) {
            line -= 1;
        }

        // Then skip over blank lines
        while line > 0 && self.is_blank_line(line) {
            line -= 1;
        }

        // Then find the start of this paragraph
        while line > 0 && !self.is_blank_line(line - 1) {
            line -= 1;
        }

        self.window.set_cursor(line, 0);
        self.window.set_goal_col(0);
        self.ensure_cursor_visible();
    }

    /// Move forward to end of paragraph
    pub fn forward_paragraph(&mut self) {
        let mut line = self.window.cursor_line();
        let line_count = self.buffer.line_count();

        // Skip over blank lines first
        while line < line_count && self.is_blank_line(line) {
            line += 1;
        }

        // Then skip over the paragraph content
        while line < line_count && !self.is_blank_line(line) {
            line += 1;
        }

        let final_line = line.min(line_count.saturating_sub(1));
        self.window.set_cursor(final_line, 0);
        self.window.set_goal_col(0);
        self.ensure_cursor_visible();
    }

    fn sync_goal_col(&mut self) {
        let col = self
            .buffer
            .line(self.window.cursor_line())
            .map(|l| l.byte_to_col(self.window.cursor_col()))
            .unwrap_or(0);
        self.window.set_goal_col(col);
    }
}

impl EditorContext for Editor {
    fn selection(&self) -> Option<Region> {
        let mark = self.window.mark()?;
        Some(Region::from_mark_and_cursor(mark, self.window.cursor()))
    }

    fn visible_range(&self) -> Region {
        let top = self.window.top_line().min(self.buffer.line_count().saturating_sub(1));
        let bottom = self.window.bottom_line(self.buffer.line_count());
        Region::new(Pos::new(top, 0), Pos::new(bottom, self.buffer.line_len(bottom)))
    }

    fn current_line(&self) -> (usize, &str) {
        let idx = self.window.cursor_line();
        let text = self.buffer.line(idx).map(|l| l.text()).unwrap_or("");
        (idx, text)
    }

    fn bounds_of_thing_at_point(&self, kind: ThingKind) -> Option<Region> {
        at_point::bounds(&self.buffer, self.window.cursor(), kind)
    }
}

impl OverlayHost for Editor {
    fn add_overlay(&mut self, region: Region, face: &Face) -> OverlayId {
        let id = OverlayId(self.next_id());
        self.overlays.push(Overlay {
            id,
            region,
            face: face.clone(),
        });
        id
    }

    fn remove_overlay(&mut self, id: OverlayId) {
        self.overlays.retain(|overlay| overlay.id != id);
    }
}

impl TimerHost for Editor {
    fn schedule(&mut self, after: Duration, callback: TimerCallback) -> TimerId {
        let id = TimerId(self.next_id());
        self.timers.push(PendingTimer {
            id,
            due: self.clock.saturating_add(after),
            callback,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|timer| timer.id != id);
    }
}

impl InterceptionHost for Editor {
    fn is_callable(&self, name: &str) -> bool {
        self.has_command(name)
    }

    fn add_after_hook(&mut self, name: &str, hook: AfterHook) -> HookId {
        let id = HookId(self.next_id());
        self.hooks.entry(name.to_string()).or_default().push((id, hook));
        id
    }

    fn remove_after_hook(&mut self, name: &str, id: HookId) {
        if let Some(hooks) = self.hooks.get_mut(name) {
            hooks.retain(|(hook_id, _)| *hook_id != id);
            if hooks.is_empty() {
                self.hooks.remove(name);
            }
        }
    }
}
