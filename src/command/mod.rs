//! Command dispatch system
//!
//! This module provides the named command table and the command
//! implementations. Commands are organized into submodules by category.

mod mark;
mod navigation;

use std::collections::HashMap;

use crate::editor::Editor;
use crate::error::Result;

/// Command result status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure,
    Abort,
}

/// Command function signature
/// - editor: mutable reference to editor state
/// - f: true if numeric argument was provided
/// - n: numeric argument (repeat count, default 1)
pub type CommandFn = fn(&mut Editor, bool, i32) -> Result<CommandStatus>;

/// A named command
pub struct Command {
    pub name: &'static str,
    pub function: CommandFn,
}

/// Command table, indexed by name
pub struct CommandTable {
    commands: HashMap<&'static str, CommandFn>,
}

impl CommandTable {
    /// Create an empty command table
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Create command table with the default commands
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.setup_defaults();
        table
    }

    /// Define a command, replacing any previous definition
    pub fn define(&mut self, name: &'static str, function: CommandFn) {
        self.commands.insert(name, function);
    }

    /// Remove a command
    pub fn undefine(&mut self, name: &str) {
        self.commands.remove(name);
    }

    /// Look up a command by name
    pub fn lookup(&self, name: &str) -> Option<CommandFn> {
        self.commands.get(name).copied()
    }

    /// Get all command names (sorted)
    pub fn command_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.commands.keys().copied().collect();
        names.sort();
        names
    }

    /// Set up the default commands
    fn setup_defaults(&mut self) {
        for command in default_commands() {
            self.define(command.name, command.function);
        }
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Every built-in command
pub fn default_commands() -> Vec<Command> {
    macro_rules! cmd {
        ($name:expr, $function:path) => {
            Command {
                name: $name,
                function: $function,
            }
        };
    }

    vec![
        // Cursor movement
        cmd!("forward-char", navigation::forward_char),
        cmd!("backward-char", navigation::backward_char),
        cmd!("next-line", navigation::next_line),
        cmd!("previous-line", navigation::previous_line),
        cmd!("beginning-of-line", navigation::beginning_of_line),
        cmd!("end-of-line", navigation::end_of_line),
        cmd!("back-to-indentation", navigation::back_to_indentation),
        cmd!("forward-word", navigation::forward_word),
        cmd!("backward-word", navigation::backward_word),
        cmd!("forward-paragraph", navigation::forward_paragraph),
        cmd!("backward-paragraph", navigation::backward_paragraph),
        cmd!("beginning-of-buffer", navigation::beginning_of_buffer),
        cmd!("end-of-buffer", navigation::end_of_buffer),
        cmd!("goto-line", navigation::goto_line),
        // Scrolling
        cmd!("scroll-up", navigation::scroll_up),
        cmd!("scroll-down", navigation::scroll_down),
        cmd!("recenter", navigation::recenter),
        // Mark
        cmd!("set-mark-command", mark::set_mark),
        cmd!("exchange-point-and-mark", mark::exchange_point_and_mark),
        cmd!("mark-word", mark::mark_word),
        cmd!("mark-paragraph", mark::mark_paragraph),
        cmd!("mark-whole-buffer", mark::mark_whole_buffer),
        cmd!("keyboard-quit", mark::keyboard_quit),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_defined() {
        let table = CommandTable::with_defaults();
        for name in ["next-line", "recenter", "mark-whole-buffer", "keyboard-quit"] {
            assert!(table.lookup(name).is_some(), "{name} missing");
        }
        assert!(table.lookup("self-destruct").is_none());
    }

    #[test]
    fn test_names_sorted() {
        let table = CommandTable::with_defaults();
        let names = table.command_names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), default_commands().len());
    }

    #[test]
    fn test_define_and_undefine() {
        fn nothing(_: &mut Editor, _f: bool, _n: i32) -> Result<CommandStatus> {
            Ok(CommandStatus::Success)
        }

        let mut table = CommandTable::new();
        table.define("nothing", nothing);
        assert_eq!(table.command_names(), vec!["nothing"]);
        table.undefine("nothing");
        assert!(table.lookup("nothing").is_none());
    }
}
