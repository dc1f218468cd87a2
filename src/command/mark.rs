//! Mark commands - setting and moving the mark

use crate::editor::Editor;
use crate::error::Result;
use super::CommandStatus;
use super::navigation::forward_word;

/// Set mark at current position
pub fn set_mark(editor: &mut Editor, _f: bool, _n: i32) -> Result<CommandStatus> {
    editor.window_mut().set_mark();
    tracing::debug!(at = %editor.window().cursor(), "mark set");
    Ok(CommandStatus::Success)
}

/// Exchange point and mark
pub fn exchange_point_and_mark(editor: &mut Editor, _f: bool, _n: i32) -> Result<CommandStatus> {
    let cursor = editor.window().cursor();

    if let Some(mark) = editor.window().mark() {
        // Set cursor to mark position
        editor.goto(mark);
        // Set mark to old cursor position
        editor.window_mut().set_mark_at(cursor);
        Ok(CommandStatus::Success)
    } else {
        tracing::debug!("no mark set");
        Ok(CommandStatus::Failure)
    }
}

/// Mark paragraph
pub fn mark_paragraph(editor: &mut Editor, _f: bool, _n: i32) -> Result<CommandStatus> {
    // Move to beginning of paragraph
    editor.backward_paragraph();

    // Set mark at paragraph start
    editor.window_mut().set_mark();

    // Move to end of paragraph
    editor.forward_paragraph();

    Ok(CommandStatus::Success)
}

/// Mark word
pub fn mark_word(editor: &mut Editor, _f: bool, n: i32) -> Result<CommandStatus> {
    // Set mark at current position
    editor.window_mut().set_mark();

    // Move forward by n words
    forward_word(editor, false, n)
}

/// Mark whole buffer - select entire buffer
pub fn mark_whole_buffer(editor: &mut Editor, _f: bool, _n: i32) -> Result<CommandStatus> {
    // Set mark at end
    let end = editor.buffer().end_pos();
    editor.window_mut().set_mark_at(end);

    // Move to beginning of buffer
    editor.move_to_buffer_start();

    Ok(CommandStatus::Success)
}

/// Deactivate the mark
pub fn keyboard_quit(editor: &mut Editor, _f: bool, _n: i32) -> Result<CommandStatus> {
    editor.window_mut().clear_mark();
    Ok(CommandStatus::Abort)
}

#[cfg(test)]
mod tests {
    use crate::command::CommandStatus;
    use crate::editor::Editor;
    use crate::region::{Pos, Region};
    use crate::host::EditorContext;

    #[test]
    fn test_mark_whole_buffer() {
        let mut editor = Editor::from_text("ab\ncd\nef");
        editor.execute_command("goto-line", 2).unwrap();
        editor.execute_command("mark-whole-buffer", 1).unwrap();
        assert_eq!(editor.window().cursor(), Pos::new(0, 0));
        assert_eq!(
            editor.selection(),
            Some(Region::new(Pos::new(0, 0), Pos::new(2, 2)))
        );
    }

    #[test]
    fn test_exchange_point_and_mark() {
        let mut editor = Editor::from_text("hello world");
        assert_eq!(
            editor.execute_command("exchange-point-and-mark", 1).unwrap(),
            CommandStatus::Failure
        );

        editor.execute_command("set-mark-command", 1).unwrap();
        editor.execute_command("end-of-line", 1).unwrap();
        editor.execute_command("exchange-point-and-mark", 1).unwrap();
        assert_eq!(editor.window().cursor(), Pos::new(0, 0));
        assert_eq!(editor.window().mark(), Some(Pos::new(0, 11)));
    }

    #[test]
    fn test_mark_word_and_quit() {
        let mut editor = Editor::from_text("alpha beta");
        editor.execute_command("mark-word", 1).unwrap();
        assert_eq!(editor.selection(), Some(Region::on_line(0, 0, 6)));

        let status = editor.execute_command("keyboard-quit", 1).unwrap();
        assert_eq!(status, CommandStatus::Abort);
        assert_eq!(editor.selection(), None);
    }

    #[test]
    fn test_mark_paragraph() {
        let mut editor = Editor::from_text("a\nb\n\nc");
        editor.execute_command("next-line", 1).unwrap();
        editor.execute_command("mark-paragraph", 1).unwrap();
        assert_eq!(editor.window().mark(), Some(Pos::new(0, 0)));
        assert_eq!(editor.window().cursor(), Pos::new(2, 0));
    }
}
