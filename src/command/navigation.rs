//! Navigation commands - cursor movement and scrolling

use crate::at_point::is_word_char;
use crate::editor::Editor;
use crate::error::Result;
use crate::region::Pos;
use super::CommandStatus;

/// Move cursor forward one character
pub fn forward_char(editor: &mut Editor, _f: bool, n: i32) -> Result<CommandStatus> {
    for _ in 0..n.unsigned_abs() {
        if n > 0 {
            editor.move_cursor_right();
        } else {
            editor.move_cursor_left();
        }
    }
    Ok(CommandStatus::Success)
}

/// Move cursor backward one character
pub fn backward_char(editor: &mut Editor, _f: bool, n: i32) -> Result<CommandStatus> {
    for _ in 0..n.unsigned_abs() {
        if n > 0 {
            editor.move_cursor_left();
        } else {
            editor.move_cursor_right();
        }
    }
    Ok(CommandStatus::Success)
}

/// Move cursor to next line
pub fn next_line(editor: &mut Editor, _f: bool, n: i32) -> Result<CommandStatus> {
    for _ in 0..n.unsigned_abs() {
        if n > 0 {
            editor.move_cursor_down();
        } else {
            editor.move_cursor_up();
        }
    }
    Ok(CommandStatus::Success)
}

/// Move cursor to previous line
pub fn previous_line(editor: &mut Editor, _f: bool, n: i32) -> Result<CommandStatus> {
    for _ in 0..n.unsigned_abs() {
        if n > 0 {
            editor.move_cursor_up();
        } else {
            editor.move_cursor_down();
        }
    }
    Ok(CommandStatus::Success)
}

/// Move cursor to beginning of line
pub fn beginning_of_line(editor: &mut Editor, _f: bool, _n: i32) -> Result<CommandStatus> {
    editor.move_to_bol();
    Ok(CommandStatus::Success)
}

/// Move cursor to end of line
pub fn end_of_line(editor: &mut Editor, _f: bool, _n: i32) -> Result<CommandStatus> {
    editor.move_to_eol();
    Ok(CommandStatus::Success)
}

/// Move cursor to first non-whitespace character on line
pub fn back_to_indentation(editor: &mut Editor, _f: bool, _n: i32) -> Result<CommandStatus> {
    let cursor_line = editor.window().cursor_line();

    if let Some(line) = editor.buffer().line(cursor_line) {
        let text = line.text();
        let col = text
            .char_indices()
            .find(|(_, ch)| !ch.is_whitespace())
            .map(|(pos, _)| pos)
            .unwrap_or(text.len());

        editor.goto(Pos::new(cursor_line, col));
    }

    Ok(CommandStatus::Success)
}

/// Scroll down (forward) one page
pub fn scroll_up(editor: &mut Editor, _f: bool, n: i32) -> Result<CommandStatus> {
    for _ in 0..n.unsigned_abs() {
        if n > 0 {
            editor.page_down();
        } else {
            editor.page_up();
        }
    }
    Ok(CommandStatus::Success)
}

/// Scroll up (backward) one page
pub fn scroll_down(editor: &mut Editor, _f: bool, n: i32) -> Result<CommandStatus> {
    for _ in 0..n.unsigned_abs() {
        if n > 0 {
            editor.page_up();
        } else {
            editor.page_down();
        }
    }
    Ok(CommandStatus::Success)
}

/// Recenter the window around the cursor, or put the cursor on row n
pub fn recenter(editor: &mut Editor, f: bool, n: i32) -> Result<CommandStatus> {
    let cursor_line = editor.window().cursor_line();

    if f {
        let new_top = cursor_line.saturating_sub(n.saturating_sub(1).max(0) as usize);
        editor.window_mut().set_top_line(new_top);
    } else {
        editor.window_mut().recenter();
    }
    Ok(CommandStatus::Success)
}

/// Move to beginning of buffer
pub fn beginning_of_buffer(editor: &mut Editor, _f: bool, _n: i32) -> Result<CommandStatus> {
    editor.move_to_buffer_start();
    Ok(CommandStatus::Success)
}

/// Move to end of buffer
pub fn end_of_buffer(editor: &mut Editor, _f: bool, _n: i32) -> Result<CommandStatus> {
    editor.move_to_buffer_end();
    Ok(CommandStatus::Success)
}

/// Go to line n (1-based)
pub fn goto_line(editor: &mut Editor, _f: bool, n: i32) -> Result<CommandStatus> {
    if n < 1 {
        return Ok(CommandStatus::Failure);
    }
    editor.goto(Pos::new(n as usize - 1, 0));
    Ok(CommandStatus::Success)
}

/// Move forward to start of the next word
pub fn forward_word(editor: &mut Editor, _f: bool, n: i32) -> Result<CommandStatus> {
    if n < 0 {
        return backward_word(editor, false, n.saturating_neg());
    }

    for _ in 0..n.max(1) {
        let mut cursor_line = editor.window().cursor_line();
        let mut cursor_col = editor.window().cursor_col();
        let line_count = editor.buffer().line_count();

        // Skip word characters first (if in a word)
        while let Some(ch) = char_after(editor, cursor_line, cursor_col) {
            if !is_word_char(ch) {
                break;
            }
            cursor_col += ch.len_utf8();
        }

        // Skip non-word characters to find next word
        loop {
            match char_after(editor, cursor_line, cursor_col) {
                Some(ch) if is_word_char(ch) => break,
                Some(ch) => cursor_col += ch.len_utf8(),
                // End of line - move to next line
                None if cursor_line + 1 < line_count => {
                    cursor_line += 1;
                    cursor_col = 0;
                }
                None => break,
            }
        }

        let pos = Pos::new(cursor_line, cursor_col);
        if pos == editor.window().cursor() {
            // At the buffer edge
            break;
        }
        editor.goto(pos);
    }

    Ok(CommandStatus::Success)
}

/// Move backward to start of word
pub fn backward_word(editor: &mut Editor, _f: bool, n: i32) -> Result<CommandStatus> {
    if n < 0 {
        return forward_word(editor, false, n.saturating_neg());
    }

    for _ in 0..n.max(1) {
        let mut cursor_line = editor.window().cursor_line();
        let mut cursor_col = editor.window().cursor_col();

        // Skip non-word characters backward
        loop {
            match char_before(editor, cursor_line, cursor_col) {
                Some(ch) if is_word_char(ch) => break,
                Some(ch) => cursor_col -= ch.len_utf8(),
                None if cursor_line > 0 => {
                    cursor_line -= 1;
                    cursor_col = editor.buffer().line_len(cursor_line);
                }
                None => break,
            }
        }

        // Skip word characters backward to find start of word
        while let Some(ch) = char_before(editor, cursor_line, cursor_col) {
            if !is_word_char(ch) {
                break;
            }
            cursor_col -= ch.len_utf8();
        }

        let pos = Pos::new(cursor_line, cursor_col);
        if pos == editor.window().cursor() {
            // At the buffer edge
            break;
        }
        editor.goto(pos);
    }

    Ok(CommandStatus::Success)
}

/// Move backward to start of paragraph
pub fn backward_paragraph(editor: &mut Editor, _f: bool, n: i32) -> Result<CommandStatus> {
    for _ in 0..n.unsigned_abs().max(1) {
        if n >= 0 {
            editor.backward_paragraph();
        } else {
            editor.forward_paragraph();
        }
    }
    Ok(CommandStatus::Success)
}

/// Move forward to end of paragraph
pub fn forward_paragraph(editor: &mut Editor, _f: bool, n: i32) -> Result<CommandStatus> {
    for _ in 0..n.unsigned_abs().max(1) {
        if n >= 0 {
            editor.forward_paragraph();
        } else {
            editor.backward_paragraph();
        }
    }
    Ok(CommandStatus::Success)
}

fn char_after(editor: &Editor, line: usize, col: usize) -> Option<char> {
    editor.buffer().line(line)?.text().get(col..)?.chars().next()
}

fn char_before(editor: &Editor, line: usize, col: usize) -> Option<char> {
    editor.buffer().line(line)?.text().get(..col)?.chars().next_back()
}

#[cfg(test)]
mod tests {
    use crate::editor::Editor;
    use crate::region::Pos;

    #[test]
    fn test_forward_and_backward_word() {
        let mut editor = Editor::from_text("one two\nthree");
        editor.execute_command("forward-word", 1).unwrap();
        assert_eq!(editor.window().cursor(), Pos::new(0, 4));
        editor.execute_command("forward-word", 1).unwrap();
        assert_eq!(editor.window().cursor(), Pos::new(1, 0));
        editor.execute_command("backward-word", 2).unwrap();
        assert_eq!(editor.window().cursor(), Pos::new(0, 0));
    }

    #[test]
    fn test_goal_column_survives_short_line() {
        let mut editor = Editor::from_text("abcdef\nab\nabcdef");
        editor.execute_command("end-of-line", 1).unwrap();
        editor.execute_command("next-line", 1).unwrap();
        assert_eq!(editor.window().cursor(), Pos::new(1, 2));
        editor.execute_command("next-line", 1).unwrap();
        assert_eq!(editor.window().cursor(), Pos::new(2, 6));
    }

    #[test]
    fn test_paragraph_motion() {
        let mut editor = Editor::from_text("a\nb\n\nc\nd");
        editor.execute_command("forward-paragraph", 1).unwrap();
        assert_eq!(editor.window().cursor_line(), 2);
        editor.execute_command("forward-paragraph", 1).unwrap();
        assert_eq!(editor.window().cursor_line(), 4);
        editor.execute_command("backward-paragraph", 1).unwrap();
        assert_eq!(editor.window().cursor_line(), 0);
    }

    #[test]
    fn test_goto_line_and_buffer_ends() {
        let mut editor = Editor::from_text("a\nbb\nccc");
        editor.execute_command("goto-line", 2).unwrap();
        assert_eq!(editor.window().cursor(), Pos::new(1, 0));
        editor.execute_command("goto-line", 99).unwrap();
        assert_eq!(editor.window().cursor(), Pos::new(2, 0));
        editor.execute_command("beginning-of-buffer", 1).unwrap();
        assert_eq!(editor.window().cursor(), Pos::new(0, 0));
        editor.execute_command("end-of-buffer", 1).unwrap();
        assert_eq!(editor.window().cursor(), Pos::new(2, 3));
    }

    #[test]
    fn test_scroll_and_recenter() {
        let text: String = (0..40).map(|i| format!("line {i}\n")).collect();
        let mut editor = Editor::with_height(&text, 10);

        editor.execute_command("scroll-up", 1).unwrap();
        assert_eq!(editor.window().top_line(), 8);
        assert_eq!(editor.window().cursor_line(), 8);

        editor.execute_command("scroll-down", 1).unwrap();
        assert_eq!(editor.window().top_line(), 0);

        editor.execute_command("goto-line", 21).unwrap();
        editor.execute_command("recenter", 1).unwrap();
        assert_eq!(editor.window().top_line(), 15);
    }

    #[test]
    fn test_extreme_counts() {
        let text: String = (0..40).map(|i| format!("word{i}\n")).collect();
        let mut editor = Editor::with_height(&text, 10);

        editor.execute_command("goto-line", 21).unwrap();
        editor.execute_command("recenter", i32::MIN).unwrap();
        assert_eq!(editor.window().top_line(), 20);

        let status = editor.execute_command("goto-line", i32::MIN).unwrap();
        assert_eq!(status, crate::command::CommandStatus::Failure);

        editor.execute_command("forward-word", i32::MIN).unwrap();
        assert_eq!(editor.window().cursor(), Pos::new(0, 0));
        editor.execute_command("backward-word", i32::MIN).unwrap();
        assert_eq!(editor.window().cursor(), Pos::new(39, 6));
    }
}
