//! Bounds of syntactic things at the cursor
//!
//! Line-local things (words, symbols, numbers, URLs...) are found on the
//! cursor line. Structural things (lists, sexps, defuns, sentences, pages)
//! are found on the whole buffer text.

use std::sync::OnceLock;

use regex::Regex;

use crate::buffer::Buffer;
use crate::region::{Pos, Region};
use crate::thing::ThingKind;

const NUMBER_PATTERN: &str = r"[-+]?(?:0[xX][0-9a-fA-F]+|\d+(?:\.\d+)?(?:[eE][-+]?\d+)?)";
const URL_PATTERN: &str = r#"(?:(?:https?|ftp|file)://|mailto:|www\.)[^\s<>"'()\[\]{}]+"#;
const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+";
const UUID_PATTERN: &str =
    r"\b[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\b";

const FORM_FEED: char = '\x0c';

/// Check if character is a word character
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Check if character can appear in a symbol name
pub fn is_symbol_char(ch: char) -> bool {
    is_word_char(ch) || "-*+/<>=$%&~^!?".contains(ch)
}

fn is_filename_char(ch: char) -> bool {
    ch.is_alphanumeric() || "-_~/.${}#%,:+".contains(ch)
}

fn is_blank_char(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

fn compiled(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

fn number_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, NUMBER_PATTERN)
}

fn url_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, URL_PATTERN)
}

fn email_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, EMAIL_PATTERN)
}

fn uuid_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, UUID_PATTERN)
}

/// Bounds of the `kind` thing at `point`.
///
/// Line, region and window are answered by the resolver itself from the
/// cursor, mark and viewport; they have no meaning here.
pub fn bounds(buffer: &Buffer, point: Pos, kind: ThingKind) -> Option<Region> {
    let line = buffer.line(point.line)?;
    let text = line.text();
    let col = point.col.min(text.len());
    let on_line = |span: Option<(usize, usize)>| span.map(|(s, e)| Region::on_line(point.line, s, e));

    match kind {
        ThingKind::Line | ThingKind::Region | ThingKind::Window => None,
        ThingKind::Word => on_line(span_around(text, col, is_word_char)),
        ThingKind::Symbol => on_line(span_around(text, col, is_symbol_char)),
        ThingKind::Whitespace => on_line(span_around(text, col, is_blank_char)),
        ThingKind::Filename => on_line(span_around(text, col, is_filename_char)),
        ThingKind::Number => on_line(regex_at(number_regex()?, text, col)),
        ThingKind::Email => on_line(regex_at(email_regex()?, text, col)),
        ThingKind::Uuid => on_line(regex_at(uuid_regex()?, text, col)),
        ThingKind::Url => on_line(url_at(text, col)),
        ThingKind::List => flat(buffer, point, enclosing_list),
        ThingKind::Sexp => sexp_at(buffer, point),
        ThingKind::Page => flat(buffer, point, page_at),
        ThingKind::Sentence => sentence_at(buffer, point),
        ThingKind::Defun => defun_at(buffer, point),
    }
}

/// Run `find` on the whole buffer text and map the offsets back
fn flat(buffer: &Buffer, point: Pos, find: fn(&str, usize) -> Option<(usize, usize)>) -> Option<Region> {
    let text = buffer.to_text();
    let offset = buffer.offset_of(point);
    let (start, end) = find(&text, offset)?;
    Some(Region::new(buffer.pos_at(start), buffer.pos_at(end)))
}

/// Maximal run of `pred` characters touching `col` (at or just before it)
fn span_around(text: &str, col: usize, pred: impl Fn(char) -> bool) -> Option<(usize, usize)> {
    if !text.is_char_boundary(col) {
        return None;
    }

    let after = text[col..].chars().next().is_some_and(&pred);
    let before = text[..col].chars().next_back().is_some_and(&pred);
    if !after && !before {
        return None;
    }

    let start = text[..col]
        .char_indices()
        .rev()
        .take_while(|(_, ch)| pred(*ch))
        .last()
        .map(|(i, _)| i)
        .unwrap_or(col);
    let end = text[col..]
        .char_indices()
        .take_while(|(_, ch)| pred(*ch))
        .last()
        .map(|(i, ch)| col + i + ch.len_utf8())
        .unwrap_or(col);

    Some((start, end))
}

/// First match of `re` that contains or touches `col`
fn regex_at(re: &Regex, text: &str, col: usize) -> Option<(usize, usize)> {
    re.find_iter(text)
        .find(|m| m.start() <= col && col <= m.end())
        .map(|m| (m.start(), m.end()))
}

/// URL at `col`, without trailing sentence punctuation
fn url_at(text: &str, col: usize) -> Option<(usize, usize)> {
    let (start, end) = regex_at(url_regex()?, text, col)?;
    let trimmed = text[start..end].trim_end_matches(|c| ".,;:!?".contains(c));
    Some((start, start + trimmed.len()))
}

fn is_open(b: u8) -> bool {
    matches!(b, b'(' | b'[' | b'{')
}

fn is_close(b: u8) -> bool {
    matches!(b, b')' | b']' | b'}')
}

/// Index of the bracket closing the one opened at `open`
fn matching_close(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if is_open(b) {
            depth += 1;
        } else if is_close(b) {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Index of the bracket opening the one closed at `close`
fn matching_open(text: &str, close: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    for i in (0..=close).rev() {
        if is_close(bytes[i]) {
            depth += 1;
        } else if is_open(bytes[i]) {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Innermost balanced list around `point` (or starting at it)
fn enclosing_list(text: &str, point: usize) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    if bytes.get(point).copied().is_some_and(is_open) {
        return matching_close(text, point).map(|close| (point, close + 1));
    }

    let mut depth = 0usize;
    for i in (0..point.min(bytes.len())).rev() {
        if is_close(bytes[i]) {
            depth += 1;
        } else if is_open(bytes[i]) {
            if depth == 0 {
                return matching_close(text, i).map(|close| (i, close + 1));
            }
            depth -= 1;
        }
    }
    None
}

/// Balanced expression starting or ending at point, else the symbol there
fn sexp_at(buffer: &Buffer, point: Pos) -> Option<Region> {
    let text = buffer.to_text();
    let offset = buffer.offset_of(point);
    let bytes = text.as_bytes();

    let span = if bytes.get(offset).copied().is_some_and(is_open) {
        matching_close(&text, offset).map(|close| (offset, close + 1))
    } else if offset > 0 && is_close(bytes[offset - 1]) {
        matching_open(&text, offset - 1).map(|open| (open, offset))
    } else {
        None
    };

    match span {
        Some((start, end)) => Some(Region::new(buffer.pos_at(start), buffer.pos_at(end))),
        None => bounds(buffer, point, ThingKind::Symbol),
    }
}

/// Form-feed delimited page around `point`
fn page_at(text: &str, point: usize) -> Option<(usize, usize)> {
    let start = text[..point].rfind(FORM_FEED).map(|i| i + 1).unwrap_or(0);
    let end = text[point..].find(FORM_FEED).map(|i| point + i).unwrap_or(text.len());
    Some((start, end))
}

/// Run of non-blank lines holding `line`
fn paragraph_lines(buffer: &Buffer, line: usize) -> Option<(usize, usize)> {
    let is_blank = |idx: usize| buffer.line(idx).map(|l| l.is_blank()).unwrap_or(true);
    if is_blank(line) {
        return None;
    }

    let mut first = line;
    while first > 0 && !is_blank(first - 1) {
        first -= 1;
    }
    let mut last = line;
    while last + 1 < buffer.line_count() && !is_blank(last + 1) {
        last += 1;
    }
    Some((first, last))
}

/// Sentence holding `point`, bounded by its paragraph
fn sentence_at(buffer: &Buffer, point: Pos) -> Option<Region> {
    let (first, last) = paragraph_lines(buffer, point.line)?;
    let text = buffer.to_text();
    let para_start = buffer.offset_of(Pos::new(first, 0));
    let para_end = buffer.offset_of(Pos::new(last, buffer.line_len(last)));
    let offset = buffer.offset_of(point);
    let para = &text[para_start..para_end];

    let mut start = 0;
    let mut end = para.trim_end().len();
    for (i, ch) in para.char_indices() {
        if !matches!(ch, '.' | '?' | '!') {
            continue;
        }
        let after = i + ch.len_utf8();
        let at_break = para[after..].chars().next().map_or(true, char::is_whitespace);
        if !at_break {
            continue;
        }
        if para_start + after >= offset {
            end = after;
            break;
        }
        start = after;
    }

    let leading = para[start..end].len() - para[start..end].trim_start().len();
    let start = start + leading;
    if start >= end {
        return None;
    }
    Some(Region::new(
        buffer.pos_at(para_start + start),
        buffer.pos_at(para_start + end),
    ))
}

/// Top-level form holding `point`: starts at a line beginning in column 0
/// and runs until its brackets balance at a line end.
fn defun_at(buffer: &Buffer, point: Pos) -> Option<Region> {
    let starts_defun = |idx: usize| {
        buffer
            .line(idx)
            .and_then(|l| l.text().chars().next())
            .is_some_and(|ch| !ch.is_whitespace() && !matches!(ch, ')' | ']' | '}'))
    };

    let first = (0..=point.line).rev().find(|&idx| starts_defun(idx))?;

    let mut depth = 0i64;
    let mut last = buffer.line_count() - 1;
    for idx in first..buffer.line_count() {
        for b in buffer.line(idx)?.text().bytes() {
            if is_open(b) {
                depth += 1;
            } else if is_close(b) {
                depth -= 1;
            }
        }
        if depth <= 0 {
            last = idx;
            break;
        }
    }

    if point.line > last {
        return None;
    }
    Some(Region::new(
        Pos::new(first, 0),
        Pos::new(last, buffer.line_len(last)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(text: &str, line: usize, col: usize, kind: ThingKind) -> Option<Region> {
        let buffer = Buffer::from_text("test", text);
        bounds(&buffer, Pos::new(line, col), kind)
    }

    fn span(region: Option<Region>, text: &str) -> Option<String> {
        let buffer = Buffer::from_text("test", text);
        region.map(|r| {
            let all = buffer.to_text();
            all[buffer.offset_of(r.start())..buffer.offset_of(r.end())].to_string()
        })
    }

    #[test]
    fn test_word() {
        let text = "hello brave_new world";
        assert_eq!(span(at(text, 0, 8, ThingKind::Word), text).as_deref(), Some("brave_new"));
        // Just past the end of a word still counts
        assert_eq!(span(at(text, 0, 5, ThingKind::Word), text).as_deref(), Some("hello"));
        assert_eq!(at("a  b", 0, 2, ThingKind::Word), None);
    }

    #[test]
    fn test_symbol() {
        let text = "(setq foo-bar! 1)";
        assert_eq!(span(at(text, 0, 8, ThingKind::Symbol), text).as_deref(), Some("foo-bar!"));
    }

    #[test]
    fn test_whitespace() {
        let text = "a \t  b";
        assert_eq!(at(text, 0, 2, ThingKind::Whitespace), Some(Region::on_line(0, 1, 5)));
    }

    #[test]
    fn test_number() {
        let text = "x = -12.5e3 + 7";
        assert_eq!(span(at(text, 0, 6, ThingKind::Number), text).as_deref(), Some("-12.5e3"));
        assert_eq!(at(text, 0, 1, ThingKind::Number), None);
    }

    #[test]
    fn test_url_email_uuid() {
        let text = "See https://example.com/a?b=1. Mail bob.smith@example.org now";
        assert_eq!(
            span(at(text, 0, 10, ThingKind::Url), text).as_deref(),
            Some("https://example.com/a?b=1")
        );
        assert_eq!(
            span(at(text, 0, 40, ThingKind::Email), text).as_deref(),
            Some("bob.smith@example.org")
        );

        let text = "id: 123e4567-e89b-12d3-a456-426614174000";
        assert_eq!(
            span(at(text, 0, 10, ThingKind::Uuid), text).as_deref(),
            Some("123e4567-e89b-12d3-a456-426614174000")
        );
        assert_eq!(at(text, 0, 0, ThingKind::Uuid), None);
    }

    #[test]
    fn test_filename() {
        let text = "open ~/src/main.rs please";
        assert_eq!(span(at(text, 0, 8, ThingKind::Filename), text).as_deref(), Some("~/src/main.rs"));
    }

    #[test]
    fn test_list() {
        let text = "(a (b c)\n   d)";
        assert_eq!(span(at(text, 0, 5, ThingKind::List), text).as_deref(), Some("(b c)"));
        assert_eq!(span(at(text, 1, 3, ThingKind::List), text).as_deref(), Some("(a (b c)\n   d)"));
        assert_eq!(at("no brackets", 0, 3, ThingKind::List), None);
    }

    #[test]
    fn test_sexp() {
        let text = "(f (g x)) sym";
        // On an opening bracket
        assert_eq!(span(at(text, 0, 3, ThingKind::Sexp), text).as_deref(), Some("(g x)"));
        // Just after a closing bracket
        assert_eq!(span(at(text, 0, 9, ThingKind::Sexp), text).as_deref(), Some("(f (g x))"));
        // Otherwise the symbol
        assert_eq!(span(at(text, 0, 11, ThingKind::Sexp), text).as_deref(), Some("sym"));
    }

    #[test]
    fn test_defun() {
        let text = "fn a() {\n    body();\n}\n\nfn b() {}";
        assert_eq!(
            span(at(text, 1, 4, ThingKind::Defun), text).as_deref(),
            Some("fn a() {\n    body();\n}")
        );
        assert_eq!(span(at(text, 4, 0, ThingKind::Defun), text).as_deref(), Some("fn b() {}"));
        assert_eq!(at(text, 3, 0, ThingKind::Defun), None);
    }

    #[test]
    fn test_sentence() {
        let text = "First one. Second\nspans lines! Third\n\nNext para.";
        assert_eq!(span(at(text, 0, 2, ThingKind::Sentence), text).as_deref(), Some("First one."));
        assert_eq!(
            span(at(text, 1, 2, ThingKind::Sentence), text).as_deref(),
            Some("Second\nspans lines!")
        );
        assert_eq!(span(at(text, 1, 15, ThingKind::Sentence), text).as_deref(), Some("Third"));
        assert_eq!(at(text, 2, 0, ThingKind::Sentence), None);
    }

    #[test]
    fn test_page() {
        let text = "one\n\x0c\ntwo\nthree\n\x0c\nfour";
        assert_eq!(span(at(text, 2, 1, ThingKind::Page), text).as_deref(), Some("\ntwo\nthree\n"));
        assert_eq!(span(at("solo", 0, 1, ThingKind::Page), "solo").as_deref(), Some("solo"));
    }

    #[test]
    fn test_resolver_kinds_not_answered_here() {
        assert_eq!(at("text", 0, 0, ThingKind::Line), None);
        assert_eq!(at("text", 0, 0, ThingKind::Region), None);
        assert_eq!(at("text", 0, 0, ThingKind::Window), None);
    }
}
