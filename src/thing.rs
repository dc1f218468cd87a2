//! Thing descriptors and region resolution
//!
//! A thing says *what* to highlight when a trigger fires: one of the named
//! syntactic categories, or a caller-supplied function producing a region.
//! [`resolve`] turns a descriptor into concrete bounds using the editor
//! context, or reports that there is nothing to highlight.

use std::fmt;
use std::num::NonZeroUsize;
use std::rc::Rc;

use crate::host::EditorContext;
use crate::region::{Pos, Region};

/// Named syntactic categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThingKind {
    Line,
    Region,
    Window,
    Symbol,
    List,
    Sexp,
    Defun,
    Number,
    Filename,
    Url,
    Email,
    Uuid,
    Word,
    Sentence,
    Whitespace,
    Page,
}

impl ThingKind {
    pub const ALL: [ThingKind; 16] = [
        ThingKind::Line,
        ThingKind::Region,
        ThingKind::Window,
        ThingKind::Symbol,
        ThingKind::List,
        ThingKind::Sexp,
        ThingKind::Defun,
        ThingKind::Number,
        ThingKind::Filename,
        ThingKind::Url,
        ThingKind::Email,
        ThingKind::Uuid,
        ThingKind::Word,
        ThingKind::Sentence,
        ThingKind::Whitespace,
        ThingKind::Page,
    ];

    /// Get the configuration name for this category
    pub fn name(&self) -> &'static str {
        match self {
            ThingKind::Line => "line",
            ThingKind::Region => "region",
            ThingKind::Window => "window",
            ThingKind::Symbol => "symbol",
            ThingKind::List => "list",
            ThingKind::Sexp => "sexp",
            ThingKind::Defun => "defun",
            ThingKind::Number => "number",
            ThingKind::Filename => "filename",
            ThingKind::Url => "url",
            ThingKind::Email => "email",
            ThingKind::Uuid => "uuid",
            ThingKind::Word => "word",
            ThingKind::Sentence => "sentence",
            ThingKind::Whitespace => "whitespace",
            ThingKind::Page => "page",
        }
    }

    /// Parse a category from its configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for ThingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Caller-supplied region producer, invoked with no arguments
pub type CustomThing = Rc<dyn Fn() -> Option<Region>>;

/// What a trigger highlights
#[derive(Clone)]
pub enum Thing {
    Named(ThingKind),
    Custom(CustomThing),
}

impl Thing {
    pub fn custom(f: impl Fn() -> Option<Region> + 'static) -> Self {
        Thing::Custom(Rc::new(f))
    }

    /// The named category, if this is not a custom producer
    pub fn kind(&self) -> Option<ThingKind> {
        match self {
            Thing::Named(kind) => Some(*kind),
            Thing::Custom(_) => None,
        }
    }
}

impl From<ThingKind> for Thing {
    fn from(kind: ThingKind) -> Self {
        Thing::Named(kind)
    }
}

impl fmt::Debug for Thing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Thing::Named(kind) => write!(f, "Named({})", kind),
            Thing::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Resolve a thing to a region in the current editor context.
///
/// `width` only applies to [`ThingKind::Line`] and counts characters from
/// the start of the line.
pub fn resolve<C>(thing: &Thing, width: Option<NonZeroUsize>, ctx: &C) -> Option<Region>
where
    C: EditorContext + ?Sized,
{
    let kind = match thing {
        Thing::Custom(produce) => return produce(),
        Thing::Named(kind) => *kind,
    };

    match kind {
        ThingKind::Region => ctx.selection(),
        ThingKind::Line => {
            let (line_idx, text) = ctx.current_line();
            line_region(line_idx, text, width)
        }
        ThingKind::Window => Some(ctx.visible_range()),
        _ => ctx.bounds_of_thing_at_point(kind),
    }
}

/// Region for a line, or None when the line is blank
fn line_region(line_idx: usize, text: &str, width: Option<NonZeroUsize>) -> Option<Region> {
    if text.trim().is_empty() {
        return None;
    }

    let end = match width {
        Some(width) => text
            .char_indices()
            .nth(width.get())
            .map(|(pos, _)| pos)
            .unwrap_or(text.len()),
        None => text.len(),
    };

    Some(Region::new(Pos::new(line_idx, 0), Pos::new(line_idx, end)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Editor;

    fn width(n: usize) -> Option<NonZeroUsize> {
        NonZeroUsize::new(n)
    }

    #[test]
    fn test_from_name_roundtrip() {
        for kind in ThingKind::ALL {
            assert_eq!(ThingKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ThingKind::from_name("paragraph"), None);
        assert_eq!(ThingKind::from_name(""), None);
    }

    #[test]
    fn test_line_whole() {
        let editor = Editor::from_text("hello world\n");
        let region = resolve(&ThingKind::Line.into(), None, &editor).unwrap();
        assert_eq!(region, Region::on_line(0, 0, 11));
    }

    #[test]
    fn test_line_width_five_of_ten() {
        let editor = Editor::from_text("0123456789");
        let region = resolve(&ThingKind::Line.into(), width(5), &editor).unwrap();
        assert_eq!(region, Region::on_line(0, 0, 5));
    }

    #[test]
    fn test_line_width_capped_at_line_end() {
        let editor = Editor::from_text("short");
        let region = resolve(&ThingKind::Line.into(), width(40), &editor).unwrap();
        assert_eq!(region, Region::on_line(0, 0, 5));
    }

    #[test]
    fn test_line_width_counts_characters() {
        let editor = Editor::from_text("café au lait");
        let region = resolve(&ThingKind::Line.into(), width(4), &editor).unwrap();
        // 'é' is two bytes
        assert_eq!(region, Region::on_line(0, 0, 5));
    }

    #[test]
    fn test_blank_line_has_no_region() {
        let editor = Editor::from_text("   \t  ");
        assert_eq!(resolve(&ThingKind::Line.into(), None, &editor), None);

        let editor = Editor::from_text("");
        assert_eq!(resolve(&ThingKind::Line.into(), width(3), &editor), None);
    }

    #[test]
    fn test_region_requires_mark() {
        let mut editor = Editor::from_text("one two three");
        assert_eq!(resolve(&ThingKind::Region.into(), None, &editor), None);

        editor.window_mut().set_mark();
        editor.window_mut().set_cursor(0, 7);
        let region = resolve(&ThingKind::Region.into(), None, &editor).unwrap();
        assert_eq!(region, Region::on_line(0, 0, 7));
    }

    #[test]
    fn test_window_is_visible_range() {
        let text: String = (0..50).map(|i| format!("line {}\n", i)).collect();
        let editor = Editor::with_height(&text, 10);
        let region = resolve(&ThingKind::Window.into(), None, &editor).unwrap();
        assert_eq!(region.start(), Pos::new(0, 0));
        assert_eq!(region.end(), Pos::new(9, 6));
    }

    #[test]
    fn test_custom_thing_is_called() {
        let editor = Editor::from_text("anything");
        let thing = Thing::custom(|| Some(Region::on_line(0, 2, 4)));
        assert_eq!(resolve(&thing, None, &editor), Some(Region::on_line(0, 2, 4)));

        let nothing = Thing::custom(|| None);
        assert_eq!(resolve(&nothing, None, &editor), None);
    }

    #[test]
    fn test_named_thing_delegates_to_host() {
        let editor = Editor::from_text("foo bar");
        let region = resolve(&ThingKind::Word.into(), None, &editor).unwrap();
        assert_eq!(region, Region::on_line(0, 0, 3));
    }
}
