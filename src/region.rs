//! Buffer positions and regions

use std::fmt;

/// A position in a buffer: line index plus byte offset within the line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pos {
    pub line: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col)
    }
}

/// Region bounds, always normalized so start <= end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    start: Pos,
    end: Pos,
}

impl Region {
    /// Create a region, clamping `end` so it never precedes `start`.
    ///
    /// A clamped region is empty; it highlights nothing visible but is
    /// still a valid region.
    pub fn new(start: Pos, end: Pos) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Create a region from mark and cursor positions, ordering the two ends
    pub fn from_mark_and_cursor(mark: Pos, cursor: Pos) -> Self {
        if mark <= cursor {
            Self { start: mark, end: cursor }
        } else {
            Self { start: cursor, end: mark }
        }
    }

    /// Region covering part of a single line
    pub fn on_line(line: usize, start_col: usize, end_col: usize) -> Self {
        Self::new(Pos::new(line, start_col), Pos::new(line, end_col))
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn end(&self) -> Pos {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Get the portion of a line that's in the region (as byte offsets)
    /// Returns None if the line is not covered
    pub fn line_intersection(&self, line_idx: usize, line_len: usize) -> Option<(usize, usize)> {
        if line_idx < self.start.line || line_idx > self.end.line {
            return None;
        }

        let start = if line_idx == self.start.line {
            self.start.col.min(line_len)
        } else {
            0
        };

        let end = if line_idx == self.end.line {
            self.end.col.min(line_len)
        } else {
            line_len
        };

        if start == end && line_idx == self.end.line {
            None
        } else {
            Some((start, end.max(start)))
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_reversed_bounds() {
        let region = Region::new(Pos::new(2, 5), Pos::new(1, 0));
        assert_eq!(region.start(), Pos::new(2, 5));
        assert_eq!(region.end(), Pos::new(2, 5));
        assert!(region.is_empty());
    }

    #[test]
    fn test_from_mark_and_cursor_orders() {
        let region = Region::from_mark_and_cursor(Pos::new(3, 1), Pos::new(0, 4));
        assert_eq!(region.start(), Pos::new(0, 4));
        assert_eq!(region.end(), Pos::new(3, 1));
    }

    #[test]
    fn test_line_intersection() {
        let region = Region::new(Pos::new(1, 2), Pos::new(3, 4));
        assert_eq!(region.line_intersection(0, 10), None);
        assert_eq!(region.line_intersection(1, 10), Some((2, 10)));
        assert_eq!(region.line_intersection(2, 6), Some((0, 6)));
        assert_eq!(region.line_intersection(3, 10), Some((0, 4)));
        assert_eq!(region.line_intersection(4, 10), None);
    }

    #[test]
    fn test_empty_region_touches_nothing() {
        let region = Region::on_line(0, 3, 3);
        assert_eq!(region.line_intersection(0, 10), None);
    }
}
