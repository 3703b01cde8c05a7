//! Source code representation and position tracking.

use std::{fmt, ops::Range};

/// Represents source code.
pub struct Source<'a> {
    /// Original source code.
    pub content: &'a str,
    /// Byte offsets at which each line starts. Always contains `0`.
    line_starts: Vec<usize>,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            content,
            line_starts,
        }
    }

    /// Returns the 1-based line and column of the byte at `offset`.
    /// Offsets past the end of the content map to the position right after the last character.
    pub fn location(&self, offset: usize) -> Location {
        let offset = offset.min(self.content.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next_line) => next_line - 1,
        };
        let line_start = self.line_starts[line];
        // columns count characters, not bytes
        let column = self.content[line_start..offset].chars().count() + 1;
        Location {
            line: line + 1,
            column,
        }
    }

    /// Returns the text covered by `span`.
    pub fn slice(&self, span: &Span) -> &'a str {
        &self.content[span.range()]
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new(content)
    }
}

/// A half-open byte range into the source code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

/// A human readable position (1-based line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {line}, column {column}",
            line = self.line,
            column = self.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_first_line() {
        let source = Source::new("var x = 1;");
        assert_eq!(source.location(0), Location { line: 1, column: 1 });
        assert_eq!(source.location(4), Location { line: 1, column: 5 });
    }

    #[test]
    fn test_location_multiline() {
        let source = Source::new("a\nbc\n\nd");
        assert_eq!(source.location(2), Location { line: 2, column: 1 });
        assert_eq!(source.location(3), Location { line: 2, column: 2 });
        assert_eq!(source.location(5), Location { line: 3, column: 1 });
        assert_eq!(source.location(6), Location { line: 4, column: 1 });
    }

    #[test]
    fn test_location_past_end() {
        let source = Source::new("ab");
        assert_eq!(source.location(10), Location { line: 1, column: 3 });
        let empty = Source::new("");
        assert_eq!(empty.location(0), Location { line: 1, column: 1 });
    }

    #[test]
    fn test_slice() {
        let source: Source = "print(1);".into();
        assert_eq!(source.slice(&Span::new(0, 5)), "print");
        assert_eq!(format!("{}", source.location(6)), "line 1, column 7");
    }
}
