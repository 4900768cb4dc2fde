//! Byte spans and line/column resolution over source text.

use std::ops::Range;

use serde::Serialize;

/// A half-open byte range `[start, end)` into a `SourceBuffer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        Span { start, end }
    }

    pub fn at(pos: u32) -> Self {
        Span::new(pos, pos)
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn merge(&self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn contains(&self, offset: u32) -> bool {
        self.start <= offset && offset < self.end
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Range<usize> {
        span.start as usize..span.end as usize
    }
}

/// Maps byte offsets to 1-based (line, column) pairs.
///
/// Columns are counted in bytes from the start of the line, which is
/// sufficient for SPACE source files (ASCII keywords/operators; string
/// contents are not re-walked for diagnostics).
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i as u32 + 1);
            }
        }
        LineIndex { line_starts }
    }

    /// Returns the 1-based (line, column) for a byte offset.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line_idx = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line_idx];
        (line_idx as u32 + 1, offset - line_start + 1)
    }

    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Returns the byte range of the given 1-based line number, excluding
    /// its trailing newline.
    pub fn line_span(&self, line: u32, source: &str) -> Span {
        let idx = (line - 1) as usize;
        let start = self.line_starts[idx];
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&next| next - 1)
            .unwrap_or(source.len() as u32);
        let end = end.max(start);
        let end = if end > start && source.as_bytes().get(end as usize - 1) == Some(&b'\r') {
            end - 1
        } else {
            end
        };
        Span::new(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line() {
        let idx = LineIndex::new("hello world");
        assert_eq!(idx.line_count(), 1);
        assert_eq!(idx.line_col(0), (1, 1));
        assert_eq!(idx.line_col(6), (1, 7));
    }

    #[test]
    fn multi_line() {
        let src = "var x:int = 1;\nvar y:int = 2;\n";
        let idx = LineIndex::new(src);
        assert_eq!(idx.line_count(), 3);
        assert_eq!(idx.line_col(0), (1, 1));
        assert_eq!(idx.line_col(16), (2, 1));
        assert_eq!(idx.line_col(30), (2, 15));
    }

    #[test]
    fn span_merge() {
        let a = Span::new(2, 5);
        let b = Span::new(4, 9);
        assert_eq!(a.merge(b), Span::new(2, 9));
    }

    #[test]
    fn line_span_strips_trailing_newline() {
        let src = "first\nsecond\nthird";
        let idx = LineIndex::new(src);
        let span = idx.line_span(2, src);
        assert_eq!(&src[span.start as usize..span.end as usize], "second");
    }
}
