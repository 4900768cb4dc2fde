//! Owns a source file's text plus its line index.
//!
//! Reading the file from disk is the CLI's job; everything downstream
//! of `spacec::main` only ever sees a `SourceBuffer`.

use crate::span::{LineIndex, Span};

#[derive(Debug, Clone)]
pub struct SourceBuffer {
    path: String,
    text: String,
    lines: LineIndex,
}

impl SourceBuffer {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = LineIndex::new(&text);
        SourceBuffer {
            path: path.into(),
            text,
            lines,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn slice(&self, span: Span) -> &str {
        &self.text[span.start as usize..span.end as usize]
    }

    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        self.lines.line_col(offset)
    }

    /// The source text of the given 1-based line, without its newline.
    pub fn line_text(&self, line: u32) -> &str {
        let span = self.lines.line_span(line, &self.text);
        self.slice(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_and_resolves_positions() {
        let buf = SourceBuffer::new("main.space", "var x:int = 1;\nvar y:int = 2;\n");
        assert_eq!(buf.slice(Span::new(0, 3)), "var");
        assert_eq!(buf.line_col(0), (1, 1));
        assert_eq!(buf.line_text(2), "var y:int = 2;");
    }
}
