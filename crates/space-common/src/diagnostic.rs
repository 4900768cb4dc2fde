//! Diagnostic rendering in the fixed plain-text, caret-underlined format.

use crate::source::SourceBuffer;
use crate::span::Span;

/// One variant per exception kind the compiler can raise, named the way
/// the language's own `try`/`catch` would name them: a generic
/// `Exception` base plus a specific subtype per semantic rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    LexException,
    ParseException,
    Exception,
    AlreadyDefinedException,
    TypeMismatchException,
    ArityMismatchException,
    ModifierException,
    StatementMisplacementException,
    WrongAccessorException,
    NoSuchArrayDimensionException,
}

impl Category {
    fn label(self) -> &'static str {
        match self {
            Category::LexException => "LexException",
            Category::ParseException => "ParseException",
            Category::Exception => "Exception",
            Category::AlreadyDefinedException => "AlreadyDefinedException",
            Category::TypeMismatchException => "TypeMismatchException",
            Category::ArityMismatchException => "ArityMismatchException",
            Category::ModifierException => "ModifierException",
            Category::StatementMisplacementException => "StatementMisplacementException",
            Category::WrongAccessorException => "WrongAccessorException",
            Category::NoSuchArrayDimensionException => "NoSuchArrayDimensionException",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub category: Category,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(category: Category, message: impl Into<String>, span: Span) -> Self {
        Diagnostic {
            category,
            message: message.into(),
            span,
        }
    }

    /// Renders the diagnostic as:
    ///
    /// ```text
    /// <Category>: at line <L>:<C> from "<file>"
    ///     msg: <description>
    ///     at: <source line contents>
    ///         ^^^ (caret column-aligned, one `^` per byte of the span)
    /// ```
    pub fn render(&self, buf: &SourceBuffer) -> String {
        const AT_PREFIX: &str = "    at: ";
        let (line, col) = buf.line_col(self.span.start);
        let source_line = buf.line_text(line);
        let caret_col = (col as usize).saturating_sub(1);
        let width = self.span.end.saturating_sub(self.span.start).max(1) as usize;
        let mut caret_line = " ".repeat(AT_PREFIX.len());
        for ch in source_line.chars().take(caret_col) {
            caret_line.push(if ch == '\t' { '\t' } else { ' ' });
        }
        caret_line.push_str(&"^".repeat(width));
        format!(
            "{category}: at line {line}:{col} from \"{file}\"\n    msg: {message}\n{AT_PREFIX}{source_line}\n{caret_line}",
            category = self.category.label(),
            file = buf.path(),
            line = line,
            col = col,
            message = self.message,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_the_fixed_diagnostic_format() {
        let buf = SourceBuffer::new("main.space", "var x:int = 3 + ;\n");
        let diag = Diagnostic::new(
            Category::ParseException,
            "expected expression",
            Span::new(17, 18),
        );
        let rendered = diag.render(&buf);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "ParseException: at line 1:18 from \"main.space\"");
        assert_eq!(lines[1], "    msg: expected expression");
        assert_eq!(lines[2], "    at: var x:int = 3 + ;");
        assert_eq!(lines[3], "                         ^");
    }
}
