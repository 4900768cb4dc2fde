//! Parse error type (a thin, typed wrapper over `space_common::Diagnostic`
//! for callers that want to work with parser errors specifically).

use space_common::{Diagnostic, Span};

#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl From<Diagnostic> for ParseError {
    fn from(diag: Diagnostic) -> Self {
        ParseError {
            message: diag.message,
            span: diag.span,
        }
    }
}
