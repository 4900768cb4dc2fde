//! Shared types used across the SPACE compiler frontend: spans, the
//! token vocabulary, the source buffer, and diagnostic rendering.

pub mod diagnostic;
pub mod source;
pub mod span;
pub mod token;

pub use diagnostic::{Category, Diagnostic};
pub use source::SourceBuffer;
pub use span::{LineIndex, Span};
pub use token::{keyword_from_str, Token, TokenKind};
