//! The ordered external-reference queue handed off to an out-of-crate
//! include resolver.

use space_common::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalReference {
    pub path: String,
    pub span: Span,
}
