//! Typed wrappers over the concrete syntax tree.
//!
//! The CST (`crate::cst::SyntaxNode`) is the generic interchange form;
//! these wrapper types are the tagged layer built on top of it, each
//! one a thin newtype whose accessors walk back into the CST rather
//! than duplicating its data.

mod decls;
mod exprs;
mod stmts;
mod support;

pub use decls::*;
pub use exprs::*;
pub use stmts::*;

use crate::cst::SyntaxNode;
use crate::syntax_kind::SyntaxKind;

pub trait AstNode {
    fn can_cast(kind: SyntaxKind) -> bool
    where
        Self: Sized;

    fn cast(node: SyntaxNode) -> Option<Self>
    where
        Self: Sized;

    fn syntax(&self) -> &SyntaxNode;
}

/// Declares a newtype wrapper around `SyntaxNode` tied to one
/// `SyntaxKind`, with the boilerplate `AstNode` impl.
macro_rules! ast_node {
    ($name:ident, $kind:expr) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $crate::ast::AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == $kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

pub(crate) use ast_node;

ast_node!(SourceFile, SyntaxKind::SourceFile);

impl SourceFile {
    pub fn statements(&self) -> impl Iterator<Item = SyntaxNode> {
        self.syntax().children()
    }
}
