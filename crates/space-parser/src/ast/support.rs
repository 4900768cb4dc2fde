//! Small accessor helpers shared by the `ast` wrapper types.

use crate::cst::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

use super::AstNode;

pub(crate) fn node<N: AstNode>(parent: &SyntaxNode) -> Option<N> {
    parent.children().find_map(N::cast)
}

pub(crate) fn nodes<N: AstNode>(parent: &SyntaxNode) -> impl Iterator<Item = N> {
    parent.children().filter_map(N::cast)
}

pub(crate) fn token(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|it| it.kind() == kind)
}

pub(crate) fn token_text(parent: &SyntaxNode, kind: SyntaxKind) -> Option<String> {
    token(parent, kind).map(|t| t.text().to_string())
}
