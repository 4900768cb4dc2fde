//! Expressions.

use super::support::{node, nodes, token_text};
use super::{ast_node, AstNode};
use crate::cst::SyntaxNode;
use crate::syntax_kind::SyntaxKind;

ast_node!(BinaryExpr, SyntaxKind::BinaryExpr);
ast_node!(UnaryExpr, SyntaxKind::UnaryExpr);
ast_node!(ParenExpr, SyntaxKind::ParenExpr);
ast_node!(MemberClassAccess, SyntaxKind::MemberClassAccess);
ast_node!(ArrayAccess, SyntaxKind::ArrayAccess);
ast_node!(FunctionCall, SyntaxKind::FunctionCall);
ast_node!(ArgList, SyntaxKind::ArgList);
ast_node!(Arg, SyntaxKind::Arg);
ast_node!(NewExpr, SyntaxKind::NewExpr);
ast_node!(ThisExpr, SyntaxKind::ThisExpr);
ast_node!(IdenExpr, SyntaxKind::IdenExpr);
ast_node!(NumberLit, SyntaxKind::NumberLit);
ast_node!(FloatLit, SyntaxKind::FloatLit);
ast_node!(StringLitNode, SyntaxKind::StringLit_);
ast_node!(BoolLit, SyntaxKind::BoolLit);
ast_node!(NullLit, SyntaxKind::NullLit);
ast_node!(PointerExpr, SyntaxKind::PointerExpr);
ast_node!(ReferenceExpr, SyntaxKind::ReferenceExprNode);
ast_node!(ConditionalAssignment, SyntaxKind::ConditionalAssignment);
ast_node!(SimpleIncDecAssign, SyntaxKind::SimpleIncDecAssign);
ast_node!(AndOrCondition, SyntaxKind::AndOrCondition);

/// Every expression-producing node kind, unified for tree-walking code
/// (the semantic analyzer) that dispatches on shape rather than on the
/// specific wrapper type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Paren(ParenExpr),
    MemberClassAccess(MemberClassAccess),
    ArrayAccess(ArrayAccess),
    Call(FunctionCall),
    New(NewExpr),
    This(ThisExpr),
    Ident(IdenExpr),
    Number(NumberLit),
    Float(FloatLit),
    String(StringLitNode),
    Bool(BoolLit),
    Null(NullLit),
    Pointer(PointerExpr),
    Reference(ReferenceExpr),
    AndOr(AndOrCondition),
}

impl Expr {
    pub fn cast(node: SyntaxNode) -> Option<Expr> {
        Some(match node.kind() {
            SyntaxKind::BinaryExpr => Expr::Binary(BinaryExpr::cast(node)?),
            SyntaxKind::UnaryExpr => Expr::Unary(UnaryExpr::cast(node)?),
            SyntaxKind::ParenExpr => Expr::Paren(ParenExpr::cast(node)?),
            SyntaxKind::MemberClassAccess => {
                Expr::MemberClassAccess(MemberClassAccess::cast(node)?)
            }
            SyntaxKind::ArrayAccess => Expr::ArrayAccess(ArrayAccess::cast(node)?),
            SyntaxKind::FunctionCall => Expr::Call(FunctionCall::cast(node)?),
            SyntaxKind::NewExpr => Expr::New(NewExpr::cast(node)?),
            SyntaxKind::ThisExpr => Expr::This(ThisExpr::cast(node)?),
            SyntaxKind::IdenExpr => Expr::Ident(IdenExpr::cast(node)?),
            SyntaxKind::NumberLit => Expr::Number(NumberLit::cast(node)?),
            SyntaxKind::FloatLit => Expr::Float(FloatLit::cast(node)?),
            SyntaxKind::StringLit_ => Expr::String(StringLitNode::cast(node)?),
            SyntaxKind::BoolLit => Expr::Bool(BoolLit::cast(node)?),
            SyntaxKind::NullLit => Expr::Null(NullLit::cast(node)?),
            SyntaxKind::PointerExpr => Expr::Pointer(PointerExpr::cast(node)?),
            SyntaxKind::ReferenceExprNode => Expr::Reference(ReferenceExpr::cast(node)?),
            SyntaxKind::AndOrCondition => Expr::AndOr(AndOrCondition::cast(node)?),
            _ => return None,
        })
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Expr::Binary(e) => e.syntax(),
            Expr::Unary(e) => e.syntax(),
            Expr::Paren(e) => e.syntax(),
            Expr::MemberClassAccess(e) => e.syntax(),
            Expr::ArrayAccess(e) => e.syntax(),
            Expr::Call(e) => e.syntax(),
            Expr::New(e) => e.syntax(),
            Expr::This(e) => e.syntax(),
            Expr::Ident(e) => e.syntax(),
            Expr::Number(e) => e.syntax(),
            Expr::Float(e) => e.syntax(),
            Expr::String(e) => e.syntax(),
            Expr::Bool(e) => e.syntax(),
            Expr::Null(e) => e.syntax(),
            Expr::Pointer(e) => e.syntax(),
            Expr::Reference(e) => e.syntax(),
            Expr::AndOr(e) => e.syntax(),
        }
    }
}

impl BinaryExpr {
    pub fn lhs(&self) -> Option<Expr> {
        self.syntax().children().find_map(Expr::cast)
    }

    pub fn rhs(&self) -> Option<Expr> {
        self.syntax().children().filter_map(Expr::cast).nth(1)
    }

    /// The operator token. Operands are always sub-nodes (even a bare
    /// identifier is wrapped in its own `IdenExpr`), so the first bare
    /// token directly under a `BinaryExpr` is always the operator.
    pub fn operator(&self) -> Option<String> {
        self.syntax()
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| !t.kind().is_trivia())
            .map(|t| t.text().to_string())
    }
}

impl MemberClassAccess {
    pub fn base(&self) -> Option<Expr> {
        self.syntax().children().find_map(Expr::cast)
    }

    pub fn member_name(&self) -> Option<String> {
        token_text(self.syntax(), SyntaxKind::Ident)
    }

    /// True for `base->member`, false for `base.member`.
    pub fn is_arrow(&self) -> bool {
        self.syntax()
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .any(|t| t.kind() == SyntaxKind::Arrow)
    }
}

impl ArrayAccess {
    pub fn base(&self) -> Option<Expr> {
        self.syntax().children().find_map(Expr::cast)
    }

    pub fn index(&self) -> Option<Expr> {
        self.syntax().children().filter_map(Expr::cast).nth(1)
    }
}

impl FunctionCall {
    pub fn callee(&self) -> Option<Expr> {
        self.syntax().children().find_map(Expr::cast)
    }

    pub fn args(&self) -> Option<ArgList> {
        node(self.syntax())
    }
}

impl ArgList {
    pub fn args(&self) -> impl Iterator<Item = Arg> {
        nodes(self.syntax())
    }
}

impl Arg {
    pub fn value(&self) -> Option<Expr> {
        self.syntax().children().find_map(Expr::cast)
    }

    pub fn annotated_type(&self) -> Option<String> {
        token_text(self.syntax(), SyntaxKind::Ident)
    }
}

impl NewExpr {
    pub fn class_name(&self) -> Option<String> {
        token_text(self.syntax(), SyntaxKind::Ident)
    }

    pub fn args(&self) -> Option<ArgList> {
        node(self.syntax())
    }
}

impl IdenExpr {
    pub fn name(&self) -> Option<String> {
        self.syntax()
            .first_token()
            .map(|t| t.text().to_string())
    }
}
