//! Statements and control flow.

use super::support::{node, nodes, token_text};
use super::{ast_node, AstNode, VarType};
use crate::cst::SyntaxNode;
use crate::syntax_kind::SyntaxKind;

ast_node!(Block, SyntaxKind::Block);
ast_node!(IfStmt, SyntaxKind::IfStmt);
ast_node!(ElseIfClause, SyntaxKind::ElseIfClause);
ast_node!(ElseClause, SyntaxKind::ElseClause);
ast_node!(WhileStmt, SyntaxKind::WhileStmt);
ast_node!(DoWhileStmt, SyntaxKind::DoWhileStmt);
ast_node!(ForStmt, SyntaxKind::ForStmt);
ast_node!(CheckStmt, SyntaxKind::CheckStmt);
ast_node!(IsClause, SyntaxKind::IsClause);
ast_node!(TryStmt, SyntaxKind::TryStmt);
ast_node!(CatchClause, SyntaxKind::CatchClause);
ast_node!(ReturnStmt, SyntaxKind::ReturnStmt);
ast_node!(BreakStmt, SyntaxKind::BreakStmt);
ast_node!(ContinueStmt, SyntaxKind::ContinueStmt);
ast_node!(ExprStmt, SyntaxKind::ExprStmt);

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = crate::cst::SyntaxNode> {
        self.syntax().children()
    }
}

impl IfStmt {
    pub fn then_branch(&self) -> Option<Block> {
        node(self.syntax())
    }

    pub fn else_if_clauses(&self) -> impl Iterator<Item = ElseIfClause> {
        nodes(self.syntax())
    }

    pub fn else_clause(&self) -> Option<ElseClause> {
        node(self.syntax())
    }
}

impl ElseIfClause {
    pub fn body(&self) -> Option<Block> {
        node(self.syntax())
    }
}

impl ElseClause {
    pub fn body(&self) -> Option<Block> {
        node(self.syntax())
    }
}

impl WhileStmt {
    pub fn body(&self) -> Option<Block> {
        node(self.syntax())
    }
}

impl DoWhileStmt {
    pub fn body(&self) -> Option<Block> {
        node(self.syntax())
    }
}

impl ForStmt {
    pub fn body(&self) -> Option<Block> {
        node(self.syntax())
    }
}

impl CheckStmt {
    pub fn is_clauses(&self) -> impl Iterator<Item = IsClause> {
        nodes(self.syntax())
    }
}

impl TryStmt {
    pub fn try_body(&self) -> Option<Block> {
        node(self.syntax())
    }

    pub fn catch_clause(&self) -> Option<CatchClause> {
        node(self.syntax())
    }
}

impl CatchClause {
    pub fn exception_type(&self) -> Option<VarType> {
        node(self.syntax())
    }

    pub fn exception_name(&self) -> Option<String> {
        token_text(self.syntax(), SyntaxKind::Ident)
    }

    pub fn body(&self) -> Option<Block> {
        node(self.syntax())
    }
}
