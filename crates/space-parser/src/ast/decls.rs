//! Declarations: variables, functions, classes, enums, include/export.

use space_common::TokenKind;

use super::support::{node, nodes, token, token_text};
use super::{ast_node, AstNode};
use crate::cst::SyntaxNode;
use crate::syntax_kind::SyntaxKind;

ast_node!(VarDeclNode, SyntaxKind::VarDecl);
ast_node!(ConstDeclNode, SyntaxKind::ConstDecl);
ast_node!(ArrayVarDeclNode, SyntaxKind::ArrayVarDecl);
ast_node!(ConditionalVarDeclNode, SyntaxKind::ConditionalVarDecl);
ast_node!(ClassInstanceVarDeclNode, SyntaxKind::ClassInstanceVarDecl);
ast_node!(VarType, SyntaxKind::VarType);
ast_node!(ArrayDim, SyntaxKind::ArrayDim);
ast_node!(ModifierList, SyntaxKind::ModifierList);
ast_node!(Modifier, SyntaxKind::Modifier);
ast_node!(FunctionDecl, SyntaxKind::FunctionDecl);
ast_node!(ParamList, SyntaxKind::ParamList);
ast_node!(Param, SyntaxKind::Param);
ast_node!(ClassDecl, SyntaxKind::ClassDecl);
ast_node!(ClassConstructor, SyntaxKind::ClassConstructor);
ast_node!(Inheritance, SyntaxKind::Inheritance);
ast_node!(InterfaceList, SyntaxKind::InterfaceList);
ast_node!(EnumDecl, SyntaxKind::EnumDecl);
ast_node!(Enumerator, SyntaxKind::Enumerator);
ast_node!(IncludeDecl, SyntaxKind::IncludeDecl);
ast_node!(ExportDecl, SyntaxKind::ExportDecl);

/// Any of the five variable-declaration node kinds, unified for callers
/// (the semantic analyzer) that care about name/type/modifiers but not
/// which of the five surface forms produced the declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnyVarDecl(SyntaxNode);

impl AstNode for AnyVarDecl {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::VarDecl
                | SyntaxKind::ConstDecl
                | SyntaxKind::ArrayVarDecl
                | SyntaxKind::ConditionalVarDecl
                | SyntaxKind::ClassInstanceVarDecl
        )
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

impl AnyVarDecl {
    pub fn is_const(&self) -> bool {
        self.0.kind() == SyntaxKind::ConstDecl
    }

    pub fn is_array(&self) -> bool {
        self.0.kind() == SyntaxKind::ArrayVarDecl
    }

    pub fn is_conditional(&self) -> bool {
        self.0.kind() == SyntaxKind::ConditionalVarDecl
    }

    pub fn is_class_instance(&self) -> bool {
        self.0.kind() == SyntaxKind::ClassInstanceVarDecl
    }

    pub fn name(&self) -> Option<String> {
        token_text(&self.0, SyntaxKind::Ident)
    }

    pub fn var_type(&self) -> Option<VarType> {
        node(&self.0)
    }

    pub fn modifiers(&self) -> Option<ModifierList> {
        node(&self.0)
    }
}

impl VarType {
    pub fn type_name(&self) -> Option<String> {
        token_text(self.syntax(), SyntaxKind::Ident)
    }

    pub fn array_dims(&self) -> impl Iterator<Item = ArrayDim> {
        nodes(self.syntax())
    }

    pub fn dim_count(&self) -> usize {
        self.array_dims().count()
    }
}

impl ModifierList {
    pub fn modifiers(&self) -> impl Iterator<Item = Modifier> {
        nodes(self.syntax())
    }

    pub fn has(&self, kind: TokenKind) -> bool {
        self.modifiers().any(|m| m.keyword() == Some(kind))
    }
}

impl Modifier {
    pub fn keyword(&self) -> Option<TokenKind> {
        self.syntax()
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find_map(|t| modifier_token_kind(t.kind()))
    }
}

fn modifier_token_kind(kind: SyntaxKind) -> Option<TokenKind> {
    match kind {
        SyntaxKind::Global => Some(TokenKind::Global),
        SyntaxKind::PGlobal => Some(TokenKind::PGlobal),
        SyntaxKind::Private => Some(TokenKind::Private),
        SyntaxKind::Secure => Some(TokenKind::Secure),
        _ => None,
    }
}

impl FunctionDecl {
    pub fn name(&self) -> Option<String> {
        token_text(self.syntax(), SyntaxKind::Ident)
    }

    pub fn modifiers(&self) -> Option<ModifierList> {
        node(self.syntax())
    }

    pub fn params(&self) -> Option<ParamList> {
        node(self.syntax())
    }

    pub fn body(&self) -> Option<super::Block> {
        node(self.syntax())
    }
}

impl ParamList {
    pub fn params(&self) -> impl Iterator<Item = Param> {
        nodes(self.syntax())
    }
}

impl Param {
    pub fn name(&self) -> Option<String> {
        token_text(self.syntax(), SyntaxKind::Ident)
    }

    pub fn var_type(&self) -> Option<VarType> {
        node(self.syntax())
    }
}

impl ClassDecl {
    pub fn name(&self) -> Option<String> {
        token_text(self.syntax(), SyntaxKind::Ident)
    }

    pub fn extends(&self) -> Option<Inheritance> {
        node(self.syntax())
    }

    pub fn interfaces(&self) -> Option<InterfaceList> {
        node(self.syntax())
    }

    pub fn constructors(&self) -> impl Iterator<Item = ClassConstructor> {
        nodes(self.syntax())
    }

    pub fn functions(&self) -> impl Iterator<Item = FunctionDecl> {
        nodes(self.syntax())
    }

    pub fn fields(&self) -> impl Iterator<Item = AnyVarDecl> {
        nodes(self.syntax())
    }
}

impl Inheritance {
    pub fn base_name(&self) -> Option<String> {
        token_text(self.syntax(), SyntaxKind::Ident)
    }
}

impl InterfaceList {
    pub fn interface_names(&self) -> Vec<String> {
        self.syntax()
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| t.kind() == SyntaxKind::Ident)
            .map(|t| t.text().to_string())
            .collect()
    }
}

impl ClassConstructor {
    pub fn params(&self) -> Option<ParamList> {
        node(self.syntax())
    }

    pub fn body(&self) -> Option<super::Block> {
        node(self.syntax())
    }
}

impl EnumDecl {
    pub fn name(&self) -> Option<String> {
        token_text(self.syntax(), SyntaxKind::Ident)
    }

    pub fn enumerators(&self) -> impl Iterator<Item = Enumerator> {
        nodes(self.syntax())
    }
}

impl Enumerator {
    pub fn name(&self) -> Option<String> {
        token_text(self.syntax(), SyntaxKind::Ident)
    }

    pub fn explicit_value(&self) -> Option<String> {
        token(self.syntax(), SyntaxKind::Number).map(|t| t.text().to_string())
    }
}

impl IncludeDecl {
    pub fn path(&self) -> Option<String> {
        token_text(self.syntax(), SyntaxKind::StringLit)
    }
}

impl ExportDecl {
    pub fn name(&self) -> Option<String> {
        token_text(self.syntax(), SyntaxKind::Ident)
    }
}
