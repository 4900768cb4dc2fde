//! Top-level and statement grammar: declarations, classes, control flow.

use space_common::TokenKind;

use super::expressions::{condition, expr_statement};
use super::{MarkOpened, Parser};
use crate::syntax_kind::SyntaxKind;

pub fn source_file(p: &mut Parser) {
    let mark = p.open();
    while !p.is_eof() {
        statement(p);
    }
    p.close(mark, SyntaxKind::SourceFile);
}

pub fn statement(p: &mut Parser) {
    match p.current_kind() {
        TokenKind::Include => include_decl(p),
        TokenKind::Export => export_decl(p),
        TokenKind::Enum => enum_decl(p),
        TokenKind::If => if_stmt(p),
        TokenKind::While => while_stmt(p),
        TokenKind::Do => do_while_stmt(p),
        TokenKind::For => for_stmt(p),
        TokenKind::Check => check_stmt(p),
        TokenKind::Try => try_stmt(p),
        TokenKind::Return => return_stmt(p),
        TokenKind::Break => break_stmt(p),
        TokenKind::Continue => continue_stmt(p),
        TokenKind::LBrace => block(p),
        TokenKind::This if p.nth_at(1, TokenKind::ColonColon) => constructor(p),
        TokenKind::Var => var_decl(p, false),
        TokenKind::Const => var_decl(p, true),
        TokenKind::Function => function_decl(p),
        TokenKind::Class => class_decl(p),
        TokenKind::Global | TokenKind::PGlobal | TokenKind::Private | TokenKind::Secure => {
            modified_decl(p)
        }
        TokenKind::Semicolon => {
            p.advance();
        }
        _ => {
            expr_statement(p);
            p.expect(TokenKind::Semicolon, "';'");
        }
    }
}

fn modifier_list(p: &mut Parser) {
    if !p.at_any(&[
        TokenKind::Global,
        TokenKind::PGlobal,
        TokenKind::Private,
        TokenKind::Secure,
    ]) {
        return;
    }
    let mark = p.open();
    while p.at_any(&[
        TokenKind::Global,
        TokenKind::PGlobal,
        TokenKind::Private,
        TokenKind::Secure,
    ]) {
        let m = p.open();
        p.advance();
        p.close(m, SyntaxKind::Modifier);
    }
    p.close(mark, SyntaxKind::ModifierList);
}

fn modified_decl(p: &mut Parser) {
    let mark = p.open();
    modifier_list(p);
    match p.current_kind() {
        TokenKind::Var => var_decl_body(p, false, mark),
        TokenKind::Const => var_decl_body(p, true, mark),
        TokenKind::Function => function_decl_body(p, mark),
        TokenKind::Class => class_decl_body(p, mark),
        _ => {
            p.advance_with_error("expected a declaration after modifiers");
            p.close(mark, SyntaxKind::ErrorNode);
        }
    }
}

fn var_decl(p: &mut Parser, is_const: bool) {
    let mark = p.open();
    var_decl_body(p, is_const, mark);
}

fn var_decl_body(p: &mut Parser, is_const: bool, mark: MarkOpened) {
    p.advance(); // 'var' or 'const'
    p.expect(TokenKind::Ident, "a variable name");
    p.expect(TokenKind::Colon, "':'");
    let mut has_array_dim = false;
    var_type(p, &mut has_array_dim);
    let mut saw_new = false;
    let mut saw_ternary = false;
    if p.eat(TokenKind::Eq) {
        saw_new = p.at(TokenKind::New);
        condition(p);
        if p.eat(TokenKind::Question) {
            saw_ternary = true;
            condition(p);
            p.expect(TokenKind::Colon, "':'");
            condition(p);
        }
    }
    p.expect(TokenKind::Semicolon, "';'");
    let kind = if is_const {
        SyntaxKind::ConstDecl
    } else if has_array_dim {
        SyntaxKind::ArrayVarDecl
    } else if saw_ternary {
        SyntaxKind::ConditionalVarDecl
    } else if saw_new {
        SyntaxKind::ClassInstanceVarDecl
    } else {
        SyntaxKind::VarDecl
    };
    p.close(mark, kind);
}

/// `Ident ('[' expr? ']')*`
fn var_type(p: &mut Parser, has_array_dim: &mut bool) {
    let mark = p.open();
    p.expect(TokenKind::Ident, "a type name");
    while p.at(TokenKind::LBracket) {
        *has_array_dim = true;
        let dim_mark = p.open();
        p.advance();
        if !p.at(TokenKind::RBracket) {
            condition(p);
        }
        p.expect(TokenKind::RBracket, "']'");
        p.close(dim_mark, SyntaxKind::ArrayDim);
    }
    p.close(mark, SyntaxKind::VarType);
}

fn function_decl(p: &mut Parser) {
    let mark = p.open();
    function_decl_body(p, mark);
}

fn function_decl_body(p: &mut Parser, mark: MarkOpened) {
    p.advance(); // 'function'
    p.expect(TokenKind::Ident, "a function name");
    param_list(p);
    if p.eat(TokenKind::Colon) {
        let mut _dim = false;
        var_type(p, &mut _dim);
    }
    block(p);
    p.close(mark, SyntaxKind::FunctionDecl);
}

fn param_list(p: &mut Parser) {
    let mark = p.open();
    p.expect(TokenKind::LParen, "'('");
    while !p.at(TokenKind::RParen) && !p.is_eof() {
        let param_mark = p.open();
        p.expect(TokenKind::Ident, "a parameter name");
        p.expect(TokenKind::Colon, "':'");
        let mut _dim = false;
        var_type(p, &mut _dim);
        p.close(param_mark, SyntaxKind::Param);
        if !p.eat(TokenKind::Comma) {
            break;
        }
    }
    p.expect(TokenKind::RParen, "')'");
    p.close(mark, SyntaxKind::ParamList);
}

fn class_decl(p: &mut Parser) {
    let mark = p.open();
    class_decl_body(p, mark);
}

fn class_decl_body(p: &mut Parser, mark: MarkOpened) {
    p.advance(); // 'class'
    p.expect(TokenKind::Ident, "a class name");
    if p.eat(TokenKind::Extends) {
        let inh_mark = p.open();
        p.expect(TokenKind::Ident, "a base class name");
        p.close(inh_mark, SyntaxKind::Inheritance);
    }
    if p.eat(TokenKind::With) {
        // Comma-separated interface names after `with` (the canonical
        // grammar, per the design notes' resolution of this construct).
        let iface_mark = p.open();
        p.expect(TokenKind::Ident, "an interface name");
        while p.eat(TokenKind::Comma) {
            p.expect(TokenKind::Ident, "an interface name");
        }
        p.close(iface_mark, SyntaxKind::InterfaceList);
    }
    p.expect(TokenKind::LBrace, "'{'");
    while !p.at(TokenKind::RBrace) && !p.is_eof() {
        statement(p);
    }
    p.expect(TokenKind::RBrace, "'}'");
    p.close(mark, SyntaxKind::ClassDecl);
}

/// `this::constructor(params) { body }`
fn constructor(p: &mut Parser) {
    let mark = p.open();
    p.advance(); // this
    p.expect(TokenKind::ColonColon, "'::'");
    p.expect(TokenKind::Ident, "'constructor'");
    param_list(p);
    block(p);
    p.close(mark, SyntaxKind::ClassConstructor);
}

fn enum_decl(p: &mut Parser) {
    let mark = p.open();
    p.advance(); // 'enum'
    p.expect(TokenKind::Ident, "an enum name");
    p.expect(TokenKind::LBrace, "'{'");
    while !p.at(TokenKind::RBrace) && !p.is_eof() {
        let em = p.open();
        p.expect(TokenKind::Ident, "an enumerator name");
        if p.eat(TokenKind::Eq) {
            p.expect(TokenKind::Number, "an enumerator value");
        }
        p.close(em, SyntaxKind::Enumerator);
        if !p.eat(TokenKind::Comma) {
            break;
        }
    }
    p.expect(TokenKind::RBrace, "'}'");
    p.close(mark, SyntaxKind::EnumDecl);
}

fn include_decl(p: &mut Parser) {
    let mark = p.open();
    p.advance(); // 'include'
    p.expect(TokenKind::StringLit, "a path string");
    p.expect(TokenKind::Semicolon, "';'");
    p.close(mark, SyntaxKind::IncludeDecl);
}

fn export_decl(p: &mut Parser) {
    let mark = p.open();
    p.advance(); // 'export'
    p.expect(TokenKind::Ident, "a name to export");
    p.expect(TokenKind::Semicolon, "';'");
    p.close(mark, SyntaxKind::ExportDecl);
}

pub fn block(p: &mut Parser) {
    let mark = p.open();
    p.expect(TokenKind::LBrace, "'{'");
    while !p.at(TokenKind::RBrace) && !p.is_eof() {
        statement(p);
    }
    p.expect(TokenKind::RBrace, "'}'");
    p.close(mark, SyntaxKind::Block);
}

fn if_stmt(p: &mut Parser) {
    let mark = p.open();
    p.advance(); // 'if'
    p.expect(TokenKind::LParen, "'('");
    condition(p);
    p.expect(TokenKind::RParen, "')'");
    block(p);
    while p.at(TokenKind::Else) {
        if p.nth_at(1, TokenKind::If) {
            let em = p.open();
            p.advance(); // else
            p.advance(); // if
            p.expect(TokenKind::LParen, "'('");
            condition(p);
            p.expect(TokenKind::RParen, "')'");
            block(p);
            p.close(em, SyntaxKind::ElseIfClause);
        } else {
            let em = p.open();
            p.advance(); // else
            block(p);
            p.close(em, SyntaxKind::ElseClause);
            break;
        }
    }
    p.close(mark, SyntaxKind::IfStmt);
}

fn while_stmt(p: &mut Parser) {
    let mark = p.open();
    p.advance(); // 'while'
    p.expect(TokenKind::LParen, "'('");
    condition(p);
    p.expect(TokenKind::RParen, "')'");
    block(p);
    p.close(mark, SyntaxKind::WhileStmt);
}

fn do_while_stmt(p: &mut Parser) {
    let mark = p.open();
    p.advance(); // 'do'
    block(p);
    p.expect(TokenKind::While, "'while'");
    p.expect(TokenKind::LParen, "'('");
    condition(p);
    p.expect(TokenKind::RParen, "')'");
    p.expect(TokenKind::Semicolon, "';'");
    p.close(mark, SyntaxKind::DoWhileStmt);
}

fn for_stmt(p: &mut Parser) {
    let mark = p.open();
    p.advance(); // 'for'
    p.expect(TokenKind::LParen, "'('");
    if p.at(TokenKind::Var) {
        var_decl(p, false);
    } else if !p.eat(TokenKind::Semicolon) {
        expr_statement(p);
        p.expect(TokenKind::Semicolon, "';'");
    }
    if !p.at(TokenKind::Semicolon) {
        condition(p);
    }
    p.expect(TokenKind::Semicolon, "';'");
    if !p.at(TokenKind::RParen) {
        expr_statement(p);
    }
    p.expect(TokenKind::RParen, "')'");
    block(p);
    p.close(mark, SyntaxKind::ForStmt);
}

fn check_stmt(p: &mut Parser) {
    let mark = p.open();
    p.advance(); // 'check'
    p.expect(TokenKind::LParen, "'('");
    condition(p);
    p.expect(TokenKind::RParen, "')'");
    p.expect(TokenKind::LBrace, "'{'");
    while p.at(TokenKind::Is) {
        let im = p.open();
        p.advance(); // 'is'
        condition(p);
        p.expect(TokenKind::Colon, "':'");
        while !p.at(TokenKind::Is) && !p.at(TokenKind::RBrace) && !p.is_eof() {
            statement(p);
        }
        p.close(im, SyntaxKind::IsClause);
    }
    p.expect(TokenKind::RBrace, "'}'");
    p.close(mark, SyntaxKind::CheckStmt);
}

/// `try { body } catch (Type name) { body }`
fn try_stmt(p: &mut Parser) {
    let mark = p.open();
    p.advance(); // 'try'
    block(p);
    p.expect(TokenKind::Catch, "'catch'");
    let cm = p.open();
    p.expect(TokenKind::LParen, "'('");
    let mut _dim = false;
    var_type(p, &mut _dim);
    p.expect(TokenKind::Ident, "an exception variable name");
    p.expect(TokenKind::RParen, "')'");
    block(p);
    p.close(cm, SyntaxKind::CatchClause);
    p.close(mark, SyntaxKind::TryStmt);
}

fn return_stmt(p: &mut Parser) {
    let mark = p.open();
    p.advance(); // 'return'
    if !p.at(TokenKind::Semicolon) {
        condition(p);
    }
    p.expect(TokenKind::Semicolon, "';'");
    p.close(mark, SyntaxKind::ReturnStmt);
}

fn break_stmt(p: &mut Parser) {
    let mark = p.open();
    p.advance();
    p.expect(TokenKind::Semicolon, "';'");
    p.close(mark, SyntaxKind::BreakStmt);
}

fn continue_stmt(p: &mut Parser) {
    let mark = p.open();
    p.advance();
    p.expect(TokenKind::Semicolon, "';'");
    p.close(mark, SyntaxKind::ContinueStmt);
}
