//! Expression parsing: two arithmetic precedence levels, access chains,
//! conditions, and the assignment/conditional-assignment forms.

use space_common::TokenKind;

use super::{MarkClosed, Parser};
use crate::syntax_kind::SyntaxKind;

/// Parses a full expression statement: an lvalue followed by `=`, a
/// compound-assignment operator, `++`/`--`, or nothing (a bare call
/// expression used as a statement), terminated by `;` by the caller.
pub fn expr_statement(p: &mut Parser) {
    let mark = p.open();
    postfix(p);
    if p.at(TokenKind::PlusPlus) || p.at(TokenKind::MinusMinus) {
        p.advance();
        p.close(mark, SyntaxKind::SimpleIncDecAssign);
        return;
    }
    if p.at_any(&[
        TokenKind::PlusEq,
        TokenKind::MinusEq,
        TokenKind::StarEq,
        TokenKind::SlashEq,
    ]) {
        p.advance();
        condition(p);
        p.close(mark, SyntaxKind::SimpleIncDecAssign);
        return;
    }
    if p.eat(TokenKind::Eq) {
        condition(p);
        if p.eat(TokenKind::Question) {
            condition(p);
            p.expect(TokenKind::Colon, "':' in conditional assignment");
            condition(p);
            p.close(mark, SyntaxKind::ConditionalAssignment);
        } else {
            p.close(mark, SyntaxKind::ExprStmt);
        }
        return;
    }
    p.close(mark, SyntaxKind::ExprStmt);
}

/// `cond_a or cond_b or ...`
pub fn condition(p: &mut Parser) {
    let mut node = and_condition(p);
    while p.at(TokenKind::Or) {
        let m = p.open_before(node);
        p.advance();
        and_condition(p);
        node = p.close(m, SyntaxKind::AndOrCondition);
    }
}

/// `cond_a and cond_b and ...`
fn and_condition(p: &mut Parser) -> MarkClosed {
    let mut node = equality(p);
    while p.at(TokenKind::And) {
        let m = p.open_before(node);
        p.advance();
        equality(p);
        node = p.close(m, SyntaxKind::AndOrCondition);
    }
    node
}

fn equality(p: &mut Parser) -> MarkClosed {
    let mut node = comparison(p);
    while p.at_any(&[TokenKind::EqEq, TokenKind::BangEq]) {
        let m = p.open_before(node);
        p.advance();
        comparison(p);
        node = p.close(m, SyntaxKind::BinaryExpr);
    }
    node
}

fn comparison(p: &mut Parser) -> MarkClosed {
    let mut node = additive(p);
    while p.at_any(&[
        TokenKind::Lt,
        TokenKind::Gt,
        TokenKind::LtEq,
        TokenKind::GtEq,
    ]) {
        let m = p.open_before(node);
        p.advance();
        additive(p);
        node = p.close(m, SyntaxKind::BinaryExpr);
    }
    node
}

/// `+`/`-`, the lower of the two arithmetic precedence levels.
fn additive(p: &mut Parser) -> MarkClosed {
    let mut node = multiplicative(p);
    while p.at_any(&[TokenKind::Plus, TokenKind::Minus]) {
        let m = p.open_before(node);
        p.advance();
        multiplicative(p);
        node = p.close(m, SyntaxKind::BinaryExpr);
    }
    node
}

/// `*`/`/`/`%`, the higher of the two arithmetic precedence levels.
fn multiplicative(p: &mut Parser) -> MarkClosed {
    let mut node = unary(p);
    while p.at_any(&[TokenKind::Star, TokenKind::Slash, TokenKind::Percent]) {
        let m = p.open_before(node);
        p.advance();
        unary(p);
        node = p.close(m, SyntaxKind::BinaryExpr);
    }
    node
}

fn unary(p: &mut Parser) -> MarkClosed {
    if p.at_any(&[TokenKind::Minus, TokenKind::Bang]) {
        let mark = p.open();
        p.advance();
        unary(p);
        p.close(mark, SyntaxKind::UnaryExpr)
    } else {
        postfix(p)
    }
}

/// `primary` followed by any run of member/class access, array access,
/// or call-argument suffixes. Consecutive `.`/`->` accesses collapse
/// into one `MemberClassAccess` node rather than nesting.
fn postfix(p: &mut Parser) -> MarkClosed {
    let mut node = primary(p);
    loop {
        if p.at_any(&[TokenKind::Dot, TokenKind::Arrow]) {
            let m = p.open_before(node);
            p.advance();
            p.expect(TokenKind::Ident, "a member name");
            node = p.close(m, SyntaxKind::MemberClassAccess);
        } else if p.at(TokenKind::LBracket) {
            let m = p.open_before(node);
            p.advance();
            condition(p);
            p.expect(TokenKind::RBracket, "']'");
            node = p.close(m, SyntaxKind::ArrayAccess);
        } else if p.at(TokenKind::LParen) {
            let m = p.open_before(node);
            arg_list(p);
            node = p.close(m, SyntaxKind::FunctionCall);
        } else {
            break;
        }
    }
    node
}

/// `(arg (':' Type)? (',' arg (':' Type)?)*)`
fn arg_list(p: &mut Parser) {
    let mark = p.open();
    p.expect(TokenKind::LParen, "'('");
    while !p.at(TokenKind::RParen) && !p.is_eof() {
        let arg_mark = p.open();
        condition(p);
        if p.eat(TokenKind::Colon) {
            p.expect(TokenKind::Ident, "a type name");
        }
        p.close(arg_mark, SyntaxKind::Arg);
        if !p.eat(TokenKind::Comma) {
            break;
        }
    }
    p.expect(TokenKind::RParen, "')'");
    p.close(mark, SyntaxKind::ArgList);
}

fn primary(p: &mut Parser) -> MarkClosed {
    let mark = p.open();
    if p.eat(TokenKind::Number) {
        p.close(mark, SyntaxKind::NumberLit)
    } else if p.eat(TokenKind::Float) {
        p.close(mark, SyntaxKind::FloatLit)
    } else if p.eat(TokenKind::StringLit) {
        p.close(mark, SyntaxKind::StringLit_)
    } else if p.at_any(&[TokenKind::True, TokenKind::False]) {
        p.advance();
        p.close(mark, SyntaxKind::BoolLit)
    } else if p.eat(TokenKind::Null) {
        p.close(mark, SyntaxKind::NullLit)
    } else if p.eat(TokenKind::This) {
        p.close(mark, SyntaxKind::ThisExpr)
    } else if p.eat(TokenKind::Pointer) {
        p.close(mark, SyntaxKind::PointerExpr)
    } else if p.eat(TokenKind::ReferenceExpr) {
        p.close(mark, SyntaxKind::ReferenceExprNode)
    } else if p.at(TokenKind::New) {
        p.advance();
        p.expect(TokenKind::Ident, "a class name");
        if p.at(TokenKind::LParen) {
            arg_list(p);
        } else if p.eat(TokenKind::LBracket) {
            condition(p);
            p.expect(TokenKind::RBracket, "']'");
        }
        p.close(mark, SyntaxKind::NewExpr)
    } else if p.eat(TokenKind::LParen) {
        condition(p);
        p.expect(TokenKind::RParen, "')'");
        p.close(mark, SyntaxKind::ParenExpr)
    } else if p.eat(TokenKind::Ident) {
        p.close(mark, SyntaxKind::IdenExpr)
    } else {
        p.advance_with_error("expected an expression");
        p.close(mark, SyntaxKind::ErrorNode)
    }
}
