//! The SPACE lexer: a single streaming pass from source text to tokens.

mod cursor;

use cursor::Cursor;
use space_common::{keyword_from_str, Category, Diagnostic, Span, Token, TokenKind};

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    (c.is_ascii_alphanumeric() || c == '_') && c != '#'
}

pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    tokens: Vec<Token>,
    errors: Vec<Diagnostic>,
}

pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<Diagnostic>,
}

pub fn lex(source: &str) -> LexOutput {
    Lexer::new(source).run()
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn run(mut self) -> LexOutput {
        loop {
            self.skip_trivia();
            if self.cursor.is_eof() {
                break;
            }
            let start = self.cursor.pos();
            let Some(c) = self.cursor.advance() else {
                break;
            };
            self.lex_from(c, start);
        }
        let eof = self.cursor.pos();
        self.tokens.push(Token::new(TokenKind::Eof, Span::at(eof)));
        LexOutput {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    fn push(&mut self, kind: TokenKind, start: u32) {
        self.tokens.push(Token::new(kind, Span::new(start, self.cursor.pos())));
    }

    fn error(&mut self, message: impl Into<String>, start: u32) {
        self.errors.push(Diagnostic::new(
            Category::LexException,
            message,
            Span::new(start, self.cursor.pos()),
        ));
        self.push(TokenKind::Error, start);
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.peek() {
                c if c.is_whitespace() => {
                    self.cursor.advance();
                }
                '/' if self.cursor.peek_next() == '/' => {
                    self.cursor.eat_while(|c| c != '\n');
                }
                '/' if self.cursor.peek_next() == '*' => {
                    self.cursor.advance();
                    self.cursor.advance();
                    loop {
                        if self.cursor.is_eof() {
                            break;
                        }
                        if self.cursor.peek() == '*' && self.cursor.peek_next() == '/' {
                            self.cursor.advance();
                            self.cursor.advance();
                            break;
                        }
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn lex_from(&mut self, c: char, start: u32) {
        match c {
            '+' => self.lex_plus(start),
            '-' => self.lex_minus(start),
            '*' => self.lex_star(start),
            '/' => self.push(TokenKind::Slash, start),
            '%' => self.push(TokenKind::Percent, start),
            '=' => self.lex_eq(start),
            '!' => self.lex_bang(start),
            '<' => self.lex_lt(start),
            '>' => self.lex_gt(start),
            '(' => self.push(TokenKind::LParen, start),
            ')' => self.push(TokenKind::RParen, start),
            '{' => self.push(TokenKind::LBrace, start),
            '}' => self.push(TokenKind::RBrace, start),
            '[' => self.push(TokenKind::LBracket, start),
            ']' => self.push(TokenKind::RBracket, start),
            ',' => self.push(TokenKind::Comma, start),
            ';' => self.push(TokenKind::Semicolon, start),
            ':' => self.lex_colon(start),
            '.' => self.push(TokenKind::Dot, start),
            '#' => self.push(TokenKind::Hash, start),
            '?' => self.push(TokenKind::Question, start),
            '&' => self.lex_reference(start),
            '"' => self.lex_string(start),
            c if c.is_ascii_digit() => self.lex_number(c, start),
            c if is_ident_start(c) => self.lex_ident(start),
            _ => self.error(format!("unexpected symbol '{c}'"), start),
        }
    }

    fn lex_plus(&mut self, start: u32) {
        match self.cursor.peek() {
            '+' => {
                self.cursor.advance();
                self.push(TokenKind::PlusPlus, start);
            }
            '=' => {
                self.cursor.advance();
                self.push(TokenKind::PlusEq, start);
            }
            _ => self.push(TokenKind::Plus, start),
        }
    }

    fn lex_minus(&mut self, start: u32) {
        match self.cursor.peek() {
            '-' => {
                self.cursor.advance();
                self.push(TokenKind::MinusMinus, start);
            }
            '=' => {
                self.cursor.advance();
                self.push(TokenKind::MinusEq, start);
            }
            '>' => {
                self.cursor.advance();
                self.push(TokenKind::Arrow, start);
            }
            _ => self.push(TokenKind::Minus, start),
        }
    }

    /// A run of one or more `*` immediately followed by an identifier is a
    /// pointer-declarator token (`*count`, `**matrix`); a lone `*` not
    /// followed by an identifier is multiplication.
    fn lex_star(&mut self, start: u32) {
        if self.cursor.peek() == '=' {
            self.cursor.advance();
            self.push(TokenKind::StarEq, start);
            return;
        }
        let mut lookahead = self.cursor.peek();
        let mut saw_star = true;
        while lookahead == '*' {
            self.cursor.advance();
            lookahead = self.cursor.peek();
            saw_star = true;
        }
        if saw_star && is_ident_start(lookahead) {
            self.cursor.advance();
            self.cursor.eat_while(is_ident_continue);
            self.push(TokenKind::Pointer, start);
        } else {
            self.push(TokenKind::Star, start);
        }
    }

    /// `&(` opens a reference expression: everything up to the matching
    /// `)` is absorbed verbatim into a single token, since the contents
    /// may themselves contain arbitrary pointer/array syntax the normal
    /// tokenizer isn't meant to re-interpret.
    fn lex_reference(&mut self, start: u32) {
        if self.cursor.peek() != '(' {
            self.error("expected '(' after '&'", start);
            return;
        }
        self.cursor.advance();
        let mut depth = 1usize;
        loop {
            if self.cursor.is_eof() {
                self.error("unterminated reference expression", start);
                return;
            }
            match self.cursor.advance() {
                Some('(') => depth += 1,
                Some(')') => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
        self.push(TokenKind::ReferenceExpr, start);
    }

    fn lex_eq(&mut self, start: u32) {
        if self.cursor.peek() == '=' {
            self.cursor.advance();
            self.push(TokenKind::EqEq, start);
        } else if self.cursor.peek() == '>' {
            self.cursor.advance();
            self.push(TokenKind::FatArrow, start);
        } else {
            self.push(TokenKind::Eq, start);
        }
    }

    fn lex_bang(&mut self, start: u32) {
        if self.cursor.peek() == '=' {
            self.cursor.advance();
            self.push(TokenKind::BangEq, start);
        } else {
            self.push(TokenKind::Bang, start);
        }
    }

    fn lex_lt(&mut self, start: u32) {
        if self.cursor.peek() == '=' {
            self.cursor.advance();
            self.push(TokenKind::LtEq, start);
        } else {
            self.push(TokenKind::Lt, start);
        }
    }

    fn lex_gt(&mut self, start: u32) {
        if self.cursor.peek() == '=' {
            self.cursor.advance();
            self.push(TokenKind::GtEq, start);
        } else {
            self.push(TokenKind::Gt, start);
        }
    }

    fn lex_colon(&mut self, start: u32) {
        if self.cursor.peek() == ':' {
            self.cursor.advance();
            self.push(TokenKind::ColonColon, start);
        } else {
            self.push(TokenKind::Colon, start);
        }
    }

    fn lex_string(&mut self, start: u32) {
        loop {
            if self.cursor.is_eof() {
                self.error("unterminated string literal", start);
                return;
            }
            match self.cursor.advance() {
                Some('\\') => {
                    if !self.cursor.is_eof() {
                        self.cursor.advance();
                    }
                }
                Some('"') => break,
                Some('\n') | None => {
                    self.error("unterminated string literal", start);
                    return;
                }
                _ => {}
            }
        }
        self.push(TokenKind::StringLit, start);
    }

    /// Integers, and floats formed by a `.` between two digit runs.
    fn lex_number(&mut self, first: char, start: u32) {
        let _ = first;
        self.cursor.eat_while(|c| c.is_ascii_digit());
        if self.cursor.peek() == '.' && self.cursor.peek_next().is_ascii_digit() {
            self.cursor.advance();
            self.cursor.eat_while(|c| c.is_ascii_digit());
            self.push(TokenKind::Float, start);
        } else {
            self.push(TokenKind::Number, start);
        }
    }

    fn lex_ident(&mut self, start: u32) {
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice(start);
        let kind = keyword_from_str(text).unwrap_or(TokenKind::Ident);
        self.push(kind, start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_a_var_declaration() {
        use TokenKind::*;
        assert_eq!(
            kinds("var x:int = 3 + 4 * 5;"),
            vec![Var, Ident, Colon, Ident, Eq, Number, Plus, Number, Star, Number, Semicolon, Eof]
        );
    }

    #[test]
    fn skips_line_and_block_comments() {
        use TokenKind::*;
        assert_eq!(
            kinds("var x:int = 1; // trailing\n/* block */ var y:int = 2;"),
            vec![
                Var, Ident, Colon, Ident, Eq, Number, Semicolon, Var, Ident, Colon, Ident, Eq,
                Number, Semicolon, Eof
            ]
        );
    }

    #[test]
    fn classifies_keywords_not_identifiers() {
        use TokenKind::*;
        assert_eq!(kinds("class Foo extends Bar with IA, IB {"), vec![
            Class, Ident, Extends, Ident, With, Ident, Comma, Ident, LBrace, Eof
        ]);
    }

    #[test]
    fn pointer_run_followed_by_identifier_is_a_pointer_token() {
        use TokenKind::*;
        assert_eq!(kinds("**matrix"), vec![Pointer, Eof]);
        assert_eq!(kinds("3 * x"), vec![Number, Star, Ident, Eof]);
    }

    #[test]
    fn reference_expression_absorbs_to_matching_paren() {
        use TokenKind::*;
        assert_eq!(kinds("&(a[i + 1])"), vec![ReferenceExpr, Eof]);
    }

    #[test]
    fn float_requires_digit_before_and_after_dot() {
        use TokenKind::*;
        assert_eq!(kinds("3.14"), vec![Float, Eof]);
        assert_eq!(kinds("3 . 14"), vec![Number, Dot, Number, Eof]);
    }

    #[test]
    fn string_with_escaped_quote() {
        use TokenKind::*;
        assert_eq!(kinds(r#""hello \"world\"""#), vec![StringLit, Eof]);
    }

    #[test]
    fn unterminated_string_is_reported() {
        let out = lex("\"oops");
        assert_eq!(out.errors.len(), 1);
        assert!(out.errors[0].message.contains("unterminated string"));
    }

    #[test]
    fn unterminated_reference_is_reported() {
        let out = lex("&(a[0]");
        assert_eq!(out.errors.len(), 1);
        assert!(out.errors[0].message.contains("unterminated reference"));
    }

    #[test]
    fn unexpected_symbol_is_reported() {
        let out = lex("var x = @;");
        assert_eq!(out.errors.len(), 1);
        assert!(out.errors[0].message.contains("unexpected symbol"));
    }

    #[test]
    fn two_char_operators_upgrade() {
        use TokenKind::*;
        assert_eq!(
            kinds("i++ j-- k+=1 m-=1 n*=2 o/=2 a==b c!=d e<=f g>=h x=>y p->q"),
            vec![
                Ident, PlusPlus, Ident, MinusMinus, Ident, PlusEq, Number, Ident, MinusEq,
                Number, Ident, StarEq, Number, Ident, SlashEq, Number, Ident, EqEq, Ident, Ident,
                BangEq, Ident, Ident, LtEq, Ident, Ident, GtEq, Ident, Ident, FatArrow, Ident,
                Ident, Arrow, Ident, Eof
            ]
        );
    }
}
