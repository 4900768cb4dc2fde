use space_common::TokenKind;
use space_lexer::lex;

#[test]
fn every_token_has_a_non_empty_span_except_eof() {
    let out = lex("var total:int = 0;\nfunction main() { return total; }\n");
    assert!(out.errors.is_empty());
    for token in &out.tokens {
        if token.kind == TokenKind::Eof {
            continue;
        }
        assert!(token.span.len() > 0, "{:?} has empty span", token.kind);
    }
}

#[test]
fn tokens_cover_the_source_without_gaps_other_than_trivia() {
    let src = "var a:int = 1;";
    let out = lex(src);
    assert!(out.errors.is_empty());
    let mut last_end = 0u32;
    for token in &out.tokens {
        if token.kind == TokenKind::Eof {
            continue;
        }
        assert!(token.span.start >= last_end);
        last_end = token.span.end;
    }
}

#[test]
fn class_with_constructor_and_modifiers_lexes_cleanly() {
    let src = r#"
        class Account {
            private var balance:int = 0;

            this::constructor(amount:int) {
                balance = amount;
            }

            global function deposit(amount:int) {
                balance += amount;
            }
        }
    "#;
    let out = lex(src);
    assert!(out.errors.is_empty());
    assert!(out.tokens.iter().any(|t| t.kind == TokenKind::ColonColon));
    assert!(out.tokens.iter().any(|t| t.kind == TokenKind::Private));
    assert!(out.tokens.iter().any(|t| t.kind == TokenKind::Global));
}
