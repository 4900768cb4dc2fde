//! The SPACE parser: tokenizes with `space_lexer`, then builds a
//! lossless `rowan` concrete syntax tree via an event-based recursive
//! descent parser, with a typed AST layer on top.

pub mod ast;
pub mod cst;
pub mod error;
pub mod parser;
pub mod syntax_kind;

use space_common::Diagnostic;

use ast::AstNode;
use cst::SyntaxNode;

pub struct Parse {
    green_node: rowan::GreenNode,
    pub errors: Vec<Diagnostic>,
}

impl Parse {
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green_node.clone())
    }

    pub fn tree(&self) -> ast::SourceFile {
        ast::SourceFile::cast(self.syntax()).expect("source file is always the root node")
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub fn parse(source: &str) -> Parse {
    let lexed = space_lexer::lex(source);
    let mut p = parser::Parser::new(&lexed.tokens, source);
    parser::items::source_file(&mut p);
    let (green_node, parse_errors) = p.build_tree();
    let mut errors = lexed.errors;
    errors.extend(parse_errors);
    Parse { green_node, errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ast::AstNode;
    use syntax_kind::SyntaxKind;

    #[test]
    fn parses_a_var_declaration() {
        let parse = parse("var x:int = 3 + 4 * 5;");
        assert!(!parse.has_errors());
        let root = parse.syntax();
        let decl = root.first_child().unwrap();
        assert_eq!(decl.kind(), SyntaxKind::VarDecl);
    }

    #[test]
    fn parses_array_and_conditional_and_class_instance_vars() {
        for (src, kind) in [
            ("var a:int[5];", SyntaxKind::ArrayVarDecl),
            ("var a:int = flag ? 1 : 2;", SyntaxKind::ConditionalVarDecl),
            ("var a:Foo = new Foo();", SyntaxKind::ClassInstanceVarDecl),
            ("const a:int = 1;", SyntaxKind::ConstDecl),
        ] {
            let parse = parse(src);
            assert!(!parse.has_errors(), "{src}: {:?}", parse.errors);
            let decl = parse.syntax().first_child().unwrap();
            assert_eq!(decl.kind(), kind, "for {src}");
        }
    }

    #[test]
    fn parses_a_class_with_constructor_and_modifiers() {
        let src = r#"
            class Account extends Entity with Serializable, Comparable {
                private var balance:int = 0;

                this::constructor(amount:int) {
                    balance = amount;
                }

                global function deposit(amount:int) {
                    balance += amount;
                }
            }
        "#;
        let parse = parse(src);
        assert!(!parse.has_errors(), "{:?}", parse.errors);
        let class = ast::ClassDecl::cast(parse.syntax().first_child().unwrap()).unwrap();
        assert_eq!(class.name().as_deref(), Some("Account"));
        assert_eq!(class.extends().unwrap().base_name().as_deref(), Some("Entity"));
        assert_eq!(
            class.interfaces().unwrap().interface_names(),
            vec!["Serializable".to_string(), "Comparable".to_string()]
        );
        assert!(class.constructors().next().is_some());
        assert_eq!(class.functions().count(), 1);
    }

    #[test]
    fn parses_if_else_if_else_chain() {
        let src = r#"
            function classify(n:int) {
                if (n < 0) {
                    return 0;
                } else if (n == 0) {
                    return 1;
                } else {
                    return 2;
                }
            }
        "#;
        let parse = parse(src);
        assert!(!parse.has_errors(), "{:?}", parse.errors);
    }

    #[test]
    fn parses_while_do_while_for_check_try() {
        let src = r#"
            function loopy() {
                while (true) {
                    break;
                }
                do {
                    continue;
                } while (false);
                for (var i:int = 0; i < 10; i++) {
                }
                check (1) {
                    is 1:
                        return;
                }
                try {
                    return;
                } catch (Exception e) {
                    return;
                }
            }
        "#;
        let parse = parse(src);
        assert!(!parse.has_errors(), "{:?}", parse.errors);
    }

    #[test]
    fn lone_boolean_literal_is_accepted_as_a_full_condition() {
        let parse = parse("function f() { if (true) { return; } }");
        assert!(!parse.has_errors(), "{:?}", parse.errors);
    }

    #[test]
    fn reports_a_parse_error_on_missing_semicolon() {
        let parse = parse("var x:int = 1");
        assert!(parse.has_errors());
    }

    #[test]
    fn tree_is_acyclic_by_construction() {
        // rowan nodes are arena-backed with parent pointers, not
        // Rc/Weak cycles, so traversal always terminates.
        let parse = parse("var x:int = 1;\nvar y:int = 2;\n");
        let root = parse.syntax();
        let mut count = 0;
        for _ in root.descendants() {
            count += 1;
            assert!(count < 10_000, "runaway traversal suggests a cycle");
        }
    }
}
