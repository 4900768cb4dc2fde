//! Integration tests for the semantic analyzer, exercised against
//! small complete programs rather than individual `Analyzer` methods.

use space_sema::analyze;

fn diagnostics(src: &str) -> Vec<String> {
    let parse = space_parser::parse(src);
    assert!(!parse.has_errors(), "unexpected parse errors: {:?}", parse.errors);
    let result = analyze(&parse);
    result.diagnostics.iter().map(|d| d.message.clone()).collect()
}

#[test]
fn arithmetic_expression_resolves_cleanly() {
    let diags = diagnostics("var x:int = 3 + 4 * 5;");
    assert!(diags.is_empty(), "{diags:?}");
}

#[test]
fn using_an_undeclared_name_is_reported() {
    let diags = diagnostics("function f() { return missing; }");
    assert!(diags.iter().any(|d| d.contains("undeclared name `missing`")));
}

#[test]
fn redeclaring_a_name_in_the_same_scope_is_reported() {
    let diags = diagnostics("function f() { var a:int = 1; var a:int = 2; }");
    assert!(diags.iter().any(|d| d.contains("already declared")));
}

#[test]
fn shadowing_in_a_nested_block_is_not_an_error() {
    let diags = diagnostics(
        r#"
        function f() {
            var a:int = 1;
            if (true) {
                var a:int = 2;
            }
        }
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
}

#[test]
fn break_outside_a_loop_or_check_is_reported() {
    let diags = diagnostics("function f() { break; }");
    assert!(diags.iter().any(|d| d.contains("`break` is not valid")));
}

#[test]
fn break_inside_a_while_loop_is_accepted() {
    let diags = diagnostics("function f() { while (true) { break; } }");
    assert!(diags.is_empty(), "{diags:?}");
}

#[test]
fn break_inside_a_check_clause_is_accepted() {
    let diags = diagnostics(
        r#"
        function f() {
            check (1) {
                is 1:
                    break;
            }
        }
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
}

#[test]
fn return_outside_a_function_is_reported() {
    let diags = diagnostics("return 1;");
    assert!(diags.iter().any(|d| d.contains("`return` is not valid")));
}

#[test]
fn assigning_to_a_const_is_reported() {
    let diags = diagnostics("function f() { const a:int = 1; a = 2; }");
    assert!(diags.iter().any(|d| d.contains("cannot assign to constant `a`")));
}

#[test]
fn unknown_class_type_in_a_declaration_is_reported() {
    let diags = diagnostics("var a:Nonexistent = null;");
    assert!(diags.iter().any(|d| d.contains("unknown type `Nonexistent`")));
}

#[test]
fn class_instantiation_resolves_known_classes() {
    let diags = diagnostics(
        r#"
        class Widget {
            this::constructor() {}
        }
        function f() {
            var w:Widget = new Widget();
        }
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
}

#[test]
fn instantiating_an_unknown_class_is_reported() {
    let diags = diagnostics("function f() { var w:Widget = new Widget(); }");
    assert!(diags.iter().any(|d| d.contains("unknown type `Widget`")));
}

#[test]
fn private_field_access_from_outside_the_class_is_reported() {
    let diags = diagnostics(
        r#"
        class Account {
            private var balance:int = 0;
            this::constructor() {}
        }
        function f() {
            var a:Account = new Account();
            var b:int = a->balance;
        }
        "#,
    );
    assert!(diags.iter().any(|d| d.contains("not accessible from this context")));
}

#[test]
fn private_field_access_from_inside_the_class_is_accepted() {
    let diags = diagnostics(
        r#"
        class Account {
            private var balance:int = 0;

            this::constructor(amount:int) {
                balance = amount;
            }

            global function read() {
                return this->balance;
            }
        }
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
}

#[test]
fn analysis_is_deterministic_across_repeated_runs() {
    let src = r#"
        class Account {
            private var balance:int = 0;
            this::constructor(amount:int) { balance = amount; }
            global function deposit(amount:int) { balance += amount; }
        }
        function f() {
            var a:Account = new Account();
            break;
        }
    "#;
    let parse = space_parser::parse(src);
    let first: Vec<String> = analyze(&parse).diagnostics.iter().map(|d| d.message.clone()).collect();
    let second: Vec<String> = analyze(&parse).diagnostics.iter().map(|d| d.message.clone()).collect();
    assert_eq!(first, second);
}
