//! End-to-end integration tests for the SPACE compiler frontend.
//!
//! Each test writes a `.space` source file, invokes the `compiler`
//! binary, and asserts on exit status and stderr diagnostics.

use std::path::PathBuf;
use std::process::Command;

fn find_compiler() -> PathBuf {
    let mut path = std::env::current_exe()
        .expect("cannot find current exe")
        .parent()
        .expect("cannot find parent dir")
        .to_path_buf();

    if path.file_name().map_or(false, |n| n == "deps") {
        path = path.parent().unwrap().to_path_buf();
    }

    let compiler = path.join("compiler");
    assert!(
        compiler.exists(),
        "compiler binary not found at {}. Run `cargo build -p spacec` first.",
        compiler.display()
    );
    compiler
}

fn run_on(source: &str) -> std::process::Output {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let file = dir.path().join("main.space");
    std::fs::write(&file, source).expect("failed to write source file");

    Command::new(find_compiler())
        .arg(&file)
        .output()
        .expect("failed to invoke compiler")
}

#[test]
fn well_formed_program_exits_success() {
    let output = run_on(
        r#"
            class Account {
                private var balance:int = 0;

                this::constructor(amount:int) {
                    balance = amount;
                }

                global function deposit(amount:int) {
                    balance += amount;
                }
            }
        "#,
    );
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn undeclared_name_is_reported_and_fails() {
    let output = run_on("function f() { return missing; }");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("undeclared name"), "stderr: {stderr}");
}

#[test]
fn misplaced_break_is_reported_and_fails() {
    let output = run_on("function f() { break; }");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not valid in this position"), "stderr: {stderr}");
}

#[test]
fn parse_error_on_missing_semicolon_is_reported() {
    let output = run_on("var x:int = 1");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ParseException"), "stderr: {stderr}");
}

#[test]
fn dump_tokens_prints_json_and_exits_success() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let file = dir.path().join("main.space");
    std::fs::write(&file, "var x:int = 1;").expect("failed to write source file");

    let output = Command::new(find_compiler())
        .arg(&file)
        .arg("--dump-tokens")
        .output()
        .expect("failed to invoke compiler");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.trim_start().starts_with('['), "stdout: {stdout}");
}

#[test]
fn missing_file_is_reported_as_an_error() {
    let output = Command::new(find_compiler())
        .arg("/nonexistent/path/does-not-exist.space")
        .output()
        .expect("failed to invoke compiler");
    assert!(!output.status.success());
}
