//! The SPACE compiler frontend CLI.
//!
//! Provides the `compiler` command:
//!
//! - `compiler <path>` - lex, parse, and semantically analyze a SPACE
//!   source file, reporting diagnostics in the fixed plain-text format.
//!
//! Options:
//! - `--dump-tokens` - print the token stream as JSON instead of compiling
//! - `--dump-ast` - print the concrete syntax tree instead of compiling
//! - `--timing` - print per-stage wall-clock timings to stderr

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;

use space_common::{Category, Diagnostic, SourceBuffer};

#[derive(Parser)]
#[command(name = "compiler", version, about = "The SPACE compiler frontend")]
struct Cli {
    /// Path to a SPACE source file
    path: PathBuf,

    /// Print the token stream as JSON instead of compiling
    #[arg(long = "dump-tokens")]
    dump_tokens: bool,

    /// Print the concrete syntax tree instead of compiling
    #[arg(long = "dump-ast")]
    dump_ast: bool,

    /// Print per-stage wall-clock timings to stderr
    #[arg(long)]
    timing: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let text = std::fs::read_to_string(&cli.path)
        .map_err(|e| format!("failed to read '{}': {e}", cli.path.display()))?;
    let file_name = cli.path.display().to_string();
    let buf = SourceBuffer::new(file_name, text.clone());

    let lex_start = Instant::now();
    let lexed = space_lexer::lex(&text);
    let lex_elapsed = lex_start.elapsed();

    if cli.dump_tokens {
        let json = serde_json::to_string_pretty(&lexed.tokens)
            .map_err(|e| format!("failed to serialize tokens: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    let parse_start = Instant::now();
    let parse = space_parser::parse(&text);
    let parse_elapsed = parse_start.elapsed();

    if cli.dump_ast {
        println!("{:#?}", parse.syntax());
        return Ok(());
    }

    let sema_start = Instant::now();
    let result = space_sema::analyze(&parse);
    let sema_elapsed = sema_start.elapsed();

    if cli.timing {
        eprintln!("lex:    {lex_elapsed:?}");
        eprintln!("parse:  {parse_elapsed:?}");
        eprintln!("sema:   {sema_elapsed:?}");
    }

    let mut diagnostics = lexed.errors;
    diagnostics.extend(parse.errors);
    diagnostics.extend(result.diagnostics);

    let has_errors = report_diagnostics(&buf, &diagnostics);
    for external in &result.externals {
        eprintln!("include: {}", external.path);
    }

    if has_errors {
        return Err("compilation failed due to errors above".to_string());
    }
    Ok(())
}

/// Prints each diagnostic in the fixed plain-text caret format. Returns
/// true if any diagnostic was an actual error (every category this
/// crate produces currently is one; kept as a predicate rather than a
/// bare `!diagnostics.is_empty()` so a future warning-level `Category`
/// doesn't silently start failing builds).
fn report_diagnostics(buf: &SourceBuffer, diagnostics: &[Diagnostic]) -> bool {
    let mut has_errors = false;
    for diag in diagnostics {
        has_errors |= is_error(diag.category);
        eprintln!("{}", diag.render(buf));
    }
    has_errors
}

fn is_error(category: Category) -> bool {
    matches!(
        category,
        Category::LexException
            | Category::ParseException
            | Category::Exception
            | Category::AlreadyDefinedException
            | Category::TypeMismatchException
            | Category::ArityMismatchException
            | Category::ModifierException
            | Category::StatementMisplacementException
            | Category::WrongAccessorException
            | Category::NoSuchArrayDimensionException
    )
}
