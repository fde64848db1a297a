//! CLI entry point.
//!
//! ```text
//! mcc '<source text>'
//! ```
//!
//! The source program is passed as a single command-line argument rather
//! than a file path, so there is no file to read and no filename to thread
//! through diagnostics; the whole pipeline is lex -> parse -> emit to stdout.

use clap::Parser as ClapParser;

use mcc::codegen::Codegen;
use mcc::diagnostics;
use mcc::lexer::{LexError, Lexer};
use mcc::parser::{ParseError, Parser};

/// A single-file compiler for a small statically-typed C-like language,
/// emitting AT&T x86-64 assembly to stdout.
#[derive(ClapParser)]
#[command(name = "mcc")]
#[command(about = "A compiler for a small statically-typed C-like language", long_about = None)]
struct Cli {
    /// The program source, passed as a single argument rather than a file.
    source: String,
}

/// A compilation error from any phase of the pipeline, unified so `main` has
/// one place to render a diagnostic and pick an exit code.
enum CompileError {
    Lex(LexError),
    Parse(ParseError),
}

impl CompileError {
    fn render(&self, source: &str) -> String {
        match self {
            CompileError::Lex(e) => diagnostics::render(source, e.span(), e.message()),
            CompileError::Parse(e) => diagnostics::render(source, e.span(), e.message()),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match compile(&cli.source) {
        Ok(asm) => print!("{asm}"),
        Err(err) => {
            eprintln!("{}", err.render(&cli.source));
            std::process::exit(1);
        }
    }
}

/// Runs the whole pipeline over `source` and returns the emitted assembly
/// text, or the first error any phase raised. Compilation stops at the
/// first failure.
fn compile(source: &str) -> Result<String, CompileError> {
    let tokens = Lexer::new(source).tokenize().map_err(CompileError::Lex)?;

    let mut parser = Parser::new(tokens);
    let program = parser.parse().map_err(CompileError::Parse)?;

    let mut out = Vec::new();
    Codegen::new(&mut out)
        .compile(&program)
        .expect("writing to an in-memory buffer cannot fail");

    Ok(String::from_utf8(out).expect("emitted assembly is always valid UTF-8"))
}
