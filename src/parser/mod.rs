//! Recursive-descent parser with inline name resolution and type checking.
//!
//! The parser is the busiest phase in the pipeline: it drives Pratt
//! expression parsing, hand-written statement and declaration grammar, scope
//! management, and frame-offset bookkeeping all in one pass. By the time
//! [`Parser::parse`] returns, every expression node in the resulting
//! [`Program`] already carries its resolved [`crate::types::Type`]; there is
//! no separate type-checking pass.
//!
//! # Module Structure
//!
//! - [`error`] - [`ParseError`]/[`ParseErrorKind`]
//! - [`typecheck`] - Pure `Type`-pair rules used while building expression nodes
//! - `helpers` - Token navigation (`advance`, `back`, `equal`, `consume`, `skip`, `expect`)
//! - `decl` - Top-level items, type specifiers, declarators, function definitions
//! - `stmt` - Statement parsing
//! - `expr` - Pratt expression parsing
//!
//! # See Also
//!
//! - [`crate::scope`] is owned here for the whole compile, one [`Scope`] per
//!   [`Parser`], pushed/popped on block entry/exit.
//! - [`crate::codegen`] consumes the [`Program`] this produces.

mod decl;
mod error;
mod expr;
mod helpers;
mod stmt;
pub mod typecheck;

pub use error::{ParseError, ParseErrorKind};

use crate::ast::{Program, StrDef};
use crate::scope::Scope;
use crate::token::Token;

/// Drives the whole front end: token buffer, scope stack, the per-function
/// frame accumulator, and the string-literal collector.
pub struct Parser {
    tokens: Vec<Token>,
    cur: usize,
    prev: usize,
    scope: Scope,
    /// Anonymous string literals encountered so far, to be emitted as
    /// top-level globals alongside the rest of the program.
    strings: Vec<StrDef>,
    next_string_label: u32,
    /// Bytes reserved by local declarators in the function currently being
    /// parsed; reset to 0 at the start of each function body.
    local_bytes: i64,
}

impl Parser {
    /// Builds a parser over an already-lexed token stream. `tokens` must end
    /// with an `Eof` token, as every [`crate::lexer::Lexer`] stream does.
    pub fn new(tokens: Vec<Token>) -> Self {
        assert!(!tokens.is_empty(), "token stream must include Eof");
        Parser {
            tokens,
            cur: 0,
            prev: 0,
            scope: Scope::new(),
            strings: Vec::new(),
            next_string_label: 0,
            local_bytes: 0,
        }
    }

    /// Parses the whole token stream into a [`Program`], or stops at the
    /// first error. All compile-time failures are fatal; there is no
    /// recovery or continuation past the first one.
    pub fn parse(&mut self) -> Result<Program, ParseError> {
        let mut items = Vec::new();
        while !self.is_eof() {
            if self.consume(crate::token::TokenKind::Semicolon) {
                continue;
            }
            items.push(self.parse_top_level_item()?);
        }
        Ok(Program::new(items, std::mem::take(&mut self.strings)))
    }

    fn next_label(&mut self) -> u32 {
        let id = self.next_string_label;
        self.next_string_label += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::StmtKind;
    use crate::lexer::Lexer;

    fn parse(src: &str) -> Program {
        let tokens = Lexer::new(src).tokenize().expect("lex");
        Parser::new(tokens).parse().expect("parse")
    }

    #[test]
    fn empty_semicolons_at_top_level_are_absorbed() {
        let program = parse(";;; int main() { return 0; }");
        assert_eq!(program.items.len(), 1);
    }

    #[test]
    fn function_body_with_mixed_precedence_arithmetic_parses() {
        let program = parse("int main(){return 1+2*3;}");
        assert_eq!(program.items.len(), 1);
        assert!(matches!(&program.items[0].kind, StmtKind::FuncDef(f) if f.name == "main"));
    }
}
