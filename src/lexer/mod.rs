//! Converts source text into a stream of [`Token`]s.
//!
//! # Module Structure
//!
//! - [`cursor`] - Byte-level position tracking
//! - [`skip`] - Whitespace skipping between tokens
//! - [`tokens`] - Token recognizers (numbers, identifiers, strings, operators, punctuation)
//! - [`error`] - [`LexError`]/[`LexErrorKind`]
//!
//! # See Also
//!
//! - [`crate::parser`] pulls tokens from a [`Lexer`] one at a time via `next()`.

mod cursor;
mod error;
mod skip;
mod tokens;

pub use error::{LexError, LexErrorKind};

use crate::token::Token;

/// Turns a source string into tokens, one at a time.
///
/// Holds the source both as `&str` (for building lexeme slices) and as
/// `&[u8]` (for cheap, UTF-8-boundary-free scanning, since the grammar is
/// ASCII only, see [`cursor`]).
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    /// Reads and returns the next token, skipping any leading whitespace.
    ///
    /// Returns `Ok(Token { kind: TokenKind::Eof, .. })` forever once the
    /// input is exhausted, rather than signalling end-of-stream through the
    /// `Result`; lexical errors are the only `Err` case.
    pub fn next(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        self.read_token()
    }

    /// Lexes the entire input into a `Vec<Token>`, ending with `Eof`.
    ///
    /// A convenience for callers (tests, tools) that want the whole token
    /// stream up front; the parser itself drives [`Lexer::next`] directly.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next()?;
            let is_eof = tok.kind == crate::token::TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                return Ok(tokens);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn tokenize_collects_every_token_through_eof() {
        let tokens = Lexer::new("int x;").tokenize().unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Int, TokenKind::Ident, TokenKind::Semicolon, TokenKind::Eof]
        );
    }

    #[test]
    fn next_keeps_returning_eof_past_the_end() {
        let mut lex = Lexer::new("");
        assert_eq!(lex.next().unwrap().kind, TokenKind::Eof);
        assert_eq!(lex.next().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn tokenize_stops_at_the_first_lexical_error() {
        let err = Lexer::new("x @ y").tokenize().unwrap_err();
        assert_eq!(err.kind(), LexErrorKind::UnrecognizedCharacter);
    }
}
