//! Token navigation and the small consume/expect vocabulary every other
//! parser submodule is built from.

use super::Parser;
use super::error::ParseError;
use crate::token::{Span, Token, TokenKind};

impl Parser {
    pub(super) fn current(&self) -> &Token {
        &self.tokens[self.cur]
    }

    pub(super) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    pub(super) fn current_span(&self) -> Span {
        self.current().span
    }

    pub(super) fn is_eof(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    /// Appends the next token and moves `cur` onto it, remembering the
    /// previous position in `prev`. A no-op past `Eof`.
    pub(super) fn advance(&mut self) {
        if !self.is_eof() {
            self.prev = self.cur;
            self.cur += 1;
        }
    }

    /// Steps `cur` back to `prev`, undoing exactly one `advance()`. Used only
    /// to peek past an identifier when disambiguating a function definition
    /// from a global variable declaration.
    pub(super) fn back(&mut self) {
        self.cur = self.prev;
    }

    pub(super) fn equal(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consumes the current token and returns `true` if it matches `kind`;
    /// otherwise leaves the cursor alone and returns `false`.
    pub(super) fn consume(&mut self, kind: TokenKind) -> bool {
        if self.equal(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes `kind` or raises a missing-delimiter error naming it.
    pub(super) fn skip(&mut self, kind: TokenKind, expected_display: &str) -> Result<(), ParseError> {
        if self.consume(kind) {
            Ok(())
        } else {
            Err(ParseError::missing_delimiter(expected_display, self.current_span()))
        }
    }

    /// Like `skip`, but never advances past a mismatch, since consuming the
    /// wrong token here would desynchronize later recovery-free parsing.
    pub(super) fn expect(&mut self, kind: TokenKind, expected_display: &str) -> Result<(), ParseError> {
        if self.equal(kind) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::unexpected_token(
                expected_display,
                self.current().kind.describe(),
                self.current_span(),
            ))
        }
    }

    /// Consumes and returns an identifier token's lexeme, or errors. A
    /// keyword in identifier position gets its own diagnostic rather than the
    /// generic "expected an identifier, found ...".
    pub(super) fn expect_ident(&mut self) -> Result<Token, ParseError> {
        if self.equal(TokenKind::Ident) {
            let tok = self.current().clone();
            self.advance();
            Ok(tok)
        } else if matches!(
            self.current_kind(),
            TokenKind::If | TokenKind::Else | TokenKind::Return | TokenKind::Int | TokenKind::Char
                | TokenKind::While | TokenKind::For
        ) {
            Err(ParseError::reserved_keyword_as_identifier(
                self.current().kind.describe(),
                self.current_span(),
            ))
        } else {
            Err(ParseError::unexpected_token(
                "an identifier",
                self.current().kind.describe(),
                self.current_span(),
            ))
        }
    }
}
