//! Whitespace skipping between tokens.
//!
//! Skips space, tab, CR, and LF between tokens. Line comments are not part
//! of the accepted language surface, so there is nothing else to skip here.

use super::Lexer;

impl<'a> Lexer<'a> {
    pub(super) fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::token::TokenKind;

    #[test]
    fn skips_mixed_whitespace_between_tokens() {
        let mut lex = Lexer::new("  \t\r\n  x");
        let tok = lex.next().unwrap();
        assert_eq!(tok.kind, TokenKind::Ident);
        assert_eq!(tok.span.start, 7);
    }
}
