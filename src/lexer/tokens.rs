//! Token recognition.
//!
//! Recognizers are tried in this order: digit, then letter/`_`, then `"`,
//! then operators, then single-char brackets/punctuation, then end-of-input,
//! then "otherwise it's an error".

use super::Lexer;
use super::error::LexError;
use crate::token::{Span, Token, TokenKind};

fn keyword(ident: &str) -> Option<TokenKind> {
    match ident {
        "if" => Some(TokenKind::If),
        "else" => Some(TokenKind::Else),
        "return" => Some(TokenKind::Return),
        "int" => Some(TokenKind::Int),
        "char" => Some(TokenKind::Char),
        "while" => Some(TokenKind::While),
        "for" => Some(TokenKind::For),
        _ => None,
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl<'a> Lexer<'a> {
    /// Reads the next token, assuming whitespace has already been skipped.
    pub(super) fn read_token(&mut self) -> Result<Token, LexError> {
        let start = self.pos;

        if self.is_eof() {
            return Ok(Token::new(TokenKind::Eof, "", Span::empty_at(start)));
        }

        let c = self.peek().expect("checked not eof above");

        if c.is_ascii_digit() {
            return self.read_number(start);
        }
        if is_ident_start(c) {
            return self.read_identifier(start);
        }
        if c == b'"' {
            return self.read_string(start);
        }
        if let Some(tok) = self.read_operator(start, c) {
            return Ok(tok);
        }
        if let Some(tok) = self.read_bracket_or_punct(start, c) {
            return Ok(tok);
        }

        self.advance();
        Err(LexError::unrecognized_character(
            c as char,
            Span::new(start, 1),
        ))
    }

    fn read_number(&mut self, start: usize) -> Result<Token, LexError> {
        let is_hex = self.peek() == Some(b'0') && matches!(self.peek_at(1), Some(b'x' | b'X'));

        if is_hex {
            self.advance(); // '0'
            self.advance(); // 'x'/'X'
            let digits_start = self.pos;
            while self.peek().is_some_and(|b| b.is_ascii_hexdigit()) {
                self.advance();
            }
            if self.pos == digits_start {
                // `0x` with no hex digits: report it at the cursor, same shape
                // as a bad suffix, rather than silently treating it as `0`.
                return Err(LexError::invalid_integer_suffix(
                    self.lexeme_from(digits_start),
                    Span::new(self.pos, 0),
                ));
            }
            let digits = self.lexeme_from(digits_start);
            let value = i64::from_str_radix(digits, 16).unwrap_or(0);
            self.reject_trailing_alnum(start)?;
            let lexeme = self.lexeme_from(start).to_string();
            let span = Span::new(start, lexeme.len());
            return Ok(Token::with_value(TokenKind::Num, lexeme, span, value));
        }

        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.advance();
        }
        let digits = self.lexeme_from(start);
        let value: i64 = digits.parse().unwrap_or(0);
        self.reject_trailing_alnum(start)?;
        let lexeme = self.lexeme_from(start).to_string();
        let span = Span::new(start, lexeme.len());
        Ok(Token::with_value(TokenKind::Num, lexeme, span, value))
    }

    /// A trailing alphanumeric run after the digits is an error.
    fn reject_trailing_alnum(&mut self, number_start: usize) -> Result<(), LexError> {
        let suffix_start = self.pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }
        if self.pos != suffix_start {
            let full = self.lexeme_from(number_start);
            return Err(LexError::invalid_integer_suffix(
                full,
                Span::new(number_start, self.pos - number_start),
            ));
        }
        Ok(())
    }

    fn read_identifier(&mut self, start: usize) -> Result<Token, LexError> {
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }
        let lexeme = self.lexeme_from(start).to_string();
        let span = Span::new(start, lexeme.len());
        let kind = keyword(&lexeme).unwrap_or(TokenKind::Ident);
        Ok(Token::new(kind, lexeme, span))
    }

    fn read_string(&mut self, start: usize) -> Result<Token, LexError> {
        self.advance(); // opening '"'
        loop {
            match self.peek() {
                Some(b'"') => {
                    self.advance();
                    let lexeme = self.lexeme_from(start).to_string();
                    let span = Span::new(start, lexeme.len());
                    return Ok(Token::new(TokenKind::String, lexeme, span));
                }
                Some(_) => self.advance(),
                None => {
                    return Err(LexError::unterminated_string(Span::new(
                        start,
                        self.pos - start,
                    )));
                }
            }
        }
    }

    /// Single- and two-char operators: `+ - * / < > ! =`, with the two-char
    /// forms `== != <= >=` looked ahead by one character.
    fn read_operator(&mut self, start: usize, c: u8) -> Option<Token> {
        let (one_char, two_char) = match c {
            b'+' => (TokenKind::Plus, None),
            b'-' => (TokenKind::Minus, None),
            b'*' => (TokenKind::Star, None),
            b'/' => (TokenKind::Slash, None),
            b'<' => (TokenKind::Lt, Some((b'=', TokenKind::Le))),
            b'>' => (TokenKind::Gt, Some((b'=', TokenKind::Ge))),
            b'!' => (TokenKind::Not, Some((b'=', TokenKind::Neq))),
            b'=' => (TokenKind::Assign, Some((b'=', TokenKind::Eq))),
            _ => return None,
        };

        self.advance();
        if let Some((expect, two_kind)) = two_char {
            if self.peek() == Some(expect) {
                self.advance();
                let lexeme = self.lexeme_from(start).to_string();
                let span = Span::new(start, lexeme.len());
                return Some(Token::new(two_kind, lexeme, span));
            }
        }
        let lexeme = self.lexeme_from(start).to_string();
        let span = Span::new(start, lexeme.len());
        Some(Token::new(one_char, lexeme, span))
    }

    fn read_bracket_or_punct(&mut self, start: usize, c: u8) -> Option<Token> {
        let kind = match c {
            b'(' => TokenKind::OpenParen,
            b')' => TokenKind::CloseParen,
            b'[' => TokenKind::OpenSquare,
            b']' => TokenKind::CloseSquare,
            b'{' => TokenKind::OpenBrace,
            b'}' => TokenKind::CloseBrace,
            b';' => TokenKind::Semicolon,
            b',' => TokenKind::Comma,
            b'.' => TokenKind::Period,
            b'&' => TokenKind::Addr,
            _ => return None,
        };
        self.advance();
        let lexeme = self.lexeme_from(start).to_string();
        let span = Span::new(start, lexeme.len());
        Some(Token::new(kind, lexeme, span))
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{LexErrorKind, Lexer};
    use crate::token::TokenKind;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let mut lex = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            let tok = lex.next().unwrap();
            let done = tok.kind == TokenKind::Eof;
            out.push(tok.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn decimal_number_carries_its_value() {
        let mut lex = Lexer::new("42");
        let tok = lex.next().unwrap();
        assert_eq!(tok.kind, TokenKind::Num);
        assert_eq!(tok.value, Some(42));
    }

    #[test]
    fn hex_number_carries_its_value() {
        let mut lex = Lexer::new("0x2a");
        let tok = lex.next().unwrap();
        assert_eq!(tok.kind, TokenKind::Num);
        assert_eq!(tok.value, Some(42));
    }

    #[test]
    fn uppercase_hex_prefix_and_digits_are_accepted() {
        let mut lex = Lexer::new("0XFF");
        let tok = lex.next().unwrap();
        assert_eq!(tok.value, Some(255));
    }

    #[test]
    fn number_with_trailing_letters_is_an_error() {
        let mut lex = Lexer::new("123abc");
        let err = lex.next().unwrap_err();
        assert_eq!(err.kind(), LexErrorKind::InvalidIntegerSuffix);
        assert!(err.message().contains("abc"));
    }

    #[test]
    fn keyword_identifiers_get_their_own_kind() {
        assert_eq!(
            kinds("if else return int char while for"),
            vec![
                TokenKind::If,
                TokenKind::Else,
                TokenKind::Return,
                TokenKind::Int,
                TokenKind::Char,
                TokenKind::While,
                TokenKind::For,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn plain_identifier_is_ident() {
        let mut lex = Lexer::new("counter_1");
        let tok = lex.next().unwrap();
        assert_eq!(tok.kind, TokenKind::Ident);
        assert_eq!(tok.lexeme, "counter_1");
    }

    #[test]
    fn string_literal_round_trips_its_lexeme() {
        let mut lex = Lexer::new("\"hi\"");
        let tok = lex.next().unwrap();
        assert_eq!(tok.kind, TokenKind::String);
        assert_eq!(tok.lexeme, "\"hi\"");
    }

    #[test]
    fn unterminated_string_is_fatal() {
        let mut lex = Lexer::new("\"hi");
        let err = lex.next().unwrap_err();
        assert_eq!(err.kind(), LexErrorKind::UnterminatedString);
    }

    #[test]
    fn two_char_operators_are_preferred_over_one_char() {
        assert_eq!(
            kinds("<= >= == !="),
            vec![TokenKind::Le, TokenKind::Ge, TokenKind::Eq, TokenKind::Neq, TokenKind::Eof]
        );
    }

    #[test]
    fn single_char_operators_fall_back_when_no_second_char_matches() {
        assert_eq!(
            kinds("< > = !"),
            vec![TokenKind::Lt, TokenKind::Gt, TokenKind::Assign, TokenKind::Not, TokenKind::Eof]
        );
    }

    #[test]
    fn ampersand_is_always_lexed_as_addr() {
        assert_eq!(kinds("&"), vec![TokenKind::Addr, TokenKind::Eof]);
    }

    #[test]
    fn brackets_and_punctuation() {
        assert_eq!(
            kinds("(){}[];,.&"),
            vec![
                TokenKind::OpenParen,
                TokenKind::CloseParen,
                TokenKind::OpenBrace,
                TokenKind::CloseBrace,
                TokenKind::OpenSquare,
                TokenKind::CloseSquare,
                TokenKind::Semicolon,
                TokenKind::Comma,
                TokenKind::Period,
                TokenKind::Addr,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unrecognized_character_is_an_error() {
        let mut lex = Lexer::new("@");
        let err = lex.next().unwrap_err();
        assert_eq!(err.kind(), LexErrorKind::UnrecognizedCharacter);
    }

    #[test]
    fn empty_input_yields_only_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }
}
