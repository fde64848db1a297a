//! Lexical analysis error types.

use crate::token::Span;

/// Structural tag for a [`LexError`], so callers (and tests) can match on
/// error shape instead of parsing `message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A character that starts no valid token (e.g. `@`, `$`, `#`).
    UnrecognizedCharacter,
    /// A run of alphanumerics glued onto the end of a numeric literal, e.g.
    /// `123abc`.
    InvalidIntegerSuffix,
    /// A `"` literal that reaches end-of-input before its closing quote.
    UnterminatedString,
}

/// An error raised while turning source text into tokens.
///
/// Carries a human-readable `message` and the [`Span`] to underline in the
/// `error:`/caret-ruler diagnostic.
#[derive(Debug)]
pub struct LexError {
    kind: LexErrorKind,
    message: String,
    span: Span,
}

impl LexError {
    pub fn new(kind: LexErrorKind, message: impl Into<String>, span: Span) -> Self {
        LexError {
            kind,
            message: message.into(),
            span,
        }
    }

    pub fn unrecognized_character(c: char, span: Span) -> Self {
        LexError::new(
            LexErrorKind::UnrecognizedCharacter,
            format!("unrecognized character '{c}'"),
            span,
        )
    }

    pub fn invalid_integer_suffix(suffix: &str, span: Span) -> Self {
        LexError::new(
            LexErrorKind::InvalidIntegerSuffix,
            format!("invalid suffix '{suffix}' on integer constant"),
            span,
        )
    }

    pub fn unterminated_string(span: Span) -> Self {
        LexError::new(LexErrorKind::UnterminatedString, "unterminated string literal", span)
    }

    pub fn kind(&self) -> LexErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LexError {}
