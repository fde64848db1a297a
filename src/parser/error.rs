//! Parse-time error types.
//!
//! Covers every category except the lexical ones, which are
//! [`crate::lexer::LexError`]'s job: missing delimiters, missing/unexpected
//! expressions, name resolution, and type mismatches. The type checker
//! itself (`super::typecheck`) returns a plain `Result<Type, String>`; this
//! module is what turns that string, plus the offending token's span, into a
//! proper diagnostic.

use crate::scope::ScopeError;
use crate::token::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    MissingDelimiter,
    MissingExpression,
    UnexpectedToken,
    UndeclaredVariable,
    UnknownFunction,
    Redefinition,
    ReservedKeywordAsIdentifier,
    TypeError,
    TooManyParameters,
    TooManyInitializers,
    ArgCountMismatch,
}

#[derive(Debug)]
pub struct ParseError {
    kind: ParseErrorKind,
    message: String,
    span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            kind,
            message: message.into(),
            span,
        }
    }

    pub fn missing_delimiter(expected: &str, span: Span) -> Self {
        ParseError::new(
            ParseErrorKind::MissingDelimiter,
            format!("expected '{expected}'"),
            span,
        )
    }

    pub fn missing_expression(span: Span) -> Self {
        ParseError::new(ParseErrorKind::MissingExpression, "expected an expression", span)
    }

    pub fn unexpected_token(expected: &str, found: &str, span: Span) -> Self {
        ParseError::new(
            ParseErrorKind::UnexpectedToken,
            format!("expected {expected}, found {found}"),
            span,
        )
    }

    pub fn undeclared_variable(name: &str, span: Span) -> Self {
        ParseError::new(
            ParseErrorKind::UndeclaredVariable,
            format!("undeclared variable '{name}'"),
            span,
        )
    }

    pub fn unknown_function(name: &str, span: Span) -> Self {
        ParseError::new(
            ParseErrorKind::UnknownFunction,
            format!("call to unknown function '{name}'"),
            span,
        )
    }

    pub fn reserved_keyword_as_identifier(keyword: &str, span: Span) -> Self {
        ParseError::new(
            ParseErrorKind::ReservedKeywordAsIdentifier,
            format!("'{keyword}' is a reserved keyword and cannot be used as an identifier"),
            span,
        )
    }

    pub fn too_many_parameters(callee: &str, span: Span) -> Self {
        ParseError::new(
            ParseErrorKind::TooManyParameters,
            format!("function '{callee}' has more than six parameters"),
            span,
        )
    }

    pub fn too_many_initializers(name: &str, expected: usize, found: usize, span: Span) -> Self {
        ParseError::new(
            ParseErrorKind::TooManyInitializers,
            format!("too many initializers for array '{name}': expected at most {expected}, found {found}"),
            span,
        )
    }

    pub fn arg_count_mismatch(callee: &str, expected: usize, found: usize, span: Span) -> Self {
        ParseError::new(
            ParseErrorKind::ArgCountMismatch,
            format!("function '{callee}' expects {expected} argument(s), found {found}"),
            span,
        )
    }

    /// Wraps a `ScopeError` (always a redefinition) into a `ParseError` at
    /// the redeclaring token's span.
    pub fn from_scope_error(err: ScopeError, span: Span) -> Self {
        ParseError::new(ParseErrorKind::Redefinition, err.message().to_string(), span)
    }

    /// Wraps a type-checker failure (`Err(message)`) at the operator or
    /// expression token responsible for it.
    pub fn from_type_error(message: impl Into<String>, span: Span) -> Self {
        ParseError::new(ParseErrorKind::TypeError, message, span)
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}
