//! Scope/symbol-table error types.

use crate::token::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeErrorKind {
    /// A name was declared twice in the same block. Redeclaration in the
    /// current block is an error.
    Redefinition,
}

#[derive(Debug)]
pub struct ScopeError {
    kind: ScopeErrorKind,
    message: String,
    span: Span,
}

impl ScopeError {
    pub fn redefinition(name: &str, span: Span) -> Self {
        ScopeError {
            kind: ScopeErrorKind::Redefinition,
            message: format!("redefinition of '{name}'"),
            span,
        }
    }

    pub fn kind(&self) -> ScopeErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

impl std::fmt::Display for ScopeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ScopeError {}
