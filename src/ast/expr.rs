//! Expression nodes.

use std::fmt;

use crate::scope::SymbolRef;
use crate::token::Span;
use crate::types::Type;

/// A unary operator. Prefix `+` is not a node of its own: it type-checks its
/// operand and then disappears, since it never changes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Addr,
    Deref,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnaryOp::Neg => "-",
            UnaryOp::Addr => "&",
            UnaryOp::Deref => "*",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Neq,
    BitAnd,
    Assign,
}

impl BinaryOp {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge | BinaryOp::Eq | BinaryOp::Neq
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::BitAnd => "&",
            BinaryOp::Assign => "=",
        };
        write!(f, "{s}")
    }
}

/// An expression, tagged with the kind-specific payload in [`ExprKind`] and
/// the type the parser resolved for it.
///
/// Every expression node carries a resolved `ty`. Statement nodes do not;
/// only expressions produce values.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Type,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, ty: Type, span: Span) -> Self {
        Expr { kind, ty, span }
    }
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    NumLit(i64),
    /// A string literal. `label` is the id of the anonymous `.str.<id>`
    /// global the parser emitted for it; `value` is its unescaped content.
    StrLit { value: String, label: u32 },
    Ident(SymbolRef),
    ArrayIndex { symbol: SymbolRef, index: Box<Expr> },
    /// The `= { e0, e1, … }` initializer of an array declarator. Only
    /// appears inside a `VarDef`'s decl list, never as a free-standing
    /// expression.
    ArrayDef { symbol: SymbolRef, inits: Vec<Expr> },
    Unary { op: UnaryOp, operand: Box<Expr> },
    Binary { op: BinaryOp, lhs: Box<Expr>, rhs: Box<Expr> },
    Call { callee: String, args: Vec<Expr>, symbol: SymbolRef },
}
