//! Statement and function-definition nodes.

use crate::scope::SymbolRef;
use crate::token::Span;

use super::expr::Expr;

/// A statement. Unlike [`super::expr::Expr`], statements carry no type of
/// their own.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    Expr(Expr),
    Block(Vec<Stmt>),
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    /// `init` is either a local `VarDef` or an expression statement; both are
    /// representable as a boxed `Stmt` here. `cond` absent means "always
    /// true" and the emitter skips the compare/branch entirely.
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        inc: Option<Expr>,
        body: Box<Stmt>,
    },
    Return(Expr),
    /// A comma-separated list of declarators. `decls` holds only the ones
    /// that carry an initializer: a scalar initializer lowers to a
    /// `Binary(Assign, Ident, expr)` expression, an array initializer to an
    /// `ArrayDef` expression. Bare declarators reserve frame space and a
    /// scope entry during parsing but contribute nothing to `decls`.
    ///
    /// `symbols` carries every declarator in the statement, initialized or
    /// not; the code emitter needs it to know which globals to reserve
    /// `.data` storage for even when they have no initializer to run.
    VarDef {
        decls: Vec<Expr>,
        symbols: Vec<SymbolRef>,
        is_global: bool,
    },
    FuncDef(FuncDef),
}

/// A function definition: its parameters, its body, and the frame size the
/// parser computed for its locals.
#[derive(Debug, Clone)]
pub struct FuncDef {
    pub name: String,
    pub symbol: SymbolRef,
    pub params: Vec<SymbolRef>,
    pub body: Box<Stmt>,
    /// Aligned up to 16, the size of the stack frame this function's
    /// prologue reserves for its locals.
    pub frame_size: i64,
    pub span: Span,
}
