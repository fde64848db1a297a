//! Typed abstract syntax tree.
//!
//! The tree is a strict ownership hierarchy rooted at [`Program`]: every
//! child has exactly one parent. [`Symbol`](crate::scope::Symbol) references
//! are the one exception: many nodes may point at the same symbol, which is
//! why those are shared via [`crate::scope::SymbolRef`] rather than owned.
//!
//! # Module Structure
//!
//! - [`expr`] - Expression nodes ([`Expr`], [`ExprKind`], [`UnaryOp`], [`BinaryOp`])
//! - [`stmt`] - Statement nodes ([`Stmt`], [`StmtKind`], [`FuncDef`])
//! - [`program`] - The root node ([`Program`])
//!
//! # See Also
//!
//! - [`crate::parser`] builds this tree and resolves every name against
//!   [`crate::scope::Scope`] as it goes.
//! - [`crate::codegen`] walks this tree once, read-only, to emit assembly.

mod expr;
mod program;
mod stmt;

pub use expr::{BinaryOp, Expr, ExprKind, UnaryOp};
pub use program::{Program, StrDef};
pub use stmt::{FuncDef, Stmt, StmtKind};
