//! Expression evaluation and lvalue addressing.
//!
//! Every expression evaluates to a value in `%rax` ([`Codegen::gen_expr`]);
//! every lvalue expression additionally supports evaluating to its *address*
//! in `%rax` ([`Codegen::gen_addr`]), which assignment, `&`, and array
//! indexing all build on.

use std::io::{self, Write};

use super::{ARG_REGS, Codegen};
use crate::ast::{BinaryOp, Expr, ExprKind, UnaryOp};
use crate::ast::StrDef;
use crate::scope::{Storage, Symbol, SymbolKind};
use crate::types::Type;

impl<'a, W: Write> Codegen<'a, W> {
    /// Evaluates `expr`, leaving its value in `%rax`.
    ///
    /// Arrays never load: any `expr` whose type is an array stops at the
    /// address `gen_addr` produces, since an array-typed expression
    /// evaluates to its base address.
    pub(super) fn gen_expr(&mut self, expr: &Expr) -> io::Result<()> {
        match &expr.kind {
            ExprKind::NumLit(v) => writeln!(self.out, "  mov ${v},%rax"),
            ExprKind::StrLit { label, .. } => writeln!(self.out, "  lea .str.{label}(%rip),%rax"),
            ExprKind::Ident(_) | ExprKind::ArrayIndex { .. } => {
                self.gen_addr(expr)?;
                if !expr.ty.is_array() {
                    self.load(&expr.ty)?;
                }
                Ok(())
            }
            ExprKind::ArrayDef { .. } => {
                unreachable!("ArrayDef only appears inside a VarDef's decl list, never as a free expression")
            }
            ExprKind::Unary { op: UnaryOp::Neg, operand } => {
                self.gen_expr(operand)?;
                writeln!(self.out, "  neg %rax")
            }
            ExprKind::Unary { op: UnaryOp::Deref, .. } => {
                self.gen_addr(expr)?;
                if !expr.ty.is_array() {
                    self.load(&expr.ty)?;
                }
                Ok(())
            }
            ExprKind::Unary { op: UnaryOp::Addr, operand } => self.gen_addr(operand),
            ExprKind::Binary { op: BinaryOp::Assign, lhs, rhs } => {
                self.gen_addr(lhs)?;
                writeln!(self.out, "  push %rax")?;
                self.gen_expr(rhs)?;
                self.store(&lhs.ty)
            }
            ExprKind::Binary { op, lhs, rhs } => self.gen_binary(*op, lhs, rhs),
            ExprKind::Call { callee, args, .. } => self.gen_call(callee, args),
        }
    }

    /// Evaluates `expr` as an lvalue, leaving its *address* in `%rax`.
    ///
    /// Only the expression shapes the grammar allows as an lvalue
    /// (identifier, array index, and `*p`) ever reach here; the parser's
    /// `is_lvalue` check already rejected anything else before an
    /// `Assign`/`Addr` node could be built around it.
    pub(super) fn gen_addr(&mut self, expr: &Expr) -> io::Result<()> {
        match &expr.kind {
            ExprKind::Ident(symbol) => self.gen_symbol_addr(symbol),
            ExprKind::ArrayIndex { symbol, index } => self.gen_array_element_addr(symbol, index),
            ExprKind::Unary { op: UnaryOp::Deref, operand } => self.gen_expr(operand),
            _ => unreachable!("gen_addr called on a non-lvalue expression: {:?}", expr.kind),
        }
    }

    /// `lea offset(%rbp),%rax` for a local, `lea name(%rip),%rax` for a
    /// global: the two storage classes a symbol can have.
    pub(super) fn gen_symbol_addr(&mut self, symbol: &Symbol) -> io::Result<()> {
        match symbol.storage {
            Storage::Local => writeln!(self.out, "  lea {}(%rbp),%rax", symbol.offset),
            Storage::Global => writeln!(self.out, "  lea {}(%rip),%rax", symbol.name),
        }
    }

    fn gen_array_element_addr(&mut self, symbol: &Symbol, index: &Expr) -> io::Result<()> {
        let element_size = match &symbol.kind {
            SymbolKind::Array { element_size, .. } => *element_size,
            other => unreachable!("array index symbol must carry SymbolKind::Array, found {other:?}"),
        };
        writeln!(self.out, "  mov ${element_size},%rax")?;
        writeln!(self.out, "  push %rax")?;
        self.gen_expr(index)?;
        writeln!(self.out, "  pop %rdi")?;
        writeln!(self.out, "  imul %rdi,%rax")?;
        writeln!(self.out, "  push %rax")?;
        self.gen_symbol_addr(symbol)?;
        writeln!(self.out, "  pop %rdi")?;
        writeln!(self.out, "  add %rdi,%rax")
    }

    fn gen_call(&mut self, callee: &str, args: &[Expr]) -> io::Result<()> {
        for arg in args {
            self.gen_expr(arg)?;
            writeln!(self.out, "  push %rax")?;
        }
        for reg in ARG_REGS.iter().take(args.len()).rev() {
            writeln!(self.out, "  pop {reg}")?;
        }
        writeln!(self.out, "  call {callee}")
    }

    /// Binary ops other than `=`: evaluate rhs, push; evaluate lhs, pop into
    /// `%rdi`; emit the op between `%rdi` and `%rax`.
    fn gen_binary(&mut self, op: BinaryOp, lhs: &Expr, rhs: &Expr) -> io::Result<()> {
        self.gen_expr(rhs)?;
        writeln!(self.out, "  push %rax")?;
        self.gen_expr(lhs)?;
        writeln!(self.out, "  pop %rdi")?;

        match op {
            BinaryOp::Add => writeln!(self.out, "  add %rdi,%rax"),
            BinaryOp::Sub => writeln!(self.out, "  sub %rdi,%rax"),
            BinaryOp::Mul => writeln!(self.out, "  imul %rdi,%rax"),
            BinaryOp::Div => {
                writeln!(self.out, "  cqo")?;
                writeln!(self.out, "  idiv %rdi")
            }
            BinaryOp::BitAnd => writeln!(self.out, "  and %rdi,%rax"),
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge | BinaryOp::Eq | BinaryOp::Neq => {
                writeln!(self.out, "  cmp %rdi,%rax")?;
                let set = match op {
                    BinaryOp::Lt => "setl",
                    BinaryOp::Le => "setle",
                    BinaryOp::Gt => "setg",
                    BinaryOp::Ge => "setge",
                    BinaryOp::Eq => "sete",
                    BinaryOp::Neq => "setne",
                    _ => unreachable!(),
                };
                writeln!(self.out, "  {set} %al")?;
                writeln!(self.out, "  movzb %al,%rax")
            }
            BinaryOp::Assign => unreachable!("Assign is handled in gen_expr before gen_binary is called"),
        }
    }

    /// `load(type)` dereferences `%rax` into `%rax`: `movsbq` for 1-byte
    /// types, `mov` otherwise.
    pub(super) fn load(&mut self, ty: &Type) -> io::Result<()> {
        if ty.size() == 1 {
            writeln!(self.out, "  movsbq (%rax),%rax")
        } else {
            writeln!(self.out, "  mov (%rax),%rax")
        }
    }

    /// `store(type)` pops the destination address into `%rdi` and writes
    /// `%al` or `%rax` into it, matching `load`'s size split.
    pub(super) fn store(&mut self, ty: &Type) -> io::Result<()> {
        writeln!(self.out, "  pop %rdi")?;
        if ty.size() == 1 {
            writeln!(self.out, "  mov %al,(%rdi)")
        } else {
            writeln!(self.out, "  mov %rax,(%rdi)")
        }
    }

    /// `.globl .str.<id>; .data; .str.<id>: .string "<escaped>"` for one
    /// anonymous string-literal global.
    pub(super) fn gen_string_literal(&mut self, string: &StrDef) -> io::Result<()> {
        writeln!(self.out, "  .globl .str.{}", string.label)?;
        writeln!(self.out, "  .data")?;
        writeln!(self.out, ".str.{}:", string.label)?;
        writeln!(self.out, "  .string \"{}\"", escape(&string.value))
    }
}

/// Escapes a string literal's payload for re-emission inside a `.string`
/// directive: backslashes and double quotes are the only bytes GAS's string
/// directive requires escaping that this language's lexer could have passed
/// through unescaped.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}
