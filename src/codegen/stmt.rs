//! Statement, function-body, and top-level emission.
//!
//! Control flow uses monotone labels per syntactic construct:
//! `if` → `.L.else.N`/`.L.end.N`, `while` → `.while.N`/`.while.end.N`, `for`
//! → `.for.N`/`.for.end.N`, `return` → a jump to the enclosing function's
//! `.L.<name>.ret`, emitted once after its body.

use std::io::{self, Write};

use super::{ARG_REGS, Codegen};
use crate::ast::{Expr, ExprKind, FuncDef, Stmt, StmtKind};
use crate::scope::{Storage, SymbolKind};

impl<'a, W: Write> Codegen<'a, W> {
    /// One top-level item: a global variable declaration list or a function
    /// definition (the only two `StmtKind`s [`crate::parser`] ever produces
    /// at this level).
    pub(super) fn gen_top_level(&mut self, item: &Stmt) -> io::Result<()> {
        match &item.kind {
            StmtKind::VarDef { symbols, is_global: true, .. } => {
                for symbol in symbols {
                    self.gen_global_storage(symbol.name.as_str(), symbol.ty.size())?;
                }
                Ok(())
            }
            StmtKind::FuncDef(func) => self.gen_function(func),
            other => unreachable!("top-level item must be a global VarDef or FuncDef, found {other:?}"),
        }
    }

    /// `.globl name; .data; name: .zero size`: scalars and arrays alike.
    fn gen_global_storage(&mut self, name: &str, size: usize) -> io::Result<()> {
        writeln!(self.out, "  .globl {name}")?;
        writeln!(self.out, "  .data")?;
        writeln!(self.out, "{name}:")?;
        writeln!(self.out, "  .zero {size}")
    }

    /// `.globl name; .text; name:`; prologue; spilled parameters; body;
    /// epilogue.
    fn gen_function(&mut self, func: &FuncDef) -> io::Result<()> {
        self.current_function = Some(func.name.clone());

        writeln!(self.out, "  .globl {}", func.name)?;
        writeln!(self.out, "  .text")?;
        writeln!(self.out, "{}:", func.name)?;
        writeln!(self.out, "  push %rbp")?;
        writeln!(self.out, "  mov %rsp,%rbp")?;
        writeln!(self.out, "  sub ${},%rsp", func.frame_size)?;

        for (reg, param) in ARG_REGS.iter().zip(&func.params) {
            writeln!(self.out, "  mov {reg},{}(%rbp)", param.offset)?;
        }

        self.gen_stmt(&func.body)?;

        writeln!(self.out, ".L.{}.ret:", func.name)?;
        writeln!(self.out, "  mov %rbp,%rsp")?;
        writeln!(self.out, "  pop %rbp")?;
        writeln!(self.out, "  ret")?;

        self.current_function = None;
        Ok(())
    }

    pub(super) fn gen_stmt(&mut self, stmt: &Stmt) -> io::Result<()> {
        match &stmt.kind {
            StmtKind::Expr(expr) => self.gen_expr(expr),
            StmtKind::Block(stmts) => {
                for s in stmts {
                    self.gen_stmt(s)?;
                }
                Ok(())
            }
            StmtKind::If { cond, then_branch, else_branch } => self.gen_if(cond, then_branch, else_branch.as_deref()),
            StmtKind::While { cond, body } => self.gen_while(cond, body),
            StmtKind::For { init, cond, inc, body } => self.gen_for(init.as_deref(), cond.as_ref(), inc.as_ref(), body),
            StmtKind::Return(expr) => self.gen_return(expr),
            StmtKind::VarDef { decls, is_global: false, .. } => {
                for decl in decls {
                    self.gen_local_init(decl)?;
                }
                Ok(())
            }
            other => unreachable!("statement cannot appear inside a function body: {other:?}"),
        }
    }

    /// A scalar initializer lowers to `Binary(Assign, ...)` during parsing,
    /// so evaluating it as an ordinary expression already performs the
    /// store; only `ArrayDef` needs its own emission here.
    fn gen_local_init(&mut self, decl: &Expr) -> io::Result<()> {
        match &decl.kind {
            ExprKind::ArrayDef { symbol, inits } => {
                let element_size = match &symbol.kind {
                    SymbolKind::Array { element_size, .. } => *element_size,
                    other => unreachable!("ArrayDef symbol must be SymbolKind::Array, found {other:?}"),
                };
                assert_eq!(symbol.storage, Storage::Local, "array initializers only exist for locals");
                for (i, init) in inits.iter().enumerate() {
                    self.gen_expr(init)?;
                    let offset = symbol.offset + (i * element_size) as i64;
                    if element_size == 1 {
                        writeln!(self.out, "  mov %al,{offset}(%rbp)")?;
                    } else {
                        writeln!(self.out, "  mov %rax,{offset}(%rbp)")?;
                    }
                }
                Ok(())
            }
            _ => self.gen_expr(decl).map(|_| ()),
        }
    }

    fn gen_if(&mut self, cond: &Expr, then_branch: &Stmt, else_branch: Option<&Stmt>) -> io::Result<()> {
        let id = self.next_label();
        self.gen_expr(cond)?;
        writeln!(self.out, "  cmp $0,%rax")?;

        match else_branch {
            Some(else_branch) => {
                writeln!(self.out, "  je .L.else.{id}")?;
                self.gen_stmt(then_branch)?;
                writeln!(self.out, "  jmp .L.end.{id}")?;
                writeln!(self.out, ".L.else.{id}:")?;
                self.gen_stmt(else_branch)?;
            }
            None => {
                writeln!(self.out, "  je .L.end.{id}")?;
                self.gen_stmt(then_branch)?;
            }
        }
        writeln!(self.out, ".L.end.{id}:")
    }

    fn gen_while(&mut self, cond: &Expr, body: &Stmt) -> io::Result<()> {
        let id = self.next_label();
        writeln!(self.out, ".while.{id}:")?;
        self.gen_expr(cond)?;
        writeln!(self.out, "  cmp $0,%rax")?;
        writeln!(self.out, "  je .while.end.{id}")?;
        self.gen_stmt(body)?;
        writeln!(self.out, "  jmp .while.{id}")?;
        writeln!(self.out, ".while.end.{id}:")
    }

    /// A missing condition means "always true" and emits no compare/jump at
    /// all, not a synthesized `cmp $0,$0`.
    fn gen_for(&mut self, init: Option<&Stmt>, cond: Option<&Expr>, inc: Option<&Expr>, body: &Stmt) -> io::Result<()> {
        if let Some(init) = init {
            self.gen_stmt(init)?;
        }
        let id = self.next_label();
        writeln!(self.out, ".for.{id}:")?;
        if let Some(cond) = cond {
            self.gen_expr(cond)?;
            writeln!(self.out, "  cmp $0,%rax")?;
            writeln!(self.out, "  je .for.end.{id}")?;
        }
        self.gen_stmt(body)?;
        if let Some(inc) = inc {
            self.gen_expr(inc)?;
        }
        writeln!(self.out, "  jmp .for.{id}")?;
        writeln!(self.out, ".for.end.{id}:")
    }

    fn gen_return(&mut self, expr: &Expr) -> io::Result<()> {
        self.gen_expr(expr)?;
        writeln!(self.out, "  jmp .L.{}.ret", self.current_function_name())
    }
}
