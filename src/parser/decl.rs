//! Top-level items, type specifiers, declarators, and function definitions.
//!
//! Also home to local variable declarations (`parse_local_var_decl`), since
//! they share the declarator grammar with globals: only storage class,
//! frame allocation, and initializer support differ.

use super::Parser;
use super::error::ParseError;
use super::typecheck::check_equal;
use crate::ast::{BinaryOp, Expr, ExprKind, FuncDef, Stmt, StmtKind};
use crate::scope::{Storage, Symbol};
use crate::token::{Span, Token, TokenKind};
use crate::types::Type;

/// Maximum parameter count a function may declare: the number of
/// System V AMD64 integer argument registers.
const MAX_PARAMS: usize = 6;

fn align_up(n: i64, align: i64) -> i64 {
    (n + align - 1) / align * align
}

impl Parser {
    pub(super) fn parse_base_type(&mut self) -> Result<Type, ParseError> {
        if self.consume(TokenKind::Int) {
            return Ok(Type::Int);
        }
        if self.consume(TokenKind::Char) {
            return Ok(Type::Char);
        }
        Err(ParseError::unexpected_token(
            "'int' or 'char'",
            self.current().kind.describe(),
            self.current_span(),
        ))
    }

    /// `*`-prefix then identifier, with an optional `[ num ]` array suffix.
    pub(super) fn parse_declarator(&mut self, base: Type) -> Result<(Token, Type), ParseError> {
        let mut ty = base;
        while self.consume(TokenKind::Star) {
            ty = Type::pointer(ty);
        }
        self.finish_declarator(ty)
    }

    /// Reads the identifier and optional array suffix of a declarator whose
    /// pointer prefix (if any) has already been folded into `ty`.
    fn finish_declarator(&mut self, ty: Type) -> Result<(Token, Type), ParseError> {
        let ident = self.expect_ident()?;
        let mut ty = ty;
        if self.consume(TokenKind::OpenSquare) {
            let len = self.expect_num_literal()?;
            self.skip(TokenKind::CloseSquare, "]")?;
            ty = Type::array(len.max(0) as usize, ty);
        }
        Ok((ident, ty))
    }

    fn expect_num_literal(&mut self) -> Result<i64, ParseError> {
        if self.equal(TokenKind::Num) {
            let value = self.current().value.expect("Num token always carries a value");
            self.advance();
            Ok(value)
        } else {
            Err(ParseError::unexpected_token(
                "an integer literal",
                self.current().kind.describe(),
                self.current_span(),
            ))
        }
    }

    /// One iteration of the top-level loop.
    pub(super) fn parse_top_level_item(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        let base_ty = self.parse_base_type()?;

        let mut first_ty = base_ty.clone();
        while self.consume(TokenKind::Star) {
            first_ty = Type::pointer(first_ty);
        }
        let name_tok = self.expect_ident()?;

        if self.equal(TokenKind::OpenParen) {
            self.parse_function_def(first_ty, name_tok, start)
        } else {
            self.back();
            self.parse_global_var_decl(first_ty, base_ty, start)
        }
    }

    fn parse_function_def(&mut self, ret_ty: Type, name_tok: Token, start: Span) -> Result<Stmt, ParseError> {
        self.skip(TokenKind::OpenParen, "(")?;

        self.scope.push_block();
        self.local_bytes = 0;

        let mut params = Vec::new();
        let mut param_types = Vec::new();
        if !self.equal(TokenKind::CloseParen) {
            loop {
                let base = self.parse_base_type()?;
                let (ident, ty) = self.parse_declarator(base)?;
                if params.len() >= MAX_PARAMS {
                    return Err(ParseError::too_many_parameters(&name_tok.lexeme, ident.span));
                }
                let size = ty.size() as i64;
                self.local_bytes += size;
                let offset = -self.local_bytes;
                let symbol = Symbol::variable(ident.lexeme.clone(), ty.clone(), Storage::Local, offset, ident.span);
                let symbol = self
                    .scope
                    .declare(symbol)
                    .map_err(|e| ParseError::from_scope_error(e, ident.span))?;
                param_types.push(ty);
                params.push(symbol);
                if !self.consume(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.skip(TokenKind::CloseParen, ")")?;

        let func_ty = Type::func(ret_ty, param_types);
        let symbol = self
            .scope
            .declare_global(Symbol::function(name_tok.lexeme.clone(), func_ty, name_tok.span))
            .map_err(|e| ParseError::from_scope_error(e, name_tok.span))?;

        let body = self.parse_statement()?;

        self.scope.pop_block();
        let frame_size = align_up(self.local_bytes, 16);

        Ok(Stmt::new(
            StmtKind::FuncDef(FuncDef {
                name: name_tok.lexeme.clone(),
                symbol,
                params,
                body: Box::new(body),
                frame_size,
                span: start,
            }),
            start,
        ))
    }

    fn parse_global_var_decl(&mut self, first_ty: Type, base_ty: Type, start: Span) -> Result<Stmt, ParseError> {
        let (ident, ty) = self.finish_declarator(first_ty)?;
        let mut symbols = vec![self.declare_global_symbol(ident, ty)?];
        while self.consume(TokenKind::Comma) {
            let (ident, ty) = self.parse_declarator(base_ty.clone())?;
            symbols.push(self.declare_global_symbol(ident, ty)?);
        }
        self.skip(TokenKind::Semicolon, ";")?;
        Ok(Stmt::new(
            StmtKind::VarDef { decls: Vec::new(), symbols, is_global: true },
            start,
        ))
    }

    fn declare_global_symbol(&mut self, ident: Token, ty: Type) -> Result<crate::scope::SymbolRef, ParseError> {
        let symbol = if ty.is_array() {
            Symbol::array(ident.lexeme.clone(), ty, Storage::Global, 0, ident.span)
        } else {
            Symbol::variable(ident.lexeme.clone(), ty, Storage::Global, 0, ident.span)
        };
        self.scope
            .declare_global(symbol)
            .map_err(|e| ParseError::from_scope_error(e, ident.span))
    }

    /// `int a = 1, b[3] = {1, 2, 3};`, called from statement parsing inside
    /// a block. Every declarator reserves its storage immediately; only the
    /// ones that carry an initializer contribute an entry to `decls`.
    pub(super) fn parse_local_var_decl(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        let base_ty = self.parse_base_type()?;

        let mut decls = Vec::new();
        let mut symbols = Vec::new();
        loop {
            let (ident, ty) = self.parse_declarator(base_ty.clone())?;
            let size = ty.size() as i64;
            self.local_bytes += size;
            let offset = -self.local_bytes;

            let symbol = if ty.is_array() {
                Symbol::array(ident.lexeme.clone(), ty.clone(), Storage::Local, offset, ident.span)
            } else {
                Symbol::variable(ident.lexeme.clone(), ty.clone(), Storage::Local, offset, ident.span)
            };
            let symbol = self
                .scope
                .declare(symbol)
                .map_err(|e| ParseError::from_scope_error(e, ident.span))?;
            symbols.push(symbol.clone());

            if self.consume(TokenKind::Assign) {
                if ty.is_array() {
                    decls.push(self.parse_array_initializer(symbol, &ty, ident.span)?);
                } else {
                    let rhs = self.parse_expression()?;
                    let result_ty = check_equal(&ty, &rhs.ty)
                        .map_err(|msg| ParseError::from_type_error(msg, rhs.span))?;
                    let lhs = Expr::new(ExprKind::Ident(symbol), ty.clone(), ident.span);
                    let span = ident.span.to(rhs.span);
                    decls.push(Expr::new(
                        ExprKind::Binary { op: BinaryOp::Assign, lhs: Box::new(lhs), rhs: Box::new(rhs) },
                        result_ty,
                        span,
                    ));
                }
            }

            if !self.consume(TokenKind::Comma) {
                break;
            }
        }
        self.skip(TokenKind::Semicolon, ";")?;
        Ok(Stmt::new(StmtKind::VarDef { decls, symbols, is_global: false }, start))
    }

    fn parse_array_initializer(
        &mut self,
        symbol: crate::scope::SymbolRef,
        ty: &Type,
        name_span: Span,
    ) -> Result<Expr, ParseError> {
        let (len, elem_ty) = match ty {
            Type::Array { len, elem } => (*len, (**elem).clone()),
            _ => unreachable!("parse_array_initializer only called for array declarators"),
        };

        self.skip(TokenKind::OpenBrace, "{")?;
        let mut inits = Vec::new();
        if !self.equal(TokenKind::CloseBrace) {
            loop {
                let expr = self.parse_expression()?;
                check_equal(&elem_ty, &expr.ty).map_err(|msg| ParseError::from_type_error(msg, expr.span))?;
                inits.push(expr);
                if !self.consume(TokenKind::Comma) {
                    break;
                }
            }
        }
        let end_span = self.current_span();
        self.skip(TokenKind::CloseBrace, "}")?;

        if inits.len() > len {
            return Err(ParseError::too_many_initializers(&symbol.name, len, inits.len(), end_span));
        }

        let span = name_span.to(end_span);
        Ok(Expr::new(ExprKind::ArrayDef { symbol, inits }, ty.clone(), span))
    }
}
