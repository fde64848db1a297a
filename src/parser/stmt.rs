//! Statement parsing.

use super::Parser;
use super::error::ParseError;
use crate::ast::{Stmt, StmtKind};
use crate::token::TokenKind;

impl Parser {
    pub(super) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.current_kind() {
            TokenKind::OpenBrace => self.parse_block(),
            TokenKind::Int | TokenKind::Char => self.parse_local_var_decl(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Return => self.parse_return(),
            _ => self.parse_expr_statement(),
        }
    }

    fn parse_block(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        self.skip(TokenKind::OpenBrace, "{")?;
        self.scope.push_block();

        let mut stmts = Vec::new();
        while !self.equal(TokenKind::CloseBrace) && !self.is_eof() {
            stmts.push(self.parse_statement()?);
        }

        self.scope.pop_block();
        let end = self.current_span();
        self.skip(TokenKind::CloseBrace, "}")?;
        Ok(Stmt::new(StmtKind::Block(stmts), start.to(end)))
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        self.advance(); // 'if'
        self.skip(TokenKind::OpenParen, "(")?;
        let cond = self.parse_expression()?;
        self.skip(TokenKind::CloseParen, ")")?;
        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.consume(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Stmt::new(StmtKind::If { cond, then_branch, else_branch }, start))
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        self.advance(); // 'while'
        self.skip(TokenKind::OpenParen, "(")?;
        let cond = self.parse_expression()?;
        self.skip(TokenKind::CloseParen, ")")?;
        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::new(StmtKind::While { cond, body }, start))
    }

    /// `for (init? ; cond? ; inc?) body`. The whole construct opens its own
    /// scope, so a declaration in `init` is visible to `cond`, `inc`, and
    /// `body` but nowhere past the closing statement.
    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        self.advance(); // 'for'
        self.skip(TokenKind::OpenParen, "(")?;
        self.scope.push_block();

        let init = if self.equal(TokenKind::Semicolon) {
            self.advance();
            None
        } else if matches!(self.current_kind(), TokenKind::Int | TokenKind::Char) {
            Some(Box::new(self.parse_local_var_decl()?))
        } else {
            let stmt = self.parse_expr_statement()?;
            Some(Box::new(stmt))
        };

        let cond = if self.equal(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.skip(TokenKind::Semicolon, ";")?;

        let inc = if self.equal(TokenKind::CloseParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.skip(TokenKind::CloseParen, ")")?;

        let body = Box::new(self.parse_statement()?);
        self.scope.pop_block();

        Ok(Stmt::new(StmtKind::For { init, cond, inc, body }, start))
    }

    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        self.advance(); // 'return'
        let expr = self.parse_expression()?;
        self.skip(TokenKind::Semicolon, ";")?;
        Ok(Stmt::new(StmtKind::Return(expr), start))
    }

    fn parse_expr_statement(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        let expr = self.parse_expression()?;
        self.skip(TokenKind::Semicolon, ";")?;
        Ok(Stmt::new(StmtKind::Expr(expr), start))
    }
}
