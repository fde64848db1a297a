//! Lexical scoping and the symbol table.
//!
//! # Module Structure
//!
//! - [`symbol`] - [`Symbol`]/[`SymbolRef`], the values the table stores
//! - [`error`] - [`ScopeError`]/[`ScopeErrorKind`]
//!
//! # See Also
//!
//! [`crate::parser`] owns one [`Scope`] for the whole compile, pushing a
//! block on `{` and popping it on the matching `}`.

mod error;
mod symbol;

pub use error::{ScopeError, ScopeErrorKind};
pub use symbol::{Storage, Symbol, SymbolKind, SymbolRef};

use std::collections::HashMap;
use std::rc::Rc;

/// A stack of per-block name→symbol maps, plus one map for globals.
///
/// Lookup walks the block stack innermost-to-outermost and falls through to
/// the global map. Redeclaring a name in an *inner* block is legal shadowing;
/// redeclaring it in the *same* block is an error.
pub struct Scope {
    blocks: Vec<HashMap<String, SymbolRef>>,
    globals: HashMap<String, SymbolRef>,
}

impl Scope {
    pub fn new() -> Self {
        Scope {
            blocks: Vec::new(),
            globals: HashMap::new(),
        }
    }

    pub fn push_block(&mut self) {
        self.blocks.push(HashMap::new());
    }

    pub fn pop_block(&mut self) {
        self.blocks.pop();
    }

    /// True while inside at least one block (i.e. not at top level).
    pub fn in_block(&self) -> bool {
        !self.blocks.is_empty()
    }

    /// Declares `symbol` in the current block, or in the global map when no
    /// block is open. Fails if the same name is already declared in that
    /// same block/global map.
    pub fn declare(&mut self, symbol: Symbol) -> Result<SymbolRef, ScopeError> {
        let map = self.blocks.last_mut().unwrap_or(&mut self.globals);
        if let Some(existing) = map.get(&symbol.name) {
            return Err(ScopeError::redefinition(&symbol.name, existing.span));
        }
        let name = symbol.name.clone();
        let rc = Rc::new(symbol);
        map.insert(name, Rc::clone(&rc));
        Ok(rc)
    }

    /// Declares `symbol` directly in the global map, regardless of how many
    /// blocks are currently open. Used for functions and top-level globals,
    /// which always live in the flat global namespace.
    pub fn declare_global(&mut self, symbol: Symbol) -> Result<SymbolRef, ScopeError> {
        if let Some(existing) = self.globals.get(&symbol.name) {
            return Err(ScopeError::redefinition(&symbol.name, existing.span));
        }
        let name = symbol.name.clone();
        let rc = Rc::new(symbol);
        self.globals.insert(name, Rc::clone(&rc));
        Ok(rc)
    }

    /// Looks up `name`, innermost block first, falling through to globals.
    pub fn lookup(&self, name: &str) -> Option<SymbolRef> {
        for block in self.blocks.iter().rev() {
            if let Some(sym) = block.get(name) {
                return Some(Rc::clone(sym));
            }
        }
        self.globals.get(name).map(Rc::clone)
    }

    pub fn lookup_global(&self, name: &str) -> Option<SymbolRef> {
        self.globals.get(name).map(Rc::clone)
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Span;
    use crate::types::Type;

    fn var(name: &str, offset: i64) -> Symbol {
        Symbol::variable(name, Type::Int, Storage::Local, offset, Span::new(0, 1))
    }

    #[test]
    fn redeclaration_in_same_block_is_an_error() {
        let mut scope = Scope::new();
        scope.push_block();
        scope.declare(var("x", -8)).unwrap();
        let err = scope.declare(var("x", -16)).unwrap_err();
        assert_eq!(err.kind(), ScopeErrorKind::Redefinition);
    }

    #[test]
    fn shadowing_in_an_inner_block_is_legal() {
        let mut scope = Scope::new();
        scope.push_block();
        scope.declare(var("x", -8)).unwrap();
        scope.push_block();
        scope.declare(var("x", -16)).unwrap();
        assert_eq!(scope.lookup("x").unwrap().offset, -16);
        scope.pop_block();
        assert_eq!(scope.lookup("x").unwrap().offset, -8);
    }

    #[test]
    fn lookup_is_lifo_and_transparent_on_block_exit() {
        let mut scope = Scope::new();
        scope.push_block();
        scope.declare(var("x", -8)).unwrap();
        scope.push_block();
        assert!(scope.lookup("x").is_some());
        scope.pop_block();
        assert!(scope.lookup("x").is_some());
        scope.pop_block();
        assert!(scope.lookup("x").is_none());
    }

    #[test]
    fn block_lookup_falls_through_to_globals() {
        let mut scope = Scope::new();
        scope
            .declare_global(Symbol::function(
                "add",
                Type::func(Type::Int, vec![Type::Int, Type::Int]),
                Span::new(0, 1),
            ))
            .unwrap();
        scope.push_block();
        assert!(scope.lookup("add").is_some());
    }
}
