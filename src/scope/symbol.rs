//! Symbols stored in a [`super::Scope`].
//!
//! A symbol outlives any single AST node that names it: the same variable
//! is referenced by every `Ident` node that mentions it, and the same
//! function by every `Call` node that invokes it. Symbols are therefore
//! shared by reference ([`SymbolRef`]) rather than owned by a single node;
//! their lifetimes span the whole compile and never form a cycle, so `Rc` is
//! enough.

use std::rc::Rc;

use crate::token::Span;
use crate::types::Type;

/// Where a symbol's storage lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// A `.data` global, addressed by linker symbol name.
    Global,
    /// A stack slot at a fixed offset from `%rbp`.
    Local,
}

/// The three symbol flavors the language has. Arrays carry extra sizing
/// information a plain variable doesn't need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Array { element_size: usize, len: usize },
    Function,
}

/// A declared name: a variable, array, or function.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub ty: Type,
    pub storage: Storage,
    /// Negative, `%rbp`-relative for locals. Always `0` for globals and
    /// functions, since their linker symbol name is the address.
    pub offset: i64,
    pub kind: SymbolKind,
    /// The token this symbol was declared at, for "previously defined here"
    /// style diagnostics.
    pub span: Span,
}

/// Shared handle to a [`Symbol`]. See the module doc for why this is `Rc`
/// rather than an owned value.
pub type SymbolRef = Rc<Symbol>;

impl Symbol {
    pub fn variable(name: impl Into<String>, ty: Type, storage: Storage, offset: i64, span: Span) -> Symbol {
        Symbol {
            name: name.into(),
            ty,
            storage,
            offset,
            kind: SymbolKind::Variable,
            span,
        }
    }

    pub fn array(
        name: impl Into<String>,
        ty: Type,
        storage: Storage,
        offset: i64,
        span: Span,
    ) -> Symbol {
        let (element_size, len) = match &ty {
            Type::Array { len, elem } => (elem.size(), *len),
            _ => (ty.size(), 1),
        };
        Symbol {
            name: name.into(),
            ty,
            storage,
            offset,
            kind: SymbolKind::Array { element_size, len },
            span,
        }
    }

    /// Functions are always global and have no frame offset of their own.
    pub fn function(name: impl Into<String>, ty: Type, span: Span) -> Symbol {
        Symbol {
            name: name.into(),
            ty,
            storage: Storage::Global,
            offset: 0,
            kind: SymbolKind::Function,
            span,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, SymbolKind::Array { .. })
    }

    pub fn is_function(&self) -> bool {
        matches!(self.kind, SymbolKind::Function)
    }

    /// The function's parameter and return types. Panics if this symbol is
    /// not a function; callers only reach this after `is_function()`.
    pub fn signature(&self) -> (&Type, &[Type]) {
        match &self.ty {
            Type::Func { ret, params } => (ret, params),
            _ => unreachable!("signature() called on a non-function symbol"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_symbol_derives_element_size_and_len_from_its_type() {
        let sym = Symbol::array("a", Type::array(3, Type::Int), Storage::Local, -24, Span::new(0, 1));
        assert_eq!(sym.kind, SymbolKind::Array { element_size: 8, len: 3 });
    }

    #[test]
    fn function_symbol_is_global_with_zero_offset() {
        let sym = Symbol::function("f", Type::func(Type::Int, vec![Type::Int]), Span::new(0, 1));
        assert_eq!(sym.storage, Storage::Global);
        assert_eq!(sym.offset, 0);
        assert!(sym.is_function());
    }
}
