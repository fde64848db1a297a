//! A compiler for a small statically-typed C-like language.
//!
//! This library provides the full front-to-back pipeline: lexical analysis,
//! a Pratt-driven recursive-descent parser that resolves names and type-checks
//! in the same pass, and a visitor-style code generator that emits AT&T-syntax
//! x86-64 assembly for System V AMD64.
//!
//! # Pipeline
//!
//! ```text
//! source text -> Lexer -> token stream -> Parser -> typed AST -> Codegen -> assembly text
//! ```
//!
//! # Modules
//!
//! - [`token`] - Token kinds and source offsets
//! - [`lexer`] - Lexical analysis (tokenization)
//! - [`types`] - The language's type system
//! - [`scope`] - Symbol table and lexical scoping
//! - [`ast`] - Typed abstract syntax tree definitions
//! - [`parser`] - Recursive-descent parser, inline name resolution and type checking
//! - [`codegen`] - x86-64 assembly emission
//! - [`diagnostics`] - Caret-ruler error rendering shared by every phase
//!
//! # Example
//!
//! ```
//! use mcc::lexer::Lexer;
//! use mcc::parser::Parser;
//! use mcc::codegen::Codegen;
//!
//! let source = "int main() { return 1 + 2 * 3; }";
//!
//! let mut lexer = Lexer::new(source);
//! let tokens = lexer.tokenize().expect("lex error");
//!
//! let mut parser = Parser::new(tokens);
//! let program = parser.parse().expect("parse error");
//!
//! let mut out = Vec::new();
//! let mut codegen = Codegen::new(&mut out);
//! codegen.compile(&program).expect("codegen error");
//! let asm = String::from_utf8(out).unwrap();
//! assert!(asm.contains(".globl main"));
//! ```

pub mod ast;
pub mod codegen;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod scope;
pub mod token;
pub mod types;
