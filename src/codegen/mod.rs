//! AT&T-syntax x86-64 assembly emission for System V AMD64.
//!
//! A single-pass visitor over the typed [`crate::ast::Program`] the parser
//! produced: no IR, no register allocator. Every expression's result lands
//! in `%rax`; intermediates spill to the process stack via `push`/`pop`
//! rather than staying live in other registers.
//!
//! # Module Structure
//!
//! - [`expr`] - Expression evaluation (`gen_expr`) and lvalue addressing (`gen_addr`)
//! - [`stmt`] - Statement and function-body emission, control-flow labels
//!
//! # See Also
//!
//! [`crate::parser`] is this module's only input: by the time a [`Program`]
//! reaches [`Codegen::compile`], every node already carries the type and
//! storage information the emitter trusts without re-checking.

mod expr;
mod stmt;

use std::io::{self, Write};

use crate::ast::Program;

/// The six System V AMD64 integer argument registers, in parameter order.
pub(crate) const ARG_REGS: [&str; 6] = ["%rdi", "%rsi", "%rdx", "%rcx", "%r8", "%r9"];

/// Walks a typed [`Program`] once and writes AT&T-syntax assembly to `out`.
///
/// Owns exactly the two pieces of mutable state the emitter needs: a
/// monotone label counter (shared across the whole compile, not reset per
/// function) and the name of the function currently being compiled, used to
/// form its `.L.<name>.ret` epilogue label.
pub struct Codegen<'a, W: Write> {
    out: &'a mut W,
    label_id: u32,
    current_function: Option<String>,
}

impl<'a, W: Write> Codegen<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Codegen {
            out,
            label_id: 0,
            current_function: None,
        }
    }

    /// Emits the whole program: every top-level item in source order, then
    /// the string literals collected along the way.
    pub fn compile(&mut self, program: &Program) -> io::Result<()> {
        for item in &program.items {
            self.gen_top_level(item)?;
        }
        for string in &program.strings {
            self.gen_string_literal(string)?;
        }
        Ok(())
    }

    /// A fresh label suffix, unique for the lifetime of this `Codegen`.
    fn next_label(&mut self) -> u32 {
        let id = self.label_id;
        self.label_id += 1;
        id
    }

    fn current_function_name(&self) -> &str {
        self.current_function
            .as_deref()
            .expect("gen_stmt(Return) only reachable inside a function body")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn compile(src: &str) -> String {
        let tokens = Lexer::new(src).tokenize().expect("lex");
        let program = Parser::new(tokens).parse().expect("parse");
        let mut out = Vec::new();
        Codegen::new(&mut out).compile(&program).expect("codegen");
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn function_emits_globl_text_and_prologue() {
        let asm = compile("int main(){return 0;}");
        assert!(asm.contains(".globl main"));
        assert!(asm.contains(".text"));
        assert!(asm.contains("main:"));
        assert!(asm.contains("push %rbp"));
        assert!(asm.contains("mov %rsp,%rbp"));
        assert!(asm.contains(".L.main.ret:"));
        assert!(asm.contains("pop %rbp"));
        assert!(asm.contains("ret"));
    }

    #[test]
    fn global_scalar_reserves_data_storage() {
        let asm = compile("int g; int main(){return 0;}");
        assert!(asm.contains(".globl g"));
        assert!(asm.contains(".data"));
        assert!(asm.contains("g:"));
        assert!(asm.contains(".zero 8"));
    }

    #[test]
    fn string_literal_emits_its_own_global() {
        let asm = compile("int main(){ return *\"hi\"; }");
        assert!(asm.contains(".str.0:"));
        assert!(asm.contains(".string \"hi\""));
    }

    #[test]
    fn label_ids_are_monotone_across_the_whole_program() {
        let asm = compile("int main(){ if(1){} if(2){} return 0; }");
        assert!(asm.contains(".L.end.0:"));
        assert!(asm.contains(".L.end.1:"));
    }
}
