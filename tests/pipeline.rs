//! Whole-pipeline tests: source text in, emitted assembly text out.
//!
//! Running an assembler/linker is out of scope, so these assert on the
//! *shape* of the AT&T-syntax text the emitter produces rather than
//! executing a linked binary.

use mcc::codegen::Codegen;
use mcc::lexer::Lexer;
use mcc::parser::Parser;

fn compile(src: &str) -> String {
    let tokens = Lexer::new(src).tokenize().expect("lex");
    let program = Parser::new(tokens).parse().expect("parse");
    let mut out = Vec::new();
    Codegen::new(&mut out).compile(&program).expect("codegen");
    String::from_utf8(out).unwrap()
}

#[test]
fn constant_folding_expression_emits_a_single_function() {
    let asm = compile("int main(){return 1+2*3;}");
    assert!(asm.contains(".globl main"));
    assert!(asm.contains("imul"));
    assert!(asm.contains("add"));
}

#[test]
fn pointer_arithmetic_scales_by_pointee_size() {
    let asm = compile("int main(){ int a[3]; int *p; p = a; return *(p+1); }");
    assert!(asm.contains("mov $8,%rax"), "pointer step should scale by sizeof(int): {asm}");
}

#[test]
fn char_pointer_arithmetic_scales_by_one() {
    let asm = compile("int main(){ char *s; s = \"hi\"; return *(s+1); }");
    assert!(asm.contains("movsbq"), "char loads should use the 1-byte path: {asm}");
}

#[test]
fn functions_call_each_other_through_the_argument_registers() {
    let asm = compile("int add(int a, int b){ return a+b; } int main(){ return add(1, 2); }");
    assert!(asm.contains("mov %rdi,"));
    assert!(asm.contains("mov %rsi,"));
    assert!(asm.contains("call add"));
}

#[test]
fn if_else_branches_share_one_end_label() {
    let asm = compile("int main(){ if (1) { return 1; } else { return 2; } return 0; }");
    assert!(asm.contains(".L.else.0:"));
    assert!(asm.contains(".L.end.0:"));
}

#[test]
fn while_loop_labels_are_both_suffixed() {
    let asm = compile("int main(){ int i; i = 0; while (i) { i = i - 1; } return i; }");
    assert!(asm.contains(".while.0:"));
    assert!(asm.contains(".while.end.0:"));
}

#[test]
fn for_loop_without_a_condition_emits_no_compare() {
    let asm = compile("int main(){ for (;;) { return 1; } }");
    assert!(asm.contains(".for.0:"));
    assert!(asm.contains(".for.end.0:"));
    assert!(!asm.contains("cmp $0,%rax"), "an unconditional for loop must not synthesize a compare: {asm}");
}

#[test]
fn for_loop_with_a_condition_does_compare() {
    let asm = compile("int main(){ int i; for (i = 0; i; i = i - 1) {} return 0; }");
    assert!(asm.contains(".for.0:"));
    assert!(asm.contains("cmp $0,%rax"));
}

#[test]
fn array_initializer_stores_each_element() {
    let asm = compile("int main(){ int a[3] = {1, 2, 3}; return a[1]; }");
    assert_eq!(asm.matches("mov $1,%rax").count() >= 1, true, "{asm}");
    assert_eq!(asm.matches("mov $2,%rax").count() >= 1, true, "{asm}");
    assert_eq!(asm.matches("mov $3,%rax").count() >= 1, true, "{asm}");
}

#[test]
fn global_and_local_variables_use_distinct_addressing() {
    let asm = compile("int g; int main(){ int l; l = 1; g = 2; return g + l; }");
    assert!(asm.contains("lea g(%rip)"));
    assert!(asm.contains("(%rbp)"));
}

#[test]
fn recursive_function_emits_its_own_return_label_once() {
    let asm = compile("int fact(int n){ if (n) { return n * fact(n - 1); } return 1; }");
    assert_eq!(asm.matches(".L.fact.ret:").count(), 1);
}

#[test]
fn undeclared_variable_is_a_compile_error() {
    let tokens = Lexer::new("int main(){ return y; }").tokenize().expect("lex");
    let err = Parser::new(tokens).parse().unwrap_err();
    assert_eq!(err.kind(), mcc::parser::ParseErrorKind::UndeclaredVariable);
}

#[test]
fn unterminated_string_is_a_lex_error() {
    let err = Lexer::new("int main(){ return *\"hi; }").tokenize().unwrap_err();
    assert_eq!(err.kind(), mcc::lexer::LexErrorKind::UnterminatedString);
}
