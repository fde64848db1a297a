//! Diagnostic rendering.
//!
//! Every compile error renders as the same two-line shape:
//!
//! ```text
//! error: <source>
//!        <spaces><carets> <message>
//! ```
//!
//! The whole source string is printed on the `error:` line, since a program
//! arrives as a single CLI argument rather than a file read line-by-line, so
//! there is no separate notion of "the current line" to extract a caret under.

use crate::token::Span;

const PREFIX: &str = "error: ";

/// Renders a single diagnostic as the two-line `error: .../carets` text,
/// ready to be written to stderr.
pub fn render(source: &str, span: Span, message: &str) -> String {
    let indent = " ".repeat(PREFIX.len() + span.start);
    let carets = "^".repeat(span.len.max(1));
    format!("{PREFIX}{source}\n{indent}{carets} {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_lines_up_under_the_offending_span() {
        let rendered = render("int main(){return y;}", Span::new(19, 1), "undeclared variable 'y'");
        let mut lines = rendered.lines();
        assert_eq!(lines.next().unwrap(), "error: int main(){return y;}");
        let second = lines.next().unwrap();
        assert!(second.starts_with(&" ".repeat(PREFIX.len() + 19)));
        assert!(second.trim_start().starts_with('^'));
        assert!(second.ends_with("undeclared variable 'y'"));
    }

    #[test]
    fn zero_length_span_still_shows_one_caret() {
        let rendered = render("int main(){}", Span::empty_at(12), "expected an expression");
        assert!(rendered.contains('^'));
    }
}
