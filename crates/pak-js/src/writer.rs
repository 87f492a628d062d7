//! Program writer.
//!
//! The source text is copied through unchanged except for module
//! specifiers, which are written from their current value.

use crate::ast::Program;

/// Write `program` back to source text.
#[must_use]
pub fn write(program: &Program) -> String {
    let mut out = String::with_capacity(program.text.len());
    let mut copied = 0;
    for declaration in &program.declarations {
        let span = &declaration.source.span;
        out.push_str(&program.text[copied..span.start]);
        out.push_str(&declaration.source.raw);
        copied = span.end;
    }
    out.push_str(&program.text[copied..]);
    out
}
