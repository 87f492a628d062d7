//! JavaScript module lexer and import declaration parser for the pak bundler.
//!
//! # Scope
//!
//! This crate implements:
//! - **Lexer** ([§ 12 Lexical Grammar](https://tc39.es/ecma262/#sec-ecmascript-language-lexical-grammar))
//!   - Comments, white space and hashbang lines
//!   - String literals with escape sequences
//!   - Template literals with nested substitutions
//!   - Regular expression literals, told apart from division by the
//!     preceding token
//!   - Numeric literals, identifiers and punctuators
//!
//! - **Module declarations** ([§ 16.2 Modules](https://tc39.es/ecma262/#sec-modules))
//!   - Every `import` form, with `with { ... }` and `assert { ... }` attributes
//!   - `export * from`, `export * as ns from` and `export { ... } from`
//!
//! - **Writer**
//!   - The program text with each module specifier written from its
//!     current value
//!
//! # Not Yet Implemented
//!
//! - Statements and expressions: everything that is not a module
//!   declaration is carried as text
//! - Dynamic `import()` specifiers
//! - Unicode escapes in identifiers

/// Module declaration syntax tree.
pub mod ast;
/// Lexer per [§ 12 Lexical Grammar](https://tc39.es/ecma262/#sec-ecmascript-language-lexical-grammar).
pub mod lexer;
/// Module declaration parser per [§ 16.2 Modules](https://tc39.es/ecma262/#sec-modules).
pub mod parser;
/// Program writer.
pub mod writer;

pub use ast::{DeclarationKind, ModuleDeclaration, Program, Specifier, StringLiteral};
pub use lexer::{JSLexer, Token, TokenKind};
pub use parser::ModuleParser;
pub use writer::write;

use pak_common::SyntaxError;

/// Scan `input` into tokens.
pub fn scan(input: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = JSLexer::new(input);
    lexer.run()?;
    Ok(lexer.into_tokens())
}

/// Scan `input` and parse its module declarations.
pub fn parse(input: &str) -> Result<Program, SyntaxError> {
    let tokens = scan(input)?;
    ModuleParser::new(input, tokens).run()
}
