//! CSS scanner, stylesheet parser and serializer for the pak bundler.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - All token types: ident, function, at-keyword, hash, string, url, number, dimension, etc.
//!   - Comment handling
//!   - Escape sequences
//!   - Byte offsets on every token
//!
//! - **CSS Parser** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - Style rules with selector lists and declaration blocks
//!   - `@import` with media conditions
//!   - `@media` with nested rules
//!   - Other at-rules kept as raw tokens
//!
//! - **CSS Selectors** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, class, ID, universal, attribute and pseudo selectors
//!   - Compound selectors
//!   - Combinators (descendant, child, sibling)
//!
//! - **Media Queries** ([Media Queries Level 4](https://www.w3.org/TR/mediaqueries-4/))
//!   - Media types with `only` and `not`
//!   - `and`, `or` and `not` conditions
//!   - Plain, boolean and range features
//!
//! - **Serialization** ([§ 9 Serialization](https://www.w3.org/TR/css-syntax-3/#serialization))
//!   - Compact output that scans back to the same tokens
//!
//! # Not Yet Implemented
//!
//! - Error recovery: every parse error is fatal
//! - `@supports`, `@layer` and nesting as structured rules

/// Stylesheet syntax tree.
pub mod ast;
/// CSS parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// CSS serializer per [§ 9 Serialization](https://www.w3.org/TR/css-syntax-3/#serialization).
pub mod serializer;
/// CSS tokenizer per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod tokenizer;

pub use ast::StyleSheet;
pub use parser::CSSParser;
pub use serializer::{serialize, serialize_media_queries};
pub use tokenizer::{CSSToken, CSSTokenizer, TokenKind};

use pak_common::SyntaxError;

/// Scan `input` into tokens.
pub fn scan(input: &str) -> Result<Vec<CSSToken>, SyntaxError> {
    let mut tokenizer = CSSTokenizer::new(input);
    tokenizer.run()?;
    Ok(tokenizer.into_tokens())
}

/// Scan and parse `input` into a stylesheet.
pub fn parse(input: &str) -> Result<StyleSheet, SyntaxError> {
    let mut parser = CSSParser::new(scan(input)?);
    parser.parse_stylesheet()
}
