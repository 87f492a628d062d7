//! HTML tokenizer, document parser and serializer for the pak bundler.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RAWTEXT, tag, attribute and comment states
//!   - `<!doctype html>` as the only accepted document type
//!   - `script`, `style` and `title` content scanned as raw text
//!
//! - **HTML Parser / Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - Insertion modes: Initial, BeforeHtml, BeforeHead, InHead, AfterHead, InBody, Text, AfterBody, AfterAfterBody
//!   - Implied `html`, `head` and `body` elements; the document element always
//!     has exactly `[head, body]` as children
//!
//! - **Serializer** ([WHATWG § 13.3](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments))
//!
//! Parse errors are fatal: the first one aborts the document with a
//! [`SyntaxError`] carrying its byte offset.
//!
//! # Not Yet Implemented
//!
//! - Character reference decoding
//! - Script data escape states
//! - Table, form and frameset insertion modes
//! - Foreign content (SVG, `MathML`)

/// HTML parser and tree construction.
pub mod parser;
/// HTML serializer.
pub mod serializer;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

use pak_common::SyntaxError;
use pak_dom::DomTree;

pub use parser::{HTMLParser, InsertionMode};
pub use serializer::{serialize, serialize_node};
pub use tokenizer::{HTMLTokenizer, Token, TokenKind};

/// Tokenize `input`.
pub fn scan(input: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut tokenizer = HTMLTokenizer::new(input);
    tokenizer.run()?;
    Ok(tokenizer.into_tokens())
}

/// Tokenize and parse `input` into a document tree.
pub fn parse(input: &str) -> Result<DomTree, SyntaxError> {
    HTMLParser::new(scan(input)?).run()
}
