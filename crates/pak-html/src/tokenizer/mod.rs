//! HTML tokenizer module.
//!
//! Implements the subset of [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! the bundler needs: tags with attributes, comments, the HTML doctype,
//! character data and raw text elements.

/// Helper methods for tokenizer state transitions.
pub mod helpers;
/// Token types produced by the tokenizer.
pub mod token;
/// HTML tokenizer state machine implementation.
pub mod core;

pub use self::core::{HTMLTokenizer, RAW_TEXT_ELEMENTS, TokenizerState};
pub use token::{Token, TokenKind, is_whitespace_char};
