//! JavaScript lexer module.

/// The lexer implementation.
pub mod core;
/// Token types per [§ 12 Lexical Grammar](https://tc39.es/ecma262/#sec-ecmascript-language-lexical-grammar).
pub mod token;

pub use self::core::JSLexer;
pub use token::{Token, TokenKind};
