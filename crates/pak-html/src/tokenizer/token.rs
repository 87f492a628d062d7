//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! "The output of the tokenization step is a series of zero or more of the
//! following tokens: DOCTYPE, start tag, end tag, comment, character,
//! end-of-file."
//!
//! Comments are dropped by the tokenizer and the end of the token vector
//! stands in for the end-of-file token.

use pak_dom::Attribute;

/// A token with the byte offset of the code point that started it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Byte offset into the scanned input.
    pub offset: usize,
    /// What was scanned.
    pub kind: TokenKind,
}

impl Token {
    /// Create a token.
    #[must_use]
    pub const fn new(offset: usize, kind: TokenKind) -> Self {
        Self { offset, kind }
    }

    /// Whether this is a character token holding ASCII whitespace.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self.kind, TokenKind::Character(c) if is_whitespace_char(c))
    }

    /// Whether this is a start tag named `name`.
    #[must_use]
    pub fn is_start_tag(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::StartTag { name: tag, .. } if tag == name)
    }

    /// Whether this is an end tag named `name`.
    #[must_use]
    pub fn is_end_tag(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::EndTag { name: tag } if tag == name)
    }
}

/// The token variants the scanner emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `<!doctype html>`; the only document type the scanner accepts.
    Doctype,

    /// "Start and end tag tokens have a tag name, a self-closing flag, and a
    /// list of attributes, each of which has a name and a value."
    StartTag {
        /// "a tag name", lowercased
        name: String,
        /// "a list of attributes", in source order
        attributes: Vec<Attribute>,
        /// "a self-closing flag"
        self_closing: bool,
    },

    /// End tag token. Attributes on end tags are scanned and dropped.
    EndTag {
        /// "a tag name", lowercased
        name: String,
    },

    /// "Comment and character tokens have data."
    Character(char),
}

/// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
///
/// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR,
/// or U+0020 SPACE."
#[must_use]
pub const fn is_whitespace_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0C' | '\r')
}
