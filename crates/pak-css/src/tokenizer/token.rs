//! CSS Token types per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
//!
//! "The output of the tokenization step is a stream of zero or more of the
//! following tokens: `<ident-token>`, `<function-token>`, `<at-keyword-token>`,
//! `<hash-token>`, `<string-token>`, `<url-token>`, `<delim-token>`,
//! `<number-token>`, `<percentage-token>`, `<dimension-token>`,
//! `<whitespace-token>`, `<colon-token>`, `<semicolon-token>`,
//! `<comma-token>`, `<[-token>`, `<]-token>`, `<(-token>`, `<)-token>`, `<{-token>`,
//! and `<}-token>`."
//!
//! Bad-string and bad-url tokens are never produced: the scanner reports a
//! syntax error instead.

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// "`<number-token>`, `<percentage-token>`, and `<dimension-token>` have a
/// numeric value, and a type flag set to either "integer" or "number"."
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
    /// The parsed value.
    pub value: f64,
    /// True when the source had neither a fraction nor an exponent.
    pub integer: bool,
}

impl Number {
    /// An integer-typed number.
    #[must_use]
    pub const fn integer(value: f64) -> Self {
        Self {
            value,
            integer: true,
        }
    }

    /// A number-typed number.
    #[must_use]
    pub const fn real(value: f64) -> Self {
        Self {
            value,
            integer: false,
        }
    }
}

/// A token with the byte offset of its first code point.
///
/// Tokens compare by kind alone; the offset is positional metadata and two
/// stylesheets that differ only in layout compare equal.
#[derive(Debug, Clone)]
pub struct CSSToken {
    /// Byte offset into the scanned input.
    pub offset: usize,
    /// What was scanned.
    pub kind: TokenKind,
}

impl CSSToken {
    /// Create a token.
    #[must_use]
    pub const fn new(offset: usize, kind: TokenKind) -> Self {
        Self { offset, kind }
    }

    /// Whether this is a `<whitespace-token>`.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace)
    }

    /// Whether this is a `<delim-token>` holding `c`.
    #[must_use]
    pub fn is_delim(&self, c: char) -> bool {
        self.kind == TokenKind::Delim(c)
    }

    /// Whether this is an `<ident-token>` matching `name` ASCII case-insensitively.
    #[must_use]
    pub fn is_ident(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::Ident(value) if value.eq_ignore_ascii_case(name))
    }
}

impl PartialEq for CSSToken {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// "`<ident-token>`"
    Ident(String),

    /// "`<function-token>`", the name without the opening parenthesis.
    Function(String),

    /// "`<at-keyword-token>`", the name without the `@`.
    AtKeyword(String),

    /// "`<hash-token>`"
    Hash {
        /// The name without the `#`.
        value: String,
        /// "type flag set to 'id'" when the name would start an identifier.
        id: bool,
    },

    /// "`<string-token>`"
    String {
        /// The quote that delimited the string.
        mark: char,
        /// The decoded value.
        value: String,
    },

    /// "`<url-token>`", the decoded contents of an unquoted `url(...)`.
    Url(String),

    /// "`<delim-token>`"
    Delim(char),

    /// "`<number-token>`"
    Number(Number),

    /// "`<percentage-token>`"
    Percentage(Number),

    /// "`<dimension-token>`"
    Dimension {
        /// The numeric part.
        number: Number,
        /// The unit, e.g. `px`.
        unit: String,
    },

    /// "`<whitespace-token>`", one per run of whitespace.
    Whitespace,

    /// "`<colon-token>`"
    Colon,

    /// "`<semicolon-token>`"
    Semicolon,

    /// "`<comma-token>`"
    Comma,

    /// "`<[-token>`"
    OpenSquare,

    /// "`<]-token>`"
    CloseSquare,

    /// "`<(-token>`"
    OpenParen,

    /// "`<)-token>`"
    CloseParen,

    /// "`<{-token>`"
    OpenCurly,

    /// "`<}-token>`"
    CloseCurly,
}
