//! JavaScript token types per [§ 12 ECMAScript Language: Lexical Grammar](https://tc39.es/ecma262/#sec-ecmascript-language-lexical-grammar).
//!
//! "The source text of an ECMAScript Script or Module is first converted into
//! a sequence of input elements, which are tokens, line terminators,
//! comments, or white space."
//!
//! Only tokens are kept. Comments and white space are dropped, and literals
//! other than strings keep nothing but their extent in the source.

use std::ops::Range;

/// A token with the byte range it covers in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Byte offset of the first code point.
    pub offset: usize,
    /// Byte offset one past the last code point.
    pub end: usize,
    /// What was scanned.
    pub kind: TokenKind,
}

/// [§ 12.6 Names and Keywords](https://tc39.es/ecma262/#sec-names-and-keywords)
/// and the literal productions that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// An `IdentifierName`, reserved words included. Private names keep
    /// their leading `#`.
    Identifier(String),
    /// [§ 12.9.4 String Literals](https://tc39.es/ecma262/#sec-literals-string-literals)
    String {
        /// The string value after escape processing.
        value: String,
        /// The quote mark, `"` or `'`.
        quote: char,
    },
    /// [§ 12.9.3 Numeric Literals](https://tc39.es/ecma262/#sec-literals-numeric-literals)
    /// as written in the source.
    Number(String),
    /// [§ 12.9.5 Regular Expression Literals](https://tc39.es/ecma262/#sec-literals-regular-expression-literals)
    RegExp,
    /// [§ 12.9.6 Template Literal Lexical Components](https://tc39.es/ecma262/#sec-template-literal-lexical-components)
    ///
    /// One token per `NoSubstitutionTemplate`, `TemplateHead`,
    /// `TemplateMiddle` or `TemplateTail`.
    Template,
    /// [§ 12.8 Punctuators](https://tc39.es/ecma262/#sec-punctuators)
    Punctuator(&'static str),
}

impl Token {
    /// Create a token.
    #[must_use]
    pub const fn new(offset: usize, end: usize, kind: TokenKind) -> Self {
        Self { offset, end, kind }
    }

    /// The byte range of the token in the source text.
    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        self.offset..self.end
    }

    /// Whether this is the identifier or keyword `name`.
    #[must_use]
    pub fn is_identifier(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::Identifier(value) if value == name)
    }

    /// Whether this is the punctuator `punctuator`.
    #[must_use]
    pub fn is_punctuator(&self, punctuator: &str) -> bool {
        matches!(self.kind, TokenKind::Punctuator(value) if value == punctuator)
    }

    /// The identifier name, if this is an identifier.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

/// [§ 12.8 Punctuators](https://tc39.es/ecma262/#sec-punctuators)
///
/// Longest first, so the first match in order is the longest match.
pub const PUNCTUATORS: [&str; 58] = [
    ">>>=", "...", "===", "!==", "**=", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "=>", "==",
    "!=", "<=", ">=", "&&", "||", "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "**", "<<", ">>", "{", "}", "(", ")", "[", "]", ";", ",", "<", ">", "+", "-",
    "*", "/", "%", "&", "|", "^", "!", "~", "?", ":", "=", ".", "@",
];

/// [§ 12.2 White Space](https://tc39.es/ecma262/#sec-white-space) and
/// [§ 12.3 Line Terminators](https://tc39.es/ecma262/#sec-line-terminators)
#[must_use]
pub fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\x0B' | '\x0C' | ' ' | '\u{A0}' | '\u{FEFF}' | '\n' | '\r' | '\u{2028}' | '\u{2029}'
    ) || (c.is_whitespace() && !c.is_ascii())
}

/// [§ 12.3 Line Terminators](https://tc39.es/ecma262/#sec-line-terminators)
#[must_use]
pub const fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// "IdentifierStartChar :: UnicodeIDStart, $, _"
#[must_use]
pub fn is_identifier_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphabetic()
}

/// "IdentifierPartChar :: UnicodeIDContinue, $, ZWNJ, ZWJ"
#[must_use]
pub fn is_identifier_part(c: char) -> bool {
    c == '$' || c == '_' || c == '\u{200C}' || c == '\u{200D}' || c.is_alphanumeric()
}
