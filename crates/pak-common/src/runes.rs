//! Character class predicates.
//!
//! [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#tokenizer-definitions)

/// "A code point between U+0030 DIGIT ZERO (0) and U+0039 DIGIT NINE (9) inclusive."
#[must_use]
pub const fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// "A digit, or a code point between U+0041 (A) and U+0046 (F) inclusive,
/// or a code point between U+0061 (a) and U+0066 (f) inclusive."
#[must_use]
pub const fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// "An uppercase letter or a lowercase letter."
#[must_use]
pub const fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// "A code point with a value equal to or greater than U+0080 <control>."
#[must_use]
pub const fn is_non_ascii(c: char) -> bool {
    c as u32 >= 0x80
}

/// "A letter, a non-ASCII code point, or U+005F LOW LINE (_)."
#[must_use]
pub const fn is_name_start(c: char) -> bool {
    is_letter(c) || is_non_ascii(c) || c == '_'
}

/// "An ident-start code point, a digit, or U+002D HYPHEN-MINUS (-)."
#[must_use]
pub const fn is_name(c: char) -> bool {
    is_name_start(c) || is_digit(c) || c == '-'
}

/// "U+000A LINE FEED", plus U+000D and U+000C which preprocessing would
/// otherwise have folded into it.
#[must_use]
pub const fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\x0C')
}

/// "A newline, U+0009 CHARACTER TABULATION, or U+0020 SPACE."
#[must_use]
pub const fn is_whitespace(c: char) -> bool {
    is_newline(c) || c == '\t' || c == ' '
}

/// The numeric value of a hex digit, or `None` for anything else.
#[must_use]
pub const fn hex_value(c: char) -> Option<u32> {
    c.to_digit(16)
}
