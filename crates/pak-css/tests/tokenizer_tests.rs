//! Tests for the CSS scanner: token kinds, offsets and fatal errors.

use pak_common::SyntaxError;
use pak_css::tokenizer::{CSSToken, Number, TokenKind};
use quickcheck_macros::quickcheck;

/// Helper to scan and unwrap
fn scan(input: &str) -> Vec<CSSToken> {
    pak_css::scan(input).unwrap()
}

fn kinds(input: &str) -> Vec<TokenKind> {
    scan(input).into_iter().map(|t| t.kind).collect()
}

fn error(input: &str) -> SyntaxError {
    pak_css::scan(input).unwrap_err()
}

#[test]
fn test_custom_property_is_ident() {
    assert_eq!(kinds("--foo"), [TokenKind::Ident("--foo".to_string())]);
}

#[test]
fn test_number_with_exponent() {
    let tokens = kinds("1.23e-2");
    assert_eq!(tokens.len(), 1);
    let TokenKind::Number(number) = tokens[0] else {
        panic!("expected a number, got {:?}", tokens[0]);
    };
    assert!((number.value - 0.0123).abs() < 1e-12);
    assert!(!number.integer);
}

#[test]
fn test_dimension_and_percentage() {
    assert_eq!(
        kinds("123px 50%"),
        [
            TokenKind::Dimension {
                number: Number::integer(123.0),
                unit: "px".to_string(),
            },
            TokenKind::Whitespace,
            TokenKind::Percentage(Number::integer(50.0)),
        ]
    );
}

#[test]
fn test_escaped_ident() {
    assert_eq!(kinds(r"\61\62\63"), [TokenKind::Ident("abc".to_string())]);
}

#[test]
fn test_escape_of_zero_is_replacement() {
    assert_eq!(kinds(r"\0 a"), [TokenKind::Ident("\u{FFFD}a".to_string())]);
}

#[test]
fn test_hash_type_flag() {
    assert_eq!(
        kinds("#foo #123"),
        [
            TokenKind::Hash {
                value: "foo".to_string(),
                id: true,
            },
            TokenKind::Whitespace,
            TokenKind::Hash {
                value: "123".to_string(),
                id: false,
            },
        ]
    );
}

#[test]
fn test_strings_and_urls() {
    assert_eq!(
        kinds(r#"'a\'b' url( foo.png ) url("bar.png")"#),
        [
            TokenKind::String {
                mark: '\'',
                value: "a'b".to_string(),
            },
            TokenKind::Whitespace,
            TokenKind::Url("foo.png".to_string()),
            TokenKind::Whitespace,
            TokenKind::Function("url".to_string()),
            TokenKind::String {
                mark: '"',
                value: "bar.png".to_string(),
            },
            TokenKind::CloseParen,
        ]
    );
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        kinds("a/* x */b"),
        [TokenKind::Ident("a".to_string()), TokenKind::Ident("b".to_string())]
    );
}

#[test]
fn test_offsets_are_byte_offsets() {
    let offsets: Vec<usize> = scan("é {x}").iter().map(|t| t.offset).collect();
    assert_eq!(offsets, [0, 2, 3, 4, 5]);
}

#[test]
fn test_string_with_newline_is_error() {
    let err = error("\"foo\n");
    assert_eq!(err.offset, 4);
    assert_eq!(err.message, "unexpected newline");
}

#[test]
fn test_url_with_whitespace_is_error() {
    let err = error("url(foo bar)");
    assert_eq!(err.offset, 7);
    assert_eq!(err.message, "unexpected whitespace");
}

#[test]
fn test_url_with_quote_is_error() {
    let err = error("url(fo'o)");
    assert_eq!(err.offset, 6);
    assert_eq!(err.message, "unexpected character in url");
}

#[test]
fn test_unterminated_comment_is_error() {
    let err = error("a /* b");
    assert_eq!(err.offset, 6);
    assert_eq!(err.message, "unexpected end of file");
}

#[test]
fn test_unterminated_string_is_error() {
    let err = error("'abc");
    assert_eq!(err.offset, 4);
    assert_eq!(err.message, "unexpected end of file");
}

#[test]
fn test_backslash_newline_outside_string_is_delim() {
    assert_eq!(
        kinds("\\\n"),
        [TokenKind::Delim('\\'), TokenKind::Whitespace]
    );
}

#[test]
fn test_out_of_range_numbers_are_clamped() {
    let huge = format!("-{}", "9".repeat(400));
    assert_eq!(
        kinds(&format!("1e400 {huge}")),
        [
            TokenKind::Number(Number {
                value: f64::MAX,
                integer: false
            }),
            TokenKind::Whitespace,
            TokenKind::Number(Number {
                value: f64::MIN,
                integer: true
            }),
        ]
    );
}

#[quickcheck]
fn prop_offsets_strictly_increase(input: String) -> bool {
    match pak_css::scan(&input) {
        Ok(tokens) => tokens
            .windows(2)
            .all(|pair| pair[0].offset < pair[1].offset),
        Err(err) => err.offset <= input.len(),
    }
}
