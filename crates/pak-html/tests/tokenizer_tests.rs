//! Integration tests for the HTML tokenizer.

use pak_common::SyntaxError;
use pak_dom::Attribute;
use pak_html::{Token, TokenKind};
use quickcheck_macros::quickcheck;

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    pak_html::scan(input).unwrap()
}

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).into_iter().map(|t| t.kind).collect()
}

fn error(input: &str) -> SyntaxError {
    pak_html::scan(input).unwrap_err()
}

fn start_tag(name: &str, attributes: &[(&str, &str)], self_closing: bool) -> TokenKind {
    TokenKind::StartTag {
        name: name.to_string(),
        attributes: attributes
            .iter()
            .map(|(name, value)| Attribute::new(*name, *value))
            .collect(),
        self_closing,
    }
}

fn end_tag(name: &str) -> TokenKind {
    TokenKind::EndTag {
        name: name.to_string(),
    }
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hi");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], Token::new(0, TokenKind::Character('H')));
    assert_eq!(tokens[1], Token::new(1, TokenKind::Character('i')));
}

#[test]
fn test_doctype() {
    assert_eq!(kinds("<!DOCTYPE html>"), [TokenKind::Doctype]);
    assert_eq!(kinds("<!doctype  HTML >"), [TokenKind::Doctype]);
}

#[test]
fn test_doctype_other_than_html() {
    let err = error("<!doctype xml>");
    assert_eq!(err.offset, 10);
    assert_eq!(err.message, "expected <!doctype html>");
}

#[test]
fn test_start_tag_with_attributes() {
    assert_eq!(
        kinds(r#"<a HREF="x" data-y='z' c=d e>"#),
        [start_tag(
            "a",
            &[("href", "x"), ("data-y", "z"), ("c", "d"), ("e", "")],
            false
        )]
    );
}

#[test]
fn test_self_closing_tag() {
    assert_eq!(kinds("<br/>"), [start_tag("br", &[], true)]);
}

#[test]
fn test_tag_names_are_lowercased() {
    let tokens = tokenize("<A></A>");
    assert_eq!(tokens[0], Token::new(0, start_tag("a", &[], false)));
    assert_eq!(tokens[1], Token::new(3, end_tag("a")));
}

#[test]
fn test_duplicate_attribute() {
    let err = error("<a x=1 X=2>");
    assert_eq!(err.offset, 7);
    assert_eq!(err.message, "unexpected duplicate attribute");
}

#[test]
fn test_bad_unquoted_attribute_value() {
    let err = error(r#"<a x=b"c>"#);
    assert_eq!(err.offset, 6);
    assert_eq!(err.message, "unexpected character in unquoted attribute value");
}

#[test]
fn test_comments_are_dropped() {
    let tokens = tokenize("a<!-- <b> -->c");
    assert_eq!(
        tokens,
        [
            Token::new(0, TokenKind::Character('a')),
            Token::new(13, TokenKind::Character('c')),
        ]
    );
    assert!(tokenize("<!---->").is_empty());
}

#[test]
fn test_unterminated_comment() {
    let err = error("<!-- x");
    assert_eq!(err.offset, 6);
    assert_eq!(err.message, "unexpected end of file");
}

#[test]
fn test_raw_text_until_matching_end_tag() {
    let tokens = tokenize("<script>a<b</script>");
    assert_eq!(
        tokens,
        [
            Token::new(0, start_tag("script", &[], false)),
            Token::new(8, TokenKind::Character('a')),
            Token::new(9, TokenKind::Character('<')),
            Token::new(10, TokenKind::Character('b')),
            Token::new(11, end_tag("script")),
        ]
    );
}

#[test]
fn test_raw_text_end_tag_is_case_insensitive() {
    assert_eq!(
        kinds("<style>x</STYLE>"),
        [
            start_tag("style", &[], false),
            TokenKind::Character('x'),
            end_tag("style"),
        ]
    );
}

#[test]
fn test_raw_text_ignores_other_end_tags() {
    assert_eq!(
        kinds("<title></b></title>"),
        [
            start_tag("title", &[], false),
            TokenKind::Character('<'),
            TokenKind::Character('/'),
            TokenKind::Character('b'),
            TokenKind::Character('>'),
            end_tag("title"),
        ]
    );
}

#[test]
fn test_stray_less_than_is_text() {
    let tokens = tokenize("a</ b");
    let chars: String = tokens
        .iter()
        .map(|t| match t.kind {
            TokenKind::Character(c) => c,
            _ => panic!("expected characters, got {t:?}"),
        })
        .collect();
    assert_eq!(chars, "a</ b");
    assert_eq!(tokens[1].offset, 1);
    assert_eq!(tokens[2].offset, 2);
}

#[test]
fn test_null_character() {
    let err = error("a\0");
    assert_eq!(err.offset, 1);
    assert_eq!(err.message, "unexpected null character in data state");
}

#[test]
fn test_eof_in_tag() {
    let err = error("<a href");
    assert_eq!(err.offset, 7);
    assert_eq!(err.message, "unexpected end of file");
}

#[test]
fn test_byte_offsets() {
    let tokens = tokenize("é<b>");
    assert_eq!(tokens[0].offset, 0);
    assert_eq!(tokens[1], Token::new(2, start_tag("b", &[], false)));
}

#[quickcheck]
fn prop_offsets_are_ordered_and_in_bounds(input: String) -> bool {
    match pak_html::scan(&input) {
        Ok(tokens) => {
            tokens.iter().all(|t| t.offset < input.len())
                && tokens.windows(2).all(|pair| pair[0].offset <= pair[1].offset)
        }
        Err(err) => err.offset <= input.len(),
    }
}
