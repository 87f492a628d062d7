//! Integration tests for the JavaScript lexer.

use pak_common::SyntaxError;
use pak_js::{Token, TokenKind};
use quickcheck_macros::quickcheck;

/// Helper to scan a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    pak_js::scan(input).unwrap()
}

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).into_iter().map(|t| t.kind).collect()
}

fn error(input: &str) -> SyntaxError {
    pak_js::scan(input).unwrap_err()
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Identifier(name.to_string())
}

fn string(value: &str, quote: char) -> TokenKind {
    TokenKind::String {
        value: value.to_string(),
        quote,
    }
}

fn number(raw: &str) -> TokenKind {
    TokenKind::Number(raw.to_string())
}

#[test]
fn test_simple_statement() {
    let tokens = tokenize("let a = 1;");
    let offsets: Vec<usize> = tokens.iter().map(|t| t.offset).collect();
    assert_eq!(offsets, [0, 4, 6, 8, 9]);
    assert_eq!(
        tokens.into_iter().map(|t| t.kind).collect::<Vec<_>>(),
        [
            ident("let"),
            ident("a"),
            TokenKind::Punctuator("="),
            number("1"),
            TokenKind::Punctuator(";"),
        ]
    );
}

#[test]
fn test_string_literals() {
    assert_eq!(
        kinds(r#""a\nb" 'c\'d'"#),
        [string("a\nb", '"'), string("c'd", '\'')]
    );
}

#[test]
fn test_string_escapes() {
    assert_eq!(kinds(r#""\x41B\u{43}""#), [string("ABC", '"')]);
    assert_eq!(kinds(r#""\uD83D\uDE00""#), [string("\u{1F600}", '"')]);
    assert_eq!(kinds("\"a\\\nb\""), [string("ab", '"')]);
}

#[test]
fn test_invalid_escape() {
    let err = error(r#""\xZZ""#);
    assert_eq!(err.offset, 1);
    assert_eq!(err.message, "invalid escape sequence");
}

#[test]
fn test_newline_in_string() {
    let err = error("\"ab\n\"");
    assert_eq!(err.offset, 3);
    assert_eq!(err.message, "unexpected newline");
}

#[test]
fn test_unterminated_string() {
    let err = error("'ab");
    assert_eq!(err.offset, 3);
    assert_eq!(err.message, "unexpected end of file");
}

#[test]
fn test_comments_are_skipped() {
    let tokens = tokenize("a // x\n/* y */ b");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], Token::new(0, 1, ident("a")));
    assert_eq!(tokens[1], Token::new(15, 16, ident("b")));
}

#[test]
fn test_unterminated_block_comment() {
    let err = error("/* x");
    assert_eq!(err.offset, 4);
    assert_eq!(err.message, "unexpected end of file");
}

#[test]
fn test_division_after_operand() {
    assert_eq!(
        kinds("a / b"),
        [ident("a"), TokenKind::Punctuator("/"), ident("b")]
    );
    assert_eq!(
        kinds("(a) /= 2"),
        [
            TokenKind::Punctuator("("),
            ident("a"),
            TokenKind::Punctuator(")"),
            TokenKind::Punctuator("/="),
            number("2"),
        ]
    );
}

#[test]
fn test_regexp_literals() {
    assert_eq!(
        kinds("x = /ab+c/gi.test(y)"),
        [
            ident("x"),
            TokenKind::Punctuator("="),
            TokenKind::RegExp,
            TokenKind::Punctuator("."),
            ident("test"),
            TokenKind::Punctuator("("),
            ident("y"),
            TokenKind::Punctuator(")"),
        ]
    );
    assert_eq!(kinds("return /a/"), [ident("return"), TokenKind::RegExp]);
}

#[test]
fn test_regexp_class_may_contain_slash() {
    let tokens = tokenize("/[/]/");
    assert_eq!(tokens, [Token::new(0, 5, TokenKind::RegExp)]);
}

#[test]
fn test_template_with_substitution() {
    let tokens = tokenize("`a${b}c`");
    assert_eq!(
        tokens,
        [
            Token::new(0, 4, TokenKind::Template),
            Token::new(4, 5, ident("b")),
            Token::new(5, 8, TokenKind::Template),
        ]
    );
}

#[test]
fn test_nested_templates() {
    assert_eq!(
        kinds("`${ {a: `x${y}`} }`"),
        [
            TokenKind::Template,
            TokenKind::Punctuator("{"),
            ident("a"),
            TokenKind::Punctuator(":"),
            TokenKind::Template,
            ident("y"),
            TokenKind::Template,
            TokenKind::Punctuator("}"),
            TokenKind::Template,
        ]
    );
}

#[test]
fn test_template_hides_quotes() {
    assert_eq!(
        kinds("`it's \"fine\"`;"),
        [TokenKind::Template, TokenKind::Punctuator(";")]
    );
}

#[test]
fn test_unterminated_template_substitution() {
    let err = error("`a${b");
    assert_eq!(err.offset, 5);
    assert_eq!(err.message, "unexpected end of file");
}

#[test]
fn test_numeric_literals() {
    assert_eq!(
        kinds("0x1F 1.5e-3 .5 10n 1_000"),
        [
            number("0x1F"),
            number("1.5e-3"),
            number(".5"),
            number("10n"),
            number("1_000"),
        ]
    );
}

#[test]
fn test_optional_chaining_before_digit() {
    assert_eq!(
        kinds("a?.b"),
        [ident("a"), TokenKind::Punctuator("?."), ident("b")]
    );
    assert_eq!(
        kinds("a?.5:1"),
        [
            ident("a"),
            TokenKind::Punctuator("?"),
            number(".5"),
            TokenKind::Punctuator(":"),
            number("1"),
        ]
    );
}

#[test]
fn test_longest_punctuator() {
    assert_eq!(
        kinds("a >>>= b ?? c"),
        [
            ident("a"),
            TokenKind::Punctuator(">>>="),
            ident("b"),
            TokenKind::Punctuator("??"),
            ident("c"),
        ]
    );
}

#[test]
fn test_unexpected_character() {
    let err = error("a \\");
    assert_eq!(err.offset, 2);
    assert_eq!(err.message, "unexpected character");
}

#[test]
fn test_hashbang_and_private_names() {
    assert_eq!(kinds("#!/usr/bin/env node\nx"), [ident("x")]);
    assert_eq!(
        kinds("this.#x"),
        [ident("this"), TokenKind::Punctuator("."), ident("#x")]
    );
}

#[quickcheck]
fn prop_offsets_are_ordered_and_in_bounds(input: String) -> bool {
    match pak_js::scan(&input) {
        Ok(tokens) => {
            tokens
                .iter()
                .all(|t| t.offset < t.end && t.end <= input.len())
                && tokens.windows(2).all(|pair| pair[0].end <= pair[1].offset)
        }
        Err(err) => err.offset <= input.len(),
    }
}
