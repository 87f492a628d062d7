//! Tests for compact serialization and the parse/serialize round trip.

use pak_css::tokenizer::{CSSToken, Number, TokenKind};
use pak_css::ast::Rule;
use pak_css::{parse, serialize, serialize_media_queries};
use pak_css::serializer::serialize_tokens;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

/// Serializing a parsed stylesheet must parse back to the same tree.
fn assert_round_trip(input: &str) -> String {
    let sheet = parse(input).unwrap();
    let out = serialize(&sheet);
    let reparsed = parse(&out).unwrap_or_else(|e| panic!("{out}: {e}"));
    assert_eq!(sheet, reparsed, "{out}");
    out
}

fn tokens(kinds: Vec<TokenKind>) -> Vec<CSSToken> {
    kinds
        .into_iter()
        .enumerate()
        .map(|(i, kind)| CSSToken::new(i, kind))
        .collect()
}

#[test]
fn test_compact_style_rule() {
    let out = assert_round_trip("p , a > b {\n  color : red ;\n  margin: 0 auto !important;\n}");
    assert_eq!(out, "p,a>b{color:red;margin:0 auto!important}");
}

#[test]
fn test_import_is_written_as_string() {
    let out = assert_round_trip("@import url(foo.css) screen;");
    assert_eq!(out, "@import \"foo.css\" screen;");
}

#[test]
fn test_media_rule() {
    let out = assert_round_trip("@media screen and (min-width: 10px) { a { b: c } }");
    assert_eq!(out, "@media screen and (min-width:10px){a{b:c}}");
}

#[test]
fn test_import_conditions_alone() {
    let sheet = parse("@import 'a.css' print, screen and (min-width: 10px);").unwrap();
    let Rule::Import(import) = &sheet.rules[0] else {
        panic!("expected an import rule");
    };
    assert_eq!(
        serialize_media_queries(&import.conditions),
        "print,screen and (min-width:10px)"
    );
}

#[test]
fn test_media_conditions_round_trip() {
    let _ = assert_round_trip("@media not print, only screen {}");
    let _ = assert_round_trip("@media (a) or ((b) and (c)) {}");
    let _ = assert_round_trip("@media not ((a) and (b)) {}");
    let _ = assert_round_trip("@media (400px <= width < 800px), (width > 3px), (height <= 9px) {}");
}

#[test]
fn test_selectors_round_trip() {
    let out = assert_round_trip("#foo.bar>.baz, ul li + li, svg|* , [data-x~='y' s], a:hover::after {}");
    assert_eq!(out, "#foo.bar>.baz,ul li+li,svg|*,[data-x~=\"y\" s],a:hover::after{}");
    let _ = assert_round_trip(":is(a, b) ~ *|c {}");
}

#[test]
fn test_at_rules_round_trip() {
    let out = assert_round_trip("@charset \"utf-8\"; @font-face { src: url(a.woff2) format('woff2') }");
    assert_eq!(
        out,
        "@charset \"utf-8\";@font-face{ src: url(a.woff2) format('woff2') }"
    );
}

#[test]
fn test_escaped_identifiers_round_trip() {
    let _ = assert_round_trip(r".\31 23 { content: 'a\'b' }");
    let _ = assert_round_trip(r"#a\.b { x: y }");
    let _ = assert_round_trip(r"a { b: url(a\ b.png) }");
}

#[test]
fn test_adjacent_tokens_get_separator() {
    let out = serialize_tokens(&tokens(vec![
        TokenKind::Ident("a".to_string()),
        TokenKind::Ident("b".to_string()),
        TokenKind::Number(Number::integer(1.0)),
        TokenKind::Percentage(Number::integer(2.0)),
        TokenKind::Delim('/'),
        TokenKind::Delim('*'),
    ]));
    assert_eq!(out, "a/**/b/**/1/**/2%//**/*");
}

#[test]
fn test_number_keeps_its_type() {
    let out = serialize_tokens(&tokens(vec![TokenKind::Number(Number::real(2.0))]));
    assert_eq!(out, "2.0");
    let rescanned = pak_css::scan(&out).unwrap();
    assert_eq!(rescanned[0].kind, TokenKind::Number(Number::real(2.0)));
}

#[test]
fn test_exponent_like_unit_is_escaped() {
    let kind = TokenKind::Dimension {
        number: Number::integer(1.0),
        unit: "e3".to_string(),
    };
    let out = serialize_tokens(&tokens(vec![kind.clone()]));
    let rescanned = pak_css::scan(&out).unwrap();
    assert_eq!(rescanned.len(), 1, "{out}");
    assert_eq!(rescanned[0].kind, kind);
}

/// Helper to spell one value component from generated parts
fn component(kind: u8, whole: u32, fraction: u16, exponent: i16) -> String {
    match kind % 11 {
        0 => whole.to_string(),
        1 => format!("{whole}.{fraction}"),
        2 => format!("{whole}e{exponent}"),
        3 => format!(".{fraction}e{exponent}px"),
        4 => format!("{whole}%"),
        5 => format!("-{whole}.{fraction}em"),
        6 => "9".repeat(usize::from(fraction % 400)),
        7 => "x".to_string(),
        8 => "-".to_string(),
        9 => "/".to_string(),
        _ => ",".to_string(),
    }
}

#[test]
fn test_out_of_range_numbers_round_trip() {
    let out = assert_round_trip("a{b:1e400 -1e400 1e-400}");
    assert!(!out.contains("inf"), "{out}");
    let out = assert_round_trip(&format!("a{{b:{}px}}", "7".repeat(400)));
    assert!(!out.contains("inf"), "{out}");
}

#[test]
fn test_non_finite_tokens_are_written_as_numbers() {
    let out = serialize_tokens(&tokens(vec![TokenKind::Number(Number {
        value: f64::NEG_INFINITY,
        integer: true,
    })]));
    assert_eq!(out, f64::MIN.to_string());
}

#[quickcheck]
fn prop_serialize_is_a_fixpoint(components: Vec<(u8, u32, u16, i16)>) -> TestResult {
    let value: Vec<String> = components
        .into_iter()
        .map(|(kind, whole, fraction, exponent)| component(kind, whole, fraction, exponent))
        .collect();
    let input = format!("a{{b:{}}}", value.join(" "));
    let Ok(sheet) = parse(&input) else {
        return TestResult::discard();
    };
    let out = serialize(&sheet);
    TestResult::from_bool(parse(&out).is_ok_and(|reparsed| reparsed == sheet))
}
