//! [§ 9 Serialization](https://www.w3.org/TR/css-syntax-3/#serialization)
//!
//! Writes a [`StyleSheet`] back to compact CSS. The output scans to the same
//! tokens as the tree it came from: identifiers, strings and URLs are
//! escaped where needed, and an empty comment is inserted between two tokens
//! that would otherwise run together.

use std::fmt::Write;

use pak_common::runes::{is_digit, is_name, is_name_start};

use crate::ast::{
    AtRule, AttributeSelector, Declaration, ImportRule, MediaCondition, MediaOperator,
    MediaQualifier, MediaQuery, MediaRule, MediaValue, PseudoSelector, Rule, Selector, StyleRule,
    StyleSheet,
};
use crate::tokenizer::{CSSToken, Number, TokenKind};

/// Serialize a stylesheet to compact CSS.
#[must_use]
pub fn serialize(stylesheet: &StyleSheet) -> String {
    let mut out = String::new();
    write_stylesheet(&mut out, stylesheet);
    out
}

/// Serialize a token sequence.
#[must_use]
pub fn serialize_tokens(tokens: &[CSSToken]) -> String {
    let mut out = String::new();
    write_tokens(&mut out, tokens);
    out
}

/// Serialize a media query list, as written after `@media`.
#[must_use]
pub fn serialize_media_queries(queries: &[MediaQuery]) -> String {
    let mut out = String::new();
    write_media_queries(&mut out, queries);
    out
}

fn write_stylesheet(out: &mut String, stylesheet: &StyleSheet) {
    for rule in &stylesheet.rules {
        match rule {
            Rule::Style(style) => write_style_rule(out, style),
            Rule::Import(import) => write_import_rule(out, import),
            Rule::Media(media) => write_media_rule(out, media),
            Rule::At(at) => write_at_rule(out, at),
        }
    }
}

fn write_style_rule(out: &mut String, rule: &StyleRule) {
    for (i, selector) in rule.selectors.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_selector(out, selector);
    }
    out.push('{');
    for (i, declaration) in rule.declarations.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        write_declaration(out, declaration);
    }
    out.push('}');
}

fn write_declaration(out: &mut String, declaration: &Declaration) {
    write_ident(out, &declaration.name);
    out.push(':');
    write_tokens(out, &declaration.value);
    if declaration.important {
        out.push_str("!important");
    }
}

fn write_import_rule(out: &mut String, rule: &ImportRule) {
    out.push_str("@import ");
    write_string(out, '"', &rule.url.get().to_string());
    if !rule.conditions.is_empty() {
        out.push(' ');
        write_media_queries(out, &rule.conditions);
    }
    out.push(';');
}

fn write_media_rule(out: &mut String, rule: &MediaRule) {
    out.push_str("@media");
    if !rule.conditions.is_empty() {
        out.push(' ');
        write_media_queries(out, &rule.conditions);
    }
    out.push('{');
    write_stylesheet(out, &rule.stylesheet);
    out.push('}');
}

fn write_at_rule(out: &mut String, rule: &AtRule) {
    out.push('@');
    write_ident(out, &rule.name);
    if !rule.prelude.is_empty() {
        out.push(' ');
        write_tokens(out, &rule.prelude);
    }
    match &rule.block {
        Some(block) => {
            out.push('{');
            write_tokens(out, block);
            out.push('}');
        }
        None => out.push(';'),
    }
}

fn write_media_queries(out: &mut String, queries: &[MediaQuery]) {
    for (i, query) in queries.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_media_query(out, query);
    }
}

fn write_media_query(out: &mut String, query: &MediaQuery) {
    match query.qualifier {
        MediaQualifier::None => {}
        MediaQualifier::Only => out.push_str("only "),
        MediaQualifier::Not => out.push_str("not "),
    }
    if let Some(media_type) = &query.media_type {
        write_ident(out, media_type);
        if query.condition.is_some() {
            out.push_str(" and ");
        }
    }
    if let Some(condition) = &query.condition {
        write_media_condition(out, condition);
    }
}

fn write_media_condition(out: &mut String, condition: &MediaCondition) {
    match condition {
        MediaCondition::Operation {
            operator,
            left,
            right,
        } => {
            let left_parens = match left.as_ref() {
                MediaCondition::Operation { operator: inner, .. } => inner != operator,
                MediaCondition::Negation(_) => true,
                MediaCondition::Feature { .. } => false,
            };
            write_parenthesized(out, left, left_parens);
            out.push_str(match operator {
                MediaOperator::And => " and ",
                MediaOperator::Or => " or ",
            });
            let right_parens = !matches!(right.as_ref(), MediaCondition::Feature { .. });
            write_parenthesized(out, right, right_parens);
        }
        MediaCondition::Negation(operand) => {
            out.push_str("not ");
            let parens = !matches!(operand.as_ref(), MediaCondition::Feature { .. });
            write_parenthesized(out, operand, parens);
        }
        MediaCondition::Feature { name, value } => write_media_feature(out, name, value.as_ref()),
    }
}

fn write_parenthesized(out: &mut String, condition: &MediaCondition, parens: bool) {
    if parens {
        out.push('(');
    }
    write_media_condition(out, condition);
    if parens {
        out.push(')');
    }
}

/// A lower bound alone is written name-first so an identifier bound is not
/// read back as the feature name.
fn write_media_feature(out: &mut String, name: &str, value: Option<&MediaValue>) {
    out.push('(');
    match value {
        None => write_ident(out, name),
        Some(MediaValue::Plain(value)) => {
            write_ident(out, name);
            out.push(':');
            write_tokens(out, std::slice::from_ref(value));
        }
        Some(MediaValue::Range {
            lower,
            lower_inclusive,
            upper,
            upper_inclusive,
        }) => match (lower, upper) {
            (Some(lower), None) => {
                write_ident(out, name);
                out.push_str(if *lower_inclusive { ">=" } else { ">" });
                write_tokens(out, std::slice::from_ref(lower));
            }
            (lower, upper) => {
                if let Some(lower) = lower {
                    write_tokens(out, std::slice::from_ref(lower));
                    out.push_str(if *lower_inclusive { "<=" } else { "<" });
                }
                write_ident(out, name);
                if let Some(upper) = upper {
                    out.push_str(if *upper_inclusive { "<=" } else { "<" });
                    write_tokens(out, std::slice::from_ref(upper));
                }
            }
        },
    }
    out.push(')');
}

fn write_selector(out: &mut String, selector: &Selector) {
    match selector {
        Selector::Id(name) => {
            out.push('#');
            write_name(out, name);
        }
        Selector::Class(name) => {
            out.push('.');
            write_ident(out, name);
        }
        Selector::Type { name, namespace } => {
            if let Some(namespace) = namespace {
                write_name_or_universal(out, namespace);
                out.push('|');
            }
            write_name_or_universal(out, name);
        }
        Selector::Attribute(attribute) => write_attribute_selector(out, attribute),
        Selector::Pseudo(pseudo) => write_pseudo_selector(out, pseudo),
        Selector::Compound { left, right } => {
            write_selector(out, left);
            write_selector(out, right);
        }
        Selector::Relative {
            combinator,
            left,
            right,
        } => {
            write_selector(out, left);
            out.push(combinator.as_char());
            write_selector(out, right);
        }
    }
}

fn write_name_or_universal(out: &mut String, name: &str) {
    if name == "*" {
        out.push('*');
    } else {
        write_ident(out, name);
    }
}

fn write_attribute_selector(out: &mut String, selector: &AttributeSelector) {
    out.push('[');
    if let Some(namespace) = &selector.namespace {
        write_name_or_universal(out, namespace);
        out.push('|');
    }
    write_ident(out, &selector.name);
    if let (Some(matcher), Some(value)) = (selector.matcher, &selector.value) {
        out.push_str(matcher.as_str());
        write_string(out, '"', value);
        if let Some(modifier) = &selector.modifier {
            out.push(' ');
            write_ident(out, modifier);
        }
    }
    out.push(']');
}

fn write_pseudo_selector(out: &mut String, pseudo: &PseudoSelector) {
    out.push_str(if pseudo.element { "::" } else { ":" });
    write_ident(out, &pseudo.name);
    if pseudo.functional {
        out.push('(');
        write_tokens(out, &pseudo.value);
        out.push(')');
    }
}

fn write_tokens(out: &mut String, tokens: &[CSSToken]) {
    let mut previous: Option<&TokenKind> = None;
    for token in tokens {
        if previous.is_some_and(|previous| needs_separator(previous, &token.kind)) {
            out.push_str("/**/");
        }
        write_token(out, &token.kind);
        previous = Some(&token.kind);
    }
}

fn write_token(out: &mut String, kind: &TokenKind) {
    match kind {
        TokenKind::Ident(name) => write_ident(out, name),
        TokenKind::Function(name) => {
            write_ident(out, name);
            out.push('(');
        }
        TokenKind::AtKeyword(name) => {
            out.push('@');
            write_ident(out, name);
        }
        TokenKind::Hash { value, .. } => {
            out.push('#');
            write_name(out, value);
        }
        TokenKind::String { mark, value } => write_string(out, *mark, value),
        TokenKind::Url(value) => {
            out.push_str("url(");
            write_url(out, value);
            out.push(')');
        }
        // A lone backslash only scans as a delimiter in front of a newline.
        TokenKind::Delim('\\') => out.push_str("\\\n"),
        TokenKind::Delim(c) => out.push(*c),
        TokenKind::Number(number) => write_number(out, *number),
        TokenKind::Percentage(number) => {
            write_number(out, *number);
            out.push('%');
        }
        TokenKind::Dimension { number, unit } => {
            write_number(out, *number);
            write_unit(out, unit);
        }
        TokenKind::Whitespace => out.push(' '),
        TokenKind::Colon => out.push(':'),
        TokenKind::Semicolon => out.push(';'),
        TokenKind::Comma => out.push(','),
        TokenKind::OpenSquare => out.push('['),
        TokenKind::CloseSquare => out.push(']'),
        TokenKind::OpenParen => out.push('('),
        TokenKind::CloseParen => out.push(')'),
        TokenKind::OpenCurly => out.push('{'),
        TokenKind::CloseCurly => out.push('}'),
    }
}

/// [§ 9 Serialization](https://www.w3.org/TR/css-syntax-3/#serialization)
///
/// "The tokenizer also needs to be able to handle the case where two tokens
/// are adjacent and would be tokenized differently if they were serialized
/// without anything between them."
fn needs_separator(previous: &TokenKind, next: &TokenKind) -> bool {
    use TokenKind as T;

    let word = matches!(next, T::Ident(_) | T::Function(_) | T::Url(_));
    let numeric = matches!(next, T::Number(_) | T::Percentage(_) | T::Dimension { .. });
    let dash = matches!(next, T::Delim('-'));

    match previous {
        T::Ident(_) => word || dash || numeric || matches!(next, T::OpenParen),
        T::AtKeyword(_) | T::Hash { .. } | T::Dimension { .. } | T::Delim('#' | '-') => {
            word || dash || numeric
        }
        T::Number(_) => word || numeric || matches!(next, T::Delim('%')),
        T::Delim('@') => word || dash,
        T::Delim('.' | '+') => numeric,
        T::Delim('/') => matches!(next, T::Delim('*')),
        _ => false,
    }
}

/// [§ 9 Serialization](https://www.w3.org/TR/css-syntax-3/#serialization)
///
/// Identifiers escape anything that is not a name code point, a leading
/// digit, and a digit after a leading `-`.
fn write_ident(out: &mut String, name: &str) {
    if name == "-" {
        out.push_str("\\-");
        return;
    }
    let dashed = name.starts_with('-');
    for (index, c) in name.chars().enumerate() {
        let leading_digit = is_digit(c) && (index == 0 || (index == 1 && dashed));
        if leading_digit {
            write_hex_escape(out, c);
        } else {
            write_name_char(out, c);
        }
    }
}

/// Name code points without the identifier start rules, as in a hash token.
fn write_name(out: &mut String, name: &str) {
    for c in name.chars() {
        write_name_char(out, c);
    }
}

fn write_name_char(out: &mut String, c: char) {
    if is_name(c) {
        out.push(c);
    } else if c.is_control() || c == '\0' {
        write_hex_escape(out, c);
    } else {
        out.push('\\');
        out.push(c);
    }
}

fn write_hex_escape(out: &mut String, c: char) {
    let _ = write!(out, "\\{:x} ", u32::from(c));
}

fn write_string(out: &mut String, mark: char, value: &str) {
    out.push(mark);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' | '\r' | '\x0C' => write_hex_escape(out, c),
            c if c == mark => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(mark);
}

fn write_url(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            ' ' | '\t' | '\n' | '\r' | '\x0C' => write_hex_escape(out, c),
            '"' | '\'' | '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => write_hex_escape(out, c),
            c => out.push(c),
        }
    }
}

/// A number-typed value keeps a fraction so it scans back as a number.
/// Values that have no CSS spelling are written as the nearest finite one.
fn write_number(out: &mut String, number: Number) {
    let value = if number.value.is_nan() {
        0.0
    } else {
        number.value.clamp(f64::MIN, f64::MAX)
    };
    let text = value.to_string();
    out.push_str(&text);
    if !number.integer && !text.contains(['.', 'e', 'E']) {
        out.push_str(".0");
    }
}

/// A unit that would read as an exponent has its `e` escaped.
fn write_unit(out: &mut String, unit: &str) {
    let mut chars = unit.chars();
    let first = chars.next();
    let second = chars.next();
    let third = chars.next();
    let exponent = matches!(first, Some('e' | 'E'))
        && match second {
            Some(c) if is_digit(c) => true,
            Some('+' | '-') => third.is_some_and(is_digit),
            _ => false,
        };
    if exponent {
        if let Some(first) = first {
            write_hex_escape(out, first);
        }
        write_name(out, &unit[1..]);
    } else if first.is_some_and(|c| is_name_start(c) || c == '-') {
        write_ident(out, unit);
    } else {
        write_hex_escape_first(out, unit);
    }
}

/// Units that start with something other than a name start code point.
fn write_hex_escape_first(out: &mut String, unit: &str) {
    let mut chars = unit.chars();
    if let Some(first) = chars.next() {
        write_hex_escape(out, first);
    }
    write_name(out, chars.as_str());
}
