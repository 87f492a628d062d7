//! Stylesheet syntax tree.
//!
//! The tree keeps declaration values, pseudo-class arguments and unknown
//! at-rules as raw token sequences; only the parts the bundler reasons about
//! (imports, media queries, selectors) are structured.

use pak_common::url::{Url, rebase};
use pak_common::SharedUrl;

use crate::tokenizer::{CSSToken, TokenKind};

/// [§ 5.4.1 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    /// Rules in source order.
    pub rules: Vec<Rule>,
}

/// A top-level or nested rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// A qualified rule: selectors and a declaration block.
    Style(StyleRule),
    /// `@import`
    Import(ImportRule),
    /// `@media`
    Media(MediaRule),
    /// Any other at-rule, kept verbatim.
    At(AtRule),
}

/// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleRule {
    /// The selector list, in source order.
    pub selectors: Vec<Selector>,
    /// The declaration block, in source order.
    pub declarations: Vec<Declaration>,
}

/// [§ 2.3 Importing Style Sheets](https://www.w3.org/TR/css-cascade-4/#at-import)
///
/// The URL lives in a shared cell so the relation created for this import
/// can rewrite it after the rule has moved.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRule {
    /// The imported stylesheet.
    pub url: SharedUrl,
    /// Optional media query list restricting the import.
    pub conditions: Vec<MediaQuery>,
}

/// [§ 6 Conditional Rules](https://www.w3.org/TR/css-conditional-3/#at-media)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaRule {
    /// The media query list.
    pub conditions: Vec<MediaQuery>,
    /// The nested rules.
    pub stylesheet: StyleSheet,
}

/// An at-rule without a dedicated representation, such as `@font-face`.
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    /// The name without the `@`.
    pub name: String,
    /// Tokens between the name and the block or semicolon, trimmed.
    pub prelude: Vec<CSSToken>,
    /// Tokens inside the block, without the braces.
    pub block: Option<Vec<CSSToken>>,
}

/// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The property name.
    pub name: String,
    /// The value tokens, trimmed of whitespace and of `!important`.
    pub value: Vec<CSSToken>,
    /// Whether the declaration carried `!important`.
    pub important: bool,
}

/// [Selectors Level 4](https://www.w3.org/TR/selectors-4/)
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// `#name`
    Id(String),
    /// `.name`
    Class(String),
    /// A type or universal selector: `name`, `*`, `ns|name`.
    Type {
        /// The element name, or `*`.
        name: String,
        /// The namespace prefix; `Some("")` for `|name`.
        namespace: Option<String>,
    },
    /// `[name]`, `[name=value]`
    Attribute(AttributeSelector),
    /// `:name`, `::name`, `:name(...)`
    Pseudo(PseudoSelector),
    /// Two simple selectors that must both match.
    Compound {
        /// The accumulated selector.
        left: Box<Selector>,
        /// The new simple selector.
        right: Box<Selector>,
    },
    /// Two selectors joined by a combinator.
    Relative {
        /// How `right` relates to `left`.
        combinator: Combinator,
        /// The selector to the left of the combinator.
        left: Box<Selector>,
        /// The selector to the right of the combinator.
        right: Box<Selector>,
    },
}

/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    /// The attribute name.
    pub name: String,
    /// The namespace prefix.
    pub namespace: Option<String>,
    /// The matcher, absent for a presence test.
    pub matcher: Option<AttributeMatcher>,
    /// The value to match against.
    pub value: Option<String>,
    /// Case-sensitivity modifier, `i` or `s`.
    pub modifier: Option<String>,
}

/// A pseudo-class or pseudo-element.
#[derive(Debug, Clone, PartialEq)]
pub struct PseudoSelector {
    /// The name without colons.
    pub name: String,
    /// True for `::name`.
    pub element: bool,
    /// True for `:name(...)`.
    pub functional: bool,
    /// Argument tokens of a functional pseudo.
    pub value: Vec<CSSToken>,
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    DirectDescendant,
    /// `a ~ b`
    Sibling,
    /// `a + b`
    DirectSibling,
}

impl Combinator {
    /// The character that spells the combinator.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Descendant => ' ',
            Self::DirectDescendant => '>',
            Self::Sibling => '~',
            Self::DirectSibling => '+',
        }
    }

    /// The combinator spelled by `c`, if any.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Self::Descendant),
            '>' => Some(Self::DirectDescendant),
            '~' => Some(Self::Sibling),
            '+' => Some(Self::DirectSibling),
            _ => None,
        }
    }
}

/// [§ 6.1 Attribute presence and value selectors](https://www.w3.org/TR/selectors-4/#attribute-representation)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeMatcher {
    /// `=`
    Equal,
    /// `~=`
    Includes,
    /// `|=`
    DashMatch,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
}

impl AttributeMatcher {
    /// The operator text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::Includes => "~=",
            Self::DashMatch => "|=",
            Self::Prefix => "^=",
            Self::Suffix => "$=",
            Self::Substring => "*=",
        }
    }
}

/// [§ 3 Media Queries](https://www.w3.org/TR/mediaqueries-4/#media)
#[derive(Debug, Clone, PartialEq)]
pub struct MediaQuery {
    /// The media type, e.g. `screen`.
    pub media_type: Option<String>,
    /// `only` or `not` before the media type.
    pub qualifier: MediaQualifier,
    /// The media condition.
    pub condition: Option<MediaCondition>,
}

/// Prefix of a media query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MediaQualifier {
    /// No qualifier.
    #[default]
    None,
    /// `only`
    Only,
    /// `not`
    Not,
}

/// [§ 3.2 Media Conditions](https://www.w3.org/TR/mediaqueries-4/#media-conditions)
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCondition {
    /// `left and right`, `left or right`
    Operation {
        /// Which boolean operator.
        operator: MediaOperator,
        /// Left operand.
        left: Box<MediaCondition>,
        /// Right operand.
        right: Box<MediaCondition>,
    },
    /// `(name)`, `(name: value)` or a range.
    Feature {
        /// The feature name.
        name: String,
        /// The value; absent in boolean context.
        value: Option<MediaValue>,
    },
    /// `not condition`
    Negation(Box<MediaCondition>),
}

/// Boolean operator in a media condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaOperator {
    /// `and`
    And,
    /// `or`
    Or,
}

/// The value side of a media feature.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaValue {
    /// `(name: value)`
    Plain(CSSToken),
    /// [§ 2.4.4 Range context](https://www.w3.org/TR/mediaqueries-4/#mq-range-context)
    Range {
        /// Lower bound.
        lower: Option<CSSToken>,
        /// Whether the lower bound is included (`<=`).
        lower_inclusive: bool,
        /// Upper bound.
        upper: Option<CSSToken>,
        /// Whether the upper bound is included (`<=`).
        upper_inclusive: bool,
    },
}

impl StyleSheet {
    /// Every `@import` rule, including those nested in `@media` blocks.
    #[must_use]
    pub fn imports(&self) -> Vec<&ImportRule> {
        let mut out = Vec::new();
        for rule in &self.rules {
            match rule {
                Rule::Import(import) => out.push(import),
                Rule::Media(media) => out.extend(media.stylesheet.imports()),
                Rule::Style(_) | Rule::At(_) => {}
            }
        }
        out
    }

    /// Replace the `@import` rule whose URL cell is `slot` with `replacement`,
    /// searching nested `@media` blocks as well. Returns false when no rule
    /// owns `slot`.
    pub fn replace_import(&mut self, slot: &SharedUrl, replacement: Vec<Rule>) -> bool {
        let mut replacement = Some(replacement);
        self.replace_import_inner(slot, &mut replacement)
    }

    fn replace_import_inner(
        &mut self,
        slot: &SharedUrl,
        replacement: &mut Option<Vec<Rule>>,
    ) -> bool {
        for index in 0..self.rules.len() {
            let owns_slot =
                matches!(&self.rules[index], Rule::Import(import) if import.url.same_cell(slot));
            if owns_slot {
                let rules = replacement.take().unwrap_or_default();
                let _ = self.rules.splice(index..=index, rules);
                return true;
            }
            if let Rule::Media(media) = &mut self.rules[index] {
                if media.stylesheet.replace_import_inner(slot, replacement) {
                    return true;
                }
            }
        }
        false
    }

    /// Rebase every `url(...)` in declaration values and at-rule blocks from
    /// a stylesheet located at `from` to one located at `to`.
    ///
    /// Fragment-only references (`url(#gradient)`) and values that do not
    /// parse as URLs are left alone. `@import` URLs are not touched; they
    /// are rewritten through their relations.
    pub fn rebase_urls(&mut self, from: &Url, to: &Url) {
        for rule in &mut self.rules {
            match rule {
                Rule::Style(style) => {
                    for declaration in &mut style.declarations {
                        rebase_tokens(&mut declaration.value, from, to);
                    }
                }
                Rule::Media(media) => media.stylesheet.rebase_urls(from, to),
                Rule::At(at) => {
                    if let Some(block) = &mut at.block {
                        rebase_tokens(block, from, to);
                    }
                }
                Rule::Import(_) => {}
            }
        }
    }
}

/// Rebase `url(x)` and `url("x")` references inside a token sequence.
fn rebase_tokens(tokens: &mut [CSSToken], from: &Url, to: &Url) {
    let mut in_url_function = false;
    for token in tokens.iter_mut() {
        match &mut token.kind {
            TokenKind::Url(value) => rebase_value(value, from, to),
            TokenKind::Function(name) => in_url_function = name.eq_ignore_ascii_case("url"),
            TokenKind::String { value, .. } if in_url_function => {
                rebase_value(value, from, to);
                in_url_function = false;
            }
            TokenKind::Whitespace => {}
            _ => in_url_function = false,
        }
    }
}

fn rebase_value(value: &mut String, from: &Url, to: &Url) {
    if value.is_empty() || value.starts_with('#') {
        return;
    }
    if let Ok(target) = Url::parse(value) {
        *value = rebase(&target, from, to).to_string();
    }
}
