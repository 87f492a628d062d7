use pak_common::{SharedUrl, SyntaxError, Url};

use crate::ast::{
    AtRule, AttributeMatcher, AttributeSelector, Combinator, Declaration, ImportRule,
    MediaCondition, MediaOperator, MediaQualifier, MediaQuery, MediaRule, MediaValue,
    PseudoSelector, Rule, Selector, StyleRule, StyleSheet,
};
use crate::tokenizer::{CSSToken, TokenKind};

/// [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing)
///
/// Recursive-descent parser over a scanned token sequence. The parser owns a
/// cursor into the tokens; every failure is fatal and reported at the offset
/// of the offending token.
pub struct CSSParser {
    /// The tokens being parsed
    tokens: Vec<CSSToken>,
    /// Index of the next token
    position: usize,
}

impl CSSParser {
    /// Create a new parser for the given tokens.
    #[must_use]
    pub const fn new(tokens: Vec<CSSToken>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// [§ 5.4.1 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
    ///
    /// Parse the whole token sequence. Tokens left over after the last rule
    /// are an error.
    pub fn parse_stylesheet(&mut self) -> Result<StyleSheet, SyntaxError> {
        let stylesheet = self.parse_rules(false)?;
        match self.peek() {
            Some(token) => Err(SyntaxError::new(token.offset, "unexpected token")),
            None => Ok(stylesheet),
        }
    }

    /// [§ 5.4.2 Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
    ///
    /// Stops in front of a `}`. Inside a block, running out of tokens is an
    /// error.
    fn parse_rules(&mut self, nested: bool) -> Result<StyleSheet, SyntaxError> {
        let mut rules = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek_kind() {
                None if nested => return Err(self.eof()),
                None | Some(TokenKind::CloseCurly) => break,
                Some(_) => rules.push(self.parse_rule()?),
            }
        }
        Ok(StyleSheet { rules })
    }

    fn parse_rule(&mut self) -> Result<Rule, SyntaxError> {
        match self.peek_kind() {
            Some(TokenKind::AtKeyword(name)) if name.eq_ignore_ascii_case("import") => {
                Ok(Rule::Import(self.parse_import_rule()?))
            }
            Some(TokenKind::AtKeyword(name)) if name.eq_ignore_ascii_case("media") => {
                Ok(Rule::Media(self.parse_media_rule()?))
            }
            Some(TokenKind::AtKeyword(_)) => Ok(Rule::At(self.parse_at_rule()?)),
            _ => Ok(Rule::Style(self.parse_style_rule()?)),
        }
    }

    /// [§ 2.3 Importing Style Sheets](https://www.w3.org/TR/css-cascade-4/#at-import)
    ///
    /// "`@import [ <url> | <string> ] <import-conditions> ;`"
    fn parse_import_rule(&mut self) -> Result<ImportRule, SyntaxError> {
        self.bump();
        self.skip_whitespace();

        let token = self.next_token()?;
        let (offset, value) = match token.kind {
            TokenKind::Url(value) | TokenKind::String { value, .. } => (token.offset, value),
            TokenKind::Function(name) if name.eq_ignore_ascii_case("url") => {
                self.skip_whitespace();
                let argument = self.next_token()?;
                let TokenKind::String { value, .. } = argument.kind else {
                    return Err(SyntaxError::new(
                        argument.offset,
                        "unexpected token, expected string",
                    ));
                };
                self.skip_whitespace();
                let close = self.next_token()?;
                if close.kind != TokenKind::CloseParen {
                    return Err(SyntaxError::new(close.offset, "unexpected token, expected )"));
                }
                (argument.offset, value)
            }
            _ => {
                return Err(SyntaxError::new(
                    token.offset,
                    "unexpected token, expected url or string",
                ));
            }
        };

        self.skip_whitespace();
        let conditions = if self.conditions_follow() {
            self.parse_media_query_list(|kind| *kind == TokenKind::Semicolon)?
        } else {
            Vec::new()
        };
        self.skip_whitespace();
        if self.peek_kind() == Some(&TokenKind::Semicolon) {
            self.bump();
        }

        let url = Url::parse(&value).map_err(|e| SyntaxError::new(offset, e.to_string()))?;
        Ok(ImportRule {
            url: SharedUrl::new(url),
            conditions,
        })
    }

    /// Whether the tokens after an import URL are its conditions. Without a
    /// semicolon they may instead open the next rule, as in `@import "a" p{}`.
    fn conditions_follow(&self) -> bool {
        self.tokens[self.position..]
            .iter()
            .find(|token| matches!(token.kind, TokenKind::Semicolon | TokenKind::OpenCurly))
            .is_none_or(|token| token.kind == TokenKind::Semicolon)
    }

    /// [§ 6 Conditional Rules](https://www.w3.org/TR/css-conditional-3/#at-media)
    fn parse_media_rule(&mut self) -> Result<MediaRule, SyntaxError> {
        self.bump();
        let conditions = self.parse_media_query_list(|kind| *kind == TokenKind::OpenCurly)?;
        self.expect(&TokenKind::OpenCurly, "unexpected token, expected {")?;
        let stylesheet = self.parse_rules(true)?;
        self.expect(&TokenKind::CloseCurly, "unexpected token, expected }")?;
        Ok(MediaRule {
            conditions,
            stylesheet,
        })
    }

    /// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
    ///
    /// The prelude runs to a `;` or to a `{` at nesting depth zero; a block
    /// is kept as raw tokens up to its matching `}`.
    fn parse_at_rule(&mut self) -> Result<AtRule, SyntaxError> {
        let keyword = self.next_token()?;
        let TokenKind::AtKeyword(name) = keyword.kind else {
            return Err(SyntaxError::new(keyword.offset, "unexpected token"));
        };

        let mut prelude = Vec::new();
        let mut depth = 0usize;
        let mut block = None;
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Semicolon if depth == 0 => {
                    self.bump();
                    break;
                }
                TokenKind::OpenCurly if depth == 0 => {
                    self.bump();
                    block = Some(self.collect_block()?);
                    break;
                }
                TokenKind::CloseCurly if depth == 0 => break,
                _ => {
                    depth = nesting(depth, &token.kind);
                    prelude.push(token.clone());
                    self.bump();
                }
            }
        }

        Ok(AtRule {
            name,
            prelude: trim(prelude),
            block,
        })
    }

    /// Collect tokens up to the `}` matching an already consumed `{`.
    fn collect_block(&mut self) -> Result<Vec<CSSToken>, SyntaxError> {
        let mut tokens = Vec::new();
        let mut depth = 0usize;
        loop {
            let token = self.next_token()?;
            if token.kind == TokenKind::CloseCurly && depth == 0 {
                return Ok(tokens);
            }
            depth = nesting(depth, &token.kind);
            tokens.push(token);
        }
    }

    /// [§ 2.1 Media Queries](https://www.w3.org/TR/mediaqueries-4/#mq-list)
    ///
    /// Comma and whitespace separated queries, up to a terminator or the end
    /// of input. The terminator is left in place.
    fn parse_media_query_list(
        &mut self,
        terminator: impl Fn(&TokenKind) -> bool,
    ) -> Result<Vec<MediaQuery>, SyntaxError> {
        let mut queries = Vec::new();
        loop {
            while matches!(
                self.peek_kind(),
                Some(TokenKind::Whitespace | TokenKind::Comma)
            ) {
                self.bump();
            }
            match self.peek_kind() {
                None => break,
                Some(kind) if terminator(kind) => break,
                Some(_) => queries.push(self.parse_media_query()?),
            }
        }
        Ok(queries)
    }

    /// [§ 3 Syntax](https://www.w3.org/TR/mediaqueries-4/#mq-syntax)
    ///
    /// "`<media-query> = <media-condition> | [ not | only ]? <media-type> [ and <media-condition-without-or> ]?`"
    fn parse_media_query(&mut self) -> Result<MediaQuery, SyntaxError> {
        let mut query = MediaQuery {
            media_type: None,
            qualifier: MediaQualifier::None,
            condition: None,
        };

        let Some(token) = self.peek().cloned() else {
            return Err(self.eof());
        };

        if token.is_ident("only") {
            self.bump();
            self.skip_whitespace();
            query.qualifier = MediaQualifier::Only;
            query.media_type = Some(self.parse_media_type()?);
        } else if token.is_ident("not") && self.peek_kind_after_whitespace(1).is_some_and(is_ident) {
            self.bump();
            self.skip_whitespace();
            query.qualifier = MediaQualifier::Not;
            query.media_type = Some(self.parse_media_type()?);
        } else if matches!(token.kind, TokenKind::Ident(_)) && !token.is_ident("not") {
            query.media_type = Some(self.parse_media_type()?);
        } else {
            query.condition = Some(self.parse_media_condition()?);
            return Ok(query);
        }

        let resume = self.position;
        self.skip_whitespace();
        if self.peek().is_some_and(|t| t.is_ident("and")) {
            self.bump();
            self.skip_whitespace();
            query.condition = Some(self.parse_media_condition()?);
        } else {
            self.position = resume;
        }
        Ok(query)
    }

    fn parse_media_type(&mut self) -> Result<String, SyntaxError> {
        let token = self.next_token()?;
        match token.kind {
            TokenKind::Ident(name)
                if !["and", "or", "only", "not"]
                    .iter()
                    .any(|reserved| name.eq_ignore_ascii_case(reserved)) =>
            {
                Ok(name)
            }
            _ => Err(SyntaxError::new(
                token.offset,
                "unexpected token, expected media type",
            )),
        }
    }

    /// [§ 3 Syntax](https://www.w3.org/TR/mediaqueries-4/#mq-syntax)
    ///
    /// "`<media-condition> = <media-not> | <media-in-parens> [ <media-and>* | <media-or>* ]`"
    ///
    /// Chains associate to the left.
    fn parse_media_condition(&mut self) -> Result<MediaCondition, SyntaxError> {
        self.skip_whitespace();
        if self.peek().is_some_and(|t| t.is_ident("not")) {
            self.bump();
            self.skip_whitespace();
            let operand = self.parse_media_in_parens()?;
            return Ok(MediaCondition::Negation(Box::new(operand)));
        }

        let mut left = self.parse_media_in_parens()?;
        loop {
            let resume = self.position;
            self.skip_whitespace();
            let operator = match self.peek() {
                Some(t) if t.is_ident("and") => MediaOperator::And,
                Some(t) if t.is_ident("or") => MediaOperator::Or,
                _ => {
                    self.position = resume;
                    return Ok(left);
                }
            };
            self.bump();
            self.skip_whitespace();
            let right = self.parse_media_in_parens()?;
            left = MediaCondition::Operation {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    /// "`<media-in-parens> = ( <media-condition> ) | <media-feature>`"
    fn parse_media_in_parens(&mut self) -> Result<MediaCondition, SyntaxError> {
        self.expect(&TokenKind::OpenParen, "unexpected token, expected (")?;
        self.skip_whitespace();

        let nested = match self.peek() {
            Some(token) => token.kind == TokenKind::OpenParen || token.is_ident("not"),
            None => return Err(self.eof()),
        };
        let condition = if nested {
            self.parse_media_condition()?
        } else {
            self.parse_media_feature()?
        };

        self.skip_whitespace();
        self.expect(&TokenKind::CloseParen, "unexpected token, expected )")?;
        Ok(condition)
    }

    /// [§ 2.4 Media Features](https://www.w3.org/TR/mediaqueries-4/#mq-features)
    ///
    /// "`<media-feature> = ( [ <mf-plain> | <mf-boolean> | <mf-range> ] )`"
    fn parse_media_feature(&mut self) -> Result<MediaCondition, SyntaxError> {
        let token = self.next_token()?;

        let TokenKind::Ident(name) = token.kind else {
            // "<mf-value> <mf-lt> <mf-name> [ <mf-lt> <mf-value> ]?"
            let first_value = check_media_value(token)?;
            self.skip_whitespace();
            let (first, first_inclusive) = self.parse_range_operator()?;
            self.skip_whitespace();
            let name = self.parse_feature_name()?;
            if first == RangeOp::Equal {
                return Ok(MediaCondition::Feature {
                    name,
                    value: Some(MediaValue::Plain(first_value)),
                });
            }
            let mut value = bound(None, flip(first), Some(first_value), first_inclusive);

            self.skip_whitespace();
            if self.peek_kind() != Some(&TokenKind::CloseParen) {
                let offset = self.current_offset();
                let (second, second_inclusive) = self.parse_range_operator()?;
                if second != first {
                    return Err(SyntaxError::new(
                        offset,
                        "unexpected token, expected matching range operator",
                    ));
                }
                self.skip_whitespace();
                let second_value = check_media_value(self.next_token()?)?;
                value = bound(Some(value), second, Some(second_value), second_inclusive);
            }
            return Ok(MediaCondition::Feature {
                name,
                value: Some(value),
            });
        };

        self.skip_whitespace();
        match self.peek_kind() {
            // "<mf-boolean> = <mf-name>"
            Some(TokenKind::CloseParen) => Ok(MediaCondition::Feature { name, value: None }),
            // "<mf-plain> = <mf-name> : <mf-value>"
            Some(TokenKind::Colon) => {
                self.bump();
                self.skip_whitespace();
                let value = check_media_value(self.next_token()?)?;
                Ok(MediaCondition::Feature {
                    name,
                    value: Some(MediaValue::Plain(value)),
                })
            }
            // "<mf-name> <mf-comparison> <mf-value>"
            Some(TokenKind::Delim('<' | '>' | '=')) => {
                let (operator, inclusive) = self.parse_range_operator()?;
                self.skip_whitespace();
                let value = check_media_value(self.next_token()?)?;
                let value = if operator == RangeOp::Equal {
                    MediaValue::Plain(value)
                } else {
                    bound(None, operator, Some(value), inclusive)
                };
                Ok(MediaCondition::Feature {
                    name,
                    value: Some(value),
                })
            }
            Some(_) => Err(SyntaxError::new(self.current_offset(), "unexpected token")),
            None => Err(self.eof()),
        }
    }

    fn parse_feature_name(&mut self) -> Result<String, SyntaxError> {
        let token = self.next_token()?;
        match token.kind {
            TokenKind::Ident(name) => Ok(name),
            _ => Err(SyntaxError::new(
                token.offset,
                "unexpected token, expected feature name",
            )),
        }
    }

    /// "`<mf-lt> = '<' '='?`, `<mf-gt> = '>' '='?`, `<mf-eq> = '='`"
    fn parse_range_operator(&mut self) -> Result<(RangeOp, bool), SyntaxError> {
        let token = self.next_token()?;
        let operator = match token.kind {
            TokenKind::Delim('<') => RangeOp::Less,
            TokenKind::Delim('>') => RangeOp::Greater,
            TokenKind::Delim('=') => return Ok((RangeOp::Equal, true)),
            _ => {
                return Err(SyntaxError::new(
                    token.offset,
                    "unexpected token, expected comparison",
                ));
            }
        };
        let inclusive = self.peek().is_some_and(|t| t.is_delim('='));
        if inclusive {
            self.bump();
        }
        Ok((operator, inclusive))
    }

    /// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
    fn parse_style_rule(&mut self) -> Result<StyleRule, SyntaxError> {
        let selectors = self.parse_selector_list()?;
        self.expect(&TokenKind::OpenCurly, "unexpected token, expected {")?;
        let declarations = self.parse_declaration_list()?;
        Ok(StyleRule {
            selectors,
            declarations,
        })
    }

    /// [§ 4.1 Selector Lists](https://www.w3.org/TR/selectors-4/#grouping)
    fn parse_selector_list(&mut self) -> Result<Vec<Selector>, SyntaxError> {
        let mut selectors = Vec::new();
        loop {
            while matches!(
                self.peek_kind(),
                Some(TokenKind::Whitespace | TokenKind::Comma)
            ) {
                self.bump();
            }
            match self.peek_kind() {
                None => return Err(self.eof()),
                Some(TokenKind::OpenCurly) => break,
                Some(_) => selectors.push(self.parse_selector()?),
            }
        }
        if selectors.is_empty() {
            return Err(SyntaxError::new(self.current_offset(), "expected selector"));
        }
        Ok(selectors)
    }

    /// [§ 3.1 Structure and Terminology](https://www.w3.org/TR/selectors-4/#structure)
    ///
    /// Builds a left accumulator of simple selectors; a combinator turns the
    /// accumulator into the left side of a relative selector whose right side
    /// is parsed recursively.
    fn parse_selector(&mut self) -> Result<Selector, SyntaxError> {
        let mut accumulator: Option<Selector> = None;

        loop {
            let Some(token) = self.peek().cloned() else {
                return Err(self.eof());
            };

            let piece = match &token.kind {
                TokenKind::Comma | TokenKind::OpenCurly => break,

                // "A class selector is a <delim-token> '.' followed by an <ident-token>"
                TokenKind::Delim('.') => {
                    self.bump();
                    Selector::Class(self.expect_ident()?)
                }

                // "An ID selector is a <hash-token> with 'id' type flag"
                TokenKind::Hash { value, .. } => {
                    self.bump();
                    Selector::Id(value.clone())
                }
                TokenKind::Delim('#') => {
                    self.bump();
                    Selector::Id(self.expect_ident()?)
                }

                TokenKind::Ident(_) | TokenKind::Delim('*' | '|') => self.parse_type_selector()?,

                TokenKind::OpenSquare => Selector::Attribute(self.parse_attribute_selector()?),

                TokenKind::Colon => Selector::Pseudo(self.parse_pseudo_selector()?),

                TokenKind::Delim(c @ ('>' | '~' | '+')) => {
                    let Some(left) = accumulator.take() else {
                        return Err(SyntaxError::new(token.offset, "expected selector"));
                    };
                    let combinator =
                        Combinator::from_char(*c).unwrap_or(Combinator::Descendant);
                    self.bump();
                    self.skip_whitespace();
                    let right = self.parse_selector()?;
                    return Ok(relative(combinator, left, right));
                }

                TokenKind::Whitespace => {
                    self.skip_whitespace();
                    if let Some(left) = accumulator.take() {
                        if self.peek().is_some_and(starts_selector) {
                            let right = self.parse_selector()?;
                            return Ok(relative(Combinator::Descendant, left, right));
                        }
                        accumulator = Some(left);
                    }
                    continue;
                }

                _ => return Err(SyntaxError::new(token.offset, "unexpected token")),
            };

            accumulator = Some(match accumulator {
                None => piece,
                Some(left) => Selector::Compound {
                    left: Box::new(left),
                    right: Box::new(piece),
                },
            });
        }

        accumulator.ok_or_else(|| SyntaxError::new(self.current_offset(), "expected selector"))
    }

    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    ///
    /// "`<type-selector> = <wq-name> | <ns-prefix>? '*'`"
    fn parse_type_selector(&mut self) -> Result<Selector, SyntaxError> {
        let (namespace, name) = self.parse_qualified_name(true)?;
        Ok(Selector::Type { name, namespace })
    }

    /// "`<ns-prefix> = [ <ident-token> | '*' ]? '|'`"
    ///
    /// Reads `name`, `ns|name`, `*|name` or `|name`. A `|` followed by `=` is
    /// an attribute matcher and does not start a namespace.
    fn parse_qualified_name(
        &mut self,
        allow_universal: bool,
    ) -> Result<(Option<String>, String), SyntaxError> {
        let token = self.next_token()?;
        let first = match token.kind {
            TokenKind::Ident(name) => Some(name),
            TokenKind::Delim('*') if allow_universal || self.namespace_follows() => {
                Some("*".to_string())
            }
            TokenKind::Delim('|') => {
                let name = self.parse_local_name(allow_universal)?;
                return Ok((Some(String::new()), name));
            }
            _ => None,
        };
        let Some(first) = first else {
            return Err(SyntaxError::new(
                token.offset,
                "unexpected token, expected name",
            ));
        };

        if self.namespace_follows() {
            self.bump();
            let name = self.parse_local_name(allow_universal)?;
            return Ok((Some(first), name));
        }
        Ok((None, first))
    }

    fn namespace_follows(&self) -> bool {
        self.peek().is_some_and(|t| t.is_delim('|'))
            && self
                .peek_at(1)
                .is_some_and(|t| matches!(t.kind, TokenKind::Ident(_)) || t.is_delim('*'))
    }

    fn parse_local_name(&mut self, allow_universal: bool) -> Result<String, SyntaxError> {
        let token = self.next_token()?;
        match token.kind {
            TokenKind::Ident(name) => Ok(name),
            TokenKind::Delim('*') if allow_universal => Ok("*".to_string()),
            _ => Err(SyntaxError::new(
                token.offset,
                "unexpected token, expected name",
            )),
        }
    }

    /// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    ///
    /// "`'[' <wq-name> ']' | '[' <wq-name> <attr-matcher> [ <string-token> | <ident-token> ] <attr-modifier>? ']'`"
    fn parse_attribute_selector(&mut self) -> Result<AttributeSelector, SyntaxError> {
        self.bump();
        self.skip_whitespace();
        let (namespace, name) = self.parse_qualified_name(false)?;
        self.skip_whitespace();

        let mut selector = AttributeSelector {
            name,
            namespace,
            matcher: None,
            value: None,
            modifier: None,
        };

        let token = self.next_token()?;
        let matcher = match token.kind {
            TokenKind::CloseSquare => return Ok(selector),
            TokenKind::Delim('=') => AttributeMatcher::Equal,
            TokenKind::Delim(c @ ('~' | '|' | '^' | '$' | '*'))
                if self.peek().is_some_and(|t| t.is_delim('=')) =>
            {
                self.bump();
                match c {
                    '~' => AttributeMatcher::Includes,
                    '|' => AttributeMatcher::DashMatch,
                    '^' => AttributeMatcher::Prefix,
                    '$' => AttributeMatcher::Suffix,
                    _ => AttributeMatcher::Substring,
                }
            }
            _ => {
                return Err(SyntaxError::new(
                    token.offset,
                    "unexpected token, expected attribute matcher",
                ));
            }
        };
        selector.matcher = Some(matcher);

        self.skip_whitespace();
        let token = self.next_token()?;
        selector.value = match token.kind {
            TokenKind::String { value, .. } | TokenKind::Ident(value) => Some(value),
            _ => {
                return Err(SyntaxError::new(
                    token.offset,
                    "unexpected token, expected attribute value",
                ));
            }
        };

        self.skip_whitespace();
        if let Some(TokenKind::Ident(modifier)) = self.peek_kind() {
            selector.modifier = Some(modifier.clone());
            self.bump();
            self.skip_whitespace();
        }

        self.expect(&TokenKind::CloseSquare, "unexpected token, expected ]")?;
        Ok(selector)
    }

    /// [§ 3.5 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    fn parse_pseudo_selector(&mut self) -> Result<PseudoSelector, SyntaxError> {
        self.bump();
        let element = self.peek_kind() == Some(&TokenKind::Colon);
        if element {
            self.bump();
        }

        let token = self.next_token()?;
        match token.kind {
            TokenKind::Ident(name) => Ok(PseudoSelector {
                name,
                element,
                functional: false,
                value: Vec::new(),
            }),
            TokenKind::Function(name) => {
                let mut value = Vec::new();
                let mut depth = 0usize;
                loop {
                    let token = self.next_token()?;
                    if token.kind == TokenKind::CloseParen && depth == 0 {
                        break;
                    }
                    depth = nesting(depth, &token.kind);
                    value.push(token);
                }
                Ok(PseudoSelector {
                    name,
                    element,
                    functional: true,
                    value,
                })
            }
            _ => Err(SyntaxError::new(
                token.offset,
                "unexpected token, expected pseudo-class name",
            )),
        }
    }

    /// [§ 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations)
    ///
    /// Consumes through the closing `}`.
    fn parse_declaration_list(&mut self) -> Result<Vec<Declaration>, SyntaxError> {
        let mut declarations = Vec::new();
        loop {
            let Some(token) = self.peek() else {
                return Err(self.eof());
            };
            match token.kind {
                TokenKind::Whitespace | TokenKind::Semicolon => self.bump(),
                TokenKind::CloseCurly => {
                    self.bump();
                    return Ok(declarations);
                }
                TokenKind::Ident(_) => declarations.push(self.parse_declaration()?),
                _ => return Err(SyntaxError::new(token.offset, "unexpected token")),
            }
        }
    }

    /// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
    fn parse_declaration(&mut self) -> Result<Declaration, SyntaxError> {
        let name = self.expect_ident()?;
        self.skip_whitespace();

        // "If the next input token is anything other than a <colon-token>, this
        // is a parse error."
        match self.peek() {
            Some(token) if token.kind == TokenKind::Colon => self.bump(),
            Some(token) => return Err(SyntaxError::new(token.offset, "expected colon")),
            None => return Err(self.eof()),
        }

        // "As long as the next input token is anything other than an
        // <EOF-token>, consume a component value and append it to the
        // declaration's value."
        let mut value = Vec::new();
        let mut depth = 0usize;
        loop {
            let Some(token) = self.peek() else {
                return Err(self.eof());
            };
            match token.kind {
                TokenKind::Semicolon if depth == 0 => {
                    self.bump();
                    break;
                }
                TokenKind::CloseCurly if depth == 0 => break,
                _ => {
                    depth = nesting(depth, &token.kind);
                    value.push(token.clone());
                    self.bump();
                }
            }
        }

        let value = trim(value);
        let important = check_important(&value);
        let value = if important {
            trim_important(value)
        } else {
            value
        };

        Ok(Declaration {
            name,
            value,
            important,
        })
    }

    fn expect_ident(&mut self) -> Result<String, SyntaxError> {
        let token = self.next_token()?;
        match token.kind {
            TokenKind::Ident(name) => Ok(name),
            _ => Err(SyntaxError::new(
                token.offset,
                "unexpected token, expected identifier",
            )),
        }
    }

    fn expect(&mut self, kind: &TokenKind, message: &str) -> Result<(), SyntaxError> {
        let token = self.next_token()?;
        if token.kind == *kind {
            Ok(())
        } else {
            Err(SyntaxError::new(token.offset, message))
        }
    }

    /// Consume the next token, failing at the end of input.
    fn next_token(&mut self) -> Result<CSSToken, SyntaxError> {
        match self.tokens.get(self.position).cloned() {
            Some(token) => {
                self.position += 1;
                Ok(token)
            }
            None => Err(self.eof()),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(CSSToken::is_whitespace) {
            self.bump();
        }
    }

    /// The kind of the `n`th token after the current one, skipping whitespace.
    fn peek_kind_after_whitespace(&self, n: usize) -> Option<&TokenKind> {
        self.tokens[self.position.min(self.tokens.len())..]
            .iter()
            .skip(n)
            .find(|t| !t.is_whitespace())
            .map(|t| &t.kind)
    }

    fn bump(&mut self) {
        self.position = (self.position + 1).min(self.tokens.len());
    }

    fn peek(&self) -> Option<&CSSToken> {
        self.tokens.get(self.position)
    }

    fn peek_at(&self, n: usize) -> Option<&CSSToken> {
        self.tokens.get(self.position + n)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn current_offset(&self) -> usize {
        self.peek().map_or_else(|| self.end_offset(), |t| t.offset)
    }

    fn end_offset(&self) -> usize {
        self.tokens.last().map_or(0, |t| t.offset)
    }

    fn eof(&self) -> SyntaxError {
        SyntaxError::unexpected_eof(self.end_offset())
    }
}

/// Direction of a range comparison as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeOp {
    Less,
    Greater,
    Equal,
}

/// The operator as seen from the other side of the feature name.
const fn flip(operator: RangeOp) -> RangeOp {
    match operator {
        RangeOp::Less => RangeOp::Greater,
        RangeOp::Greater => RangeOp::Less,
        RangeOp::Equal => RangeOp::Equal,
    }
}

/// Add a bound to a range. `operator` relates the feature to `value`:
/// `Greater` means `feature > value` (a lower bound), `Less` an upper bound.
fn bound(
    range: Option<MediaValue>,
    operator: RangeOp,
    value: Option<CSSToken>,
    inclusive: bool,
) -> MediaValue {
    let (mut lower, mut lower_inclusive, mut upper, mut upper_inclusive) = match range {
        Some(MediaValue::Range {
            lower,
            lower_inclusive,
            upper,
            upper_inclusive,
        }) => (lower, lower_inclusive, upper, upper_inclusive),
        _ => (None, false, None, false),
    };
    if operator == RangeOp::Greater {
        lower = value;
        lower_inclusive = inclusive;
    } else {
        upper = value;
        upper_inclusive = inclusive;
    }
    MediaValue::Range {
        lower,
        lower_inclusive,
        upper,
        upper_inclusive,
    }
}

/// "`<mf-value> = <number> | <dimension> | <ident>`"
fn check_media_value(token: CSSToken) -> Result<CSSToken, SyntaxError> {
    match token.kind {
        TokenKind::Number(_) | TokenKind::Dimension { .. } | TokenKind::Ident(_) => Ok(token),
        _ => Err(SyntaxError::new(
            token.offset,
            "unexpected token, expected media feature value",
        )),
    }
}

fn relative(combinator: Combinator, left: Selector, right: Selector) -> Selector {
    Selector::Relative {
        combinator,
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// Whether a token can begin a simple selector.
fn starts_selector(token: &CSSToken) -> bool {
    match &token.kind {
        TokenKind::Ident(_)
        | TokenKind::Colon
        | TokenKind::Hash { .. }
        | TokenKind::OpenSquare => true,
        TokenKind::Delim(c) => matches!(c, '.' | '#' | '*' | '|'),
        _ => false,
    }
}

const fn is_ident(kind: &TokenKind) -> bool {
    matches!(kind, TokenKind::Ident(_))
}

/// Track `(`, `[` and `{` nesting across a token.
const fn nesting(depth: usize, kind: &TokenKind) -> usize {
    match kind {
        TokenKind::OpenParen
        | TokenKind::Function(_)
        | TokenKind::OpenSquare
        | TokenKind::OpenCurly => depth + 1,
        TokenKind::CloseParen | TokenKind::CloseSquare | TokenKind::CloseCurly => {
            depth.saturating_sub(1)
        }
        _ => depth,
    }
}

/// Remove leading and trailing whitespace tokens.
fn trim(mut tokens: Vec<CSSToken>) -> Vec<CSSToken> {
    while tokens.last().is_some_and(CSSToken::is_whitespace) {
        let _ = tokens.pop();
    }
    let leading = tokens.iter().take_while(|t| t.is_whitespace()).count();
    let _ = tokens.drain(..leading);
    tokens
}

/// [§ 6.4.2 Important declarations](https://www.w3.org/TR/css-cascade-4/#importance)
///
/// "A declaration is important if it has a !important annotation, i.e. if
/// the last two (non-whitespace, non-comment) tokens in its value are a
/// <delim-token> with the value "!" followed by an <ident-token> with a value
/// that is an ASCII case-insensitive match for "important"."
fn check_important(value: &[CSSToken]) -> bool {
    let mut significant = value.iter().rev().filter(|t| !t.is_whitespace());
    matches!(
        (significant.next(), significant.next()),
        (Some(last), Some(bang)) if last.is_ident("important") && bang.is_delim('!')
    )
}

/// Drop the trailing `!important` and any whitespace around it.
fn trim_important(mut value: Vec<CSSToken>) -> Vec<CSSToken> {
    if let Some(bang) = value.iter().rposition(|t| t.is_delim('!')) {
        value.truncate(bang);
    }
    trim(value)
}
