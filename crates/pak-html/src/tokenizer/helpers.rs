//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling ("Consume the next input character")
//! - Token emission ("Emit the current tag token")
//! - Raw text end tag detection
//! - Attribute helpers for duplicate detection

use pak_common::SyntaxError;
use pak_dom::Attribute;

use super::core::{HTMLTokenizer, PendingTag, RAW_TEXT_ELEMENTS, TokenizerState};
use super::token::{Token, TokenKind, is_whitespace_char};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Switch to the X state"
    ///
    /// Transitions to a new state. The next character will be consumed on the
    /// next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Reconsume in the X state"
    ///
    /// Transitions to a new state without consuming the current character.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Consume the next input character"
    ///
    /// Returns None at the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Peek at the codepoint `offset` characters past the current position
    /// without consuming it.
    #[must_use]
    pub fn peek_codepoint(&self, offset: usize) -> Option<char> {
        self.input[self.current_pos..].chars().nth(offset)
    }

    /// "If the next few characters are..."
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// "ASCII case-insensitive match for the word 'DOCTYPE'"
    #[must_use]
    pub fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        self.input
            .get(self.current_pos..self.current_pos + target.len())
            .is_some_and(|next| next.eq_ignore_ascii_case(target))
    }

    /// Consume `target`, which the caller has already matched.
    /// Only used with ASCII targets.
    pub(super) const fn consume_string(&mut self, target: &str) {
        self.current_pos += target.len();
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Create a new start tag token" / "Create a new end tag token"
    pub(super) const fn new_tag(&self, end: bool) -> PendingTag {
        PendingTag {
            offset: self.markup_offset,
            end,
            name: String::new(),
            attributes: Vec::new(),
            self_closing: false,
            attribute_offset: 0,
        }
    }

    /// "Switch to the data state. Emit the current tag token."
    ///
    /// Emitting the start tag of a raw text element switches to the raw text
    /// state instead; the tree builder runs after the tokenizer, so the
    /// tokenizer makes the switch the tree builder would have requested.
    pub(super) fn emit_current_tag(&mut self) {
        let Some(tag) = self.current_tag.take() else {
            self.switch_to(TokenizerState::Data);
            return;
        };

        if tag.end {
            self.token_stream
                .push(Token::new(tag.offset, TokenKind::EndTag { name: tag.name }));
            self.switch_to(TokenizerState::Data);
            return;
        }

        // [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#generic-raw-text-element-parsing-algorithm)
        // "switch the tokenizer to the RAWTEXT state"
        let raw_text = RAW_TEXT_ELEMENTS.contains(&tag.name.as_str());
        self.last_start_tag_name = Some(tag.name.clone());
        self.token_stream.push(Token::new(
            tag.offset,
            TokenKind::StartTag {
                name: tag.name,
                attributes: tag.attributes,
                self_closing: tag.self_closing,
            },
        ));
        self.switch_to(if raw_text {
            TokenizerState::RawText
        } else {
            TokenizerState::Data
        });
    }

    /// "Emit the current input character as a character token."
    pub(super) fn emit_character_token(&mut self, c: char, offset: usize) {
        self.token_stream
            .push(Token::new(offset, TokenKind::Character(c)));
    }
}

// =============================================================================
// Raw Text Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any."
    ///
    /// Called with `<` as the current input character. True when the input
    /// continues with `/`, the last start tag name in any case, and then
    /// whitespace, `/` or `>`.
    pub(super) fn appropriate_end_tag_follows(&self) -> bool {
        let Some(name) = self.last_start_tag_name.as_deref() else {
            return false;
        };
        let rest = &self.input[self.current_pos..];
        let Some(after_solidus) = rest.strip_prefix('/') else {
            return false;
        };
        let Some(candidate) = after_solidus.get(..name.len()) else {
            return false;
        };
        if !candidate.eq_ignore_ascii_case(name) {
            return false;
        }
        after_solidus[name.len()..]
            .chars()
            .next()
            .is_some_and(|c| is_whitespace_char(c) || c == '/' || c == '>')
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Start a new attribute in the current tag token. Set that attribute
    /// name and value to the empty string."
    pub(super) fn start_new_attribute(&mut self) {
        let offset = self.current_offset;
        if let Some(tag) = self.current_tag.as_mut() {
            tag.attributes.push(Attribute::new("", ""));
            tag.attribute_offset = offset;
        }
    }

    pub(super) fn current_attribute_name(&self) -> &str {
        self.current_tag
            .as_ref()
            .and_then(|tag| tag.attributes.last())
            .map_or("", |attribute| attribute.name.as_str())
    }

    pub(super) fn append_to_attribute_name(&mut self, c: char) {
        if let Some(attribute) = self
            .current_tag
            .as_mut()
            .and_then(|tag| tag.attributes.last_mut())
        {
            attribute.name.push(c);
        }
    }

    pub(super) fn append_to_attribute_value(&mut self, c: char) {
        if let Some(attribute) = self
            .current_tag
            .as_mut()
            .and_then(|tag| tag.attributes.last_mut())
        {
            attribute.value.push(c);
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "When the user agent leaves the attribute name state... if there is
    /// already an attribute on the token with the exact same name, then this
    /// is a duplicate-attribute parse error"
    ///
    /// Dropping the second attribute would change what the document says, so
    /// the duplicate is reported instead.
    pub(super) fn check_duplicate_attribute(&self) -> Result<(), SyntaxError> {
        let Some(tag) = self.current_tag.as_ref() else {
            return Ok(());
        };
        let Some((current, previous)) = tag.attributes.split_last() else {
            return Ok(());
        };
        if previous.iter().any(|attribute| attribute.name == current.name) {
            return Err(SyntaxError::new(
                tag.attribute_offset,
                "unexpected duplicate attribute",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    ///
    /// "U+0000 NULL: This is an unexpected-null-character parse error."
    pub(super) fn null_character_error(&self) -> SyntaxError {
        SyntaxError::new(
            self.current_offset,
            format!("unexpected null character in {} state", self.state),
        )
    }

    /// "EOF: This is an eof-in-tag parse error."
    pub(super) fn eof_error(&self) -> SyntaxError {
        SyntaxError::unexpected_eof(self.current_offset)
    }

    pub(super) fn doctype_error(&self) -> SyntaxError {
        SyntaxError::new(self.current_offset, "expected <!doctype html>")
    }
}
