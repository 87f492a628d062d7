use pak_common::SyntaxError;
use pak_dom::Attribute;
use strum_macros::Display;

use super::token::{Token, TokenKind, is_whitespace_char};

/// Elements whose content is scanned as raw text up to the matching end tag.
///
/// `script` and `style` follow the RAWTEXT rules; `title` is RCDATA, which is
/// the same here because character references are left undecoded.
pub const RAW_TEXT_ELEMENTS: [&str; 3] = ["script", "style", "title"];

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer state machine. Each state corresponds to a section in § 13.2.5,
/// except that the DOCTYPE states only accept `<!doctype html>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    #[strum(serialize = "data")]
    Data,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    #[strum(serialize = "raw text")]
    RawText,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    #[strum(serialize = "tag open")]
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    #[strum(serialize = "end tag open")]
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    #[strum(serialize = "tag name")]
    TagName,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    #[strum(serialize = "before attribute name")]
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    #[strum(serialize = "attribute name")]
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    #[strum(serialize = "after attribute name")]
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    #[strum(serialize = "before attribute value")]
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    #[strum(serialize = "attribute value (double-quoted)")]
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    #[strum(serialize = "attribute value (single-quoted)")]
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    #[strum(serialize = "attribute value (unquoted)")]
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    #[strum(serialize = "after attribute value (quoted)")]
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    #[strum(serialize = "self-closing start tag")]
    SelfClosingStartTag,
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    #[strum(serialize = "markup declaration open")]
    MarkupDeclarationOpen,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    #[strum(serialize = "comment")]
    Comment,
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    #[strum(serialize = "doctype")]
    Doctype,
    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    #[strum(serialize = "before doctype name")]
    BeforeDoctypeName,
    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    #[strum(serialize = "after doctype name")]
    AfterDoctypeName,
}

/// A start or end tag under construction.
#[derive(Debug)]
pub(super) struct PendingTag {
    pub(super) offset: usize,
    pub(super) end: bool,
    pub(super) name: String,
    pub(super) attributes: Vec<Attribute>,
    pub(super) self_closing: bool,
    /// Offset of the attribute currently being named.
    pub(super) attribute_offset: usize,
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "Implementations must act as if they used the following state machine to tokenize HTML."
///
/// Parse errors the HTML standard recovers from silently are accepted; the
/// ones that would change the meaning of an attribute or lose input stop the
/// tokenizer with a [`SyntaxError`].
pub struct HTMLTokenizer {
    pub(super) state: TokenizerState,
    pub(super) input: String,
    /// Byte offset of the next input character
    pub(super) current_pos: usize,
    /// Byte offset of the current input character
    pub(super) current_offset: usize,
    pub(super) current_input_character: Option<char>,
    pub(super) current_tag: Option<PendingTag>,
    /// Offset of the `<` that opened the markup being scanned
    pub(super) markup_offset: usize,
    pub(super) at_eof: bool,
    pub(super) token_stream: Vec<Token>,
    // When true, the next iteration of the main loop will not consume a new character.
    // "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    /// "The last start tag token emitted is used as part of the tree construction stage
    /// and in the RCDATA, RAWTEXT, and script data states."
    pub(super) last_start_tag_name: Option<String>,
}

impl HTMLTokenizer {
    /// Create a new tokenizer for the given input.
    ///
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
    /// "The tokenizer state machine consists of the states defined in the
    /// following subsections. The initial state is the data state."
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            state: TokenizerState::Data,
            input: input.into(),
            current_pos: 0,
            current_offset: 0,
            current_input_character: None,
            current_tag: None,
            markup_offset: 0,
            at_eof: false,
            token_stream: Vec::new(),
            reconsume: false,
            last_start_tag_name: None,
        }
    }

    /// Consume the tokenizer and return the token stream.
    /// Call this after run() to get the tokens for the parser.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// Return a reference to the tokens emitted so far.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.token_stream
    }

    /// Run the state machine over the whole input.
    pub fn run(&mut self) -> Result<(), SyntaxError> {
        loop {
            // Each state begins by consuming the next input character,
            // unless we're reconsuming from a previous state transition.
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.current_offset = self.current_pos;
                self.current_input_character = self.consume();
            }

            if self.at_eof {
                return Ok(());
            }

            match self.state {
                TokenizerState::Data => self.handle_data_state()?,
                TokenizerState::RawText => self.handle_raw_text_state()?,
                TokenizerState::TagOpen => self.handle_tag_open_state(),
                TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
                TokenizerState::TagName => self.handle_tag_name_state()?,
                TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
                TokenizerState::AttributeName => self.handle_attribute_name_state()?,
                TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state()?,
                TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
                TokenizerState::AttributeValueDoubleQuoted => {
                    self.handle_attribute_value_quoted_state('"')?;
                }
                TokenizerState::AttributeValueSingleQuoted => {
                    self.handle_attribute_value_quoted_state('\'')?;
                }
                TokenizerState::AttributeValueUnquoted => {
                    self.handle_attribute_value_unquoted_state()?;
                }
                TokenizerState::AfterAttributeValueQuoted => {
                    self.handle_after_attribute_value_quoted_state()?;
                }
                TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state()?,
                TokenizerState::MarkupDeclarationOpen => self.handle_markup_declaration_open_state(),
                TokenizerState::Comment => self.handle_comment_state()?,
                TokenizerState::Doctype => self.handle_doctype_state()?,
                TokenizerState::BeforeDoctypeName => self.handle_before_doctype_name_state()?,
                TokenizerState::AfterDoctypeName => self.handle_after_doctype_name_state()?,
            }
        }
    }

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    fn handle_data_state(&mut self) -> Result<(), SyntaxError> {
        match self.current_input_character {
            // "U+003C LESS-THAN SIGN (<) - Switch to the tag open state."
            Some('<') => {
                self.markup_offset = self.current_offset;
                self.switch_to(TokenizerState::TagOpen);
            }
            // "U+0000 NULL - This is an unexpected-null-character parse error."
            Some('\0') => return Err(self.null_character_error()),
            // "EOF - Emit an end-of-file token."
            None => self.at_eof = true,
            // "Anything else - Emit the current input character as a character token."
            Some(c) => self.emit_character_token(c, self.current_offset),
        }
        Ok(())
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    ///
    /// The RAWTEXT less-than sign and end tag states are folded into a
    /// lookahead for an appropriate end tag.
    fn handle_raw_text_state(&mut self) -> Result<(), SyntaxError> {
        match self.current_input_character {
            // "U+003C LESS-THAN SIGN (<)"
            Some('<') if self.appropriate_end_tag_follows() => {
                self.markup_offset = self.current_offset;
                self.switch_to(TokenizerState::TagOpen);
            }
            // "U+0000 NULL"
            Some('\0') => return Err(self.null_character_error()),
            // "EOF" "Emit an end-of-file token."
            None => self.at_eof = true,
            // "Anything else" "Emit the current input character as a character token."
            Some(c) => self.emit_character_token(c, self.current_offset),
        }
        Ok(())
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            // "U+0021 EXCLAMATION MARK (!)"
            // "Switch to the markup declaration open state."
            Some('!') => self.switch_to(TokenizerState::MarkupDeclarationOpen),
            // "U+002F SOLIDUS (/)"
            // "Switch to the end tag open state."
            Some('/') => self.switch_to(TokenizerState::EndTagOpen),
            // "ASCII alpha"
            // "Create a new start tag token, set its tag name to the empty string.
            // Reconsume in the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_tag = Some(self.new_tag(false));
                self.reconsume_in(TokenizerState::TagName);
            }
            // "Anything else"
            // "Emit a U+003C LESS-THAN SIGN character token. Reconsume in the data state."
            _ => {
                self.emit_character_token('<', self.markup_offset);
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            // "ASCII alpha"
            // "Create a new end tag token, set its tag name to the empty string.
            // Reconsume in the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_tag = Some(self.new_tag(true));
                self.reconsume_in(TokenizerState::TagName);
            }
            // Anything else is kept as character data.
            _ => {
                self.emit_character_token('<', self.markup_offset);
                self.emit_character_token('/', self.markup_offset + 1);
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn handle_tag_name_state(&mut self) -> Result<(), SyntaxError> {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab)" "U+000A LINE FEED (LF)"
            // "U+000C FORM FEED (FF)" "U+0020 SPACE"
            // "Switch to the before attribute name state."
            Some(c) if is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "U+002F SOLIDUS (/)"
            // "Switch to the self-closing start tag state."
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            // "U+003E GREATER-THAN SIGN (>)"
            // "Switch to the data state. Emit the current tag token."
            Some('>') => self.emit_current_tag(),
            // "U+0000 NULL"
            Some('\0') => return Err(self.null_character_error()),
            // "EOF" "This is an eof-in-tag parse error."
            None => return Err(self.eof_error()),
            // "ASCII upper alpha" "Append the lowercase version of the current
            // input character to the current tag token's tag name."
            // "Anything else" "Append the current input character to the
            // current tag token's tag name."
            Some(c) => {
                if let Some(tag) = self.current_tag.as_mut() {
                    tag.name.push(c.to_ascii_lowercase());
                }
            }
        }
        Ok(())
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab)" ... "U+0020 SPACE"
            // "Ignore the character."
            Some(c) if is_whitespace_char(c) => {}
            // "U+002F SOLIDUS (/)" "U+003E GREATER-THAN SIGN (>)" "EOF"
            // "Reconsume in the after attribute name state."
            Some('/' | '>') | None => self.reconsume_in(TokenizerState::AfterAttributeName),
            // "U+003D EQUALS SIGN (=)" is an unexpected-equals-sign-before-attribute-name
            // parse error that starts an attribute named "=". Anything else starts
            // an empty attribute.
            Some(_) => {
                self.start_new_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn handle_attribute_name_state(&mut self) -> Result<(), SyntaxError> {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab)" ... "U+002F SOLIDUS (/)"
            // "U+003E GREATER-THAN SIGN (>)" "EOF"
            // "Reconsume in the after attribute name state."
            Some(c) if is_whitespace_char(c) => {
                self.check_duplicate_attribute()?;
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            Some('/' | '>') | None => {
                self.check_duplicate_attribute()?;
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            // "U+003D EQUALS SIGN (=)"
            // "Switch to the before attribute value state."
            Some('=') if !self.current_attribute_name().is_empty() => {
                self.check_duplicate_attribute()?;
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            // "U+0000 NULL"
            Some('\0') => return Err(self.null_character_error()),
            // "ASCII upper alpha" "Append the lowercase version of the current
            // input character to the current attribute's name."
            Some(c) => self.append_to_attribute_name(c.to_ascii_lowercase()),
        }
        Ok(())
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    fn handle_after_attribute_name_state(&mut self) -> Result<(), SyntaxError> {
        match self.current_input_character {
            // "Ignore the character."
            Some(c) if is_whitespace_char(c) => {}
            // "U+002F SOLIDUS (/)" "Switch to the self-closing start tag state."
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            // "U+003D EQUALS SIGN (=)" "Switch to the before attribute value state."
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            // "U+003E GREATER-THAN SIGN (>)"
            // "Switch to the data state. Emit the current tag token."
            Some('>') => self.emit_current_tag(),
            // "EOF" "This is an eof-in-tag parse error."
            None => return Err(self.eof_error()),
            // "Anything else" "Start a new attribute in the current tag token.
            // Reconsume in the attribute name state."
            Some(_) => {
                self.start_new_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
        Ok(())
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            // "Ignore the character."
            Some(c) if is_whitespace_char(c) => {}
            // "U+0022 QUOTATION MARK (")"
            // "Switch to the attribute value (double-quoted) state."
            Some('"') => self.switch_to(TokenizerState::AttributeValueDoubleQuoted),
            // "U+0027 APOSTROPHE (')"
            // "Switch to the attribute value (single-quoted) state."
            Some('\'') => self.switch_to(TokenizerState::AttributeValueSingleQuoted),
            // "U+003E GREATER-THAN SIGN (>)" "This is a missing-attribute-value
            // parse error. Switch to the data state. Emit the current tag token."
            Some('>') => self.emit_current_tag(),
            // "Anything else" "Reconsume in the attribute value (unquoted) state."
            _ => self.reconsume_in(TokenizerState::AttributeValueUnquoted),
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    fn handle_attribute_value_quoted_state(&mut self, quote: char) -> Result<(), SyntaxError> {
        match self.current_input_character {
            // "Switch to the after attribute value (quoted) state."
            Some(c) if c == quote => self.switch_to(TokenizerState::AfterAttributeValueQuoted),
            // "U+0000 NULL"
            Some('\0') => return Err(self.null_character_error()),
            // "EOF" "This is an eof-in-tag parse error."
            None => return Err(self.eof_error()),
            // "Anything else" "Append the current input character to the
            // current attribute's value."
            Some(c) => self.append_to_attribute_value(c),
        }
        Ok(())
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    fn handle_attribute_value_unquoted_state(&mut self) -> Result<(), SyntaxError> {
        match self.current_input_character {
            // "Switch to the before attribute name state."
            Some(c) if is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "Switch to the data state. Emit the current tag token."
            Some('>') => self.emit_current_tag(),
            // "U+0000 NULL"
            Some('\0') => return Err(self.null_character_error()),
            // "U+0022 QUOTATION MARK (")" "U+0027 APOSTROPHE (')"
            // "U+003C LESS-THAN SIGN (<)" "U+003D EQUALS SIGN (=)"
            // "U+0060 GRAVE ACCENT (`)"
            // "This is an unexpected-character-in-unquoted-attribute-value parse error."
            Some('"' | '\'' | '<' | '=' | '`') => {
                return Err(SyntaxError::new(
                    self.current_offset,
                    "unexpected character in unquoted attribute value",
                ));
            }
            // "EOF" "This is an eof-in-tag parse error."
            None => return Err(self.eof_error()),
            // "Anything else" "Append the current input character to the
            // current attribute's value."
            Some(c) => self.append_to_attribute_value(c),
        }
        Ok(())
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn handle_after_attribute_value_quoted_state(&mut self) -> Result<(), SyntaxError> {
        match self.current_input_character {
            // "Switch to the before attribute name state."
            Some(c) if is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "U+002F SOLIDUS (/)" "Switch to the self-closing start tag state."
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            // "U+003E GREATER-THAN SIGN (>)"
            // "Switch to the data state. Emit the current tag token."
            Some('>') => self.emit_current_tag(),
            // "EOF" "This is an eof-in-tag parse error."
            None => return Err(self.eof_error()),
            // "Anything else" "This is a missing-whitespace-between-attributes
            // parse error. Reconsume in the before attribute name state."
            Some(_) => self.reconsume_in(TokenizerState::BeforeAttributeName),
        }
        Ok(())
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    fn handle_self_closing_start_tag_state(&mut self) -> Result<(), SyntaxError> {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>)" "Set the self-closing flag of the
            // current tag token. Switch to the data state. Emit the current tag token."
            Some('>') => {
                if let Some(tag) = self.current_tag.as_mut() {
                    tag.self_closing = true;
                }
                self.emit_current_tag();
            }
            // "EOF" "This is an eof-in-tag parse error."
            None => return Err(self.eof_error()),
            // "Anything else" "This is an unexpected-solidus-in-tag parse error.
            // Reconsume in the before attribute name state."
            Some(_) => self.reconsume_in(TokenizerState::BeforeAttributeName),
        }
        Ok(())
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// Entered with the character after `<!` as the current input character.
    /// Only comments and the doctype are recognised; any other `<!` is kept
    /// as character data.
    fn handle_markup_declaration_open_state(&mut self) {
        let current = self.current_input_character;

        // "Two U+002D HYPHEN-MINUS characters (-)"
        // "Consume those two characters, create a comment token whose data is
        // the empty string, and switch to the comment start state."
        if current == Some('-') && self.peek_codepoint(0) == Some('-') {
            self.consume_string("-");
            self.switch_to(TokenizerState::Comment);
            return;
        }

        // "ASCII case-insensitive match for the word "DOCTYPE""
        // "Consume those characters and switch to the DOCTYPE state."
        if current.is_some_and(|c| c.eq_ignore_ascii_case(&'d'))
            && self.next_few_characters_are_case_insensitive("octype")
        {
            self.consume_string("octype");
            self.switch_to(TokenizerState::Doctype);
            return;
        }

        self.emit_character_token('<', self.markup_offset);
        self.emit_character_token('!', self.markup_offset + 1);
        self.reconsume_in(TokenizerState::Data);
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    ///
    /// Comment data is discarded; the comment ends at the first `-->`.
    fn handle_comment_state(&mut self) -> Result<(), SyntaxError> {
        match self.current_input_character {
            Some('-') if self.next_few_characters_are("->") => {
                self.consume_string("->");
                self.switch_to(TokenizerState::Data);
            }
            // "EOF" "This is an eof-in-comment parse error."
            None => return Err(self.eof_error()),
            Some(_) => {}
        }
        Ok(())
    }

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    fn handle_doctype_state(&mut self) -> Result<(), SyntaxError> {
        match self.current_input_character {
            // "Switch to the before DOCTYPE name state."
            Some(c) if is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDoctypeName);
                Ok(())
            }
            None => Err(self.eof_error()),
            Some(_) => Err(self.doctype_error()),
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    ///
    /// The name must be `html`, in any case.
    fn handle_before_doctype_name_state(&mut self) -> Result<(), SyntaxError> {
        match self.current_input_character {
            // "Ignore the character."
            Some(c) if is_whitespace_char(c) => Ok(()),
            Some('h' | 'H') if self.next_few_characters_are_case_insensitive("tml") => {
                self.consume_string("tml");
                self.switch_to(TokenizerState::AfterDoctypeName);
                Ok(())
            }
            None => Err(self.eof_error()),
            Some(_) => Err(self.doctype_error()),
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    fn handle_after_doctype_name_state(&mut self) -> Result<(), SyntaxError> {
        match self.current_input_character {
            // "Ignore the character."
            Some(c) if is_whitespace_char(c) => Ok(()),
            // "Switch to the data state. Emit the current DOCTYPE token."
            Some('>') => {
                self.token_stream
                    .push(Token::new(self.markup_offset, TokenKind::Doctype));
                self.switch_to(TokenizerState::Data);
                Ok(())
            }
            None => Err(self.eof_error()),
            Some(_) => Err(self.doctype_error()),
        }
    }
}
