use pak_common::SyntaxError;
use pak_dom::{Attribute, DomTree, ElementData, NodeId, is_void_element};
use strum_macros::Display;

use crate::tokenizer::{RAW_TEXT_ELEMENTS, Token, TokenKind};

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
///
/// Only the modes needed for a document without tables, forms or frames are
/// modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// Builds a document whose `html` element always has exactly two children,
/// `head` and `body`, in that order. Missing `html`, `head` and `body` tags
/// are implied; tokens the tree construction stage would silently move or
/// drop are reported as a [`SyntaxError`] instead.
pub struct HTMLParser {
    /// The token stream from the tokenizer. Its end stands in for the
    /// end-of-file token.
    tokens: Vec<Token>,

    /// Index of the token being processed.
    token_index: usize,

    /// The document being built.
    tree: DomTree,

    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    insertion_mode: InsertionMode,

    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    ///
    /// "When the insertion mode is switched to "text" or "in table text", the
    /// original insertion mode is also set. This is the insertion mode to
    /// which the tree construction stage will return."
    original_insertion_mode: InsertionMode,

    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    stack_of_open_elements: Vec<NodeId>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
    ///
    /// "Once a head element has been parsed (whether implicitly or explicitly)
    /// the head element pointer gets set to point to this node."
    head_element_pointer: Option<NodeId>,

    /// The body element, once inserted.
    body_element_pointer: Option<NodeId>,
}

impl HTMLParser {
    /// Create a new parser from a token stream.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            token_index: 0,
            tree: DomTree::new(),
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: InsertionMode::InBody,
            stack_of_open_elements: Vec::new(),
            head_element_pointer: None,
            body_element_pointer: None,
        }
    }

    /// Run the parser and return the document tree.
    pub fn run(mut self) -> Result<DomTree, SyntaxError> {
        while self.token_index < self.tokens.len() {
            let token = self.tokens[self.token_index].clone();
            self.process_token(Some(&token))?;
            self.token_index += 1;
        }
        // "An end-of-file token"
        self.process_token(None)?;
        Ok(self.tree)
    }

    /// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    ///
    /// `None` is the end-of-file token.
    fn process_token(&mut self, token: Option<&Token>) -> Result<(), SyntaxError> {
        match self.insertion_mode {
            InsertionMode::Initial => self.handle_initial_mode(token),
            InsertionMode::BeforeHtml => self.handle_before_html_mode(token),
            InsertionMode::BeforeHead => self.handle_before_head_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::AfterHead => self.handle_after_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::Text => self.handle_text_mode(token),
            InsertionMode::AfterBody => self.handle_after_body_mode(token),
            InsertionMode::AfterAfterBody => self.handle_after_after_body_mode(token),
        }
    }

    /// "Reprocess the token" in the mode just switched to.
    fn reprocess_token(&mut self, token: Option<&Token>) -> Result<(), SyntaxError> {
        self.process_token(token)
    }

    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    fn handle_initial_mode(&mut self, token: Option<&Token>) -> Result<(), SyntaxError> {
        let Some(token) = token else {
            return Err(SyntaxError::new(
                self.offset_of(None),
                "expected <!doctype html>",
            ));
        };
        match &token.kind {
            // "A character token that is one of U+0009 CHARACTER TABULATION, U+000A LINE FEED (LF),
            // U+000C FORM FEED (FF), U+000D CARRIAGE RETURN (CR), or U+0020 SPACE"
            // "Ignore the token."
            TokenKind::Character(_) if token.is_whitespace() => Ok(()),

            // "A DOCTYPE token"
            // "Then, switch the insertion mode to "before html"."
            TokenKind::Doctype => {
                self.insertion_mode = InsertionMode::BeforeHtml;
                Ok(())
            }

            // "Anything else"
            // Documents without a doctype would be parsed in quirks mode; they
            // are rejected.
            _ => Err(SyntaxError::new(token.offset, "expected <!doctype html>")),
        }
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    fn handle_before_html_mode(&mut self, token: Option<&Token>) -> Result<(), SyntaxError> {
        let Some(token) = token else {
            return self.handle_before_html_anything_else(None);
        };
        match &token.kind {
            // "Ignore the token."
            //
            // "An end tag whose tag name is one of: "head", "body", "html", "br""
            // Closing tags of elements that will be implied are ignored.
            _ if token.is_whitespace()
                || ["head", "body", "html"]
                    .iter()
                    .any(|name| token.is_end_tag(name)) =>
            {
                Ok(())
            }

            // "A DOCTYPE token" "Parse error."
            TokenKind::Doctype => Err(unexpected_doctype(token)),

            // "A start tag whose tag name is "html""
            // "Create an element for the token in the HTML namespace, with the
            // Document as the intended parent. Append it to the Document object.
            // Put this element in the stack of open elements."
            // "Switch the insertion mode to "before head"."
            TokenKind::StartTag {
                name, attributes, ..
            } if name == "html" => {
                let _ = self.insert_html_element(name, attributes);
                self.insertion_mode = InsertionMode::BeforeHead;
                Ok(())
            }

            // "Any other end tag" "Parse error."
            TokenKind::EndTag { .. } => Err(unexpected_end_tag(token)),

            // "Anything else"
            _ => self.handle_before_html_anything_else(Some(token)),
        }
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode - Anything else](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    ///
    /// "Create an html element whose node document is the Document object.
    /// Append it to the Document object. Put this element in the stack of
    /// open elements. Switch the insertion mode to "before head", then
    /// reprocess the token."
    fn handle_before_html_anything_else(
        &mut self,
        token: Option<&Token>,
    ) -> Result<(), SyntaxError> {
        let _ = self.insert_html_element("html", &[]);
        self.insertion_mode = InsertionMode::BeforeHead;
        self.reprocess_token(token)
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    fn handle_before_head_mode(&mut self, token: Option<&Token>) -> Result<(), SyntaxError> {
        let Some(token) = token else {
            return self.handle_before_head_anything_else(None);
        };
        match &token.kind {
            // "Ignore the token."
            TokenKind::Character(_) if token.is_whitespace() => Ok(()),

            TokenKind::Doctype => Err(unexpected_doctype(token)),

            // "A start tag whose tag name is "html""
            TokenKind::StartTag { name, .. } if name == "html" => Err(unexpected_start_tag(token)),

            // "A start tag whose tag name is "head""
            // "Insert an HTML element for the token."
            // "Set the head element pointer to the newly created head element."
            // "Switch the insertion mode to "in head"."
            TokenKind::StartTag {
                name, attributes, ..
            } if name == "head" => {
                let head = self.insert_html_element(name, attributes);
                self.head_element_pointer = Some(head);
                self.insertion_mode = InsertionMode::InHead;
                Ok(())
            }

            // "An end tag whose tag name is one of: "head", "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            // "Any other end tag" "Parse error."
            TokenKind::EndTag { name } if !matches!(name.as_str(), "head" | "body" | "html") => {
                Err(unexpected_end_tag(token))
            }

            _ => self.handle_before_head_anything_else(Some(token)),
        }
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode - Anything else](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    ///
    /// "Insert an HTML element for a "head" start tag token with no attributes.
    /// Set the head element pointer to the newly created head element.
    /// Switch the insertion mode to "in head". Reprocess the current token."
    fn handle_before_head_anything_else(
        &mut self,
        token: Option<&Token>,
    ) -> Result<(), SyntaxError> {
        let head = self.insert_html_element("head", &[]);
        self.head_element_pointer = Some(head);
        self.insertion_mode = InsertionMode::InHead;
        self.reprocess_token(token)
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    fn handle_in_head_mode(&mut self, token: Option<&Token>) -> Result<(), SyntaxError> {
        let Some(token) = token else {
            return self.handle_in_head_anything_else(None);
        };
        match &token.kind {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Insert the character."
            TokenKind::Character(c) if token.is_whitespace() => {
                self.insert_character(*c);
                Ok(())
            }

            TokenKind::Doctype => Err(unexpected_doctype(token)),

            // "A start tag whose tag name is "html"" / "A start tag whose tag name is "head""
            TokenKind::StartTag { name, .. } if matches!(name.as_str(), "html" | "head") => {
                Err(unexpected_start_tag(token))
            }

            // "A start tag whose tag name is one of: "base", "basefont", "bgsound", "link""
            // "A start tag whose tag name is "meta""
            // "Insert an HTML element for the token. Immediately pop the current
            // node off the stack of open elements."
            TokenKind::StartTag {
                name, attributes, ..
            } if matches!(name.as_str(), "base" | "link" | "meta") => {
                let _ = self.insert_html_element(name, attributes);
                let _ = self.stack_of_open_elements.pop();
                Ok(())
            }

            // "A start tag whose tag name is "title""
            // "Follow the generic RCDATA element parsing algorithm."
            // "A start tag whose tag name is one of: "noframes", "style""
            // "Follow the generic raw text element parsing algorithm."
            // "A start tag whose tag name is "script"" ... "Switch the insertion
            // mode to "text"."
            TokenKind::StartTag {
                name, attributes, ..
            } if RAW_TEXT_ELEMENTS.contains(&name.as_str()) => {
                self.parse_raw_text_element(name, attributes);
                Ok(())
            }

            // "An end tag whose tag name is "head""
            // "Pop the current node (which will be the head element) off the
            // stack of open elements."
            // "Switch the insertion mode to "after head"."
            TokenKind::EndTag { name } if name == "head" => {
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = InsertionMode::AfterHead;
                Ok(())
            }

            // "An end tag whose tag name is one of: "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            // "Any other end tag" "Parse error."
            TokenKind::EndTag { name } if !matches!(name.as_str(), "body" | "html") => {
                Err(unexpected_end_tag(token))
            }

            _ => self.handle_in_head_anything_else(Some(token)),
        }
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode - Anything else](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    ///
    /// "Pop the current node (which will be the head element) off the stack of
    /// open elements. Switch the insertion mode to "after head". Reprocess the token."
    fn handle_in_head_anything_else(&mut self, token: Option<&Token>) -> Result<(), SyntaxError> {
        let _ = self.stack_of_open_elements.pop();
        self.insertion_mode = InsertionMode::AfterHead;
        self.reprocess_token(token)
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    ///
    /// Whitespace between `</head>` and `<body>` is dropped so `html` keeps
    /// exactly two children.
    fn handle_after_head_mode(&mut self, token: Option<&Token>) -> Result<(), SyntaxError> {
        let Some(token) = token else {
            return self.handle_after_head_anything_else(None);
        };
        match &token.kind {
            TokenKind::Character(_) if token.is_whitespace() => Ok(()),

            TokenKind::Doctype => Err(unexpected_doctype(token)),

            TokenKind::StartTag { name, .. } if matches!(name.as_str(), "html" | "head") => {
                Err(unexpected_start_tag(token))
            }

            // "A start tag whose tag name is "body""
            // "Insert an HTML element for the token."
            // "Switch the insertion mode to "in body"."
            TokenKind::StartTag {
                name, attributes, ..
            } if name == "body" => {
                let body = self.insert_html_element(name, attributes);
                self.body_element_pointer = Some(body);
                self.insertion_mode = InsertionMode::InBody;
                Ok(())
            }

            // "A start tag whose tag name is one of: "base", "basefont", "bgsound",
            // "link", "meta", "noframes", "script", "style", "template", "title""
            // "Parse error."
            // "Push the node pointed to by the head element pointer onto the stack
            // of open elements."
            // "Process the token using the rules for the "in head" insertion mode."
            //
            // The head element stays open until the next token that does not
            // belong in it, which returns to "after head".
            TokenKind::StartTag { name, .. }
                if matches!(name.as_str(), "base" | "link" | "meta")
                    || RAW_TEXT_ELEMENTS.contains(&name.as_str()) =>
            {
                if let Some(head) = self.head_element_pointer {
                    self.stack_of_open_elements.push(head);
                }
                self.insertion_mode = InsertionMode::InHead;
                self.reprocess_token(Some(token))
            }

            // "An end tag whose tag name is one of: "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            TokenKind::EndTag { name } if !matches!(name.as_str(), "body" | "html") => {
                Err(unexpected_end_tag(token))
            }

            _ => self.handle_after_head_anything_else(Some(token)),
        }
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode - Anything else](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    ///
    /// "Insert an HTML element for a "body" start tag token with no attributes.
    /// Switch the insertion mode to "in body". Reprocess the current token."
    fn handle_after_head_anything_else(
        &mut self,
        token: Option<&Token>,
    ) -> Result<(), SyntaxError> {
        let body = self.insert_html_element("body", &[]);
        self.body_element_pointer = Some(body);
        self.insertion_mode = InsertionMode::InBody;
        self.reprocess_token(token)
    }

    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    fn handle_in_body_mode(&mut self, token: Option<&Token>) -> Result<(), SyntaxError> {
        // "An end-of-file token" "Stop parsing."
        let Some(token) = token else {
            return Ok(());
        };
        match &token.kind {
            // "Any other character token" "Insert the token's character."
            TokenKind::Character(c) => {
                self.insert_character(*c);
                Ok(())
            }

            TokenKind::Doctype => Err(unexpected_doctype(token)),

            // "A start tag whose tag name is "html"" / "A start tag whose tag name is "body""
            // would merge attributes into an element that has already been built.
            TokenKind::StartTag { name, .. }
                if matches!(name.as_str(), "html" | "head" | "body") =>
            {
                Err(unexpected_start_tag(token))
            }

            TokenKind::StartTag {
                name, attributes, ..
            } if RAW_TEXT_ELEMENTS.contains(&name.as_str()) => {
                self.parse_raw_text_element(name, attributes);
                Ok(())
            }

            // "Any other start tag"
            // "Insert an HTML element for the token."
            // Void elements and self-closing tags are popped immediately.
            TokenKind::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let _ = self.insert_html_element(name, attributes);
                if *self_closing || is_void_element(name) {
                    let _ = self.stack_of_open_elements.pop();
                }
                Ok(())
            }

            // "An end tag whose tag name is "body""
            // "Switch the insertion mode to "after body"."
            TokenKind::EndTag { name } if name == "body" => {
                self.insertion_mode = InsertionMode::AfterBody;
                Ok(())
            }

            // "An end tag whose tag name is "html""
            // "Switch the insertion mode to "after body". Reprocess the token."
            TokenKind::EndTag { name } if name == "html" => {
                self.insertion_mode = InsertionMode::AfterBody;
                self.reprocess_token(Some(token))
            }

            // "Any other end tag"
            TokenKind::EndTag { name } => self.any_other_end_tag(token, name),
        }
    }

    /// [§ 13.2.6.4.7 The "in body" insertion mode - Any other end tag](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// "Loop: If node is an HTML element with the same tag name as the token, then:
    /// ... Pop all the nodes from the current node up to node, including node,
    /// then stop these steps."
    ///
    /// The search stops at `body`; an end tag without a matching open element
    /// is an error.
    fn any_other_end_tag(&mut self, token: &Token, name: &str) -> Result<(), SyntaxError> {
        let floor = self
            .body_element_pointer
            .and_then(|body| self.stack_of_open_elements.iter().position(|&id| id == body))
            .map_or(0, |index| index + 1);

        let matched = self.stack_of_open_elements[floor..]
            .iter()
            .rposition(|&id| self.tag_name(id) == Some(name));

        match matched {
            Some(index) => {
                self.stack_of_open_elements.truncate(floor + index);
                Ok(())
            }
            None => Err(unexpected_end_tag(token)),
        }
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    fn handle_text_mode(&mut self, token: Option<&Token>) -> Result<(), SyntaxError> {
        // "An end-of-file token" "Parse error."
        let Some(token) = token else {
            return Err(SyntaxError::unexpected_eof(self.offset_of(None)));
        };
        match &token.kind {
            // "A character token" "Insert the token's character."
            TokenKind::Character(c) => {
                self.insert_character(*c);
                Ok(())
            }

            // "Any other end tag"
            // "Pop the current node off the stack of open elements."
            // "Switch the insertion mode to the original insertion mode."
            TokenKind::EndTag { name } if self.current_tag_name() == Some(name.as_str()) => {
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = self.original_insertion_mode;
                Ok(())
            }

            // The tokenizer only leaves raw text at the appropriate end tag.
            _ => Err(SyntaxError::new(token.offset, "unexpected token")),
        }
    }

    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    fn handle_after_body_mode(&mut self, token: Option<&Token>) -> Result<(), SyntaxError> {
        // "An end-of-file token" "Stop parsing."
        let Some(token) = token else {
            return Ok(());
        };
        match &token.kind {
            // "Process the token using the rules for the "in body" insertion mode."
            TokenKind::Character(c) if token.is_whitespace() => {
                self.insert_character_into_body(*c);
                Ok(())
            }

            // "An end tag whose tag name is "html""
            // "Switch the insertion mode to "after after body"."
            TokenKind::EndTag { name } if name == "html" => {
                self.insertion_mode = InsertionMode::AfterAfterBody;
                Ok(())
            }

            // "Anything else" "Parse error."
            _ => Err(SyntaxError::new(token.offset, "unexpected token")),
        }
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    fn handle_after_after_body_mode(&mut self, token: Option<&Token>) -> Result<(), SyntaxError> {
        let Some(token) = token else {
            return Ok(());
        };
        match &token.kind {
            TokenKind::Character(c) if token.is_whitespace() => {
                self.insert_character_into_body(*c);
                Ok(())
            }
            _ => Err(SyntaxError::new(token.offset, "unexpected token")),
        }
    }

    // =========================================================================
    // Tree helpers
    // =========================================================================

    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#current-node)
    ///
    /// "The current node is the bottommost node in this stack of open elements."
    fn current_node(&self) -> NodeId {
        self.stack_of_open_elements
            .last()
            .copied()
            .unwrap_or(NodeId::ROOT)
    }

    fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.tree.as_element(id).map(|data| data.tag_name.as_str())
    }

    fn current_tag_name(&self) -> Option<&str> {
        self.tag_name(self.current_node())
    }

    /// [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    ///
    /// "Insert an HTML element for the token": append it to the current node
    /// and push it onto the stack of open elements.
    fn insert_html_element(&mut self, name: &str, attributes: &[Attribute]) -> NodeId {
        let parent = self.current_node();
        let id = self.tree.append_element(
            parent,
            ElementData::with_attributes(name, attributes.to_vec()),
        );
        self.stack_of_open_elements.push(id);
        id
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// "If there is a Text node immediately before the adjusted insertion
    /// location, then append data to that Text node's data."
    fn insert_character(&mut self, c: char) {
        let parent = self.current_node();
        let mut buffer = [0; 4];
        self.tree.append_text(parent, c.encode_utf8(&mut buffer));
    }

    fn insert_character_into_body(&mut self, c: char) {
        if let Some(body) = self.body_element_pointer {
            let mut buffer = [0; 4];
            self.tree.append_text(body, c.encode_utf8(&mut buffer));
        }
    }

    /// [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#parsing-elements-that-contain-only-text)
    ///
    /// "Insert an HTML element for the token."
    /// "Let the original insertion mode be the current insertion mode."
    /// "Then, switch the insertion mode to "text"."
    ///
    /// The tokenizer has already switched itself to the raw text state.
    fn parse_raw_text_element(&mut self, name: &str, attributes: &[Attribute]) {
        let _ = self.insert_html_element(name, attributes);
        self.original_insertion_mode = self.insertion_mode;
        self.insertion_mode = InsertionMode::Text;
    }

    /// Offset of `token`, or of the last token when at end of file.
    fn offset_of(&self, token: Option<&Token>) -> usize {
        token
            .or_else(|| self.tokens.last())
            .map_or(0, |token| token.offset)
    }
}

fn unexpected_doctype(token: &Token) -> SyntaxError {
    SyntaxError::new(token.offset, "unexpected doctype")
}

fn unexpected_start_tag(token: &Token) -> SyntaxError {
    SyntaxError::new(token.offset, "unexpected start tag")
}

fn unexpected_end_tag(token: &Token) -> SyntaxError {
    SyntaxError::new(token.offset, "unexpected end tag")
}
