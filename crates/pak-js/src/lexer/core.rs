use pak_common::SyntaxError;

use super::token::{
    PUNCTUATORS, Token, TokenKind, is_identifier_part, is_identifier_start, is_js_whitespace,
    is_line_terminator,
};

/// Keywords after which a `/` starts a regular expression rather than a
/// division.
const REGEXP_KEYWORDS: [&str; 13] = [
    "await",
    "case",
    "delete",
    "do",
    "else",
    "in",
    "instanceof",
    "new",
    "return",
    "throw",
    "typeof",
    "void",
    "yield",
];

/// [§ 12 ECMAScript Language: Lexical Grammar](https://tc39.es/ecma262/#sec-ecmascript-language-lexical-grammar)
///
/// "There are several situations where the identification of lexical input
/// elements is sensitive to the syntactic grammar context that is consuming
/// the input elements."
///
/// The lexer runs ahead of any parser, so the goal symbol is guessed from
/// the previous token: a `/` after an operand is a division, anywhere else
/// it starts a regular expression literal. Template substitutions are
/// tracked with a stack so the `}` that closes `${` resumes the template.
pub struct JSLexer {
    /// The input as `(byte offset, code point)` pairs
    input: Vec<(usize, char)>,
    /// Byte length of the input, the offset of EOF
    end: usize,
    /// Current position in `input`
    position: usize,
    /// Collected tokens
    tokens: Vec<Token>,
    /// Open `{` count inside each template substitution, innermost last.
    template_depth: Vec<u32>,
}

impl JSLexer {
    /// Create a new lexer over `input`.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            input: input.char_indices().collect(),
            end: input.len(),
            position: 0,
            tokens: Vec::new(),
            template_depth: Vec::new(),
        }
    }

    /// Scan the whole input.
    pub fn run(&mut self) -> Result<(), SyntaxError> {
        self.skip_hashbang();
        while let Some(token) = self.next_token()? {
            self.tokens.push(token);
        }
        if self.template_depth.is_empty() {
            Ok(())
        } else {
            Err(SyntaxError::unexpected_eof(self.end))
        }
    }

    /// Return the collected tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Return a reference to the collected tokens.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    fn next_token(&mut self) -> Result<Option<Token>, SyntaxError> {
        self.skip_whitespace_and_comments()?;

        let start = self.position;
        let offset = self.offset();
        let Some(c) = self.consume() else {
            return Ok(None);
        };

        let kind = match c {
            '"' | '\'' => self.consume_string(c)?,
            '`' => {
                self.consume_template_characters()?;
                TokenKind::Template
            }
            // "PrivateIdentifier :: # IdentifierName"
            c if is_identifier_start(c)
                || (c == '#' && self.peek().is_some_and(is_identifier_start)) =>
            {
                TokenKind::Identifier(self.consume_identifier(c))
            }
            c if c.is_ascii_digit()
                || (c == '.' && self.peek().is_some_and(|next| next.is_ascii_digit())) =>
            {
                self.consume_number(c);
                TokenKind::Number(self.source_since(start))
            }
            '/' if self.regexp_allowed() => {
                self.consume_regexp()?;
                TokenKind::RegExp
            }
            '{' => {
                if let Some(depth) = self.template_depth.last_mut() {
                    *depth += 1;
                }
                TokenKind::Punctuator("{")
            }
            // "TemplateMiddle" / "TemplateTail"
            '}' if self.template_depth.last() == Some(&0) => {
                let _ = self.template_depth.pop();
                self.consume_template_characters()?;
                TokenKind::Template
            }
            '}' => {
                if let Some(depth) = self.template_depth.last_mut() {
                    *depth -= 1;
                }
                TokenKind::Punctuator("}")
            }
            _ => {
                self.reconsume();
                self.consume_punctuator(offset)?
            }
        };

        Ok(Some(Token::new(offset, self.offset(), kind)))
    }

    /// [§ 12.5 Hashbang Comments](https://tc39.es/ecma262/#sec-hashbang)
    ///
    /// "Hashbang Comments are location-sensitive ... they are only allowed to
    /// occur at the beginning of Script or Module."
    fn skip_hashbang(&mut self) {
        if self.peek() == Some('#') && self.peek_at(1) == Some('!') {
            while self.peek().is_some_and(|c| !is_line_terminator(c)) {
                self.advance(1);
            }
        }
    }

    /// [§ 12.4 Comments](https://tc39.es/ecma262/#sec-comments)
    fn skip_whitespace_and_comments(&mut self) -> Result<(), SyntaxError> {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(c), _) if is_js_whitespace(c) => self.advance(1),
                // "SingleLineComment :: // SingleLineCommentChars opt"
                (Some('/'), Some('/')) => {
                    while self.peek().is_some_and(|c| !is_line_terminator(c)) {
                        self.advance(1);
                    }
                }
                // "MultiLineComment :: /* MultiLineCommentChars opt */"
                (Some('/'), Some('*')) => {
                    self.advance(2);
                    loop {
                        match self.consume() {
                            None => return Err(SyntaxError::unexpected_eof(self.end)),
                            Some('*') if self.peek() == Some('/') => {
                                self.advance(1);
                                break;
                            }
                            Some(_) => {}
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// [§ 12.6 Names and Keywords](https://tc39.es/ecma262/#sec-names-and-keywords)
    fn consume_identifier(&mut self, first: char) -> String {
        let mut name = String::from(first);
        while let Some(c) = self.peek().filter(|&c| is_identifier_part(c)) {
            name.push(c);
            self.advance(1);
        }
        name
    }

    /// [§ 12.9.3 Numeric Literals](https://tc39.es/ecma262/#sec-literals-numeric-literals)
    ///
    /// Consumes the literal without validating it: digits, separators,
    /// radix prefixes, one decimal point, a signed exponent and the BigInt
    /// suffix.
    fn consume_number(&mut self, first: char) {
        let radix = first == '0'
            && self
                .peek()
                .is_some_and(|c| matches!(c, 'x' | 'X' | 'o' | 'O' | 'b' | 'B'));
        let mut seen_dot = first == '.';
        let mut seen_exponent = false;

        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance(1);
                if !radix && matches!(c, 'e' | 'E') {
                    seen_exponent = true;
                    if matches!(self.peek(), Some('+' | '-')) {
                        self.advance(1);
                    }
                }
            } else if c == '.' && !seen_dot && !seen_exponent && !radix {
                seen_dot = true;
                self.advance(1);
            } else {
                break;
            }
        }
    }

    /// [§ 12.9.4 String Literals](https://tc39.es/ecma262/#sec-literals-string-literals)
    ///
    /// Called after the opening quote.
    fn consume_string(&mut self, quote: char) -> Result<TokenKind, SyntaxError> {
        let mut value = String::new();
        loop {
            let offset = self.offset();
            match self.consume() {
                None => return Err(SyntaxError::unexpected_eof(self.end)),
                Some(c) if c == quote => return Ok(TokenKind::String { value, quote }),
                // "DoubleStringCharacter :: SourceCharacter but not one of " or \ or LineTerminator"
                // U+2028 and U+2029 are allowed since ES2019.
                Some('\n' | '\r') => return Err(SyntaxError::new(offset, "unexpected newline")),
                Some('\\') => self.consume_escape(offset, &mut value)?,
                Some(c) => value.push(c),
            }
        }
    }

    /// [§ 12.9.4 String Literals](https://tc39.es/ecma262/#sec-literals-string-literals)
    ///
    /// "EscapeSequence" and "LineContinuation", with the backslash at
    /// `offset` already consumed.
    fn consume_escape(&mut self, offset: usize, value: &mut String) -> Result<(), SyntaxError> {
        let Some(c) = self.consume() else {
            return Err(SyntaxError::unexpected_eof(self.end));
        };
        match c {
            // "LineContinuation :: \ LineTerminatorSequence"
            '\r' => {
                if self.peek() == Some('\n') {
                    self.advance(1);
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            'b' => value.push('\u{8}'),
            'f' => value.push('\u{C}'),
            'n' => value.push('\n'),
            'r' => value.push('\r'),
            't' => value.push('\t'),
            'v' => value.push('\u{B}'),
            '0' if !self.peek().is_some_and(|c| c.is_ascii_digit()) => value.push('\0'),
            'x' => {
                let code = self
                    .consume_hex_digits(2)
                    .ok_or_else(|| invalid_escape(offset))?;
                value.push(char::from_u32(code).ok_or_else(|| invalid_escape(offset))?);
            }
            'u' => {
                let code = self.consume_unicode_escape(offset)?;
                value.push(code);
            }
            c => value.push(c),
        }
        Ok(())
    }

    /// "UnicodeEscapeSequence :: u Hex4Digits | u{ CodePoint }", after the `u`.
    ///
    /// A high surrogate directly followed by an escaped low surrogate is
    /// combined; any other lone surrogate becomes U+FFFD.
    fn consume_unicode_escape(&mut self, offset: usize) -> Result<char, SyntaxError> {
        let code = if self.peek() == Some('{') {
            self.advance(1);
            let mut code: u32 = 0;
            let mut digits = 0;
            loop {
                match self.consume() {
                    Some('}') if digits > 0 => break,
                    Some(c) if c.is_ascii_hexdigit() => {
                        code = code
                            .checked_mul(16)
                            .map(|code| code + c.to_digit(16).unwrap_or_default())
                            .filter(|&code| code <= 0x0010_FFFF)
                            .ok_or_else(|| invalid_escape(offset))?;
                        digits += 1;
                    }
                    _ => return Err(invalid_escape(offset)),
                }
            }
            code
        } else {
            self.consume_hex_digits(4)
                .ok_or_else(|| invalid_escape(offset))?
        };

        if (0xD800..0xDC00).contains(&code)
            && self.peek() == Some('\\')
            && self.peek_at(1) == Some('u')
        {
            let checkpoint = self.position;
            self.advance(2);
            if let Some(low) = self
                .consume_hex_digits(4)
                .filter(|low| (0xDC00..0xE000).contains(low))
            {
                let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                return Ok(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            self.position = checkpoint;
        }

        Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn consume_hex_digits(&mut self, count: usize) -> Option<u32> {
        let mut code = 0;
        for _ in 0..count {
            let digit = self.peek()?.to_digit(16)?;
            code = code * 16 + digit;
            self.advance(1);
        }
        Some(code)
    }

    /// [§ 12.9.6 Template Literal Lexical Components](https://tc39.es/ecma262/#sec-template-literal-lexical-components)
    ///
    /// Consumes template characters up to and including the closing
    /// backtick or the `${` of a substitution.
    fn consume_template_characters(&mut self) -> Result<(), SyntaxError> {
        loop {
            match self.consume() {
                None => return Err(SyntaxError::unexpected_eof(self.end)),
                Some('`') => return Ok(()),
                Some('\\') => {
                    if self.consume().is_none() {
                        return Err(SyntaxError::unexpected_eof(self.end));
                    }
                }
                Some('$') if self.peek() == Some('{') => {
                    self.advance(1);
                    self.template_depth.push(0);
                    return Ok(());
                }
                Some(_) => {}
            }
        }
    }

    /// [§ 12.9.5 Regular Expression Literals](https://tc39.es/ecma262/#sec-literals-regular-expression-literals)
    ///
    /// Called after the opening `/`. Body and flags are consumed unchecked.
    fn consume_regexp(&mut self) -> Result<(), SyntaxError> {
        let mut in_class = false;
        loop {
            let offset = self.offset();
            match self.consume() {
                None => return Err(SyntaxError::unexpected_eof(self.end)),
                Some(c) if is_line_terminator(c) => {
                    return Err(SyntaxError::new(offset, "unexpected newline"));
                }
                // "RegularExpressionBackslashSequence :: \ RegularExpressionNonTerminator"
                Some('\\') => match self.consume() {
                    None => return Err(SyntaxError::unexpected_eof(self.end)),
                    Some(c) if is_line_terminator(c) => {
                        return Err(SyntaxError::new(offset + 1, "unexpected newline"));
                    }
                    Some(_) => {}
                },
                // "RegularExpressionClass :: [ RegularExpressionClassChars ]"
                Some('[') => in_class = true,
                Some(']') => in_class = false,
                Some('/') if !in_class => break,
                Some(_) => {}
            }
        }

        // "RegularExpressionFlags :: RegularExpressionFlags IdentifierPartChar"
        while self.peek().is_some_and(is_identifier_part) {
            self.advance(1);
        }
        Ok(())
    }

    /// [§ 12.8 Punctuators](https://tc39.es/ecma262/#sec-punctuators)
    fn consume_punctuator(&mut self, offset: usize) -> Result<TokenKind, SyntaxError> {
        for punctuator in PUNCTUATORS {
            if !self.next_characters_are(punctuator) {
                continue;
            }
            // "OptionalChainingPunctuator :: ?. [lookahead ∉ DecimalDigit]"
            if punctuator == "?." && self.peek_at(2).is_some_and(|c| c.is_ascii_digit()) {
                continue;
            }
            self.advance(punctuator.len());
            return Ok(TokenKind::Punctuator(punctuator));
        }
        Err(SyntaxError::new(offset, "unexpected character"))
    }

    /// Whether a `/` at the current position starts a regular expression,
    /// judged by the previous token.
    fn regexp_allowed(&self) -> bool {
        match self.tokens.last().map(|token| &token.kind) {
            None => true,
            Some(TokenKind::Punctuator(punctuator)) => {
                !matches!(*punctuator, ")" | "]" | "}" | "++" | "--")
            }
            Some(TokenKind::Identifier(name)) => REGEXP_KEYWORDS.contains(&name.as_str()),
            Some(_) => false,
        }
    }

    /// Whether the input continues with `target`. Only used with ASCII.
    fn next_characters_are(&self, target: &str) -> bool {
        target
            .chars()
            .enumerate()
            .all(|(n, c)| self.peek_at(n) == Some(c))
    }

    /// The source text between position `start` and the current position.
    fn source_since(&self, start: usize) -> String {
        self.input[start..self.position]
            .iter()
            .map(|&(_, c)| c)
            .collect()
    }

    /// Byte offset of the next input code point.
    fn offset(&self) -> usize {
        self.input
            .get(self.position)
            .map_or(self.end, |&(offset, _)| offset)
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        Some(c)
    }

    fn reconsume(&mut self) {
        self.position -= 1;
    }

    fn advance(&mut self, count: usize) {
        self.position = (self.position + count).min(self.input.len());
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).map(|&(_, c)| c)
    }
}

fn invalid_escape(offset: usize) -> SyntaxError {
    SyntaxError::new(offset, "invalid escape sequence")
}
