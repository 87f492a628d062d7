use pak_common::SyntaxError;
use pak_common::runes::{hex_value, is_digit, is_hex_digit, is_name, is_name_start, is_newline, is_whitespace};

use super::token::{CSSToken, Number, TokenKind};

/// [§ 4.3 Tokenizer Algorithms](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms)
///
/// CSS tokenizer following the CSS Syntax Module Level 3 specification.
///
/// Where CSS Syntax recovers from a parse error by producing a bad
/// token, this tokenizer stops with a [`SyntaxError`] instead.
pub struct CSSTokenizer {
    /// The input as `(byte offset, code point)` pairs
    input: Vec<(usize, char)>,
    /// Byte length of the input, the offset of EOF
    end: usize,
    /// Current position in `input`
    position: usize,
    /// Collected tokens
    tokens: Vec<CSSToken>,
}

impl CSSTokenizer {
    /// Create a new CSS tokenizer with the given input.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            input: input.char_indices().collect(),
            end: input.len(),
            position: 0,
            tokens: Vec::new(),
        }
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    ///
    /// "Repeatedly consume a token from input until an `<EOF-token>` is reached."
    pub fn run(&mut self) -> Result<(), SyntaxError> {
        while let Some(token) = self.consume_token()? {
            self.tokens.push(token);
        }
        Ok(())
    }

    /// Return the collected tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<CSSToken> {
        self.tokens
    }

    /// Return a reference to the collected tokens.
    #[must_use]
    pub fn tokens(&self) -> &[CSSToken] {
        &self.tokens
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    fn consume_token(&mut self) -> Result<Option<CSSToken>, SyntaxError> {
        // "Consume comments."
        self.consume_comments()?;

        let offset = self.offset();

        // "Consume the next input code point."
        let Some(c) = self.consume() else {
            return Ok(None);
        };

        let kind = match c {
            // "whitespace"
            // "Consume as much whitespace as possible. Return a <whitespace-token>."
            c if is_whitespace(c) => {
                self.consume_whitespace();
                TokenKind::Whitespace
            }

            // "U+0022 QUOTATION MARK (")" and "U+0027 APOSTROPHE (')"
            // "Consume a string token and return it."
            '"' | '\'' => self.consume_string_token(c)?,

            // "U+0023 NUMBER SIGN (#)"
            '#' => {
                // "If the next input code point is an ident code point or the next
                // two input code points are a valid escape..."
                if self.peek().is_some_and(is_name) || starts_escape(self.peek(), self.peek_at(1))
                {
                    // "If the next 3 input code points would start an ident sequence,
                    // set the <hash-token>'s type flag to 'id'."
                    let id = starts_ident(self.peek(), self.peek_at(1), self.peek_at(2));
                    let value = self.consume_name();
                    TokenKind::Hash { value, id }
                } else {
                    TokenKind::Delim('#')
                }
            }

            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '[' => TokenKind::OpenSquare,
            ']' => TokenKind::CloseSquare,
            '{' => TokenKind::OpenCurly,
            '}' => TokenKind::CloseCurly,

            // "U+002B PLUS SIGN (+)" and "U+002E FULL STOP (.)"
            '+' | '.' => {
                // "If the input stream starts with a number, reconsume the current
                // input code point, consume a numeric token, and return it."
                if starts_number(Some(c), self.peek(), self.peek_at(1)) {
                    self.reconsume();
                    self.consume_numeric_token()
                } else {
                    TokenKind::Delim(c)
                }
            }

            // "U+002D HYPHEN-MINUS (-)"
            '-' => {
                if starts_number(Some(c), self.peek(), self.peek_at(1)) {
                    self.reconsume();
                    self.consume_numeric_token()
                }
                // "Otherwise, if the input stream starts with an ident sequence,
                // reconsume the current input code point, consume an ident-like
                // token, and return it."
                else if starts_ident(Some(c), self.peek(), self.peek_at(1)) {
                    self.reconsume();
                    self.consume_ident_like_token()?
                } else {
                    TokenKind::Delim('-')
                }
            }

            // "U+0040 COMMERCIAL AT (@)"
            '@' => {
                // "If the next 3 input code points would start an ident sequence,
                // consume an ident sequence, create an <at-keyword-token> with its
                // value set to the returned value, and return it."
                if starts_ident(self.peek(), self.peek_at(1), self.peek_at(2)) {
                    TokenKind::AtKeyword(self.consume_name())
                } else {
                    TokenKind::Delim('@')
                }
            }

            // "U+005C REVERSE SOLIDUS (\)"
            '\\' => {
                // "If the input stream starts with a valid escape, reconsume the
                // current input code point, consume an ident-like token, and
                // return it."
                if starts_escape(Some(c), self.peek()) {
                    self.reconsume();
                    self.consume_ident_like_token()?
                } else {
                    // "Otherwise, this is a parse error. Return a <delim-token>
                    // with its value set to the current input code point."
                    TokenKind::Delim('\\')
                }
            }

            // "digit"
            c if is_digit(c) => {
                self.reconsume();
                self.consume_numeric_token()
            }

            // "ident-start code point"
            c if is_name_start(c) => {
                self.reconsume();
                self.consume_ident_like_token()?
            }

            // "anything else"
            // "Return a <delim-token> with its value set to the current input code point."
            c => TokenKind::Delim(c),
        };

        Ok(Some(CSSToken::new(offset, kind)))
    }

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    ///
    /// A comment left open at the end of the input is an error.
    fn consume_comments(&mut self) -> Result<(), SyntaxError> {
        while self.peek() == Some('/') && self.peek_at(1) == Some('*') {
            self.advance(2);
            loop {
                match self.consume() {
                    Some('*') if self.peek() == Some('/') => {
                        self.advance(1);
                        break;
                    }
                    Some(_) => {}
                    None => return Err(SyntaxError::unexpected_eof(self.end)),
                }
            }
        }
        Ok(())
    }

    /// Consume whitespace characters.
    fn consume_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.advance(1);
        }
    }

    /// [§ 4.3.5 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    fn consume_string_token(&mut self, mark: char) -> Result<TokenKind, SyntaxError> {
        let mut value = String::new();

        loop {
            let offset = self.offset();
            match self.consume() {
                // "ending code point"
                Some(c) if c == mark => return Ok(TokenKind::String { mark, value }),

                // "EOF"
                None => return Err(SyntaxError::unexpected_eof(offset)),

                // "newline"
                Some(c) if is_newline(c) => {
                    return Err(SyntaxError::new(offset, "unexpected newline"));
                }

                // "U+005C REVERSE SOLIDUS (\)"
                Some('\\') => match self.peek() {
                    None => return Err(SyntaxError::unexpected_eof(self.offset())),
                    Some(c) if is_newline(c) => {
                        return Err(SyntaxError::new(self.offset(), "unexpected newline"));
                    }
                    Some(_) => value.push(self.consume_escaped_code_point()),
                },

                // "anything else"
                Some(c) => value.push(c),
            }
        }
    }

    /// [§ 4.3.3 Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    fn consume_numeric_token(&mut self) -> TokenKind {
        let number = self.consume_number();

        // "If the next 3 input code points would start an ident sequence..."
        if starts_ident(self.peek(), self.peek_at(1), self.peek_at(2)) {
            let unit = self.consume_name();
            TokenKind::Dimension { number, unit }
        }
        // "Otherwise, if the next input code point is U+0025 PERCENTAGE SIGN (%),
        // consume it."
        else if self.peek() == Some('%') {
            self.advance(1);
            TokenKind::Percentage(number)
        } else {
            TokenKind::Number(number)
        }
    }

    /// [§ 4.3.4 Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    fn consume_ident_like_token(&mut self) -> Result<TokenKind, SyntaxError> {
        let name = self.consume_name();

        if self.peek() != Some('(') {
            return Ok(TokenKind::Ident(name));
        }
        self.advance(1);

        if !name.eq_ignore_ascii_case("url") {
            return Ok(TokenKind::Function(name));
        }

        // "While the next two input code points are whitespace, consume the next
        // input code point. If the next one or two input code points are U+0022
        // QUOTATION MARK ("), U+0027 APOSTROPHE ('), or whitespace followed by
        // U+0022 QUOTATION MARK (") or U+0027 APOSTROPHE ('), then create a
        // <function-token> with its value set to string and return it."
        let mut lookahead = 0;
        while self.peek_at(lookahead).is_some_and(is_whitespace) {
            lookahead += 1;
        }
        if matches!(self.peek_at(lookahead), Some('"' | '\'')) {
            return Ok(TokenKind::Function(name));
        }

        // "Otherwise, consume a url token, and return it."
        self.consume_url_token()
    }

    /// [§ 4.3.6 Consume a url token](https://www.w3.org/TR/css-syntax-3/#consume-url-token)
    fn consume_url_token(&mut self) -> Result<TokenKind, SyntaxError> {
        let mut value = String::new();

        // "Consume as much whitespace as possible."
        self.consume_whitespace();

        loop {
            let offset = self.offset();
            match self.consume() {
                // "U+0029 RIGHT PARENTHESIS ())"
                Some(')') => return Ok(TokenKind::Url(value)),

                // "EOF"
                None => return Err(SyntaxError::unexpected_eof(offset)),

                // "whitespace"
                // Only trailing whitespace before the closing parenthesis is allowed.
                Some(c) if is_whitespace(c) => {
                    self.consume_whitespace();
                    return match self.peek() {
                        Some(')') => {
                            self.advance(1);
                            Ok(TokenKind::Url(value))
                        }
                        None => Err(SyntaxError::unexpected_eof(self.end)),
                        Some(_) => Err(SyntaxError::new(offset, "unexpected whitespace")),
                    };
                }

                // "U+0022 QUOTATION MARK ("), U+0027 APOSTROPHE ('), U+0028 LEFT
                // PARENTHESIS (()"
                Some('"' | '\'' | '(') => {
                    return Err(SyntaxError::new(offset, "unexpected character in url"));
                }

                // "U+005C REVERSE SOLIDUS (\)"
                Some('\\') => {
                    if starts_escape(Some('\\'), self.peek()) {
                        value.push(self.consume_escaped_code_point());
                    } else {
                        return Err(SyntaxError::new(offset, "invalid escape in url"));
                    }
                }

                // "anything else"
                Some(c) => value.push(c),
            }
        }
    }

    /// [§ 4.3.12 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_name(&mut self) -> String {
        let mut result = String::new();

        loop {
            match self.peek() {
                // "ident code point"
                Some(c) if is_name(c) => {
                    result.push(c);
                    self.advance(1);
                }
                // "the stream starts with a valid escape"
                Some('\\') if starts_escape(Some('\\'), self.peek_at(1)) => {
                    self.advance(1);
                    result.push(self.consume_escaped_code_point());
                }
                // "anything else"
                _ => return result,
            }
        }
    }

    /// [§ 4.3.13 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    fn consume_number(&mut self) -> Number {
        let mut integer = true;
        let mut repr = String::new();

        // "If the next input code point is U+002B PLUS SIGN (+) or U+002D
        // HYPHEN-MINUS (-), consume it and append it to repr."
        if let Some(sign @ ('+' | '-')) = self.peek() {
            repr.push(sign);
            self.advance(1);
        }

        // "While the next input code point is a digit, consume it and append it to repr."
        self.consume_digits(&mut repr);

        // "If the next 2 input code points are U+002E FULL STOP (.) followed by a
        // digit, then consume them, append them to repr, set type to "number"."
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(is_digit) {
            repr.push('.');
            self.advance(1);
            self.consume_digits(&mut repr);
            integer = false;
        }

        // "If the next 2 or 3 input code points are U+0045 LATIN CAPITAL LETTER E
        // (E) or U+0065 LATIN SMALL LETTER E (e), optionally followed by U+002D
        // HYPHEN-MINUS (-) or U+002B PLUS SIGN (+), followed by a digit..."
        if let Some(e @ ('e' | 'E')) = self.peek() {
            let sign = self.peek_at(1).filter(|c| matches!(c, '+' | '-'));
            let digit_at = if sign.is_some() { 2 } else { 1 };
            if self.peek_at(digit_at).is_some_and(is_digit) {
                repr.push(e);
                self.advance(1);
                if let Some(sign) = sign {
                    repr.push(sign);
                    self.advance(1);
                }
                self.consume_digits(&mut repr);
                integer = false;
            }
        }

        // "Convert repr to a number, and set the value to the returned value."
        // Out of range values are clamped to the largest finite ones.
        let value = repr
            .parse::<f64>()
            .unwrap_or_default()
            .clamp(f64::MIN, f64::MAX);
        Number { value, integer }
    }

    fn consume_digits(&mut self, repr: &mut String) {
        while let Some(c) = self.peek().filter(|&c| is_digit(c)) {
            repr.push(c);
            self.advance(1);
        }
    }

    /// [§ 4.3.7 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    ///
    /// Expects the U+005C REVERSE SOLIDUS to have been consumed already.
    fn consume_escaped_code_point(&mut self) -> char {
        match self.consume() {
            // "hex digit"
            Some(c) if is_hex_digit(c) => {
                let mut value = hex_value(c).unwrap_or_default();
                // "Consume as many hex digits as possible, but no more than 5."
                for _ in 0..5 {
                    match self.peek().and_then(hex_value) {
                        Some(digit) => {
                            value = value * 16 + digit;
                            self.advance(1);
                        }
                        None => break,
                    }
                }
                // "If the next input code point is whitespace, consume it as well."
                if self.peek() == Some('\r') && self.peek_at(1) == Some('\n') {
                    self.advance(2);
                } else if self.peek().is_some_and(is_whitespace) {
                    self.advance(1);
                }
                // "If this number is zero, or is for a surrogate, or is greater
                // than the maximum allowed code point, return U+FFFD REPLACEMENT
                // CHARACTER."
                char::from_u32(value)
                    .filter(|&c| c != '\0')
                    .unwrap_or('\u{FFFD}')
            }
            // "EOF"
            None => '\u{FFFD}',
            // "anything else"
            Some(c) => c,
        }
    }

    /// Byte offset of the next input code point.
    fn offset(&self) -> usize {
        self.input.get(self.position).map_or(self.end, |&(offset, _)| offset)
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

/// [§ 4.3.8 Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
///
/// An escape must be followed by something other than a newline; a trailing
/// backslash at the end of the input is not an escape either.
const fn starts_escape(first: Option<char>, second: Option<char>) -> bool {
    match (first, second) {
        (Some('\\'), Some(c)) => !is_newline(c),
        _ => false,
    }
}

/// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
fn starts_ident(first: Option<char>, second: Option<char>, third: Option<char>) -> bool {
    match first {
        // "U+002D HYPHEN-MINUS"
        Some('-') => {
            second.is_some_and(|c| is_name_start(c) || c == '-') || starts_escape(second, third)
        }
        // "U+005C REVERSE SOLIDUS (\)"
        Some('\\') => starts_escape(first, second),
        // "ident-start code point"
        Some(c) => is_name_start(c),
        None => false,
    }
}

/// [§ 4.3.10 Check if three code points would start a number](https://www.w3.org/TR/css-syntax-3/#starts-with-a-number)
fn starts_number(first: Option<char>, second: Option<char>, third: Option<char>) -> bool {
    match first {
        Some('+' | '-') => {
            second.is_some_and(is_digit) || (second == Some('.') && third.is_some_and(is_digit))
        }
        Some('.') => second.is_some_and(is_digit),
        Some(c) => is_digit(c),
        None => false,
    }
}
