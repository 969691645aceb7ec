//! [§ 4.3 Tokenizer Algorithms](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms)
//!
//! The tokenizer proper: a dispatch on the next input code point, with one
//! sub-consumer per token family. Unlike the reference algorithm it never
//! builds token values while lexing; each token carries the exact source
//! slice it was consumed from, and escape resolution is deferred to
//! [`crate::decode`]. The only value materialized during lexing is the
//! candidate name of an ident-like token, which is needed to recognize
//! `url(` case-insensitively even when the name itself is escaped.

use crate::code_point::{
    escaped_code_point, hex_digit_value, is_css_newline, is_ident_code_point,
    is_ident_start_code_point, is_non_printable, is_valid_escape, is_whitespace,
};
use crate::input::Input;
use crate::token::{Token, TokenType};

/// A streaming CSS tokenizer over an [`Input`] cursor.
///
/// `next` returns the next token and advances; once the input is exhausted
/// it returns an EOF token forever. `peek` materializes the next token into
/// a one-slot cache without consuming it; the following `next` drains the
/// cache.
#[derive(Debug)]
pub struct Lexer {
    input: Input,
    peeked: Option<Token>,
}

impl Lexer {
    /// Create a new lexer owning the given input cursor.
    #[must_use]
    pub fn new(input: Input) -> Self {
        Self {
            input,
            peeked: None,
        }
    }

    /// Read the next token from the input stream.
    pub fn next(&mut self) -> Token {
        if let Some(token) = self.peeked.take() {
            return token;
        }
        self.consume_token()
    }

    /// Return the next token without consuming it.
    ///
    /// Repeated calls return equal tokens; the first `next` after a `peek`
    /// returns the same token.
    pub fn peek(&mut self) -> Token {
        if self.peeked.is_none() {
            let token = self.consume_token();
            self.peeked = Some(token);
        }
        self.peeked.clone().unwrap_or_default()
    }

    /// True once the cursor has reached the end of the input.
    ///
    /// This is informational; callers normally just watch for the EOF token.
    #[must_use]
    pub fn err(&self) -> bool {
        self.input.err()
    }

    /// Finish the pending slice as a token of the given kind.
    fn emit(&mut self, token_type: TokenType) -> Token {
        Token {
            token_type,
            raw: self.input.shift(),
        }
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    fn consume_token(&mut self) -> Token {
        let c = match self.input.peek(0) {
            Some(c) => c,
            None => return Token::eof(),
        };

        match c {
            c if is_whitespace(c) => {
                self.consume_whitespace();
                self.emit(TokenType::Whitespace)
            }

            '\'' | '"' => self.consume_string_token(c),

            // Numbers starting with '+', '-' or '.' are handled in the sign
            // branches below.
            c if c.is_ascii_digit() => self.consume_numeric_token(),

            '(' => {
                self.input.advance(1);
                self.emit(TokenType::LeftParenthesis)
            }
            ')' => {
                self.input.advance(1);
                self.emit(TokenType::RightParenthesis)
            }
            '[' => {
                self.input.advance(1);
                self.emit(TokenType::LeftBracket)
            }
            ']' => {
                self.input.advance(1);
                self.emit(TokenType::RightBracket)
            }
            '{' => {
                self.input.advance(1);
                self.emit(TokenType::LeftBrace)
            }
            '}' => {
                self.input.advance(1);
                self.emit(TokenType::RightBrace)
            }
            ',' => {
                self.input.advance(1);
                self.emit(TokenType::Comma)
            }
            ':' => {
                self.input.advance(1);
                self.emit(TokenType::Colon)
            }
            ';' => {
                self.input.advance(1);
                self.emit(TokenType::Semicolon)
            }

            '+' | '.' => {
                if self.would_start_number() {
                    self.consume_numeric_token()
                } else {
                    self.input.advance(1);
                    self.emit(TokenType::Delimiter)
                }
            }

            '-' => {
                if self.would_start_number() {
                    self.consume_numeric_token()
                } else if self.input.peek(1) == Some('-') && self.input.peek(2) == Some('>') {
                    self.input.advance(3);
                    self.emit(TokenType::CDC)
                } else if self.would_start_identifier() {
                    self.consume_ident_like_token()
                } else {
                    self.input.advance(1);
                    self.emit(TokenType::Delimiter)
                }
            }

            '*' => {
                if self.input.peek(1) == Some('=') {
                    self.input.advance(2);
                    self.emit(TokenType::SubstringMatch)
                } else {
                    self.input.advance(1);
                    self.emit(TokenType::Delimiter)
                }
            }

            '<' => {
                if self.input.peek(1) == Some('!')
                    && self.input.peek(2) == Some('-')
                    && self.input.peek(3) == Some('-')
                {
                    self.input.advance(4);
                    self.emit(TokenType::CDO)
                } else {
                    self.input.advance(1);
                    self.emit(TokenType::Delimiter)
                }
            }

            '/' => {
                if self.input.peek(1) == Some('*') {
                    self.consume_comment()
                } else {
                    self.input.advance(1);
                    self.emit(TokenType::Delimiter)
                }
            }

            '\\' => {
                if is_valid_escape(self.input.peek(0), self.input.peek(1)) {
                    self.consume_ident_like_token()
                } else {
                    // A backslash right before a newline escapes nothing.
                    self.input.advance(1);
                    self.emit(TokenType::Delimiter)
                }
            }

            '#' => {
                self.input.advance(1);
                if self.input.peek(0).map(is_ident_code_point).unwrap_or(false)
                    || is_valid_escape(self.input.peek(0), self.input.peek(1))
                {
                    self.consume_name();
                    self.emit(TokenType::Hash)
                } else {
                    self.emit(TokenType::Delimiter)
                }
            }

            '^' => {
                if self.input.peek(1) == Some('=') {
                    self.input.advance(2);
                    self.emit(TokenType::PrefixMatch)
                } else {
                    self.input.advance(1);
                    self.emit(TokenType::Delimiter)
                }
            }

            '$' => {
                if self.input.peek(1) == Some('=') {
                    self.input.advance(2);
                    self.emit(TokenType::SuffixMatch)
                } else {
                    self.input.advance(1);
                    self.emit(TokenType::Delimiter)
                }
            }

            '~' => {
                if self.input.peek(1) == Some('=') {
                    self.input.advance(2);
                    self.emit(TokenType::IncludeMatch)
                } else {
                    self.input.advance(1);
                    self.emit(TokenType::Delimiter)
                }
            }

            '|' => {
                if self.input.peek(1) == Some('=') {
                    self.input.advance(2);
                    self.emit(TokenType::DashMatch)
                } else if self.input.peek(1) == Some('|') {
                    self.input.advance(2);
                    self.emit(TokenType::Column)
                } else {
                    self.input.advance(1);
                    self.emit(TokenType::Delimiter)
                }
            }

            '@' => {
                self.input.advance(1);
                if self.would_start_identifier() {
                    self.consume_name();
                    self.emit(TokenType::AtKeyword)
                } else {
                    self.emit(TokenType::Delimiter)
                }
            }

            'u' | 'U' => {
                if self.input.peek(1) == Some('+')
                    && (self.input.peek(2).map(|c| c.is_ascii_hexdigit()).unwrap_or(false)
                        || self.input.peek(2) == Some('?'))
                {
                    self.input.advance(2);
                    self.consume_unicode_range_token()
                } else {
                    self.consume_ident_like_token()
                }
            }

            // Control characters and the remaining ASCII punctuation have no
            // special meaning; they all come out as single-code-point
            // delimiters.
            '\x01'..='\x08' | '\x0B' | '\x0E'..='\x1F' | '!' | '%' | '&' | '=' | '>' | '?'
            | '`' | '\x7F' => {
                self.input.advance(1);
                self.emit(TokenType::Delimiter)
            }

            _ => self.consume_ident_like_token(),
        }
    }

    /// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
    fn would_start_identifier(&self) -> bool {
        let first = self.input.peek(0);
        let second = self.input.peek(1);

        match first {
            Some(c) if is_ident_start_code_point(c) => true,
            Some('-') => {
                second.map(is_ident_start_code_point).unwrap_or(false)
                    || second == Some('-')
                    || is_valid_escape(second, self.input.peek(2))
            }
            Some('\\') => is_valid_escape(first, second),
            _ => false,
        }
    }

    /// [§ 4.3.10 Check if three code points would start a number](https://www.w3.org/TR/css-syntax-3/#starts-with-a-number)
    fn would_start_number(&self) -> bool {
        match self.input.peek(0) {
            Some(c) if c.is_ascii_digit() => true,
            Some('+') | Some('-') => match self.input.peek(1) {
                Some(c) if c.is_ascii_digit() => true,
                Some('.') => self
                    .input
                    .peek(2)
                    .map(|c| c.is_ascii_digit())
                    .unwrap_or(false),
                _ => false,
            },
            Some('.') => self
                .input
                .peek(1)
                .map(|c| c.is_ascii_digit())
                .unwrap_or(false),
            _ => false,
        }
    }

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    ///
    /// Called with the cursor on the opening `/`. An unterminated comment is
    /// not an error; the token simply ends at EOF without a closing `*/`.
    fn consume_comment(&mut self) -> Token {
        self.input.advance(2);
        loop {
            match self.input.peek(0) {
                None => break,
                Some('*') if self.input.peek(1) == Some('/') => {
                    self.input.advance(2);
                    break;
                }
                Some(_) => self.input.advance(1),
            }
        }
        self.emit(TokenType::Comment)
    }

    /// Consume one whitespace code point, counting CRLF as a single unit.
    fn consume_single_whitespace(&mut self) {
        if self.input.peek(0) == Some('\r') && self.input.peek(1) == Some('\n') {
            self.input.advance(2);
        } else if self.input.peek(0).map(is_whitespace).unwrap_or(false) {
            self.input.advance(1);
        }
    }

    /// Consume as much whitespace as possible.
    fn consume_whitespace(&mut self) {
        while self.input.peek(0).map(is_whitespace).unwrap_or(false) {
            self.consume_single_whitespace();
        }
    }

    /// [§ 4.3.7 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    ///
    /// Called with the cursor just past the backslash. Returns the decoded
    /// code point; most call sites only care that the raw text advanced.
    fn consume_escape(&mut self) -> char {
        match self.input.peek(0) {
            Some(c) if c.is_ascii_hexdigit() => {
                self.input.advance(1);
                let mut value = hex_digit_value(c);

                // "Consume as many hex digits as possible, but no more than 5."
                for _ in 1..6 {
                    match self.input.peek(0) {
                        Some(c) if c.is_ascii_hexdigit() => {
                            self.input.advance(1);
                            value = value * 16 + hex_digit_value(c);
                        }
                        _ => break,
                    }
                }

                // "If the next input code point is whitespace, consume it as well."
                self.consume_single_whitespace();

                escaped_code_point(value)
            }
            Some(c) => {
                self.input.advance(1);
                c
            }
            // "EOF: This is a parse error. Return U+FFFD REPLACEMENT CHARACTER."
            None => char::REPLACEMENT_CHARACTER,
        }
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    ///
    /// Returns the decoded name; the raw text stays in the pending slice.
    fn consume_name(&mut self) -> String {
        let mut name = String::new();
        loop {
            match self.input.peek(0) {
                Some(c) if is_ident_code_point(c) => {
                    self.input.advance(1);
                    name.push(c);
                }
                Some('\\') if is_valid_escape(self.input.peek(0), self.input.peek(1)) => {
                    self.input.advance(1);
                    let escaped = self.consume_escape();
                    name.push(escaped);
                }
                _ => break,
            }
        }
        name
    }

    /// [§ 4.3.12 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    fn consume_number(&mut self) {
        if matches!(self.input.peek(0), Some('+') | Some('-')) {
            self.input.advance(1);
        }

        self.input.advance_while(|c| c.is_ascii_digit());

        // fraction
        if self.input.peek(0) == Some('.')
            && self.input.peek(1).map(|c| c.is_ascii_digit()).unwrap_or(false)
        {
            self.input.advance(1);
            self.input.advance_while(|c| c.is_ascii_digit());
        }

        // scientific notation
        if matches!(self.input.peek(0), Some('e') | Some('E')) {
            let second = self.input.peek(1);
            if second.map(|c| c.is_ascii_digit()).unwrap_or(false) {
                self.input.advance(1);
                self.input.advance_while(|c| c.is_ascii_digit());
            } else if matches!(second, Some('+') | Some('-'))
                && self.input.peek(2).map(|c| c.is_ascii_digit()).unwrap_or(false)
            {
                self.input.advance(2);
                self.input.advance_while(|c| c.is_ascii_digit());
            }
        }
    }

    /// [§ 4.3.3 Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    fn consume_numeric_token(&mut self) -> Token {
        self.consume_number();

        if self.would_start_identifier() {
            self.consume_name();
            self.emit(TokenType::Dimension)
        } else if self.input.peek(0) == Some('%') {
            self.input.advance(1);
            self.emit(TokenType::Percentage)
        } else {
            self.emit(TokenType::Number)
        }
    }

    /// [§ 4.3.4 Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    fn consume_ident_like_token(&mut self) -> Token {
        let name = self.consume_name();

        if self.input.peek(0) == Some('(') {
            self.input.advance(1);
            if name.eq_ignore_ascii_case("url") {
                // The reference algorithm peeks past the whitespace instead
                // of consuming it, so that a quoted url falls back to a
                // function token without touching the whitespace. Consuming
                // it here is equivalent: either the url consumer keeps it in
                // the raw text, or the function token swallows it.
                self.consume_whitespace();

                if !matches!(self.input.peek(0), Some('"') | Some('\'')) {
                    return self.consume_url_token();
                }
            }
            return self.emit(TokenType::Function);
        }

        self.emit(TokenType::Ident)
    }

    /// [§ 4.3.5 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    ///
    /// An unescaped newline produces a bad-string token and stays in the
    /// input; input ending inside the string still produces a string token.
    fn consume_string_token(&mut self, quote: char) -> Token {
        self.input.advance(1);

        loop {
            match self.input.peek(0) {
                Some(c) if c == quote => {
                    self.input.advance(1);
                    return self.emit(TokenType::String);
                }
                None => return self.emit(TokenType::String),
                Some(c) if is_css_newline(c) => return self.emit(TokenType::BadString),
                Some('\\') => match self.input.peek(1) {
                    // A backslash at EOF is dropped.
                    None => self.input.advance(1),
                    // An escaped newline continues the string on the next line.
                    Some(c) if is_css_newline(c) => {
                        self.input.advance(1);
                        self.consume_single_whitespace();
                    }
                    Some(_) => {
                        self.input.advance(1);
                        self.consume_escape();
                    }
                },
                Some(_) => self.input.advance(1),
            }
        }
    }

    /// [§ 4.3.6 Consume a url token](https://www.w3.org/TR/css-syntax-3/#consume-url-token)
    ///
    /// Entered by the ident-like consumer after `url(` and any leading
    /// whitespace, with the next code point known not to be a quote.
    fn consume_url_token(&mut self) -> Token {
        loop {
            match self.input.peek(0) {
                Some(')') => {
                    self.input.advance(1);
                    return self.emit(TokenType::Url);
                }
                None => return self.emit(TokenType::Url),
                Some(c) if is_whitespace(c) => {
                    self.consume_whitespace();
                    match self.input.peek(0) {
                        Some(')') => {
                            self.input.advance(1);
                            return self.emit(TokenType::Url);
                        }
                        None => return self.emit(TokenType::Url),
                        // Anything but the closing parenthesis after interior
                        // whitespace makes this a bad url.
                        _ => break,
                    }
                }
                Some(c) if c == '"' || c == '\'' || is_non_printable(c) => {
                    self.input.advance(1);
                    break;
                }
                Some('\\') => {
                    if is_valid_escape(self.input.peek(0), self.input.peek(1)) {
                        self.input.advance(1);
                        self.consume_escape();
                    } else {
                        break;
                    }
                }
                Some(_) => self.input.advance(1),
            }
        }

        self.consume_bad_url_remnants();
        self.emit(TokenType::BadUrl)
    }

    /// [§ 4.3.14 Consume the remnants of a bad url](https://www.w3.org/TR/css-syntax-3/#consume-remnants-of-bad-url)
    fn consume_bad_url_remnants(&mut self) {
        loop {
            match self.input.peek(0) {
                Some(')') => {
                    self.input.advance(1);
                    return;
                }
                None => return,
                Some('\\') if is_valid_escape(self.input.peek(0), self.input.peek(1)) => {
                    self.input.advance(1);
                    self.consume_escape();
                }
                Some(_) => self.input.advance(1),
            }
        }
    }

    /// [The Unicode-Range microsyntax](https://www.w3.org/TR/css-syntax-3/#urange)
    ///
    /// Entered with `u+` already consumed. A start with fewer than six hex
    /// digits may be padded with `?` wildcards; otherwise `-` plus a hex
    /// digit begins the end of the range. `u+?` with no hex digits at all is
    /// a valid (wildcard-only) range.
    fn consume_unicode_range_token(&mut self) -> Token {
        let mut remaining = 6;
        while remaining > 0
            && self.input.peek(0).map(|c| c.is_ascii_hexdigit()).unwrap_or(false)
        {
            self.input.advance(1);
            remaining -= 1;
        }

        if remaining > 0 && self.input.peek(0) == Some('?') {
            while remaining > 0 && self.input.peek(0) == Some('?') {
                self.input.advance(1);
                remaining -= 1;
            }
        } else if self.input.peek(0) == Some('-')
            && self.input.peek(1).map(|c| c.is_ascii_hexdigit()).unwrap_or(false)
        {
            self.input.advance(1);
            let mut remaining = 6;
            while remaining > 0
                && self.input.peek(0).map(|c| c.is_ascii_hexdigit()).unwrap_or(false)
            {
                self.input.advance(1);
                remaining -= 1;
            }
        }

        self.emit(TokenType::UnicodeRange)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every non-EOF token, then `None`.
    fn next(&mut self) -> Option<Token> {
        let token = Lexer::next(self);
        if token.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}
