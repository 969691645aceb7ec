//! CSS token types per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
//!
//! "The output of the tokenization step is a stream of zero or more of the
//! following tokens: `<ident-token>`, `<function-token>`, `<at-keyword-token>`,
//! `<hash-token>`, `<string-token>`, `<bad-string-token>`, `<url-token>`,
//! `<bad-url-token>`, `<delim-token>`, `<number-token>`, `<percentage-token>`,
//! `<dimension-token>`, `<whitespace-token>`, `<CDO-token>`, `<CDC-token>`,
//! `<colon-token>`, `<semicolon-token>`, `<comma-token>`, `<[-token>`,
//! `<]-token>`, `<(-token>`, `<)-token>`, `<{-token>`, and `<}-token>`."
//!
//! On top of the standard set this tokenizer also emits comment tokens, the
//! Selectors match-operator tokens (`~=`, `|=`, `^=`, `$=`, `*=`, `||`) and
//! `<unicode-range-token>`, so that every consumed code point is visible to
//! the caller.

use serde::Serialize;
use strum_macros::Display;

use crate::decode::decode_token;

/// The kind of a token. Each variant's `Display` form is its one-word
/// CamelCase name (`Ident`, `LeftParenthesis`, `UnicodeRange`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize)]
pub enum TokenType {
    /// Sentinel kind, never produced by the lexer. It only exists so that a
    /// `Token` has a meaningful `Default`.
    #[default]
    Default,

    /// "`<ident-token>`"
    Ident,
    /// "`<function-token>`" - the raw text includes the trailing `(`
    Function,
    /// "`<at-keyword-token>`" - the raw text includes the leading `@`
    AtKeyword,
    /// "`<hash-token>`" - the raw text includes the leading `#`
    Hash,
    /// "`<string-token>`" - the raw text includes the surrounding quotes
    String,
    /// "`<bad-string-token>`" - a string interrupted by an unescaped newline
    BadString,
    /// "`<url-token>`" - the raw text spans `url(` through `)`
    Url,
    /// "`<bad-url-token>`"
    BadUrl,
    /// "`<delim-token>`" - a single code point with no richer meaning
    Delimiter,
    /// "`<number-token>`"
    Number,
    /// "`<percentage-token>`" - the raw text includes the trailing `%`
    Percentage,
    /// "`<dimension-token>`" - the raw text includes the unit
    Dimension,
    /// "`<whitespace-token>`" - one or more whitespace code points, verbatim
    Whitespace,
    /// "`<CDO-token>`" - `<!--`
    CDO,
    /// "`<CDC-token>`" - `-->`
    CDC,
    /// "`<colon-token>`"
    Colon,
    /// "`<semicolon-token>`"
    Semicolon,
    /// "`<comma-token>`"
    Comma,
    /// "`<(-token>`"
    LeftParenthesis,
    /// "`<)-token>`"
    RightParenthesis,
    /// "`<[-token>`"
    LeftBracket,
    /// "`<]-token>`"
    RightBracket,
    /// "`<{-token>`"
    LeftBrace,
    /// "`<}-token>`"
    RightBrace,
    /// End of input. Returned forever once the input is exhausted.
    EOF,

    /// A `/* ... */` comment, including the delimiters. The closing `*/` is
    /// missing from the raw text when the input ends inside the comment.
    Comment,
    /// `~=`
    IncludeMatch,
    /// `|=`
    DashMatch,
    /// `^=`
    PrefixMatch,
    /// `$=`
    SuffixMatch,
    /// `*=`
    SubstringMatch,
    /// `||`, the [column combinator](https://www.w3.org/TR/selectors-4/#the-column-combinator)
    Column,
    /// `U+26?`, `u+0-7f` and friends
    UnicodeRange,
}

/// A single token: its kind and the exact source text it was consumed from.
///
/// `raw` keeps every delimiter the lexer advanced over, so concatenating the
/// raw text of all non-EOF tokens reproduces the input exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The kind of the token.
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// The source text consumed for this token.
    pub raw: String,
}

impl Token {
    /// Create a token from a kind and its raw text.
    #[must_use]
    pub fn new(token_type: TokenType, raw: impl Into<String>) -> Self {
        Self {
            token_type,
            raw: raw.into(),
        }
    }

    /// The token produced once the input is exhausted.
    #[must_use]
    pub fn eof() -> Self {
        Self {
            token_type: TokenType::EOF,
            raw: String::new(),
        }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.token_type == TokenType::EOF
    }

    /// Returns true if this is a whitespace token.
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        self.token_type == TokenType::Whitespace
    }

    /// The semantic value of the token: the raw text with escape sequences
    /// resolved and, for string and url tokens, the outer delimiters
    /// stripped or normalized. See [`decode_token`].
    #[must_use]
    pub fn decode(&self) -> String {
        decode_token(self.token_type, &self.raw)
    }
}
