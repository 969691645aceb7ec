//! Raw token text to semantic value.
//!
//! The lexer leaves escape sequences untouched in the raw text; this module
//! resolves them after the fact. Decoding is total: every `(type, raw)` pair
//! produced by the lexer decodes to some string, and token kinds that cannot
//! carry escapes decode to their raw text verbatim.

use crate::code_point::{escaped_code_point, hex_digit_value, is_css_newline, is_whitespace};
use crate::token::TokenType;

/// Decode a token's raw text into its semantic value.
///
/// - Ident, function, at-keyword, hash and dimension tokens have their
///   escape sequences resolved over the whole raw text (delimiters like the
///   leading `#` or trailing `(` are kept).
/// - String tokens lose their surrounding quotes.
/// - Url tokens keep the `url( ... )` shape, but the prefix is unescaped
///   (`u\72 l(` becomes `url(`) and the interior is trimmed and unescaped.
/// - Everything else is returned verbatim.
#[must_use]
pub fn decode_token(token_type: TokenType, raw: &str) -> String {
    match token_type {
        TokenType::Ident
        | TokenType::Function
        | TokenType::AtKeyword
        | TokenType::Hash
        | TokenType::Dimension => {
            let chars: Vec<char> = raw.chars().collect();
            decode_escape_sequences(&chars)
        }
        TokenType::String => decode_string_token(raw),
        TokenType::Url => decode_url_token(raw),
        _ => raw.to_string(),
    }
}

/// Strip the surrounding quotes, then resolve escapes in the interior.
///
/// Raw text shorter than two code points cannot hold a quote pair and is
/// returned unchanged.
fn decode_string_token(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    if chars.len() < 2 {
        return raw.to_string();
    }
    decode_escape_sequences(&chars[1..chars.len() - 1])
}

/// Unescape the prefix before `(`, trim and unescape the interior, and put
/// the pieces back together.
fn decode_url_token(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    if chars.len() < 2 {
        return raw.to_string();
    }

    let paren = match chars.iter().position(|&c| c == '(') {
        Some(i) => i,
        None => return decode_escape_sequences(&chars),
    };

    let prefix = decode_escape_sequences(&chars[..paren]);

    let mut start = paren + 1;
    let mut end = chars.len();
    if end > start && chars[end - 1] == ')' {
        end -= 1;
    }
    while start < end && is_whitespace(chars[start]) {
        start += 1;
    }
    while end > start && is_whitespace(chars[end - 1]) {
        end -= 1;
    }

    let interior = decode_escape_sequences(&chars[start..end]);
    format!("{prefix}({interior})")
}

/// Scan left to right, replacing each valid escape with its code point.
///
/// A backslash that does not begin a valid escape (before a newline, or as
/// the last code point of the slice) is kept as-is.
fn decode_escape_sequences(chars: &[char]) -> String {
    let mut result = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\\' && i + 1 < chars.len() && !is_css_newline(chars[i + 1]) {
            i += 1;
            result.push(decode_escape(chars, &mut i));
        } else {
            result.push(chars[i]);
            i += 1;
        }
    }
    result
}

/// Decode one escape starting at `chars[*i]` (just past the backslash),
/// advancing `*i` past everything the escape consumed.
///
/// Mirrors the lexer's escape consumer: up to six hex digits followed by one
/// optional whitespace code point (CRLF counts as one), or a single literal
/// code point.
fn decode_escape(chars: &[char], i: &mut usize) -> char {
    let c = chars[*i];

    if c.is_ascii_hexdigit() {
        let mut value = 0;
        let mut digits = 0;
        while digits < 6 && *i < chars.len() && chars[*i].is_ascii_hexdigit() {
            value = value * 16 + hex_digit_value(chars[*i]);
            *i += 1;
            digits += 1;
        }

        if *i < chars.len() && is_whitespace(chars[*i]) {
            if chars[*i] == '\r' && *i + 1 < chars.len() && chars[*i + 1] == '\n' {
                *i += 2;
            } else {
                *i += 1;
            }
        }

        escaped_code_point(value)
    } else {
        *i += 1;
        c
    }
}
