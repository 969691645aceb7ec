//! Streaming CSS tokenizer per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization)
//! of the CSS Syntax Module Level 3 specification.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenization** ([§ 4.3 Tokenizer Algorithms](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms))
//!   - All standard token types: ident, function, at-keyword, hash, string,
//!     url, number, percentage, dimension, whitespace, CDO/CDC, punctuation
//!   - Comment tokens, the Selectors match operators (`~=`, `|=`, `^=`,
//!     `$=`, `*=`, `||`) and unicode-range tokens
//!   - Error recovery via bad-string and bad-url tokens; every input yields
//!     a complete token stream terminated by EOF
//! - **Raw slices**: each token carries the exact source text it was
//!   consumed from, so the concatenation of all raw text reproduces the
//!   input byte for byte
//! - **Decoding** ([`decode_token`]): escape resolution and delimiter
//!   stripping, separated from the hot tokenization loop
//!
//! Tokenization never fails. Malformed input surfaces as dedicated token
//! kinds (bad-string, bad-url, lone delimiters), never as an error value.
//!
//! # Example
//!
//! ```
//! use csslex::{Input, Lexer, TokenType};
//!
//! let mut lexer = Lexer::new(Input::new("color: #ff0000;"));
//!
//! let token = lexer.next();
//! assert_eq!(token.token_type, TokenType::Ident);
//! assert_eq!(token.raw, "color");
//!
//! let token = lexer.next();
//! assert_eq!(token.token_type, TokenType::Colon);
//! ```
//!
//! Parsing (rules, declarations, selectors) is out of scope; the token
//! stream is the product.

/// Code-point classification predicates.
mod code_point;
/// Escape resolution from raw token text to semantic values.
pub mod decode;
/// The input cursor: a code-point buffer with lookahead and a token mark.
pub mod input;
/// The tokenizer state machine.
pub mod lexer;
/// Token and token-type definitions.
pub mod token;

pub use decode::decode_token;
pub use input::{Input, InputState};
pub use lexer::Lexer;
pub use token::{Token, TokenType};
