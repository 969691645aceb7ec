//! JSON-driven conformance tests.
//!
//! Walks the two-level `tests/conformance/<category>/<id>/` tree. Each leaf
//! directory holds a `source.css` (raw UTF-8 input) and a `tokens.json` (the
//! expected `{type, raw}` sequence, using the CSS specification's hyphenated
//! token names). The `fuzz` category holds crash-corpus inputs without
//! expectations and is skipped.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use csslex::{Input, Lexer, TokenType};

/// One expected token from a `tokens.json` file.
#[derive(Debug, Deserialize)]
struct ExpectedToken {
    #[serde(rename = "type")]
    token_type: String,
    raw: String,
}

/// Map the specification's hyphenated token names to [`TokenType`].
fn token_type_from_name(name: &str) -> TokenType {
    match name {
        "ident-token" => TokenType::Ident,
        "function-token" => TokenType::Function,
        "at-keyword-token" => TokenType::AtKeyword,
        "hash-token" => TokenType::Hash,
        "string-token" => TokenType::String,
        "bad-string-token" => TokenType::BadString,
        "url-token" => TokenType::Url,
        "bad-url-token" => TokenType::BadUrl,
        "delim-token" => TokenType::Delimiter,
        "number-token" => TokenType::Number,
        "percentage-token" => TokenType::Percentage,
        "dimension-token" => TokenType::Dimension,
        "whitespace-token" => TokenType::Whitespace,
        "CDO-token" => TokenType::CDO,
        "CDC-token" => TokenType::CDC,
        "colon-token" => TokenType::Colon,
        "semicolon-token" => TokenType::Semicolon,
        "comma-token" => TokenType::Comma,
        "(-token" => TokenType::LeftParenthesis,
        ")-token" => TokenType::RightParenthesis,
        "[-token" => TokenType::LeftBracket,
        "]-token" => TokenType::RightBracket,
        "{-token" => TokenType::LeftBrace,
        "}-token" => TokenType::RightBrace,
        "comment" => TokenType::Comment,
        "include-match-token" => TokenType::IncludeMatch,
        "dash-match-token" => TokenType::DashMatch,
        "prefix-match-token" => TokenType::PrefixMatch,
        "suffix-match-token" => TokenType::SuffixMatch,
        "substring-match-token" => TokenType::SubstringMatch,
        "column-token" => TokenType::Column,
        "unicode-range-token" => TokenType::UnicodeRange,
        other => panic!("unknown token type name in tokens.json: {other:?}"),
    }
}

/// Run one `<category>/<id>` case.
fn run_case(case_dir: &Path) {
    let source = fs::read(case_dir.join("source.css"))
        .unwrap_or_else(|e| panic!("reading {}/source.css: {e}", case_dir.display()));
    let tokens_json = fs::read_to_string(case_dir.join("tokens.json"))
        .unwrap_or_else(|e| panic!("reading {}/tokens.json: {e}", case_dir.display()));
    let expected: Vec<ExpectedToken> = serde_json::from_str(&tokens_json)
        .unwrap_or_else(|e| panic!("parsing {}/tokens.json: {e}", case_dir.display()));

    let mut lexer = Lexer::new(Input::from_bytes(&source));

    for (i, expected_token) in expected.iter().enumerate() {
        let token = lexer.next();
        let expected_type = token_type_from_name(&expected_token.token_type);
        assert_eq!(
            token.token_type,
            expected_type,
            "{}: token {i}: expected {} (raw {:?}), got {} (raw {:?})",
            case_dir.display(),
            expected_token.token_type,
            expected_token.raw,
            token.token_type,
            token.raw,
        );
        assert_eq!(
            token.raw,
            expected_token.raw,
            "{}: token {i} ({}) raw mismatch",
            case_dir.display(),
            expected_token.token_type,
        );
    }

    let trailing = lexer.next();
    assert!(
        trailing.is_eof(),
        "{}: expected EOF after {} tokens, got {} (raw {:?})",
        case_dir.display(),
        expected.len(),
        trailing.token_type,
        trailing.raw,
    );
}

#[test]
fn conformance() {
    let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/conformance");
    assert!(data_dir.is_dir(), "missing test data: {}", data_dir.display());

    let mut cases = 0;
    for category in fs::read_dir(&data_dir).expect("reading conformance dir") {
        let category = category.expect("reading category entry").path();
        if !category.is_dir() {
            continue;
        }
        if category.file_name().map(|n| n == "fuzz").unwrap_or(false) {
            continue;
        }
        for case in fs::read_dir(&category).expect("reading category dir") {
            let case = case.expect("reading case entry").path();
            if !case.is_dir() {
                continue;
            }
            run_case(&case);
            cases += 1;
        }
    }

    assert!(cases > 0, "no conformance cases found");
}
