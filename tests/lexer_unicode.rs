//! Unicode handling: identifiers beyond ASCII, byte order marks, and
//! rune-counted columns for multi-byte characters.

use golex::{scan, Kind, Token};

fn first_token(input: &str) -> Token<'_> {
    let (tokens, _) = scan(input);
    tokens.into_iter().next().expect("no tokens")
}

#[test]
fn unicode_identifiers() {
    for input in ["a۰۱۸", "foo६४", "bar９８７６", "ŝ", "ŝfoo", "_", "_x9", "Ident_with_۰"] {
        let tok = first_token(input);
        assert_eq!(tok.kind, Kind::IDENT, "{input}");
        assert_eq!(tok.val, input, "{input}");
    }
}

#[test]
fn keywords_never_match_lookalikes() {
    // Only the exact 25 spellings are keywords.
    for input in ["breaker", "iff", "go_", "packages", "Var", "MAP"] {
        assert_eq!(first_token(input).kind, Kind::IDENT, "{input}");
    }
    for input in ["break", "fallthrough", "var"] {
        assert!(first_token(input).kind.is_keyword(), "{input}");
    }
}

#[test]
fn leading_bom_is_invisible() {
    let (tokens, err) = scan("\u{FEFF}");
    assert!(err.is_none());
    assert!(tokens.is_empty());

    // The first token still starts at column 1.
    let (tokens, err) = scan("\u{FEFF}package p\n");
    assert!(err.is_none());
    assert_eq!(tokens[0], Token::new(Kind::PACKAGE, "package", 1, 1));
}

#[test]
fn second_bom_is_an_error() {
    let (tokens, err) = scan("\u{FEFF}\u{FEFF}");
    assert_eq!(err.map(|e| e.to_string()).as_deref(), Some("illegal byte order mark"));
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0], Token::new(Kind::INVALID, "\u{FEFF}", 1, 1));
}

#[test]
fn bom_between_tokens_is_an_error() {
    let (tokens, err) = scan("x \u{FEFF} y\n");
    assert_eq!(err.map(|e| e.to_string()).as_deref(), Some("illegal byte order mark"));
    let kinds: Vec<Kind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, [Kind::IDENT, Kind::INVALID, Kind::IDENT, Kind::SEMICOLON]);
    assert_eq!(tokens[1].col, 3);
}

#[test]
fn columns_count_runes_not_bytes() {
    // δ is two bytes but one column.
    let (tokens, err) = scan("δ := 1\n");
    assert!(err.is_none());
    assert_eq!(tokens[0], Token::new(Kind::IDENT, "δ", 1, 1));
    assert_eq!(tokens[1], Token::new(Kind::DECL_ASSIGN, ":=", 1, 3));
    assert_eq!(tokens[2], Token::new(Kind::INT, "1", 1, 6));
    assert_eq!(tokens[3], Token::new(Kind::SEMICOLON, ";", 1, 7));
}

#[test]
fn wide_runes_in_comments_count_one_column() {
    let (tokens, err) = scan("/* …… */ x");
    assert!(err.is_none());
    assert_eq!(tokens[1], Token::new(Kind::IDENT, "x", 1, 10));
}

#[test]
fn stray_unicode_rune_is_a_syntax_error() {
    let (tokens, err) = scan("…");
    assert_eq!(
        err.map(|e| e.to_string()).as_deref(),
        Some("syntax error: unexpected U+2026 '…'")
    );
    assert_eq!(tokens[0], Token::new(Kind::INVALID, "…", 1, 1));
}
