//! Diagnostics reported by the scanner.
//!
//! Message texts are stable: callers (and the test suite) compare them
//! verbatim, so changing a string here is a breaking change.

use thiserror::Error;

/// Renders a rune the way diagnostics quote offending input: `U+0023 '#'`
/// for printable runes, bare `U+0007` for control characters.
fn rune_repr(c: char) -> String {
    if c.is_control() {
        format!("U+{:04X}", c as u32)
    } else {
        format!("U+{:04X} '{}'", c as u32, c)
    }
}

/// The shape of a malformed construct. `Display` yields the exact one-line
/// message associated with the token that carries the invalid flag.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("syntax error: unexpected {}", rune_repr(*.0))]
    UnexpectedRune(char),
    #[error("illegal byte order mark")]
    IllegalBom,
    #[error("illegal NUL character")]
    IllegalNul,

    #[error("empty rune literal or unescaped ' in rune literal")]
    EmptyRune,
    #[error("too many characters in rune literal")]
    TooManyRunes,
    #[error("unexpected newline in rune literal")]
    NewlineInRune,
    #[error("unexpected eof in rune literal")]
    EofInRune,

    #[error("unexpected newline in string literal")]
    NewlineInString,
    #[error("unexpected eof in string literal")]
    EofInString,
    #[error("unexpected eof in raw string literal")]
    EofInRawString,

    #[error("unexpected eof in comment")]
    EofInComment,

    #[error("unexpected eof in escape sequence")]
    EofInEscape,
    #[error("unknown escape sequence {}", rune_repr(*.0))]
    UnknownEscape(char),
    #[error("too few digits in octal escape; expected 3, got {0}")]
    OctalEscapeTooShort(u32),
    #[error("non-octal character {} in octal escape", rune_repr(*.0))]
    NonOctalInEscape(char),
    #[error("unexpected eof in octal escape")]
    EofInOctalEscape,
    #[error("too few digits in hex escape; expected 2, got {0}")]
    HexEscapeTooShort(u32),
    #[error("non-hex character {} in hex escape", rune_repr(*.0))]
    NonHexInEscape(char),
    #[error("unexpected eof in hex escape")]
    EofInHexEscape,
    #[error("too few digits in Unicode escape; expected {expected}, got {got}")]
    UnicodeEscapeTooShort { expected: u32, got: u32 },
    #[error("non-hex character {} in Unicode escape", rune_repr(*.0))]
    NonHexInUnicodeEscape(char),
    #[error("unexpected eof in Unicode escape")]
    EofInUnicodeEscape,
    #[error("invalid Unicode code point U+{0:04X} in escape sequence")]
    InvalidCodePoint(u64),

    #[error("missing digits in hexadecimal constant")]
    MissingHexDigits,
    #[error("invalid digit '{0}' in octal constant")]
    InvalidOctalDigit(char),
    #[error("missing digits in floating-point exponent")]
    MissingExponentDigits,
}

/// A diagnostic anchored at the start position of the token it refers to.
///
/// `Display` renders the bare message so `err.to_string()` matches the
/// texts documented on [`ErrorKind`]; the position fields are for callers
/// that want to format their own `line:col` prefix.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct LexError {
    pub kind: ErrorKind,
    pub line: u32,
    pub col: u32,
}
