//! Lexical scanner for Go source text.
//!
//! [`scan`] consumes one UTF-8 input and produces the full token sequence in
//! a single pass, including the synthetic semicolons mandated by Go's
//! automatic semicolon insertion rule. Malformed constructs never abort the
//! scan: each becomes one token carrying [`Kind::INVALID`] plus a diagnostic,
//! and scanning resumes right after it.

use std::borrow::Cow;

use unicode_ident::{is_xid_continue, is_xid_start};

use crate::error::{ErrorKind, LexError};
use crate::token::{lookup, Kind, Token};

const BOM: char = '\u{FEFF}';

const DEC_DIGITS: &str = "0123456789";
const HEX_DIGITS: &str = "0123456789abcdefABCDEF";

/// Scans `input` to completion.
///
/// Returns the ordered token sequence and the first diagnostic encountered,
/// if any. Tokens produced from malformed input stay in the sequence with
/// their invalid flag set, so callers that want every problem can walk the
/// output instead of stopping at the first error.
///
/// ```
/// use golex::{scan, Kind};
///
/// let (tokens, err) = scan("package main\n");
/// assert!(err.is_none());
/// let kinds: Vec<Kind> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds, [Kind::PACKAGE, Kind::IDENT, Kind::SEMICOLON]);
/// ```
pub fn scan(input: &str) -> (Vec<Token<'_>>, Option<LexError>) {
    let mut s = Scanner::new(input);
    s.run();
    (s.tokens, s.first_err)
}

// =============================================================================
// Scanner core
// =============================================================================

/// One in-flight scan. The byte cursors `start`/`pos` delimit the pending
/// token text; `width` remembers the last decoded rune so `backup` can undo
/// exactly one `next`.
struct Scanner<'src> {
    src: &'src str,

    start: usize,
    pos: usize,
    width: usize,

    // Rune-counted position of `pos` and of `start`, plus a one-step undo
    // buffer for `backup`.
    line: u32,
    col: u32,
    prev_line: u32,
    prev_col: u32,
    start_line: u32,
    start_col: u32,

    tokens: Vec<Token<'src>>,
    // End position of each emitted token, index-aligned with `tokens`. The
    // semicolon inserter reads these to place synthetic tokens.
    ends: Vec<(u32, u32)>,
    // Index into `tokens` where the current line began.
    line_start: usize,

    // Pending invalid flag, folded into the kind at the next emit.
    invalid: bool,
    first_err: Option<LexError>,
}

impl<'src> Scanner<'src> {
    fn new(src: &'src str) -> Self {
        Scanner {
            src,
            start: 0,
            pos: 0,
            width: 0,
            line: 1,
            col: 1,
            prev_line: 1,
            prev_col: 1,
            start_line: 1,
            start_col: 1,
            tokens: Vec::new(),
            ends: Vec::new(),
            line_start: 0,
            invalid: false,
            first_err: None,
        }
    }

    /// Decodes the rune at `pos` and advances past it. Returns `None` at end
    /// of input.
    fn next(&mut self) -> Option<char> {
        let Some(c) = self.src[self.pos..].chars().next() else {
            self.width = 0;
            return None;
        };
        self.width = c.len_utf8();
        self.pos += self.width;
        self.prev_line = self.line;
        self.prev_col = self.col;
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    /// Undoes the previous `next`. Valid at most once per `next`.
    fn backup(&mut self) {
        debug_assert!(self.width > 0, "backup without a preceding next");
        self.pos -= self.width;
        self.width = 0;
        self.line = self.prev_line;
        self.col = self.prev_col;
    }

    fn peek(&mut self) -> Option<char> {
        let c = self.next();
        if c.is_some() {
            self.backup();
        }
        c
    }

    /// Consumes one rune if it is a member of `set`.
    fn accept(&mut self, set: &str) -> bool {
        match self.next() {
            Some(c) if set.contains(c) => true,
            Some(_) => {
                self.backup();
                false
            }
            None => false,
        }
    }

    /// Greedy `accept`; true iff at least one rune was consumed.
    fn accept_run(&mut self, set: &str) -> bool {
        let mut any = false;
        while self.accept(set) {
            any = true;
        }
        any
    }

    /// Discards the pending text without emitting a token.
    fn ignore(&mut self) {
        self.start = self.pos;
        self.start_line = self.line;
        self.start_col = self.col;
    }

    fn ignore_run(&mut self, set: &str) {
        self.accept_run(set);
        self.ignore();
    }

    /// Records a diagnostic at the pending token's start position and flags
    /// the token as invalid. Only the first diagnostic of a scan is kept.
    fn error(&mut self, kind: ErrorKind) {
        self.invalid = true;
        if self.first_err.is_none() {
            self.first_err = Some(LexError {
                kind,
                line: self.start_line,
                col: self.start_col,
            });
        }
    }

    /// Appends the pending text as a token of the given kind.
    fn emit(&mut self, kind: Kind) {
        let val = Cow::Borrowed(&self.src[self.start..self.pos]);
        self.push(kind, val);
    }

    /// Like `emit`, but with carriage returns stripped from the stored value.
    /// Used for comments and raw string literals.
    fn emit_stripped(&mut self, kind: Kind) {
        let text = &self.src[self.start..self.pos];
        let val = if text.contains('\r') {
            Cow::Owned(text.replace('\r', ""))
        } else {
            Cow::Borrowed(text)
        };
        self.push(kind, val);
    }

    fn push(&mut self, kind: Kind, val: Cow<'src, str>) {
        let kind = if self.invalid {
            self.invalid = false;
            kind | Kind::INVALID
        } else {
            kind
        };
        self.tokens.push(Token {
            kind,
            val,
            line: self.start_line,
            col: self.start_col,
        });
        self.ends.push((self.line, self.col));
        self.start = self.pos;
        self.start_line = self.line;
        self.start_col = self.col;
    }

    // =========================================================================
    // Semicolon insertion
    // =========================================================================

    /// Runs at every line boundary and at end of input. Walks the current
    /// line's tokens newest to oldest, skips trailing comments, and inserts a
    /// synthetic `;` after the last non-comment token when its kind calls for
    /// one. The semicolon lands before the trailing comments, carrying the
    /// position immediately after the token that triggered it.
    fn insert_semicolon(&mut self) {
        let mut i = self.tokens.len();
        while i > self.line_start {
            let tok = &self.tokens[i - 1];
            if tok.kind.base() == Kind::COMMENT {
                i -= 1;
                continue;
            }
            if tok.kind.can_insert_semi() {
                let (line, col) = self.ends[i - 1];
                self.tokens
                    .insert(i, Token::new(Kind::SEMICOLON, ";", line, col));
                self.ends.insert(i, (line, col));
            }
            return;
        }
    }

    // =========================================================================
    // State machine
    // =========================================================================

    fn run(&mut self) {
        // A byte order mark is tolerated at offset 0 only; it does not count
        // toward the column of the first token.
        if self.src.starts_with(BOM) {
            self.pos = BOM.len_utf8();
            self.start = self.pos;
        }

        loop {
            match self.next() {
                None => {
                    self.insert_semicolon();
                    return;
                }
                Some(' ' | '\t' | '\r') => self.ignore_run(" \t\r"),
                Some('\n') => {
                    self.insert_semicolon();
                    self.line_start = self.tokens.len();
                    self.ignore();
                }

                Some('/') => self.lex_slash(),

                Some('!') => {
                    let kind = if self.accept("=") { Kind::NEQ } else { Kind::NOT };
                    self.emit(kind);
                }
                Some('<') => self.lex_less(),
                Some('>') => self.lex_greater(),
                Some('&') => self.lex_amp(),
                Some('|') => {
                    let kind = if self.accept("|") {
                        Kind::LOR
                    } else if self.accept("=") {
                        Kind::OR_ASSIGN
                    } else {
                        Kind::OR
                    };
                    self.emit(kind);
                }
                Some('=') => {
                    let kind = if self.accept("=") { Kind::EQ } else { Kind::ASSIGN };
                    self.emit(kind);
                }
                Some(':') => {
                    let kind = if self.accept("=") {
                        Kind::DECL_ASSIGN
                    } else {
                        Kind::COLON
                    };
                    self.emit(kind);
                }
                Some('*') => {
                    let kind = if self.accept("=") {
                        Kind::MUL_ASSIGN
                    } else {
                        Kind::MUL
                    };
                    self.emit(kind);
                }
                Some('%') => {
                    let kind = if self.accept("=") {
                        Kind::MOD_ASSIGN
                    } else {
                        Kind::MOD
                    };
                    self.emit(kind);
                }
                Some('^') => {
                    let kind = if self.accept("=") {
                        Kind::XOR_ASSIGN
                    } else {
                        Kind::XOR
                    };
                    self.emit(kind);
                }
                Some('+') => {
                    let kind = if self.accept("+") {
                        Kind::INC
                    } else if self.accept("=") {
                        Kind::ADD_ASSIGN
                    } else {
                        Kind::ADD
                    };
                    self.emit(kind);
                }
                Some('-') => {
                    let kind = if self.accept("-") {
                        Kind::DEC
                    } else if self.accept("=") {
                        Kind::SUB_ASSIGN
                    } else {
                        Kind::SUB
                    };
                    self.emit(kind);
                }

                Some('(') => self.emit(Kind::LPAREN),
                Some('[') => self.emit(Kind::LBRACK),
                Some('{') => self.emit(Kind::LBRACE),
                Some(')') => self.emit(Kind::RPAREN),
                Some(']') => self.emit(Kind::RBRACK),
                Some('}') => self.emit(Kind::RBRACE),
                Some(',') => self.emit(Kind::COMMA),
                Some(';') => self.emit(Kind::SEMICOLON),

                Some('.') => self.lex_dot(),
                Some('0'..='9') => {
                    self.backup();
                    self.lex_number();
                }

                Some('\'') => self.lex_rune(),
                Some('"') => self.lex_string(),
                Some('`') => self.lex_raw_string(),

                Some(BOM) => {
                    self.error(ErrorKind::IllegalBom);
                    self.emit(Kind::INVALID);
                }
                Some(c) if c == '_' || is_xid_start(c) => self.lex_ident(),
                Some(c) => {
                    self.error(ErrorKind::UnexpectedRune(c));
                    self.emit(Kind::INVALID);
                }
            }
        }
    }

    fn lex_less(&mut self) {
        let kind = if self.accept("-") {
            Kind::ARROW
        } else if self.accept("<") {
            if self.accept("=") {
                Kind::SHL_ASSIGN
            } else {
                Kind::SHL
            }
        } else if self.accept("=") {
            Kind::LTE
        } else {
            Kind::LT
        };
        self.emit(kind);
    }

    fn lex_greater(&mut self) {
        let kind = if self.accept(">") {
            if self.accept("=") {
                Kind::SHR_ASSIGN
            } else {
                Kind::SHR
            }
        } else if self.accept("=") {
            Kind::GTE
        } else {
            Kind::GT
        };
        self.emit(kind);
    }

    fn lex_amp(&mut self) {
        let kind = if self.accept("^") {
            if self.accept("=") {
                Kind::CLEAR_ASSIGN
            } else {
                Kind::CLEAR
            }
        } else if self.accept("&") {
            Kind::LAND
        } else if self.accept("=") {
            Kind::AND_ASSIGN
        } else {
            Kind::AND
        };
        self.emit(kind);
    }

    // =========================================================================
    // Comments
    // =========================================================================

    fn lex_slash(&mut self) {
        if self.accept("=") {
            self.emit(Kind::DIV_ASSIGN);
        } else if self.accept("/") {
            self.lex_line_comment();
        } else if self.accept("*") {
            self.lex_general_comment();
        } else {
            self.emit(Kind::DIV);
        }
    }

    /// After `//`: runs to the newline (exclusive) or end of input.
    fn lex_line_comment(&mut self) {
        loop {
            match self.next() {
                None => break,
                Some('\n') => {
                    self.backup();
                    break;
                }
                Some('\0') => self.error(ErrorKind::IllegalNul),
                Some(BOM) => self.error(ErrorKind::IllegalBom),
                Some(_) => {}
            }
        }
        self.emit_stripped(Kind::COMMENT);
    }

    /// After `/*`: runs to the matching `*/`. A general comment spanning a
    /// line break counts as a newline for semicolon insertion.
    fn lex_general_comment(&mut self) {
        let opening_line = self.start_line;
        loop {
            match self.next() {
                None => {
                    self.error(ErrorKind::EofInComment);
                    break;
                }
                Some('*') => {
                    if self.accept("/") {
                        break;
                    }
                }
                Some('\0') => self.error(ErrorKind::IllegalNul),
                Some(BOM) => self.error(ErrorKind::IllegalBom),
                Some(_) => {}
            }
        }
        let spanned_lines = self.line > opening_line;
        self.emit_stripped(Kind::COMMENT);
        if spanned_lines {
            self.insert_semicolon();
            self.line_start = self.tokens.len();
        }
    }

    // =========================================================================
    // Identifiers and keywords
    // =========================================================================

    fn lex_ident(&mut self) {
        while let Some(c) = self.next() {
            if c == '_' || is_xid_continue(c) {
                continue;
            }
            self.backup();
            break;
        }
        let kind = lookup(&self.src[self.start..self.pos]);
        self.emit(kind);
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    /// `.` is shared between floats, the dot delimiter, and `...`; two
    /// consecutive dots are never a prefix of anything, so `..` falls back to
    /// a single dot token.
    fn lex_dot(&mut self) {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => self.lex_fraction(),
            Some('.') if self.src[self.pos..].starts_with("..") => {
                self.next();
                self.next();
                self.emit(Kind::ELLIPSIS);
            }
            _ => self.emit(Kind::DOT),
        }
    }

    /// Entered with nothing consumed and an ASCII digit ahead.
    fn lex_number(&mut self) {
        let mut kind = Kind::INT;
        if self.accept("0") {
            if self.accept("xX") {
                if !self.accept_run(HEX_DIGITS) {
                    self.error(ErrorKind::MissingHexDigits);
                    self.emit(Kind::INT);
                    return;
                }
                if self.accept("i") {
                    kind = Kind::IMAG;
                }
                self.emit(kind);
                return;
            }
            self.accept_run(DEC_DIGITS);
        } else {
            self.accept_run(DEC_DIGITS);
        }
        if self.accept(".") {
            kind = Kind::FLOAT;
            self.accept_run(DEC_DIGITS);
        }
        self.lex_exponent(kind);
    }

    /// Entered with a leading `.` consumed and an ASCII digit ahead.
    fn lex_fraction(&mut self) {
        self.accept_run(DEC_DIGITS);
        self.lex_exponent(Kind::FLOAT);
    }

    fn lex_exponent(&mut self, mut kind: Kind) {
        if self.accept("eE") {
            kind = Kind::FLOAT;
            self.accept("+-");
            if !self.accept_run(DEC_DIGITS) {
                self.error(ErrorKind::MissingExponentDigits);
                self.emit(Kind::FLOAT);
                return;
            }
        }
        if self.accept("i") {
            kind = Kind::IMAG;
        }
        if kind == Kind::INT {
            // A decimal constant with a leading zero is octal; 8 and 9 would
            // only be legal if a dot, exponent or imaginary suffix re-read
            // the text as decimal, which is ruled out here.
            let text = self.src[self.start..self.pos].as_bytes();
            if text.len() > 1 && text[0] == b'0' {
                if let Some(&d) = text.iter().find(|&&b| b == b'8' || b == b'9') {
                    self.error(ErrorKind::InvalidOctalDigit(d as char));
                }
            }
        }
        self.emit(kind);
    }

    // =========================================================================
    // Rune and string literals
    // =========================================================================

    fn lex_rune(&mut self) {
        let mut elems = 0usize;
        loop {
            match self.next() {
                None => {
                    self.error(ErrorKind::EofInRune);
                    self.emit(Kind::RUNE);
                    return;
                }
                Some('\n') => {
                    self.backup();
                    self.error(ErrorKind::NewlineInRune);
                    self.emit(Kind::RUNE);
                    return;
                }
                Some('\'') => break,
                Some('\\') => {
                    elems += 1;
                    if !self.scan_escape('\'') {
                        self.emit(Kind::RUNE);
                        return;
                    }
                }
                Some('\0') => {
                    elems += 1;
                    self.error(ErrorKind::IllegalNul);
                }
                Some(BOM) => {
                    elems += 1;
                    self.error(ErrorKind::IllegalBom);
                }
                Some(_) => elems += 1,
            }
        }
        if elems == 0 {
            self.error(ErrorKind::EmptyRune);
        } else if elems > 1 {
            self.error(ErrorKind::TooManyRunes);
        }
        self.emit(Kind::RUNE);
    }

    fn lex_string(&mut self) {
        loop {
            match self.next() {
                None => {
                    self.error(ErrorKind::EofInString);
                    break;
                }
                Some('\n') => {
                    self.backup();
                    self.error(ErrorKind::NewlineInString);
                    break;
                }
                Some('"') => break,
                Some('\\') => {
                    if !self.scan_escape('"') {
                        break;
                    }
                }
                Some('\0') => self.error(ErrorKind::IllegalNul),
                Some(BOM) => self.error(ErrorKind::IllegalBom),
                Some(_) => {}
            }
        }
        self.emit(Kind::STRING);
    }

    fn lex_raw_string(&mut self) {
        loop {
            match self.next() {
                None => {
                    self.error(ErrorKind::EofInRawString);
                    break;
                }
                Some('`') => break,
                Some('\0') => self.error(ErrorKind::IllegalNul),
                Some(BOM) => self.error(ErrorKind::IllegalBom),
                Some(_) => {}
            }
        }
        self.emit_stripped(Kind::STRING);
    }

    // =========================================================================
    // Escape sequences
    // =========================================================================

    /// Validates one escape sequence after its `\`. `quote` is the closing
    /// delimiter of the enclosing literal; hitting it (or a newline) while
    /// digits are still owed ends the escape early without consuming the
    /// terminator. Returns false when the input ran out, in which case the
    /// caller should emit what it has and stop.
    fn scan_escape(&mut self, quote: char) -> bool {
        let Some(c) = self.next() else {
            self.error(ErrorKind::EofInEscape);
            return false;
        };
        match c {
            'a' | 'b' | 'f' | 'n' | 'r' | 't' | 'v' | '\\' => true,
            c if c == quote => true,
            '0'..='3' => self.scan_octal_digits(quote),
            'x' => self.scan_hex_digits(quote),
            'u' => self.scan_unicode_digits(quote, 4),
            'U' => self.scan_unicode_digits(quote, 8),
            '\n' => {
                self.backup();
                self.error(ErrorKind::UnknownEscape('\n'));
                true
            }
            '\0' => {
                self.error(ErrorKind::IllegalNul);
                true
            }
            BOM => {
                self.error(ErrorKind::IllegalBom);
                true
            }
            c => {
                self.error(ErrorKind::UnknownEscape(c));
                true
            }
        }
    }

    /// Two more octal digits after the lead one; a lead in `0..=3` keeps the
    /// three-digit value within eight bits.
    fn scan_octal_digits(&mut self, quote: char) -> bool {
        let mut n = 1u32;
        while n < 3 {
            match self.next() {
                None => {
                    self.error(ErrorKind::EofInOctalEscape);
                    return false;
                }
                Some('0'..='7') => n += 1,
                Some(c) if c == quote || c == '\n' => {
                    self.backup();
                    self.error(ErrorKind::OctalEscapeTooShort(n));
                    return true;
                }
                Some(c) => {
                    self.error(ErrorKind::NonOctalInEscape(c));
                    return true;
                }
            }
        }
        true
    }

    fn scan_hex_digits(&mut self, quote: char) -> bool {
        let mut n = 0u32;
        while n < 2 {
            match self.next() {
                None => {
                    self.error(ErrorKind::EofInHexEscape);
                    return false;
                }
                Some(c) if c.is_ascii_hexdigit() => n += 1,
                Some(c) if c == quote || c == '\n' => {
                    self.backup();
                    self.error(ErrorKind::HexEscapeTooShort(n));
                    return true;
                }
                Some(c) => {
                    self.error(ErrorKind::NonHexInEscape(c));
                    return true;
                }
            }
        }
        true
    }

    fn scan_unicode_digits(&mut self, quote: char, want: u32) -> bool {
        let mut n = 0u32;
        let mut acc = 0u32;
        while n < want {
            match self.next() {
                None => {
                    self.error(ErrorKind::EofInUnicodeEscape);
                    return false;
                }
                Some(c) if c.is_ascii_hexdigit() => {
                    acc = (acc << 4) | c.to_digit(16).unwrap_or(0);
                    n += 1;
                }
                Some(c) if c == quote || c == '\n' => {
                    self.backup();
                    self.error(ErrorKind::UnicodeEscapeTooShort {
                        expected: want,
                        got: n,
                    });
                    return true;
                }
                Some(c) => {
                    self.error(ErrorKind::NonHexInUnicodeEscape(c));
                    return true;
                }
            }
        }
        if char::from_u32(acc).is_none() {
            // The diagnostic keeps the sign-extended 32-bit pattern, so an
            // eight-F escape reads back as U+FFFFFFFFFFFFFFFF.
            self.error(ErrorKind::InvalidCodePoint(acc as i32 as i64 as u64));
        }
        true
    }
}
