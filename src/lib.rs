//! Lexical scanner for the Go programming language.
//!
//! One call to [`scan`] turns a UTF-8 source text into the ordered token
//! sequence a Go parser consumes: exact source values, rune-counted line and
//! column positions, and the synthetic semicolons of Go's automatic
//! semicolon insertion rule already embedded. Malformed input never aborts a
//! scan; each bad construct becomes one token with its invalid flag set and
//! the first diagnostic is returned alongside the tokens.
//!
//! ```
//! use golex::{scan, Kind, Token};
//!
//! let (tokens, err) = scan("x := 40 + 2\n");
//! assert!(err.is_none());
//! assert_eq!(tokens[0], Token::new(Kind::IDENT, "x", 1, 1));
//! assert_eq!(tokens.last().unwrap().kind, Kind::SEMICOLON);
//! ```
//!
//! The [`ast`] module holds the node vocabulary a downstream parser would
//! build from this stream; no parser is included.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod token;

pub use error::{ErrorKind, LexError};
pub use lexer::scan;
pub use token::{lookup, Kind, Token};
