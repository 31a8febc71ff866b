// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Error types for zone file lexing and parsing.
//!
//! The first error produced by a parse session is sticky: every later call
//! on the same [`crate::ZoneParser`] keeps reporting it.

use std::{fmt, io};

#[cfg(feature = "backtrace")]
pub use backtrace::Backtrace as ExtBacktrace;
#[cfg(feature = "backtrace")]
use once_cell::sync::Lazy;
use thiserror::Error;

use crate::rr::RecordType;

/// Boolean for checking if backtrace is enabled at runtime
#[cfg(feature = "backtrace")]
pub static ENABLE_BACKTRACE: Lazy<bool> = Lazy::new(|| {
    use std::env;
    let bt = env::var("RUST_BACKTRACE");
    matches!(bt.as_ref().map(|s| s as &str), Ok("full") | Ok("1"))
});

/// Generate a backtrace at the call site if enabled.
#[cfg(feature = "backtrace")]
macro_rules! trace {
    () => {{
        use $crate::error::ExtBacktrace as Backtrace;

        if *$crate::error::ENABLE_BACKTRACE {
            Some(Backtrace::new())
        } else {
            None
        }
    }};
}

/// An alias for parse results returned by functions of this crate
pub type ParseResult<T> = ::std::result::Result<T, ParseError>;

/// An alias for lexer results returned by functions of this crate
pub(crate) type LexerResult<T> = ::std::result::Result<T, LexerError>;

/// The error kind for lexer errors that get returned in the crate
#[derive(Eq, PartialEq, Debug, Error, Clone)]
#[non_exhaustive]
pub enum LexerErrorKind {
    /// A `)` without a matching `(`
    #[error("extra closing brace")]
    ExtraClosingBrace,

    /// End of input inside a parenthesized group
    #[error("unbalanced brace")]
    UnbalancedBrace,

    /// A token grew past the fixed token buffer
    #[error("token length insufficient for parsing")]
    TokenTooLong,

    /// A comment grew past the fixed comment buffer
    #[error("comment length insufficient for parsing")]
    CommentTooLong,

    /// A `TYPE<n>` token whose digits do not parse as a u16
    #[error("unknown RR type")]
    UnknownRrType,

    /// A `CLASS<n>` token whose digits do not parse as a u16
    #[error("unknown class")]
    UnknownClass,
}

/// The error type for lexer errors that get returned in the crate.
///
/// Carries the 1-based line and column of the offending byte.
#[derive(Clone, Error, Debug)]
pub struct LexerError {
    kind: LexerErrorKind,
    line: usize,
    column: usize,
    #[cfg(feature = "backtrace")]
    backtrack: Option<ExtBacktrace>,
}

impl LexerError {
    pub(crate) fn new(kind: LexerErrorKind, line: usize, column: usize) -> Self {
        Self {
            kind,
            line,
            column,
            #[cfg(feature = "backtrace")]
            backtrack: trace!(),
        }
    }

    /// Get the kind of the error
    pub fn kind(&self) -> &LexerErrorKind {
        &self.kind
    }

    /// Line of the offending byte, 1-based
    pub fn line(&self) -> usize {
        self.line
    }

    /// Column of the offending byte, 1-based
    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        cfg_if::cfg_if! {
            if #[cfg(feature = "backtrace")] {
                if let Some(backtrace) = &self.backtrack {
                    fmt::Display::fmt(&self.kind, f)?;
                    fmt::Debug::fmt(backtrace, f)
                } else {
                    fmt::Display::fmt(&self.kind, f)
                }
            } else {
                fmt::Display::fmt(&self.kind, f)
            }
        }
    }
}

/// The error kind for parse errors that get returned in the crate
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// An error with an arbitrary message, referenced as &'static str
    #[error("{0}")]
    Message(&'static str),

    /// An error with an arbitrary message, stored as String
    #[error("{0}")]
    Msg(String),

    /// A token is missing
    #[error("token is missing: {0}")]
    MissingToken(String),

    /// The record type has no text-format rdata parser
    #[error("unsupported record type: {0}")]
    UnsupportedRecordType(RecordType),

    // foreign
    /// An address parse error
    #[error("network address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    /// A data encoding error
    #[error("data encoding error: {0}")]
    DataEncoding(#[from] data_encoding::DecodeError),

    /// An error got returned from IO
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// An error from the lexer
    #[error("{0}")]
    Lexer(#[from] LexerError),

    /// A number parsing error
    #[error("error parsing number: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}

impl Clone for ParseErrorKind {
    fn clone(&self) -> Self {
        use ParseErrorKind::*;
        match self {
            Message(msg) => Message(msg),
            Msg(msg) => Msg(msg.clone()),
            MissingToken(s) => MissingToken(s.clone()),
            UnsupportedRecordType(ty) => UnsupportedRecordType(*ty),

            AddrParse(e) => AddrParse(e.clone()),
            DataEncoding(e) => DataEncoding(*e),
            Io(e) => Io(io::Error::from(e.kind())),
            Lexer(e) => Lexer(e.clone()),
            ParseInt(e) => ParseInt(e.clone()),
        }
    }
}

/// The error type for parse errors that get returned in the crate.
///
/// In addition to the error kind this carries the file the error occurred
/// in (empty when the input was not read from a file) and the offending
/// token with its position, so that the rendered form reads
///
/// ```text
/// db.example: dns: not a TTL: "x" at line: 3:7
/// ```
#[derive(Clone, Error, Debug)]
pub struct ParseError {
    file: String,
    kind: ParseErrorKind,
    token: String,
    line: usize,
    column: usize,
    #[cfg(feature = "backtrace")]
    backtrack: Option<ExtBacktrace>,
}

impl ParseError {
    pub(crate) fn new(
        file: impl Into<String>,
        kind: ParseErrorKind,
        token: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            file: file.into(),
            kind,
            token: token.into(),
            line,
            column,
            #[cfg(feature = "backtrace")]
            backtrack: trace!(),
        }
    }

    /// Get the kind of the error
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// The file the error occurred in, empty when none was involved
    pub fn file(&self) -> &str {
        &self.file
    }

    /// The text of the offending token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Line of the offending token, 1-based; 0 when no position is known
    pub fn line(&self) -> usize {
        self.line
    }

    /// Column of the offending token, 1-based; 0 when no position is known
    pub fn column(&self) -> usize {
        self.column
    }

    pub(crate) fn is_unpositioned(&self) -> bool {
        self.token.is_empty() && self.line == 0 && self.column == 0
    }

    pub(crate) fn reposition(&mut self, token: impl Into<String>, line: usize, column: usize) {
        self.token = token.into();
        self.line = line;
        self.column = column;
    }

    pub(crate) fn set_file(&mut self, file: &str) {
        if self.file.is_empty() {
            self.file = file.to_string();
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.file.is_empty() {
            write!(f, "{}: ", self.file)?;
        }
        write!(
            f,
            "dns: {}: \"{}\" at line: {}:{}",
            self.kind,
            self.token.escape_default(),
            self.line,
            self.column
        )?;

        cfg_if::cfg_if! {
            if #[cfg(feature = "backtrace")] {
                if let Some(backtrace) = &self.backtrack {
                    fmt::Debug::fmt(backtrace, f)?;
                }
            }
        }

        Ok(())
    }
}

impl From<ParseErrorKind> for ParseError {
    fn from(kind: ParseErrorKind) -> Self {
        Self::new(String::new(), kind, String::new(), 0, 0)
    }
}

impl From<&'static str> for ParseError {
    fn from(msg: &'static str) -> Self {
        ParseErrorKind::Message(msg).into()
    }
}

impl From<String> for ParseError {
    fn from(msg: String) -> Self {
        ParseErrorKind::Msg(msg).into()
    }
}

impl From<std::net::AddrParseError> for ParseError {
    fn from(e: std::net::AddrParseError) -> Self {
        ParseErrorKind::from(e).into()
    }
}

impl From<data_encoding::DecodeError> for ParseError {
    fn from(e: data_encoding::DecodeError) -> Self {
        ParseErrorKind::from(e).into()
    }
}

impl From<std::num::ParseIntError> for ParseError {
    fn from(e: std::num::ParseIntError) -> Self {
        ParseErrorKind::from(e).into()
    }
}

impl From<LexerError> for ParseError {
    fn from(e: LexerError) -> Self {
        // the lexer reports its message as the token text, so the rendered
        // error repeats it in both positions, as the original did
        let (token, line, column) = (e.kind().to_string(), e.line(), e.column());
        Self::new(String::new(), ParseErrorKind::Lexer(e), token, line, column)
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        ParseErrorKind::from(e).into()
    }
}

impl From<ParseError> for io::Error {
    fn from(e: ParseError) -> Self {
        Self::new(io::ErrorKind::Other, e)
    }
}
