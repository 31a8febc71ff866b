// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

//! A streaming parser for RFC 1035 zone files (master files).
//!
//! The parser is a two-stage pipeline: a byte-level lexer normalizes the
//! master file syntax (quoting, escapes, parenthesized line continuations,
//! comments) into a token stream, and a grammar walks that stream to
//! produce resource records one at a time. The `$ORIGIN`, `$TTL`,
//! `$INCLUDE` and `$GENERATE` directives are supported.
//!
//! Records are pulled from a [`ZoneParser`], either through
//! [`ZoneParser::next_rr`] or through its [`Iterator`] implementation:
//!
//! ```
//! use masterfile::ZoneParser;
//!
//! let zone = "$ORIGIN example.org.\n$TTL 1h\n@ IN A 10.0.0.1 ; v4\nwww CNAME @\n";
//!
//! for entry in ZoneParser::new(zone.as_bytes(), None, "db.example.org") {
//!     let entry = entry.unwrap();
//!     println!("{}\t{}", entry.record, entry.comment);
//! }
//! ```
//!
//! A single record in a string parses with [`parse_record`]:
//!
//! ```
//! use masterfile::parse_record;
//!
//! let record = parse_record("foo.example.org. 300 IN A 10.0.0.1").unwrap().unwrap();
//! assert_eq!(record.ttl(), 300);
//! assert_eq!(record.to_string(), "foo.example.org.\t300\tIN\tA\t10.0.0.1");
//! ```
//!
//! The first error of a session is sticky: the stream ends and
//! [`ZoneParser::err`] keeps reporting that error. Rendered errors carry
//! the file and the offending token's line and column.

use std::io::{Cursor, Read};

pub mod error;
mod generate;
mod lexer;
mod parser;
mod rdata_parsers;
pub mod rr;

pub use error::{LexerError, LexerErrorKind, ParseError, ParseErrorKind, ParseResult};
pub use parser::{Entry, ZoneParser, DEFAULT_TTL};
pub use rr::{DNSClass, Header, Name, RData, Record, RecordType};

/// Reads the record contained in `s`; only the first record is returned.
///
/// If `s` contains no record, `Ok(None)` is returned without an error. The
/// class defaults to IN, the TTL to [`DEFAULT_TTL`], and the initial origin
/// is the root, so relative names resolve. A missing final newline is
/// supplied. The full zone file syntax, directives included, is accepted.
pub fn parse_record(s: &str) -> ParseResult<Option<Record>> {
    if !s.is_empty() && !s.ends_with('\n') {
        // a closing newline is needed
        let mut owned = s.to_string();
        owned.push('\n');
        return read_record(Cursor::new(owned.into_bytes()), "");
    }
    read_record(Cursor::new(s.as_bytes().to_vec()), "")
}

/// Reads the first record from `reader`; see [`parse_record`]. `file` is
/// used in error reporting.
pub fn read_record<R: Read>(reader: R, file: &str) -> ParseResult<Option<Record>> {
    let mut parser = ZoneParser::new(reader, Some("."), file).with_default_ttl(DEFAULT_TTL);
    match parser.next_rr() {
        Some(rr) => Ok(Some(rr)),
        None => match parser.err() {
            Some(e) => Err(e.clone()),
            None => Ok(None),
        },
    }
}
