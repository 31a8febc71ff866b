// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! A Lexer for zone files.
//!
//! The lexer normalizes the RFC 1035 master file syntax into a flat token
//! stream: it collapses runs of blanks, hides newlines inside parenthesized
//! groups, splits comments from content and reattaches them to the logical
//! line end, and classifies tokens as owner names, record types, classes or
//! `$`-directives so the grammar can drive a small state machine.

use std::io::{self, BufReader, Read};
use std::str::FromStr;

use crate::error::{LexerError, LexerErrorKind, LexerResult};
use crate::rr::{DNSClass, RecordType};

/// Largest token (and comment) we can return.
pub(crate) const MAX_TOK: usize = 2048;

/// The kind of a [`Token`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// End of input; also the zero value used for position-less errors
    #[default]
    Eof,
    /// A run of non-separator characters
    String,
    /// A collapsed run of spaces and tabs, text is a single space
    Blank,
    /// A `"`, emitted separately so the grammar sees the delimiters
    Quote,
    /// A logical line end; carries the trailing comment of the line
    Newline,
    /// The first string of a line that starts in column 0
    Owner,
    /// A string matching a record type mnemonic or `TYPE<n>`
    RrType,
    /// A string matching a class mnemonic or `CLASS<n>`
    Class,
    /// `$ORIGIN` at owner position
    DirOrigin,
    /// `$TTL` at owner position
    DirTtl,
    /// `$INCLUDE` at owner position
    DirInclude,
    /// `$GENERATE` at owner position
    DirGenerate,
}

/// One token of a zone file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    /// The literal source text, quotes stripped but escapes preserved
    pub(crate) text: String,
    /// The type or class code when `kind` is `RrType` or `Class`
    pub(crate) torc: u16,
    /// Line of the byte that completed the token, 1-based
    pub(crate) line: usize,
    /// Column of the byte that completed the token, 1-based
    pub(crate) column: usize,
    /// Trailing same-line comment, only ever set on `Newline` tokens
    pub(crate) comment: String,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            torc: 0,
            line,
            column,
            comment: String::new(),
        }
    }
}

/// A Lexer for zone files
pub(crate) struct Lexer<R: Read> {
    rdr: BufReader<R>,
    read_err: Option<io::Error>,
    seen_eof: bool,

    line: usize,
    column: usize,
    /// an end-of-line was read; applying it to the counters is deferred to
    /// the next byte so tokens ending at the newline report the line they
    /// started on
    eol: bool,

    /// comment carried across a parenthesized line continuation
    com: String,

    /// open parenthesis depth; newlines are swallowed while positive
    brace: usize,
    quote: bool,
    /// a blank was just emitted, suppresses further blanks
    space: bool,
    /// inside a comment
    commt: bool,
    /// an rrtype was seen on this line, disables type/class promotion
    rrtype: bool,
    /// the next string starts a line in column 0 and becomes an owner
    owner: bool,

    /// one-token lookahead for the cases where a single byte ends two tokens
    lookahead: Option<Token>,

    /// sticky lexical error
    err: Option<LexerError>,
}

impl<R: Read> Lexer<R> {
    /// Creates a new lexer over the reader
    pub(crate) fn new(reader: R) -> Self {
        Self {
            rdr: BufReader::new(reader),
            read_err: None,
            seen_eof: false,
            line: 1,
            column: 0,
            eol: false,
            com: String::new(),
            brace: 0,
            quote: false,
            space: false,
            commt: false,
            rrtype: false,
            owner: true,
            lookahead: None,
            err: None,
        }
    }

    /// Takes the underlying reader's error, if reading failed. End of input
    /// is not an error.
    pub(crate) fn take_read_err(&mut self) -> Option<io::Error> {
        self.read_err.take()
    }

    /// Returns the next byte, applying the deferred line accounting.
    fn read_byte(&mut self) -> Option<u8> {
        if self.seen_eof || self.read_err.is_some() {
            return None;
        }

        let mut buf = [0u8; 1];
        loop {
            match self.rdr.read(&mut buf) {
                Ok(0) => {
                    self.seen_eof = true;
                    return None;
                }
                Ok(_) => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.read_err = Some(e);
                    return None;
                }
            }
        }

        if self.eol {
            self.line += 1;
            self.column = 0;
            self.eol = false;
        }

        let c = buf[0];
        if c == b'\n' {
            self.eol = true;
        } else {
            self.column += 1;
        }

        Some(c)
    }

    fn set_err(&mut self, kind: LexerErrorKind, line: usize, column: usize) -> LexerError {
        let e = LexerError::new(kind, line, column);
        self.err = Some(e.clone());
        e
    }

    /// Classifies a non-owner string: promotes record type and class
    /// mnemonics and their `TYPE<n>`/`CLASS<n>` numeric forms. Disabled for
    /// the rest of the line once a record type was seen, so rdata that
    /// happens to spell a type name stays a plain string.
    fn classify(&mut self, text: &str, line: usize, column: usize) -> LexerResult<(TokenKind, u16)> {
        if self.rrtype {
            return Ok((TokenKind::String, 0));
        }

        let upper = text.to_ascii_uppercase();
        let mut kind = TokenKind::String;
        let mut torc = 0;

        if let Ok(t) = RecordType::from_str(&upper) {
            kind = TokenKind::RrType;
            torc = t.into();
            self.rrtype = true;
        } else if upper.starts_with("TYPE") {
            match RecordType::parse_numeric(text) {
                Some(t) => {
                    kind = TokenKind::RrType;
                    torc = t;
                    self.rrtype = true;
                }
                None => return Err(self.set_err(LexerErrorKind::UnknownRrType, line, column)),
            }
        }

        if let Ok(c) = DNSClass::from_str(&upper) {
            kind = TokenKind::Class;
            torc = c.into();
        } else if upper.starts_with("CLASS") {
            match DNSClass::parse_numeric(text) {
                Some(c) => {
                    kind = TokenKind::Class;
                    torc = c;
                }
                None => return Err(self.set_err(LexerErrorKind::UnknownClass, line, column)),
            }
        }

        Ok((kind, torc))
    }

    /// Return the next token, or `None` at end of input.
    ///
    /// Lexical errors are sticky: once one is returned every further call
    /// returns the same error.
    pub(crate) fn next_token(&mut self) -> LexerResult<Option<Token>> {
        if let Some(t) = self.lookahead.take() {
            return Ok(Some(t));
        }
        if let Some(err) = &self.err {
            return Err(err.clone());
        }

        let mut str_buf: Vec<u8> = Vec::new();
        let mut com_buf: Vec<u8> = Vec::new();
        let mut escape = false;

        if !self.com.is_empty() {
            com_buf.extend_from_slice(self.com.as_bytes());
            self.com.clear();
        }

        let mut line = self.line;
        let mut column = self.column;

        while let Some(x) = self.read_byte() {
            line = self.line;
            column = self.column;

            if str_buf.len() >= MAX_TOK {
                return Err(self.set_err(LexerErrorKind::TokenTooLong, line, column));
            }
            if com_buf.len() >= MAX_TOK {
                return Err(self.set_err(LexerErrorKind::CommentTooLong, line, column));
            }

            match x {
                b' ' | b'\t' => {
                    if escape || self.quote {
                        // inside quotes or escaped this is legal
                        str_buf.push(x);
                        escape = false;
                        continue;
                    }

                    if self.commt {
                        com_buf.push(x);
                        continue;
                    }

                    let mut ret_l = None;
                    if str_buf.is_empty() {
                        // space directly at the beginning, handled in the grammar
                    } else if self.owner {
                        // the first string of the line becomes the owner
                        let text = String::from_utf8_lossy(&str_buf).into_owned();
                        let kind = match text.to_ascii_uppercase().as_str() {
                            // escaping `$...` starts with a `\` not a `$`, so this works
                            "$TTL" => TokenKind::DirTtl,
                            "$ORIGIN" => TokenKind::DirOrigin,
                            "$INCLUDE" => TokenKind::DirInclude,
                            "$GENERATE" => TokenKind::DirGenerate,
                            _ => TokenKind::Owner,
                        };
                        ret_l = Some(Token::new(kind, text, line, column));
                    } else {
                        let text = String::from_utf8_lossy(&str_buf).into_owned();
                        let (kind, torc) = self.classify(&text, line, column)?;
                        let mut t = Token::new(kind, text, line, column);
                        t.torc = torc;
                        ret_l = Some(t);
                    }

                    self.owner = false;

                    if !self.space {
                        self.space = true;
                        let blank = Token::new(TokenKind::Blank, " ", line, column);
                        match ret_l {
                            None => return Ok(Some(blank)),
                            Some(r) => {
                                self.lookahead = Some(blank);
                                return Ok(Some(r));
                            }
                        }
                    }

                    if let Some(r) = ret_l {
                        return Ok(Some(r));
                    }
                }
                b';' => {
                    if escape || self.quote {
                        str_buf.push(x);
                        escape = false;
                        continue;
                    }

                    self.commt = true;
                    self.com.clear();

                    if com_buf.len() > 1 {
                        // a newline inside braces was seen earlier; join the
                        // delayed comment with a space
                        com_buf.push(b' ');
                    }
                    com_buf.push(b';');

                    if !str_buf.is_empty() {
                        self.com = String::from_utf8_lossy(&com_buf).into_owned();
                        let text = String::from_utf8_lossy(&str_buf).into_owned();
                        return Ok(Some(Token::new(TokenKind::String, text, line, column)));
                    }
                }
                b'\r' => {
                    escape = false;
                    if self.quote {
                        str_buf.push(x);
                    }
                    // discarded outside of quotes
                }
                b'\n' => {
                    escape = false;

                    if self.quote {
                        str_buf.push(x);
                        continue;
                    }

                    if self.commt {
                        self.commt = false;
                        self.rrtype = false;

                        if self.brace == 0 {
                            // not inside braces: ends the comment and the RR
                            self.owner = true;
                            let mut nl = Token::new(TokenKind::Newline, "\n", line, column);
                            nl.comment = String::from_utf8_lossy(&com_buf).into_owned();
                            return Ok(Some(nl));
                        }

                        // keep the comment for the token that ends the group
                        self.com = String::from_utf8_lossy(&com_buf).into_owned();
                        continue;
                    }

                    if self.brace == 0 {
                        let mut ret_l = None;
                        if !str_buf.is_empty() {
                            let text = String::from_utf8_lossy(&str_buf).into_owned();
                            let mut kind = TokenKind::String;
                            let mut torc = 0;
                            if !self.rrtype {
                                if let Ok(t) = RecordType::from_str(&text.to_ascii_uppercase()) {
                                    self.rrtype = true;
                                    kind = TokenKind::RrType;
                                    torc = t.into();
                                }
                            }
                            let mut t = Token::new(kind, text, line, column);
                            t.torc = torc;
                            ret_l = Some(t);
                        }

                        let mut nl = Token::new(TokenKind::Newline, "\n", line, column);
                        nl.comment = std::mem::take(&mut self.com);

                        self.rrtype = false;
                        self.owner = true;

                        match ret_l {
                            Some(r) => {
                                self.lookahead = Some(nl);
                                return Ok(Some(r));
                            }
                            None => return Ok(Some(nl)),
                        }
                    }
                    // inside braces the newline neither ends the line nor
                    // the in-progress token
                }
                b'\\' => {
                    // comments are not escaped, everything is copied
                    if self.commt {
                        com_buf.push(x);
                        continue;
                    }

                    // something already escaped must be in the string
                    if escape {
                        str_buf.push(x);
                        escape = false;
                        continue;
                    }

                    str_buf.push(x);
                    escape = true;
                }
                b'"' => {
                    if self.commt {
                        com_buf.push(x);
                        continue;
                    }

                    if escape {
                        str_buf.push(x);
                        escape = false;
                        continue;
                    }

                    self.space = false;

                    // send any gathered text first, then the quote itself
                    let ret_l = if str_buf.is_empty() {
                        None
                    } else {
                        let text = String::from_utf8_lossy(&str_buf).into_owned();
                        Some(Token::new(TokenKind::String, text, line, column))
                    };

                    let q = Token::new(TokenKind::Quote, "\"", line, column);
                    self.quote = !self.quote;

                    match ret_l {
                        Some(r) => {
                            self.lookahead = Some(q);
                            return Ok(Some(r));
                        }
                        None => return Ok(Some(q)),
                    }
                }
                b'(' | b')' => {
                    if self.commt {
                        com_buf.push(x);
                        continue;
                    }

                    if escape || self.quote {
                        str_buf.push(x);
                        escape = false;
                        continue;
                    }

                    if x == b')' {
                        if self.brace == 0 {
                            return Err(self.set_err(
                                LexerErrorKind::ExtraClosingBrace,
                                line,
                                column,
                            ));
                        }
                        self.brace -= 1;
                    } else {
                        self.brace += 1;
                    }
                }
                _ => {
                    escape = false;

                    if self.commt {
                        com_buf.push(x);
                        continue;
                    }

                    str_buf.push(x);
                    self.space = false;
                }
            }
        }

        // end of input: flush the remainders
        let mut ret_l = None;
        if !str_buf.is_empty() {
            let text = String::from_utf8_lossy(&str_buf).into_owned();
            ret_l = Some(Token::new(TokenKind::String, text, line, column));

            if com_buf.is_empty() {
                return Ok(ret_l);
            }
        }

        if !com_buf.is_empty() {
            let mut nl = Token::new(TokenKind::Newline, "\n", line, column);
            nl.comment = String::from_utf8_lossy(&com_buf).into_owned();

            match ret_l {
                Some(r) => {
                    self.lookahead = Some(nl);
                    return Ok(Some(r));
                }
                None => return Ok(Some(nl)),
            }
        }

        if self.brace != 0 {
            return Err(self.set_err(LexerErrorKind::UnbalancedBrace, line, column));
        }

        Ok(None)
    }
}

#[cfg(test)]
mod lex_test {
    use std::io::Cursor;

    use super::*;

    fn lex(s: &str) -> Lexer<Cursor<Vec<u8>>> {
        Lexer::new(Cursor::new(s.as_bytes().to_vec()))
    }

    fn next(lexer: &mut Lexer<Cursor<Vec<u8>>>) -> Token {
        lexer
            .next_token()
            .expect("unexpected lexer error")
            .expect("unexpected end of input")
    }

    fn kinds(s: &str) -> Vec<TokenKind> {
        let mut lexer = lex(s);
        let mut out = Vec::new();
        while let Some(t) = lexer.next_token().expect("unexpected lexer error") {
            out.push(t.kind);
        }
        out
    }

    #[test]
    fn empty_input() {
        let mut lexer = lex("");
        assert_eq!(lexer.next_token().unwrap(), None);
        assert_eq!(lexer.next_token().unwrap(), None);
    }

    #[test]
    fn blank_line() {
        let mut lexer = lex("\n");
        assert_eq!(next(&mut lexer).kind, TokenKind::Newline);
        assert_eq!(lexer.next_token().unwrap(), None);
    }

    #[test]
    fn owner_and_fields() {
        let mut lexer = lex("foo. IN A 10.0.0.1\n");

        let t = next(&mut lexer);
        assert_eq!(t.kind, TokenKind::Owner);
        assert_eq!(t.text, "foo.");

        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);

        let t = next(&mut lexer);
        assert_eq!(t.kind, TokenKind::Class);
        assert_eq!(t.torc, 1);

        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);

        let t = next(&mut lexer);
        assert_eq!(t.kind, TokenKind::RrType);
        assert_eq!(t.torc, 1);

        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);

        let t = next(&mut lexer);
        assert_eq!(t.kind, TokenKind::String);
        assert_eq!(t.text, "10.0.0.1");

        assert_eq!(next(&mut lexer).kind, TokenKind::Newline);
        assert_eq!(lexer.next_token().unwrap(), None);
    }

    #[test]
    fn leading_blank_suppresses_owner() {
        // an indented line reuses the previous owner; the first string is
        // classified normally instead
        let mut lexer = lex(" A 10.0.0.1\n");
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);
        let t = next(&mut lexer);
        assert_eq!(t.kind, TokenKind::RrType);
        assert_eq!(t.torc, 1);
    }

    #[test]
    fn owner_is_not_promoted() {
        // even a string spelling a type name is an owner in column 0
        let mut lexer = lex("A A 10.0.0.1\n");
        let t = next(&mut lexer);
        assert_eq!(t.kind, TokenKind::Owner);
        assert_eq!(t.text, "A");
    }

    #[test]
    fn directives() {
        let mut lexer = lex("$TTL 3600\n$origin example.org.\n$Include db.sub\n$GENERATE 1-2\n");

        assert_eq!(next(&mut lexer).kind, TokenKind::DirTtl);
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);
        assert_eq!(next(&mut lexer).text, "3600");
        assert_eq!(next(&mut lexer).kind, TokenKind::Newline);

        // case-insensitive, text preserved
        let t = next(&mut lexer);
        assert_eq!(t.kind, TokenKind::DirOrigin);
        assert_eq!(t.text, "$origin");
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);
        assert_eq!(next(&mut lexer).text, "example.org.");
        assert_eq!(next(&mut lexer).kind, TokenKind::Newline);

        assert_eq!(next(&mut lexer).kind, TokenKind::DirInclude);
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);
        assert_eq!(next(&mut lexer).text, "db.sub");
        assert_eq!(next(&mut lexer).kind, TokenKind::Newline);

        assert_eq!(next(&mut lexer).kind, TokenKind::DirGenerate);
    }

    #[test]
    fn numeric_type_and_class() {
        let mut lexer = lex(" TYPE1234 CLASS56 x\n");
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);

        let t = next(&mut lexer);
        assert_eq!(t.kind, TokenKind::RrType);
        assert_eq!(t.torc, 1234);

        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);

        // rrtype was seen, promotion is off for the rest of the line
        let t = next(&mut lexer);
        assert_eq!(t.kind, TokenKind::String);
        assert_eq!(t.text, "CLASS56");
    }

    #[test]
    fn bad_numeric_type() {
        let mut lexer = lex(" TYPEabc x\n");
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);
        let err = lexer.next_token().unwrap_err();
        assert_eq!(*err.kind(), LexerErrorKind::UnknownRrType);

        // sticky
        let err = lexer.next_token().unwrap_err();
        assert_eq!(*err.kind(), LexerErrorKind::UnknownRrType);
    }

    #[test]
    fn promotion_stops_after_rrtype() {
        // "A" in rdata position stays a string
        let mut lexer = lex("foo. MX 10 A\n");
        assert_eq!(next(&mut lexer).kind, TokenKind::Owner);
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);
        assert_eq!(next(&mut lexer).kind, TokenKind::RrType);
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);
        assert_eq!(next(&mut lexer).text, "10");
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);

        let t = next(&mut lexer);
        assert_eq!(t.kind, TokenKind::String);
        assert_eq!(t.text, "A");
    }

    #[test]
    fn newline_promotes_rrtype() {
        // a type name terminated directly by the newline is still promoted
        let mut lexer = lex(" A\n");
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);
        let t = next(&mut lexer);
        assert_eq!(t.kind, TokenKind::RrType);
        assert_eq!(t.torc, 1);
        assert_eq!(next(&mut lexer).kind, TokenKind::Newline);
    }

    #[test]
    fn quoted_strings() {
        let mut lexer = lex("\"hello world\" \"\"\n");

        assert_eq!(next(&mut lexer).kind, TokenKind::Quote);
        let t = next(&mut lexer);
        assert_eq!(t.kind, TokenKind::String);
        assert_eq!(t.text, "hello world");
        assert_eq!(next(&mut lexer).kind, TokenKind::Quote);

        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);
        assert_eq!(next(&mut lexer).kind, TokenKind::Quote);
        assert_eq!(next(&mut lexer).kind, TokenKind::Quote);
        assert_eq!(next(&mut lexer).kind, TokenKind::Newline);
    }

    #[test]
    fn quotes_keep_separators() {
        let mut lexer = lex("\"a;b(c)d\ne\"\n");
        assert_eq!(next(&mut lexer).kind, TokenKind::Quote);
        let t = next(&mut lexer);
        assert_eq!(t.text, "a;b(c)d\ne");
        assert_eq!(next(&mut lexer).kind, TokenKind::Quote);
    }

    #[test]
    fn escapes_are_preserved() {
        let mut lexer = lex("a\\ b c\\;d\n");
        let t = next(&mut lexer);
        assert_eq!(t.kind, TokenKind::Owner);
        assert_eq!(t.text, "a\\ b");
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);
        let t = next(&mut lexer);
        assert_eq!(t.text, "c\\;d");
    }

    #[test]
    fn carriage_returns_dropped() {
        let mut lexer = lex("foo.\r\n");
        let t = next(&mut lexer);
        assert_eq!(t.text, "foo.");
        assert_eq!(next(&mut lexer).kind, TokenKind::Newline);
    }

    #[test]
    fn comment_attached_to_newline() {
        let mut lexer = lex("foo. A 10.0.0.1 ; hi\n");
        assert_eq!(next(&mut lexer).kind, TokenKind::Owner);
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);
        assert_eq!(next(&mut lexer).kind, TokenKind::RrType);
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);
        assert_eq!(next(&mut lexer).text, "10.0.0.1");
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);

        let t = next(&mut lexer);
        assert_eq!(t.kind, TokenKind::Newline);
        assert_eq!(t.comment, "; hi");
    }

    #[test]
    fn comment_only_line() {
        let mut lexer = lex("; a comment\n");
        let t = next(&mut lexer);
        assert_eq!(t.kind, TokenKind::Newline);
        assert_eq!(t.comment, "; a comment");
        assert_eq!(lexer.next_token().unwrap(), None);
    }

    #[test]
    fn trailing_comment_without_newline() {
        let mut lexer = lex("foo ;x");
        assert_eq!(next(&mut lexer).kind, TokenKind::Owner);
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);
        let t = next(&mut lexer);
        assert_eq!(t.kind, TokenKind::Newline);
        assert_eq!(t.comment, ";x");
        assert_eq!(lexer.next_token().unwrap(), None);
    }

    #[test]
    fn braces_swallow_newlines() {
        let mut lexer = lex("foo. ( \n IN \n A \n 10.0.0.1 )\n");

        assert_eq!(next(&mut lexer).kind, TokenKind::Owner);
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);
        assert_eq!(next(&mut lexer).kind, TokenKind::Class);
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);
        assert_eq!(next(&mut lexer).kind, TokenKind::RrType);
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);
        assert_eq!(next(&mut lexer).text, "10.0.0.1");
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);

        // the one and only newline comes after the close
        let t = next(&mut lexer);
        assert_eq!(t.kind, TokenKind::Newline);
        assert_eq!(lexer.next_token().unwrap(), None);
    }

    #[test]
    fn brace_comments_are_joined() {
        let mut lexer = lex("(\n;c1\n;c2\n)\n");
        let t = next(&mut lexer);
        assert_eq!(t.kind, TokenKind::Newline);
        assert_eq!(t.comment, ";c1 ;c2");
    }

    #[test]
    fn extra_closing_brace() {
        let mut lexer = lex(")");
        let err = lexer.next_token().unwrap_err();
        assert_eq!(*err.kind(), LexerErrorKind::ExtraClosingBrace);
        assert_eq!(err.line(), 1);
        assert_eq!(err.column(), 1);

        // sticky
        let err = lexer.next_token().unwrap_err();
        assert_eq!(*err.kind(), LexerErrorKind::ExtraClosingBrace);
    }

    #[test]
    fn unbalanced_brace_at_eof() {
        let mut lexer = lex("foo. ( ");
        assert_eq!(next(&mut lexer).kind, TokenKind::Owner);
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);
        let err = lexer.next_token().unwrap_err();
        assert_eq!(*err.kind(), LexerErrorKind::UnbalancedBrace);
    }

    #[test]
    fn token_length_limit() {
        let long = "a".repeat(MAX_TOK);
        let mut lexer = lex(&format!("{long}\n"));
        let err = lexer.next_token().unwrap_err();
        assert_eq!(*err.kind(), LexerErrorKind::TokenTooLong);

        let fits = "a".repeat(MAX_TOK - 1);
        let mut lexer = lex(&format!("{fits}\n"));
        assert_eq!(next(&mut lexer).text, fits);
    }

    #[test]
    fn comment_length_limit() {
        let long = format!(";{}\n", "c".repeat(MAX_TOK));
        let mut lexer = lex(&long);
        let err = lexer.next_token().unwrap_err();
        assert_eq!(*err.kind(), LexerErrorKind::CommentTooLong);
    }

    #[test]
    fn positions() {
        let mut lexer = lex("a b\nc\n");

        let t = next(&mut lexer);
        assert_eq!((t.line, t.column), (1, 2)); // completed by the blank
        assert_eq!(next(&mut lexer).kind, TokenKind::Blank);

        let t = next(&mut lexer);
        assert_eq!(t.text, "b");
        // ends at the newline, which is accounted to the line it ends
        assert_eq!((t.line, t.column), (1, 3));
        assert_eq!(next(&mut lexer).kind, TokenKind::Newline);

        let t = next(&mut lexer);
        assert_eq!(t.text, "c");
        assert_eq!((t.line, t.column), (2, 1));
    }

    #[test]
    fn classic_soa_group() {
        let mut lexer = lex(
            "@   IN  SOA     VENERA      Action\\.domains (
                 20     ; SERIAL
                 7200   ; REFRESH
                 600    ; RETRY
                 3600000; EXPIRE
                 60)    ; MINIMUM
",
        );

        let texts = [
            "@",
            " ",
            "IN",
            " ",
            "SOA",
            " ",
            "VENERA",
            " ",
            "Action\\.domains",
            " ",
            "20",
            " ",
            "7200",
            " ",
            "600",
            " ",
            "3600000",
            " ",
            "60",
            " ",
        ];
        for expected in texts {
            let t = next(&mut lexer);
            assert_eq!(t.text, expected);
        }

        // the group ends in a single newline carrying all of the interior
        // comments, joined by spaces
        let t = next(&mut lexer);
        assert_eq!(t.kind, TokenKind::Newline);
        assert_eq!(t.comment, "; SERIAL ; REFRESH ; RETRY ; EXPIRE ; MINIMUM");
        assert_eq!(lexer.next_token().unwrap(), None);
    }

    #[test]
    fn kinds_of_simple_zone() {
        use TokenKind::*;
        assert_eq!(
            kinds("$ORIGIN example.org.\n@ IN A 10.0.0.1\n"),
            vec![
                DirOrigin, Blank, String, Newline, Owner, Blank, Class, Blank, RrType, Blank,
                String, Newline
            ]
        );
    }
}
