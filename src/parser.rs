// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! The zone file grammar: folds the token stream into resource records.

use std::collections::VecDeque;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::rdata_parsers::{null, RDataParser};
use crate::rr::domain::{self, Name};
use crate::rr::{DNSClass, Header, RData, Record, RecordType};

/// The TTL used when a zone supplies none, neither per record nor via `$TTL`.
pub const DEFAULT_TTL: u32 = 3600;

/// Max depth of nested `$INCLUDE`s.
const MAX_INCLUDE_DEPTH: usize = 7;

/// The state necessary to fill in an omitted RR TTL.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TtlState {
    pub(crate) ttl: u32,
    /// set by a `$TTL` directive; explicit per-RR TTLs then no longer
    /// replace the default
    pub(crate) is_by_directive: bool,
}

/// One item of the record stream: the record together with the comment
/// that trailed it on the same line, empty when there was none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The parsed record
    pub record: Record,
    /// The trailing same-line comment, including the leading `;`
    pub comment: String,
}

/// ```text
/// 5.1. Format
///
/// The format of these files is a sequence of entries.  Entries are
/// predominantly line-oriented, though parentheses can be used to continue
/// a list of items across a line boundary, and text literals can contain
/// CRLF within the text.  Any combination of tabs and spaces act as a
/// delimiter between the separate items that make up an entry.  The end of
/// any line in the Zone File can end with a comment.  The comment starts
/// with a ";" (semicolon).
///
/// The following entries are defined:
///
///     <blank>[<comment>]
///
///     $ORIGIN <domain-name> [<comment>]
///
///     $INCLUDE <file-name> [<domain-name>] [<comment>]
///
///     <domain-name><rr> [<comment>]
///
///     <blank><rr> [<comment>]
///
/// The last two forms represent RRs.  If an entry for an RR begins with a
/// blank, then the RR is assumed to be owned by the last stated owner.  If
/// an RR entry begins with a <domain-name>, then the owner name is reset.
///
/// <rr> contents take one of the following forms:
///
///     [<TTL>] [<class>] <type> <RDATA>
///
///     [<class>] [<TTL>] <type> <RDATA>
/// ```
///
/// A pull parser for zone files. Records are produced one at a time by
/// [`Self::next_rr`]; the first error is sticky and available through
/// [`Self::err`]. The parser also implements [`Iterator`], yielding each
/// record together with its trailing comment and, at the end of a failed
/// stream, the sticky error once.
///
/// `$TTL`, `$ORIGIN`, `$INCLUDE` (up to 7 levels deep) and `$GENERATE` are
/// supported.
pub struct ZoneParser<R: Read> {
    lexer: Lexer<R>,

    parse_err: Option<ParseError>,

    origin: Option<Name>,
    file: String,

    defttl: Option<TtlState>,

    h: Header,
    prev_name: Name,

    include_depth: usize,

    sub: Option<Box<ZoneParser<File>>>,
    gen: VecDeque<Record>,

    com: String,
    err_reported: bool,
}

/// States of the RR-prefix grammar; `Bl` states expect the blank between
/// two fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectOwnerDir, // owner name or directive
    ExpectOwnerBl,  // whitespace after the owner name
    ExpectAny,      // rrtype, ttl or class
    ExpectAnyNoClass,
    ExpectAnyNoClassBl,
    ExpectAnyNoTtl,
    ExpectAnyNoTtlBl,
    ExpectRrtype,
    ExpectRrtypeBl,
    ExpectDirTtlBl,
    ExpectDirTtl,
    ExpectDirOriginBl,
    ExpectDirOrigin,
    ExpectDirIncludeBl,
    ExpectDirInclude,
    ExpectDirGenerateBl,
    ExpectDirGenerate,
}

impl<R: Read> ZoneParser<R> {
    /// Creates a parser reading from `reader`.
    ///
    /// `origin` is used as if the file started with an `$ORIGIN` directive;
    /// an empty or absent origin leaves relative owner names unresolvable.
    /// `file` is used in error reporting and to resolve relative `$INCLUDE`
    /// paths.
    pub fn new(reader: R, origin: Option<&str>, file: &str) -> Self {
        let mut parse_err = None;
        let origin = match origin.filter(|o| !o.is_empty()) {
            Some(o) => {
                let o = domain::fqdn(o);
                if domain::is_domain_name(&o) {
                    Some(Name::from_unchecked(o))
                } else {
                    parse_err = Some(ParseError::new(
                        file,
                        ParseErrorKind::Message("bad initial origin name"),
                        "",
                        0,
                        0,
                    ));
                    None
                }
            }
            None => None,
        };

        Self {
            lexer: Lexer::new(reader),
            parse_err,
            origin,
            file: file.to_string(),
            defttl: None,
            h: Header::default(),
            prev_name: Name::default(),
            include_depth: 0,
            sub: None,
            gen: VecDeque::new(),
            com: String::new(),
            err_reported: false,
        }
    }

    /// Presets the default TTL, as if the stream started with `$TTL <ttl>`
    /// that explicit TTLs may still override.
    pub(crate) fn with_default_ttl(mut self, ttl: u32) -> Self {
        self.defttl = Some(TtlState {
            ttl,
            is_by_directive: false,
        });
        self
    }

    /// The sticky error of this session, if any.
    pub fn err(&self) -> Option<&ParseError> {
        if let Some(e) = &self.parse_err {
            return Some(e);
        }

        if let Some(sub) = &self.sub {
            if let Some(e) = sub.err() {
                return Some(e);
            }
        }

        None
    }

    /// The comment that trailed the most recently returned record on the
    /// same line, empty when there was none.
    pub fn comment(&self) -> &str {
        &self.com
    }

    fn set_parse_err(&mut self, kind: ParseErrorKind, l: &Token) -> Option<Record> {
        self.parse_err = Some(ParseError::new(
            self.file.clone(),
            kind,
            l.text.clone(),
            l.line,
            l.column,
        ));
        None
    }

    fn sub_next(&mut self) -> Option<Record> {
        if let Some(sub) = self.sub.as_mut() {
            if let Some(rr) = sub.next_rr() {
                self.com = sub.com.clone();
                return Some(rr);
            }
            self.com = sub.com.clone();
            if sub.err().is_some() {
                // keep the sub so err() finds its error
                return None;
            }
        } else {
            return None;
        }

        // the included stream has ended, dropping it closes its file
        debug!(file = %self.file, "resuming after $INCLUDE");
        self.sub = None;
        self.next_rr()
    }

    /// Returns the next record of the stream, or `None` at its end.
    ///
    /// `None` is returned both for a cleanly finished stream and after an
    /// error; check [`Self::err`] to tell the two apart.
    pub fn next_rr(&mut self) -> Option<Record> {
        self.com.clear();

        if self.parse_err.is_some() {
            return None;
        }
        if self.sub.is_some() {
            return self.sub_next();
        }
        if let Some(rr) = self.gen.pop_front() {
            return Some(rr);
        }

        // 6 possible beginnings of a line, _ is a blank:
        // 0. RrType                           -> everything omitted before the type
        // 1. Owner _ RrType                   -> class and ttl omitted
        // 2. Owner _ String _ RrType          -> class omitted
        // 3. Owner _ String _ Class _ RrType  -> ttl and class
        // 4. Owner _ Class _ RrType           -> ttl omitted
        // 5. Owner _ Class _ String _ RrType  -> ttl and class (reversed)
        // Once the type is known control jumps to the type's rdata parser.

        let mut st = State::ExpectOwnerDir;
        loop {
            let l = match lex_next(&mut self.lexer, &self.file) {
                Ok(l) => l,
                Err(e) => {
                    self.parse_err = Some(e);
                    return None;
                }
            };
            if l.kind == TokenKind::Eof {
                break;
            }

            match st {
                State::ExpectOwnerDir => {
                    if let Some(d) = self.defttl {
                        self.h.ttl = d.ttl;
                    }
                    self.h.dns_class = DNSClass::IN;

                    match l.kind {
                        TokenKind::Newline => {}
                        TokenKind::Owner => {
                            match domain::to_absolute_name(&l.text, self.origin.as_ref()) {
                                Some(name) => {
                                    self.h.name = name.clone();
                                    self.prev_name = name;
                                    st = State::ExpectOwnerBl;
                                }
                                None => {
                                    return self.set_parse_err(
                                        ParseErrorKind::Message("bad owner name"),
                                        &l,
                                    );
                                }
                            }
                        }
                        TokenKind::DirTtl => st = State::ExpectDirTtlBl,
                        TokenKind::DirOrigin => st = State::ExpectDirOriginBl,
                        TokenKind::DirInclude => st = State::ExpectDirIncludeBl,
                        TokenKind::DirGenerate => st = State::ExpectDirGenerateBl,
                        TokenKind::RrType => {
                            self.h.name = self.prev_name.clone();
                            self.h.rr_type = RecordType::from(l.torc);
                            return self.parse_rdata(&l);
                        }
                        TokenKind::Class => {
                            self.h.name = self.prev_name.clone();
                            self.h.dns_class = DNSClass::from(l.torc);
                            st = State::ExpectAnyNoClassBl;
                        }
                        TokenKind::Blank => {
                            // discard; there may be nothing before the type
                        }
                        TokenKind::String => {
                            let ttl = match string_to_ttl(&l.text) {
                                Some(ttl) => ttl,
                                None => {
                                    return self
                                        .set_parse_err(ParseErrorKind::Message("not a TTL"), &l);
                                }
                            };
                            self.h.ttl = ttl;
                            if !self.defttl.map_or(false, |d| d.is_by_directive) {
                                self.defttl = Some(TtlState {
                                    ttl,
                                    is_by_directive: false,
                                });
                            }
                            st = State::ExpectAnyNoTtlBl;
                        }
                        _ => {
                            return self.set_parse_err(
                                ParseErrorKind::Message("syntax error at beginning"),
                                &l,
                            );
                        }
                    }
                }
                State::ExpectOwnerBl => {
                    if l.kind != TokenKind::Blank {
                        return self
                            .set_parse_err(ParseErrorKind::Message("no blank after owner"), &l);
                    }
                    st = State::ExpectAny;
                }
                State::ExpectAny => match l.kind {
                    TokenKind::RrType => {
                        if self.defttl.is_none() {
                            return self.set_parse_err(
                                ParseErrorKind::Message("missing TTL with no previous value"),
                                &l,
                            );
                        }
                        self.h.rr_type = RecordType::from(l.torc);
                        return self.parse_rdata(&l);
                    }
                    TokenKind::Class => {
                        self.h.dns_class = DNSClass::from(l.torc);
                        st = State::ExpectAnyNoClassBl;
                    }
                    TokenKind::String => {
                        let ttl = match string_to_ttl(&l.text) {
                            Some(ttl) => ttl,
                            None => {
                                return self.set_parse_err(ParseErrorKind::Message("not a TTL"), &l);
                            }
                        };
                        self.h.ttl = ttl;
                        if !self.defttl.map_or(false, |d| d.is_by_directive) {
                            self.defttl = Some(TtlState {
                                ttl,
                                is_by_directive: false,
                            });
                        }
                        st = State::ExpectAnyNoTtlBl;
                    }
                    _ => {
                        return self.set_parse_err(
                            ParseErrorKind::Message("expecting RR type, TTL or class, not this..."),
                            &l,
                        );
                    }
                },
                State::ExpectAnyNoClassBl => {
                    if l.kind != TokenKind::Blank {
                        return self
                            .set_parse_err(ParseErrorKind::Message("no blank before class"), &l);
                    }
                    st = State::ExpectAnyNoClass;
                }
                State::ExpectAnyNoTtlBl => {
                    if l.kind != TokenKind::Blank {
                        return self
                            .set_parse_err(ParseErrorKind::Message("no blank before TTL"), &l);
                    }
                    st = State::ExpectAnyNoTtl;
                }
                State::ExpectAnyNoTtl => match l.kind {
                    TokenKind::Class => {
                        self.h.dns_class = DNSClass::from(l.torc);
                        st = State::ExpectRrtypeBl;
                    }
                    TokenKind::RrType => {
                        self.h.rr_type = RecordType::from(l.torc);
                        return self.parse_rdata(&l);
                    }
                    _ => {
                        return self.set_parse_err(
                            ParseErrorKind::Message("expecting RR type or class, not this..."),
                            &l,
                        );
                    }
                },
                State::ExpectAnyNoClass => match l.kind {
                    TokenKind::String => {
                        let ttl = match string_to_ttl(&l.text) {
                            Some(ttl) => ttl,
                            None => {
                                return self.set_parse_err(ParseErrorKind::Message("not a TTL"), &l);
                            }
                        };
                        self.h.ttl = ttl;
                        if !self.defttl.map_or(false, |d| d.is_by_directive) {
                            self.defttl = Some(TtlState {
                                ttl,
                                is_by_directive: false,
                            });
                        }
                        st = State::ExpectRrtypeBl;
                    }
                    TokenKind::RrType => {
                        self.h.rr_type = RecordType::from(l.torc);
                        return self.parse_rdata(&l);
                    }
                    _ => {
                        return self.set_parse_err(
                            ParseErrorKind::Message("expecting RR type or TTL, not this..."),
                            &l,
                        );
                    }
                },
                State::ExpectRrtypeBl => {
                    if l.kind != TokenKind::Blank {
                        return self
                            .set_parse_err(ParseErrorKind::Message("no blank before RR type"), &l);
                    }
                    st = State::ExpectRrtype;
                }
                State::ExpectRrtype => {
                    if l.kind != TokenKind::RrType {
                        return self.set_parse_err(ParseErrorKind::Message("unknown RR type"), &l);
                    }
                    self.h.rr_type = RecordType::from(l.torc);
                    return self.parse_rdata(&l);
                }
                State::ExpectDirTtlBl => {
                    if l.kind != TokenKind::Blank {
                        return self.set_parse_err(
                            ParseErrorKind::Message("no blank after $TTL-directive"),
                            &l,
                        );
                    }
                    st = State::ExpectDirTtl;
                }
                State::ExpectDirTtl => {
                    if l.kind != TokenKind::String {
                        return self.set_parse_err(
                            ParseErrorKind::Message("expecting $TTL value, not this..."),
                            &l,
                        );
                    }
                    if let Err(e) = slurp_remainder(&mut self.lexer, &self.file) {
                        self.parse_err = Some(e);
                        return None;
                    }
                    let ttl = match string_to_ttl(&l.text) {
                        Some(ttl) => ttl,
                        None => {
                            return self.set_parse_err(
                                ParseErrorKind::Message("expecting $TTL value, not this..."),
                                &l,
                            );
                        }
                    };
                    self.defttl = Some(TtlState {
                        ttl,
                        is_by_directive: true,
                    });
                    st = State::ExpectOwnerDir;
                }
                State::ExpectDirOriginBl => {
                    if l.kind != TokenKind::Blank {
                        return self.set_parse_err(
                            ParseErrorKind::Message("no blank after $ORIGIN-directive"),
                            &l,
                        );
                    }
                    st = State::ExpectDirOrigin;
                }
                State::ExpectDirOrigin => {
                    if l.kind != TokenKind::String {
                        return self.set_parse_err(
                            ParseErrorKind::Message("expecting $ORIGIN value, not this..."),
                            &l,
                        );
                    }
                    if let Err(e) = slurp_remainder(&mut self.lexer, &self.file) {
                        self.parse_err = Some(e);
                        return None;
                    }
                    match domain::to_absolute_name(&l.text, self.origin.as_ref()) {
                        Some(name) => self.origin = Some(name),
                        None => {
                            return self
                                .set_parse_err(ParseErrorKind::Message("bad origin name"), &l);
                        }
                    }
                    st = State::ExpectOwnerDir;
                }
                State::ExpectDirIncludeBl => {
                    if l.kind != TokenKind::Blank {
                        return self.set_parse_err(
                            ParseErrorKind::Message("no blank after $INCLUDE-directive"),
                            &l,
                        );
                    }
                    st = State::ExpectDirInclude;
                }
                State::ExpectDirInclude => {
                    if l.kind != TokenKind::String {
                        return self.set_parse_err(
                            ParseErrorKind::Message("expecting $INCLUDE value, not this..."),
                            &l,
                        );
                    }
                    return self.include(&l);
                }
                State::ExpectDirGenerateBl => {
                    if l.kind != TokenKind::Blank {
                        return self.set_parse_err(
                            ParseErrorKind::Message("no blank after $GENERATE-directive"),
                            &l,
                        );
                    }
                    st = State::ExpectDirGenerate;
                }
                State::ExpectDirGenerate => {
                    if l.kind != TokenKind::String {
                        return self.set_parse_err(
                            ParseErrorKind::Message("expecting $GENERATE value, not this..."),
                            &l,
                        );
                    }
                    if let Err(msg) = self.generate(&l) {
                        return self.set_parse_err(ParseErrorKind::Msg(msg), &l);
                    }
                    if let Some(rr) = self.gen.pop_front() {
                        return Some(rr);
                    }
                    st = State::ExpectOwnerDir;
                }
            }
        }

        // Ending here without a type parsed is fine, an empty zone file is
        // still a zone file.
        None
    }

    /// Hands the finished header to the type's rdata parser. `l` is the
    /// token that completed the prefix; its position backs errors that the
    /// rdata layer reports without one.
    fn parse_rdata(&mut self, l: &Token) -> Option<Record> {
        let header = self.h.clone();
        match set_rr(header, &mut self.lexer, self.origin.as_ref(), &self.file) {
            Ok((record, comment)) => {
                self.com = comment;
                Some(record)
            }
            Err(mut e) => {
                if e.is_unpositioned() {
                    e.reposition(l.text.clone(), l.line, l.column);
                }
                e.set_file(&self.file);
                self.parse_err = Some(e);
                None
            }
        }
    }

    /// Opens the `$INCLUDE`d file and suspends this parser behind a child
    /// parser for it. `l` is the token holding the path.
    fn include(&mut self, l: &Token) -> Option<Record> {
        // optionally a new origin follows the filename
        let mut new_origin = self.origin.clone();
        let next = match lex_next(&mut self.lexer, &self.file) {
            Ok(t) => t,
            Err(e) => {
                self.parse_err = Some(e);
                return None;
            }
        };
        match next.kind {
            TokenKind::Blank => {
                let t = match lex_next(&mut self.lexer, &self.file) {
                    Ok(t) => t,
                    Err(e) => {
                        self.parse_err = Some(e);
                        return None;
                    }
                };
                if t.kind == TokenKind::String {
                    match domain::to_absolute_name(&t.text, self.origin.as_ref()) {
                        Some(name) => new_origin = Some(name),
                        None => {
                            return self
                                .set_parse_err(ParseErrorKind::Message("bad origin name"), &t);
                        }
                    }
                }
            }
            TokenKind::Newline | TokenKind::Eof => {}
            _ => {
                return self.set_parse_err(ParseErrorKind::Message("garbage after $INCLUDE"), &next);
            }
        }

        if self.include_depth >= MAX_INCLUDE_DEPTH {
            return self.set_parse_err(ParseErrorKind::Message("too deeply nested $INCLUDE"), l);
        }

        // relative paths resolve against the directory of the including file
        let include_path = Path::new(&l.text);
        let resolved = if include_path.is_absolute() {
            include_path.to_path_buf()
        } else {
            match Path::new(&self.file).parent() {
                Some(dir) => dir.join(include_path),
                None => include_path.to_path_buf(),
            }
        };

        let reader = match File::open(&resolved) {
            Ok(f) => f,
            Err(_) => {
                let mut msg = format!("failed to open `{}'", l.text);
                if !include_path.is_absolute() {
                    msg += &format!(" as `{}'", resolved.display());
                }
                return self.set_parse_err(ParseErrorKind::Msg(msg), l);
            }
        };

        debug!(file = %resolved.display(), "following $INCLUDE");

        let resolved = resolved.to_string_lossy().into_owned();
        let mut sub = Box::new(ZoneParser::new(
            reader,
            new_origin.as_ref().map(|n| n.as_str()),
            &resolved,
        ));
        sub.defttl = self.defttl;
        sub.include_depth = self.include_depth + 1;
        self.sub = Some(sub);

        self.sub_next()
    }

    pub(crate) fn queue_generated(&mut self, rr: Record) {
        self.gen.push_back(rr);
    }

    pub(crate) fn origin(&self) -> Option<&Name> {
        self.origin.as_ref()
    }

    pub(crate) fn lexer_mut(&mut self) -> &mut Lexer<R> {
        &mut self.lexer
    }
}

impl<R: Read> Iterator for ZoneParser<R> {
    type Item = ParseResult<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(record) = self.next_rr() {
            let comment = self.com.clone();
            return Some(Ok(Entry { record, comment }));
        }

        if self.err_reported {
            return None;
        }
        self.err_reported = true;
        self.err().cloned().map(Err)
    }
}

/// Pulls one token, turning end of input into an EOF token (matching the
/// grammar, which treats EOF like a line end in several places) and reader
/// failures into errors.
fn lex_next<R: Read>(lexer: &mut Lexer<R>, file: &str) -> ParseResult<Token> {
    match lexer.next_token() {
        Ok(Some(t)) => Ok(t),
        Ok(None) => match lexer.take_read_err() {
            Some(e) => Err(ParseError::new(file, ParseErrorKind::Io(e), "", 0, 0)),
            None => Ok(Token::default()),
        },
        Err(e) => {
            let mut pe = ParseError::from(e);
            pe.set_file(file);
            Err(pe)
        }
    }
}

/// Eats the rest of the logical line, returning its trailing comment.
/// Anything besides an optional blank before the line end is an error.
pub(crate) fn slurp_remainder<R: Read>(lexer: &mut Lexer<R>, file: &str) -> ParseResult<String> {
    let l = lex_next(lexer, file)?;
    match l.kind {
        TokenKind::Blank => {
            let l = lex_next(lexer, file)?;
            match l.kind {
                TokenKind::Newline | TokenKind::Eof => Ok(l.comment),
                _ => Err(ParseError::new(
                    file,
                    ParseErrorKind::Message("garbage after rdata"),
                    l.text,
                    l.line,
                    l.column,
                )),
            }
        }
        TokenKind::Newline => Ok(l.comment),
        TokenKind::Eof => Ok(String::new()),
        _ => Err(ParseError::new(
            file,
            ParseErrorKind::Message("garbage after rdata"),
            l.text,
            l.line,
            l.column,
        )),
    }
}

/// Parses the rdata for the header's type from the remainder of the
/// current logical line and returns the finished record together with the
/// line's trailing comment.
///
/// Quoted character-strings arrive from the lexer as QUOTE-delimited
/// strings; the quotes are folded away here and `""` becomes an empty
/// string. If the first rdata token is `\#` the RFC 3597 generic form is
/// accepted for any record type.
pub(crate) fn set_rr<R: Read>(
    header: Header,
    lexer: &mut Lexer<R>,
    origin: Option<&Name>,
    file: &str,
) -> ParseResult<(Record, String)> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut comment = String::new();
    let mut in_quote = false;
    let mut quoted_data = false;

    loop {
        let l = lex_next(lexer, file)?;
        match l.kind {
            TokenKind::Eof => break,
            TokenKind::Newline => {
                comment = l.comment;
                break;
            }
            TokenKind::Blank => {}
            TokenKind::Quote => {
                if in_quote && !quoted_data {
                    // `""` is an empty character-string
                    let mut empty = Token::default();
                    empty.kind = TokenKind::String;
                    empty.line = l.line;
                    empty.column = l.column;
                    tokens.push(empty);
                }
                in_quote = !in_quote;
                quoted_data = false;
            }
            _ => {
                if in_quote {
                    quoted_data = true;
                }
                tokens.push(l);
            }
        }
    }

    let total = tokens.len();
    let mut strings = tokens.iter().map(|t| t.text.as_str());

    let result = if tokens.first().map(|t| t.text.as_str()) == Some("\\#") {
        strings.next(); // the marker itself
        null::parse_rfc3597(&mut strings).map(RData::NULL)
    } else {
        RData::parse(header.rr_type, &mut strings, origin)
    };

    let remaining = strings.len();

    let rdata = match result {
        Ok(rdata) => rdata,
        Err(mut e) => {
            if e.is_unpositioned() {
                if let Some(t) = tokens.first() {
                    e.reposition(t.text.clone(), t.line, t.column);
                }
            }
            e.set_file(file);
            return Err(e);
        }
    };

    if remaining > 0 {
        let garbage = &tokens[total - remaining];
        return Err(ParseError::new(
            file,
            ParseErrorKind::Message("garbage after rdata"),
            garbage.text.clone(),
            garbage.line,
            garbage.column,
        ));
    }

    Ok((Record::from_rdata(header, rdata), comment))
}

/// Parses compound durations like `2w`, `1h30m` or plain `300` into
/// seconds. Unit suffixes are `s`, `m`, `h`, `d` and `w`, case-insensitive;
/// a trailing bare number counts as seconds. Overflow wraps.
pub(crate) fn string_to_ttl(token: &str) -> Option<u32> {
    let mut s: u32 = 0;
    let mut i: u32 = 0;
    for c in token.bytes() {
        match c {
            b's' | b'S' => {
                s = s.wrapping_add(i);
                i = 0;
            }
            b'm' | b'M' => {
                s = s.wrapping_add(i.wrapping_mul(60));
                i = 0;
            }
            b'h' | b'H' => {
                s = s.wrapping_add(i.wrapping_mul(60 * 60));
                i = 0;
            }
            b'd' | b'D' => {
                s = s.wrapping_add(i.wrapping_mul(60 * 60 * 24));
                i = 0;
            }
            b'w' | b'W' => {
                s = s.wrapping_add(i.wrapping_mul(60 * 60 * 24 * 7));
                i = 0;
            }
            b'0'..=b'9' => {
                i = i.wrapping_mul(10).wrapping_add(u32::from(c - b'0'));
            }
            _ => return None,
        }
    }
    Some(s.wrapping_add(i))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn parser_with(zone: &str, origin: Option<&str>) -> ZoneParser<Cursor<Vec<u8>>> {
        ZoneParser::new(Cursor::new(zone.as_bytes().to_vec()), origin, "").with_default_ttl(DEFAULT_TTL)
    }

    /// A parser preloaded like the single-record entry points: origin
    /// `example.org.` and the stock default TTL.
    fn parser(zone: &str) -> ZoneParser<Cursor<Vec<u8>>> {
        parser_with(zone, Some("example.org."))
    }

    /// A parser with no default TTL, as a fresh session starts out.
    fn bare(zone: &str) -> ZoneParser<Cursor<Vec<u8>>> {
        ZoneParser::new(
            Cursor::new(zone.as_bytes().to_vec()),
            Some("example.org."),
            "",
        )
    }

    fn collect_all(p: &mut ZoneParser<Cursor<Vec<u8>>>) -> Vec<Record> {
        let mut records = Vec::new();
        while let Some(rr) = p.next_rr() {
            records.push(rr);
        }
        records
    }

    #[test]
    fn record_with_trailing_comment() {
        let mut p = parser("foo. IN A 10.0.0.1 ; hi\n");

        let rr = p.next_rr().unwrap();
        assert_eq!(rr.name().as_str(), "foo.");
        assert_eq!(rr.dns_class(), DNSClass::IN);
        assert_eq!(rr.ttl(), DEFAULT_TTL);
        assert_eq!(rr.rr_type(), RecordType::A);
        assert_eq!(*rr.data(), RData::A("10.0.0.1".parse().unwrap()));
        assert_eq!(p.comment(), "; hi");

        assert!(p.next_rr().is_none());
        assert!(p.err().is_none());
    }

    #[test]
    fn all_six_prefix_shapes() {
        let zone = "\
$TTL 300
foo A 10.0.0.1
 A 10.0.0.2
bar 600 A 10.0.0.3
baz 600 IN A 10.0.0.4
qux IN A 10.0.0.5
quux IN 900 A 10.0.0.6
";
        let mut p = bare(zone);
        let records = collect_all(&mut p);
        assert!(p.err().is_none(), "{:?}", p.err().map(ToString::to_string));

        let summary: Vec<_> = records
            .iter()
            .map(|r| (r.name().as_str().to_string(), r.ttl(), r.dns_class()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("foo.example.org.".to_string(), 300, DNSClass::IN),
                ("foo.example.org.".to_string(), 300, DNSClass::IN),
                ("bar.example.org.".to_string(), 600, DNSClass::IN),
                ("baz.example.org.".to_string(), 600, DNSClass::IN),
                ("qux.example.org.".to_string(), 300, DNSClass::IN),
                ("quux.example.org.".to_string(), 900, DNSClass::IN),
            ]
        );
    }

    #[test]
    fn ttl_directive_sets_default() {
        let mut p = parser("$TTL 1h\nfoo. A 10.0.0.1\n$TTL 2w\nbar. A 10.0.0.2\n");
        let records = collect_all(&mut p);
        assert!(p.err().is_none());
        assert_eq!(records[0].ttl(), 3600);
        assert_eq!(records[1].ttl(), 1209600);
    }

    #[test]
    fn explicit_ttl_becomes_default_without_directive() {
        let mut p = bare("foo. 300 A 10.0.0.1\nbar. A 10.0.0.2\n");
        let records = collect_all(&mut p);
        assert!(p.err().is_none());
        assert_eq!(records[0].ttl(), 300);
        assert_eq!(records[1].ttl(), 300);
    }

    #[test]
    fn explicit_ttl_does_not_override_directive_default() {
        let mut p = bare("$TTL 100\nfoo. 300 A 10.0.0.1\nbar. A 10.0.0.2\n");
        let records = collect_all(&mut p);
        assert!(p.err().is_none());
        assert_eq!(records[0].ttl(), 300);
        assert_eq!(records[1].ttl(), 100);
    }

    #[test]
    fn parenthesized_record() {
        let mut p = parser("foo. (\n IN\n A\n 10.0.0.1 )\n");

        let rr = p.next_rr().unwrap();
        assert_eq!(rr.name().as_str(), "foo.");
        assert_eq!(rr.dns_class(), DNSClass::IN);
        assert_eq!(rr.ttl(), DEFAULT_TTL);
        assert_eq!(*rr.data(), RData::A("10.0.0.1".parse().unwrap()));

        assert!(p.next_rr().is_none());
        assert!(p.err().is_none());
    }

    #[test]
    fn origin_directive_and_at_owner() {
        let mut p = parser_with(
            "$ORIGIN example.com.\n@ IN A 10.0.0.1\nwww A 10.0.0.2\n",
            Some("example.org."),
        );
        let records = collect_all(&mut p);
        assert!(p.err().is_none());
        assert_eq!(records[0].name().as_str(), "example.com.");
        assert_eq!(records[1].name().as_str(), "www.example.com.");
    }

    #[test]
    fn relative_origin_directive() {
        let mut p = parser_with("$ORIGIN sub\nwww A 10.0.0.1\n", Some("example.org."));
        let records = collect_all(&mut p);
        assert!(p.err().is_none());
        assert_eq!(records[0].name().as_str(), "www.sub.example.org.");
    }

    #[test]
    fn garbage_after_rdata_position() {
        let mut p = parser("foo. IN A 10.0.0.1 garbage\n");
        assert!(p.next_rr().is_none());

        let e = p.err().unwrap();
        assert_eq!(e.token(), "garbage");
        assert_eq!(e.line(), 1);
        assert_eq!(e.column(), 26);
        assert!(e.to_string().contains("garbage after rdata"));
    }

    #[test]
    fn not_a_ttl() {
        let mut p = parser("foo. bar A 10.0.0.1\n");
        assert!(p.next_rr().is_none());

        let e = p.err().unwrap();
        assert_eq!(e.token(), "bar");
        assert!(e.to_string().contains("not a TTL"));
    }

    #[test]
    fn missing_ttl_with_no_previous_value() {
        let mut p = bare("foo. A 10.0.0.1\n");
        assert!(p.next_rr().is_none());
        assert!(p
            .err()
            .unwrap()
            .to_string()
            .contains("missing TTL with no previous value"));
    }

    #[test]
    fn errors_are_sticky() {
        let mut p = parser("foo. bar A 10.0.0.1\nok. A 10.0.0.2\n");
        assert!(p.next_rr().is_none());
        let first = p.err().unwrap().to_string();

        // the good record after the error is never produced
        assert!(p.next_rr().is_none());
        assert_eq!(p.err().unwrap().to_string(), first);
    }

    #[test]
    fn iterator_yields_entries_then_sticky_error_once() {
        let entries: Vec<_> = parser("a. A 10.0.0.1 ; one\nb. A 10.0.0.2\n").collect();
        assert_eq!(entries.len(), 2);
        let first = entries[0].as_ref().unwrap();
        assert_eq!(first.record.name().as_str(), "a.");
        assert_eq!(first.comment, "; one");
        assert_eq!(entries[1].as_ref().unwrap().comment, "");

        let items: Vec<_> = parser("foo. bar A 10.0.0.1\n").collect();
        assert_eq!(items.len(), 1);
        assert!(items[0].is_err());
    }

    #[test]
    fn empty_and_blank_inputs() {
        for zone in ["", "\n", " \n", "\n\n", "; only a comment\n", " ; indented comment\n"] {
            let mut p = parser(zone);
            assert!(p.next_rr().is_none(), "{zone:?}");
            assert!(p.err().is_none(), "{zone:?}");
        }
    }

    #[test]
    fn previous_owner_reused_on_indented_lines() {
        let mut p = parser("foo. IN A 10.0.0.1\n IN A 10.0.0.2\n\tA 10.0.0.3\n");
        let records = collect_all(&mut p);
        assert!(p.err().is_none());
        assert_eq!(records.len(), 3);
        for rr in &records {
            assert_eq!(rr.name().as_str(), "foo.");
        }
    }

    #[test]
    fn bad_owner_name() {
        let mut p = parser("foo..bar. IN A 10.0.0.1\n");
        assert!(p.next_rr().is_none());
        assert!(p.err().unwrap().to_string().contains("bad owner name"));
    }

    #[test]
    fn relative_owner_needs_origin() {
        let mut p = parser_with("www IN A 10.0.0.1\n", None);
        assert!(p.next_rr().is_none());
        assert!(p.err().unwrap().to_string().contains("bad owner name"));
    }

    #[test]
    fn directive_errors() {
        for (zone, msg) in [
            ("$TTL\n", "not a TTL"), // never recognized as a directive without a blank
            ("$TTL ;c\n", "expecting $TTL value, not this..."),
            ("$TTL abc\n", "expecting $TTL value, not this..."),
            ("$TTL 3600 extra\n", "garbage after rdata"),
            ("$ORIGIN ;c\n", "expecting $ORIGIN value, not this..."),
            ("$ORIGIN ..\n", "bad origin name"),
            ("$ORIGIN example.com. extra\n", "garbage after rdata"),
            ("$INCLUDE db.x\"\n", "garbage after $INCLUDE"),
        ] {
            let mut p = parser(zone);
            assert!(p.next_rr().is_none(), "{zone:?}");
            let rendered = p.err().expect(zone).to_string();
            assert!(rendered.contains(msg), "{zone:?} -> {rendered}");
        }
    }

    #[test]
    fn quoted_txt_strings() {
        let mut p = parser("foo. IN TXT \"hello world\" \"second\" bare\n");
        let rr = p.next_rr().unwrap();
        let txt = rr.data().as_txt().unwrap();
        assert_eq!(txt.txt_data(), ["hello world", "second", "bare"]);

        let mut p = parser("foo. IN TXT \"\"\n");
        let rr = p.next_rr().unwrap();
        assert_eq!(rr.data().as_txt().unwrap().txt_data(), [""]);
    }

    #[test]
    fn generic_rdata_for_unknown_type() {
        let mut p = parser("foo. IN TYPE65280 \\# 4 0A000001\n");
        let rr = p.next_rr().unwrap();
        assert_eq!(rr.rr_type(), RecordType::Unknown(65280));
        assert_eq!(
            rr.data().as_null().unwrap().anything(),
            &[0x0a, 0x00, 0x00, 0x01]
        );
        assert!(p.err().is_none());
    }

    #[test]
    fn generic_rdata_for_null() {
        let mut p = parser("foo. IN NULL \\# 0\n");
        let rr = p.next_rr().unwrap();
        assert_eq!(rr.rr_type(), RecordType::NULL);
        assert!(rr.data().as_null().unwrap().anything().is_empty());
    }

    #[test]
    fn unknown_type_without_generic_form() {
        let mut p = parser("foo. IN TYPE999 10.0.0.1\n");
        assert!(p.next_rr().is_none());
        assert!(p
            .err()
            .unwrap()
            .to_string()
            .contains("unsupported record type: TYPE999"));
    }

    #[test]
    fn numeric_class() {
        let mut p = parser("foo. CLASS255 A 10.0.0.1\nbar. 300 CLASS4 A 10.0.0.2\n");
        let records = collect_all(&mut p);
        assert!(p.err().is_none());
        assert_eq!(records[0].dns_class(), DNSClass::ANY);
        assert_eq!(records[1].dns_class(), DNSClass::HS);
    }

    #[test]
    fn multiline_soa_with_comments() {
        let zone = "\
@   IN  SOA     ns1     root.example.org. (
            2024010101 ; serial
            3h ; refresh
            15 ; retry
            1w ; expire
            3h ; minimum
        )
";
        let mut p = parser(zone);
        let rr = p.next_rr().unwrap();
        assert_eq!(rr.name().as_str(), "example.org.");

        let soa = rr.data().as_soa().unwrap();
        assert_eq!(soa.mname().as_str(), "ns1.example.org.");
        assert_eq!(soa.rname().as_str(), "root.example.org.");
        assert_eq!(soa.serial(), 2024010101);
        assert_eq!(soa.refresh(), 10800);
        assert_eq!(soa.retry(), 15);
        assert_eq!(soa.expire(), 604800);
        assert_eq!(soa.minimum(), 10800);

        assert_eq!(
            p.comment(),
            "; serial ; refresh ; retry ; expire ; minimum"
        );
        assert!(p.next_rr().is_none());
        assert!(p.err().is_none());
    }

    #[test]
    fn missing_rdata_reports_prefix_position() {
        let mut p = parser("foo. IN A\n");
        assert!(p.next_rr().is_none());

        let e = p.err().unwrap();
        assert_eq!(e.token(), "A");
        assert!(e.to_string().contains("token is missing: ipv4 address"));
    }

    #[test]
    fn lexer_error_propagates() {
        let mut p = parser("foo. IN A 10.0.0.1 )\n");
        assert!(p.next_rr().is_none());

        let e = p.err().unwrap();
        assert!(e.to_string().contains("extra closing brace"));
        assert_eq!(e.line(), 1);
    }

    #[test]
    fn crlf_and_tab_separators() {
        let mut p = parser("foo.\tIN\tA\t10.0.0.1\r\n");
        let rr = p.next_rr().unwrap();
        assert_eq!(*rr.data(), RData::A("10.0.0.1".parse().unwrap()));
        assert!(p.err().is_none());
    }

    #[test]
    fn parse_same_input_twice_is_identical() {
        let zone = "$TTL 1h\nfoo. A 10.0.0.1\nbar. MX 10 mail\n";
        let mut p1 = parser(zone);
        let mut p2 = parser(zone);
        let r1 = collect_all(&mut p1);
        let r2 = collect_all(&mut p2);
        assert_eq!(r1, r2);
        assert!(p1.err().is_none());
        assert!(p2.err().is_none());
    }

    #[test]
    fn bad_initial_origin() {
        let mut p = ZoneParser::new(
            Cursor::new(b"foo. A 10.0.0.1\n".to_vec()),
            Some("not..valid"),
            "db.bad",
        );
        assert!(p.next_rr().is_none());

        let e = p.err().unwrap();
        assert!(e.to_string().contains("bad initial origin name"));
        assert_eq!(e.file(), "db.bad");
    }

    #[test]
    fn ttl_strings() {
        assert_eq!(string_to_ttl("0"), Some(0));
        assert_eq!(string_to_ttl("1"), Some(1));
        assert_eq!(string_to_ttl("1S"), Some(1));
        assert_eq!(string_to_ttl("1m"), Some(60));
        assert_eq!(string_to_ttl("1h"), Some(3600));
        assert_eq!(string_to_ttl("1d"), Some(86400));
        assert_eq!(string_to_ttl("1w"), Some(604800));
        assert_eq!(string_to_ttl("1h30m"), Some(5400));
        assert_eq!(
            string_to_ttl("1s2d3w4h2m"),
            Some(1 + 2 * 86400 + 3 * 604800 + 4 * 3600 + 2 * 60)
        );
        assert_eq!(string_to_ttl("3w3w"), Some(2 * 1814400));
        assert_eq!(string_to_ttl("x"), None);
        assert_eq!(string_to_ttl("1x"), None);
        assert_eq!(string_to_ttl("30 "), None);
    }

    #[test]
    fn rdata_types_round_out() {
        let zone = "\
$TTL 300
a. AAAA ::1
b. CNAME target
c. NS ns1.example.net.
d. PTR host
e. MX 10 mail
f. SRV 0 5 5060 sip
g. HINFO \"AMD64\" \"Linux\"
";
        let mut p = parser(zone);
        let records = collect_all(&mut p);
        assert!(p.err().is_none(), "{:?}", p.err().map(ToString::to_string));
        assert_eq!(records.len(), 7);

        assert_eq!(*records[0].data(), RData::AAAA("::1".parse().unwrap()));
        assert_eq!(records[1].data().as_cname().unwrap().as_str(), "target.example.org.");
        assert_eq!(records[2].data().as_ns().unwrap().as_str(), "ns1.example.net.");
        assert_eq!(records[3].data().as_ptr().unwrap().as_str(), "host.example.org.");

        let mx = records[4].data().as_mx().unwrap();
        assert_eq!((mx.preference(), mx.exchange().as_str()), (10, "mail.example.org."));

        let srv = records[5].data().as_srv().unwrap();
        assert_eq!(srv.port(), 5060);
        assert_eq!(srv.target().as_str(), "sip.example.org.");

        let hinfo = records[6].data().as_hinfo().unwrap();
        assert_eq!((hinfo.cpu(), hinfo.os()), ("AMD64", "Linux"));
    }
}
