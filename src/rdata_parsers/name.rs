// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Parser for name-valued rdata: CNAME, NS and PTR targets

use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rr::domain::{self, Name};

/// Parse the RData from a set of tokens
pub(crate) fn parse<'i, I: Iterator<Item = &'i str>>(
    mut tokens: I,
    origin: Option<&Name>,
) -> ParseResult<Name> {
    tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::MissingToken("domain name".to_string())))
        .and_then(|s| parse_one(s, origin))
}

/// Resolves a single name token against the origin, relative names
/// included.
pub(crate) fn parse_one(s: &str, origin: Option<&Name>) -> ParseResult<Name> {
    domain::to_absolute_name(s, origin)
        .ok_or_else(|| ParseError::from(ParseErrorKind::Msg(format!("bad domain name: {s}"))))
}
