// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Parser for HINFO text form

use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rr::rdata::HINFO;

/// Parse the RData from a set of tokens
pub(crate) fn parse<'i, I: Iterator<Item = &'i str>>(mut tokens: I) -> ParseResult<HINFO> {
    let cpu = tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::MissingToken("cpu".to_string())))?
        .to_string();
    let os = tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::MissingToken("os".to_string())))?
        .to_string();

    Ok(HINFO::new(cpu, os))
}
