// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! mail exchange, email, record

use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rdata_parsers::name;
use crate::rr::domain::Name;
use crate::rr::rdata::MX;

/// Parse the RData from a set of tokens
pub(crate) fn parse<'i, I: Iterator<Item = &'i str>>(
    mut tokens: I,
    origin: Option<&Name>,
) -> ParseResult<MX> {
    let preference: u16 = tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::MissingToken("preference".to_string())))
        .and_then(|s| s.parse().map_err(Into::into))?;

    let exchange: Name = tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::MissingToken("exchange".to_string())))
        .and_then(|s| name::parse_one(s, origin))?;

    Ok(MX::new(preference, exchange))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn parses_relative_exchange() {
        let origin = Name::from_str("example.org.").unwrap();
        let mx = parse(["10", "mail"].into_iter(), Some(&origin)).unwrap();
        assert_eq!(mx.preference(), 10);
        assert_eq!(mx.exchange().as_str(), "mail.example.org.");
    }

    #[test]
    fn rejects_bad_preference() {
        assert!(parse(["high", "mail.example.org."].into_iter(), None).is_err());
        assert!(parse(["10"].into_iter(), None).is_err());
    }
}
