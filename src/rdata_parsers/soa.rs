// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Parser for SOA text form

use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::parser::string_to_ttl;
use crate::rdata_parsers::name;
use crate::rr::domain::Name;
use crate::rr::rdata::SOA;

/// Parse the RData from a set of tokens.
///
/// The serial is a plain decimal number; the four intervals additionally
/// accept the compound duration syntax (`2w`, `8h`, ...).
pub(crate) fn parse<'i, I: Iterator<Item = &'i str>>(
    mut tokens: I,
    origin: Option<&Name>,
) -> ParseResult<SOA> {
    let mname: Name = tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::MissingToken("mname".to_string())))
        .and_then(|s| name::parse_one(s, origin))?;

    let rname: Name = tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::MissingToken("rname".to_string())))
        .and_then(|s| name::parse_one(s, origin))?;

    let serial: u32 = tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::MissingToken("serial".to_string())))
        .and_then(|s| s.parse().map_err(Into::into))?;

    let refresh = next_interval(&mut tokens, "refresh")?;
    let retry = next_interval(&mut tokens, "retry")?;
    let expire = next_interval(&mut tokens, "expire")?;
    let minimum = next_interval(&mut tokens, "minimum")?;

    Ok(SOA::new(
        mname, rname, serial, refresh, retry, expire, minimum,
    ))
}

fn next_interval<'i, I: Iterator<Item = &'i str>>(tokens: &mut I, field: &str) -> ParseResult<u32> {
    let s = tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::MissingToken(field.to_string())))?;
    string_to_ttl(s).ok_or_else(|| ParseError::from(ParseErrorKind::Message("not a TTL")))
}

#[test]
fn test_parse() {
    use std::str::FromStr;

    let soa_tokens = vec![
        "ns1.example.org.",
        "root.example.org.",
        "199609203",
        "8h",
        "120m",
        "7d",
        "24h",
    ];

    let parsed_soa = parse(
        soa_tokens.into_iter(),
        Some(&Name::from_str("example.org.").unwrap()),
    )
    .expect("failed to parse tokens");

    let expected_soa = SOA::new(
        "ns1.example.org.".parse().unwrap(),
        "root.example.org.".parse().unwrap(),
        199609203,
        28800,
        7200,
        604800,
        86400,
    );

    assert_eq!(parsed_soa, expected_soa);
}
