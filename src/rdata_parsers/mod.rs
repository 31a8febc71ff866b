// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Parsers for the presentation format of each supported record type.

pub(crate) mod a;
pub(crate) mod aaaa;
pub(crate) mod hinfo;
pub(crate) mod mx;
pub(crate) mod name;
pub(crate) mod null;
pub(crate) mod soa;
pub(crate) mod srv;
pub(crate) mod txt;

use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rr::{Name, RData, RecordType};

/// Extension on RData for text parsing
pub(crate) trait RDataParser: Sized {
    /// Attempts to parse a stream of tokenized strs into the RData of the
    /// specified record type
    fn parse<'i, I: Iterator<Item = &'i str>>(
        record_type: RecordType,
        tokens: I,
        origin: Option<&Name>,
    ) -> ParseResult<Self>;
}

impl RDataParser for RData {
    fn parse<'i, I: Iterator<Item = &'i str>>(
        record_type: RecordType,
        tokens: I,
        origin: Option<&Name>,
    ) -> ParseResult<Self> {
        let rdata = match record_type {
            RecordType::A => Self::A(a::parse(tokens)?),
            RecordType::AAAA => Self::AAAA(aaaa::parse(tokens)?),
            RecordType::CNAME => Self::CNAME(name::parse(tokens, origin)?),
            RecordType::HINFO => Self::HINFO(hinfo::parse(tokens)?),
            RecordType::MX => Self::MX(mx::parse(tokens, origin)?),
            RecordType::NS => Self::NS(name::parse(tokens, origin)?),
            RecordType::NULL => {
                // only expressible through the generic form
                return Err(ParseError::from(ParseErrorKind::Message(
                    "NULL rdata requires the RFC 3597 generic form",
                )));
            }
            RecordType::PTR => Self::PTR(name::parse(tokens, origin)?),
            RecordType::SOA => Self::SOA(soa::parse(tokens, origin)?),
            RecordType::SRV => Self::SRV(srv::parse(tokens, origin)?),
            RecordType::TXT => Self::TXT(txt::parse(tokens)?),
            r @ (RecordType::ZERO | RecordType::Unknown(_)) => {
                return Err(ParseError::from(ParseErrorKind::UnsupportedRecordType(r)));
            }
        };

        Ok(rdata)
    }
}
