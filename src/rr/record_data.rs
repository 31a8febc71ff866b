// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! record data enum variants

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use enum_as_inner::EnumAsInner;

use crate::rr::domain::Name;
use crate::rr::rdata::{HINFO, MX, NULL, SOA, SRV, TXT};
use crate::rr::record_type::RecordType;

/// Record data enum variants for the record types this crate can parse
/// from presentation format.
///
/// Any other type can still be carried as [`RData::NULL`] through the
/// RFC 3597 generic `\# <length> <hex>` form.
#[derive(Debug, EnumAsInner, PartialEq, Eq, Clone)]
#[allow(clippy::upper_case_acronyms)]
pub enum RData {
    /// ```text
    /// 3.4.1. A RDATA format
    ///
    ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    ///     |                    ADDRESS                    |
    ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    ///
    /// The RDATA section of an A line in a master file is an Internet
    /// address expressed as four decimal numbers separated by dots without
    /// any embedded spaces (e.g., "10.2.0.52" or "192.0.5.6").
    /// ```
    A(Ipv4Addr),

    /// ```text
    /// 2.2 AAAA data format
    ///
    ///    A 128 bit IPv6 address is encoded in the data portion of an AAAA
    ///    resource record in network byte order (high-order byte first).
    /// ```
    AAAA(Ipv6Addr),

    /// The canonical name for an alias
    CNAME(Name),

    /// Host information
    HINFO(HINFO),

    /// Mail exchange
    MX(MX),

    /// An authoritative name server
    NS(Name),

    /// Opaque binary data, also used for the RFC 3597 generic form
    NULL(NULL),

    /// A domain name pointer
    PTR(Name),

    /// Start of a zone of authority
    SOA(SOA),

    /// Server selection
    SRV(SRV),

    /// Text strings
    TXT(TXT),
}

impl RData {
    /// The record type this rdata naturally belongs to.
    ///
    /// Note that [`RData::NULL`] is also used for the generic form of
    /// arbitrary types; the authoritative type always lives in the record
    /// header.
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::A(..) => RecordType::A,
            Self::AAAA(..) => RecordType::AAAA,
            Self::CNAME(..) => RecordType::CNAME,
            Self::HINFO(..) => RecordType::HINFO,
            Self::MX(..) => RecordType::MX,
            Self::NS(..) => RecordType::NS,
            Self::NULL(..) => RecordType::NULL,
            Self::PTR(..) => RecordType::PTR,
            Self::SOA(..) => RecordType::SOA,
            Self::SRV(..) => RecordType::SRV,
            Self::TXT(..) => RecordType::TXT,
        }
    }
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A(address) => write!(f, "{address}"),
            Self::AAAA(address) => write!(f, "{address}"),
            Self::CNAME(name) => write!(f, "{name}"),
            Self::HINFO(hinfo) => write!(f, "{hinfo}"),
            Self::MX(mx) => write!(f, "{mx}"),
            Self::NS(name) => write!(f, "{name}"),
            Self::NULL(null) => write!(f, "{null}"),
            Self::PTR(name) => write!(f, "{name}"),
            Self::SOA(soa) => write!(f, "{soa}"),
            Self::SRV(srv) => write!(f, "{srv}"),
            Self::TXT(txt) => write!(f, "{txt}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_presentation_format() {
        assert_eq!(RData::A("10.0.0.1".parse().unwrap()).to_string(), "10.0.0.1");
        assert_eq!(
            RData::MX(MX::new(10, Name::from_unchecked("mail.example.org.".into()))).to_string(),
            "10 mail.example.org."
        );
        assert_eq!(
            RData::TXT(TXT::new(vec!["a b".into(), "c".into()])).to_string(),
            "\"a b\" \"c\""
        );
        assert_eq!(
            RData::NULL(NULL::with(vec![0x0a, 0x00, 0x00, 0x01])).to_string(),
            "\\# 4 0A000001"
        );
    }

    #[test]
    fn record_type_mapping() {
        assert_eq!(
            RData::AAAA("::1".parse().unwrap()).record_type(),
            RecordType::AAAA
        );
        assert_eq!(RData::NULL(NULL::new()).record_type(), RecordType::NULL);
    }
}
