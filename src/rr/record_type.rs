// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! record type definitions

use std::fmt;
use std::str::FromStr;

use crate::error::{ParseError, ParseErrorKind};

/// The type of the resource record.
///
/// Types without a mnemonic here can still be written in zone files with
/// the generic `TYPE<n>` form of RFC 3597 and come out as [`Self::Unknown`].
#[derive(Debug, Default, PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord)]
#[allow(clippy::upper_case_acronyms)]
pub enum RecordType {
    /// Pseudo record type 0
    #[default]
    ZERO,
    /// RFC 1035 IPv4 Address
    A,
    /// RFC 3596 IPv6 Address
    AAAA,
    /// RFC 1035 Canonical name
    CNAME,
    /// RFC 1035 Host information
    HINFO,
    /// RFC 1035 Mail exchange
    MX,
    /// RFC 1035 Authoritative name server
    NS,
    /// RFC 1035 Null resource record
    NULL,
    /// RFC 1035 Domain name pointer
    PTR,
    /// RFC 1035 Start of a zone of authority
    SOA,
    /// RFC 2782 Server selection
    SRV,
    /// RFC 1035 Text strings
    TXT,
    /// A type code without a mnemonic, written `TYPE<n>`
    Unknown(u16),
}

impl FromStr for RecordType {
    type Err = ParseError;

    /// Convert `&str` to `RecordType`; only the uppercase mnemonics are
    /// recognized, the caller uppercases first.
    ///
    /// ```
    /// use std::str::FromStr;
    /// use masterfile::rr::RecordType;
    ///
    /// let var: RecordType = RecordType::from_str("A").unwrap();
    /// assert_eq!(RecordType::A, var);
    /// ```
    fn from_str(str: &str) -> Result<Self, ParseError> {
        match str {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::AAAA),
            "CNAME" => Ok(Self::CNAME),
            "HINFO" => Ok(Self::HINFO),
            "MX" => Ok(Self::MX),
            "NS" => Ok(Self::NS),
            "NULL" => Ok(Self::NULL),
            "PTR" => Ok(Self::PTR),
            "SOA" => Ok(Self::SOA),
            "SRV" => Ok(Self::SRV),
            "TXT" => Ok(Self::TXT),
            _ => Err(ParseErrorKind::Message("unknown RR type").into()),
        }
    }
}

impl RecordType {
    /// Extracts the type number from the generic `TYPE<n>` form.
    ///
    /// At least one digit is required after the prefix; the prefix itself
    /// has already been matched case-insensitively by the caller.
    pub(crate) fn parse_numeric(token: &str) -> Option<u16> {
        let digits = token.get(4..)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

impl From<u16> for RecordType {
    fn from(value: u16) -> Self {
        match value {
            0 => Self::ZERO,
            1 => Self::A,
            2 => Self::NS,
            5 => Self::CNAME,
            6 => Self::SOA,
            10 => Self::NULL,
            12 => Self::PTR,
            13 => Self::HINFO,
            15 => Self::MX,
            16 => Self::TXT,
            28 => Self::AAAA,
            33 => Self::SRV,
            _ => Self::Unknown(value),
        }
    }
}

impl From<RecordType> for u16 {
    fn from(rt: RecordType) -> Self {
        match rt {
            RecordType::ZERO => 0,
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::CNAME => 5,
            RecordType::SOA => 6,
            RecordType::NULL => 10,
            RecordType::PTR => 12,
            RecordType::HINFO => 13,
            RecordType::MX => 15,
            RecordType::TXT => 16,
            RecordType::AAAA => 28,
            RecordType::SRV => 33,
            RecordType::Unknown(value) => value,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZERO => f.write_str("ZERO"),
            Self::A => f.write_str("A"),
            Self::AAAA => f.write_str("AAAA"),
            Self::CNAME => f.write_str("CNAME"),
            Self::HINFO => f.write_str("HINFO"),
            Self::MX => f.write_str("MX"),
            Self::NS => f.write_str("NS"),
            Self::NULL => f.write_str("NULL"),
            Self::PTR => f.write_str("PTR"),
            Self::SOA => f.write_str("SOA"),
            Self::SRV => f.write_str("SRV"),
            Self::TXT => f.write_str("TXT"),
            Self::Unknown(value) => write!(f, "TYPE{value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mnemonics() {
        assert_eq!(RecordType::from_str("AAAA").unwrap(), RecordType::AAAA);
        assert_eq!(RecordType::from_str("SOA").unwrap(), RecordType::SOA);
        assert!(RecordType::from_str("aaaa").is_err());
        // TYPE<n> is not resolved here
        assert!(RecordType::from_str("TYPE1").is_err());
    }

    #[test]
    fn numeric_form() {
        assert_eq!(RecordType::parse_numeric("TYPE1"), Some(1));
        assert_eq!(RecordType::parse_numeric("type65280"), Some(65280));
        assert_eq!(RecordType::parse_numeric("TYPE"), None);
        assert_eq!(RecordType::parse_numeric("TYPE12x"), None);
        assert_eq!(RecordType::parse_numeric("TYPE65536"), None);
    }

    #[test]
    fn u16_round_trip() {
        for rt in [
            RecordType::A,
            RecordType::SRV,
            RecordType::TXT,
            RecordType::Unknown(4711),
        ] {
            assert_eq!(RecordType::from(u16::from(rt)), rt);
        }
    }
}
