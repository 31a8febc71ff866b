// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! class of DNS operations, in general always IN for internet

use std::fmt;
use std::str::FromStr;

use crate::error::{ParseError, ParseErrorKind};

/// The DNS Record class
#[derive(Debug, Default, PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord)]
pub enum DNSClass {
    /// Internet
    #[default]
    IN,
    /// Chaos
    CH,
    /// Hesiod
    HS,
    /// QCLASS NONE
    NONE,
    /// QCLASS * (ANY)
    ANY,
    /// A class code without a mnemonic, written `CLASS<n>`
    Unknown(u16),
}

impl FromStr for DNSClass {
    type Err = ParseError;

    /// Convert from `&str` to `DNSClass`; only the uppercase mnemonics are
    /// recognized, the caller uppercases first.
    ///
    /// ```
    /// use std::str::FromStr;
    /// use masterfile::rr::DNSClass;
    ///
    /// let var: DNSClass = DNSClass::from_str("IN").unwrap();
    /// assert_eq!(DNSClass::IN, var);
    /// ```
    fn from_str(str: &str) -> Result<Self, ParseError> {
        match str {
            "IN" => Ok(Self::IN),
            "CH" => Ok(Self::CH),
            "HS" => Ok(Self::HS),
            "NONE" => Ok(Self::NONE),
            "ANY" => Ok(Self::ANY),
            _ => Err(ParseErrorKind::Message("unknown class").into()),
        }
    }
}

impl DNSClass {
    /// Extracts the class number from the generic `CLASS<n>` form.
    ///
    /// At least one digit is required after the prefix; the prefix itself
    /// has already been matched case-insensitively by the caller.
    pub(crate) fn parse_numeric(token: &str) -> Option<u16> {
        let digits = token.get(5..)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

impl From<u16> for DNSClass {
    fn from(value: u16) -> Self {
        match value {
            1 => Self::IN,
            3 => Self::CH,
            4 => Self::HS,
            254 => Self::NONE,
            255 => Self::ANY,
            _ => Self::Unknown(value),
        }
    }
}

impl From<DNSClass> for u16 {
    fn from(class: DNSClass) -> Self {
        match class {
            DNSClass::IN => 1,
            DNSClass::CH => 3,
            DNSClass::HS => 4,
            DNSClass::NONE => 254,
            DNSClass::ANY => 255,
            DNSClass::Unknown(value) => value,
        }
    }
}

impl fmt::Display for DNSClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IN => f.write_str("IN"),
            Self::CH => f.write_str("CH"),
            Self::HS => f.write_str("HS"),
            Self::NONE => f.write_str("NONE"),
            Self::ANY => f.write_str("ANY"),
            Self::Unknown(value) => write!(f, "CLASS{value}"),
        }
    }
}
