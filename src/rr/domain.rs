// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Domain names in zone file presentation format.
//!
//! Names are kept in the textual form they appear in the zone file, dots,
//! `\X` and `\DDD` escapes included. Validation only checks the RFC 1035
//! length rules: labels of 1..=63 octets and a wire form of at most 255
//! octets, where every escape counts as a single octet.

use std::fmt;
use std::str::FromStr;

use crate::error::{ParseError, ParseErrorKind, ParseResult};

/// A domain name in presentation format.
///
/// A name ending in an (unescaped) dot is fully qualified; any other name
/// is relative to some origin. The zone parser only ever emits fully
/// qualified names.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    /// The root name `.`
    pub fn root() -> Self {
        Self(".".to_string())
    }

    /// Wraps a string that is already known to be a well-formed name.
    pub(crate) fn from_unchecked(name: String) -> Self {
        Self(name)
    }

    /// The presentation form of the name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the root name `.`
    pub fn is_root(&self) -> bool {
        self.0 == "."
    }

    /// True when the name ends in an unescaped dot
    pub fn is_fqdn(&self) -> bool {
        is_fqdn(&self.0)
    }
}

impl FromStr for Name {
    type Err = ParseError;

    fn from_str(s: &str) -> ParseResult<Self> {
        if is_domain_name(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ParseErrorKind::Msg(format!("bad domain name: {s}")).into())
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Checks whether `s` is a well-formed presentation-format domain name.
///
/// `\X` and `\DDD` escapes each count as one octet. The root name `.` is
/// valid; empty labels anywhere else are not.
pub fn is_domain_name(s: &str) -> bool {
    if s == "." {
        return true;
    }
    if s.is_empty() {
        return false;
    }

    let b = s.as_bytes();
    let mut label_len = 0usize;
    let mut wire_len = 0usize;
    let mut i = 0;
    while i < b.len() {
        match b[i] {
            b'\\' => {
                if i + 3 < b.len()
                    && b[i + 1].is_ascii_digit()
                    && b[i + 2].is_ascii_digit()
                    && b[i + 3].is_ascii_digit()
                {
                    let v = u16::from(b[i + 1] - b'0') * 100
                        + u16::from(b[i + 2] - b'0') * 10
                        + u16::from(b[i + 3] - b'0');
                    if v > 255 {
                        return false;
                    }
                    i += 4;
                } else if i + 1 < b.len() {
                    i += 2;
                } else {
                    // dangling escape
                    return false;
                }
                label_len += 1;
            }
            b'.' => {
                if label_len == 0 || label_len > 63 {
                    return false;
                }
                wire_len += label_len + 1;
                label_len = 0;
                i += 1;
            }
            _ => {
                label_len += 1;
                i += 1;
            }
        }
    }
    if label_len > 0 {
        if label_len > 63 {
            return false;
        }
        wire_len += label_len + 1;
    }

    // one more octet for the root label
    wire_len + 1 <= 255
}

/// True when the name ends in an unescaped dot.
pub fn is_fqdn(s: &str) -> bool {
    if !s.ends_with('.') {
        return false;
    }
    let body = &s[..s.len() - 1];
    let backslashes = body.len() - body.trim_end_matches('\\').len();
    backslashes % 2 == 0
}

/// Appends the root dot when the name is not already fully qualified.
pub fn fqdn(s: &str) -> String {
    if is_fqdn(s) {
        s.to_string()
    } else {
        format!("{s}.")
    }
}

/// Resolves an owner (or other name-valued) token against the current
/// origin: `@` is the origin itself, a name with a trailing dot byte is
/// taken as is, anything else gets the origin appended.
pub(crate) fn to_absolute_name(name: &str, origin: Option<&Name>) -> Option<Name> {
    if name == "@" {
        // requires an origin
        return origin.cloned();
    }

    if name.is_empty() || !is_domain_name(name) {
        return None;
    }

    if name.ends_with('.') {
        return Some(Name::from_unchecked(name.to_string()));
    }

    let origin = origin?;
    Some(append_origin(name, origin))
}

fn append_origin(name: &str, origin: &Name) -> Name {
    if origin.is_root() {
        Name::from_unchecked(format!("{name}."))
    } else {
        Name::from_unchecked(format!("{name}.{origin}"))
    }
}
