// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! null record type, generic binary data

use std::fmt;

use data_encoding::HEXUPPER;

/// Opaque rdata bytes, as produced by the RFC 3597 generic form
/// `\# <length> <hex data>`. Used for NULL records and for any record type
/// this crate has no presentation-format parser for.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct NULL {
    anything: Vec<u8>,
}

impl NULL {
    /// Constructs a new NULL RData with no data
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new NULL RData with the given data
    pub fn with(anything: Vec<u8>) -> Self {
        Self { anything }
    }

    /// The opaque rdata bytes
    pub fn anything(&self) -> &[u8] {
        &self.anything
    }
}

impl fmt::Display for NULL {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\\# {} {}",
            self.anything.len(),
            HEXUPPER.encode(&self.anything)
        )
    }
}
