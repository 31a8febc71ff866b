// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! resource record implementation

use std::fmt;

use crate::rr::dns_class::DNSClass;
use crate::rr::domain::Name;
use crate::rr::record_data::RData;
use crate::rr::record_type::RecordType;

/// The header shared by every resource record: owner name, record type,
/// class and TTL. The parser accumulates one of these while it walks the
/// `[<owner>] [<ttl>] [<class>] <type>` prefix of a line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Header {
    pub(crate) name: Name,
    pub(crate) rr_type: RecordType,
    pub(crate) dns_class: DNSClass,
    pub(crate) ttl: u32,
}

impl Header {
    /// Creates a header; the zone parser fills one in field by field.
    pub fn new(name: Name, rr_type: RecordType, dns_class: DNSClass, ttl: u32) -> Self {
        Self {
            name,
            rr_type,
            dns_class,
            ttl,
        }
    }

    /// The owner name of the record, always fully qualified when produced
    /// by the parser
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The record type
    pub fn rr_type(&self) -> RecordType {
        self.rr_type
    }

    /// The record class, IN unless the zone says otherwise
    pub fn dns_class(&self) -> DNSClass {
        self.dns_class
    }

    /// Time to live in seconds
    pub fn ttl(&self) -> u32 {
        self.ttl
    }
}

/// A parsed resource record: the header plus the type-specific rdata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    header: Header,
    rdata: RData,
}

impl Record {
    /// Combines a finished header with its rdata
    pub fn from_rdata(header: Header, rdata: RData) -> Self {
        Self { header, rdata }
    }

    /// The record header
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The owner name of the record
    pub fn name(&self) -> &Name {
        &self.header.name
    }

    /// The record type
    pub fn rr_type(&self) -> RecordType {
        self.header.rr_type
    }

    /// The record class
    pub fn dns_class(&self) -> DNSClass {
        self.header.dns_class
    }

    /// Time to live in seconds
    pub fn ttl(&self) -> u32 {
        self.header.ttl
    }

    /// The type-specific record data
    pub fn data(&self) -> &RData {
        &self.rdata
    }

    /// Consumes the record, returning the rdata
    pub fn into_data(self) -> RData {
        self.rdata
    }
}

impl fmt::Display for Record {
    /// Presentation format, one record per line:
    ///
    /// ```text
    /// www.example.org.	3600	IN	A	10.0.0.1
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.header.name, self.header.ttl, self.header.dns_class, self.header.rr_type, self.rdata
        )
    }
}
