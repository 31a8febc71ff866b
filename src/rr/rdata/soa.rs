// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! start of authority record defining ownership and defaults for the zone

use std::fmt;

use crate::rr::domain::Name;

/// ```text
/// 3.3.13. SOA RDATA format
///
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     /                     MNAME                     /
///     /                                               /
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     /                     RNAME                     /
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    SERIAL                     |
///     |                                               |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    REFRESH                    |
///     |                                               |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                     RETRY                     |
///     |                                               |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    EXPIRE                     |
///     |                                               |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    MINIMUM                    |
///     |                                               |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///
/// SOA records cause no additional section processing.
///
/// All times are in units of seconds.
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SOA {
    mname: Name,
    rname: Name,
    serial: u32,
    refresh: u32,
    retry: u32,
    expire: u32,
    minimum: u32,
}

impl SOA {
    /// Creates a new SOA record data.
    ///
    /// # Arguments
    ///
    /// * `mname` - the name server which was the primary source of data for this zone
    /// * `rname` - the mailbox of the person responsible for this zone
    /// * `serial` - version number of the zone
    /// * `refresh` - interval before the zone should be refreshed
    /// * `retry` - interval before a failed refresh should be retried
    /// * `expire` - upper limit before the zone is no longer authoritative
    /// * `minimum` - minimum TTL for negative caching
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mname: Name,
        rname: Name,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    ) -> Self {
        Self {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        }
    }

    /// The name server that was the original or primary source of data for this zone
    pub fn mname(&self) -> &Name {
        &self.mname
    }

    /// The mailbox of the person responsible for this zone
    pub fn rname(&self) -> &Name {
        &self.rname
    }

    /// The unsigned 32 bit version number of the original copy of the zone
    pub fn serial(&self) -> u32 {
        self.serial
    }

    /// The time interval before the zone should be refreshed
    pub fn refresh(&self) -> u32 {
        self.refresh
    }

    /// The time interval that should elapse before a failed refresh should be retried
    pub fn retry(&self) -> u32 {
        self.retry
    }

    /// The upper limit on the time interval that can elapse before the zone
    /// is no longer authoritative
    pub fn expire(&self) -> u32 {
        self.expire
    }

    /// The minimum TTL field that should be exported with any RR from this zone
    pub fn minimum(&self) -> u32 {
        self.minimum
    }
}

impl fmt::Display for SOA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.mname, self.rname, self.serial, self.refresh, self.retry, self.expire, self.minimum
        )
    }
}
