// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Resource record related components: names, types, classes, rdata.

pub mod dns_class;
pub mod domain;
pub mod rdata;
pub mod record_data;
pub mod record_type;
pub mod resource;

pub use dns_class::DNSClass;
pub use domain::Name;
pub use record_data::RData;
pub use record_type::RecordType;
pub use resource::{Header, Record};
