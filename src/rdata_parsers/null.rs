// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Parser for the RFC 3597 generic rdata form.

use data_encoding::HEXUPPER_PERMISSIVE;

use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rr::rdata::NULL;

/// Parses the tokens following the `\#` marker: a decimal length and the
/// data as hex, possibly split across several tokens. Usable with any
/// record type.
pub(crate) fn parse_rfc3597<'i, I: Iterator<Item = &'i str>>(mut tokens: I) -> ParseResult<NULL> {
    let length: usize = tokens
        .next()
        .ok_or_else(|| ParseError::from(ParseErrorKind::MissingToken("rdata length".to_string())))
        .and_then(|s| s.parse().map_err(Into::into))?;

    let hex: String = tokens.collect();
    let data = HEXUPPER_PERMISSIVE.decode(hex.as_bytes())?;
    if data.len() != length {
        return Err(ParseError::from(ParseErrorKind::Msg(format!(
            "generic rdata declared {length} octets, got {}",
            data.len()
        ))));
    }

    Ok(NULL::with(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_split_hex() {
        let null = parse_rfc3597(["4", "0A00", "0001"].into_iter()).unwrap();
        assert_eq!(null.anything(), &[0x0a, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn zero_length() {
        let null = parse_rfc3597(["0"].into_iter()).unwrap();
        assert!(null.anything().is_empty());
    }

    #[test]
    fn length_mismatch() {
        assert!(parse_rfc3597(["3", "0A000001"].into_iter()).is_err());
    }

    #[test]
    fn bad_hex() {
        assert!(parse_rfc3597(["1", "zz"].into_iter()).is_err());
    }
}
