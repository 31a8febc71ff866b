// Copyright 2015-2023 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! `$GENERATE` directive support.
//!
//! `$GENERATE <start>-<stop>[/<step>] <template...>` expands the template
//! once per counter value. A `$` in the template is replaced by the
//! counter; `${offset[,width[,base]]}` applies an offset, zero-padded
//! width and base (`d`, `o`, `x`, `X`); `$$` and `\$` produce a literal
//! `$`. Every expanded line is parsed as a single record against the
//! current origin and queued; the queue drains before normal parsing
//! resumes.

use std::io::{Cursor, Read};

use tracing::trace;

use crate::lexer::{Token, TokenKind};
use crate::parser::{ZoneParser, DEFAULT_TTL};
use crate::rr::domain::Name;
use crate::rr::Record;

impl<R: Read> ZoneParser<R> {
    /// Expands the directive onto the pending record queue. `l` holds the
    /// range token; the rest of the line is the template. Errors are
    /// reported as bare messages, the caller attaches file and position.
    pub(crate) fn generate(&mut self, l: &Token) -> Result<(), String> {
        let mut token = l.text.as_str();

        let mut step: i64 = 1;
        if let Some(i) = token.find('/') {
            step = match token[i + 1..].parse::<i64>() {
                Ok(s) if s > 0 => s,
                _ => return Err("bad step in $GENERATE range".to_string()),
            };
            token = &token[..i];
        }

        let (start, end) = match token.split_once('-') {
            Some(parts) => parts,
            None => return Err("bad start-stop in $GENERATE range".to_string()),
        };
        let start: i64 = match start.parse() {
            Ok(v) => v,
            Err(_) => return Err("bad range in $GENERATE range".to_string()),
        };
        let end: i64 = match end.parse() {
            Ok(v) => v,
            Err(_) => return Err("bad range in $GENERATE range".to_string()),
        };
        if start < 0 || end < 0 || end < start || (end - start) / step > 65535 {
            return Err("bad range in $GENERATE range".to_string());
        }

        // gather the rest of the line as the raw template; blanks come out
        // of the lexer as single spaces and are kept
        let mut template = String::new();
        {
            let lexer = self.lexer_mut();
            // the blank separating range and template
            match lexer.next_token() {
                Ok(Some(t)) if t.kind == TokenKind::Blank => {}
                Ok(_) => return Err("garbage after $GENERATE range".to_string()),
                Err(_) => return Err("bad data in $GENERATE directive".to_string()),
            }
            loop {
                match lexer.next_token() {
                    Ok(Some(t)) => {
                        if t.kind == TokenKind::Newline {
                            break;
                        }
                        template.push_str(&t.text);
                    }
                    Ok(None) => break,
                    Err(_) => return Err("bad data in $GENERATE directive".to_string()),
                }
            }
        }

        let origin = self.origin().cloned();
        // counted form: stepping an index past `end` would overflow when
        // `end` is near i64::MAX, which the range cap above still admits
        let steps = (end - start) / step;
        let mut count = 0usize;
        for n in 0..=steps {
            let i = start + n * step;
            let line = substitute(&template, i)?;
            let record = parse_generated(&line, origin.as_ref())?;
            self.queue_generated(record);
            count += 1;
        }

        trace!(records = count, "expanded $GENERATE");
        Ok(())
    }
}

/// Replaces `$`, `${...}`, `$$` and `\$` in the template for one counter
/// value.
fn substitute(template: &str, counter: i64) -> Result<String, String> {
    let b = template.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(template.len());
    let mut escape = false;
    let mut j = 0;

    while j < b.len() {
        match b[j] {
            b'\\' => {
                if escape {
                    out.push(b'\\');
                    escape = false;
                } else {
                    escape = true;
                }
                j += 1;
            }
            b'$' => {
                if escape {
                    out.push(b'$');
                    escape = false;
                    j += 1;
                    continue;
                }

                if j + 1 >= b.len() {
                    // counter substitution at the very end
                    out.extend_from_slice(counter.to_string().as_bytes());
                    j += 1;
                    continue;
                }

                if b[j + 1] == b'$' {
                    out.push(b'$');
                    j += 2;
                    continue;
                }

                if b[j + 1] == b'{' {
                    let rest = &template[j + 2..];
                    let sep = match rest.find('}') {
                        Some(sep) => sep,
                        None => return Err("bad modifier in $GENERATE".to_string()),
                    };
                    let (offset, width, base) = mod_to_format(&rest[..sep])?;
                    out.extend_from_slice(format_counter(counter + offset, width, base).as_bytes());
                    j += 2 + sep + 1;
                    continue;
                }

                out.extend_from_slice(counter.to_string().as_bytes());
                j += 1;
            }
            c => {
                if escape {
                    // only `$` and `\` have meaning behind a backslash; any
                    // other escape is copied through unchanged so domain
                    // escapes like `\.` survive expansion
                    out.push(b'\\');
                    out.push(c);
                    escape = false;
                } else {
                    out.push(c);
                }
                j += 1;
            }
        }
    }

    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Parses the `offset[,width[,base]]` modifier body.
fn mod_to_format(s: &str) -> Result<(i64, usize, char), String> {
    let parts: Vec<&str> = s.split(',').collect();
    let (off_str, width_str, base_str) = match parts.as_slice() {
        [o] => (*o, "0", "d"),
        [o, w] => (*o, *w, "d"),
        [o, w, b] => (*o, *w, *b),
        _ => return Err("bad modifier in $GENERATE".to_string()),
    };

    let base = match base_str {
        "d" => 'd',
        "o" => 'o',
        "x" => 'x',
        "X" => 'X',
        _ => return Err("bad base in $GENERATE".to_string()),
    };

    let offset: i64 = match off_str.parse() {
        Ok(v) => v,
        Err(_) => return Err("bad offset in $GENERATE".to_string()),
    };

    let width: usize = match width_str.parse() {
        Ok(w) if w <= 255 => w,
        _ => return Err("bad width in $GENERATE".to_string()),
    };

    Ok((offset, width, base))
}

fn format_counter(value: i64, width: usize, base: char) -> String {
    match base {
        'o' => format!("{value:0width$o}"),
        'x' => format!("{value:0width$x}"),
        'X' => format!("{value:0width$X}"),
        _ => format!("{value:0width$}"),
    }
}

/// Parses one expanded template line as a complete record with the stock
/// default TTL, the way a standalone record string is parsed.
fn parse_generated(line: &str, origin: Option<&Name>) -> Result<Record, String> {
    let mut input = line.to_string();
    if !input.ends_with('\n') {
        input.push('\n');
    }

    let mut parser = ZoneParser::new(
        Cursor::new(input.into_bytes()),
        origin.map(|n| n.as_str()),
        "",
    )
    .with_default_ttl(DEFAULT_TTL);

    match parser.next_rr() {
        Some(rr) => Ok(rr),
        None => match parser.err() {
            Some(e) => Err(e.kind().to_string()),
            None => Err("bad data in $GENERATE directive".to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::error::ParseError;
    use crate::rr::{RData, RecordType};

    fn parse_all(zone: &str) -> (Vec<Record>, Option<ParseError>) {
        let mut parser = ZoneParser::new(
            Cursor::new(zone.as_bytes().to_vec()),
            Some("example.org."),
            "",
        );
        let mut records = Vec::new();
        while let Some(rr) = parser.next_rr() {
            records.push(rr);
        }
        let err = parser.err().cloned();
        (records, err)
    }

    #[test]
    fn simple_range() {
        let (records, err) = parse_all("$GENERATE 1-3 host-$ A 10.0.0.$\n");
        assert!(err.is_none(), "{err:?}");
        assert_eq!(records.len(), 3);

        for (i, rr) in records.iter().enumerate() {
            let n = i + 1;
            assert_eq!(rr.name().as_str(), format!("host-{n}.example.org."));
            assert_eq!(rr.rr_type(), RecordType::A);
            assert_eq!(rr.ttl(), DEFAULT_TTL);
            assert_eq!(
                *rr.data(),
                RData::A(format!("10.0.0.{n}").parse().unwrap())
            );
        }
    }

    #[test]
    fn stepped_range() {
        let (records, err) = parse_all("$GENERATE 0-10/5 host-$ A 10.0.0.$\n");
        assert!(err.is_none(), "{err:?}");
        let names: Vec<_> = records.iter().map(|r| r.name().as_str().to_string()).collect();
        assert_eq!(
            names,
            [
                "host-0.example.org.",
                "host-5.example.org.",
                "host-10.example.org."
            ]
        );
    }

    #[test]
    fn generated_records_precede_following_lines() {
        let (records, err) =
            parse_all("$TTL 300\n$GENERATE 1-2 host-$ A 10.0.0.$\nlast A 10.0.0.99\n");
        assert!(err.is_none(), "{err:?}");
        let names: Vec<_> = records.iter().map(|r| r.name().as_str().to_string()).collect();
        assert_eq!(
            names,
            [
                "host-1.example.org.",
                "host-2.example.org.",
                "last.example.org."
            ]
        );

        // expanded lines are re-parsed standalone and get the stock default,
        // not the session's $TTL
        assert_eq!(records[0].ttl(), DEFAULT_TTL);
        assert_eq!(records[2].ttl(), 300);
    }

    #[test]
    fn width_and_base_modifier() {
        let (records, err) = parse_all("$GENERATE 10-11 obj-${-10,3,d} A 10.0.0.$\n");
        assert!(err.is_none(), "{err:?}");
        assert_eq!(records[0].name().as_str(), "obj-000.example.org.");
        assert_eq!(records[1].name().as_str(), "obj-001.example.org.");
    }

    #[test]
    fn dollar_escapes() {
        assert_eq!(substitute("a$$b", 7).unwrap(), "a$b");
        assert_eq!(substitute("a\\$b", 7).unwrap(), "a$b");
        assert_eq!(substitute("a$", 7).unwrap(), "a7");
        assert_eq!(substitute("${3}", 7).unwrap(), "10");
        assert_eq!(substitute("${0,4}", 7).unwrap(), "0007");
        assert_eq!(substitute("${0,2,X}", 26).unwrap(), "1A");
    }

    #[test]
    fn other_escapes_pass_through() {
        assert_eq!(substitute("host-\\x$", 7).unwrap(), "host-\\x7");
        assert_eq!(substitute("a\\.b-$", 2).unwrap(), "a\\.b-2");
        assert_eq!(substitute("a\\\\b", 1).unwrap(), "a\\b");
    }

    #[test]
    fn range_at_the_edge_of_i64() {
        let (records, err) =
            parse_all("$GENERATE 9223372036854775806-9223372036854775807 x-$ A 10.0.0.1\n");
        assert!(err.is_none(), "{err:?}");
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].name().as_str(),
            "x-9223372036854775806.example.org."
        );
        assert_eq!(
            records[1].name().as_str(),
            "x-9223372036854775807.example.org."
        );
    }

    #[test]
    fn bad_ranges() {
        for (zone, msg) in [
            ("$GENERATE 3-1 host-$ A 10.0.0.$\n", "bad range in $GENERATE range"),
            ("$GENERATE x-1 host-$ A 10.0.0.$\n", "bad range in $GENERATE range"),
            ("$GENERATE 13 host-$ A 10.0.0.$\n", "bad start-stop in $GENERATE range"),
            ("$GENERATE 1-2/0 host-$ A 10.0.0.$\n", "bad step in $GENERATE range"),
            ("$GENERATE 1-2/ host-$ A 10.0.0.$\n", "bad step in $GENERATE range"),
            ("$GENERATE 1-2\n", "garbage after $GENERATE range"),
        ] {
            let (records, err) = parse_all(zone);
            assert!(records.is_empty());
            assert_eq!(err.expect(zone).kind().to_string(), msg, "{zone}");
        }
    }

    #[test]
    fn bad_modifiers() {
        for (zone, msg) in [
            ("$GENERATE 1-2 host-${ A 10.0.0.$\n", "bad modifier in $GENERATE"),
            ("$GENERATE 1-2 host-${0,0,z} A 10.0.0.$\n", "bad base in $GENERATE"),
            ("$GENERATE 1-2 host-${x} A 10.0.0.$\n", "bad offset in $GENERATE"),
            ("$GENERATE 1-2 host-${0,999} A 10.0.0.$\n", "bad width in $GENERATE"),
        ] {
            let (_, err) = parse_all(zone);
            assert_eq!(err.expect(zone).kind().to_string(), msg, "{zone}");
        }
    }

    #[test]
    fn bad_generated_record_surfaces() {
        // the expanded line fails to parse as a record
        let (_, err) = parse_all("$GENERATE 1-1 host-$ BOGUS 10.0.0.$\n");
        assert!(err.is_some());
    }
}
