// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Decoder for the binary TZif transition-table format.
//!
//! Layout: a 44-byte header (magic, version byte, fifteen reserved bytes,
//! six big-endian 32-bit counts) followed by the data block: transition
//! times, transition type indices, local time type records, the
//! abbreviation string table, leap-second records and the standard/UT
//! indicator bytes. Version 2 and later repeat header and block with 64-bit
//! transition times and append a newline-delimited POSIX rule string; the
//! wide block is authoritative when present.

use std::error::Error;
use std::fmt;

use crate::posix;
use crate::record::{LocalTimeType, TimeZone, Transition};

/// Error describing which structural check of a zone record failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TzifError {
    /// The leading magic bytes are not `TZif`.
    BadMagic,
    /// The version byte is not one this parser understands.
    UnsupportedVersion(u8),
    /// A declared count points past the end of the buffer.
    Truncated,
    /// The record declares no local time types.
    NoLocalTimeTypes,
    /// A transition refers to a local time type that does not exist.
    InvalidTypeIndex { index: u8, count: usize },
    /// Transition times are not strictly increasing.
    UnsortedTransitions,
    /// An abbreviation index points outside the string table, or the table
    /// entry is not NUL-terminated UTF-8.
    BadAbbreviation,
    /// The trailing POSIX rule string does not parse.
    BadPosixTz,
}

impl fmt::Display for TzifError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TzifError::BadMagic => write!(f, "not a TZif record: bad magic bytes"),
            TzifError::UnsupportedVersion(v) => write!(f, "unsupported TZif version byte {:#04x}", v),
            TzifError::Truncated => write!(f, "TZif record truncated: counts exceed buffer"),
            TzifError::NoLocalTimeTypes => write!(f, "TZif record declares zero local time types"),
            TzifError::InvalidTypeIndex { index, count } => {
                write!(f, "transition type index {} out of range ({} types)", index, count)
            },
            TzifError::UnsortedTransitions => {
                write!(f, "TZif transition times are not strictly increasing")
            },
            TzifError::BadAbbreviation => write!(f, "malformed abbreviation string table"),
            TzifError::BadPosixTz => write!(f, "malformed trailing POSIX TZ string"),
        }
    }
}

impl Error for TzifError {}

/// Byte cursor over the raw record.
struct Scan<'a> {
    data: &'a [u8],
}

impl<'a> Scan<'a> {
    fn new(data: &'a [u8]) -> Self {
        Scan { data }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], TzifError> {
        if self.data.len() < n {
            return Err(TzifError::Truncated);
        }
        let (head, tail) = self.data.split_at(n);
        self.data = tail;
        Ok(head)
    }

    fn rest(&mut self) -> &'a [u8] {
        std::mem::take(&mut self.data)
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct Header {
    version: u8,
    isutcnt: usize,
    isstdcnt: usize,
    leapcnt: usize,
    timecnt: usize,
    typecnt: usize,
    charcnt: usize,
}

impl Header {
    /// Size in bytes of the data block this header describes.
    fn block_len(&self, time_size: usize) -> usize {
        self.timecnt * (time_size + 1)
            + self.typecnt * 6
            + self.charcnt
            + self.leapcnt * (time_size + 4)
            + self.isstdcnt
            + self.isutcnt
    }
}

fn parse_header(s: &mut Scan<'_>) -> Result<Header, TzifError> {
    if s.take(4)? != b"TZif" {
        return Err(TzifError::BadMagic);
    }
    let version = match s.take(1)?[0] {
        0 => 1,
        b @ b'1'..=b'9' => b - b'0',
        b => return Err(TzifError::UnsupportedVersion(b)),
    };
    s.take(15)?; // reserved
    let counts = s.take(24)?;
    let count = |i: usize| u32::from_be_bytes(counts[i * 4..i * 4 + 4].try_into().unwrap()) as usize;
    Ok(Header {
        version,
        isutcnt: count(0),
        isstdcnt: count(1),
        leapcnt: count(2),
        timecnt: count(3),
        typecnt: count(4),
        charcnt: count(5),
    })
}

fn parse_block(
    header: &Header,
    s: &mut Scan<'_>,
    wide: bool,
) -> Result<(Vec<Transition>, Vec<LocalTimeType>), TzifError> {
    if header.typecnt == 0 {
        return Err(TzifError::NoLocalTimeTypes);
    }
    let time_size = if wide { 8 } else { 4 };

    let time_bytes = s.take(header.timecnt * time_size)?;
    let mut times = Vec::with_capacity(header.timecnt);
    for chunk in time_bytes.chunks_exact(time_size) {
        times.push(if wide {
            i64::from_be_bytes(chunk.try_into().unwrap())
        } else {
            i64::from(i32::from_be_bytes(chunk.try_into().unwrap()))
        });
    }
    if times.windows(2).any(|w| w[1] <= w[0]) {
        return Err(TzifError::UnsortedTransitions);
    }

    let index_bytes = s.take(header.timecnt)?;
    let mut transitions = Vec::with_capacity(header.timecnt);
    for (&at, &index) in times.iter().zip(index_bytes) {
        if usize::from(index) >= header.typecnt {
            return Err(TzifError::InvalidTypeIndex {
                index,
                count: header.typecnt,
            });
        }
        transitions.push(Transition {
            at,
            type_index: index,
        });
    }

    let type_bytes = s.take(header.typecnt * 6)?;
    let chars = s.take(header.charcnt)?;
    let mut types = Vec::with_capacity(header.typecnt);
    for record in type_bytes.chunks_exact(6) {
        let utoff = i32::from_be_bytes(record[0..4].try_into().unwrap());
        let is_dst = record[4] != 0;
        let abbreviation = abbreviation_at(chars, usize::from(record[5]))?;
        types.push(LocalTimeType {
            utoff,
            is_dst,
            abbreviation,
        });
    }

    // Leap-second records and the standard/UT indicators are not used for
    // offset resolution; skip but bounds-check them.
    s.take(header.leapcnt * (time_size + 4))?;
    s.take(header.isstdcnt)?;
    s.take(header.isutcnt)?;

    Ok((transitions, types))
}

/// NUL-terminated abbreviation starting at `index` in the string table.
fn abbreviation_at(chars: &[u8], index: usize) -> Result<String, TzifError> {
    let tail = chars.get(index..).ok_or(TzifError::BadAbbreviation)?;
    let end = tail
        .iter()
        .position(|&b| b == 0)
        .ok_or(TzifError::BadAbbreviation)?;
    std::str::from_utf8(&tail[..end])
        .map(str::to_owned)
        .map_err(|_| TzifError::BadAbbreviation)
}

/// The newline-delimited POSIX rule string after the version 2+ block.
fn parse_footer(s: &mut Scan<'_>) -> Result<Option<posix::PosixTz>, TzifError> {
    if s.is_empty() {
        return Ok(None);
    }
    if s.take(1)? != b"\n" {
        return Err(TzifError::BadPosixTz);
    }
    let rest = s.rest();
    let line = match rest.iter().position(|&b| b == b'\n') {
        Some(end) => &rest[..end],
        None => rest,
    };
    if line.is_empty() {
        return Ok(None);
    }
    posix::parse(line)
        .map(Some)
        .ok_or(TzifError::BadPosixTz)
}

impl TimeZone {
    /// Decode a raw TZif record.
    ///
    /// Both format generations are handled: version 1 records with 32-bit
    /// transition times, and version 2+ records where the legacy block is
    /// followed by a 64-bit block and a POSIX rule footer. The 64-bit block
    /// is preferred whenever present.
    pub fn parse(bytes: &[u8]) -> Result<TimeZone, TzifError> {
        let mut s = Scan::new(bytes);
        let first = parse_header(&mut s)?;

        if first.version >= 2 {
            s.take(first.block_len(4))?;
            let second = parse_header(&mut s)?;
            let (transitions, types) = parse_block(&second, &mut s, true)?;
            let footer = parse_footer(&mut s)?;
            Ok(TimeZone {
                name: None,
                transitions,
                types,
                footer,
            })
        } else {
            let (transitions, types) = parse_block(&first, &mut s, false)?;
            Ok(TimeZone {
                name: None,
                transitions,
                types,
                footer: None,
            })
        }
    }
}
