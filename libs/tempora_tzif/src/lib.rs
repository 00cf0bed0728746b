// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! TZif zone record parsing and an embedded timezone database.
//!
//! The database side is a build-time artifact: compiled tzdata shipped as an
//! immutable name -> raw bytes mapping (via `jiff-tzdb`), consulted with a
//! case-sensitive exact match and safe for concurrent lookups. Records are
//! parsed on first use per zone and cached process-wide.
//!
//! The parser decodes the classic TZif transition-table format: the 44-byte
//! header, the legacy 32-bit data block, the 64-bit block added by version 2
//! (preferred when present), and the trailing POSIX rule string used to
//! extrapolate offsets past the last explicit transition.
//!
//! # Example
//!
//! ```
//! use tempora_tzif::TimeZone;
//!
//! let tz = TimeZone::named("America/New_York").unwrap();
//! // 2024-01-01 00:00:00 UTC is EST (UTC-5)
//! assert_eq!(tz.info_at(1704067200).utoff, -18000);
//! ```

mod db;
mod parser;
mod posix;
mod record;

pub use db::{available_zones, lookup, TzdbError};
pub use parser::TzifError;
pub use record::{LocalTimeType, TimeZone, Transition, TzInfo};
