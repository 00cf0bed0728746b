// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Datetime engine over a proleptic Gregorian calendar and embedded tzdata.
//!
//! A [`Datetime`] stores one canonical fact: an instant on the Unix time
//! scale, at a chosen sub-second [`Resolution`], optionally tied to a parsed
//! timezone. Civil fields (year through nanosecond) are always derived from
//! the instant through calendar math, never stored alongside it.
//!
//! The engine itself is a pure function of its inputs: no system clock, no
//! file I/O, no background threads. Timezone data comes from the embedded
//! database in [`tempora_tzif`].
//!
//! # Example
//!
//! ```
//! use tempora::{Datetime, Resolution, TimeZone};
//!
//! let tokyo = TimeZone::named("Asia/Tokyo").unwrap();
//! let dt = Datetime::from_unix(0, Resolution::Second, Some(tokyo)).unwrap();
//! assert_eq!(dt.format("%Y-%m-%dT%H:%M:%S%:z").unwrap(), "1970-01-01T09:00:00+09:00");
//! ```

mod datetime;
mod error;
mod format;

pub use datetime::{CivilTime, Datetime, DatetimeFields, Duration, Resolution};
pub use error::{Error, FormatError};
pub use tempora_cal::{
    date_to_rata_die, date_to_unix_days, leap_correction, rata_die_to_date, unix_days_to_date,
    CalendarError, Date,
};
pub use tempora_tzif::{available_zones, TimeZone, TzInfo, TzdbError, TzifError};
