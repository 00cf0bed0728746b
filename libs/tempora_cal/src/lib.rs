// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Proleptic Gregorian calendar math and the TAI-UTC leap second table.
//!
//! Everything in this crate is pure integer arithmetic over value types:
//! no allocation, no I/O, no system clock. Two day-count anchors are
//! supported and kept numerically consistent:
//!
//! - **Unix days**: day `0` is 1970-01-01
//! - **Rata Die**: day `1` is 0001-01-01
//!
//! The two differ by the constant [`RATA_DIE_SHIFT`] for every date.
//!
//! # Example
//!
//! ```
//! use tempora_cal::{date_to_unix_days, unix_days_to_date, Date};
//!
//! let date = Date::new(1970, 1, 1).unwrap();
//! assert_eq!(date_to_unix_days(date), 0);
//! assert_eq!(unix_days_to_date(0), date);
//! ```

mod calendar;
mod leap;

pub use calendar::{
    date_to_rata_die, date_to_unix_days, day_of_year, days_in_month, is_leap_year,
    rata_die_to_date, unix_days_to_date, weekday, CalendarError, Date, MAX_UNIX_DAYS,
    MAX_YEAR, MIN_UNIX_DAYS, MIN_YEAR, RATA_DIE_SHIFT,
};
pub use leap::{leap_correction, LEAP_BASELINE};
