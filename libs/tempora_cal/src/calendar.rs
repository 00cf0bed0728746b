// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Conversions between civil dates and signed day counts.
//!
//! The day/date conversions are Howard Hinnant's `days_from_civil` /
//! `civil_from_days` algorithms, done entirely in integer arithmetic so the
//! two directions are exact inverses of each other across the whole
//! representable range.

use std::error::Error;
use std::fmt;

/// Days between the Rata Die anchor (0001-01-01 is day 1) and the Unix
/// anchor (1970-01-01 is day 0).
pub const RATA_DIE_SHIFT: i64 = 719_163;

/// Days from March 1, year 0 to the Unix epoch (January 1, 1970).
const DAYS_FROM_CIVIL_EPOCH_TO_UNIX_EPOCH: i64 = 719_468;
/// Days in a 400-year era (146097 = 400*365 + 97 leap days).
const DAYS_PER_ERA: i64 = 146_097;

/// First year of the supported span.
pub const MIN_YEAR: i32 = 1;
/// Last year of the supported span.
pub const MAX_YEAR: i32 = 9999;
/// Unix day number of 0001-01-01.
pub const MIN_UNIX_DAYS: i64 = -719_162;
/// Unix day number of 9999-12-31.
pub const MAX_UNIX_DAYS: i64 = 2_932_896;

/// A proleptic Gregorian civil date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    /// Year, 1 to 9999 when constructed through [`Date::new`].
    pub year: i32,
    /// Month, 1 to 12.
    pub month: u8,
    /// Day of month, 1 to 28/29/30/31 depending on month and year.
    pub day: u8,
}

/// Error returned for calendar fields that do not name a real date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The (year, month, day) triple is not a valid calendar date.
    InvalidDate { year: i32, month: u8, day: u8 },
    /// The year falls outside the supported 0001..=9999 span.
    YearOutOfRange(i32),
}

impl fmt::Display for CalendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarError::InvalidDate { year, month, day } => {
                write!(f, "invalid calendar date: {:04}-{:02}-{:02}", year, month, day)
            },
            CalendarError::YearOutOfRange(year) => {
                write!(f, "year {} outside supported range {}..={}", year, MIN_YEAR, MAX_YEAR)
            },
        }
    }
}

impl Error for CalendarError {}

impl Date {
    /// Create a date, validating month and day against the proleptic
    /// Gregorian rules and the year against the supported span.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::YearOutOfRange(year));
        }
        if month < 1 || month > 12 || day < 1 || day > days_in_month(year, month) {
            return Err(CalendarError::InvalidDate { year, month, day });
        }
        Ok(Date { year, month, day })
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Whether `year` is a leap year under the Gregorian rule.
#[inline]
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        },
        _ => 0,
    }
}

/// Convert a civil date to days since the Unix epoch (1970-01-01 = day 0).
///
/// Total over all inputs that fit the arithmetic; span enforcement lives in
/// [`Date::new`] and in the datetime engine built on top of this crate.
pub fn date_to_unix_days(date: Date) -> i64 {
    let y = i64::from(date.year) - i64::from(date.month <= 2);
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let m = i64::from(date.month);
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + i64::from(date.day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * DAYS_PER_ERA + doe - DAYS_FROM_CIVIL_EPOCH_TO_UNIX_EPOCH
}

/// Convert days since the Unix epoch to a civil date. Exact inverse of
/// [`date_to_unix_days`].
pub fn unix_days_to_date(unix_days: i64) -> Date {
    let days = unix_days + DAYS_FROM_CIVIL_EPOCH_TO_UNIX_EPOCH;
    let era = if days >= 0 { days } else { days - (DAYS_PER_ERA - 1) } / DAYS_PER_ERA;
    let doe = days - era * DAYS_PER_ERA; // day of era
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365; // year of era
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // day of year
    let mp = (5 * doy + 2) / 153; // month index (0 = Mar, 11 = Feb)
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u8;
    Date {
        year: (y + i64::from(month <= 2)) as i32,
        month,
        day,
    }
}

/// Convert a civil date to a Rata Die day number (0001-01-01 = day 1).
pub fn date_to_rata_die(date: Date) -> i64 {
    date_to_unix_days(date) + RATA_DIE_SHIFT
}

/// Convert a Rata Die day number to a civil date. Exact inverse of
/// [`date_to_rata_die`].
pub fn rata_die_to_date(rata_die: i64) -> Date {
    unix_days_to_date(rata_die - RATA_DIE_SHIFT)
}

/// Day of week for a Unix day number (0 = Sunday .. 6 = Saturday).
///
/// Day 0 (1970-01-01) was a Thursday.
#[inline]
pub fn weekday(unix_days: i64) -> u8 {
    (unix_days.rem_euclid(7) + 4) as u8 % 7
}

/// 1-based day of the year for a civil date.
pub fn day_of_year(date: Date) -> u16 {
    let jan1 = date_to_unix_days(Date {
        year: date.year,
        month: 1,
        day: 1,
    });
    (date_to_unix_days(date) - jan1 + 1) as u16
}
