// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Cumulative TAI-UTC offset lookup.
//!
//! The table lists every leap second announced between 1972 and 2017 as a
//! `(effective unix instant, cumulative offset)` pair. The correction is a
//! right-continuous step function: an entry's own instant already carries
//! the new offset.

/// TAI-UTC offset in effect before the first announced leap second.
pub const LEAP_BASELINE: u8 = 10;

/// Announced leap seconds, sorted ascending by effective instant.
const LEAP_TABLE: [(i64, u8); 27] = [
    (78_796_800, 11),     // 1972-07-01
    (94_694_400, 12),     // 1973-01-01
    (126_230_400, 13),    // 1974-01-01
    (157_766_400, 14),    // 1975-01-01
    (189_302_400, 15),    // 1976-01-01
    (220_924_800, 16),    // 1977-01-01
    (252_460_800, 17),    // 1978-01-01
    (283_996_800, 18),    // 1979-01-01
    (315_532_800, 19),    // 1980-01-01
    (362_793_600, 20),    // 1981-07-01
    (394_329_600, 21),    // 1982-07-01
    (425_865_600, 22),    // 1983-07-01
    (489_024_000, 23),    // 1985-07-01
    (567_993_600, 24),    // 1988-01-01
    (631_152_000, 25),    // 1990-01-01
    (662_688_000, 26),    // 1991-01-01
    (709_948_800, 27),    // 1992-07-01
    (741_484_800, 28),    // 1993-07-01
    (773_020_800, 29),    // 1994-07-01
    (820_454_400, 30),    // 1996-01-01
    (867_715_200, 31),    // 1997-07-01
    (915_148_800, 32),    // 1999-01-01
    (1_136_073_600, 33),  // 2006-01-01
    (1_230_768_000, 34),  // 2009-01-01
    (1_341_100_800, 35),  // 2012-07-01
    (1_435_708_800, 36),  // 2015-07-01
    (1_483_228_800, 37),  // 2017-01-01
];

/// Cumulative TAI-UTC offset in effect at `utc_secs` (seconds since the Unix
/// epoch).
///
/// Returns the offset of the last entry whose effective instant is at or
/// before the query, or [`LEAP_BASELINE`] for instants before 1972-07-01.
pub fn leap_correction(utc_secs: i64) -> u8 {
    match LEAP_TABLE.binary_search_by(|entry| entry.0.cmp(&utc_secs)) {
        Ok(idx) => LEAP_TABLE[idx].1,
        Err(0) => LEAP_BASELINE,
        Err(idx) => LEAP_TABLE[idx - 1].1,
    }
}
