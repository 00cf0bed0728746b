// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Comparison tests between our TZif parsing and chrono-tz.
//!
//! chrono-tz ships the same compiled tzdata interpreted by an independent
//! implementation, so matching offsets across zones and decades gives good
//! confidence in both the parser and the transition lookup. Sampling stays
//! within 1970-2030 where tzdata revisions agree.

use chrono::{DateTime, NaiveDate, Offset};
use chrono_tz::Tz as ChronoTz;
use tempora_tzif::TimeZone;

const ZONES: &[&str] = &[
    "UTC",
    "America/New_York",
    "America/Los_Angeles",
    "America/Phoenix",
    "America/Sao_Paulo",
    "Europe/London",
    "Europe/Paris",
    "Europe/Moscow",
    "Asia/Tokyo",
    "Asia/Kolkata",
    "Asia/Kathmandu",
    "Australia/Sydney",
    "Australia/Adelaide",
    "Pacific/Auckland",
    "Pacific/Chatham",
];

fn chrono_offset(tz_name: &str, timestamp_secs: i64) -> i32 {
    let tz: ChronoTz = tz_name.parse().unwrap();
    let utc = DateTime::from_timestamp(timestamp_secs, 0).unwrap();
    utc.with_timezone(&tz).offset().fix().local_minus_utc()
}

fn assert_offsets_match(tz: &TimeZone, tz_name: &str, timestamp_secs: i64) {
    assert_eq!(
        tz.offset_at(timestamp_secs),
        chrono_offset(tz_name, timestamp_secs),
        "offset mismatch for {} at ts={}",
        tz_name,
        timestamp_secs
    );
}

#[test]
fn sampled_instants_across_decades() {
    let samples: Vec<i64> = [
        (1970, 1, 15),
        (1975, 7, 15),
        (1980, 3, 15),
        (1985, 9, 15),
        (1990, 6, 15),
        (1995, 12, 15),
        (2000, 1, 1),
        (2005, 6, 15),
        (2006, 3, 15),
        (2007, 3, 15),
        (2010, 7, 4),
        (2015, 11, 11),
        (2020, 2, 29),
        (2024, 6, 21),
        (2024, 12, 21),
    ]
    .iter()
    .flat_map(|&(y, m, d)| {
        [0u32, 6, 12, 18].into_iter().map(move |h| {
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
                .and_utc()
                .timestamp()
        })
    })
    .collect();

    for tz_name in ZONES {
        let tz = TimeZone::named(tz_name).unwrap();
        for &ts in &samples {
            assert_offsets_match(&tz, tz_name, ts);
        }
    }
}

#[test]
fn dst_transitions_second_exact() {
    // (zone, UTC instant of a known transition)
    let transitions = [
        // US 2024: spring forward Mar 10 07:00 UTC, fall back Nov 3 06:00 UTC
        ("America/New_York", 1_710_054_000),
        ("America/New_York", 1_730_613_600),
        // Pre-2007 US rules: Apr 2, 2006 and Oct 29, 2006
        ("America/New_York", 1_143_961_200),
        ("America/New_York", 1_162_101_600),
        // Sydney 2024: spring forward Oct 5 16:00 UTC
        ("Australia/Sydney", 1_728_144_000),
        // Europe 2024: Mar 31 01:00 UTC
        ("Europe/Paris", 1_711_846_800),
    ];

    for (tz_name, at) in transitions {
        let tz = TimeZone::named(tz_name).unwrap();
        for ts in [at - 3600, at - 1, at, at + 1, at + 3600] {
            assert_offsets_match(&tz, tz_name, ts);
        }
    }
}

#[test]
fn footer_rule_agrees_for_future_instants() {
    // Instants past the last explicit transition in current tzdata, where
    // the POSIX footer rule takes over.
    let dates = [(2030, 1, 15), (2030, 7, 15), (2035, 4, 1), (2035, 10, 1)];
    for tz_name in ZONES {
        let tz = TimeZone::named(tz_name).unwrap();
        for &(y, m, d) in &dates {
            let ts = NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
                .and_utc()
                .timestamp();
            assert_offsets_match(&tz, tz_name, ts);
        }
    }
}
