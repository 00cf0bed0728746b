// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! In-memory representation of a parsed zone record.

use crate::posix::PosixTz;

/// A UTC-offset transition: from `at` onwards, `types[type_index]` applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Unix timestamp at which this transition takes effect.
    pub at: i64,
    /// Index into the record's local time types.
    pub type_index: u8,
}

/// A local time type from a zone record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalTimeType {
    /// UTC offset in seconds, positive east of Greenwich.
    pub utoff: i32,
    /// Whether this type is daylight saving time.
    pub is_dst: bool,
    /// Abbreviation, e.g. `"EST"`.
    pub abbreviation: String,
}

/// Offset information resolved for a specific instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TzInfo<'a> {
    /// UTC offset in seconds, positive east of Greenwich.
    pub utoff: i32,
    /// Whether daylight saving time is in effect.
    pub is_dst: bool,
    /// Zone abbreviation in effect.
    pub abbreviation: &'a str,
}

/// A parsed timezone: an ordered transition list plus an optional recurring
/// rule for instants beyond the last explicit transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeZone {
    pub(crate) name: Option<String>,
    pub(crate) transitions: Vec<Transition>,
    pub(crate) types: Vec<LocalTimeType>,
    pub(crate) footer: Option<PosixTz>,
}

impl TimeZone {
    /// IANA name this record was looked up under, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The record's explicit transitions, strictly increasing in time.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// The record's local time types. Every transition index resolves here.
    pub fn types(&self) -> &[LocalTimeType] {
        &self.types
    }

    /// Resolve the offset information in effect at a UTC instant.
    ///
    /// The applicable type is that of the latest transition at or before the
    /// query. Instants past the last transition use the trailing POSIX rule
    /// when the record carries one; instants before the first transition use
    /// the record's earliest standard type.
    pub fn info_at(&self, utc_secs: i64) -> TzInfo<'_> {
        let idx = self.transitions.partition_point(|t| t.at <= utc_secs);
        if idx == self.transitions.len() {
            if let Some(rule) = &self.footer {
                return rule.info_at(utc_secs);
            }
        }
        if idx == 0 {
            return type_info(self.earliest_type());
        }
        let type_index = self.transitions[idx - 1].type_index;
        type_info(&self.types[type_index as usize])
    }

    /// UTC offset in seconds at a UTC instant.
    pub fn offset_at(&self, utc_secs: i64) -> i32 {
        self.info_at(utc_secs).utoff
    }

    /// The type used before the first transition: the first standard-time
    /// type, falling back to the first type of the record.
    fn earliest_type(&self) -> &LocalTimeType {
        self.types
            .iter()
            .find(|t| !t.is_dst)
            .unwrap_or(&self.types[0])
    }
}

fn type_info(t: &LocalTimeType) -> TzInfo<'_> {
    TzInfo {
        utoff: t.utoff,
        is_dst: t.is_dst,
        abbreviation: &t.abbreviation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(transitions: Vec<Transition>, footer: Option<&str>) -> TimeZone {
        TimeZone {
            name: None,
            transitions,
            types: vec![
                LocalTimeType {
                    utoff: 3600,
                    is_dst: false,
                    abbreviation: "CET".into(),
                },
                LocalTimeType {
                    utoff: 7200,
                    is_dst: true,
                    abbreviation: "CEST".into(),
                },
            ],
            footer: footer.map(|s| crate::posix::parse(s.as_bytes()).unwrap()),
        }
    }

    #[test]
    fn transition_boundaries() {
        let tz = record(
            vec![
                Transition { at: 100, type_index: 1 },
                Transition { at: 200, type_index: 0 },
            ],
            None,
        );
        assert_eq!(tz.offset_at(99), 3600);
        assert_eq!(tz.offset_at(100), 7200);
        assert_eq!(tz.offset_at(101), 7200);
        assert_eq!(tz.offset_at(199), 7200);
        assert_eq!(tz.offset_at(200), 3600);
        // No footer: the last transition's type extends forever.
        assert_eq!(tz.offset_at(i64::MAX), 3600);
    }

    #[test]
    fn earliest_type_skips_dst() {
        let tz = TimeZone {
            name: None,
            transitions: vec![Transition { at: 0, type_index: 0 }],
            types: vec![
                LocalTimeType {
                    utoff: 7200,
                    is_dst: true,
                    abbreviation: "CEST".into(),
                },
                LocalTimeType {
                    utoff: 3600,
                    is_dst: false,
                    abbreviation: "CET".into(),
                },
            ],
            footer: None,
        };
        assert_eq!(tz.offset_at(-1), 3600);
    }

    #[test]
    fn footer_takes_over_after_last_transition() {
        let tz = record(
            vec![Transition { at: 0, type_index: 0 }],
            Some("CET-1CEST,M3.5.0,M10.5.0/3"),
        );
        // 2024-07-01 12:00 UTC is summer time under the rule.
        let info = tz.info_at(1_719_835_200);
        assert_eq!(info.utoff, 7200);
        assert!(info.is_dst);
        assert_eq!(info.abbreviation, "CEST");
        // 2024-01-15 12:00 UTC is standard time.
        let info = tz.info_at(1_705_320_000);
        assert_eq!(info.utoff, 3600);
        assert!(!info.is_dst);
    }
}
