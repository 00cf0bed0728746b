// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! POSIX TZ rule strings, as found in the footer of version 2+ zone records.
//!
//! The grammar is `std offset [dst [offset] , start[/time] , end[/time]]`,
//! e.g. `EST5EDT,M3.2.0,M11.1.0`. Offsets are stored here with the POSIX
//! sign already inverted, so positive means east of Greenwich like
//! everywhere else in this crate.

use tempora_cal::{date_to_unix_days, days_in_month, is_leap_year, weekday, Date};

use crate::record::TzInfo;

const SECONDS_PER_DAY: i64 = 86_400;

/// A recurring DST rule extrapolating a zone past its explicit transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PosixTz {
    std_abbr: String,
    /// Standard-time UTC offset in seconds, positive east of Greenwich.
    std_utoff: i32,
    dst: Option<DstRule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DstRule {
    abbr: String,
    /// DST UTC offset in seconds, positive east of Greenwich.
    utoff: i32,
    /// Transition into DST: date rule plus local time of day in seconds.
    start: (RuleDay, i32),
    /// Transition back to standard time.
    end: (RuleDay, i32),
}

/// The three POSIX date-rule forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleDay {
    /// `Jn`: 1-based Julian day 1..=365, leap day never counted.
    Julian1(u16),
    /// `n`: 0-based Julian day 0..=365, leap day counted in leap years.
    Julian0(u16),
    /// `Mm.w.d`: the `w`th (5 = last) weekday `d` of month `m`.
    MonthWeekDay { month: u8, week: u8, weekday: u8 },
}

impl RuleDay {
    /// Unix day number of this rule's transition day in the given year.
    fn to_unix_day(self, year: i32) -> i64 {
        let jan1 = date_to_unix_days(Date { year, month: 1, day: 1 });
        match self {
            RuleDay::Julian0(n) => jan1 + i64::from(n),
            RuleDay::Julian1(n) => {
                // J60 is always March 1, so leap years skip over Feb 29.
                let leap_shift = i64::from(is_leap_year(year) && n >= 60);
                jan1 + i64::from(n) - 1 + leap_shift
            },
            RuleDay::MonthWeekDay { month, week, weekday: wd } => {
                let first = date_to_unix_days(Date { year, month, day: 1 });
                let first_wd = weekday(first);
                let days_forward = i64::from((wd + 7 - first_wd) % 7);
                if week <= 4 {
                    first + days_forward + i64::from(week - 1) * 7
                } else {
                    // "Last": the 5th occurrence, pulled back a week when
                    // it falls outside the month.
                    let day_of_month = 1 + days_forward + 28;
                    if day_of_month > i64::from(days_in_month(year, month)) {
                        first + days_forward + 21
                    } else {
                        first + days_forward + 28
                    }
                }
            },
        }
    }
}

impl PosixTz {
    /// Resolve the offset information in effect at a UTC instant.
    pub(crate) fn info_at(&self, utc_secs: i64) -> TzInfo<'_> {
        let std_info = TzInfo {
            utoff: self.std_utoff,
            is_dst: false,
            abbreviation: &self.std_abbr,
        };
        let Some(dst) = &self.dst else {
            return std_info;
        };

        // Transition instants are defined in local time of the rule's year.
        let local_year = |utoff: i32| {
            let days = (utc_secs + i64::from(utoff)).div_euclid(SECONDS_PER_DAY);
            tempora_cal::unix_days_to_date(days).year
        };
        // start < end is the northern-hemisphere ordering; otherwise DST
        // wraps around the turn of the year.
        let dst_in_year = |year: i32| {
            let start = transition_instant(year, dst.start, self.std_utoff);
            let end = transition_instant(year, dst.end, dst.utoff);
            if start < end {
                utc_secs >= start && utc_secs < end
            } else {
                utc_secs >= start || utc_secs < end
            }
        };

        let year = local_year(self.std_utoff);
        let mut active = dst_in_year(year);
        // The DST shift can carry the local date into the adjacent year
        // around local New Year; the rules of that year are the ones that
        // apply then.
        if active {
            let adjacent = local_year(dst.utoff);
            if adjacent != year {
                active = dst_in_year(adjacent);
            }
        }
        if active {
            TzInfo {
                utoff: dst.utoff,
                is_dst: true,
                abbreviation: &dst.abbr,
            }
        } else {
            std_info
        }
    }
}

/// UTC instant of a transition in the given year. `current_utoff` is the
/// offset in effect until the transition happens, since the rule's time of
/// day is expressed in that frame.
fn transition_instant(year: i32, (day, time_of_day): (RuleDay, i32), current_utoff: i32) -> i64 {
    day.to_unix_day(year) * SECONDS_PER_DAY + i64::from(time_of_day) - i64::from(current_utoff)
}

/// Parse a POSIX TZ string. Returns `None` on any grammar violation or
/// trailing garbage.
pub(crate) fn parse(bytes: &[u8]) -> Option<PosixTz> {
    let (std_abbr, rest) = parse_abbreviation(bytes)?;
    let (raw_offset, rest) = parse_offset(rest, false)?;
    // POSIX offsets are west-positive; invert once on entry.
    let std_utoff = -raw_offset;

    if rest.is_empty() {
        return Some(PosixTz {
            std_abbr,
            std_utoff,
            dst: None,
        });
    }

    let (dst_abbr, rest) = parse_abbreviation(rest)?;
    // DST offset defaults to one hour ahead of standard time.
    let (dst_utoff, rest) = match parse_offset(rest, false) {
        Some((raw, rest)) => (-raw, rest),
        None => (std_utoff + 3600, rest),
    };

    let rest = strip_prefix(rest, b',')?;
    let (start_day, rest) = parse_rule_day(rest)?;
    let (start_time, rest) = parse_rule_time(rest)?;
    let rest = strip_prefix(rest, b',')?;
    let (end_day, rest) = parse_rule_day(rest)?;
    let (end_time, rest) = parse_rule_time(rest)?;

    if !rest.is_empty() {
        return None;
    }
    Some(PosixTz {
        std_abbr,
        std_utoff,
        dst: Some(DstRule {
            abbr: dst_abbr,
            utoff: dst_utoff,
            start: (start_day, start_time),
            end: (end_day, end_time),
        }),
    })
}

fn strip_prefix(bytes: &[u8], byte: u8) -> Option<&[u8]> {
    match bytes.first() {
        Some(&b) if b == byte => Some(&bytes[1..]),
        _ => None,
    }
}

/// An abbreviation: three or more alphabetic characters, or any run of
/// alphanumerics and signs enclosed in angle brackets.
fn parse_abbreviation(bytes: &[u8]) -> Option<(String, &[u8])> {
    if bytes.first() == Some(&b'<') {
        let end = bytes.iter().position(|&b| b == b'>')?;
        let name = &bytes[1..end];
        if name.is_empty() || !name.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'+' || *b == b'-') {
            return None;
        }
        // Quoted names are ASCII by construction.
        Some((String::from_utf8(name.to_vec()).ok()?, &bytes[end + 1..]))
    } else {
        let len = bytes.iter().take_while(|b| b.is_ascii_alphabetic()).count();
        if len < 3 {
            return None;
        }
        Some((
            String::from_utf8(bytes[..len].to_vec()).ok()?,
            &bytes[len..],
        ))
    }
}

/// A decimal number of at most `max_digits` digits. Returns the value and
/// the remaining input; `None` if no digit is present.
fn parse_number(bytes: &[u8], max_digits: usize) -> Option<(u32, &[u8])> {
    let len = bytes
        .iter()
        .take(max_digits)
        .take_while(|b| b.is_ascii_digit())
        .count();
    if len == 0 {
        return None;
    }
    let mut value = 0u32;
    for &b in &bytes[..len] {
        value = value * 10 + u32::from(b - b'0');
    }
    Some((value, &bytes[len..]))
}

/// A signed `h[:mm[:ss]]` time, in seconds. Hours are limited to 24, or 167
/// in the extended form used by transition times.
fn parse_offset(bytes: &[u8], extended: bool) -> Option<(i32, &[u8])> {
    let (sign, rest) = match bytes.first() {
        Some(b'-') => (-1, &bytes[1..]),
        Some(b'+') => (1, &bytes[1..]),
        _ => (1, bytes),
    };
    let limit = if extended { 167 } else { 24 };
    let (hours, mut rest) = parse_number(rest, 3)?;
    if hours > limit {
        return None;
    }
    let mut seconds = hours * 3600;
    for unit in [60u32, 1] {
        match rest.first() {
            Some(b':') => {
                let (value, r) = parse_number(&rest[1..], 2)?;
                if value > 59 {
                    return None;
                }
                seconds += value * unit;
                rest = r;
            },
            _ => break,
        }
    }
    Some((sign * seconds as i32, rest))
}

fn parse_rule_day(bytes: &[u8]) -> Option<(RuleDay, &[u8])> {
    match bytes.first()? {
        b'J' => {
            let (n, rest) = parse_number(&bytes[1..], 3)?;
            if n == 0 || n > 365 {
                return None;
            }
            Some((RuleDay::Julian1(n as u16), rest))
        },
        b'0'..=b'9' => {
            let (n, rest) = parse_number(bytes, 3)?;
            if n > 365 {
                return None;
            }
            Some((RuleDay::Julian0(n as u16), rest))
        },
        b'M' => {
            let (month, rest) = parse_number(&bytes[1..], 2)?;
            let rest = strip_prefix(rest, b'.')?;
            let (week, rest) = parse_number(rest, 1)?;
            let rest = strip_prefix(rest, b'.')?;
            let (wd, rest) = parse_number(rest, 1)?;
            if !(1..=12).contains(&month) || !(1..=5).contains(&week) || wd > 6 {
                return None;
            }
            Some((
                RuleDay::MonthWeekDay {
                    month: month as u8,
                    week: week as u8,
                    weekday: wd as u8,
                },
                rest,
            ))
        },
        _ => None,
    }
}

/// The optional `/time` suffix of a rule date; defaults to 02:00 local.
fn parse_rule_time(bytes: &[u8]) -> Option<(i32, &[u8])> {
    match bytes.first() {
        Some(b'/') => parse_offset(&bytes[1..], true),
        _ => Some((7200, bytes)),
    }
}
