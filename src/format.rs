// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! strftime-style rendering of [`Datetime`] values.

use std::fmt::{self, Write};

use tempora_cal::{date_to_unix_days, day_of_year, weekday, Date};

use crate::datetime::{Datetime, DatetimeFields};
use crate::error::{Error, FormatError};

const WEEKDAY_ABBR: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

impl Datetime {
    /// Render this datetime's wall-clock fields through a strftime-like
    /// template. Unknown or truncated `%` directives are errors rather
    /// than pass-through.
    pub fn format(&self, template: &str) -> Result<String, Error> {
        let fields = self.fields();
        let mut out = String::with_capacity(template.len() + 16);
        let mut chars = template.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.next() {
                None => return Err(FormatError::TruncatedDirective.into()),
                Some('%') => out.push('%'),
                Some('Y') => write_i32(&mut out, fields.year, 4),
                Some('m') => write_u32(&mut out, u32::from(fields.month), 2),
                Some('d') => write_u32(&mut out, u32::from(fields.day), 2),
                Some('H') => write_u32(&mut out, u32::from(fields.hour), 2),
                Some('M') => write_u32(&mut out, u32::from(fields.minute), 2),
                Some('S') => write_u32(&mut out, u32::from(fields.second), 2),
                Some('j') => {
                    let date = Date::new(fields.year, fields.month, fields.day)?;
                    write_u32(&mut out, u32::from(day_of_year(date)), 3);
                },
                Some('a') => {
                    let date = Date::new(fields.year, fields.month, fields.day)?;
                    out.push_str(WEEKDAY_ABBR[usize::from(weekday(date_to_unix_days(date)))]);
                },
                Some('T') => {
                    write_u32(&mut out, u32::from(fields.hour), 2);
                    out.push(':');
                    write_u32(&mut out, u32::from(fields.minute), 2);
                    out.push(':');
                    write_u32(&mut out, u32::from(fields.second), 2);
                },
                Some('z') => write_offset(&mut out, fields.utc_offset_secs, OffsetStyle::Basic),
                Some(':') => match (chars.next(), chars.clone().next()) {
                    (Some(':'), Some('z')) => {
                        chars.next();
                        write_offset(&mut out, fields.utc_offset_secs, OffsetStyle::Full);
                    },
                    (Some('z'), _) => {
                        write_offset(&mut out, fields.utc_offset_secs, OffsetStyle::Extended)
                    },
                    (Some(other), _) => {
                        return Err(FormatError::UnknownDirective(format!("%:{}", other)).into())
                    },
                    (None, _) => return Err(FormatError::TruncatedDirective.into()),
                },
                Some(other) => {
                    return Err(FormatError::UnknownDirective(format!("%{}", other)).into())
                },
            }
        }
        Ok(out)
    }
}

enum OffsetStyle {
    /// `+HHMM`
    Basic,
    /// `+HH:MM`
    Extended,
    /// `+HH:MM:SS`
    Full,
}

fn write_offset(out: &mut String, offset_secs: i32, style: OffsetStyle) {
    out.push(if offset_secs < 0 { '-' } else { '+' });
    let abs = offset_secs.unsigned_abs();
    write_u32(out, abs / 3600, 2);
    if !matches!(style, OffsetStyle::Basic) {
        out.push(':');
    }
    write_u32(out, abs % 3600 / 60, 2);
    if matches!(style, OffsetStyle::Full) {
        out.push(':');
        write_u32(out, abs % 60, 2);
    }
}

fn write_u32(out: &mut String, value: u32, width: usize) {
    let _ = write!(out, "{:0width$}", value, width = width);
}

fn write_i32(out: &mut String, value: i32, width: usize) {
    let _ = write!(out, "{:0width$}", value, width = width);
}

/// ISO 8601 with the zone's offset, `%Y-%m-%dT%H:%M:%S%:z`.
impl fmt::Display for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields();
        let DatetimeFields {
            year,
            month,
            day,
            hour,
            minute,
            second,
            utc_offset_secs,
            ..
        } = fields;
        let sign = if utc_offset_secs < 0 { '-' } else { '+' };
        let abs = utc_offset_secs.unsigned_abs();
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}{:02}:{:02}",
            year,
            month,
            day,
            hour,
            minute,
            second,
            sign,
            abs / 3600,
            abs % 3600 / 60
        )
    }
}
