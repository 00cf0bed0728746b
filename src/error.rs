// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Unified error type for the engine surface.

use std::fmt;

use tempora_cal::CalendarError;
use tempora_tzif::{TzdbError, TzifError};

/// Error raised when rendering a format template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The template contains a directive this formatter does not know.
    UnknownDirective(String),
    /// The template ends in the middle of a directive.
    TruncatedDirective,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnknownDirective(d) => write!(f, "unknown format directive: {}", d),
            FormatError::TruncatedDirective => write!(f, "format template ends mid-directive"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Any failure the engine can report.
///
/// All failures are deterministic and local to the call that produced them;
/// no partial values are ever returned alongside one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Calendar fields do not name a real date.
    InvalidDate(CalendarError),
    /// Time-of-day fields are out of range.
    InvalidTime {
        hour: u8,
        minute: u8,
        second: u8,
        subsecond: u32,
    },
    /// An instant or conversion falls outside the supported span.
    Range(&'static str),
    /// A format template could not be rendered.
    Format(FormatError),
    /// A binary zone record failed a structural check.
    Record(TzifError),
    /// A zone identifier is not in the embedded database.
    NotFound(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDate(err) => err.fmt(f),
            Error::InvalidTime {
                hour,
                minute,
                second,
                subsecond,
            } => write!(
                f,
                "invalid time of day: {:02}:{:02}:{:02}.{}",
                hour, minute, second, subsecond
            ),
            Error::Range(what) => write!(f, "out of range: {}", what),
            Error::Format(err) => err.fmt(f),
            Error::Record(err) => err.fmt(f),
            Error::NotFound(name) => write!(f, "unknown timezone: {}", name),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidDate(err) => Some(err),
            Error::Format(err) => Some(err),
            Error::Record(err) => Some(err),
            Error::InvalidTime { .. } | Error::Range(_) | Error::NotFound(_) => None,
        }
    }
}

impl From<CalendarError> for Error {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::YearOutOfRange(_) => Error::Range("year outside supported span"),
            other => Error::InvalidDate(other),
        }
    }
}

impl From<FormatError> for Error {
    fn from(err: FormatError) -> Self {
        Error::Format(err)
    }
}

impl From<TzifError> for Error {
    fn from(err: TzifError) -> Self {
        Error::Record(err)
    }
}

impl From<TzdbError> for Error {
    fn from(err: TzdbError) -> Self {
        match err {
            TzdbError::NotFound(name) => Error::NotFound(name),
            TzdbError::Record(err) => Error::Record(err),
        }
    }
}
