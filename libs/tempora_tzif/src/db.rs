// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Zone lookup against the embedded tzdata mapping.
//!
//! The mapping itself is produced at build time and immutable for the whole
//! run, so it can be consulted concurrently without locking. Parsed records
//! are cached behind a read-mostly lock; concurrent first-time lookups of
//! the same zone may parse twice but only one result is ever stored.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::parser::TzifError;
use crate::record::TimeZone;

/// Error returned by database-backed zone lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TzdbError {
    /// The identifier is not present in the embedded database.
    NotFound(String),
    /// The zone's raw record failed to parse.
    Record(TzifError),
}

impl fmt::Display for TzdbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TzdbError::NotFound(name) => write!(f, "unknown timezone: {}", name),
            TzdbError::Record(err) => write!(f, "invalid timezone record: {}", err),
        }
    }
}

impl Error for TzdbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TzdbError::Record(err) => Some(err),
            TzdbError::NotFound(_) => None,
        }
    }
}

impl From<TzifError> for TzdbError {
    fn from(err: TzifError) -> Self {
        TzdbError::Record(err)
    }
}

/// Cache of parsed records, keyed by canonical zone name.
static RECORD_CACHE: Lazy<RwLock<HashMap<&'static str, Arc<TimeZone>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Look up a zone's raw record bytes by exact, case-sensitive identifier.
///
/// Returns the canonical name alongside the bytes.
pub fn lookup(name: &str) -> Result<(&'static str, &'static [u8]), TzdbError> {
    // The embedded index matches case-insensitively; only the canonical
    // spelling is a valid identifier here.
    jiff_tzdb::get(name)
        .filter(|&(canonical, _)| canonical == name)
        .ok_or_else(|| TzdbError::NotFound(name.to_string()))
}

/// All canonical zone identifiers in the embedded database.
pub fn available_zones() -> impl Iterator<Item = &'static str> {
    jiff_tzdb::available()
}

impl TimeZone {
    /// Look up and parse a zone by IANA identifier, e.g.
    /// `"America/New_York"`. Each zone is parsed once per process and
    /// shared thereafter.
    pub fn named(name: &str) -> Result<Arc<TimeZone>, TzdbError> {
        let (canonical, bytes) = lookup(name)?;

        if let Ok(cache) = RECORD_CACHE.read() {
            if let Some(tz) = cache.get(canonical) {
                return Ok(Arc::clone(tz));
            }
        }

        let mut parsed = TimeZone::parse(bytes)?;
        parsed.name = Some(canonical.to_string());
        debug!(zone = canonical, transitions = parsed.transitions.len(), "parsed timezone record");

        let arc = Arc::new(parsed);
        match RECORD_CACHE.write() {
            Ok(mut cache) => Ok(Arc::clone(cache.entry(canonical).or_insert(arc))),
            // A poisoned lock only loses caching, not correctness.
            Err(_) => Ok(arc),
        }
    }
}
