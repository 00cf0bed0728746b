// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The datetime engine: instants, resolutions and zone-aware conversion.

use std::sync::Arc;

use tempora_cal::{date_to_unix_days, unix_days_to_date, Date};
use tempora_tzif::TimeZone;

use crate::error::Error;

const NANOS_PER_SEC: i128 = 1_000_000_000;
const SECONDS_PER_DAY: i64 = 86_400;

/// First supported instant, 0001-01-01T00:00:00Z.
const MIN_EPOCH_SECS: i64 = -62_135_596_800;
/// Last supported instant, 9999-12-31T23:59:59Z.
const MAX_EPOCH_SECS: i64 = 253_402_300_799;

/// Sub-second resolution of an epoch value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
}

impl Resolution {
    /// Number of ticks of this resolution per second.
    pub fn ticks_per_second(self) -> i64 {
        match self {
            Resolution::Second => 1,
            Resolution::Millisecond => 1_000,
            Resolution::Microsecond => 1_000_000,
            Resolution::Nanosecond => 1_000_000_000,
        }
    }

    fn nanos_per_tick(self) -> i128 {
        NANOS_PER_SEC / self.ticks_per_second() as i128
    }
}

/// An integer count tagged with the resolution it is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration {
    pub count: i64,
    pub resolution: Resolution,
}

impl Duration {
    pub fn new(count: i64, resolution: Resolution) -> Self {
        Duration { count, resolution }
    }

    /// Re-express the count at a different resolution. Narrowing truncates
    /// toward negative infinity; a count that does not fit the target
    /// resolution is a range error.
    pub fn convert_to(self, resolution: Resolution) -> Result<Duration, Error> {
        let nanos = self.count as i128 * self.resolution.nanos_per_tick();
        let count = i64::try_from(nanos.div_euclid(resolution.nanos_per_tick()))
            .map_err(|_| Error::Range("duration does not fit target resolution"))?;
        Ok(Duration { count, resolution })
    }
}

/// Civil wall-clock fields used to construct a [`Datetime`].
///
/// `subsecond` counts ticks of the resolution the datetime is constructed
/// with, so for [`Resolution::Second`] it must be zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CivilTime {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub subsecond: u32,
}

/// Civil fields derived from a [`Datetime`], in its zone's wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatetimeFields {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanosecond: u32,
    /// UTC offset of the zone at this instant, seconds east of Greenwich.
    pub utc_offset_secs: i32,
}

/// An instant on the Unix time scale, at a chosen resolution, optionally
/// tied to a timezone.
///
/// Only the instant is stored; civil fields are derived on demand so the
/// two can never disagree. Equality compares the absolute instant and the
/// resolution; the zone is presentation, not identity.
#[derive(Debug, Clone)]
pub struct Datetime {
    epoch_nanos: i128,
    resolution: Resolution,
    zone: Option<Arc<TimeZone>>,
}

impl PartialEq for Datetime {
    fn eq(&self, other: &Self) -> bool {
        self.epoch_nanos == other.epoch_nanos && self.resolution == other.resolution
    }
}

impl Eq for Datetime {}

impl Datetime {
    /// Construct from an epoch value counted in ticks of `resolution`.
    ///
    /// Fails with a range error for instants outside the supported
    /// 0001-01-01 to 9999-12-31 span.
    pub fn from_unix(
        value: i64,
        resolution: Resolution,
        zone: Option<Arc<TimeZone>>,
    ) -> Result<Self, Error> {
        let epoch_nanos = value as i128 * resolution.nanos_per_tick();
        let secs = epoch_nanos.div_euclid(NANOS_PER_SEC) as i64;
        if !(MIN_EPOCH_SECS..=MAX_EPOCH_SECS).contains(&secs) {
            return Err(Error::Range("epoch value outside supported span"));
        }
        Ok(Datetime {
            epoch_nanos,
            resolution,
            zone,
        })
    }

    /// Construct from civil wall-clock fields interpreted in `zone`
    /// (UTC when absent).
    pub fn from_fields(
        civil: CivilTime,
        resolution: Resolution,
        zone: Option<Arc<TimeZone>>,
    ) -> Result<Self, Error> {
        let date = Date::new(civil.year, civil.month, civil.day)?;
        let ticks = resolution.ticks_per_second();
        if civil.hour > 23
            || civil.minute > 59
            || civil.second > 59
            || i64::from(civil.subsecond) >= ticks
        {
            return Err(Error::InvalidTime {
                hour: civil.hour,
                minute: civil.minute,
                second: civil.second,
                subsecond: civil.subsecond,
            });
        }

        let civil_secs = date_to_unix_days(date) * SECONDS_PER_DAY
            + i64::from(civil.hour) * 3600
            + i64::from(civil.minute) * 60
            + i64::from(civil.second);

        // Wall time to UTC needs the offset, which itself depends on the
        // UTC instant; one refinement pass settles everywhere except the
        // instants a DST jump removes, which resolve to the pre-jump
        // offset.
        let utc_secs = match &zone {
            None => civil_secs,
            Some(tz) => {
                let guess = civil_secs - i64::from(tz.offset_at(civil_secs));
                civil_secs - i64::from(tz.offset_at(guess))
            },
        };
        if !(MIN_EPOCH_SECS..=MAX_EPOCH_SECS).contains(&utc_secs) {
            return Err(Error::Range("epoch value outside supported span"));
        }

        let subsec_nanos = i128::from(civil.subsecond) * resolution.nanos_per_tick();
        Ok(Datetime {
            epoch_nanos: i128::from(utc_secs) * NANOS_PER_SEC + subsec_nanos,
            resolution,
            zone,
        })
    }

    /// The epoch value in ticks of `resolution`.
    ///
    /// Widening is lossless; narrowing truncates toward negative infinity.
    /// Fails with a range error when the value does not fit an `i64`.
    pub fn to_unix(&self, resolution: Resolution) -> Result<i64, Error> {
        i64::try_from(self.epoch_nanos.div_euclid(resolution.nanos_per_tick()))
            .map_err(|_| Error::Range("epoch value does not fit target resolution"))
    }

    /// Re-frame the same absolute instant under a different zone's wall
    /// clock. The instant never changes, only the derived civil fields and
    /// offset.
    pub fn tz_convert(&self, zone: Option<Arc<TimeZone>>) -> Datetime {
        Datetime {
            epoch_nanos: self.epoch_nanos,
            resolution: self.resolution,
            zone,
        }
    }

    /// Convenience wrapper over [`Datetime::tz_convert`] that looks the
    /// zone up in the embedded database.
    pub fn tz_convert_named(&self, name: &str) -> Result<Datetime, Error> {
        Ok(self.tz_convert(Some(TimeZone::named(name)?)))
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn zone(&self) -> Option<&Arc<TimeZone>> {
        self.zone.as_ref()
    }

    /// Whole seconds since the Unix epoch.
    pub fn unix_seconds(&self) -> i64 {
        self.epoch_nanos.div_euclid(NANOS_PER_SEC) as i64
    }

    /// UTC offset of the zone at this instant, in seconds (zero for UTC).
    pub fn offset_seconds(&self) -> i32 {
        match &self.zone {
            None => 0,
            Some(tz) => tz.offset_at(self.unix_seconds()),
        }
    }

    /// Derive the civil fields of this instant in its zone's wall clock.
    pub fn fields(&self) -> DatetimeFields {
        let secs = self.unix_seconds();
        let nanosecond = self.epoch_nanos.rem_euclid(NANOS_PER_SEC) as u32;
        let utc_offset_secs = self.offset_seconds();

        let local = secs + i64::from(utc_offset_secs);
        let date = unix_days_to_date(local.div_euclid(SECONDS_PER_DAY));
        let second_of_day = local.rem_euclid(SECONDS_PER_DAY);

        DatetimeFields {
            year: date.year,
            month: date.month,
            day: date.day,
            hour: (second_of_day / 3600) as u8,
            minute: (second_of_day % 3600 / 60) as u8,
            second: (second_of_day % 60) as u8,
            nanosecond,
            utc_offset_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_zero_is_unix_epoch() {
        let dt = Datetime::from_unix(0, Resolution::Second, None).unwrap();
        let f = dt.fields();
        assert_eq!((f.year, f.month, f.day), (1970, 1, 1));
        assert_eq!((f.hour, f.minute, f.second, f.nanosecond), (0, 0, 0, 0));
        assert_eq!(f.utc_offset_secs, 0);
    }

    #[test]
    fn negative_epochs_floor_correctly() {
        let dt = Datetime::from_unix(-1, Resolution::Second, None).unwrap();
        let f = dt.fields();
        assert_eq!((f.year, f.month, f.day), (1969, 12, 31));
        assert_eq!((f.hour, f.minute, f.second), (23, 59, 59));

        // -1 millisecond is still 1969-12-31T23:59:59.999.
        let dt = Datetime::from_unix(-1, Resolution::Millisecond, None).unwrap();
        let f = dt.fields();
        assert_eq!((f.second, f.nanosecond), (59, 999_000_000));
    }

    #[test]
    fn resolution_rescaling() {
        let dt = Datetime::from_unix(1_500, Resolution::Millisecond, None).unwrap();
        assert_eq!(dt.to_unix(Resolution::Millisecond).unwrap(), 1_500);
        assert_eq!(dt.to_unix(Resolution::Microsecond).unwrap(), 1_500_000);
        assert_eq!(dt.to_unix(Resolution::Nanosecond).unwrap(), 1_500_000_000);
        // Narrowing truncates toward negative infinity.
        assert_eq!(dt.to_unix(Resolution::Second).unwrap(), 1);
        let dt = Datetime::from_unix(-1_500, Resolution::Millisecond, None).unwrap();
        assert_eq!(dt.to_unix(Resolution::Second).unwrap(), -2);
    }

    #[test]
    fn nanosecond_overflow_is_a_range_error() {
        let dt = Datetime::from_fields(
            CivilTime {
                year: 9999,
                month: 12,
                day: 31,
                hour: 23,
                minute: 59,
                second: 59,
                subsecond: 0,
            },
            Resolution::Second,
            None,
        )
        .unwrap();
        assert_eq!(dt.to_unix(Resolution::Second).unwrap(), 253_402_300_799);
        assert!(matches!(
            dt.to_unix(Resolution::Nanosecond),
            Err(Error::Range(_))
        ));
    }

    #[test]
    fn span_boundaries() {
        assert!(Datetime::from_unix(MIN_EPOCH_SECS, Resolution::Second, None).is_ok());
        assert!(Datetime::from_unix(MAX_EPOCH_SECS, Resolution::Second, None).is_ok());
        assert!(matches!(
            Datetime::from_unix(MIN_EPOCH_SECS - 1, Resolution::Second, None),
            Err(Error::Range(_))
        ));
        assert!(matches!(
            Datetime::from_unix(MAX_EPOCH_SECS + 1, Resolution::Second, None),
            Err(Error::Range(_))
        ));
        assert!(matches!(
            Datetime::from_unix((MAX_EPOCH_SECS + 1) * 1_000, Resolution::Millisecond, None),
            Err(Error::Range(_))
        ));
    }

    #[test]
    fn from_fields_round_trips_to_unix() {
        let civil = CivilTime {
            year: 2024,
            month: 3,
            day: 10,
            hour: 6,
            minute: 59,
            second: 59,
            subsecond: 123,
        };
        let dt = Datetime::from_fields(civil, Resolution::Millisecond, None).unwrap();
        let f = dt.fields();
        assert_eq!((f.year, f.month, f.day), (2024, 3, 10));
        assert_eq!((f.hour, f.minute, f.second), (6, 59, 59));
        assert_eq!(f.nanosecond, 123_000_000);
        assert_eq!(
            dt.to_unix(Resolution::Millisecond).unwrap(),
            1_710_053_999_123
        );
    }

    #[test]
    fn from_fields_validates() {
        let base = CivilTime {
            year: 2024,
            month: 2,
            day: 29,
            ..CivilTime::default()
        };
        assert!(Datetime::from_fields(base, Resolution::Second, None).is_ok());
        assert!(matches!(
            Datetime::from_fields(
                CivilTime { year: 2023, ..base },
                Resolution::Second,
                None
            ),
            Err(Error::InvalidDate(_))
        ));
        assert!(matches!(
            Datetime::from_fields(CivilTime { hour: 24, ..base }, Resolution::Second, None),
            Err(Error::InvalidTime { .. })
        ));
        assert!(matches!(
            Datetime::from_fields(CivilTime { second: 60, ..base }, Resolution::Second, None),
            Err(Error::InvalidTime { .. })
        ));
        // Subsecond is bounded by the resolution's tick count.
        assert!(matches!(
            Datetime::from_fields(
                CivilTime { subsecond: 1, ..base },
                Resolution::Second,
                None
            ),
            Err(Error::InvalidTime { .. })
        ));
        assert!(matches!(
            Datetime::from_fields(
                CivilTime { subsecond: 1_000, ..base },
                Resolution::Millisecond,
                None
            ),
            Err(Error::InvalidTime { .. })
        ));
        assert!(Datetime::from_fields(
            CivilTime { subsecond: 999, ..base },
            Resolution::Millisecond,
            None
        )
        .is_ok());
    }

    #[test]
    fn zoned_from_fields_subtracts_offset() {
        let tokyo = TimeZone::named("Asia/Tokyo").unwrap();
        let civil = CivilTime {
            year: 1970,
            month: 1,
            day: 1,
            hour: 9,
            ..CivilTime::default()
        };
        let dt = Datetime::from_fields(civil, Resolution::Second, Some(tokyo)).unwrap();
        assert_eq!(dt.to_unix(Resolution::Second).unwrap(), 0);
    }

    #[test]
    fn tz_convert_keeps_the_instant() {
        let tokyo = TimeZone::named("Asia/Tokyo").unwrap();
        let new_york = TimeZone::named("America/New_York").unwrap();

        let dt = Datetime::from_unix(1_700_000_000, Resolution::Second, Some(tokyo)).unwrap();
        let converted = dt.tz_convert(Some(Arc::clone(&new_york)));
        assert_eq!(converted, dt);
        assert_eq!(
            converted.to_unix(Resolution::Second).unwrap(),
            dt.to_unix(Resolution::Second).unwrap()
        );
        // Round trip restores the original wall clock too.
        let back = converted.tz_convert(dt.zone().cloned());
        assert_eq!(back.fields(), dt.fields());
    }

    #[test]
    fn duration_conversions() {
        let d = Duration::new(90, Resolution::Second);
        assert_eq!(
            d.convert_to(Resolution::Millisecond).unwrap(),
            Duration::new(90_000, Resolution::Millisecond)
        );
        let d = Duration::new(1_999, Resolution::Millisecond);
        assert_eq!(
            d.convert_to(Resolution::Second).unwrap(),
            Duration::new(1, Resolution::Second)
        );
        let d = Duration::new(-1_999, Resolution::Millisecond);
        assert_eq!(
            d.convert_to(Resolution::Second).unwrap(),
            Duration::new(-2, Resolution::Second)
        );
        let d = Duration::new(i64::MAX, Resolution::Second);
        assert!(matches!(
            d.convert_to(Resolution::Nanosecond),
            Err(Error::Range(_))
        ));
    }
}
