// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observer location and calendar-date anchoring.
//!
//! The engine never sees a time zone. A calendar date is pinned to the
//! observer's *mean solar* noon or midnight (UTC shifted by `−longitude/15`
//! hours), which lands within an hour or so of civil time anywhere on Earth
//! and keeps every computation a pure function of `(date, lat, lng)`.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use qtty::Degrees;
use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{NightError, Result};

/// Calendar years accepted by the providers.
///
/// Every night in this range can be computed, including its following day
/// (dawn, next moonrise), which for 9998-12-31 falls in 9999.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = -9_999..=9_998;

/// A validated geographic location.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Observer {
    latitude: Degrees,
    longitude: Degrees,
}

impl Observer {
    /// Create an observer from latitude and east-positive longitude in degrees.
    ///
    /// # Errors
    ///
    /// [`NightError::InvalidLatitude`] / [`NightError::InvalidLongitude`] for
    /// non-finite or out-of-range values.
    ///
    /// ```
    /// use astronight::Observer;
    ///
    /// let colorado = Observer::new(39.5, -105.0).unwrap();
    /// assert_eq!(colorado.latitude().value(), 39.5);
    /// assert!(Observer::new(91.0, 0.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(NightError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(NightError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude: Degrees::new(latitude),
            longitude: Degrees::new(longitude),
        })
    }

    #[inline]
    pub fn latitude(&self) -> Degrees {
        self.latitude
    }

    /// East-positive longitude.
    #[inline]
    pub fn longitude(&self) -> Degrees {
        self.longitude
    }

    /// Offset of local mean solar time from UTC.
    fn mean_solar_offset(&self) -> Duration {
        Duration::milliseconds((self.longitude.value() * 240_000.0).round() as i64)
    }

    /// Mean solar noon of `date` at this location.
    pub fn local_noon(&self, date: NaiveDate) -> DateTime<Utc> {
        self.local_midnight(date) + Duration::hours(12)
    }

    /// Mean solar midnight that opens `date` at this location.
    pub fn local_midnight(&self, date: NaiveDate) -> DateTime<Utc> {
        date.and_time(NaiveTime::MIN).and_utc() - self.mean_solar_offset()
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| NightError::InvalidDate(format!("{input:?}: {e}")))
}

/// Reject dates outside [`SUPPORTED_YEARS`].
pub(crate) fn check_supported(date: NaiveDate) -> Result<NaiveDate> {
    if SUPPORTED_YEARS.contains(&date.year()) {
        Ok(date)
    } else {
        Err(NightError::InvalidDate(format!(
            "{date} is outside the supported years {}..={}",
            SUPPORTED_YEARS.start(),
            SUPPORTED_YEARS.end()
        )))
    }
}

/// The calendar day after `date`.
pub(crate) fn next_day(date: NaiveDate) -> Result<NaiveDate> {
    date.succ_opt()
        .ok_or_else(|| NightError::InvalidDate(format!("{date} has no following day")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rejects_out_of_range_coordinates() {
        assert_eq!(
            Observer::new(-90.5, 0.0),
            Err(NightError::InvalidLatitude(-90.5))
        );
        assert_eq!(
            Observer::new(0.0, 180.25),
            Err(NightError::InvalidLongitude(180.25))
        );
        assert!(matches!(
            Observer::new(f64::NAN, 0.0),
            Err(NightError::InvalidLatitude(_))
        ));
        assert!(Observer::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_accepts_range_edges() {
        assert!(Observer::new(90.0, -180.0).is_ok());
        assert!(Observer::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn test_local_noon_tracks_longitude() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 20).unwrap();
        let colorado = Observer::new(39.5, -105.0).unwrap();
        assert_eq!(
            colorado.local_noon(date),
            Utc.with_ymd_and_hms(2025, 9, 20, 19, 0, 0).unwrap()
        );
        assert_eq!(
            colorado.local_midnight(date),
            Utc.with_ymd_and_hms(2025, 9, 20, 7, 0, 0).unwrap()
        );

        let tokyo = Observer::new(35.7, 139.7).unwrap();
        let noon = tokyo.local_noon(date);
        assert_eq!(noon.date_naive(), NaiveDate::from_ymd_opt(2025, 9, 20).unwrap());
        assert!(noon < Utc.with_ymd_and_hms(2025, 9, 20, 3, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_iso_date("2025-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );
        assert!(matches!(
            parse_iso_date("2025-02-30"),
            Err(NightError::InvalidDate(_))
        ));
        assert!(parse_iso_date("15/01/2025").is_err());
    }

    #[test]
    fn test_check_supported() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(check_supported(date), Ok(date));
        assert!(check_supported(NaiveDate::from_ymd_opt(9_998, 12, 31).unwrap()).is_ok());
        assert!(check_supported(NaiveDate::from_ymd_opt(9_999, 1, 1).unwrap()).is_err());
        assert!(matches!(
            check_supported(NaiveDate::MAX),
            Err(NightError::InvalidDate(_))
        ));
        assert!(check_supported(NaiveDate::MIN).is_err());
    }

    #[test]
    fn test_next_day_rolls_over_year() {
        let eve = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(
            next_day(eve).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert!(next_day(NaiveDate::MAX).is_err());
    }
}
