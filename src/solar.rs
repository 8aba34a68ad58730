// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sunrise, sunset and twilight boundaries.
//!
//! A low-precision solar series (mean anomaly, equation of center, ecliptic
//! longitude) gives the Sun's declination and the instant of solar transit
//! for the daily cycle nearest a reference instant. Each event is then the
//! transit shifted by the hour angle at which the Sun crosses a given
//! altitude:
//!
//! | Event | Altitude |
//! |-------|----------|
//! | sunrise / sunset | −0.833° |
//! | civil dawn / dusk | −6° |
//! | nautical dawn / dusk | −12° |
//! | astronomical dawn / dusk | −18° |
//! | golden hour end / start | +6° |
//!
//! An observing night straddles two calendar days, so [`compute_solar_times`]
//! evaluates the cycle at the observer's mean solar noon of day N (dusk side)
//! and of day N+1 (dawn side).

use chrono::{DateTime, NaiveDate, Utc};
use qtty::{Degrees, Radian};
use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::coordinates::EquatorialCoordinates;
use crate::error::{NightError, Result};
use crate::observer::{check_supported, next_day, Observer};
use crate::period::UtcPeriod;
use crate::{Interval, Time, J2000};

/// Correction between mean solar transit and the day-number grid.
const TRANSIT_OFFSET: f64 = 0.0009;

/// Altitude of the Sun's centre at each boundary the engine reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunAltitude {
    /// Upper limb on the refracted horizon.
    Horizon,
    Civil,
    Nautical,
    Astronomical,
    GoldenHour,
}

impl SunAltitude {
    pub const fn altitude(self) -> Degrees {
        match self {
            SunAltitude::Horizon => Degrees::new(-0.833),
            SunAltitude::Civil => Degrees::new(-6.0),
            SunAltitude::Nautical => Degrees::new(-12.0),
            SunAltitude::Astronomical => Degrees::new(-18.0),
            SunAltitude::GoldenHour => Degrees::new(6.0),
        }
    }
}

fn solar_mean_anomaly(days: f64) -> Degrees {
    Degrees::new(357.5291 + 0.985_600_28 * days)
}

fn ecliptic_longitude(mean_anomaly: Degrees) -> Degrees {
    let m = mean_anomaly;
    let center = 1.9148 * m.sin() + 0.02 * (m * 2.0).sin() + 0.0003 * (m * 3.0).sin();
    // Perihelion of the Earth plus 180° to go from Earth to Sun.
    m + Degrees::new(center + 102.9372 + 180.0)
}

/// Geocentric equatorial position of the Sun at `instant`.
pub fn sun_position(instant: DateTime<Utc>) -> EquatorialCoordinates {
    let days = Time::<J2000>::from_utc(instant).value();
    let longitude = ecliptic_longitude(solar_mean_anomaly(days));
    EquatorialCoordinates::from_ecliptic(longitude, Degrees::new(0.0))
}

/// The Sun's transit and declination for one daily cycle.
#[derive(Debug, Clone, Copy)]
struct DailyCycle {
    cycle: f64,
    west_longitude: f64,
    latitude: Degrees,
    mean_anomaly: Degrees,
    longitude: Degrees,
    declination: Degrees,
    transit: f64,
}

impl DailyCycle {
    /// Cycle whose transit lies nearest `instant`.
    fn nearest(instant: DateTime<Utc>, observer: &Observer) -> Self {
        let days = Time::<J2000>::from_utc(instant).value();
        let west_longitude = -observer.longitude().to::<Radian>().value();
        let cycle = (days - TRANSIT_OFFSET - west_longitude / TAU).round();

        let approx = Self::approx_transit(0.0, west_longitude, cycle);
        let mean_anomaly = solar_mean_anomaly(approx);
        let longitude = ecliptic_longitude(mean_anomaly);
        let declination =
            EquatorialCoordinates::from_ecliptic(longitude, Degrees::new(0.0)).declination;

        Self {
            cycle,
            west_longitude,
            latitude: observer.latitude(),
            mean_anomaly,
            longitude,
            declination,
            transit: Self::transit_j2000(approx, mean_anomaly, longitude),
        }
    }

    fn approx_transit(hour_angle: f64, west_longitude: f64, cycle: f64) -> f64 {
        TRANSIT_OFFSET + (hour_angle + west_longitude) / TAU + cycle
    }

    fn transit_j2000(days: f64, mean_anomaly: Degrees, longitude: Degrees) -> f64 {
        days + 0.0053 * mean_anomaly.sin() - 0.0069 * (longitude * 2.0).sin()
    }

    fn instant(days_since_j2000: f64) -> Option<DateTime<Utc>> {
        Time::<J2000>::new(days_since_j2000).to_jd().to_utc()
    }

    fn noon(&self) -> Option<DateTime<Utc>> {
        Self::instant(self.transit)
    }

    fn nadir(&self) -> Option<DateTime<Utc>> {
        Self::instant(self.transit - 0.5)
    }

    /// Morning and evening crossings of `altitude`, or `None` when the Sun
    /// stays entirely above or below it for this cycle.
    fn crossings(&self, altitude: Degrees) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let (sin_phi, cos_phi) = self.latitude.sin_cos();
        let (sin_dec, cos_dec) = self.declination.sin_cos();

        let cos_h = (altitude.sin() - sin_phi * sin_dec) / (cos_phi * cos_dec);
        if !cos_h.is_finite() || !(-1.0..=1.0).contains(&cos_h) {
            return None;
        }

        let approx = Self::approx_transit(cos_h.acos(), self.west_longitude, self.cycle);
        let set = Self::transit_j2000(approx, self.mean_anomaly, self.longitude);
        let rise = self.transit - (set - self.transit);
        Some((Self::instant(rise)?, Self::instant(set)?))
    }

    fn rising(&self, altitude: SunAltitude) -> Option<DateTime<Utc>> {
        self.crossings(altitude.altitude()).map(|(rise, _)| rise)
    }

    fn setting(&self, altitude: SunAltitude) -> Option<DateTime<Utc>> {
        self.crossings(altitude.altitude()).map(|(_, set)| set)
    }
}

/// Solar events for the night that starts on a given calendar date.
///
/// Dusk-side fields, `sunrise`, `solar_noon`, `nadir` and the golden-hour
/// pair belong to day N; dawn-side fields and `next_sunrise` belong to day
/// N+1. Any event the Sun does not reach at this latitude is `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SolarTimes {
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub civil_dusk: Option<DateTime<Utc>>,
    pub nautical_dusk: Option<DateTime<Utc>>,
    pub astronomical_dusk: Option<DateTime<Utc>>,
    pub civil_dawn: Option<DateTime<Utc>>,
    pub nautical_dawn: Option<DateTime<Utc>>,
    pub astronomical_dawn: Option<DateTime<Utc>>,
    pub solar_noon: DateTime<Utc>,
    pub nadir: DateTime<Utc>,
    pub next_sunrise: Option<DateTime<Utc>>,
    /// Evening golden hour starts (Sun descending through +6°).
    pub golden_hour: Option<DateTime<Utc>>,
    /// Morning golden hour ends (Sun ascending through +6°).
    pub golden_hour_end: Option<DateTime<Utc>>,
}

/// Compute [`SolarTimes`] for `date` at `observer`.
///
/// # Errors
///
/// [`NightError::InvalidDate`] when `date` is outside
/// [`SUPPORTED_YEARS`](crate::SUPPORTED_YEARS).
pub fn compute_solar_times(date: NaiveDate, observer: &Observer) -> Result<SolarTimes> {
    let date = check_supported(date)?;
    let today = DailyCycle::nearest(observer.local_noon(date), observer);
    let tomorrow = DailyCycle::nearest(observer.local_noon(next_day(date)?), observer);

    let out_of_range = || NightError::InvalidDate(format!("{date} is outside the supported range"));

    Ok(SolarTimes {
        sunrise: today.rising(SunAltitude::Horizon),
        sunset: today.setting(SunAltitude::Horizon),
        civil_dusk: today.setting(SunAltitude::Civil),
        nautical_dusk: today.setting(SunAltitude::Nautical),
        astronomical_dusk: today.setting(SunAltitude::Astronomical),
        civil_dawn: tomorrow.rising(SunAltitude::Civil),
        nautical_dawn: tomorrow.rising(SunAltitude::Nautical),
        astronomical_dawn: tomorrow.rising(SunAltitude::Astronomical),
        solar_noon: today.noon().ok_or_else(out_of_range)?,
        nadir: today.nadir().ok_or_else(out_of_range)?,
        next_sunrise: tomorrow.rising(SunAltitude::Horizon),
        golden_hour: today.setting(SunAltitude::GoldenHour),
        golden_hour_end: today.rising(SunAltitude::GoldenHour),
    })
}

/// Astronomical dusk to the following astronomical dawn, if the Sun gets
/// 18° below the horizon and dusk precedes dawn.
pub fn darkness_window(solar: &SolarTimes) -> Option<UtcPeriod> {
    Interval::checked(solar.astronomical_dusk?, solar.astronomical_dawn?)
}
