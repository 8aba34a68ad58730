// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Equatorial and horizontal coordinates.
//!
//! [`to_horizontal`] is the single place where a catalogue position is turned
//! into what an observer sees: hour angle from local mean sidereal time, the
//! standard spherical transform, and normal atmospheric refraction. Both the
//! Moon's rise/set search and the galactic-center sampler go through it.

use chrono::{DateTime, Utc};
use qtty::Degrees;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{NightError, Result};
use crate::observer::Observer;
use crate::{Time, JD};

/// Obliquity of the ecliptic used by the low-precision solar and lunar series.
const OBLIQUITY: Degrees = Degrees::new(23.4397);

/// Position on the celestial sphere (equator and equinox of the epoch the
/// caller supplies; no precession is applied).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EquatorialCoordinates {
    pub right_ascension: Degrees,
    pub declination: Degrees,
}

impl EquatorialCoordinates {
    pub const fn new(right_ascension: Degrees, declination: Degrees) -> Self {
        Self {
            right_ascension,
            declination,
        }
    }

    /// Convert ecliptic longitude/latitude (mean obliquity of J2000) to
    /// right ascension and declination.
    pub fn from_ecliptic(longitude: Degrees, latitude: Degrees) -> Self {
        let (sin_e, cos_e) = OBLIQUITY.sin_cos();
        let (sin_l, cos_l) = longitude.sin_cos();
        let (sin_b, cos_b) = latitude.sin_cos();

        let ra = (sin_l * cos_e - latitude.tan() * sin_e).atan2(cos_l);
        let dec = (sin_b * cos_e + cos_b * sin_e * sin_l).clamp(-1.0, 1.0).asin();
        Self::new(
            Degrees::new(ra.to_degrees().rem_euclid(360.0)),
            Degrees::new(dec.to_degrees()),
        )
    }

    /// Sagittarius A*, the galactic center: RA 17h45m40s, Dec −29°00'28" (J2000).
    pub fn galactic_center() -> Self {
        Self::new(hms_to_degrees(17.0, 45.0, 40.0), dms_to_degrees(-29.0, 0.0, 28.0))
    }
}

/// Observer-relative position. Azimuth is measured from north through east.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct HorizontalCoordinates {
    pub altitude: Degrees,
    pub azimuth: Degrees,
}

/// Right ascension in hours, minutes and seconds to degrees.
pub fn hms_to_degrees(hours: f64, minutes: f64, seconds: f64) -> Degrees {
    Degrees::new((hours + minutes / 60.0 + seconds / 3600.0) * 15.0)
}

/// Sexagesimal angle to degrees; the sign is taken from `degrees`, so
/// `-0.0` yields a negative result.
pub fn dms_to_degrees(degrees: f64, minutes: f64, seconds: f64) -> Degrees {
    let magnitude = degrees.abs() + minutes / 60.0 + seconds / 3600.0;
    if degrees.is_sign_negative() {
        Degrees::new(-magnitude)
    } else {
        Degrees::new(magnitude)
    }
}

/// Normal atmospheric refraction for a geometric `altitude`.
///
/// Bennett's cotangent formula held constant below −1° and tapered linearly
/// to zero at the nadir; zero outside `[-90, 90]`.
pub fn refraction(altitude: Degrees) -> Degrees {
    let alt = altitude.value();
    if !(-90.0..=90.0).contains(&alt) {
        return Degrees::new(0.0);
    }
    let hd = alt.max(-1.0);
    let mut refr = 1.02 / Degrees::new(hd + 10.3 / (hd + 5.11)).tan() / 60.0;
    if alt < -1.0 {
        refr *= (alt + 90.0) / 89.0;
    }
    Degrees::new(refr)
}

/// Refraction-corrected altitude and azimuth of `target` for `observer` at
/// `instant`.
pub fn to_horizontal(
    target: &EquatorialCoordinates,
    observer: &Observer,
    instant: DateTime<Utc>,
) -> Result<HorizontalCoordinates> {
    let lst = Time::<JD>::from_utc(instant).local_sidereal_time(observer.longitude());
    let hour_angle = Degrees::new(lst.value() - target.right_ascension.value());

    let (sin_h, cos_h) = hour_angle.sin_cos();
    let (sin_d, cos_d) = target.declination.sin_cos();
    let (sin_p, cos_p) = observer.latitude().sin_cos();

    let sin_alt = (sin_p * sin_d + cos_p * cos_d * cos_h).clamp(-1.0, 1.0);
    let geometric = Degrees::new(sin_alt.asin().to_degrees());
    let azimuth = (-cos_d * sin_h)
        .atan2(sin_d * cos_p - cos_d * cos_h * sin_p)
        .to_degrees()
        .rem_euclid(360.0);

    if !geometric.value().is_finite() {
        return Err(NightError::NonFiniteCoordinates("altitude"));
    }
    if !azimuth.is_finite() {
        return Err(NightError::NonFiniteCoordinates("azimuth"));
    }

    Ok(HorizontalCoordinates {
        altitude: geometric + refraction(geometric),
        azimuth: Degrees::new(azimuth),
    })
}
