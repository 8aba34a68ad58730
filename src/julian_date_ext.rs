// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Date (`Time<JD>`) specific extensions.

use qtty::*;

use super::instant::Time;
use super::scales::{J2000, JD};

impl Time<JD> {
    /// J2000.0 epoch: 2000-01-01T12:00:00 (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Julian centuries since J2000.0.
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new((*self - Self::J2000).value() / Self::JULIAN_CENTURY.value())
    }

    /// Greenwich mean sidereal time (IAU 1982 polynomial), in `[0, 360)`.
    pub fn greenwich_mean_sidereal_time(&self) -> Degrees {
        let d = (*self - Self::J2000).value();
        let t = self.julian_centuries().value();
        let gmst = 280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0;
        Degrees::new(gmst.rem_euclid(360.0))
    }

    /// Local mean sidereal time at an east-positive `longitude`, in `[0, 360)`.
    #[inline]
    pub fn local_sidereal_time(&self, longitude: Degrees) -> Degrees {
        Degrees::new((self.greenwich_mean_sidereal_time() + longitude).value().rem_euclid(360.0))
    }
}

impl Time<J2000> {
    /// Convenience: the same instant on the Julian Date axis.
    #[inline]
    pub fn to_jd(&self) -> Time<JD> {
        self.to::<JD>()
    }
}
