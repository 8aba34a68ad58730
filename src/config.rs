// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Tunable parameters of the night computation.
//!
//! | Parameter | Default |
//! |-----------|---------|
//! | [`moon_interference_threshold`](NightConfig::moon_interference_threshold) | 0.10 illuminated fraction |
//! | [`milky_way_min_altitude`](NightConfig::milky_way_min_altitude) | 15° |
//! | [`galactic_center`](NightConfig::galactic_center) | RA 17h45m40s, Dec −29°00'28" (J2000) |
//! | [`sample_interval`](NightConfig::sample_interval) | 10 min |
//! | [`max_sampling_span`](NightConfig::max_sampling_span) | 12 h |
//!
//! With the `serde` feature every field is optional on input, so a document
//! naming only `"sample_interval": 5.0` keeps the other defaults.

use qtty::{Degrees, Hours, Minutes};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::coordinates::EquatorialCoordinates;
use crate::error::{NightError, Result};

/// Illuminated fraction below which the Moon is ignored.
pub const MOON_INTERFERENCE_THRESHOLD: f64 = 0.10;

/// Minimum galactic-center altitude counted as "visible".
pub const MILKY_WAY_MIN_ALTITUDE: Degrees = Degrees::new(15.0);

/// Spacing of galactic-center altitude samples.
pub const SAMPLE_INTERVAL: Minutes = Minutes::new(10.0);

/// Longest stretch of a darkness window the sampler will walk.
pub const MAX_SAMPLING_SPAN: Hours = Hours::new(12.0);

/// Parameters of [`NightData::compute`](crate::NightData::compute).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NightConfig {
    pub moon_interference_threshold: f64,
    pub milky_way_min_altitude: Degrees,
    pub galactic_center: EquatorialCoordinates,
    pub sample_interval: Minutes,
    pub max_sampling_span: Hours,
}

impl Default for NightConfig {
    fn default() -> Self {
        Self {
            moon_interference_threshold: MOON_INTERFERENCE_THRESHOLD,
            milky_way_min_altitude: MILKY_WAY_MIN_ALTITUDE,
            galactic_center: EquatorialCoordinates::galactic_center(),
            sample_interval: SAMPLE_INTERVAL,
            max_sampling_span: MAX_SAMPLING_SPAN,
        }
    }
}

impl NightConfig {
    /// Check every parameter against its admissible range.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.moon_interference_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(NightError::InvalidConfig(format!(
                "moon_interference_threshold {threshold} is outside [0, 1]"
            )));
        }

        let min_alt = self.milky_way_min_altitude.value();
        if !min_alt.is_finite() || !(-90.0..=90.0).contains(&min_alt) {
            return Err(NightError::InvalidConfig(format!(
                "milky_way_min_altitude {min_alt}° is outside [-90, 90]"
            )));
        }

        let ra = self.galactic_center.right_ascension.value();
        let dec = self.galactic_center.declination.value();
        if !ra.is_finite() || !dec.is_finite() || !(-90.0..=90.0).contains(&dec) {
            return Err(NightError::InvalidConfig(format!(
                "galactic_center ({ra}°, {dec}°) is not a valid equatorial position"
            )));
        }

        // Sub-second steps would loop millions of times over a night.
        let step = self.sample_interval.value();
        if !step.is_finite() || step < 1.0 / 60.0 {
            return Err(NightError::InvalidConfig(format!(
                "sample_interval {step} min must be at least one second"
            )));
        }

        let span = self.max_sampling_span.value();
        if !span.is_finite() || span <= 0.0 || span > 24.0 {
            return Err(NightError::InvalidConfig(format!(
                "max_sampling_span {span} h must lie in (0, 24]"
            )));
        }

        Ok(())
    }
}
