// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Galactic-center visibility across a darkness window.
//!
//! The target's altitude is sampled at a fixed step from the start of
//! darkness. The visible window is the envelope of the samples at or above
//! the altitude threshold: first qualifying sample to last. For a fixed
//! star over a single night the altitude curve has at most one maximum, so
//! the envelope is gap-free.

use chrono::{DateTime, Duration, Utc};
use qtty::{Degrees, Millisecond};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::config::NightConfig;
use crate::coordinates::to_horizontal;
use crate::error::Result;
use crate::observer::Observer;
use crate::period::UtcPeriod;
use crate::window::ShootingWindow;
use crate::Interval;

/// One altitude/azimuth reading of the galactic center.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Sample {
    pub time: DateTime<Utc>,
    pub altitude: Degrees,
    pub azimuth: Degrees,
}

/// Samples, visible window and peak of the galactic center for one night.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MilkyWayData {
    pub samples: Vec<Sample>,
    /// First to last qualifying sample.
    ///
    /// When exactly one sample qualifies this is the zero-length period
    /// `[t, t]`. It carries the qualifying instant but never survives
    /// [`intersect`](crate::intersect), so it yields no shooting window.
    pub window: Option<UtcPeriod>,
    /// Highest sample, first one on ties. Reported even below the threshold.
    pub peak: Option<Sample>,
    /// Set when there is darkness but no sample reaches the threshold,
    /// including when every sample was skipped.
    pub never_visible: bool,
}

impl MilkyWayData {
    pub fn peak_altitude(&self) -> Option<Degrees> {
        self.peak.map(|s| s.altitude)
    }

    pub fn peak_azimuth(&self) -> Option<Degrees> {
        self.peak.map(|s| s.azimuth)
    }

    pub fn peak_time(&self) -> Option<DateTime<Utc>> {
        self.peak.map(|s| s.time)
    }

    /// Direction to face for the core: the peak azimuth, but only when
    /// there is a shooting window to use it in.
    pub fn core_bearing(&self, shooting_window: Option<&ShootingWindow>) -> Option<Degrees> {
        shooting_window.and(self.peak_azimuth())
    }
}

/// Sample the configured target over `darkness`, clamped to
/// `config.max_sampling_span` from its start.
///
/// Without darkness nothing is sampled and the result is empty with
/// `never_visible` unset. Samples whose coordinate transform fails are
/// skipped.
///
/// # Errors
///
/// [`NightError::InvalidConfig`](crate::NightError::InvalidConfig) when
/// `config` fails [`NightConfig::validate`].
pub fn compute_milky_way_visibility(
    darkness: Option<&UtcPeriod>,
    observer: &Observer,
    config: &NightConfig,
) -> Result<MilkyWayData> {
    config.validate()?;
    Ok(match darkness {
        Some(darkness) => sample_darkness(darkness, observer, config),
        None => MilkyWayData::default(),
    })
}

fn sample_darkness(
    darkness: &UtcPeriod,
    observer: &Observer,
    config: &NightConfig,
) -> MilkyWayData {
    let step_ms = config.sample_interval.to::<Millisecond>().value().round() as i64;
    let span_ms = config.max_sampling_span.to::<Millisecond>().value().round() as i64;
    let step = Duration::try_milliseconds(step_ms.max(1));
    let last = Duration::try_milliseconds(span_ms)
        .and_then(|span| darkness.start.checked_add_signed(span))
        .map_or(darkness.end, |bound| darkness.end.min(bound));

    let mut samples = Vec::new();
    let mut next = Some(darkness.start);
    while let Some(time) = next.filter(|&t| t <= last) {
        match to_horizontal(&config.galactic_center, observer, time) {
            Ok(hor) => samples.push(Sample {
                time,
                altitude: hor.altitude,
                azimuth: hor.azimuth,
            }),
            Err(err) => log::trace!("skipping galactic-center sample at {time}: {err}"),
        }
        next = step.and_then(|step| time.checked_add_signed(step));
    }

    let peak = samples.iter().fold(None::<Sample>, |best, &s| match best {
        Some(b) if s.altitude <= b.altitude => Some(b),
        _ => Some(s),
    });

    let threshold = config.milky_way_min_altitude;
    let mut visible = samples.iter().filter(|s| s.altitude >= threshold);
    let first = visible.next().map(|s| s.time);
    let last_visible = visible.last().map(|s| s.time).or(first);

    let window = match (first, last_visible) {
        (Some(start), Some(end)) => Some(Interval::new(start, end)),
        _ => None,
    };

    log::debug!(
        "galactic center: {} samples, peak {:?}, window {:?}",
        samples.len(),
        peak.map(|p| p.altitude),
        window
    );

    MilkyWayData {
        never_visible: window.is_none(),
        samples,
        window,
        peak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solar::{compute_solar_times, darkness_window};
    use crate::coordinates::EquatorialCoordinates;
    use crate::error::NightError;
    use chrono::{NaiveDate, TimeZone};
    use qtty::{Hours, Minutes};

    fn colorado() -> Observer {
        Observer::new(39.5, -105.0).unwrap()
    }

    fn visibility(darkness: Option<&UtcPeriod>, observer: &Observer) -> MilkyWayData {
        compute_milky_way_visibility(darkness, observer, &NightConfig::default()).unwrap()
    }

    fn darkness_for(date: NaiveDate, observer: &Observer) -> UtcPeriod {
        let solar = compute_solar_times(date, observer).unwrap();
        darkness_window(&solar).unwrap()
    }

    #[test]
    fn test_no_darkness_means_no_samples() {
        let data = visibility(None, &colorado());
        assert!(data.samples.is_empty());
        assert!(data.window.is_none());
        assert!(data.peak.is_none());
        assert!(!data.never_visible);
    }

    #[test]
    fn test_samples_cover_window_inclusively() {
        let start = Utc.with_ymd_and_hms(2025, 7, 1, 4, 0, 0).unwrap();
        let darkness = Interval::new(start, start + Duration::hours(2));
        let data = visibility(Some(&darkness), &colorado());

        assert_eq!(data.samples.len(), 13);
        assert_eq!(data.samples[0].time, darkness.start);
        assert_eq!(data.samples[12].time, darkness.end);
        assert!(data.samples.windows(2).all(|w| w[1].time - w[0].time == Duration::minutes(10)));
    }

    #[test]
    fn test_sampling_span_is_clamped() {
        let start = Utc.with_ymd_and_hms(2025, 7, 1, 4, 0, 0).unwrap();
        let darkness = Interval::new(start, start + Duration::hours(20));
        let config = NightConfig {
            sample_interval: Minutes::new(60.0),
            ..NightConfig::default()
        };
        let data = compute_milky_way_visibility(Some(&darkness), &colorado(), &config).unwrap();
        assert_eq!(data.samples.len(), 13);
        assert_eq!(data.samples.last().unwrap().time, start + Duration::hours(12));
    }

    #[test]
    fn test_summer_core_is_visible_from_colorado() {
        let observer = colorado();
        let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let darkness = darkness_for(date, &observer);
        let data = visibility(Some(&darkness), &observer);

        assert!(!data.never_visible);
        let window = data.window.unwrap();
        assert!(darkness.contains(window.start) && darkness.contains(window.end));

        // Culmination: 90 − 39.5 − 29.0 plus a little refraction.
        let peak = data.peak.unwrap();
        assert!((peak.altitude.value() - 21.5).abs() < 0.6, "peak = {}", peak.altitude);
        assert!((peak.azimuth.value() - 180.0).abs() < 10.0);
        assert!(window.contains(peak.time));
        assert_eq!(data.peak_time(), Some(peak.time));
        assert!(data
            .samples
            .iter()
            .filter(|s| window.contains(s.time))
            .all(|s| s.altitude >= Degrees::new(15.0)));
    }

    #[test]
    fn test_january_core_is_never_visible() {
        let observer = colorado();
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let darkness = darkness_for(date, &observer);
        let data = visibility(Some(&darkness), &observer);

        assert!(data.never_visible);
        assert!(data.window.is_none());
        assert!(!data.samples.is_empty());
        assert!(data.peak_altitude().unwrap() < Degrees::new(15.0));
    }

    #[test]
    fn test_peak_prefers_first_on_ties() {
        // From the south pole a fixed star circles at constant altitude.
        let observer = Observer::new(-90.0, 0.0).unwrap();
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let darkness = Interval::new(start, start + Duration::hours(3));
        let data = visibility(Some(&darkness), &observer);
        let peak = data.peak.unwrap();
        let max = data
            .samples
            .iter()
            .map(|s| s.altitude)
            .fold(Degrees::new(f64::MIN), |a, b| if b > a { b } else { a });
        assert_eq!(peak.altitude, max);
        let first_max = data.samples.iter().find(|s| s.altitude == max).unwrap();
        assert_eq!(peak.time, first_max.time);
    }

    #[test]
    fn test_core_bearing_needs_a_shooting_window() {
        let observer = colorado();
        let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let darkness = darkness_for(date, &observer);
        let data = visibility(Some(&darkness), &observer);

        assert_eq!(data.core_bearing(None), None);
        let window = data.window.unwrap();
        let shooting = ShootingWindow::from_period(window).unwrap();
        assert_eq!(data.core_bearing(Some(&shooting)), data.peak_azimuth());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let start = Utc.with_ymd_and_hms(2025, 7, 1, 4, 0, 0).unwrap();
        let darkness = Interval::new(start, start + Duration::hours(8));
        for config in [
            NightConfig {
                max_sampling_span: Hours::new(1e20),
                ..NightConfig::default()
            },
            NightConfig {
                sample_interval: Minutes::new(1e-6),
                ..NightConfig::default()
            },
        ] {
            let result = compute_milky_way_visibility(Some(&darkness), &colorado(), &config);
            assert!(matches!(result, Err(NightError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_step_longer_than_any_night_takes_one_sample() {
        let start = Utc.with_ymd_and_hms(2025, 7, 1, 4, 0, 0).unwrap();
        let darkness = Interval::new(start, start + Duration::hours(8));
        let config = NightConfig {
            sample_interval: Minutes::new(1e20),
            ..NightConfig::default()
        };
        let data = compute_milky_way_visibility(Some(&darkness), &colorado(), &config).unwrap();
        assert_eq!(data.samples.len(), 1);
        assert_eq!(data.samples[0].time, start);
    }

    #[test]
    fn test_failed_transforms_are_skipped() {
        let start = Utc.with_ymd_and_hms(2025, 7, 1, 4, 0, 0).unwrap();
        let darkness = Interval::new(start, start + Duration::hours(8));
        let config = NightConfig {
            galactic_center: EquatorialCoordinates::new(
                Degrees::new(f64::NAN),
                Degrees::new(-29.0),
            ),
            ..NightConfig::default()
        };

        let data = sample_darkness(&darkness, &colorado(), &config);

        assert!(data.samples.is_empty());
        assert!(data.window.is_none());
        assert!(data.peak.is_none());
        assert!(data.never_visible);
    }

    #[test]
    fn test_single_qualifying_sample_collapses_the_window() {
        // Threshold set to the summer peak: only the culminating sample clears it.
        let observer = colorado();
        let darkness = darkness_for(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(), &observer);
        let peak = visibility(Some(&darkness), &observer).peak.unwrap();
        let config = NightConfig {
            milky_way_min_altitude: peak.altitude,
            ..NightConfig::default()
        };

        let data = compute_milky_way_visibility(Some(&darkness), &observer, &config).unwrap();
        let window = data.window.unwrap();
        assert!(!data.never_visible);
        assert_eq!(window.start, window.end);
        assert_eq!(window.start, peak.time);
        assert_eq!(crate::intersect(Some(&window), Some(&darkness)), None);
    }
}
