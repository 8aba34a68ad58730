// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Moon illumination, rise/set and the moon-down window.
//!
//! The Moon's position comes from a three-term series in mean longitude,
//! mean anomaly and argument of latitude, good to a fraction of a degree.
//! Rise and set are found by fitting a parabola through altitudes sampled
//! every hour across the local day and solving for its zero crossings.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use qtty::{Degrees, Kilometers};
use std::f64::consts::PI;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

use crate::config::NightConfig;
use crate::coordinates::{to_horizontal, EquatorialCoordinates};
use crate::error::Result;
use crate::observer::{check_supported, next_day, Observer};
use crate::period::UtcPeriod;
use crate::solar::sun_position;
use crate::{Interval, Time, J2000};

/// Mean Earth–Sun distance used for the phase angle.
const SUN_DISTANCE: Kilometers = Kilometers::new(149_598_000.0);

/// Angular radius of the Moon minus parallax, added to the horizon depression.
const MOON_HORIZON_CORRECTION: Degrees = Degrees::new(0.133);

/// Geocentric position and distance of the Moon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonPosition {
    pub equatorial: EquatorialCoordinates,
    pub distance: Kilometers,
}

/// Position of the Moon at `instant`.
pub fn moon_position(instant: DateTime<Utc>) -> MoonPosition {
    let d = Time::<J2000>::from_utc(instant).value();

    let mean_longitude = Degrees::new(218.316 + 13.176_396 * d);
    let mean_anomaly = Degrees::new(134.963 + 13.064_993 * d);
    let latitude_argument = Degrees::new(93.272 + 13.229_350 * d);

    let longitude = mean_longitude + Degrees::new(6.289 * mean_anomaly.sin());
    let latitude = Degrees::new(5.128 * latitude_argument.sin());

    MoonPosition {
        equatorial: EquatorialCoordinates::from_ecliptic(longitude, latitude),
        distance: Kilometers::new(385_001.0 - 20_905.0 * mean_anomaly.cos()),
    }
}

/// Illuminated fraction in `[0, 1]` and phase in `[0, 1]` (0 new, 0.5 full).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Illumination {
    pub fraction: f64,
    pub phase: f64,
}

pub fn moon_illumination(instant: DateTime<Utc>) -> Illumination {
    let sun = sun_position(instant);
    let moon = moon_position(instant);
    let m = moon.equatorial;

    let (sin_ds, cos_ds) = sun.declination.sin_cos();
    let (sin_dm, cos_dm) = m.declination.sin_cos();
    let (sin_dra, cos_dra) = (sun.right_ascension - m.right_ascension).sin_cos();

    let elongation = (sin_ds * sin_dm + cos_ds * cos_dm * cos_dra)
        .clamp(-1.0, 1.0)
        .acos();
    let sun_distance = SUN_DISTANCE.value();
    let inclination = (sun_distance * elongation.sin())
        .atan2(moon.distance.value() - sun_distance * elongation.cos());
    let angle = (cos_ds * sin_dra).atan2(sin_ds * cos_dm - cos_ds * sin_dm * cos_dra);

    let waning = if angle < 0.0 {
        -1.0
    } else if angle > 0.0 {
        1.0
    } else {
        0.0
    };

    Illumination {
        fraction: (1.0 + inclination.cos()) / 2.0,
        phase: 0.5 + 0.5 * inclination * waning / PI,
    }
}

/// Named phase of the Moon, eight buckets each 1/8 of the cycle wide and
/// centred on the principal phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// Bucket a phase value; upper bounds are inclusive and everything past
    /// 15/16 wraps back to [`MoonPhase::NewMoon`].
    pub fn from_phase(phase: f64) -> Self {
        const BUCKETS: [(f64, MoonPhase); 8] = [
            (0.0625, MoonPhase::NewMoon),
            (0.1875, MoonPhase::WaxingCrescent),
            (0.3125, MoonPhase::FirstQuarter),
            (0.4375, MoonPhase::WaxingGibbous),
            (0.5625, MoonPhase::FullMoon),
            (0.6875, MoonPhase::WaningGibbous),
            (0.8125, MoonPhase::LastQuarter),
            (0.9375, MoonPhase::WaningCrescent),
        ];
        BUCKETS
            .iter()
            .find(|(max, _)| phase <= *max)
            .map_or(MoonPhase::NewMoon, |&(_, bucket)| bucket)
    }

    pub const fn name(self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "🌑",
            MoonPhase::WaxingCrescent => "🌒",
            MoonPhase::FirstQuarter => "🌓",
            MoonPhase::WaxingGibbous => "🌔",
            MoonPhase::FullMoon => "🌕",
            MoonPhase::WaningGibbous => "🌖",
            MoonPhase::LastQuarter => "🌗",
            MoonPhase::WaningCrescent => "🌘",
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "serde")]
impl Serialize for MoonPhase {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

/// Moonrise and moonset within one local day.
///
/// At most one of each is reported. When neither happens the Moon was
/// either above the horizon all day (`always_up`) or below it
/// (`always_down`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MoonTimes {
    pub rise: Option<DateTime<Utc>>,
    pub set: Option<DateTime<Utc>>,
    pub always_up: bool,
    pub always_down: bool,
}

/// Moonrise/moonset during the local day `date` (mean solar midnight to
/// midnight).
pub fn compute_moon_times(date: NaiveDate, observer: &Observer) -> Result<MoonTimes> {
    let midnight = observer.local_midnight(check_supported(date)?);
    let altitude = |hours: f64| -> Result<f64> {
        let instant = midnight + Duration::milliseconds((hours * 3_600_000.0).round() as i64);
        let position = moon_position(instant);
        let horizontal = to_horizontal(&position.equatorial, observer, instant)?;
        Ok((horizontal.altitude - MOON_HORIZON_CORRECTION).value())
    };

    let mut rise: Option<f64> = None;
    let mut set: Option<f64> = None;
    let mut h0 = altitude(0.0)?;
    let mut ye = 0.0;

    for i in (1..=23u32).step_by(2).map(f64::from) {
        let h1 = altitude(i)?;
        let h2 = altitude(i + 1.0)?;

        let a = (h0 + h2) / 2.0 - h1;
        let b = (h2 - h0) / 2.0;
        let xe = -b / (2.0 * a);
        ye = (a * xe + b) * xe + h1;
        let discriminant = b * b - 4.0 * a * h1;

        let mut roots = 0;
        let mut x1 = 0.0;
        let mut x2 = 0.0;
        if discriminant >= 0.0 {
            let dx = discriminant.sqrt() / (a.abs() * 2.0);
            x1 = xe - dx;
            x2 = xe + dx;
            if x1.abs() <= 1.0 {
                roots += 1;
            }
            if x2.abs() <= 1.0 {
                roots += 1;
            }
            if x1 < -1.0 {
                x1 = x2;
            }
        }

        match roots {
            1 if h0 < 0.0 => rise = Some(i + x1),
            1 => set = Some(i + x1),
            2 => {
                let (r, s) = if ye < 0.0 { (x2, x1) } else { (x1, x2) };
                rise = Some(i + r);
                set = Some(i + s);
            }
            _ => {}
        }

        if rise.is_some() && set.is_some() {
            break;
        }
        h0 = h2;
    }

    let at = |hours: f64| midnight + Duration::milliseconds((hours * 3_600_000.0).round() as i64);
    let neither = rise.is_none() && set.is_none();
    Ok(MoonTimes {
        rise: rise.map(at),
        set: set.map(at),
        always_up: neither && ye > 0.0,
        always_down: neither && ye <= 0.0,
    })
}

/// Interval of the night during which the Moon does not brighten the sky.
///
/// `all_night` windows carry sentinel bounds far outside any darkness window
/// and only become concrete once intersected with one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MoonDownWindow {
    pub period: UtcPeriod,
    pub all_night: bool,
}

impl MoonDownWindow {
    fn bounded(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        Interval::checked(start, end).map(|period| Self {
            period,
            all_night: false,
        })
    }
}

/// Sentinel bounds for a reference instant: the Unix epoch and one year on.
fn sentinel_bounds(reference: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (DateTime::<Utc>::UNIX_EPOCH, reference + Duration::days(365))
}

/// Derive the moon-down window from today's and tomorrow's rise/set.
///
/// `None` means the Moon is up for the whole night. `reference` anchors the
/// sentinel bounds; it is normally the local noon of the night's date.
///
/// When the Moon both rises and then sets during the day, only the dark
/// interval after moonset is returned; any dark stretch before moonrise is
/// dropped.
pub fn derive_moon_down_window(
    times: &MoonTimes,
    next: &MoonTimes,
    is_no_interference: bool,
    reference: DateTime<Utc>,
) -> Option<MoonDownWindow> {
    let (night_start, night_end) = sentinel_bounds(reference);
    let all_night = Some(MoonDownWindow {
        period: Interval::new(night_start, night_end),
        all_night: true,
    });

    if is_no_interference {
        return all_night;
    }

    let after_set = |set: DateTime<Utc>| {
        let end = next.rise.unwrap_or(set + Duration::hours(24));
        MoonDownWindow::bounded(set, end)
    };

    match (times.rise, times.set) {
        (Some(rise), Some(set)) if set < rise => MoonDownWindow::bounded(night_start, rise),
        (Some(_), Some(set)) => after_set(set),
        (None, Some(set)) => after_set(set),
        (Some(rise), None) => MoonDownWindow::bounded(night_start, rise),
        (None, None) if times.always_up => None,
        (None, None) if times.always_down => all_night,
        (None, None) => None,
    }
}

/// Everything the engine needs to know about the Moon for one night.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LunarData {
    pub fraction: f64,
    pub phase: f64,
    pub phase_name: MoonPhase,
    pub times: MoonTimes,
    pub next_times: MoonTimes,
    pub is_no_interference: bool,
    pub moon_down_window: Option<MoonDownWindow>,
}

impl LunarData {
    pub fn moonrise(&self) -> Option<DateTime<Utc>> {
        self.times.rise
    }

    pub fn moonset(&self) -> Option<DateTime<Utc>> {
        self.times.set
    }

    pub fn next_moonrise(&self) -> Option<DateTime<Utc>> {
        self.next_times.rise
    }

    pub fn next_moonset(&self) -> Option<DateTime<Utc>> {
        self.next_times.set
    }
}

/// Illumination at local noon of `date`, rise/set for `date` and the day
/// after, and the resulting moon-down window.
pub fn compute_lunar_data(
    date: NaiveDate,
    observer: &Observer,
    config: &NightConfig,
) -> Result<LunarData> {
    let noon = observer.local_noon(check_supported(date)?);
    let illumination = moon_illumination(noon);

    let times = compute_moon_times(date, observer)?;
    let next_times = compute_moon_times(next_day(date)?, observer)?;

    let is_no_interference = illumination.fraction < config.moon_interference_threshold;
    let moon_down_window = derive_moon_down_window(&times, &next_times, is_no_interference, noon);

    log::debug!(
        "moon on {date}: fraction {:.3}, rise {:?}, set {:?}, down window {:?}",
        illumination.fraction,
        times.rise,
        times.set,
        moon_down_window.map(|w| w.period),
    );

    Ok(LunarData {
        fraction: illumination.fraction,
        phase: illumination.phase,
        phase_name: MoonPhase::from_phase(illumination.phase),
        times,
        next_times,
        is_no_interference,
        moon_down_window,
    })
}
