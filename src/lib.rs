// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Night-conditions engine for Milky Way astrophotography planning.
//!
//! Given a calendar date and an observer, the engine finds the interval when
//! the sky is astronomically dark, the Moon is not washing it out and the
//! galactic center stands high enough to photograph, then grades the night.
//!
//! # Pipeline
//!
//! | Stage | Entry point | Output |
//! |-------|-------------|--------|
//! | Solar times | [`compute_solar_times`], [`darkness_window`] | [`SolarTimes`], darkness [`UtcPeriod`] |
//! | Lunar interference | [`compute_lunar_data`] | [`LunarData`] with a [`MoonDownWindow`] |
//! | Galactic-center sampling | [`compute_milky_way_visibility`] | [`MilkyWayData`] |
//! | Window intersection | [`intersect`], [`compute_shooting_window`] | [`ShootingWindow`] |
//! | Scoring | [`score_night`] | [`Quality`] |
//!
//! [`NightData::compute`] runs all five and [`score_month`] grades a whole
//! calendar month. Every stage is a pure function of its inputs.
//!
//! # Time
//!
//! Instants are `chrono::DateTime<Utc>`; the astronomical series run on
//! [`Time<JD>`](Time) and [`Time<J2000>`](Time), day counts tagged with a
//! [`TimeScale`] marker. UTC stands in for UT (ΔT is ignored).
//!
//! # Example
//!
//! ```
//! use astronight::{NightConfig, NightData, Observer, parse_iso_date};
//!
//! let observer = Observer::new(39.5, -105.0)?;
//! let date = parse_iso_date("2025-06-25")?;
//! let night = NightData::compute(date, &observer, &NightConfig::default())?;
//!
//! if let Some(window) = &night.shooting_window {
//!     println!("{window}: {}", night.quality());
//! }
//! # Ok::<(), astronight::NightError>(())
//! ```

pub mod config;
pub mod coordinates;
mod error;
pub(crate) mod instant;
mod julian_date_ext;
pub mod lunar;
pub mod milky_way;
mod night;
mod observer;
mod period;
pub(crate) mod scales;
pub mod scoring;
pub mod solar;
pub mod window;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use config::NightConfig;
pub use coordinates::{EquatorialCoordinates, HorizontalCoordinates};
pub use error::{NightError, Result};
pub use instant::{Time, TimeInstant, TimeScale};
pub use lunar::{
    compute_lunar_data, compute_moon_times, derive_moon_down_window, LunarData, MoonDownWindow,
    MoonPhase, MoonTimes,
};
pub use milky_way::{compute_milky_way_visibility, MilkyWayData, Sample};
pub use night::{score_month, NightData};
pub use observer::{parse_iso_date, Observer, SUPPORTED_YEARS};
pub use period::{Interval, UtcPeriod};
pub use scales::{J2000, JD};
pub use scoring::{format_duration, score_night, Quality};
pub use solar::{compute_solar_times, darkness_window, SolarTimes};
pub use window::{compute_shooting_window, intersect, ShootingWindow};
