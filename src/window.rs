// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Shooting-window derivation.
//!
//! The shooting window is `darkness ∩ moon-down ∩ galactic-center-visible`,
//! evaluated left to right. An absent operand or an empty overlap yields
//! `None`; there is no zero-length window.

use chrono::{DateTime, Utc};
use qtty::Minutes;
use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::period::UtcPeriod;
use crate::scoring::format_duration;

/// Null-propagating intersection of two optional windows.
///
/// ```
/// use astronight::{intersect, Interval};
/// use chrono::{TimeZone, Utc};
///
/// let at = |h| Utc.with_ymd_and_hms(2025, 7, 1, h, 0, 0).unwrap();
/// let dark = Interval::new(at(3), at(10));
/// let core = Interval::new(at(6), at(12));
/// assert_eq!(intersect(Some(&dark), Some(&core)), Some(Interval::new(at(6), at(10))));
/// assert_eq!(intersect(Some(&dark), None), None);
/// ```
pub fn intersect(a: Option<&UtcPeriod>, b: Option<&UtcPeriod>) -> Option<UtcPeriod> {
    a?.intersection(b?)
}

/// The usable astrophotography window for a night.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ShootingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Unrounded `(end − start)` in minutes.
    pub duration: Minutes,
}

impl ShootingWindow {
    /// Wrap a period, rejecting it unless its duration is positive.
    pub fn from_period(period: UtcPeriod) -> Option<Self> {
        let duration = period.duration_minutes();
        if duration.value() <= 0.0 {
            return None;
        }
        Some(Self {
            start: period.start,
            end: period.end,
            duration,
        })
    }

    pub fn period(&self) -> UtcPeriod {
        UtcPeriod::new(self.start, self.end)
    }
}

impl fmt::Display for ShootingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {} ({})",
            self.start.format("%Y-%m-%d %H:%M UTC"),
            self.end.format("%H:%M UTC"),
            format_duration(self.duration)
        )
    }
}

/// `(darkness ∩ moon_down) ∩ milky_way`.
pub fn compute_shooting_window(
    darkness: Option<&UtcPeriod>,
    moon_down: Option<&UtcPeriod>,
    milky_way: Option<&UtcPeriod>,
) -> Option<ShootingWindow> {
    let dark_and_moonless = intersect(darkness, moon_down);
    let window = intersect(dark_and_moonless.as_ref(), milky_way)?;
    ShootingWindow::from_period(window)
}
