// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Five-level night quality grade.
//!
//! | Grade | Shooting window | Moon fraction |
//! |-------|-----------------|---------------|
//! | [`Quality::Excellent`] | ≥ 180 min | < 0.25 |
//! | [`Quality::Good`] | ≥ 120 min | < 0.50 |
//! | [`Quality::Fair`] | ≥ 60 min | any |
//! | [`Quality::Poor`] | > 0 min | any |
//! | [`Quality::None`] | none | any |
//!
//! Rows are tried top to bottom; the first match wins.

use qtty::Minutes;
use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::window::ShootingWindow;

/// Ordered worst to best, so `Quality::Fair < Quality::Good`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Quality {
    None,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Quality {
    pub const fn as_str(self) -> &'static str {
        match self {
            Quality::None => "none",
            Quality::Poor => "poor",
            Quality::Fair => "fair",
            Quality::Good => "good",
            Quality::Excellent => "excellent",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grade a night from its shooting window and Moon illuminated fraction.
///
/// A missing fraction counts as a full Moon.
#[allow(clippy::if_same_then_else)]
pub fn score_night(window: Option<&ShootingWindow>, moon_fraction: Option<f64>) -> Quality {
    let Some(window) = window else {
        return Quality::None;
    };
    let minutes = window.duration.value();
    let fraction = moon_fraction.unwrap_or(1.0);

    if minutes <= 0.0 {
        Quality::None
    } else if minutes >= 180.0 && fraction < 0.25 {
        Quality::Excellent
    } else if minutes >= 120.0 && fraction < 0.50 {
        Quality::Good
    } else if minutes >= 180.0 && fraction < 0.50 {
        Quality::Good
    } else if minutes >= 60.0 {
        Quality::Fair
    } else {
        Quality::Poor
    }
}

/// `"2h 35m"`, `"2h"`, `"45m"`, or `"0m"` for anything non-positive.
pub fn format_duration(duration: Minutes) -> String {
    let minutes = duration.value();
    if !minutes.is_finite() || minutes <= 0.0 {
        return "0m".to_string();
    }
    let total = minutes.round() as u64;
    match (total / 60, total % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}
