// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time period / interval implementation.
//!
//! This module provides:
//! - [`Interval<T>`]: generic interval over any [`TimeInstant`]
//! - [`UtcPeriod`]: the `chrono::DateTime<Utc>` interval every window in
//!   this crate is expressed as

use super::TimeInstant;
use chrono::{DateTime, Utc};
use qtty::{Minutes, Seconds};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Serialize, Serializer};

/// Represents an interval between two instants.
///
/// [`Interval::new`] takes its endpoints as given. [`Interval::checked`] and
/// [`Interval::intersection`] only ever produce `start < end`, and so do the
/// darkness, moon-down and shooting windows built from them. The one
/// exception is [`MilkyWayData::window`](crate::MilkyWayData::window), which
/// collapses to `start == end` when a single sample qualifies.
///
/// # Examples
///
/// ```
/// use astronight::Interval;
/// use chrono::{TimeZone, Utc};
///
/// let dusk = Utc.with_ymd_and_hms(2025, 6, 25, 4, 10, 0).unwrap();
/// let dawn = Utc.with_ymd_and_hms(2025, 6, 25, 10, 40, 0).unwrap();
/// let night = Interval::new(dusk, dawn);
/// assert_eq!(night.duration().num_minutes(), 390);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<T: TimeInstant> {
    pub start: T,
    pub end: T,
}

/// UTC interval alias.
pub type UtcPeriod = Interval<DateTime<Utc>>;

impl<T: TimeInstant> Interval<T> {
    /// Creates a new period between two time instants.
    pub fn new(start: T, end: T) -> Self {
        Interval { start, end }
    }

    /// Creates a period only if `start < end`.
    pub fn checked(start: T, end: T) -> Option<Self> {
        if start < end {
            Some(Self::new(start, end))
        } else {
            None
        }
    }

    /// Returns the duration of the period as the difference between end and start.
    pub fn duration(&self) -> T::Duration {
        self.end.difference(&self.start)
    }

    /// Whether `instant` falls in `[start, end]`.
    pub fn contains(&self, instant: T) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Returns the overlapping sub-period between `self` and `other`.
    ///
    /// Periods are treated as half-open ranges `[start, end)`: if one period
    /// ends exactly when the other starts, the intersection is empty and `None`
    /// is returned.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = if self.start >= other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end <= other.end {
            self.end
        } else {
            other.end
        };

        Self::checked(start, end)
    }
}

impl<T: TimeInstant + fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl Interval<DateTime<Utc>> {
    /// Duration in seconds at millisecond resolution.
    pub fn duration_seconds(&self) -> Seconds {
        Seconds::new(self.duration().num_milliseconds() as f64 / 1_000.0)
    }

    /// Unrounded duration in minutes, `(end − start) / 60 000 ms`.
    pub fn duration_minutes(&self) -> Minutes {
        Minutes::new(self.duration().num_milliseconds() as f64 / 60_000.0)
    }
}

// Serialized with RFC 3339 endpoints, the shape the display layer formats.
#[cfg(feature = "serde")]
impl Serialize for Interval<DateTime<Utc>> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("Period", 2)?;
        s.serialize_field("start", &self.start)?;
        s.serialize_field("end", &self.end)?;
        s.end()
    }
}
