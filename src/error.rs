// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type for the night-conditions engine.
//!
//! Only malformed input is reported as an error. A night with no darkness,
//! a Moon that never sets or a galactic center that never clears the
//! horizon are valid outcomes carried as `None` or flag fields.

use thiserror::Error;

/// Errors surfaced by the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NightError {
    /// Latitude outside `[-90, 90]` or not finite.
    #[error("invalid latitude {0}: expected a finite value in [-90, 90] degrees")]
    InvalidLatitude(f64),

    /// Longitude outside `[-180, 180]` or not finite.
    #[error("invalid longitude {0}: expected a finite value in [-180, 180] degrees")]
    InvalidLongitude(f64),

    /// Calendar date that cannot be parsed or represented.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Configuration parameter out of its admissible range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A coordinate transform produced a non-finite value.
    #[error("non-finite {0} in horizontal coordinate transform")]
    NonFiniteCoordinates(&'static str),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, NightError>;
