// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale marker types.
//!
//! Each zero-sized type identifies a day counter and encodes how values on
//! that counter relate to the canonical **Julian Date**.
//!
//! | Marker | Description | Epoch (JD) |
//! |--------|-------------|------------|
//! | [`JD`] | Julian Date | 0.0 |
//! | [`J2000`] | Days since J2000.0 | 2 451 545.0 |
//!
//! UTC is read as Universal Time and no ΔT correction is applied: the
//! night-planning formulas in this crate are accurate to about a minute,
//! well below the ≈70 s TT−UT offset they would otherwise absorb.

use super::instant::TimeScale;
use qtty::Days;

/// Julian Date, the identity scale.
///
/// `to_jd(v) = v`, i.e. the quantity *is* a Julian Day number.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JD;

impl TimeScale for JD {
    const LABEL: &'static str = "Julian Day:";

    #[inline(always)]
    fn to_jd(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_jd(jd: Days) -> Days {
        jd
    }
}

/// Days elapsed since the J2000.0 epoch (2000-01-01T12:00).
///
/// This is the argument every low-precision solar and lunar series in
/// [`solar`](crate::solar) and [`lunar`](crate::lunar) is written against.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct J2000;

/// JD of the J2000.0 epoch.
pub(crate) const J2000_EPOCH_JD: Days = Days::new(2_451_545.0);

impl TimeScale for J2000 {
    const LABEL: &'static str = "J2000+";

    #[inline(always)]
    fn to_jd(value: Days) -> Days {
        value + J2000_EPOCH_JD
    }

    #[inline(always)]
    fn from_jd(jd: Days) -> Days {
        jd - J2000_EPOCH_JD
    }
}
