// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! One night's conditions, assembled from the individual providers.

use chrono::{Datelike, NaiveDate};
use qtty::Degrees;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::config::NightConfig;
use crate::error::{NightError, Result};
use crate::lunar::{compute_lunar_data, LunarData};
use crate::milky_way::{compute_milky_way_visibility, MilkyWayData};
use crate::observer::Observer;
use crate::period::UtcPeriod;
use crate::scoring::{score_night, Quality};
use crate::solar::{compute_solar_times, darkness_window, SolarTimes};
use crate::window::{compute_shooting_window, ShootingWindow};

/// Everything computed for the night beginning on `date`.
///
/// Values are recomputed from scratch for every `(date, observer, config)`;
/// nothing is cached or shared between nights.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct NightData {
    pub date: NaiveDate,
    pub observer: Observer,
    pub solar: SolarTimes,
    pub darkness_window: Option<UtcPeriod>,
    pub lunar: LunarData,
    pub milky_way: MilkyWayData,
    pub shooting_window: Option<ShootingWindow>,
}

impl NightData {
    /// Run every provider for `date` at `observer`.
    ///
    /// # Errors
    ///
    /// [`NightError::InvalidConfig`] when `config` fails validation, and
    /// [`NightError::InvalidDate`] for dates outside
    /// [`SUPPORTED_YEARS`](crate::SUPPORTED_YEARS).
    ///
    /// ```
    /// use astronight::{NightConfig, NightData, Observer};
    /// use chrono::NaiveDate;
    ///
    /// let observer = Observer::new(39.5, -105.0).unwrap();
    /// let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
    /// let night = NightData::compute(date, &observer, &NightConfig::default()).unwrap();
    /// assert!(night.darkness_window.is_some());
    /// ```
    pub fn compute(date: NaiveDate, observer: &Observer, config: &NightConfig) -> Result<Self> {
        config.validate()?;

        let solar = compute_solar_times(date, observer)?;
        let darkness_window = darkness_window(&solar);
        let lunar = compute_lunar_data(date, observer, config)?;
        let milky_way = compute_milky_way_visibility(darkness_window.as_ref(), observer, config)?;
        let moon_down = lunar.moon_down_window.map(|w| w.period);
        let shooting_window = compute_shooting_window(
            darkness_window.as_ref(),
            moon_down.as_ref(),
            milky_way.window.as_ref(),
        );

        log::debug!(
            "night of {date} at ({}, {}): darkness {:?}, shooting window {:?}",
            observer.latitude(),
            observer.longitude(),
            darkness_window,
            shooting_window,
        );

        Ok(Self {
            date,
            observer: *observer,
            solar,
            darkness_window,
            lunar,
            milky_way,
            shooting_window,
        })
    }

    pub fn quality(&self) -> Quality {
        score_night(self.shooting_window.as_ref(), Some(self.lunar.fraction))
    }

    /// Peak azimuth of the galactic center when there is a shooting window.
    pub fn core_bearing(&self) -> Option<Degrees> {
        self.milky_way.core_bearing(self.shooting_window.as_ref())
    }
}

/// Grade every night of a calendar month.
///
/// Each day is computed independently. A day whose computation fails is
/// logged and graded [`Quality::None`], so one bad day never hides the rest
/// of the month.
///
/// # Errors
///
/// [`NightError::InvalidDate`] if `year`/`month` do not name a month, and
/// [`NightError::InvalidConfig`] if `config` is invalid.
pub fn score_month(
    year: i32,
    month: u32,
    observer: &Observer,
    config: &NightConfig,
) -> Result<Vec<(NaiveDate, Quality)>> {
    config.validate()?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| NightError::InvalidDate(format!("{year}-{month:02} is not a month")))?;

    let scores = first
        .iter_days()
        .take_while(|day| day.month() == month)
        .map(|day| {
            let quality = match NightData::compute(day, observer, config) {
                Ok(night) => night.quality(),
                Err(err) => {
                    log::warn!("scoring {day} failed: {err}");
                    Quality::None
                }
            };
            (day, quality)
        })
        .collect();

    Ok(scores)
}
