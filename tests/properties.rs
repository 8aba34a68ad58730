use astronight::{
    compute_shooting_window, intersect, score_night, Interval, MoonPhase, NightConfig, NightData,
    Observer, Quality, ShootingWindow, UtcPeriod,
};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap()
}

/// Periods within one day of `base()`, at minute resolution.
fn period() -> impl Strategy<Value = UtcPeriod> {
    (0i64..1_440, 1i64..720).prop_map(|(offset, length)| {
        let start = base() + Duration::minutes(offset);
        Interval::new(start, start + Duration::minutes(length))
    })
}

fn optional_period() -> impl Strategy<Value = Option<UtcPeriod>> {
    prop::option::of(period())
}

fn widen(period: &UtcPeriod, before: i64, after: i64) -> UtcPeriod {
    Interval::new(
        period.start - Duration::minutes(before),
        period.end + Duration::minutes(after),
    )
}

fn minutes(window: Option<ShootingWindow>) -> f64 {
    window.map_or(0.0, |w| w.duration.value())
}

fn window_of(length_ms: i64) -> ShootingWindow {
    ShootingWindow::from_period(Interval::new(base(), base() + Duration::milliseconds(length_ms)))
        .unwrap()
}

proptest! {
    #[test]
    fn prop_intersect_commutes(a in optional_period(), b in optional_period()) {
        prop_assert_eq!(intersect(a.as_ref(), b.as_ref()), intersect(b.as_ref(), a.as_ref()));
    }

    #[test]
    fn prop_intersect_absorbs_none(a in optional_period()) {
        prop_assert_eq!(intersect(a.as_ref(), None), None);
        prop_assert_eq!(intersect(None, a.as_ref()), None);
    }

    #[test]
    fn prop_intersection_is_non_empty_and_contained(a in period(), b in period()) {
        if let Some(overlap) = intersect(Some(&a), Some(&b)) {
            prop_assert!(overlap.start < overlap.end);
            prop_assert!(a.start <= overlap.start && overlap.end <= a.end);
            prop_assert!(b.start <= overlap.start && overlap.end <= b.end);
        }
    }

    #[test]
    fn prop_widening_never_shrinks_the_shooting_window(
        darkness in period(),
        moon in period(),
        core in period(),
        which in 0usize..3,
        before in 0i64..240,
        after in 0i64..240,
    ) {
        let original = minutes(compute_shooting_window(Some(&darkness), Some(&moon), Some(&core)));

        let mut inputs = [darkness, moon, core];
        inputs[which] = widen(&inputs[which], before, after);
        let widened = minutes(compute_shooting_window(
            Some(&inputs[0]),
            Some(&inputs[1]),
            Some(&inputs[2]),
        ));

        prop_assert!(widened >= original);
    }

    #[test]
    fn prop_score_non_decreasing_in_duration(
        shorter in 1i64..600_000_000,
        extra in 0i64..600_000_000,
        fraction in 0.0..=1.0f64,
    ) {
        let short = score_night(Some(&window_of(shorter)), Some(fraction));
        let long = score_night(Some(&window_of(shorter + extra)), Some(fraction));
        prop_assert!(short <= long);
    }

    #[test]
    fn prop_score_non_increasing_in_moon_fraction(
        length_ms in 3_600_000i64..600_000_000,
        dim in 0.0..=1.0f64,
        brighter in 0.0..=1.0f64,
    ) {
        let window = window_of(length_ms);
        let bright = (dim + brighter).min(1.0);
        let at_dim = score_night(Some(&window), Some(dim));
        let at_bright = score_night(Some(&window), Some(bright));
        prop_assert!(at_bright <= at_dim);
        prop_assert!(at_bright >= Quality::Fair);
    }

    #[test]
    fn prop_phase_bucket_is_total(phase in 0.0..=1.0f64) {
        let bucket = MoonPhase::from_phase(phase);
        prop_assert!(!bucket.name().is_empty());
        if phase <= 0.0625 || phase > 0.9375 {
            prop_assert_eq!(bucket, MoonPhase::NewMoon);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_night_is_well_formed(
        day in 0i64..365,
        lat in -60.0..60.0f64,
        lng in -180.0..=180.0f64,
    ) {
        let observer = Observer::new(lat, lng).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + Duration::days(day);
        let night = NightData::compute(date, &observer, &NightConfig::default()).unwrap();

        prop_assert!((0.0..=1.0).contains(&night.lunar.fraction));
        if let Some(darkness) = night.darkness_window {
            prop_assert!(darkness.start < darkness.end);
        }
        if let Some(window) = night.shooting_window {
            let darkness = night.darkness_window.unwrap();
            prop_assert!(window.duration.value() > 0.0);
            prop_assert!(darkness.start <= window.start && window.end <= darkness.end);
        } else {
            prop_assert_eq!(night.quality(), Quality::None);
        }
    }
}
