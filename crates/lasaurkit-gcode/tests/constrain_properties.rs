use lasaurkit_core::MessageLog;
use lasaurkit_gcode::{
    constrain_feedrate, constrain_intensity, format_fixed, map_constrain_feedrate, MAX_FEEDRATE,
    MIN_FEEDRATE,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_feedrate_clamp_is_idempotent(rate in -1.0e6f64..1.0e6) {
        let (once, _) = constrain_feedrate(rate);
        let (twice, _) = constrain_feedrate(once);
        prop_assert_eq!(once, twice);
        prop_assert!((MIN_FEEDRATE..=MAX_FEEDRATE).contains(&once));
    }

    #[test]
    fn prop_intensity_clamp_is_idempotent(intensity in -1000.0f64..1000.0) {
        let (once, _) = constrain_intensity(intensity);
        let (twice, warning) = constrain_intensity(once);
        prop_assert_eq!(once, twice);
        prop_assert!(warning.is_none());
    }

    #[test]
    fn prop_mapped_feedrate_is_stable(rate in -1.0e6f64..1.0e6) {
        let mut log = MessageLog::new();
        let once = map_constrain_feedrate(rate, &mut log);
        let reparsed: f64 = once.parse().unwrap();
        prop_assert_eq!(map_constrain_feedrate(reparsed, &mut log), once);
    }

    #[test]
    fn prop_fixed_format_has_requested_decimals(value in -1.0e6f64..1.0e6, digits in 0usize..6) {
        let text = format_fixed(value, digits);
        let decimals = text.split('.').nth(1).map_or(0, str::len);
        prop_assert_eq!(decimals, digits);
        let parsed: f64 = text.parse().unwrap();
        prop_assert!((parsed - value).abs() <= 0.5 * 10f64.powi(-(digits as i32)) + 1e-9);
    }
}
