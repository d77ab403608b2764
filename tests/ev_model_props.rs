//! Property tests for EV sweep enumeration.

use camcert::validator::enumerate_ev_steps;
use proptest::prelude::*;

proptest! {
    /// Steps are monotone with a constant stride of `floor(1/ev_per_step)`,
    /// start at the range minimum and never pass the maximum.
    #[test]
    fn prop_enumeration_covers_range(
        range_min in -24i32..=0,
        span in 0i32..=48,
        denominator in 1i32..=8,
    ) {
        let range_max = range_min + span;
        let ev_per_step = 1.0 / f64::from(denominator);
        let evs = enumerate_ev_steps(range_min, range_max, ev_per_step).unwrap();

        let stride = denominator.max(1);
        prop_assert!(!evs.is_empty());
        prop_assert_eq!(evs[0], range_min);
        prop_assert!(*evs.last().unwrap() <= range_max);
        // The next step would leave the range.
        prop_assert!(*evs.last().unwrap() + stride > range_max);
        for pair in evs.windows(2) {
            prop_assert_eq!(pair[1] - pair[0], stride);
        }
    }

    /// Fractional step sizes floor to the containing stride.
    #[test]
    fn prop_fractional_steps_floor(
        range_min in -8i32..=0,
        span in 1i32..=16,
        ev_per_step in 0.05f64..1.5,
    ) {
        let range_max = range_min + span;
        let evs = enumerate_ev_steps(range_min, range_max, ev_per_step).unwrap();
        let stride = ((1.0 / ev_per_step).floor() as i32).max(1);
        for pair in evs.windows(2) {
            prop_assert_eq!(pair[1] - pair[0], stride);
        }
        prop_assert_eq!(evs[0], range_min);
        prop_assert!(*evs.last().unwrap() <= range_max);
    }
}
