//! Property tests for the presenter and the controller.
//!
//! - every readout has the `MM:SS.hh` shape
//! - the hand angle repeats every 60 s and stays inside one revolution
//! - a stopped stopwatch never changes its display, whatever the clock does

use std::f32::consts::{FRAC_PI_2, TAU};
use std::time::Duration;

use proptest::prelude::*;
use stopwatch_core::{format_elapsed, hand_angle, ManualClock, Stopwatch};

/// Checks `\d{2}:\d{2}\.\d{2}` without pulling in a regex engine.
fn has_readout_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 8
        && b[2] == b':'
        && b[5] == b'.'
        && [0, 1, 3, 4, 6, 7].iter().all(|&i| b[i].is_ascii_digit())
}

// Up to ~11.5 days, well past the 100-minute wrap.
fn arb_elapsed() -> impl Strategy<Value = Duration> {
    (0u64..1_000_000, 0u32..1_000_000_000).prop_map(|(s, n)| Duration::new(s, n))
}

proptest! {
    #[test]
    fn readout_always_has_fixed_shape(e in arb_elapsed()) {
        let text = format_elapsed(e);
        prop_assert!(has_readout_shape(&text), "bad readout {text:?} for {e:?}");
    }

    #[test]
    fn seconds_field_never_reaches_sixty(e in arb_elapsed()) {
        let text = format_elapsed(e);
        let ss = text.get(3..5).map(str::parse::<u32>);
        prop_assert!(matches!(ss, Some(Ok(n)) if n < 60), "bad seconds in {text:?}");
    }

    #[test]
    fn hand_angle_is_periodic_in_a_minute(e in arb_elapsed()) {
        prop_assert_eq!(hand_angle(e), hand_angle(e + Duration::from_secs(60)));
    }

    #[test]
    fn hand_angle_stays_in_one_revolution(e in arb_elapsed()) {
        let a = hand_angle(e);
        prop_assert!(a >= -FRAC_PI_2);
        prop_assert!(a < TAU - FRAC_PI_2);
    }

    #[test]
    fn stopped_display_is_frozen(run_ms in 10u64..600_000, idle_ms in 0u64..600_000) {
        let clock = ManualClock::new();
        let mut sw = Stopwatch::new(clock.clone());

        sw.toggle();
        clock.advance(Duration::from_millis(run_ms));
        prop_assert!(sw.poll());
        let shown = sw.display().clone();

        sw.toggle();
        clock.advance(Duration::from_millis(idle_ms));
        prop_assert!(!sw.poll());
        prop_assert_eq!(sw.display(), &shown);
    }
}
