use std::f32::consts::{FRAC_PI_2, TAU};
use std::time::Duration;

/// What the screen shows for one elapsed time.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    /// Digital readout, `MM:SS.hh`.
    pub text: String,
    /// Hand angle in radians. `-π/2` points at 12 o'clock; positive is
    /// clockwise in +Y-down screen space.
    pub hand_angle: f32,
}

impl Default for DisplayState {
    /// The readout before the first start: `"00:00.00"`, hand pointing up.
    fn default() -> Self {
        present(Duration::ZERO)
    }
}

/// Minutes (mod 100), seconds (mod 60) and truncated hundredths.
///
/// Works on integer nanoseconds so inputs such as 65.5 s never lose a
/// hundredth to float rounding.
fn split(elapsed: Duration) -> (u64, u64, u32) {
    let secs = elapsed.as_secs();
    let minutes = (secs / 60) % 100;
    let seconds = secs % 60;
    let hundredths = elapsed.subsec_nanos() / 10_000_000;
    (minutes, seconds, hundredths)
}

/// Formats `elapsed` as zero-padded `MM:SS.hh`.
///
/// Minutes wrap at 100 so the readout always has two digits per field.
pub fn format_elapsed(elapsed: Duration) -> String {
    let (minutes, seconds, hundredths) = split(elapsed);
    format!("{minutes:02}:{seconds:02}.{hundredths:02}")
}

/// Second-hand angle for `elapsed`: one revolution per minute.
///
/// Only the seconds and hundredths feed the angle, so the result is periodic
/// with a period of 60 s.
pub fn hand_angle(elapsed: Duration) -> f32 {
    let (_, seconds, hundredths) = split(elapsed);
    let within_minute = seconds as f32 + hundredths as f32 / 100.0;
    TAU * within_minute / 60.0 - FRAC_PI_2
}

/// Derives the full display for `elapsed`.
pub fn present(elapsed: Duration) -> DisplayState {
    DisplayState { text: format_elapsed(elapsed), hand_angle: hand_angle(elapsed) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn zero_reads_all_zeros() {
        assert_eq!(present(Duration::ZERO).text, "00:00.00");
    }

    #[test]
    fn default_display_is_zero() {
        let d = DisplayState::default();
        assert_eq!(d.text, "00:00.00");
        assert_eq!(d.hand_angle, -FRAC_PI_2);
    }

    #[test]
    fn one_minute_five_and_a_half() {
        assert_eq!(format_elapsed(secs(65.5)), "01:05.50");
    }

    #[test]
    fn hundredths_truncate() {
        assert_eq!(format_elapsed(secs(125.4567)), "02:05.45");
        assert_eq!(format_elapsed(Duration::from_millis(999)), "00:00.99");
    }

    #[test]
    fn exact_decimal_hundredths_are_kept() {
        // 0.29 * 100 is 28.999... in binary floating point.
        assert_eq!(format_elapsed(Duration::from_millis(290)), "00:00.29");
    }

    #[test]
    fn minutes_wrap_at_one_hundred() {
        assert_eq!(format_elapsed(Duration::from_secs(99 * 60 + 59)), "99:59.00");
        assert_eq!(format_elapsed(Duration::from_secs(100 * 60 + 1)), "00:01.00");
    }

    #[test]
    fn hand_points_up_at_zero() {
        assert_eq!(hand_angle(Duration::ZERO), -FRAC_PI_2);
    }

    #[test]
    fn hand_quarter_positions() {
        let eps = 1e-5;
        // 15 s → 3 o'clock (0 rad), 30 s → 6 o'clock (π/2), 45 s → 9 o'clock (π).
        assert!((hand_angle(Duration::from_secs(15))).abs() < eps);
        assert!((hand_angle(Duration::from_secs(30)) - FRAC_PI_2).abs() < eps);
        assert!((hand_angle(Duration::from_secs(45)) - std::f32::consts::PI).abs() < eps);
    }

    #[test]
    fn minutes_do_not_move_the_hand() {
        let a = Duration::from_millis(12_340);
        assert_eq!(hand_angle(a), hand_angle(a + Duration::from_secs(60)));
        assert_eq!(hand_angle(a), hand_angle(a + Duration::from_secs(7 * 60)));
    }

    #[test]
    fn present_combines_text_and_angle() {
        let e = secs(65.5);
        let d = present(e);
        assert_eq!(d.text, format_elapsed(e));
        assert_eq!(d.hand_angle, hand_angle(e));
    }
}
