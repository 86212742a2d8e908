use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};
use crate::presenter::{present, DisplayState};
use crate::scheduler::{TickScheduler, DEFAULT_TICK_PERIOD};
use crate::state::{StopwatchState, Transition};

/// Screen-level stopwatch controller.
///
/// Owns the clock, the running state, the tick scheduler and the display it
/// last produced. The host calls [`toggle`](Self::toggle) from the button and
/// [`poll`](Self::poll) from its frame loop, and sleeps until
/// [`next_deadline`](Self::next_deadline).
#[derive(Debug)]
pub struct Stopwatch<C: Clock = SystemClock> {
    clock: C,
    state: StopwatchState,
    scheduler: TickScheduler,
    display: DisplayState,
}

impl Stopwatch<SystemClock> {
    /// Stopwatch on the system clock with the default 10 ms tick.
    pub fn system() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> Stopwatch<C> {
    pub fn new(clock: C) -> Self {
        Self::with_period(clock, DEFAULT_TICK_PERIOD)
    }

    pub fn with_period(clock: C, period: Duration) -> Self {
        Self {
            clock,
            state: StopwatchState::new(),
            scheduler: TickScheduler::new(period),
            display: DisplayState::default(),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// What the screen should show right now.
    #[inline]
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Title for the toggle button.
    #[inline]
    pub fn button_label(&self) -> &'static str {
        if self.is_running() { "Stop" } else { "Start" }
    }

    /// When the host must call [`poll`](Self::poll) next; `None` while stopped.
    #[inline]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    #[inline]
    pub fn tick_period(&self) -> Duration {
        self.scheduler.period()
    }

    /// Starts from zero when stopped, stops when running.
    ///
    /// Starting resets the display to `00:00.00` at once. Stopping cancels the scheduler before returning, so no tick is
    /// reported afterwards; the display keeps the value of the last tick.
    pub fn toggle(&mut self) -> Transition {
        let now = self.clock.now();
        let transition = self.state.toggle(now);
        match transition {
            Transition::Started => {
                self.scheduler.arm(now);
                self.display = DisplayState::default();
                log::info!("stopwatch started");
            }
            Transition::Stopped => {
                self.scheduler.cancel();
                log::info!("stopwatch stopped at {}", self.display.text);
            }
        }
        transition
    }

    /// Services a due tick, if any.
    ///
    /// Returns `true` when the display was recomputed.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        let state = &self.state;
        let display = &mut self.display;
        self.scheduler.fire_due(now, |tick| {
            if let Some(elapsed) = state.elapsed(tick.at) {
                *display = present(elapsed);
            }
        })
    }
}

impl Default for Stopwatch<SystemClock> {
    fn default() -> Self {
        Self::system()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::clock::ManualClock;

    const P: Duration = DEFAULT_TICK_PERIOD;

    fn setup() -> (ManualClock, Stopwatch<ManualClock>) {
        let clock = ManualClock::new();
        let sw = Stopwatch::new(clock.clone());
        (clock, sw)
    }

    #[test]
    fn starts_stopped_showing_zero() {
        let (_, sw) = setup();
        assert!(!sw.is_running());
        assert_eq!(sw.display().text, "00:00.00");
        assert_eq!(sw.display().hand_angle, -FRAC_PI_2);
        assert_eq!(sw.button_label(), "Start");
        assert_eq!(sw.next_deadline(), None);
    }

    #[test]
    fn toggle_flips_label_and_arms() {
        let (clock, mut sw) = setup();
        assert_eq!(sw.toggle(), Transition::Started);
        assert_eq!(sw.button_label(), "Stop");
        assert_eq!(sw.next_deadline(), Some(clock.now() + P));

        assert_eq!(sw.toggle(), Transition::Stopped);
        assert_eq!(sw.button_label(), "Start");
        assert_eq!(sw.next_deadline(), None);
    }

    #[test]
    fn poll_before_deadline_does_nothing() {
        let (clock, mut sw) = setup();
        sw.toggle();
        clock.advance(P / 2);
        assert!(!sw.poll());
        assert_eq!(sw.display().text, "00:00.00");
    }

    #[test]
    fn display_follows_clock_not_tick_count() {
        let (clock, mut sw) = setup();
        sw.toggle();

        // One late wake-up after 65.5 s still shows the full elapsed time.
        clock.advance(Duration::from_millis(65_500));
        assert!(sw.poll());
        assert_eq!(sw.display().text, "01:05.50");
    }

    #[test]
    fn no_tick_after_stop() {
        let (clock, mut sw) = setup();
        sw.toggle();
        clock.advance(Duration::from_millis(1_230));
        assert!(sw.poll());
        let frozen = sw.display().clone();

        assert_eq!(sw.toggle(), Transition::Stopped);
        clock.advance(Duration::from_secs(5));
        assert!(!sw.poll());
        assert_eq!(sw.display(), &frozen);
    }

    #[test]
    fn restart_resets_to_zero() {
        let (clock, mut sw) = setup();
        sw.toggle();
        clock.advance(Duration::from_secs(42));
        sw.poll();
        assert_eq!(sw.display().text, "00:42.00");
        sw.toggle();

        clock.advance(Duration::from_secs(3));
        sw.toggle();
        clock.advance(P);
        assert!(sw.poll());
        assert_eq!(sw.display().text, "00:00.01");
    }

    #[test]
    fn restart_shows_zero_before_first_tick() {
        let (clock, mut sw) = setup();
        sw.toggle();
        clock.advance(Duration::from_secs(42));
        assert!(sw.poll());
        sw.toggle();
        assert_eq!(sw.display().text, "00:42.00");

        sw.toggle();
        assert!(sw.is_running());
        assert_eq!(sw.display().text, "00:00.00");
        assert_eq!(sw.display().hand_angle, -FRAC_PI_2);
    }

    #[test]
    fn custom_period_is_used() {
        let clock = ManualClock::new();
        let mut sw = Stopwatch::with_period(clock.clone(), Duration::from_millis(50));
        assert_eq!(sw.tick_period(), Duration::from_millis(50));
        sw.toggle();
        clock.advance(Duration::from_millis(40));
        assert!(!sw.poll());
        clock.advance(Duration::from_millis(10));
        assert!(sw.poll());
        assert_eq!(sw.display().text, "00:00.05");
    }
}
