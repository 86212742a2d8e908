use std::time::{Duration, Instant};

/// Nominal tick period while the stopwatch runs.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(10);

/// Smallest accepted period; shorter requests are clamped up to this.
const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// One scheduler firing.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Tick {
    /// When the tick was observed (the host's `now`, not the nominal deadline).
    pub at: Instant,
    /// Whole periods skipped because the host woke up late.
    pub missed: u32,
}

/// Fixed-period tick scheduler driven by the host loop.
///
/// The scheduler never sleeps or spawns anything. The host asks for the next
/// [`deadline`](Self::deadline), wakes up around then and calls
/// [`fire_due`](Self::fire_due). Late wake-ups are coalesced into a single
/// tick; consumers must derive what they show from the clock, not from the
/// number of ticks.
///
/// Cancellation is synchronous: after [`cancel`](Self::cancel) returns, no
/// further tick is reported until the scheduler is armed again.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    period: Duration,
    deadline: Option<Instant>,
}

impl TickScheduler {
    /// Creates an idle scheduler with `period`, clamped to at least 1 ms.
    pub fn new(period: Duration) -> Self {
        Self { period: period.max(MIN_TICK_PERIOD), deadline: None }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Instant at which the next tick becomes due, or `None` when idle.
    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Starts ticking; the first tick is due one period after `now`.
    ///
    /// Re-arming an armed scheduler restarts the cadence from `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.period);
    }

    /// Stops ticking.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Invokes `on_tick` once if a tick is due at `now`.
    ///
    /// The next deadline becomes the first period boundary strictly after
    /// `now`; skipped boundaries are reported in [`Tick::missed`] and never
    /// replayed. Returns whether the callback ran.
    pub fn fire_due<F>(&mut self, now: Instant, on_tick: F) -> bool
    where
        F: FnOnce(Tick),
    {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }

        let late = now - deadline;
        let missed = u32::try_from(late.as_nanos() / self.period.as_nanos()).unwrap_or(u32::MAX);

        let next = missed
            .checked_add(1)
            .and_then(|n| self.period.checked_mul(n))
            .and_then(|step| deadline.checked_add(step))
            .unwrap_or(now + self.period);
        self.deadline = Some(next);

        if missed > 0 {
            log::trace!("tick coalesced {missed} missed period(s)");
        }

        on_tick(Tick { at: now, missed });
        true
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: Duration = DEFAULT_TICK_PERIOD;

    fn fired(s: &mut TickScheduler, now: Instant) -> Option<Tick> {
        let mut out = None;
        s.fire_due(now, |t| out = Some(t));
        out
    }

    #[test]
    fn idle_scheduler_never_fires() {
        let mut s = TickScheduler::default();
        assert!(!s.is_armed());
        assert_eq!(s.deadline(), None);
        assert_eq!(fired(&mut s, Instant::now() + Duration::from_secs(60)), None);
    }

    #[test]
    fn first_tick_is_one_period_after_arm() {
        let t0 = Instant::now();
        let mut s = TickScheduler::default();
        s.arm(t0);

        assert_eq!(s.deadline(), Some(t0 + P));
        assert_eq!(fired(&mut s, t0 + P / 2), None);

        let tick = fired(&mut s, t0 + P).expect("tick due at deadline");
        assert_eq!(tick.at, t0 + P);
        assert_eq!(tick.missed, 0);
        assert_eq!(s.deadline(), Some(t0 + 2 * P));
    }

    #[test]
    fn late_wakeup_coalesces_into_one_tick() {
        let t0 = Instant::now();
        let mut s = TickScheduler::default();
        s.arm(t0);

        // Deadline was t0 + P; waking at t0 + 3.5P skips the 2P and 3P boundaries.
        let now = t0 + P * 7 / 2;
        let tick = fired(&mut s, now).expect("late tick still fires");
        assert_eq!(tick.missed, 2);
        assert_eq!(s.deadline(), Some(t0 + 4 * P));

        // Nothing else is due until the next boundary.
        assert_eq!(fired(&mut s, now), None);
    }

    #[test]
    fn next_deadline_is_strictly_after_now_on_boundary() {
        let t0 = Instant::now();
        let mut s = TickScheduler::default();
        s.arm(t0);

        let now = t0 + 3 * P;
        let tick = fired(&mut s, now).expect("tick");
        assert_eq!(tick.missed, 2);
        assert!(s.deadline().expect("armed") > now);
    }

    #[test]
    fn cancel_is_synchronous() {
        let t0 = Instant::now();
        let mut s = TickScheduler::default();
        s.arm(t0);
        s.cancel();

        assert!(!s.is_armed());
        assert_eq!(fired(&mut s, t0 + 100 * P), None);
    }

    #[test]
    fn rearm_restarts_cadence() {
        let t0 = Instant::now();
        let mut s = TickScheduler::default();
        s.arm(t0);
        let t1 = t0 + Duration::from_millis(3);
        s.arm(t1);
        assert_eq!(s.deadline(), Some(t1 + P));
    }

    #[test]
    fn period_is_clamped() {
        let s = TickScheduler::new(Duration::ZERO);
        assert_eq!(s.period(), Duration::from_millis(1));
    }
}
