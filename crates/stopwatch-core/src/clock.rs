use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source.
///
/// The stopwatch never reads the time directly; it asks its clock. Production
/// code uses [`SystemClock`], tests use [`ManualClock`].
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Reads `Instant::now()`.
///
/// `Instant` is monotonic, so wall-clock adjustments (NTP, DST, manual
/// changes) never make the elapsed time jump.
#[derive(Debug, Copy, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-advanced clock.
///
/// Clones share the same reading, so a test can hand one clone to a
/// [`Stopwatch`](crate::Stopwatch) and keep another to move time forward.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    /// Starts at the current instant.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self { now: Rc::new(Cell::new(start)) }
    }

    /// Moves the reading forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Sets the reading. Callers must not move it backwards.
    pub fn set(&self, at: Instant) {
        debug_assert!(at >= self.now.get(), "ManualClock must stay monotonic");
        self.now.set(at);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_reading() {
        let a = ManualClock::new();
        let b = a.clone();
        let t0 = a.now();

        b.advance(Duration::from_millis(250));

        assert_eq!(a.now() - t0, Duration::from_millis(250));
        assert_eq!(a.now(), b.now());
    }

    #[test]
    fn manual_clock_set_moves_forward() {
        let t0 = Instant::now();
        let clock = ManualClock::starting_at(t0);
        clock.set(t0 + Duration::from_secs(3));
        assert_eq!(clock.now() - t0, Duration::from_secs(3));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
