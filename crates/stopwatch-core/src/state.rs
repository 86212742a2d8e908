use std::time::{Duration, Instant};

/// Outcome of [`StopwatchState::toggle`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Transition {
    Started,
    Stopped,
}

/// Running / stopped state.
///
/// The start reference is present exactly while the stopwatch runs; holding it
/// in a single `Option` makes the "reference iff running" rule structural.
/// There is no accumulated time: every start begins from zero.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct StopwatchState {
    started_at: Option<Instant>,
}

impl StopwatchState {
    /// A stopped stopwatch.
    #[inline]
    pub const fn new() -> Self {
        Self { started_at: None }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Instant of the last start, while running.
    #[inline]
    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Starts from zero at `now`.
    ///
    /// Returns `false` (and changes nothing) if already running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now);
        true
    }

    /// Stops. The last displayed value is kept by whoever rendered it.
    ///
    /// Returns `false` (and changes nothing) if already stopped.
    pub fn stop(&mut self) -> bool {
        self.started_at.take().is_some()
    }

    /// Start when stopped, stop when running.
    pub fn toggle(&mut self, now: Instant) -> Transition {
        if self.stop() {
            Transition::Stopped
        } else {
            self.started_at = Some(now);
            Transition::Started
        }
    }

    /// Time since the last start, or `None` when stopped.
    ///
    /// Saturates at zero if `now` precedes the start reference.
    #[inline]
    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.started_at.map(|start| now.saturating_duration_since(start))
    }
}
