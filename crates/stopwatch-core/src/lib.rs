//! Stopwatch core.
//!
//! Everything that decides *what* the stopwatch shows lives here, with no
//! windowing or GPU dependencies:
//!
//! - [`clock`]: monotonic time source (`SystemClock`, `ManualClock` for tests)
//! - [`state`]: running / stopped state with the start reference
//! - [`scheduler`]: fixed-period tick scheduler with synchronous cancellation
//! - [`presenter`]: elapsed time → `MM:SS.hh` text + hand angle
//! - [`stopwatch`]: the controller tying the four together
//!
//! ```
//! use std::time::Duration;
//! use stopwatch_core::{ManualClock, Stopwatch, Transition};
//!
//! let clock = ManualClock::new();
//! let mut sw = Stopwatch::new(clock.clone());
//! assert_eq!(sw.toggle(), Transition::Started);
//!
//! clock.advance(Duration::from_millis(1_250));
//! assert!(sw.poll());
//! assert_eq!(sw.display().text, "00:01.25");
//! ```

pub mod clock;
pub mod presenter;
pub mod scheduler;
pub mod state;
pub mod stopwatch;

pub use clock::{Clock, ManualClock, SystemClock};
pub use presenter::{format_elapsed, hand_angle, present, DisplayState};
pub use scheduler::{Tick, TickScheduler, DEFAULT_TICK_PERIOD};
pub use state::{StopwatchState, Transition};
pub use stopwatch::Stopwatch;
