//! Frame timing.
//!
//! One `FrameClock` per window; call `tick()` once per presented frame.
//! Elapsed stopwatch time never comes from here: frames are only produced
//! when something changed, so frame deltas are irregular by construction.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
