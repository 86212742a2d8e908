//! Stopwatch engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the UI layer: the winit
//! event loop, the wgpu device, input translation, frame timing, the draw
//! list and one renderer per shape.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
