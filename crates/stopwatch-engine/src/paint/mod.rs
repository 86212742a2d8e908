//! Color model shared between UI and renderers.

mod color;

pub use color::Color;
