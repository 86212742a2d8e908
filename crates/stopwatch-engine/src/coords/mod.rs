//! Geometry shared by renderers and UI.
//!
//! Canonical CPU space: logical pixels, origin top-left, +X right, +Y down.
//! Renderers convert to NDC in shaders using a viewport uniform.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
