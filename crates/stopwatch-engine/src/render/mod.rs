//! GPU rendering.
//!
//! [`SceneRenderer`] walks a [`DrawList`](crate::scene::DrawList) in paint
//! order and hands each command to the matching shape renderer. Consecutive
//! commands of one shape kind become a single instanced draw, and all draws of
//! a frame share one render pass, so z-order holds across shape kinds.
//!
//! CPU geometry is in logical pixels; vertex shaders convert to NDC using a
//! viewport uniform.

mod ctx;
mod renderer;
mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
pub use renderer::SceneRenderer;
