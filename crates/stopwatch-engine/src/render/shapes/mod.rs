//! Per-shape instanced renderers, driven by [`SceneRenderer`](super::SceneRenderer).

mod common;

pub(crate) mod circle;
pub(crate) mod line;
pub(crate) mod rounded_rect;
pub(crate) mod text;

pub(crate) use common::SharedResources;
