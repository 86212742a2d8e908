use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Border;

/// Rounded rectangle payload with one radius for every corner.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectCmd {
    pub rect: Rect,
    /// Clamped by the renderer to half the shorter side.
    pub radius: f32,
    pub fill: Color,
    pub border: Option<Border>,
}

impl DrawList {
    #[inline]
    pub fn push_rounded_rect(
        &mut self,
        z: ZIndex,
        rect: Rect,
        radius: f32,
        fill: Color,
        border: Option<Border>,
    ) {
        self.push(
            z,
            DrawCmd::RoundedRect(RoundedRectCmd {
                rect,
                radius,
                fill,
                border,
            }),
        );
    }
}
