use stopwatch_engine::coords::{Rect, Vec2};
use stopwatch_engine::paint::Color;
use stopwatch_engine::scene::shapes::{Border, LineCap};
use stopwatch_engine::scene::{DrawList, ZIndex};
use stopwatch_engine::text::{FontId, FontSystem};
use stopwatch_engine::window::CursorIcon;

use crate::constraints::LayoutCtx;

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the engine's `DrawList` and exposes per-frame pointer state so
/// widgets can express hover / pressed visuals directly while painting.
/// Every draw call lands one z-layer above the previous one, so paint order
/// is draw order.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    font_system: &'a FontSystem,
    /// Physical pixels per logical pixel for this frame.
    pub scale: f32,
    z: i32,
    /// Pointer position in logical pixels, `None` while outside the window.
    pub mouse_pos: Option<Vec2>,
    /// True while the primary button is held down.
    pub mouse_pressed: bool,
    cursor: CursorIcon,
}

impl<'a> Painter<'a> {
    pub fn new(
        draw_list: &'a mut DrawList,
        font_system: &'a FontSystem,
        mouse_pos: Option<Vec2>,
        mouse_pressed: bool,
        scale: f32,
    ) -> Self {
        Self {
            draw_list,
            font_system,
            scale,
            z: 0,
            mouse_pos,
            mouse_pressed,
            cursor: CursorIcon::Default,
        }
    }

    // ── input queries ─────────────────────────────────────────────────────

    #[inline]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        self.mouse_pos.is_some_and(|p| rect.contains(p))
    }

    /// Returns `true` if the primary button is held and the cursor is over `rect`.
    #[inline]
    pub fn is_pressed(&self, rect: Rect) -> bool {
        self.mouse_pressed && self.is_hovered(rect)
    }

    /// Requests a cursor shape for this frame. The last request wins.
    pub fn set_cursor(&mut self, cursor: CursorIcon) {
        self.cursor = cursor;
    }

    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    // ── text measurement ──────────────────────────────────────────────────

    /// Measures `text` at the renderer's current physical scale.
    pub fn measure_text(&self, text: &str, font: FontId, size: f32) -> Vec2 {
        self.font_system.measure_text_scaled(text, font, size, self.scale)
    }

    /// Returns a [`LayoutCtx`] borrowing this painter's font system.
    ///
    /// Containers use this inside `paint` to re-measure their children.
    #[inline]
    pub fn layout_ctx(&self) -> LayoutCtx<'a> {
        LayoutCtx { fonts: self.font_system, scale: self.scale }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Rounded rectangle with optional border.
    ///
    /// Pass `radius = 0.0` for sharp corners.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color, border: Option<Border>) {
        let z = self.next_z();
        self.draw_list.push_rounded_rect(z, rect, radius, color, border);
    }

    /// Circle with optional border.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, border: Option<Border>) {
        let z = self.next_z();
        self.draw_list.push_circle(z, center, radius, color, border);
    }

    /// Straight segment `width` logical pixels thick.
    pub fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color, cap: LineCap) {
        let z = self.next_z();
        self.draw_list.push_line(z, from, to, width, color, cap);
    }

    /// Single line of text with its line box's top-left at `origin`.
    pub fn text(&mut self, text: impl Into<String>, font: FontId, size: f32, color: Color, origin: Vec2) {
        let z = self.next_z();
        self.draw_list.push_text(z, text, font, size, color, origin);
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}
