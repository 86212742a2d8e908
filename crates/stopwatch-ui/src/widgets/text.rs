use stopwatch_engine::coords::{Rect, Vec2};
use stopwatch_engine::paint::Color;
use stopwatch_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;

/// Line height, as a multiple of the font size, assumed when no font is loaded.
const FALLBACK_LINE_HEIGHT: f32 = 1.2;

/// A single line of text.
///
/// Without a font the widget still takes up one empty line so surrounding
/// layout stays put; it just draws nothing.
///
/// # Example
/// ```rust,ignore
/// Text::new("00:00.00", fonts.get("body"), 64.0, Color::BLACK)
/// ```
pub struct Text {
    pub text: String,
    pub font: Option<FontId>,
    pub size: f32,
    pub color: Color,
}

impl Text {
    pub fn new(text: impl Into<String>, font: Option<FontId>, size: f32, color: Color) -> Self {
        Self { text: text.into(), font, size, color }
    }

    /// Replaces the text, reusing the existing allocation.
    pub fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text.clear();
            self.text.push_str(text);
        }
    }
}

impl Widget for Text {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let size = match self.font {
            Some(font) => ctx.fonts.measure_text_scaled(&self.text, font, self.size, ctx.scale),
            None => Vec2::new(0.0, self.size * FALLBACK_LINE_HEIGHT),
        };
        constraints.constrain(size)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        if let Some(font) = self.font
            && !self.text.is_empty()
        {
            painter.text(self.text.as_str(), font, self.size, self.color, rect.origin);
        }
    }
}

#[cfg(test)]
mod tests {
    use stopwatch_engine::scene::DrawList;
    use stopwatch_engine::text::FontSystem;

    use super::*;

    #[test]
    fn fontless_text_measures_one_empty_line() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts, scale: 2.0 };
        let t = Text::new("00:00.00", None, 64.0, Color::BLACK);
        let size = t.measure(Constraints::unbounded(), &ctx);
        assert_eq!(size.x, 0.0);
        assert!((size.y - 76.8).abs() < 1e-4);
    }

    #[test]
    fn fontless_text_paints_nothing() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        let t = Text::new("Start", None, 20.0, Color::WHITE);
        {
            let mut p = Painter::new(&mut list, &fonts, None, false, 1.0);
            t.paint(&mut p, Rect::new(0.0, 0.0, 100.0, 20.0));
        }
        assert!(list.is_empty());
    }

    #[test]
    fn set_text_replaces_content() {
        let mut t = Text::new("Start", None, 20.0, Color::WHITE);
        t.set_text("Stop");
        assert_eq!(t.text, "Stop");
    }
}
