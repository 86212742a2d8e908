use stopwatch_engine::coords::{Rect, Vec2};
use stopwatch_engine::paint::Color;
use stopwatch_engine::window::CursorIcon;

use crate::constraints::{Constraints, Edges, LayoutCtx, inset_rect};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;
use crate::widgets::text::Text;

/// A clickable rounded button with a centered text label.
///
/// Visual state (hover, press) is read from `Painter` during `paint`, so the
/// only retained state is the label. A click inside the button is
/// `Consumed`; the parent that owns the button reacts to that result.
/// The label is centered inside the padding.
///
/// # Example
/// ```rust,ignore
/// Button::new(Text::new("Start", font, 20.0, Color::WHITE))
///     .background(orange)
///     .corner_radius(25.0)
///     .padding(Edges::symmetric(8.0, 24.0))
///     .min_size(200.0, 50.0)
/// ```
pub struct Button {
    label: Text,

    background: Color,
    hover_background: Color,
    press_background: Color,
    corner_radius: f32,
    padding: Edges,
    min_width: f32,
    min_height: f32,
}

impl Button {
    pub fn new(label: Text) -> Self {
        Self {
            label,
            background: Color::TRANSPARENT,
            hover_background: Color::TRANSPARENT,
            press_background: Color::TRANSPARENT,
            corner_radius: 0.0,
            padding: Edges::default(),
            min_width: 0.0,
            min_height: 0.0,
        }
    }

    /// Sets all three background states at once.
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self.hover_background = color;
        self.press_background = color;
        self
    }

    /// Background color when the cursor is over the button.
    pub fn hover_background(mut self, color: Color) -> Self {
        self.hover_background = color;
        self
    }

    /// Background color while the primary button is held.
    pub fn press_background(mut self, color: Color) -> Self {
        self.press_background = color;
        self
    }

    pub fn corner_radius(mut self, r: f32) -> Self {
        self.corner_radius = r;
        self
    }

    /// Space kept clear between the edge and the label.
    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn min_size(mut self, width: f32, height: f32) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    pub fn label(&self) -> &Text {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut Text {
        &mut self.label
    }
}

impl Widget for Button {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner = constraints.shrink(self.padding);
        let label = self.label.measure(inner, ctx);
        let w = (label.x + self.padding.h()).max(self.min_width);
        let h = (label.y + self.padding.v()).max(self.min_height);
        constraints.constrain(Vec2::new(w, h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let bg = if painter.is_pressed(rect) {
            self.press_background
        } else if painter.is_hovered(rect) {
            self.hover_background
        } else {
            self.background
        };
        if painter.is_hovered(rect) {
            painter.set_cursor(CursorIcon::Pointer);
        }

        painter.fill_rounded_rect(rect, self.corner_radius, bg, None);

        let content = inset_rect(rect, self.padding);
        let label_size = self.label.measure(Constraints::loose(content.size), &painter.layout_ctx());
        self.label.paint(painter, Rect::from_center(content.center(), label_size));
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx<'_>) -> EventResult {
        if let UiEvent::Click { pos } = event
            && rect.contains(*pos)
        {
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }
}

#[cfg(test)]
mod tests {
    use stopwatch_engine::scene::{DrawCmd, DrawList};
    use stopwatch_engine::text::FontSystem;

    use super::*;

    fn button() -> Button {
        Button::new(Text::new("Start", None, 20.0, Color::WHITE))
            .background(Color::BLACK)
            .hover_background(Color::WHITE)
            .corner_radius(25.0)
            .min_size(200.0, 50.0)
    }

    fn painted_fill(b: &Button, mouse: Option<Vec2>) -> (Color, CursorIcon) {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        let cursor = {
            let mut p = Painter::new(&mut list, &fonts, mouse, false, 1.0);
            b.paint(&mut p, Rect::new(0.0, 0.0, 200.0, 50.0));
            p.cursor()
        };
        match &list.items()[0].cmd {
            DrawCmd::RoundedRect(r) => {
                assert_eq!(r.radius, 25.0);
                (r.fill, cursor)
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn measure_honours_min_size() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts, scale: 1.0 };
        let size = button().measure(Constraints::unbounded(), &ctx);
        assert_eq!(size, Vec2::new(200.0, 50.0));
    }

    #[test]
    fn padding_wraps_the_label() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts, scale: 1.0 };
        let b = Button::new(Text::new("Go", None, 20.0, Color::WHITE))
            .padding(Edges::symmetric(8.0, 24.0));
        // A font-less label measures 0 wide and 1.2 em tall.
        let size = b.measure(Constraints::unbounded(), &ctx);
        assert_eq!(size, Vec2::new(48.0, 20.0 * 1.2 + 16.0));
    }

    #[test]
    fn hover_switches_background_and_cursor() {
        let b = button();
        assert_eq!(painted_fill(&b, None), (Color::BLACK, CursorIcon::Default));
        assert_eq!(
            painted_fill(&b, Some(Vec2::new(100.0, 25.0))),
            (Color::WHITE, CursorIcon::Pointer)
        );
    }

    #[test]
    fn only_clicks_inside_are_consumed() {
        let mut b = button();

        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts, scale: 1.0 };
        let rect = Rect::new(0.0, 0.0, 200.0, 50.0);

        let inside = UiEvent::Click { pos: Vec2::new(10.0, 10.0) };
        assert_eq!(b.on_event(&inside, rect, &ctx), EventResult::Consumed);

        let outside = UiEvent::Click { pos: Vec2::new(10.0, 60.0) };
        assert_eq!(b.on_event(&outside, rect, &ctx), EventResult::Ignored);

        let key = UiEvent::KeyPress {
            key: stopwatch_engine::input::Key::Space,
            modifiers: Default::default(),
            repeat: false,
        };
        assert_eq!(b.on_event(&key, rect, &ctx), EventResult::Ignored);
    }
}
