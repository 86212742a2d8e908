use stopwatch_engine::coords::{Rect, Vec2};
use stopwatch_engine::input::{
    InputEvent, InputFrame, InputState, Key, KeyState, Modifiers, MouseButton,
};
use stopwatch_engine::scene::DrawList;
use stopwatch_engine::text::{FontId, FontLoadError, FontSystem};
use stopwatch_engine::window::CursorIcon;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::UiEvent;
use crate::painter::Painter;
use crate::widget::Element;

// ── UiInput ───────────────────────────────────────────────────────────────

/// Snapshot of input for one UI frame, built from the engine's
/// `InputState` / `InputFrame`.
#[derive(Debug, Clone, Default)]
pub struct UiInput {
    /// Cursor position in logical pixels, `None` while outside the window.
    pub mouse_pos: Option<Vec2>,
    /// `true` while the primary button is held down.
    pub mouse_pressed: bool,
    /// `true` for exactly one frame when the primary button is released.
    pub mouse_clicked: bool,
    /// Key presses this frame, in arrival order.
    pub keys_pressed: Vec<KeyStroke>,
}

/// One key press as the widget tree sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStroke {
    pub key: Key,
    /// Modifiers held when the key went down.
    pub modifiers: Modifiers,
    pub repeat: bool,
}

impl KeyStroke {
    pub fn press(key: Key) -> Self {
        Self { key, modifiers: Modifiers::default(), repeat: false }
    }
}

impl UiInput {
    /// Collects the primary-button state and every key press of this frame.
    ///
    /// Keys are read from the raw event list rather than the `keys_pressed`
    /// set so each auto-repeat keeps its own entry and its `repeat` flag.
    pub fn from_engine(state: &InputState, frame: &InputFrame) -> Self {
        let keys_pressed = frame
            .events
            .iter()
            .filter_map(|ev| match ev {
                InputEvent::Key { key, state: KeyState::Pressed, modifiers, repeat } => {
                    Some(KeyStroke { key: *key, modifiers: *modifiers, repeat: *repeat })
                }
                _ => None,
            })
            .collect();

        Self {
            mouse_pos: state.pointer_pos.map(|(x, y)| Vec2::new(x, y)),
            mouse_pressed: state.button_down(MouseButton::Left),
            mouse_clicked: frame.buttons_released.contains(&MouseButton::Left),
            keys_pressed,
        }
    }
}

/// What one call to [`UiScene::frame_ref`] produced besides the draw list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiFrame {
    /// At least one input event was consumed by the tree.
    pub consumed: bool,
    /// Cursor shape requested while painting.
    pub cursor: CursorIcon,
}

// ── UiScene ───────────────────────────────────────────────────────────────

/// Owns the fonts and the draw list shared across frames.
pub struct UiScene {
    /// Public so the application can split-borrow it alongside `draw_list`
    /// when handing both to the renderer.
    pub font_system: FontSystem,
    /// Draw list populated by the most recent [`frame_ref`](Self::frame_ref).
    pub draw_list: DrawList,
}

impl UiScene {
    pub fn new() -> Self {
        Self { font_system: FontSystem::new(), draw_list: DrawList::new() }
    }

    /// Load a TrueType / OpenType font from raw bytes.
    pub fn load_font(&mut self, data: &[u8]) -> Result<FontId, FontLoadError> {
        self.font_system.load_font(data)
    }

    /// Runs one UI frame against a root that persists across frames.
    ///
    /// Order: `update` (time-driven state), then input events, then layout and
    /// paint, so a click is visible in the same frame that delivered it.
    pub fn frame_ref(
        &mut self,
        root: &mut Element,
        viewport: Vec2,
        scale: f32,
        input: &UiInput,
    ) -> UiFrame {
        self.draw_list.clear();
        let rect = Rect::new(0.0, 0.0, viewport.x, viewport.y);

        root.update();

        let mut consumed = false;
        {
            let ctx = LayoutCtx { fonts: &self.font_system, scale };
            if input.mouse_clicked
                && let Some(pos) = input.mouse_pos
            {
                consumed |= root.on_event(&UiEvent::Click { pos }, rect, &ctx).is_consumed();
            }
            for &KeyStroke { key, modifiers, repeat } in &input.keys_pressed {
                let event = UiEvent::KeyPress { key, modifiers, repeat };
                consumed |= root.on_event(&event, rect, &ctx).is_consumed();
            }

            // The root always occupies the full viewport; measuring lets
            // containers settle their children's natural sizes.
            let _ = root.measure(Constraints::loose(viewport), &ctx);
        }

        let mut painter = Painter::new(
            &mut self.draw_list,
            &self.font_system,
            input.mouse_pos,
            input.mouse_pressed,
            scale,
        );
        root.paint(&mut painter, rect);

        UiFrame { consumed, cursor: painter.cursor() }
    }
}

impl Default for UiScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use stopwatch_engine::paint::Color;

    use super::*;
    use crate::event::EventResult;
    use crate::widget::Widget;
    use crate::widgets::button::Button;
    use crate::widgets::text::Text;

    /// Records the order in which the scene drives it.
    struct Recorder {
        log: Rc<Cell<u32>>,
        order: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Widget for Recorder {
        fn measure(&self, c: Constraints, _ctx: &LayoutCtx) -> Vec2 {
            c.constrain(Vec2::zero())
        }
        fn paint(&self, painter: &mut Painter, rect: Rect) {
            self.order.borrow_mut().push("paint");
            painter.fill_circle(rect.center(), 1.0, Color::BLACK, None);
        }
        fn on_event(&mut self, event: &UiEvent, _r: Rect, _c: &LayoutCtx<'_>) -> EventResult {
            self.order.borrow_mut().push("event");
            if let UiEvent::KeyPress { key: Key::Space, .. } = event {
                self.log.set(self.log.get() + 1);
                return EventResult::Consumed;
            }
            EventResult::Ignored
        }
        fn update(&mut self) {
            self.order.borrow_mut().push("update");
        }
    }

    #[test]
    fn update_then_events_then_paint() {
        let log = Rc::new(Cell::new(0));
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut root: Element = Recorder { log: log.clone(), order: order.clone() }.into();
        let mut scene = UiScene::new();

        let input = UiInput {
            keys_pressed: vec![KeyStroke::press(Key::Space)],
            ..Default::default()
        };
        let frame = scene.frame_ref(&mut root, Vec2::new(100.0, 100.0), 1.0, &input);

        assert!(frame.consumed);
        assert_eq!(log.get(), 1);
        assert_eq!(*order.borrow(), vec!["update", "event", "paint"]);
        assert_eq!(scene.draw_list.len(), 1);
    }

    #[test]
    fn draw_list_is_rebuilt_each_frame() {
        let mut root: Element = Recorder {
            log: Rc::new(Cell::new(0)),
            order: Rc::new(RefCell::new(Vec::new())),
        }
        .into();
        let mut scene = UiScene::new();
        let input = UiInput::default();

        let frame = scene.frame_ref(&mut root, Vec2::new(10.0, 10.0), 1.0, &input);
        let _ = scene.frame_ref(&mut root, Vec2::new(10.0, 10.0), 1.0, &input);

        assert!(!frame.consumed);
        assert_eq!(scene.draw_list.len(), 1);
    }

    fn space(repeat: bool) -> InputEvent {
        InputEvent::Key {
            key: Key::Space,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            repeat,
        }
    }

    #[test]
    fn held_key_keeps_each_repeat_flagged() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, space(false));
        state.apply_event(&mut frame, space(true));
        state.apply_event(&mut frame, space(true));

        let input = UiInput::from_engine(&state, &frame);
        let repeats: Vec<bool> = input.keys_pressed.iter().map(|k| k.repeat).collect();
        assert_eq!(repeats, vec![false, true, true]);
        assert!(input.keys_pressed.iter().all(|k| k.key == Key::Space));
    }

    #[test]
    fn released_keys_are_not_presses() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, space(false));
        state.apply_event(
            &mut frame,
            InputEvent::Key {
                key: Key::Space,
                state: KeyState::Released,
                modifiers: Modifiers::default(),
                repeat: false,
            },
        );

        let input = UiInput::from_engine(&state, &frame);
        assert_eq!(input.keys_pressed, vec![KeyStroke::press(Key::Space)]);
        assert!(!input.mouse_clicked);
        assert_eq!(input.mouse_pos, None);
    }

    #[test]
    fn click_without_pointer_position_is_dropped() {
        let mut root: Element = Button::new(Text::new("Start", None, 20.0, Color::WHITE)).into();
        let mut scene = UiScene::new();
        let viewport = Vec2::new(200.0, 50.0);

        let lost = UiInput { mouse_clicked: true, ..Default::default() };
        assert!(!scene.frame_ref(&mut root, viewport, 1.0, &lost).consumed);

        let inside = UiInput {
            mouse_pos: Some(Vec2::new(20.0, 20.0)),
            mouse_clicked: true,
            ..Default::default()
        };
        let frame = scene.frame_ref(&mut root, viewport, 1.0, &inside);
        assert!(frame.consumed);
        assert_eq!(frame.cursor, CursorIcon::Pointer);
    }
}
