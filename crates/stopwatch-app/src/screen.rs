use std::time::Instant;

use stopwatch_core::{Clock, Stopwatch, SystemClock, Transition};
use stopwatch_engine::input::Key;
use stopwatch_ui::prelude::*;

use crate::face::Dial;
use crate::theme;

const READOUT_BOTTOM: f32 = 100.0;
const BUTTON_BOTTOM: f32 = 30.0;
const BUTTON_WIDTH: f32 = 200.0;
const BUTTON_HEIGHT: f32 = 50.0;
const BUTTON_RADIUS: f32 = 25.0;
const BUTTON_PADDING: Edges = Edges { top: 8.0, bottom: 8.0, left: 24.0, right: 24.0 };

/// The whole stopwatch screen: dial, digital readout and the Start/Stop button.
///
/// Owns the [`Stopwatch`] controller. Ticks are serviced in `update`, and
/// `wake_at` hands the next tick deadline to the runtime so the event loop
/// sleeps between ticks and idles completely while stopped.
pub struct StopwatchScreen<C: Clock = SystemClock> {
    stopwatch: Stopwatch<C>,
    dial: Dial,
    readout: Text,
    button: Button,
}

impl StopwatchScreen<SystemClock> {
    pub fn system(font: Option<FontId>) -> Self {
        Self::new(Stopwatch::system(), font)
    }
}

impl<C: Clock> StopwatchScreen<C> {
    pub fn new(stopwatch: Stopwatch<C>, font: Option<FontId>) -> Self {
        let display = stopwatch.display();
        let label = Text::new(stopwatch.button_label(), font, theme::BUTTON_TEXT_SIZE, theme::BUTTON_TEXT);
        Self {
            dial: Dial::new(display.hand_angle),
            readout: Text::new(display.text.as_str(), font, theme::READOUT_SIZE, theme::INK),
            button: Button::new(label)
                .background(theme::accent())
                .hover_background(theme::accent_hover())
                .press_background(theme::accent_pressed())
                .corner_radius(BUTTON_RADIUS)
                .padding(BUTTON_PADDING)
                .min_size(BUTTON_WIDTH, BUTTON_HEIGHT),
            stopwatch,
        }
    }

    pub fn stopwatch(&self) -> &Stopwatch<C> {
        &self.stopwatch
    }

    fn toggle(&mut self) -> Transition {
        let transition = self.stopwatch.toggle();
        self.sync();
        transition
    }

    /// Pushes the controller's display into the child widgets.
    fn sync(&mut self) {
        let display = self.stopwatch.display();
        self.dial.set_angle(display.hand_angle);
        self.readout.set_text(&display.text);
        self.button.label_mut().set_text(self.stopwatch.button_label());
    }

    fn readout_rect(&self, rect: Rect, ctx: &LayoutCtx) -> Rect {
        let natural = self.readout.measure(Constraints::loose(rect.size), ctx);
        Anchors::new()
            .center_x()
            .bottom(AnchorVal::Px(READOUT_BOTTOM))
            .resolve(rect, natural)
    }

    fn button_rect(&self, rect: Rect) -> Rect {
        Anchors::new()
            .center_x()
            .bottom(AnchorVal::Px(BUTTON_BOTTOM))
            .width(SizeHint::Px(BUTTON_WIDTH))
            .height(SizeHint::Px(BUTTON_HEIGHT))
            .resolve(rect, Vec2::zero())
    }
}

impl<C: Clock + 'static> Widget for StopwatchScreen<C> {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.constrain(constraints.max)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        self.dial.paint(painter, rect);

        let readout = self.readout_rect(rect, &painter.layout_ctx());
        self.readout.paint(painter, readout);
        self.button.paint(painter, self.button_rect(rect));
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        let hit = match event {
            UiEvent::Click { .. } => {
                let button = self.button_rect(rect);
                self.button.on_event(event, button, ctx).is_consumed()
            }
            UiEvent::KeyPress { key: Key::Space | Key::Enter, modifiers, repeat: false } => {
                !modifiers.any()
            }
            UiEvent::KeyPress { .. } => false,
        };
        if !hit {
            return EventResult::Ignored;
        }

        let transition = self.toggle();
        log::debug!("toggle via {event:?}: {transition:?}");
        EventResult::Consumed
    }

    fn update(&mut self) {
        if self.stopwatch.poll() {
            self.sync();
        }
    }

    fn wake_at(&self) -> Option<Instant> {
        self.stopwatch.next_deadline()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use stopwatch_core::ManualClock;
    use stopwatch_engine::input::{InputEvent, InputFrame, InputState, KeyState, Modifiers};
    use stopwatch_engine::scene::{DrawCmd, DrawList};
    use stopwatch_engine::text::FontSystem;

    use super::*;

    const PHONE: Rect = Rect::new(0.0, 0.0, 375.0, 667.0);

    fn screen() -> (ManualClock, StopwatchScreen<ManualClock>) {
        let clock = ManualClock::new();
        let screen = StopwatchScreen::new(Stopwatch::new(clock.clone()), None);
        (clock, screen)
    }

    fn send(screen: &mut StopwatchScreen<ManualClock>, event: UiEvent) -> EventResult {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts, scale: 1.0 };
        screen.on_event(&event, PHONE, &ctx)
    }

    fn click(x: f32, y: f32) -> UiEvent {
        UiEvent::Click { pos: Vec2::new(x, y) }
    }

    fn key(key: Key, modifiers: Modifiers) -> UiEvent {
        UiEvent::KeyPress { key, modifiers, repeat: false }
    }

    #[test]
    fn starts_idle_with_zero_readout() {
        let (_, screen) = screen();
        assert_eq!(screen.readout.text, "00:00.00");
        assert_eq!(screen.button.label().text, "Start");
        assert_eq!(screen.wake_at(), None);
    }

    #[test]
    fn button_sits_centered_above_the_bottom_edge() {
        let (_, screen) = screen();
        assert_eq!(screen.button_rect(PHONE), Rect::new(87.5, 587.0, 200.0, 50.0));
    }

    #[test]
    fn readout_bottom_is_100px_above_window_bottom() {
        let (_, screen) = screen();
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts, scale: 1.0 };
        let r = screen.readout_rect(PHONE, &ctx);
        assert!((r.max().y - (667.0 - 100.0)).abs() < 1e-3);
        assert!((r.center().x - 187.5).abs() < 1e-3);
    }

    #[test]
    fn clicking_the_button_toggles() {
        let (clock, mut screen) = screen();
        assert_eq!(send(&mut screen, click(187.5, 610.0)), EventResult::Consumed);
        assert!(screen.stopwatch().is_running());
        assert_eq!(screen.button.label().text, "Stop");

        let period = screen.stopwatch().tick_period();
        assert_eq!(screen.wake_at(), Some(clock.now() + period));

        assert_eq!(send(&mut screen, click(187.5, 610.0)), EventResult::Consumed);
        assert!(!screen.stopwatch().is_running());
        assert_eq!(screen.button.label().text, "Start");
        assert_eq!(screen.wake_at(), None);
    }

    #[test]
    fn clicks_off_the_button_are_ignored() {
        let (_, mut screen) = screen();
        assert_eq!(send(&mut screen, click(10.0, 10.0)), EventResult::Ignored);
        assert_eq!(send(&mut screen, click(187.5, 650.0)), EventResult::Ignored);
        assert!(!screen.stopwatch().is_running());
    }

    #[test]
    fn space_and_enter_toggle_without_modifiers() {
        let (_, mut screen) = screen();
        assert!(send(&mut screen, key(Key::Space, Modifiers::default())).is_consumed());
        assert!(screen.stopwatch().is_running());
        assert!(send(&mut screen, key(Key::Enter, Modifiers::default())).is_consumed());
        assert!(!screen.stopwatch().is_running());

        let ctrl = Modifiers { ctrl: true, ..Modifiers::default() };
        assert_eq!(send(&mut screen, key(Key::Space, ctrl)), EventResult::Ignored);
        assert_eq!(send(&mut screen, key(Key::Escape, Modifiers::default())), EventResult::Ignored);
        assert!(!screen.stopwatch().is_running());
    }

    #[test]
    fn holding_space_toggles_once() {
        let (_, mut screen) = screen();
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        for repeat in [false, true, true] {
            let ev = InputEvent::Key {
                key: Key::Space,
                state: KeyState::Pressed,
                modifiers: Modifiers::default(),
                repeat,
            };
            state.apply_event(&mut frame, ev);
        }

        let input = UiInput::from_engine(&state, &frame);
        let mut running = Vec::new();
        for KeyStroke { key, modifiers, repeat } in input.keys_pressed {
            send(&mut screen, UiEvent::KeyPress { key, modifiers, repeat });
            running.push(screen.stopwatch().is_running());
        }
        assert_eq!(running, vec![true, true, true]);
    }

    #[test]
    fn auto_repeat_is_ignored() {
        let (_, mut screen) = screen();
        let held =
            UiEvent::KeyPress { key: Key::Enter, modifiers: Modifiers::default(), repeat: true };
        assert_eq!(send(&mut screen, held), EventResult::Ignored);
        assert!(!screen.stopwatch().is_running());
    }

    #[test]
    fn update_services_ticks_into_the_widgets() {
        let (clock, mut screen) = screen();
        send(&mut screen, key(Key::Space, Modifiers::default()));

        clock.advance(Duration::from_millis(1_500));
        screen.update();
        assert_eq!(screen.readout.text, "00:01.50");

        // 1.5 s is 9° past 12 o'clock.
        let expected = std::f32::consts::TAU * 1.5 / 60.0 - std::f32::consts::FRAC_PI_2;
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        {
            let mut p = Painter::new(&mut list, &fonts, None, false, 1.0);
            screen.paint(&mut p, PHONE);
        }
        let hand = list
            .items()
            .iter()
            .find_map(|item| match &item.cmd {
                DrawCmd::Line(l) if l.cap == LineCap::Round => Some(l.clone()),
                _ => None,
            })
            .unwrap();
        let dir = hand.to - hand.from;
        assert!((dir.y.atan2(dir.x) - expected).abs() < 1e-4);
    }

    #[test]
    fn stopped_screen_stays_frozen() {
        let (clock, mut screen) = screen();
        send(&mut screen, key(Key::Space, Modifiers::default()));
        clock.advance(Duration::from_millis(2_340));
        screen.update();
        send(&mut screen, key(Key::Space, Modifiers::default()));

        clock.advance(Duration::from_secs(10));
        screen.update();
        assert_eq!(screen.readout.text, "00:02.34");
        assert_eq!(screen.wake_at(), None);
    }
}
