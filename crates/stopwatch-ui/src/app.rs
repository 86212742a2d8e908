use std::collections::HashMap;
use std::time::Instant;

use winit::dpi::LogicalSize;

use stopwatch_engine::coords::Vec2;
use stopwatch_engine::core::{App as EngineApp, AppControl, FrameCtx};
use stopwatch_engine::device::GpuInit;
use stopwatch_engine::paint::Color;
use stopwatch_engine::render::SceneRenderer;
use stopwatch_engine::text::FontId;
use stopwatch_engine::window::{CursorIcon, Runtime, RuntimeConfig};

use crate::scene::{UiInput, UiScene};
use crate::widget::Element;

// ── FontMap ───────────────────────────────────────────────────────────────

/// Fonts registered with [`Application::font`] that loaded successfully.
///
/// Passed to the builder closure in [`Application::run_widget`]:
///
/// ```rust,ignore
/// .run_widget(|fonts: &FontMap| StopwatchScreen::new(fonts.get("body")).into())
/// ```
#[derive(Debug, Default)]
pub struct FontMap(HashMap<String, FontId>);

impl FontMap {
    /// Returns the [`FontId`] registered under `name`, or `None` if the name
    /// was not registered or the font failed to load.
    pub fn get(&self, name: &str) -> Option<FontId> {
        self.0.get(name).copied()
    }
}

// ── Application ───────────────────────────────────────────────────────────

/// Top-level UI application builder.
///
/// Configure the window and fonts, then start the event loop with
/// [`run_widget`](Self::run_widget).
///
/// ```rust,ignore
/// Application::new()
///     .title("Stopwatch")
///     .size(375.0, 667.0)
///     .clear_color(Color::WHITE)
///     .font("body", bytes)
///     .run_widget(|fonts| StopwatchScreen::new(fonts.get("body")).into())?;
/// ```
pub struct Application {
    title: String,
    width: f64,
    height: f64,
    min_size: Option<(f64, f64)>,
    clear_color: Color,
    fonts: Vec<(String, Vec<u8>)>,
}

impl Application {
    pub fn new() -> Self {
        let defaults = RuntimeConfig::default();
        Self {
            title: defaults.title,
            width: defaults.initial_size.width,
            height: defaults.initial_size.height,
            min_size: defaults.min_size.map(|s| (s.width, s.height)),
            clear_color: Color::WHITE,
            fonts: Vec::new(),
        }
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Smallest window size the user can resize to, in logical pixels.
    pub fn min_size(mut self, width: f64, height: f64) -> Self {
        self.min_size = Some((width, height));
        self
    }

    /// Background the surface is cleared to before the tree paints.
    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Register a named font, looked up later through [`FontMap::get`].
    pub fn font(mut self, name: impl Into<String>, data: Vec<u8>) -> Self {
        self.fonts.push((name.into(), data));
        self
    }

    /// Builds the widget tree and runs the event loop until the window closes.
    ///
    /// Window, event loop and GPU setup errors are returned.
    pub fn run_widget<F>(self, build: F) -> anyhow::Result<()>
    where
        F: FnOnce(&FontMap) -> Element,
    {
        let config = self.runtime_config();

        let mut scene = UiScene::new();
        let mut fonts = FontMap::default();
        for (name, data) in &self.fonts {
            match scene.load_font(data) {
                Ok(id) => {
                    log::debug!("loaded font '{name}'");
                    fonts.0.insert(name.clone(), id);
                }
                Err(err) => log::warn!("font '{name}' skipped: {err}"),
            }
        }

        let root = build(&fonts);
        let state = UiAppState {
            scene,
            renderer: SceneRenderer::new(),
            root,
            clear_color: self.clear_color,
            cursor: CursorIcon::Default,
        };

        Runtime::run(config, GpuInit::default(), state)
    }

    fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
            min_size: self.min_size.map(|(w, h)| LogicalSize::new(w, h)),
        }
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── UiAppState ────────────────────────────────────────────────────────────

/// Implements the engine's `App` for a widget tree. User code never sees it.
struct UiAppState {
    scene: UiScene,
    renderer: SceneRenderer,
    root: Element,
    clear_color: Color,
    cursor: CursorIcon,
}

impl EngineApp for UiAppState {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (w, h) = ctx.window.logical_size();
        let scale = ctx.window.scale_factor();

        let input = UiInput::from_engine(ctx.input, ctx.input_frame);

        let frame = self.scene.frame_ref(&mut self.root, Vec2::new(w, h), scale, &input);
        log::trace!(
            "frame {} dt={:.4}s consumed={}",
            ctx.time.frame_index,
            ctx.time.dt,
            frame.consumed
        );

        if frame.cursor != self.cursor {
            ctx.window.set_cursor(frame.cursor);
            self.cursor = frame.cursor;
        }

        let draw_list = &mut self.scene.draw_list;
        let fonts = &self.scene.font_system;
        let renderer = &mut self.renderer;
        ctx.render(self.clear_color, |rctx, target| {
            renderer.render(rctx, target, draw_list, fonts);
        })
    }

    fn wake_at(&self) -> Option<Instant> {
        self.root.wake_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_runtime_defaults() {
        let config = Application::new().runtime_config();
        let defaults = RuntimeConfig::default();
        assert_eq!(config.title, defaults.title);
        assert_eq!(config.initial_size, defaults.initial_size);
        assert_eq!(config.min_size, defaults.min_size);
    }

    #[test]
    fn builder_options_reach_the_runtime_config() {
        let config = Application::new()
            .title("Lap")
            .size(400.0, 700.0)
            .min_size(200.0, 300.0)
            .runtime_config();
        assert_eq!(config.title, "Lap");
        assert_eq!(config.initial_size, LogicalSize::new(400.0, 700.0));
        assert_eq!(config.min_size, Some(LogicalSize::new(200.0, 300.0)));
    }

    #[test]
    fn font_map_misses_unknown_names() {
        assert_eq!(FontMap::default().get("body"), None);
    }
}
