//! Analog + digital stopwatch.

mod face;
mod fonts;
mod screen;
mod theme;

use stopwatch_engine::logging::{LoggingConfig, init_logging};
use stopwatch_ui::Application;

use crate::screen::StopwatchScreen;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let mut app = Application::new()
        .title("Stopwatch")
        .size(375.0, 667.0)
        .clear_color(theme::BACKGROUND);

    match fonts::load_first(fonts::SYSTEM_FONT_PATHS) {
        Some(bytes) => app = app.font("body", bytes),
        None => log::warn!("no system font found; text will not be drawn"),
    }

    app.run_widget(|loaded| StopwatchScreen::system(loaded.get("body")).into())
}
