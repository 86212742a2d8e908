//! Colors and type sizes of the screen.

use stopwatch_engine::paint::Color;

pub const INK: Color = Color::BLACK;
pub const BACKGROUND: Color = Color::WHITE;
pub const BUTTON_TEXT: Color = Color::WHITE;

pub const READOUT_SIZE: f32 = 64.0;
pub const BUTTON_TEXT_SIZE: f32 = 20.0;

/// Hand, center dot and button.
pub fn accent() -> Color {
    Color::from_hex(0xFF8000)
}

pub fn accent_hover() -> Color {
    Color::from_hex(0xFF9440)
}

pub fn accent_pressed() -> Color {
    Color::from_hex(0xD86800)
}
