//! Analog dial: minute marks, hand and center dot.

use std::f32::consts::TAU;

use stopwatch_ui::prelude::*;

use crate::theme;

pub const TICK_COUNT: usize = 60;
/// Every n-th mark is long.
const MAJOR_EVERY: usize = 5;
const TICK_LEN: f32 = 8.0;
const MAJOR_TICK_LEN: f32 = 16.0;
const TICK_WIDTH: f32 = 2.0;
const HAND_WIDTH: f32 = 3.0;

/// Dial measurements derived from the area the dial is painted into.
///
/// Everything scales with `side = min(width, height)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceGeometry {
    pub center: Vec2,
    /// Radius the mark centers sit on.
    pub mark_radius: f32,
    pub hand_length: f32,
    pub dot_radius: f32,
}

impl FaceGeometry {
    pub fn new(bounds: Rect) -> Self {
        let side = bounds.min_side();
        Self {
            center: bounds.center(),
            mark_radius: (side * 0.8 / 2.0 - TICK_LEN).max(0.0),
            hand_length: side / 2.0 * 0.65,
            // Diameter 2·(side/30) − 6.
            dot_radius: (side / 30.0 - 3.0).max(0.0),
        }
    }

    /// End point of the hand at `angle` (radians, clockwise from 3 o'clock).
    pub fn hand_tip(&self, angle: f32) -> Vec2 {
        self.center + Vec2::from_polar(self.hand_length, angle)
    }

    /// The 60 minute marks, starting at 3 o'clock and going clockwise.
    pub fn tick_marks(&self) -> impl Iterator<Item = TickMark> + '_ {
        (0..TICK_COUNT).map(move |i| {
            let angle = i as f32 / TICK_COUNT as f32 * TAU;
            let major = i % MAJOR_EVERY == 0;
            let half = if major { MAJOR_TICK_LEN } else { TICK_LEN } / 2.0;
            TickMark {
                from: self.center + Vec2::from_polar(self.mark_radius - half, angle),
                to: self.center + Vec2::from_polar(self.mark_radius + half, angle),
                major,
            }
        })
    }
}

/// One radial minute mark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMark {
    pub from: Vec2,
    pub to: Vec2,
    pub major: bool,
}

/// The analog part of the screen. Fills its rect; the hand angle is pushed
/// in by the owner every frame.
pub struct Dial {
    angle: f32,
}

impl Dial {
    pub fn new(angle: f32) -> Self {
        Self { angle }
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }
}

impl Widget for Dial {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.constrain(constraints.max)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let face = FaceGeometry::new(rect);

        for mark in face.tick_marks() {
            painter.stroke_line(mark.from, mark.to, TICK_WIDTH, theme::INK, LineCap::Butt);
        }
        painter.stroke_line(
            face.center,
            face.hand_tip(self.angle),
            HAND_WIDTH,
            theme::accent(),
            LineCap::Round,
        );
        // On top of the hand's pivot.
        if face.dot_radius > 0.0 {
            painter.fill_circle(face.center, face.dot_radius, theme::accent(), None);
        }
    }
}
