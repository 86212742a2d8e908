//! Stopwatch UI: a small retained widget tree on top of `stopwatch-engine`.
//!
//! # Extending with custom widgets
//!
//! Implement [`Widget`](widget::Widget) for any type, then use it anywhere an
//! [`Element`](widget::Element) is accepted:
//!
//! ```rust,ignore
//! use stopwatch_ui::prelude::*;
//!
//! pub struct Dot { color: Color }
//!
//! impl Widget for Dot {
//!     fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
//!         constraints.constrain(Vec2::new(12.0, 12.0))
//!     }
//!     fn paint(&self, painter: &mut Painter, rect: Rect) {
//!         painter.fill_circle(rect.center(), rect.min_side() / 2.0, self.color, None);
//!     }
//! }
//! ```

pub mod app;
pub mod constraints;
pub mod event;
pub mod painter;
pub mod scene;
pub mod widget;
pub mod widgets;

pub use app::Application;

/// Everything needed to build and extend UI; import this in component files.
pub mod prelude {
    pub use crate::app::{Application, FontMap};
    pub use crate::constraints::{Constraints, Edges, LayoutCtx};
    pub use crate::event::{EventResult, UiEvent};
    pub use crate::painter::Painter;
    pub use crate::scene::{KeyStroke, UiFrame, UiInput, UiScene};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{
        anchors::{AnchorVal, Anchors, SizeHint},
        button::Button,
        text::Text,
    };

    pub use stopwatch_engine::coords::{Rect, Vec2};
    pub use stopwatch_engine::paint::Color;
    pub use stopwatch_engine::scene::shapes::{Border, LineCap};
    pub use stopwatch_engine::text::FontId;
}
