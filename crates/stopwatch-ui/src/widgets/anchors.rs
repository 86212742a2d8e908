use stopwatch_engine::coords::{Rect, Vec2};

// ── AnchorVal ─────────────────────────────────────────────────────────────

/// A distance from a parent edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorVal {
    /// Fixed pixel distance from this edge.
    Px(f32),
    /// Fraction of the parent's dimension on this axis (0.0 = 0 %, 1.0 = 100 %).
    Pct(f32),
}

impl AnchorVal {
    #[inline]
    pub fn resolve(self, parent_dim: f32) -> f32 {
        match self {
            AnchorVal::Px(v) => v,
            AnchorVal::Pct(p) => parent_dim * p,
        }
    }
}

// ── SizeHint ──────────────────────────────────────────────────────────────

/// How a child's width or height is determined.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SizeHint {
    /// Use the child's measured natural size (default).
    #[default]
    Natural,
    /// Fixed pixel size.
    Px(f32),
    /// Fraction of the parent's dimension.
    Pct(f32),
    /// Equal to the parent's dimension.
    Fill,
}

impl SizeHint {
    #[inline]
    pub fn resolve(self, parent_dim: f32, natural: f32) -> f32 {
        match self {
            SizeHint::Natural => natural,
            SizeHint::Px(v) => v,
            SizeHint::Pct(p) => parent_dim * p,
            SizeHint::Fill => parent_dim,
        }
    }
}

// ── Anchors ───────────────────────────────────────────────────────────────

/// Anchor rules placing one child inside a parent rect.
///
/// | left  | right | center_x | outcome                                   |
/// |-------|-------|----------|-------------------------------------------|
/// | Some  | Some  | any      | width = parent_w - left - right           |
/// | Some  | None  | false    | pinned to left edge                       |
/// | None  | Some  | false    | pinned to right edge                      |
/// | None  | None  | false    | x = parent origin                         |
/// | any single anchor | true | centered horizontally                     |
///
/// The same table applies vertically with top / bottom / center_y. Widths
/// and heights not fixed by two anchors come from the [`SizeHint`].
///
/// Widgets that own typed children call [`resolve`](Self::resolve) from both
/// `paint` and `on_event` so hit-testing matches what was drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Anchors {
    pub left: Option<AnchorVal>,
    pub top: Option<AnchorVal>,
    pub right: Option<AnchorVal>,
    pub bottom: Option<AnchorVal>,
    pub center_x: bool,
    pub center_y: bool,
    pub width: SizeHint,
    pub height: SizeHint,
}

impl Anchors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn left(mut self, v: AnchorVal) -> Self { self.left = Some(v); self }
    pub fn top(mut self, v: AnchorVal) -> Self { self.top = Some(v); self }
    pub fn right(mut self, v: AnchorVal) -> Self { self.right = Some(v); self }
    pub fn bottom(mut self, v: AnchorVal) -> Self { self.bottom = Some(v); self }
    pub fn width(mut self, v: SizeHint) -> Self { self.width = v; self }
    pub fn height(mut self, v: SizeHint) -> Self { self.height = v; self }
    pub fn center_x(mut self) -> Self { self.center_x = true; self }
    pub fn center_y(mut self) -> Self { self.center_y = true; self }

    /// Pins every edge to the parent.
    pub fn fill(self) -> Self {
        self.left(AnchorVal::Px(0.0))
            .top(AnchorVal::Px(0.0))
            .right(AnchorVal::Px(0.0))
            .bottom(AnchorVal::Px(0.0))
    }

    /// Resolves the child rect inside `parent` for a child whose natural size
    /// is `natural`.
    pub fn resolve(&self, parent: Rect, natural: Vec2) -> Rect {
        let (x, w) = resolve_axis(
            parent.origin.x,
            parent.size.x,
            natural.x,
            self.left,
            self.right,
            self.center_x,
            self.width,
        );
        let (y, h) = resolve_axis(
            parent.origin.y,
            parent.size.y,
            natural.y,
            self.top,
            self.bottom,
            self.center_y,
            self.height,
        );
        Rect::new(x, y, w, h)
    }
}

/// Position and extent along one axis.
fn resolve_axis(
    origin: f32,
    parent_dim: f32,
    natural: f32,
    start: Option<AnchorVal>,
    end: Option<AnchorVal>,
    center: bool,
    hint: SizeHint,
) -> (f32, f32) {
    if let (Some(s), Some(e)) = (start, end) {
        let s = s.resolve(parent_dim);
        let len = (parent_dim - s - e.resolve(parent_dim)).max(0.0);
        return (origin + s, len);
    }

    let len = hint.resolve(parent_dim, natural);
    let pos = match (start, end) {
        _ if center => origin + (parent_dim - len) * 0.5,
        (Some(s), _) => origin + s.resolve(parent_dim),
        (None, Some(e)) => origin + parent_dim - e.resolve(parent_dim) - len,
        (None, None) => origin,
    };
    (pos, len)
}
