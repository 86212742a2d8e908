pub mod anchors;
pub mod button;
pub mod text;
