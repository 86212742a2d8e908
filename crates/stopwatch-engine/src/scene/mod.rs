//! Scene (draw stream) types.
//!
//! Widgets record renderer-agnostic commands into a [`DrawList`]; each
//! renderer picks its own variant out of the list in paint order.

mod cmd;
mod key;
mod list;
mod z_index;

pub mod shapes;

pub use cmd::DrawCmd;
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use z_index::ZIndex;
