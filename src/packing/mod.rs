mod rect;
mod shelf;

pub use rect::Rect;
pub use shelf::{PackError, Placement, ShelfLayout, ShelfPacker};
