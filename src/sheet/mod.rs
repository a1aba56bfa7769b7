mod builder;
mod types;

pub use builder::{pack, render_sheet};
pub use types::{PlacedSprite, Sheet};
