pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod packing;
pub mod sheet;
pub mod sprite;

pub use cli::CliArgs;
pub use error::SheetError;
pub use packing::{ShelfLayout, ShelfPacker};
pub use sheet::{PlacedSprite, Sheet, pack, render_sheet};
pub use sprite::SpriteRecord;
