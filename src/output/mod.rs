mod atlas;
mod format;

pub use atlas::{format_atlas, write_atlas};
pub use format::save_sheet_image;
