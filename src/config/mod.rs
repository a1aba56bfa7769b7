mod load;
mod types;

pub use load::{compile_excludes, load_config};
pub use types::{CompressConfig, DEFAULT_MAX_DIMENSION, SheetConfig};
