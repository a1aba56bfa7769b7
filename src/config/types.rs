use serde::Deserialize;

use crate::cli::CompressionLevel;

/// Default maximum sheet width and height
pub const DEFAULT_MAX_DIMENSION: u32 = 4096;

/// PNG compression level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

impl CompressConfig {
    /// Validate into a compression level
    pub fn level(&self) -> Result<CompressionLevel, String> {
        match self {
            CompressConfig::Level(n) => n.to_string().parse(),
            CompressConfig::Max(s) => s.parse(),
        }
    }
}

/// Sheetpack configuration file structure.
///
/// Every field is optional in the file; missing fields take the defaults
/// below. Command-line options override file values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Maximum sheet width and height in pixels
    pub max_dimension: u32,
    /// Prefix added to every sprite name
    pub prepend_path: Option<String>,
    /// Glob patterns (relative to the image directory) to skip
    pub exclude: Vec<String>,
    /// Output RGB instead of RGBA (opaque sheet)
    pub opaque: bool,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            version: 1,
            max_dimension: DEFAULT_MAX_DIMENSION,
            prepend_path: None,
            exclude: Vec::new(),
            opaque: false,
            compress: None,
        }
    }
}
