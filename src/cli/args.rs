use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "sheetpack")]
#[command(version, about = "Pack a directory of sprites into a spritesheet and atlas", long_about = None)]
pub struct CliArgs {
    /// Directory to scan (recursively) for png, jpg, jpeg, bmp and gif files
    pub image_dir: PathBuf,

    /// Output spritesheet image; the extension selects the image format
    pub sheet: PathBuf,

    /// Output atlas text file
    pub atlas: PathBuf,

    /// Prefix added to every sprite name (e.g. "ui" turns "button" into "ui/button")
    pub prepend_path: Option<String>,

    /// Load settings from a JSON config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum sheet width and height in pixels [default: 4096]
    #[arg(short = 'm', long, value_name = "PIXELS")]
    pub max_dimension: Option<u32>,

    /// Skip images whose path relative to the image directory matches this glob (repeatable)
    #[arg(short = 'e', long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Output RGB instead of RGBA (opaque sheet)
    #[arg(long)]
    pub opaque: bool,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Level(2)
    }
}
