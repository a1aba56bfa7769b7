use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("{0}")]
    Argument(String),

    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Sprite '{name}' ({width}x{height}) exceeds maximum sheet dimension ({max})")]
    SpriteTooLarge {
        name: String,
        width: u32,
        height: u32,
        max: u32,
    },

    #[error(
        "Sheet exhausted: sprite '{name}' would end at y={bottom}, past maximum sheet dimension ({max})"
    )]
    SheetExhausted { name: String, bottom: u64, max: u32 },

    #[error("Failed to read directory '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: PathBuf, message: String },

    #[error("Cannot determine image format from output path: {0}")]
    UnsupportedOutput(PathBuf),

    #[error("Input directory does not exist: {0}")]
    InputNotFound(PathBuf),
}
