use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};
use log::warn;

use crate::cli::CompressionLevel;
use crate::error::SheetError;

/// Save the rendered sheet in the format named by `path`'s extension.
///
/// Alpha is dropped when `opaque` is set or the format has no alpha channel
/// (JPEG). `compress` only applies to PNG output.
pub fn save_sheet_image(
    image: &RgbaImage,
    path: &Path,
    opaque: bool,
    compress: Option<CompressionLevel>,
) -> Result<(), SheetError> {
    let format =
        ImageFormat::from_path(path).map_err(|_e| SheetError::UnsupportedOutput(path.to_path_buf()))?;

    let dynamic = DynamicImage::ImageRgba8(image.clone());
    let dynamic = if opaque || !supports_alpha(format) {
        DynamicImage::ImageRgb8(dynamic.into_rgb8())
    } else {
        dynamic
    };

    // Encode in memory first
    let mut encoded = Cursor::new(Vec::new());
    dynamic
        .write_to(&mut encoded, format)
        .map_err(|e| SheetError::ImageSave {
            path: path.to_path_buf(),
            source: e,
        })?;

    let output_data = match compress {
        Some(level) if format == ImageFormat::Png => {
            let opts = match level {
                CompressionLevel::Level(n) => oxipng::Options::from_preset(n),
                CompressionLevel::Max => oxipng::Options::max_compression(),
            };
            oxipng::optimize_from_memory(&encoded.into_inner(), &opts).map_err(|e| {
                SheetError::PngCompress {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            })?
        }
        Some(_) => {
            warn!(
                "Compression only applies to PNG output, writing {} uncompressed",
                path.display()
            );
            encoded.into_inner()
        }
        None => encoded.into_inner(),
    };

    fs::write(path, output_data).map_err(|e| SheetError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn supports_alpha(format: ImageFormat) -> bool {
    !matches!(format, ImageFormat::Jpeg)
}
