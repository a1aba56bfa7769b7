use std::fs;
use std::path::Path;

use crate::error::SheetError;
use crate::sheet::{PlacedSprite, Sheet};

const PIXEL_FORMAT: &str = "RGBA8888";
const FILTER: &str = "MipMapLinearLinear, MipMapLinearLinear";
const REPEAT: &str = "none";

/// Render the atlas text for `sheet`.
///
/// `sheet_file` is the sheet image path; only its file name is written.
pub fn format_atlas(sheet: &Sheet, sheet_file: &Path) -> String {
    let header = sheet_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut out = format!(
        "{}\nsize: {}, {}\nformat: {}\nfilter: {}\nrepeat: {}\n",
        header, sheet.width, sheet.height, PIXEL_FORMAT, FILTER, REPEAT
    );

    for sprite in &sheet.sprites {
        out.push_str(&format_region(sprite));
    }

    out
}

fn format_region(sprite: &PlacedSprite) -> String {
    format!(
        "{name}\n  rotate: false\n  xy: {x}, {y}\n  size: {w}, {h}\n  orig: {w}, {h}\n  offset: 0, 0\n  index: -1\n",
        name = sprite.name,
        x = sprite.x,
        y = sprite.y,
        w = sprite.width,
        h = sprite.height,
    )
}

/// Write atlas text produced by [`format_atlas`]
pub fn write_atlas(contents: &str, path: &Path) -> Result<(), SheetError> {
    fs::write(path, contents).map_err(|e| SheetError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn placed(name: &str, x: u32, y: u32, width: u32, height: u32) -> PlacedSprite {
        PlacedSprite {
            name: name.to_string(),
            x,
            y,
            width,
            height,
            image: RgbaImage::new(width, height),
        }
    }

    #[test]
    fn test_format_atlas() {
        let sheet = Sheet {
            width: 48,
            height: 32,
            sprites: vec![
                placed("ui/button", 32, 0, 16, 16),
                placed("hero", 0, 0, 32, 32),
            ],
        };

        let text = format_atlas(&sheet, Path::new("out/sheets/game.png"));

        let expected = "\
game.png
size: 48, 32
format: RGBA8888
filter: MipMapLinearLinear, MipMapLinearLinear
repeat: none
ui/button
  rotate: false
  xy: 32, 0
  size: 16, 16
  orig: 16, 16
  offset: 0, 0
  index: -1
hero
  rotate: false
  xy: 0, 0
  size: 32, 32
  orig: 32, 32
  offset: 0, 0
  index: -1
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_format_atlas_empty_sheet() {
        let sheet = Sheet {
            width: 0,
            height: 0,
            sprites: Vec::new(),
        };

        let text = format_atlas(&sheet, Path::new("sheet.png"));
        assert_eq!(text.lines().count(), 5);
        assert!(text.starts_with("sheet.png\nsize: 0, 0\n"));
    }
}
