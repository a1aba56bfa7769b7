use image::{RgbaImage, imageops};
use log::{debug, info};

use super::{PlacedSprite, Sheet};
use crate::error::SheetError;
use crate::packing::{PackError, ShelfPacker};
use crate::sprite::SpriteRecord;

/// Pack sprites onto a single sheet no larger than `max_dimension` on either side.
///
/// Sprites keep their input order in the returned sheet. Fails without
/// producing a sheet if any sprite is too large or the rows run out of height.
pub fn pack(sprites: Vec<SpriteRecord>, max_dimension: u32) -> Result<Sheet, SheetError> {
    let sizes: Vec<(u32, u32)> = sprites.iter().map(SpriteRecord::dimensions).collect();

    let layout = ShelfPacker::new(max_dimension)
        .pack(&sizes)
        .map_err(|e| match e {
            PackError::TooLarge { index } => SheetError::SpriteTooLarge {
                name: sprites[index].name.clone(),
                width: sprites[index].width(),
                height: sprites[index].height(),
                max: max_dimension,
            },
            PackError::Exhausted { index, bottom } => SheetError::SheetExhausted {
                name: sprites[index].name.clone(),
                bottom,
                max: max_dimension,
            },
        })?;

    let mut positions = vec![(0u32, 0u32); sprites.len()];
    for placement in &layout.placements {
        debug!(
            "{} -> ({}, {})",
            sprites[placement.index].name, placement.rect.x, placement.rect.y
        );
        positions[placement.index] = (placement.rect.x, placement.rect.y);
    }

    let placed = sprites
        .into_iter()
        .zip(positions)
        .map(|(sprite, (x, y))| PlacedSprite {
            name: sprite.name,
            x,
            y,
            width: sprite.image.width(),
            height: sprite.image.height(),
            image: sprite.image,
        })
        .collect();

    let sheet = Sheet {
        width: layout.width,
        height: layout.height,
        sprites: placed,
    };

    info!(
        "Sheet: {}x{} with {} sprites ({:.1}% efficiency)",
        sheet.width,
        sheet.height,
        sheet.sprites.len(),
        sheet.occupancy() * 100.0
    );

    Ok(sheet)
}

/// Composite every sprite onto a transparent canvas.
/// Sprite pixels replace the canvas outright, alpha included.
pub fn render_sheet(sheet: &Sheet) -> RgbaImage {
    let mut canvas = RgbaImage::new(sheet.width, sheet.height);

    for sprite in &sheet.sprites {
        imageops::replace(
            &mut canvas,
            &sprite.image,
            i64::from(sprite.x),
            i64::from(sprite.y),
        );
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing::Rect;
    use image::Rgba;

    fn solid(name: &str, width: u32, height: u32, color: Rgba<u8>) -> SpriteRecord {
        let mut image = RgbaImage::new(width, height);
        for pixel in image.pixels_mut() {
            *pixel = color;
        }
        SpriteRecord {
            name: name.to_string(),
            image,
        }
    }

    fn blank(name: &str, width: u32, height: u32) -> SpriteRecord {
        solid(name, width, height, Rgba([0, 0, 0, 0]))
    }

    #[test]
    fn test_pack_keeps_discovery_order() {
        let sheet = pack(
            vec![blank("a", 10, 20), blank("b", 10, 10), blank("c", 10, 30)],
            100,
        )
        .unwrap();

        let names: Vec<&str> = sheet.sprites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        assert_eq!((sheet.width, sheet.height), (30, 30));
        assert_eq!(sheet.sprites[2].rect(), Rect::new(0, 0, 10, 30));
        assert_eq!(sheet.sprites[0].rect(), Rect::new(10, 0, 10, 20));
        assert_eq!(sheet.sprites[1].rect(), Rect::new(20, 0, 10, 10));
    }

    #[test]
    fn test_pack_sprite_too_large() {
        let result = pack(vec![blank("small", 4, 4), blank("huge", 12, 3)], 8);

        match result {
            Err(SheetError::SpriteTooLarge {
                name,
                width,
                height,
                max,
            }) => {
                assert_eq!(name, "huge");
                assert_eq!((width, height, max), (12, 3, 8));
            }
            other => panic!("expected SpriteTooLarge, got {:?}", other.map(|s| s.width)),
        }
    }

    #[test]
    fn test_pack_sheet_exhausted() {
        let result = pack(vec![blank("first", 6, 6), blank("second", 6, 6)], 10);

        match result {
            Err(SheetError::SheetExhausted { name, bottom, max }) => {
                assert_eq!(name, "second");
                assert_eq!((bottom, max), (12, 10));
            }
            other => panic!("expected SheetExhausted, got {:?}", other.map(|s| s.width)),
        }
    }

    #[test]
    fn test_pack_invariants() {
        let sprites: Vec<SpriteRecord> = (0..25u32)
            .map(|i| blank(&format!("s{:02}", i), 3 + (i * 7) % 11, 2 + (i * 5) % 9))
            .collect();

        let sheet = pack(sprites, 64).unwrap();
        let bounds = Rect::new(0, 0, sheet.width, sheet.height);

        assert!(sheet.width <= 64 && sheet.height <= 64);
        for (i, a) in sheet.sprites.iter().enumerate() {
            assert!(bounds.contains(&a.rect()));
            for b in &sheet.sprites[i + 1..] {
                assert!(!a.rect().intersects(&b.rect()), "{} overlaps {}", a.name, b.name);
            }
        }
    }

    #[test]
    fn test_render_copies_pixels_at_offsets() {
        let red = Rgba([255, 0, 0, 255]);
        let green = Rgba([0, 255, 0, 255]);

        let sheet = pack(
            vec![solid("red", 2, 3, red), solid("green", 2, 2, green)],
            16,
        )
        .unwrap();
        let image = render_sheet(&sheet);

        assert_eq!(image.dimensions(), (4, 3));
        assert_eq!(*image.get_pixel(0, 0), red);
        assert_eq!(*image.get_pixel(1, 2), red);
        assert_eq!(*image.get_pixel(2, 0), green);
        assert_eq!(*image.get_pixel(3, 1), green);
        // Below the shorter sprite stays transparent
        assert_eq!(*image.get_pixel(2, 2), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_render_does_not_blend() {
        let translucent = Rgba([200, 100, 50, 64]);
        let sheet = pack(vec![solid("ghost", 2, 2, translucent)], 8).unwrap();

        let image = render_sheet(&sheet);
        assert_eq!(*image.get_pixel(1, 1), translucent);
    }

    #[test]
    fn test_empty_sheet() {
        let sheet = pack(Vec::new(), 32).unwrap();
        assert_eq!((sheet.width, sheet.height), (0, 0));
        assert!(sheet.sprites.is_empty());
        assert_eq!(sheet.occupancy(), 0.0);
    }
}
