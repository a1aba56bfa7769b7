use image::RgbaImage;

use crate::packing::Rect;

/// A sprite with its assigned position on the sheet
#[derive(Debug, Clone)]
pub struct PlacedSprite {
    /// Atlas identifier
    pub name: String,
    /// Position on sheet (x coordinate)
    pub x: u32,
    /// Position on sheet (y coordinate)
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Source pixels, composited by the renderer
    pub image: RgbaImage,
}

impl PlacedSprite {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A packed spritesheet, ready to render and serialize
#[derive(Debug, Clone)]
pub struct Sheet {
    pub width: u32,
    pub height: u32,
    /// Sprites in discovery order
    pub sprites: Vec<PlacedSprite>,
}

impl Sheet {
    /// Fraction of the sheet area covered by sprites
    pub fn occupancy(&self) -> f64 {
        let total = u64::from(self.width) * u64::from(self.height);
        if total == 0 {
            return 0.0;
        }
        let used: u64 = self
            .sprites
            .iter()
            .map(|s| u64::from(s.width) * u64::from(s.height))
            .sum();
        used as f64 / total as f64
    }
}
