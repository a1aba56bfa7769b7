use image::RgbaImage;

/// A decoded source image waiting to be packed
#[derive(Debug, Clone)]
pub struct SpriteRecord {
    /// Atlas identifier: relative path without extension, forward slashes
    pub name: String,
    /// Decoded pixels
    pub image: RgbaImage,
}

impl SpriteRecord {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}
