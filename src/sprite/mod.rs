mod loader;
mod sprite;

pub use loader::{discover_images, is_supported_image, load_sprites, normalize_prefix, sprite_name};
pub use sprite::SpriteRecord;
