use std::path::{Component, Path, PathBuf};

use image::ImageReader;
use log::{debug, info};
use rayon::prelude::*;

use super::SpriteRecord;
use crate::error::SheetError;

const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Recursively find supported images under `dir`.
///
/// Paths are returned sorted by their forward-slash path relative to `dir`,
/// so the result does not depend on directory iteration order. Files whose
/// relative path matches any of `exclude` are skipped.
pub fn discover_images(dir: &Path, exclude: &[glob::Pattern]) -> Result<Vec<PathBuf>, SheetError> {
    if !dir.is_dir() {
        return Err(SheetError::InputNotFound(dir.to_path_buf()));
    }

    let mut found = Vec::new();
    collect_from_directory(dir, dir, exclude, &mut found)?;
    found.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(found.into_iter().map(|(_, path)| path).collect())
}

fn collect_from_directory(
    base: &Path,
    dir: &Path,
    exclude: &[glob::Pattern],
    found: &mut Vec<(String, PathBuf)>,
) -> Result<(), SheetError> {
    let read_err = |source| SheetError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        // Does not follow symlinks, so linked directories are never entered
        let file_type = entry.file_type().map_err(read_err)?;
        let path = entry.path();

        if file_type.is_dir() {
            collect_from_directory(base, &path, exclude, found)?;
        } else if (file_type.is_file() || (file_type.is_symlink() && path.is_file()))
            && is_supported_image(&path)
        {
            let relative = relative_slash_path(&path, base);
            if exclude.iter().any(|p| p.matches(&relative)) {
                debug!("Excluded {}", relative);
                continue;
            }
            found.push((relative, path));
        }
    }

    Ok(())
}

/// Check the extension against the supported input formats (case-insensitive)
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Decode every image in `paths` in parallel.
///
/// The returned sprites keep the order of `paths`. The first decode failure
/// aborts the whole load.
pub fn load_sprites(
    base: &Path,
    paths: &[PathBuf],
    prefix: Option<&str>,
) -> Result<Vec<SpriteRecord>, SheetError> {
    info!("Loading {} images...", paths.len());

    paths
        .par_iter()
        .map(|path| load_single_sprite(path, base, prefix))
        .collect()
}

fn load_single_sprite(
    path: &Path,
    base: &Path,
    prefix: Option<&str>,
) -> Result<SpriteRecord, SheetError> {
    let image = ImageReader::open(path)
        .map_err(|e| SheetError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .with_guessed_format()
        .map_err(|e| SheetError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| SheetError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?
        .into_rgba8();

    let name = sprite_name(path, base, prefix);
    debug!("Loaded {} ({}x{})", name, image.width(), image.height());

    Ok(SpriteRecord { name, image })
}

/// Atlas identifier for an image file.
///
/// The path relative to `base`, with the final extension removed and
/// components joined by `/`, prefixed by `prefix` when given.
pub fn sprite_name(path: &Path, base: &Path, prefix: Option<&str>) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    let stem = relative_slash_path(&relative.with_extension(""), Path::new(""));

    match prefix.and_then(normalize_prefix) {
        Some(p) => format!("{}{}", p, stem),
        None => stem,
    }
}

/// Turn a user-supplied prefix into `dir/` form with forward slashes.
/// Returns `None` for an empty prefix.
pub fn normalize_prefix(prefix: &str) -> Option<String> {
    let normalized = prefix.replace('\\', "/");
    let trimmed = normalized.trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("{}/", trimmed))
    }
}

fn relative_slash_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
