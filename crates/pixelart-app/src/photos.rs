use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use pixelart_core::presets::PhotoSet;
use pixelart_core::Bitmap;

use crate::cli::MAX_PHOTOS;

/// Decode an image file into a straight-alpha RGBA8 bitmap.
pub fn load(path: &Path) -> anyhow::Result<Bitmap> {
    let image = image::open(path)
        .with_context(|| format!("failed to decode {}", path.display()))?
        .into_rgba8();
    let (width, height) = image.dimensions();
    let bitmap = Bitmap::from_rgba8(width, height, image.into_raw())?;
    log::info!("Loaded {} ({width}×{height})", path.display());
    Ok(bitmap)
}

/// Build the photo set from up to three files; positions without a file keep
/// the generated placeholder.
pub fn photo_set(paths: &[PathBuf]) -> anyhow::Result<PhotoSet> {
    if paths.len() > MAX_PHOTOS {
        bail!("at most {MAX_PHOTOS} photos are used, got {}", paths.len());
    }
    let mut set = PhotoSet::placeholder();
    let slots = [&mut set.primary, &mut set.secondary, &mut set.tertiary];
    for (slot, path) in slots.into_iter().zip(paths) {
        *slot = load(path)?.into();
    }
    Ok(set)
}
