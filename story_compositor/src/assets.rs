//! Decoded scene images, cached by path.
//!
//! Each background and overlay is read from disk at most once. A failed
//! load is cached as a miss and warned about a single time, so a missing
//! asset doesn't flood the log at frame rate.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{RgbImage, RgbaImage};
use log::warn;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("cannot load {path}: {source}")]
    Decode {
        path:   PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("overlay {0} has no alpha channel")]
    NoAlpha(PathBuf),
}

/// Load an image as 8-bit RGB.
pub fn load_rgb(path: &Path) -> Result<RgbImage, AssetError> {
    image::open(path)
        .map(|img| img.to_rgb8())
        .map_err(|source| AssetError::Decode { path: path.to_path_buf(), source })
}

/// Load an overlay sprite. Images without an alpha channel are rejected.
pub fn load_sprite(path: &Path) -> Result<RgbaImage, AssetError> {
    let img = image::open(path)
        .map_err(|source| AssetError::Decode { path: path.to_path_buf(), source })?;
    if !img.color().has_alpha() {
        return Err(AssetError::NoAlpha(path.to_path_buf()));
    }
    Ok(img.to_rgba8())
}

#[derive(Debug, Default)]
pub struct AssetCache {
    backgrounds: HashMap<PathBuf, Option<Arc<RgbImage>>>,
    overlays:    HashMap<PathBuf, Option<Arc<RgbaImage>>>,
}

impl AssetCache {
    pub fn new() -> Self { AssetCache::default() }

    /// Background at `path`, or `None` if it could not be loaded.
    pub fn background(&mut self, path: &Path) -> Option<Arc<RgbImage>> {
        self.backgrounds
            .entry(path.to_path_buf())
            .or_insert_with(|| match load_rgb(path) {
                Ok(img) => Some(Arc::new(img)),
                Err(e)  => {
                    warn!("background skipped: {}", e);
                    None
                }
            })
            .clone()
    }

    /// Overlay sprite at `path`, or `None` if missing or lacking alpha.
    pub fn overlay(&mut self, path: &Path) -> Option<Arc<RgbaImage>> {
        self.overlays
            .entry(path.to_path_buf())
            .or_insert_with(|| match load_sprite(path) {
                Ok(img) => Some(Arc::new(img)),
                Err(e)  => {
                    warn!("overlay skipped: {}", e);
                    None
                }
            })
            .clone()
    }

    pub fn len(&self) -> usize { self.backgrounds.len() + self.overlays.len() }
    pub fn is_empty(&self) -> bool { self.len() == 0 }
}
