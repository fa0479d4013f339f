//! Logo asset loading.
//!
//! The logo is read from the filesystem and decoded up front, before any
//! output file is touched, so a missing or broken asset never leaves a
//! half-written receipt behind.

use crate::error::AssetError;
use std::path::{Path, PathBuf};

/// File name looked up when the configured logo path is a directory.
pub const DEFAULT_LOGO_FILE: &str = "Companylogo.png";

/// A decoded raster image, ready to be embedded as an image XObject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    /// Packed 8-bit RGB samples, row-major.
    pub rgb: Vec<u8>,
    /// 8-bit alpha samples, present only when the source has transparency.
    pub alpha: Option<Vec<u8>>,
}

impl RasterImage {
    /// Reads and decodes the logo at `path`.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let path = resolve_logo_path(path);
        let display = path.display().to_string();
        let bytes = std::fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound(display.clone())
            } else {
                AssetError::LoadFailed { path: display.clone(), source: e }
            }
        })?;
        let image = Self::decode(&bytes, &display)?;
        log::debug!("Loaded logo {} ({}x{})", display, image.width, image.height);
        Ok(image)
    }

    pub fn decode(bytes: &[u8], origin: &str) -> Result<Self, AssetError> {
        let decoded = image::load_from_memory(bytes).map_err(|e| AssetError::InvalidFormat {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

        if decoded.color().has_alpha() {
            let rgba = decoded.to_rgba8();
            let (width, height) = rgba.dimensions();
            let pixels = rgba.into_raw();
            let mut rgb = Vec::with_capacity(pixels.len() / 4 * 3);
            let mut alpha = Vec::with_capacity(pixels.len() / 4);
            for px in pixels.chunks_exact(4) {
                rgb.extend_from_slice(&px[..3]);
                alpha.push(px[3]);
            }
            Ok(Self { width, height, rgb, alpha: Some(alpha) })
        } else {
            let rgb = decoded.to_rgb8();
            let (width, height) = rgb.dimensions();
            Ok(Self { width, height, rgb: rgb.into_raw(), alpha: None })
        }
    }
}

/// A directory resolves to the fixed asset name inside it; anything else is
/// taken as the image file itself.
pub fn resolve_logo_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(DEFAULT_LOGO_FILE)
    } else {
        path.to_path_buf()
    }
}
