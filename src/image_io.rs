//! # Image Loading and Saving
//!
//! Bridges image files and the in-memory pixel buffers the codec works on.
//! Every image is converted to RGBA8 on load so the codec sees one layout
//! regardless of the source format.
//!
//! Only lossless formats keep hidden data intact. Saving to a lossy format
//! is allowed but logged as a warning.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{GenericImageView, ImageFormat, RgbaImage};
use log::{debug, warn};
use thiserror::Error;

/// Failures of the image collaborator. The codec itself never raises these.
#[derive(Error, Debug)]
pub enum ImageIoError {
    #[error("failed to load image {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to save image {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to decode image from memory: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode image as PNG: {0}")]
    Encode(#[source] image::ImageError),
}

/// Load an image file of any supported format as RGBA8.
pub fn load<P: AsRef<Path>>(path: P) -> Result<RgbaImage, ImageIoError> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| ImageIoError::Load {
        path: path.to_path_buf(),
        source,
    })?;

    let (width, height) = image.dimensions();
    debug!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        width,
        height,
        image.color()
    );
    Ok(image.to_rgba8())
}

/// Save `buffer` to `path`, picking the format from the file extension.
pub fn save<P: AsRef<Path>>(buffer: &RgbaImage, path: P) -> Result<(), ImageIoError> {
    let path = path.as_ref();

    if is_lossy(path) {
        warn!(
            "⚠️  {} uses a lossy format; hidden data will not survive",
            path.display()
        );
    }

    buffer.save(path).map_err(|source| ImageIoError::Save {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Saved {}x{} image to {}", buffer.width(), buffer.height(), path.display());
    Ok(())
}

/// Decode raw image bytes (any supported format) as RGBA8.
pub fn load_from_memory(bytes: &[u8]) -> Result<RgbaImage, ImageIoError> {
    let image = image::load_from_memory(bytes).map_err(ImageIoError::Decode)?;
    Ok(image.to_rgba8())
}

/// Encode `buffer` as PNG bytes.
pub fn encode_png(buffer: &RgbaImage) -> Result<Vec<u8>, ImageIoError> {
    let mut output_bytes = Vec::new();
    buffer
        .write_to(&mut Cursor::new(&mut output_bytes), ImageFormat::Png)
        .map_err(ImageIoError::Encode)?;
    Ok(output_bytes)
}

/// Whether saving to `path` would run the pixels through lossy compression.
pub fn is_lossy(path: &Path) -> bool {
    matches!(
        ImageFormat::from_path(path),
        Ok(ImageFormat::Jpeg) | Ok(ImageFormat::WebP)
    )
}
