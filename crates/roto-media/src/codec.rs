//! Thin decode/encode wrappers around the `image` crate.
//!
//! The pipeline works on RGB frames and single-channel masks; these
//! wrappers pin those representations and attach the offending path to
//! every failure.

use std::path::Path;

use image::{GrayImage, RgbImage};
use tracing::debug;

use crate::error::{MaskError, MaskResult};

/// Decode an image file to 8-bit RGB, discarding any alpha channel.
pub fn decode_rgb(path: &Path) -> MaskResult<RgbImage> {
    let img = image::open(path).map_err(|e| MaskError::decode(path, e))?;
    debug!(path = %path.display(), "decoded frame");
    Ok(img.to_rgb8())
}

/// Encode a single-channel image to `path`; format is inferred from the
/// file extension.
pub fn encode_gray(img: &GrayImage, path: &Path) -> MaskResult<()> {
    img.save(path).map_err(|e| MaskError::encode(path, e))?;
    debug!(path = %path.display(), "wrote delta image");
    Ok(())
}
