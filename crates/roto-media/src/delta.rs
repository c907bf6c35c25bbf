//! Frame-to-frame delta composition.

use image::GrayImage;
use roto_models::Frame;

use crate::error::{MaskError, MaskResult};

/// A computed foreground mask tied back to its source frame.
///
/// Produced by the masker, consumed exactly once by the sequencer; the
/// last mask of a chunk is carried forward as the seam for the next one.
#[derive(Debug, Clone)]
pub struct FrameMask {
    pub frame: Frame,
    pub mask: GrayImage,
}

impl FrameMask {
    pub fn new(frame: Frame, mask: GrayImage) -> Self {
        Self { frame, mask }
    }
}

/// Compose the delta between two temporally adjacent masks.
///
/// Per pixel: `clamp(2 * |prev - curr|, 0, 255)`. The factor of 2
/// amplifies small mask changes; saturating math prevents overflow.
pub fn compose_delta(prev: &GrayImage, curr: &GrayImage) -> MaskResult<GrayImage> {
    let (width, height) = prev.dimensions();
    if curr.dimensions() != (width, height) {
        return Err(MaskError::dimension_mismatch(
            "<mask pair>",
            (width, height),
            curr.dimensions(),
        ));
    }

    let data: Vec<u8> = prev
        .as_raw()
        .iter()
        .zip(curr.as_raw())
        .map(|(&a, &b)| a.abs_diff(b).saturating_mul(2))
        .collect();

    // Length matches width*height by construction.
    Ok(GrayImage::from_raw(width, height, data)
        .unwrap_or_else(|| GrayImage::new(width, height)))
}
