//! Resize-based blur approximation for mask smoothing.

use image::imageops::{self, FilterType};
use image::GrayImage;

/// Soften a mask by repeatedly downscaling to quarter size and upscaling
/// back, approximating a low-pass blur with only resize primitives.
///
/// Each iteration downsizes with the softer `Triangle` (bilinear) filter
/// and upsizes with the sharper `CatmullRom` (bicubic) filter; the
/// iteration count controls smoothing strength. Zero iterations returns
/// the mask untouched.
pub fn soften(mask: GrayImage, iterations: u32) -> GrayImage {
    if iterations == 0 {
        return mask;
    }

    let (width, height) = mask.dimensions();
    let small_w = (width / 4).max(1);
    let small_h = (height / 4).max(1);

    let mut out = mask;
    for _ in 0..iterations {
        let small = imageops::resize(&out, small_w, small_h, FilterType::Triangle);
        out = imageops::resize(&small, width, height, FilterType::CatmullRom);
    }
    out
}
