//! Foreground masking against a shared background reference.

use image::{GrayImage, RgbImage};
use rayon::prelude::*;

use crate::error::{MaskError, MaskResult};

/// Compute a binary foreground mask for `frame` against `background`.
///
/// A mask pixel is 255 ("on") when the squared Euclidean distance between
/// the frame and background RGB values is strictly greater than
/// `threshold_sq`, and 0 otherwise. A distance exactly equal to the
/// threshold is "off".
///
/// Both images must have identical dimensions; a mismatch is reported as
/// [`MaskError::DimensionMismatch`] rather than producing a garbage mask.
/// Neither input is mutated.
pub fn compute_mask(
    frame: &RgbImage,
    background: &RgbImage,
    threshold_sq: f32,
) -> MaskResult<GrayImage> {
    let (width, height) = background.dimensions();
    if frame.dimensions() != (width, height) {
        return Err(MaskError::dimension_mismatch(
            "<in-memory frame>",
            (width, height),
            frame.dimensions(),
        ));
    }

    let row_len = width as usize * 3;
    let fg_rows = frame.as_raw().par_chunks_exact(row_len);
    let bg_rows = background.as_raw().par_chunks_exact(row_len);

    let mut mask = vec![0u8; (width * height) as usize];
    mask.par_chunks_exact_mut(width as usize)
        .zip(fg_rows.zip(bg_rows))
        .for_each(|(mask_row, (fg_row, bg_row))| {
            for (dst, (fg, bg)) in mask_row
                .iter_mut()
                .zip(fg_row.chunks_exact(3).zip(bg_row.chunks_exact(3)))
            {
                let dr = fg[0] as i32 - bg[0] as i32;
                let dg = fg[1] as i32 - bg[1] as i32;
                let db = fg[2] as i32 - bg[2] as i32;
                let dist_sq = (dr * dr + dg * dg + db * db) as f32;
                *dst = if dist_sq > threshold_sq { 255 } else { 0 };
            }
        });

    // Length is width*height by construction, so this cannot fail.
    Ok(GrayImage::from_raw(width, height, mask)
        .unwrap_or_else(|| GrayImage::new(width, height)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(w: u32, h: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb(rgb))
    }

    #[test]
    fn test_identical_images_mask_all_off() {
        let bg = solid(8, 6, [120, 40, 220]);
        let fg = bg.clone();
        for threshold_sq in [0.0, 1.0, 48.0 * 48.0] {
            let mask = compute_mask(&fg, &bg, threshold_sq).unwrap();
            assert!(mask.pixels().all(|p| p.0[0] == 0));
        }
    }

    #[test]
    fn test_threshold_boundary_is_exclusive() {
        // Distance is exactly 5 (3-4-0 triangle): dist_sq = 25.
        let bg = solid(4, 4, [10, 10, 10]);
        let fg = solid(4, 4, [13, 14, 10]);

        let at_boundary = compute_mask(&fg, &bg, 25.0).unwrap();
        assert!(at_boundary.pixels().all(|p| p.0[0] == 0));

        let below_boundary = compute_mask(&fg, &bg, 24.9).unwrap();
        assert!(below_boundary.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn test_mixed_pixels() {
        let bg = solid(2, 1, [0, 0, 0]);
        let mut fg = solid(2, 1, [0, 0, 0]);
        fg.put_pixel(1, 0, Rgb([255, 255, 255]));

        let mask = compute_mask(&fg, &bg, 48.0 * 48.0).unwrap();
        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
        assert_eq!(mask.get_pixel(1, 0).0[0], 255);
    }

    #[test]
    fn test_dimension_mismatch() {
        let bg = solid(8, 8, [0, 0, 0]);
        let fg = solid(8, 6, [0, 0, 0]);
        let err = compute_mask(&fg, &bg, 100.0).unwrap_err();
        assert!(matches!(err, MaskError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_inputs_not_mutated() {
        let bg = solid(4, 4, [1, 2, 3]);
        let fg = solid(4, 4, [200, 2, 3]);
        let bg_before = bg.clone();
        let fg_before = fg.clone();
        compute_mask(&fg, &bg, 10.0).unwrap();
        assert_eq!(bg, bg_before);
        assert_eq!(fg, fg_before);
    }
}
