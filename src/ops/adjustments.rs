// ============================================================================
// COLOR ADJUSTMENTS — grayscale, invert, contrast
// ============================================================================

use rayon::prelude::*;

use crate::buffer::{PixelBuffer, PixelLayout};
use crate::error::EditError;

/// Luminance reduction to a single-channel buffer (Rec.601 weights, see
/// `buffer::luminance`). The channel count shrinks; the only way back to
/// color is revert or reload. Gray input passes through as a copy.
pub fn grayscale(src: &PixelBuffer) -> Result<PixelBuffer, EditError> {
    if src.is_empty() {
        return Err(EditError::EmptyBuffer);
    }
    Ok(src.convert(PixelLayout::Gray8))
}

/// Negative effect: every color channel becomes `255 - v`. Alpha is left
/// alone so transparency survives the inversion.
pub fn invert(src: &PixelBuffer) -> Result<PixelBuffer, EditError> {
    if src.is_empty() {
        return Err(EditError::EmptyBuffer);
    }
    let ch = src.channels();
    let stride = src.width() as usize * ch;
    let src_raw = src.data();

    let mut dst = vec![0u8; src_raw.len()];
    dst.par_chunks_mut(stride).enumerate().for_each(|(y, row_out)| {
        let row_in = &src_raw[y * stride..(y + 1) * stride];
        match src.layout() {
            PixelLayout::Gray8 => {
                for (out, &v) in row_out.iter_mut().zip(row_in) {
                    *out = 255 - v;
                }
            }
            PixelLayout::Rgba8 => {
                for (out_px, in_px) in row_out.chunks_exact_mut(4).zip(row_in.chunks_exact(4)) {
                    out_px[0] = 255 - in_px[0];
                    out_px[1] = 255 - in_px[1];
                    out_px[2] = 255 - in_px[2];
                    out_px[3] = in_px[3];
                }
            }
        }
    });

    Ok(PixelBuffer::from_raw(
        src.width(),
        src.height(),
        src.layout(),
        dst,
    ))
}

/// Remap contrast around the 128 midpoint.
///
/// `level` is valid in `-255..=254`: the textbook 259-factor formula has a
/// zero denominator at exactly +255, so that boundary is rejected instead
/// of guessed at. Level 0 is the identity (within rounding), -255 flattens
/// everything to mid-gray.
pub fn adjust_contrast(src: &PixelBuffer, level: i32) -> Result<PixelBuffer, EditError> {
    if src.is_empty() {
        return Err(EditError::EmptyBuffer);
    }
    if !(-255..255).contains(&level) {
        return Err(EditError::InvalidParameter(format!(
            "contrast level {} outside -255..=254",
            level
        )));
    }

    let factor = (259.0 * (level as f32 + 255.0)) / (255.0 * (259.0 - level as f32));
    let remap = |v: u8| (factor * (v as f32 - 128.0) + 128.0).round().clamp(0.0, 255.0) as u8;

    let ch = src.channels();
    let stride = src.width() as usize * ch;
    let src_raw = src.data();

    let mut dst = vec![0u8; src_raw.len()];
    dst.par_chunks_mut(stride).enumerate().for_each(|(y, row_out)| {
        let row_in = &src_raw[y * stride..(y + 1) * stride];
        match src.layout() {
            PixelLayout::Gray8 => {
                for (out, &v) in row_out.iter_mut().zip(row_in) {
                    *out = remap(v);
                }
            }
            PixelLayout::Rgba8 => {
                for (out_px, in_px) in row_out.chunks_exact_mut(4).zip(row_in.chunks_exact(4)) {
                    out_px[0] = remap(in_px[0]);
                    out_px[1] = remap(in_px[1]);
                    out_px[2] = remap(in_px[2]);
                    out_px[3] = in_px[3];
                }
            }
        }
    });

    Ok(PixelBuffer::from_raw(
        src.width(),
        src.height(),
        src.layout(),
        dst,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contrast_boundary_levels() {
        let buf = PixelBuffer::from_raw(1, 1, PixelLayout::Gray8, vec![40]);
        assert!(matches!(
            adjust_contrast(&buf, 255),
            Err(EditError::InvalidParameter(_))
        ));
        assert!(matches!(
            adjust_contrast(&buf, -256),
            Err(EditError::InvalidParameter(_))
        ));
        // -255 gives factor 0: everything collapses onto the midpoint.
        let flat = adjust_contrast(&buf, -255).unwrap();
        assert_eq!(flat.pixel(0, 0), &[128]);
    }

    #[test]
    fn invert_leaves_alpha_alone() {
        let buf = PixelBuffer::from_raw(1, 1, PixelLayout::Rgba8, vec![10, 20, 30, 77]);
        let inv = invert(&buf).unwrap();
        assert_eq!(inv.pixel(0, 0), &[245, 235, 225, 77]);
    }
}
