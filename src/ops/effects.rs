// ============================================================================
// EFFECTS — pixelate (mosaic) and pencil sketch
// ============================================================================

use image::imageops::FilterType;

use crate::buffer::{PixelBuffer, PixelLayout};
use crate::error::EditError;
use crate::ops::filters;

/// Slider range offered by the front-end; re-validated here.
pub const MAX_PIXELATE_SIZE: u32 = 100;

/// Blur kernel used by the sketch pipeline. Changing it changes the look
/// of every sketch, so it is pinned by tests.
const SKETCH_KERNEL_SIZE: usize = 21;
/// Dodge-blend scale for the sketch divide step.
const SKETCH_SCALE: f32 = 256.0;

/// Mosaic effect: downsample to `W/size × H/size` (floored, minimum 1×1)
/// with nearest-neighbour sampling, then blow back up to the original
/// dimensions the same way. No smoothing on the upsample, so the block
/// edges stay hard. Size 1 resamples 1:1 and is the identity.
pub fn pixelate(src: &PixelBuffer, pixel_size: u32) -> Result<PixelBuffer, EditError> {
    if src.is_empty() {
        return Err(EditError::EmptyBuffer);
    }
    if !(1..=MAX_PIXELATE_SIZE).contains(&pixel_size) {
        return Err(EditError::InvalidParameter(format!(
            "pixel size {} outside 1..={}",
            pixel_size, MAX_PIXELATE_SIZE
        )));
    }
    if pixel_size == 1 {
        return Ok(src.clone());
    }

    let w = src.width();
    let h = src.height();
    let small_w = (w / pixel_size).max(1);
    let small_h = (h / pixel_size).max(1);

    let small = src
        .to_dynamic()
        .resize_exact(small_w, small_h, FilterType::Nearest);
    let restored = small.resize_exact(w, h, FilterType::Nearest);
    Ok(PixelBuffer::from_dynamic(restored))
}

/// Pencil-sketch effect via a dodge blend:
/// grayscale → invert → 21×21 Gaussian blur → invert → divide the gray
/// plane by the inverted blur at scale 256, clamped. The single-channel
/// result is converted back to the working RGBA layout.
pub fn sketch(src: &PixelBuffer) -> Result<PixelBuffer, EditError> {
    if src.is_empty() {
        return Err(EditError::EmptyBuffer);
    }
    let gray = src.convert(PixelLayout::Gray8);
    let w = gray.width() as usize;
    let h = gray.height() as usize;

    let inverted: Vec<u8> = gray.data().iter().map(|&v| 255 - v).collect();
    let blurred = filters::separable_blur(&inverted, w, h, 1, SKETCH_KERNEL_SIZE);

    let pencil: Vec<u8> = gray
        .data()
        .iter()
        .zip(&blurred)
        .map(|(&g, &b)| {
            let inverted_blur = 255 - b;
            if inverted_blur == 0 {
                // Divide-by-zero rule of the dodge blend: the quotient is 0.
                // Only reachable where the source is near-black anyway.
                0
            } else {
                (g as f32 * SKETCH_SCALE / inverted_blur as f32)
                    .round()
                    .clamp(0.0, 255.0) as u8
            }
        })
        .collect();

    let pencil_gray = PixelBuffer::from_raw(gray.width(), gray.height(), PixelLayout::Gray8, pencil);
    Ok(pencil_gray.convert(PixelLayout::Rgba8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixelate_parameter_domain() {
        let buf = PixelBuffer::new(4, 4, PixelLayout::Rgba8);
        assert!(matches!(
            pixelate(&buf, 0),
            Err(EditError::InvalidParameter(_))
        ));
        assert!(matches!(
            pixelate(&buf, MAX_PIXELATE_SIZE + 1),
            Err(EditError::InvalidParameter(_))
        ));
    }

    #[test]
    fn pixelate_larger_than_image_collapses_to_one_block() {
        // 4×4 with block size 100: downsample floors to 1×1, so the whole
        // output repeats a single source pixel.
        let mut buf = PixelBuffer::new(4, 4, PixelLayout::Rgba8);
        for y in 0..4 {
            for x in 0..4 {
                buf.put_color(x, y, image::Rgba([(x * 60) as u8, (y * 60) as u8, 0, 255]));
            }
        }
        let out = pixelate(&buf, 100).unwrap();
        let first = out.pixel(0, 0).to_vec();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(out.pixel(x, y), &first[..]);
            }
        }
    }

    #[test]
    fn sketch_handles_single_pixel_black() {
        // Black 1×1: gray 0, inverted 255, blur 255, inverted blur 0 —
        // exercises the zero-divisor rule.
        let buf = PixelBuffer::from_pixel(1, 1, image::Rgba([0, 0, 0, 255]));
        let out = sketch(&buf).unwrap();
        assert_eq!(out.pixel(0, 0), &[0, 0, 0, 255]);
    }
}
