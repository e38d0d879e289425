// ============================================================================
// TRANSFORM OPERATIONS — rotate 90° and mirror flips
// ============================================================================

use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::error::EditError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipAxis {
    Horizontal,
    Vertical,
}

/// Rotate 90° in the given direction. Output dimensions are swapped
/// (W'=H, H'=W); source (x, y) lands at (H-1-y, x) clockwise and
/// (y, W-1-x) counter-clockwise, so four clockwise rotations reproduce
/// the input byte-for-byte.
pub fn rotate90(src: &PixelBuffer, dir: RotateDirection) -> Result<PixelBuffer, EditError> {
    if src.is_empty() {
        return Err(EditError::EmptyBuffer);
    }
    let w = src.width() as usize;
    let h = src.height() as usize;
    let ch = src.channels();
    let src_raw = src.data();

    let new_w = h;
    let mut dst = vec![0u8; src_raw.len()];
    let dst_stride = new_w * ch;

    dst.par_chunks_mut(dst_stride).enumerate().for_each(|(dy, row_out)| {
        for dx in 0..new_w {
            // Inverse of the source→dest mapping above.
            let (sx, sy) = match dir {
                RotateDirection::Clockwise => (dy, h - 1 - dx),
                RotateDirection::CounterClockwise => (w - 1 - dy, dx),
            };
            let si = (sy * w + sx) * ch;
            let di = dx * ch;
            row_out[di..di + ch].copy_from_slice(&src_raw[si..si + ch]);
        }
    });

    Ok(PixelBuffer::from_raw(
        new_w as u32,
        w as u32,
        src.layout(),
        dst,
    ))
}

/// Mirror the image over an axis. Horizontal mirrors columns
/// ((x, y) → (W-1-x, y)); vertical mirrors rows ((x, y) → (x, H-1-y)).
/// Two flips over the same axis are the identity.
pub fn flip(src: &PixelBuffer, axis: FlipAxis) -> Result<PixelBuffer, EditError> {
    if src.is_empty() {
        return Err(EditError::EmptyBuffer);
    }
    let w = src.width() as usize;
    let h = src.height() as usize;
    let ch = src.channels();
    let stride = w * ch;
    let src_raw = src.data();

    let mut dst = vec![0u8; src_raw.len()];
    dst.par_chunks_mut(stride).enumerate().for_each(|(y, row_out)| {
        match axis {
            FlipAxis::Horizontal => {
                let row_in = &src_raw[y * stride..(y + 1) * stride];
                for x in 0..w {
                    let si = (w - 1 - x) * ch;
                    let di = x * ch;
                    row_out[di..di + ch].copy_from_slice(&row_in[si..si + ch]);
                }
            }
            FlipAxis::Vertical => {
                let sy = h - 1 - y;
                row_out.copy_from_slice(&src_raw[sy * stride..(sy + 1) * stride]);
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
