// ============================================================================
// CONVOLUTION FILTERS — Gaussian blur
// ============================================================================

use rayon::prelude::*;

use crate::buffer::{PixelBuffer, PixelLayout};
use crate::error::EditError;

/// Slider range offered by the front-end; re-validated here.
pub const MAX_BLUR_STRENGTH: u32 = 50;

/// Gaussian blur with the kernel size derived from `strength`.
///
/// The kernel size is forced odd (`strength | 1`), so an even strength
/// behaves exactly like the next odd one. Sigma is auto-derived from the
/// kernel size. The convolution always runs on four channels: grayscale
/// input is promoted and the result stays `Rgba8`.
pub fn gaussian_blur(src: &PixelBuffer, strength: u32) -> Result<PixelBuffer, EditError> {
    if src.is_empty() {
        return Err(EditError::EmptyBuffer);
    }
    if !(1..=MAX_BLUR_STRENGTH).contains(&strength) {
        return Err(EditError::InvalidParameter(format!(
            "blur strength {} outside 1..={}",
            strength, MAX_BLUR_STRENGTH
        )));
    }
    let ksize = (strength | 1) as usize;

    let rgba = src.convert(PixelLayout::Rgba8);
    let blurred = separable_blur(
        rgba.data(),
        rgba.width() as usize,
        rgba.height() as usize,
        4,
        ksize,
    );
    Ok(PixelBuffer::from_raw(
        rgba.width(),
        rgba.height(),
        PixelLayout::Rgba8,
        blurred,
    ))
}

/// Sigma for a given odd kernel size, matching the value blur libraries
/// compute when handed sigma 0: `0.3 * ((k - 1) * 0.5 - 1) + 0.8`.
fn sigma_for_kernel(ksize: usize) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1-D Gaussian kernel of exactly `ksize` taps (ksize odd).
fn build_kernel(ksize: usize) -> Vec<f32> {
    if ksize <= 1 {
        return vec![1.0];
    }
    let sigma = sigma_for_kernel(ksize);
    let radius = ksize / 2;
    let s2 = 2.0 * sigma * sigma;
    let mut kernel = vec![0.0f32; ksize];
    let mut sum = 0.0f32;
    for (i, v) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *v = (-x * x / s2).exp();
        sum += *v;
    }
    let inv = 1.0 / sum;
    for v in &mut kernel {
        *v *= inv;
    }
    kernel
}

/// Two-pass separable convolution over an interleaved `ch`-channel byte
/// buffer. Edges clamp to the nearest pixel. Rows run rayon-parallel; only
/// the fully computed buffer is returned.
pub(crate) fn separable_blur(src: &[u8], w: usize, h: usize, ch: usize, ksize: usize) -> Vec<u8> {
    debug_assert!(ch <= 4);
    let kernel = build_kernel(ksize);
    let radius = kernel.len() / 2;
    let stride = w * ch;

    let buf_in: Vec<f32> = src.iter().map(|&b| b as f32).collect();

    // --- Horizontal pass (parallel by row) ---
    let mut buf_h = vec![0.0f32; buf_in.len()];
    buf_h.par_chunks_mut(stride).enumerate().for_each(|(y, row_out)| {
        let row_start = y * stride;
        for x in 0..w {
            let mut acc = [0.0f32; 4];
            for (k, &kv) in kernel.iter().enumerate() {
                let sx = (x as isize + k as isize - radius as isize)
                    .max(0)
                    .min(w as isize - 1) as usize;
                let idx = row_start + sx * ch;
                for (c, a) in acc.iter_mut().enumerate().take(ch) {
                    *a += buf_in[idx + c] * kv;
                }
            }
            let out_idx = x * ch;
            row_out[out_idx..out_idx + ch].copy_from_slice(&acc[..ch]);
        }
    });

    // --- Vertical pass (parallel by row) ---
    let mut buf_v = vec![0.0f32; buf_in.len()];
    buf_v.par_chunks_mut(stride).enumerate().for_each(|(y, row_out)| {
        for x in 0..w {
            let mut acc = [0.0f32; 4];
            for (k, &kv) in kernel.iter().enumerate() {
                let sy = (y as isize + k as isize - radius as isize)
                    .max(0)
                    .min(h as isize - 1) as usize;
                let idx = sy * stride + x * ch;
                for (c, a) in acc.iter_mut().enumerate().take(ch) {
                    *a += buf_h[idx + c] * kv;
                }
            }
            let out_idx = x * ch;
            row_out[out_idx..out_idx + ch].copy_from_slice(&acc[..ch]);
        }
    });

    buf_v
        .iter()
        .map(|&v| v.round().clamp(0.0, 255.0) as u8)
        .collect()
}
