use imagelab::{PixelBuffer, PixelLayout};

/// Deterministic RGBA test image: every pixel distinct in the color
/// channels, alpha varying but always opaque-ish, no symmetry across
/// either axis.
pub fn gradient_rgba(w: u32, h: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            data.push((x * 23 + y * 7) as u8);
            data.push((x * 5 + y * 41) as u8);
            data.push((x * 11 + y * 13) as u8);
            data.push(200 + ((x * 3 + y) % 56) as u8);
        }
    }
    PixelBuffer::from_raw(w, h, PixelLayout::Rgba8, data)
}
