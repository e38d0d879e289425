// ============================================================================
// PIXEL BUFFER — canonical in-memory raster + channel-layout handling
// ============================================================================

use image::{DynamicImage, GrayImage, Rgba, RgbaImage};

/// Channel layout of a [`PixelBuffer`].
///
/// Filters convert between layouts (grayscale shrinks to one channel, blur
/// promotes to four), so the layout is tracked explicitly rather than
/// inferred from the byte count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// Single-channel 8-bit luminance.
    Gray8,
    /// Four-channel 8-bit, RGBA byte order.
    Rgba8,
}

impl PixelLayout {
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Gray8 => 1,
            PixelLayout::Rgba8 => 4,
        }
    }
}

/// Rec.601 luminance, rounded to the nearest 8-bit value.
///
/// This is the one canonical grayscale formula in the crate — layout
/// conversion, the grayscale operation and the sketch pipeline all go
/// through it.
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32)
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Mutable 2D raster with an explicit channel layout.
///
/// Invariant: `data.len() == width * height * layout.channels()` at all
/// times. Constructors check it; operations build new buffers rather than
/// resizing in place, so the invariant cannot be broken mid-edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    layout: PixelLayout,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// The 0×0 null image — the state of a session before any load.
    pub fn empty() -> Self {
        PixelBuffer {
            width: 0,
            height: 0,
            layout: PixelLayout::Rgba8,
            data: Vec::new(),
        }
    }

    /// Zero-filled buffer of the given size.
    pub fn new(width: u32, height: u32, layout: PixelLayout) -> Self {
        PixelBuffer {
            width,
            height,
            layout,
            data: vec![0; width as usize * height as usize * layout.channels()],
        }
    }

    /// Wrap raw bytes. Panics when the byte length does not match the
    /// declared dimensions — that is a programming error, not user input.
    pub fn from_raw(width: u32, height: u32, layout: PixelLayout, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            width as usize * height as usize * layout.channels(),
            "pixel data length does not match {}x{} {:?}",
            width,
            height,
            layout,
        );
        PixelBuffer { width, height, layout, data }
    }

    /// Solid-color RGBA buffer.
    pub fn from_pixel(width: u32, height: u32, color: Rgba<u8>) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..width as usize * height as usize {
            data.extend_from_slice(&color.0);
        }
        PixelBuffer::from_raw(width, height, PixelLayout::Rgba8, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// True for the null image (either dimension zero).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Channel slice of the pixel at (x, y). Coordinates must be in range.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let ch = self.channels();
        let i = (y as usize * self.width as usize + x as usize) * ch;
        &self.data[i..i + ch]
    }

    /// Write `color` at (x, y), silently skipping out-of-bounds coordinates.
    /// On a `Gray8` buffer the color's luminance is written instead.
    pub fn put_color(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let ch = self.channels();
        let i = (y as usize * self.width as usize + x as usize) * ch;
        match self.layout {
            PixelLayout::Gray8 => {
                self.data[i] = luminance(color[0], color[1], color[2]);
            }
            PixelLayout::Rgba8 => {
                self.data[i..i + 4].copy_from_slice(&color.0);
            }
        }
    }

    /// Convert to the target layout, returning a new buffer.
    ///
    /// `Gray8` → `Rgba8` replicates luminance into R, G, B with opaque
    /// alpha; `Rgba8` → `Gray8` applies [`luminance`]. Converting to the
    /// buffer's own layout is a plain copy.
    pub fn convert(&self, target: PixelLayout) -> PixelBuffer {
        if self.layout == target {
            return self.clone();
        }
        match (self.layout, target) {
            (PixelLayout::Gray8, PixelLayout::Rgba8) => {
                let mut data = Vec::with_capacity(self.data.len() * 4);
                for &v in &self.data {
                    data.extend_from_slice(&[v, v, v, 255]);
                }
                PixelBuffer::from_raw(self.width, self.height, PixelLayout::Rgba8, data)
            }
            (PixelLayout::Rgba8, PixelLayout::Gray8) => {
                let mut data = Vec::with_capacity(self.data.len() / 4);
                for px in self.data.chunks_exact(4) {
                    data.push(luminance(px[0], px[1], px[2]));
                }
                PixelBuffer::from_raw(self.width, self.height, PixelLayout::Gray8, data)
            }
            _ => unreachable!("layouts already equal"),
        }
    }

    /// Bridge to the `image` crate for codecs and resampling.
    pub fn to_dynamic(&self) -> DynamicImage {
        match self.layout {
            PixelLayout::Gray8 => DynamicImage::ImageLuma8(
                GrayImage::from_raw(self.width, self.height, self.data.clone())
                    .expect("buffer invariant"),
            ),
            PixelLayout::Rgba8 => DynamicImage::ImageRgba8(
                RgbaImage::from_raw(self.width, self.height, self.data.clone())
                    .expect("buffer invariant"),
            ),
        }
    }

    /// Import from the `image` crate. Grayscale sources stay single-channel;
    /// every other color type is normalized to RGBA.
    pub fn from_dynamic(img: DynamicImage) -> PixelBuffer {
        match img {
            DynamicImage::ImageLuma8(gray) => {
                let (w, h) = (gray.width(), gray.height());
                PixelBuffer::from_raw(w, h, PixelLayout::Gray8, gray.into_raw())
            }
            other => {
                let rgba = other.to_rgba8();
                let (w, h) = (rgba.width(), rgba.height());
                PixelBuffer::from_raw(w, h, PixelLayout::Rgba8, rgba.into_raw())
            }
        }
    }
}

// ---------------------------------------------------------------------------
//  Paint palette
// ---------------------------------------------------------------------------

/// The fixed brush palette offered by the front-end's color menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Palette {
    Black,
    White,
    Red,
    Blue,
    Green,
}

impl Palette {
    pub fn all() -> &'static [Palette] {
        &[
            Palette::Black,
            Palette::White,
            Palette::Red,
            Palette::Blue,
            Palette::Green,
        ]
    }

    pub fn rgba(self) -> Rgba<u8> {
        match self {
            Palette::Black => Rgba([0, 0, 0, 255]),
            Palette::White => Rgba([255, 255, 255, 255]),
            Palette::Red => Rgba([255, 0, 0, 255]),
            Palette::Blue => Rgba([0, 0, 255, 255]),
            Palette::Green => Rgba([0, 255, 0, 255]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_round_trips_gray_through_rgba() {
        let gray = PixelBuffer::from_raw(2, 1, PixelLayout::Gray8, vec![10, 200]);
        let rgba = gray.convert(PixelLayout::Rgba8);
        assert_eq!(rgba.pixel(0, 0), &[10, 10, 10, 255]);
        assert_eq!(rgba.pixel(1, 0), &[200, 200, 200, 255]);
        // Replicated gray has equal weights summing to 1, so the luminance
        // of (v, v, v) is v again.
        assert_eq!(rgba.convert(PixelLayout::Gray8), gray);
    }

    #[test]
    fn luminance_uses_rec601_weights() {
        assert_eq!(luminance(255, 0, 0), 76); // 0.299 * 255
        assert_eq!(luminance(0, 255, 0), 150); // 0.587 * 255
        assert_eq!(luminance(0, 0, 255), 29); // 0.114 * 255
        assert_eq!(luminance(255, 255, 255), 255);
    }

    #[test]
    fn put_color_clips_out_of_bounds() {
        let mut buf = PixelBuffer::new(2, 2, PixelLayout::Rgba8);
        buf.put_color(-1, 0, Rgba([255, 0, 0, 255]));
        buf.put_color(0, 5, Rgba([255, 0, 0, 255]));
        assert!(buf.data().iter().all(|&b| b == 0));
        buf.put_color(1, 1, Rgba([255, 0, 0, 255]));
        assert_eq!(buf.pixel(1, 1), &[255, 0, 0, 255]);
    }

    #[test]
    #[should_panic(expected = "pixel data length")]
    fn from_raw_rejects_mismatched_length() {
        let _ = PixelBuffer::from_raw(2, 2, PixelLayout::Rgba8, vec![0; 3]);
    }
}
