// ============================================================================
// IMAGE I/O — decode raw bytes, encode for saving, path helpers for the CLI
// ============================================================================
//
// The front-end owns the file dialogs; this module only turns bytes into
// buffers and back. Path-based helpers exist for the headless CLI, which
// has no dialog layer.

use std::fs;
use std::path::Path;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, DynamicImage};

use crate::buffer::{PixelBuffer, PixelLayout};
use crate::error::EditError;

/// Save formats the editor negotiates with the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveFormat {
    Png,
    Jpeg,
    Bmp,
}

impl SaveFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SaveFormat::Png => "png",
            SaveFormat::Jpeg => "jpg",
            SaveFormat::Bmp => "bmp",
        }
    }

    /// Map a file extension to a format, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<SaveFormat> {
        match ext.to_lowercase().as_str() {
            "png" => Some(SaveFormat::Png),
            "jpg" | "jpeg" => Some(SaveFormat::Jpeg),
            "bmp" => Some(SaveFormat::Bmp),
            _ => None,
        }
    }
}

/// Decode raw image bytes (PNG/JPEG/BMP — anything the `image` crate
/// recognises). Grayscale sources stay single-channel; everything else is
/// normalized to RGBA.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, EditError> {
    let img = image::load_from_memory(bytes).map_err(|e| EditError::Decode(e.to_string()))?;
    Ok(PixelBuffer::from_dynamic(img))
}

/// Encode a buffer to bytes in the requested format. `quality` only
/// applies to JPEG (1–100).
pub fn encode(buffer: &PixelBuffer, format: SaveFormat, quality: u8) -> Result<Vec<u8>, EditError> {
    if buffer.is_empty() {
        return Err(EditError::NoImage);
    }

    let mut out = Vec::new();
    match format {
        SaveFormat::Png => {
            let encoder = PngEncoder::new(&mut out);
            #[allow(deprecated)]
            encoder.encode(buffer.data(), buffer.width(), buffer.height(), color_type(buffer))?;
        }
        SaveFormat::Jpeg => {
            // JPEG has no alpha channel; gray stays gray, color drops to RGB.
            let mut encoder = JpegEncoder::new_with_quality(&mut out, quality);
            match buffer.layout() {
                PixelLayout::Gray8 => {
                    encoder.encode(buffer.data(), buffer.width(), buffer.height(), ColorType::L8)?;
                }
                PixelLayout::Rgba8 => {
                    let rgb = buffer.to_dynamic().to_rgb8();
                    encoder.encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)?;
                }
            }
        }
        SaveFormat::Bmp => {
            let mut encoder = BmpEncoder::new(&mut out);
            match buffer.layout() {
                PixelLayout::Gray8 => {
                    // The BMP encoder rejects L8; widen to RGB first.
                    let rgb = buffer.to_dynamic().to_rgb8();
                    encoder.encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)?;
                }
                PixelLayout::Rgba8 => {
                    encoder.encode(
                        buffer.data(),
                        buffer.width(),
                        buffer.height(),
                        ColorType::Rgba8,
                    )?;
                }
            }
        }
    }
    Ok(out)
}

fn color_type(buffer: &PixelBuffer) -> ColorType {
    match buffer.layout() {
        PixelLayout::Gray8 => ColorType::L8,
        PixelLayout::Rgba8 => ColorType::Rgba8,
    }
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> Result<PixelBuffer, EditError> {
    let bytes = fs::read(path)?;
    decode(&bytes)
}

/// Encode and write an image file.
pub fn save_image(
    buffer: &PixelBuffer,
    path: &Path,
    format: SaveFormat,
    quality: u8,
) -> Result<(), EditError> {
    let bytes = encode(buffer, format, quality)?;
    fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            decode(&[0xde, 0xad, 0xbe, 0xef]),
            Err(EditError::Decode(_))
        ));
    }

    #[test]
    fn encode_rejects_the_null_image() {
        assert!(matches!(
            encode(&PixelBuffer::empty(), SaveFormat::Png, 90),
            Err(EditError::NoImage)
        ));
    }

    #[test]
    fn png_round_trip_preserves_pixels() {
        let buf = PixelBuffer::from_pixel(3, 2, image::Rgba([12, 34, 56, 255]));
        let bytes = encode(&buf, SaveFormat::Png, 90).unwrap();
        let back = decode(&bytes).unwrap();
        assert_eq!(back, buf);
    }
}
