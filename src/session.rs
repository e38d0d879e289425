// ============================================================================
// EDIT SESSION — buffer ownership, operation dispatch, one-level revert
// ============================================================================

use crate::buffer::{Palette, PixelBuffer};
use crate::error::EditError;
use crate::io::{self, SaveFormat};
use crate::ops::transform::{FlipAxis, RotateDirection};
use crate::ops::{adjustments, effects, filters, transform};
use crate::paint::PaintEngine;

/// One toolbar/menu action. Parameterized variants carry the value the
/// front-end's slider dialog produced; the op modules re-validate it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    RotateCw,
    RotateCcw,
    FlipHorizontal,
    FlipVertical,
    Grayscale,
    Invert,
    Sketch,
    Blur(u32),
    Pixelate(u32),
    Contrast(i32),
}

/// Display seam for the excluded GUI layer: whatever can show a buffer on
/// screen implements this and gets handed the current image after edits.
pub trait Renderable {
    fn present(&mut self, buffer: &PixelBuffer);
}

/// Owner of the working image.
///
/// Holds the current buffer plus the snapshot taken at load time. Every
/// successful operation replaces `current` wholesale; `original` is only
/// ever copied from, so revert cannot be corrupted by later edits.
pub struct EditSession {
    current: PixelBuffer,
    original: PixelBuffer,
    paint_mode: bool,
    engine: PaintEngine,
}

impl Default for EditSession {
    fn default() -> Self {
        EditSession::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        EditSession {
            current: PixelBuffer::empty(),
            original: PixelBuffer::empty(),
            paint_mode: false,
            engine: PaintEngine::new(),
        }
    }

    pub fn current(&self) -> &PixelBuffer {
        &self.current
    }

    pub fn has_image(&self) -> bool {
        !self.current.is_empty()
    }

    /// Install a freshly loaded image. The snapshot for revert is taken
    /// here and only here; any in-flight stroke is abandoned.
    pub fn load(&mut self, buffer: PixelBuffer) {
        self.original = buffer.clone();
        self.current = buffer;
        self.engine.stroke_end();
        log_info!(
            "loaded image {}x{} ({:?})",
            self.current.width(),
            self.current.height(),
            self.current.layout()
        );
    }

    /// Throw away all edits and go back to the loaded image. Idempotent;
    /// the restored buffer never aliases the snapshot's storage.
    pub fn revert(&mut self) -> Result<(), EditError> {
        if self.original.is_empty() {
            return Err(EditError::NothingToRevert);
        }
        self.current = self.original.clone();
        Ok(())
    }

    /// Dispatch one operation against the current buffer and replace it
    /// with the result. `original` is never touched.
    pub fn apply_op(&mut self, op: Operation) -> Result<(), EditError> {
        let result = match op {
            Operation::RotateCw => transform::rotate90(&self.current, RotateDirection::Clockwise),
            Operation::RotateCcw => {
                transform::rotate90(&self.current, RotateDirection::CounterClockwise)
            }
            Operation::FlipHorizontal => transform::flip(&self.current, FlipAxis::Horizontal),
            Operation::FlipVertical => transform::flip(&self.current, FlipAxis::Vertical),
            Operation::Grayscale => adjustments::grayscale(&self.current),
            Operation::Invert => adjustments::invert(&self.current),
            Operation::Sketch => effects::sketch(&self.current),
            Operation::Blur(strength) => filters::gaussian_blur(&self.current, strength),
            Operation::Pixelate(size) => effects::pixelate(&self.current, size),
            Operation::Contrast(level) => adjustments::adjust_contrast(&self.current, level),
        }?;
        self.current = result;
        Ok(())
    }

    /// Encode the current buffer for the front-end to write out.
    pub fn save(&self, format: SaveFormat, quality: u8) -> Result<Vec<u8>, EditError> {
        if self.current.is_empty() {
            return Err(EditError::NoImage);
        }
        io::encode(&self.current, format, quality)
    }

    /// Push the current image to a display adapter. Nothing to show while
    /// no image is loaded.
    pub fn present(&self, target: &mut dyn Renderable) {
        if !self.current.is_empty() {
            target.present(&self.current);
        }
    }

    // -----------------------------------------------------------------------
    //  Paint surface — pointer events forwarded by the front-end
    // -----------------------------------------------------------------------

    pub fn paint_mode(&self) -> bool {
        self.paint_mode
    }

    /// Flip paint mode. Turning it either way ends any active stroke, so
    /// the next pointer-down starts fresh.
    pub fn toggle_paint_mode(&mut self) {
        self.paint_mode = !self.paint_mode;
        self.engine.stroke_end();
    }

    /// Select a brush color from the fixed palette.
    pub fn set_paint_color(&mut self, color: Palette) {
        self.engine.set_color(color.rgba());
    }

    /// Pointer-down. Ignored while paint mode is off.
    pub fn pointer_pressed(&mut self, at: (i32, i32)) -> Result<(), EditError> {
        if !self.paint_mode {
            return Ok(());
        }
        self.current = self.engine.stroke_start(&self.current, at)?;
        Ok(())
    }

    /// Pointer-move. Ignored while paint mode is off.
    pub fn pointer_moved(&mut self, at: (i32, i32)) -> Result<(), EditError> {
        if !self.paint_mode {
            return Ok(());
        }
        self.current = self.engine.stroke_continue(&self.current, at)?;
        Ok(())
    }

    /// Pointer-up always ends the stroke, whatever mode we are in.
    pub fn pointer_released(&mut self) {
        self.engine.stroke_end();
    }
}
