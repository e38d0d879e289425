// ============================================================================
// imagelab — single-buffer raster image editing engine
// ============================================================================
//
// Library surface used by the headless CLI binary and by any future GUI
// front-end. The engine itself is display-agnostic: a front-end feeds pointer
// events and `Operation` values into an `EditSession` and implements
// `Renderable` to receive the buffer for display.

#[macro_use]
pub mod logger;

pub mod buffer;
pub mod cli;
pub mod error;
pub mod io;
pub mod ops;
pub mod paint;
pub mod session;

pub use buffer::{Palette, PixelBuffer, PixelLayout};
pub use error::EditError;
pub use io::SaveFormat;
pub use paint::PaintEngine;
pub use session::{EditSession, Operation, Renderable};
