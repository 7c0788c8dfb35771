//! Image output.

use std::path::PathBuf;
use std::sync::Mutex;

use image::{Rgb, RgbImage};
use lumen_math::Color;

use crate::RenderError;

/// Destination for rendered pixels.
///
/// Workers call [`write_pixel`](ImageSink::write_pixel) exactly once per
/// pixel, possibly concurrently for disjoint pixels; the renderer calls
/// [`finalize`](ImageSink::finalize) once after every worker has finished.
pub trait ImageSink: Send + Sync {
    /// Raster size as (columns, rows).
    fn dimensions(&self) -> (usize, usize);

    /// Store one pixel.
    fn write_pixel(&self, col: usize, row: usize, color: Color);

    /// Flush the finished image.
    fn finalize(&self) -> Result<(), RenderError>;
}

/// PNG-backed sink buffering pixels in memory until finalized.
pub struct ImageWriter {
    path: PathBuf,
    buffer: Mutex<RgbImage>,
}

impl ImageWriter {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            buffer: Mutex::new(RgbImage::new(width, height)),
        }
    }

    /// Overlay grid lines every `interval` pixels, for inspecting the view
    /// plane layout.
    pub fn draw_grid(&self, interval: usize, color: Color) {
        let (nx, ny) = self.dimensions();
        for row in 0..ny {
            for col in 0..nx {
                if row % interval == 0 || col % interval == 0 {
                    self.write_pixel(col, row, color);
                }
            }
        }
    }
}

impl ImageSink for ImageWriter {
    fn dimensions(&self) -> (usize, usize) {
        let buffer = match self.buffer.lock() {
            Ok(buffer) => buffer,
            Err(poisoned) => poisoned.into_inner(),
        };
        (buffer.width() as usize, buffer.height() as usize)
    }

    fn write_pixel(&self, col: usize, row: usize, color: Color) {
        let mut buffer = match self.buffer.lock() {
            Ok(buffer) => buffer,
            Err(poisoned) => poisoned.into_inner(),
        };
        buffer.put_pixel(col as u32, row as u32, Rgb(color.to_rgb8()));
    }

    fn finalize(&self) -> Result<(), RenderError> {
        let buffer = self.buffer.lock().map_err(|_| RenderError::PoisonedSink)?;
        buffer.save(&self.path)?;
        Ok(())
    }
}
