//! Caller-owned destination pixel buffer

use crate::pixel::region::Region;
use crate::pixel::sink::PixelSink;
use crate::tiff::errors::{TiffError, TiffResult};

/// A 2-D grid of pixels of a capability-bound type
///
/// The decoding engine writes into the buffer but never owns or
/// resizes it; a region that would fall outside the grid is a
/// precondition violation, not a resizing opportunity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer<P> {
    width: u32,
    height: u32,
    pixels: Vec<P>,
}

impl<P: PixelSink + Default> PixelBuffer<P> {
    /// Creates a buffer of the given dimensions filled with default pixels
    pub fn new(width: u32, height: u32) -> Self {
        PixelBuffer {
            width,
            height,
            pixels: vec![P::default(); (width as usize) * (height as usize)],
        }
    }
}

impl<P: PixelSink> PixelBuffer<P> {
    /// Creates a buffer of the given dimensions filled with one pixel value
    ///
    /// Useful for sentinel-fill tests and for callers that want a
    /// defined background.
    pub fn filled(width: u32, height: u32, fill: P) -> Self {
        PixelBuffer {
            width,
            height,
            pixels: vec![fill; (width as usize) * (height as usize)],
        }
    }

    /// Buffer width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reads the pixel at (x, y)
    ///
    /// # Panics
    /// Panics if the coordinates are outside the buffer.
    pub fn get(&self, x: u32, y: u32) -> P {
        assert!(x < self.width && y < self.height, "pixel access out of bounds");
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Writes the pixel at (x, y)
    ///
    /// # Panics
    /// Panics if the coordinates are outside the buffer.
    pub fn set(&mut self, x: u32, y: u32, pixel: P) {
        assert!(x < self.width && y < self.height, "pixel access out of bounds");
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)] = pixel;
    }

    /// Flat view of the pixel data, row-major
    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    /// Checks that a region lies entirely inside this buffer
    ///
    /// Decode entry points call this before any pixel is written, so a
    /// bad region is rejected with no partial output at all.
    pub fn check_region(&self, region: &Region) -> TiffResult<()> {
        if region.end_x() > self.width || region.end_y() > self.height {
            return Err(TiffError::ArgumentError(format!(
                "region {}x{}+{}+{} exceeds buffer bounds {}x{}",
                region.width, region.height, region.left, region.top, self.width, self.height
            )));
        }

        Ok(())
    }
}
