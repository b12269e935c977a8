//! Region structure for defining the decode target area
//!
//! This module defines the Region structure that specifies a
//! rectangular area of the destination buffer to materialize. The
//! coordinates are in pixels and follow the typical image coordinate
//! system where (0,0) is the top-left corner.

/// Rectangular decode target (in pixel coordinates)
///
/// Represents a rectangular area defined by its top-left corner
/// coordinates and dimensions. Decoders write exactly the pixels of
/// this rectangle and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// X-coordinate of the top-left corner (pixels from left)
    pub left: u32,

    /// Y-coordinate of the top-left corner (pixels from top)
    pub top: u32,

    /// Width of the region in pixels
    pub width: u32,

    /// Height of the region in pixels
    pub height: u32,
}

impl Region {
    /// Creates a new region
    ///
    /// # Arguments
    /// * `left` - X-coordinate of the top-left corner
    /// * `top` - Y-coordinate of the top-left corner
    /// * `width` - Width of the region in pixels
    /// * `height` - Height of the region in pixels
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Region {
            left,
            top,
            width,
            height,
        }
    }

    /// The X-coordinate immediately after the rightmost pixel (exclusive)
    pub fn end_x(&self) -> u32 {
        self.left + self.width
    }

    /// The Y-coordinate immediately after the bottommost pixel (exclusive)
    pub fn end_y(&self) -> u32 {
        self.top + self.height
    }
}
