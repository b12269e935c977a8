//! Pixel sink capability and the stock RGBA pixel

/// Capability bound for destination pixel types
///
/// Any type constructible from four 8-bit components can receive
/// decoded TIFF data. Decoders are generic over this trait, so the
/// choice of pixel representation is made entirely at compile time.
pub trait PixelSink: Copy {
    /// Builds a pixel from 8-bit red, green, blue and alpha components
    fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self;
}

/// Plain 8-bit-per-channel RGBA pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba8 {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0-255, 255 = opaque)
    pub a: u8,
}

impl Rgba8 {
    /// Creates a new RGBA pixel
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba8 { r, g, b, a }
    }
}

impl PixelSink for Rgba8 {
    fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba8 { r, g, b, a }
    }
}
