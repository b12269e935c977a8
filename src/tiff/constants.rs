//! TIFF format constants
//!
//! This module defines constants used throughout the TIFF processing code,
//! making the code more readable and maintainable by replacing magic numbers
//! with descriptive names.

/// TIFF header constants
pub mod header {
    /// Standard TIFF version number (42)
    pub const TIFF_VERSION: u16 = 42;

    /// "II" byte order marker for little-endian
    pub const LITTLE_ENDIAN_MARKER: u16 = 0x4949;

    /// "MM" byte order marker for big-endian
    pub const BIG_ENDIAN_MARKER: u16 = 0x4D4D;

    /// Total size of the TIFF header in bytes
    pub const HEADER_SIZE: u64 = 8;
}

/// Field types as defined in the TIFF spec
pub mod field_types {
    pub const BYTE: u16 = 1; // 8-bit unsigned integer
    pub const ASCII: u16 = 2; // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3; // 16-bit unsigned integer
    pub const LONG: u16 = 4; // 32-bit unsigned integer
    pub const RATIONAL: u16 = 5; // Two LONGs: numerator and denominator
    pub const SBYTE: u16 = 6; // 8-bit signed integer
    pub const UNDEFINED: u16 = 7; // 8-bit byte with unspecified format
    pub const SSHORT: u16 = 8; // 16-bit signed integer
    pub const SLONG: u16 = 9; // 32-bit signed integer
    pub const SRATIONAL: u16 = 10; // Two SLONGs: numerator and denominator
    pub const FLOAT: u16 = 11; // Single precision IEEE floating point
    pub const DOUBLE: u16 = 12; // Double precision IEEE floating point
}

/// Standard TIFF tags
pub mod tags {
    pub const IMAGE_WIDTH: u16 = 256; // Width of the image in pixels
    pub const IMAGE_LENGTH: u16 = 257; // Height of the image in pixels
    pub const BITS_PER_SAMPLE: u16 = 258; // Bits per component
    pub const COMPRESSION: u16 = 259; // Compression scheme
    pub const PHOTOMETRIC_INTERPRETATION: u16 = 262; // Color space of image data
    pub const STRIP_OFFSETS: u16 = 273; // Offsets to the data strips
    pub const SAMPLES_PER_PIXEL: u16 = 277; // Number of components per pixel
    pub const ROWS_PER_STRIP: u16 = 278; // Rows per strip of data
    pub const STRIP_BYTE_COUNTS: u16 = 279; // Byte counts for strips
    pub const PLANAR_CONFIGURATION: u16 = 284; // How components are stored
    pub const COLOR_MAP: u16 = 320; // Colormap for palette color images
    pub const TILE_WIDTH: u16 = 322; // Width of a tile
    pub const TILE_LENGTH: u16 = 323; // Length of a tile
    pub const TILE_OFFSETS: u16 = 324; // Offsets to the data tiles
    pub const TILE_BYTE_COUNTS: u16 = 325; // Byte counts for tiles
    pub const YCBCR_SUBSAMPLING: u16 = 530; // Chroma subsampling factors
}

/// Compression types
pub mod compression {
    pub const NONE: u64 = 1; // No compression
    pub const LZW: u64 = 5; // LZW compression
    pub const JPEG: u64 = 7; // JPEG compression
    pub const DEFLATE: u64 = 8; // Adobe Deflate (zlib)
    pub const PACKBITS: u64 = 32773; // PackBits compression
}

/// Photometric interpretation values
pub mod photometric {
    pub const WHITE_IS_ZERO: u16 = 0; // Minimum value is white
    pub const BLACK_IS_ZERO: u16 = 1; // Minimum value is black
    pub const RGB: u16 = 2; // RGB color model
    pub const PALETTE: u16 = 3; // Palette color (color map indexed)
    pub const TRANSPARENCY_MASK: u16 = 4; // Transparency mask
    pub const CMYK: u16 = 5; // CMYK color model
    pub const YCBCR: u16 = 6; // YCbCr color model
}

/// Planar configuration values
pub mod planar {
    pub const CHUNKY: u64 = 1; // Components interleaved per pixel
    pub const PLANAR: u64 = 2; // Components in separate planes
}
