pub mod io;
pub mod tiff;
pub mod pixel;
pub mod decode;
pub mod compression;
pub mod color;

pub use crate::tiff::{RasterDescriptor, TiffError, TiffReader, TiffResult};
pub use crate::pixel::{PixelBuffer, PixelSink, Region, Rgba8};
pub use crate::decode::ImageDecoder;
pub use crate::color::ColorSpaceConverter;
