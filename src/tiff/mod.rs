//! TIFF container parsing module
//!
//! This module provides structures and functions for reading the TIFF
//! header, walking the IFD chain and deriving per-image raster layout
//! descriptors.

pub mod errors;
pub mod constants;
pub mod ifd;
pub mod reader;
pub mod descriptor;
pub(crate) mod validation;
#[cfg(test)]
mod tests;

pub use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use descriptor::{RasterDescriptor, RasterLayout};
pub use errors::{TiffError, TiffResult};
pub use ifd::{Ifd, IfdEntry};
pub use reader::TiffReader;
