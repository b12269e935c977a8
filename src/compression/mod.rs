//! Compression handling for TIFF sample data
//!
//! The decoding engine consumes decompressed sample bytes; this module
//! is the seam where entropy coding plugs in, implemented as strategies
//! selected by the compression tag.

mod deflate;
mod factory;
mod handler;
mod packbits;
mod uncompressed;

pub use deflate::AdobeDeflateHandler;
pub use factory::CompressionFactory;
pub use handler::CompressionHandler;
pub use packbits::PackBitsHandler;
pub use uncompressed::UncompressedHandler;
