//! Factory for creating compression handlers

use crate::tiff::constants::compression;
use crate::tiff::errors::{TiffError, TiffResult};

use super::deflate::AdobeDeflateHandler;
use super::handler::CompressionHandler;
use super::packbits::PackBitsHandler;
use super::uncompressed::UncompressedHandler;

/// Factory for creating compression handlers
pub struct CompressionFactory;

impl CompressionFactory {
    /// Create a compression handler for the given compression code
    ///
    /// Recognized-but-unimplemented codes (LZW, JPEG, fax) fail with
    /// `UnsupportedCompression` just like unknown ones; the error names
    /// the code either way.
    pub fn create_handler(code: u64) -> TiffResult<Box<dyn CompressionHandler>> {
        match code {
            compression::NONE => Ok(Box::new(UncompressedHandler)),
            compression::DEFLATE => Ok(Box::new(AdobeDeflateHandler)),
            compression::PACKBITS => Ok(Box::new(PackBitsHandler)),
            _ => Err(TiffError::UnsupportedCompression(code)),
        }
    }

    /// Get all available compression handlers
    pub fn available_handlers() -> Vec<Box<dyn CompressionHandler>> {
        vec![
            Box::new(UncompressedHandler),
            Box::new(AdobeDeflateHandler),
            Box::new(PackBitsHandler),
        ]
    }
}
