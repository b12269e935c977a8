//! Custom error types for TIFF decoding

use std::fmt;
use std::io;

/// TIFF-specific error types
#[derive(Debug)]
pub enum TiffError {
    /// I/O error
    IoError(io::Error),
    /// Malformed or invalid header or IFD chain
    InvalidHeader,
    /// Recognized but unimplemented photometric interpretation
    UnsupportedPhotometric(u16),
    /// Recognized but unimplemented compression method
    UnsupportedCompression(u64),
    /// Unsupported field type in an IFD entry
    UnsupportedFieldType(u16),
    /// Tag not found
    TagNotFound(u16),
    /// Image dimensions not found
    MissingDimensions,
    /// Buffer underrun or overrun during sample extraction
    DecodingError(String),
    /// Precondition violation at an API boundary
    ArgumentError(String),
}

impl fmt::Display for TiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiffError::IoError(e) => write!(f, "I/O error: {}", e),
            TiffError::InvalidHeader => write!(f, "Invalid TIFF file header."),
            TiffError::UnsupportedPhotometric(tag) => {
                write!(f, "Unsupported photometric interpretation: {}", tag)
            }
            TiffError::UnsupportedCompression(c) => {
                write!(f, "Unsupported compression method: {}", c)
            }
            TiffError::UnsupportedFieldType(ft) => write!(f, "Unsupported field type: {}", ft),
            TiffError::TagNotFound(tag) => write!(f, "Tag not found: {}", tag),
            TiffError::MissingDimensions => write!(f, "Image dimensions not found"),
            TiffError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            TiffError::ArgumentError(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for TiffError {}

impl From<io::Error> for TiffError {
    fn from(error: io::Error) -> Self {
        TiffError::IoError(error)
    }
}

/// Result type for TIFF operations
pub type TiffResult<T> = Result<T, TiffError>;
