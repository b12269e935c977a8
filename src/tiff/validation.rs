//! TIFF validation utilities
//!
//! This module provides validation functions used while walking the
//! IFD chain of potentially malformed streams. All failures here
//! surface as the header error: a stream whose directory chain points
//! outside the stream is invalid as a whole.

use std::io::SeekFrom;

use log::warn;

use crate::io::seekable::SeekableReader;
use crate::tiff::constants::header;
use crate::tiff::errors::{TiffError, TiffResult};

/// Validates an IFD offset to ensure it's within stream bounds
///
/// # Arguments
/// * `offset` - The offset to validate
/// * `stream_size` - The stream size for validation
///
/// # Returns
/// Ok if the offset is valid, the header error otherwise
pub fn validate_ifd_offset(offset: u64, stream_size: u64) -> TiffResult<()> {
    if offset < header::HEADER_SIZE || offset >= stream_size {
        warn!(
            "IFD offset {} outside stream bounds (size {})",
            offset, stream_size
        );
        return Err(TiffError::InvalidHeader);
    }

    Ok(())
}

/// Gets the stream size for validation purposes
///
/// Seeks to the end to measure the stream, then restores the cursor.
///
/// # Arguments
/// * `reader` - The seekable reader to use
///
/// # Returns
/// The stream size in bytes
pub fn get_stream_size(reader: &mut dyn SeekableReader) -> TiffResult<u64> {
    let current_position = reader.seek(SeekFrom::Current(0))?;
    let stream_size = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(current_position))?;

    Ok(stream_size)
}
