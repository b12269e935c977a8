//! Handler for PackBits compressed data
//!
//! PackBits is the byte-oriented run-length scheme of the TIFF
//! specification: a signed control byte n is followed by n+1 literal
//! bytes when 0 <= n <= 127, or by one byte to repeat 1-n times when
//! -127 <= n <= -1; n == -128 is a no-op.

use crate::tiff::errors::{TiffError, TiffResult};

use super::handler::CompressionHandler;

/// PackBits run-length handler (compression code 32773)
pub struct PackBitsHandler;

impl CompressionHandler for PackBitsHandler {
    fn decompress(&self, data: &[u8]) -> TiffResult<Vec<u8>> {
        let mut output = Vec::with_capacity(data.len() * 2);
        let mut position = 0usize;

        while position < data.len() {
            let control = data[position] as i8;
            position += 1;

            if control == -128 {
                continue;
            }

            if control >= 0 {
                let literal_count = control as usize + 1;
                let literals = data.get(position..position + literal_count).ok_or_else(|| {
                    TiffError::DecodingError("PackBits literal run truncated".to_string())
                })?;
                output.extend_from_slice(literals);
                position += literal_count;
            } else {
                let repeat_count = 1 - control as isize;
                let byte = *data.get(position).ok_or_else(|| {
                    TiffError::DecodingError("PackBits repeat run truncated".to_string())
                })?;
                position += 1;
                output.extend(std::iter::repeat(byte).take(repeat_count as usize));
            }
        }

        Ok(output)
    }

    fn name(&self) -> &'static str {
        "PackBits"
    }

    fn code(&self) -> u64 {
        32773
    }
}
