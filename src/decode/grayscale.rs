//! The grayscale photometric interpretations
//!
//! Covers both WhiteIsZero (tag 0) and BlackIsZero (tag 1); the only
//! difference is an inversion of the normalized channel value.

use crate::decode::bits::{normalize, BitCursor};
use crate::pixel::{PixelBuffer, PixelSink, Region};
use crate::tiff::errors::{TiffError, TiffResult};

/// Decodes single-channel grayscale samples into the destination region
///
/// # Arguments
/// * `data` - Raw packed sample bytes, row-major, rows byte-aligned
/// * `bits_per_sample` - Bit width of the single channel
/// * `white_is_zero` - Inverts the scale (photometric tag 0)
/// * `buffer` - The destination pixel buffer
/// * `region` - The rectangle of the destination to write
pub fn decode<P: PixelSink>(
    data: &[u8],
    bits_per_sample: &[u16],
    white_is_zero: bool,
    buffer: &mut PixelBuffer<P>,
    region: Region,
) -> TiffResult<()> {
    buffer.check_region(&region)?;

    if bits_per_sample.len() != 1 {
        return Err(TiffError::ArgumentError(format!(
            "grayscale data requires one channel, got {}",
            bits_per_sample.len()
        )));
    }

    let bits = bits_per_sample[0] as u32;

    let mut cursor = BitCursor::new();
    for y in region.top..region.end_y() {
        cursor = cursor.align();
        for x in region.left..region.end_x() {
            let (raw, next) = cursor.read(data, bits)?;
            cursor = next;

            let mut luma = normalize(raw, bits);
            if white_is_zero {
                luma = 255 - luma;
            }
            buffer.set(x, y, P::from_rgba(luma, luma, luma, 255));
        }
    }

    Ok(())
}
