//! The 'RGB' photometric interpretation, optimized for 8-bit full
//! color images
//!
//! Assumes byte-aligned, non-padded triplets and skips bit-cursor
//! logic entirely for throughput. Output is bit-identical to the
//! generic RGB path given a [8,8,8] bit-depth profile; the differential
//! test in `decode/tests` holds the two paths to that.

use crate::pixel::{PixelBuffer, PixelSink, Region};
use crate::tiff::errors::{TiffError, TiffResult};

/// Decodes 8-bit RGB triplets into the destination region
///
/// # Arguments
/// * `data` - Raw sample bytes, three per pixel, row-major
/// * `buffer` - The destination pixel buffer
/// * `region` - The rectangle of the destination to write
pub fn decode<P: PixelSink>(
    data: &[u8],
    buffer: &mut PixelBuffer<P>,
    region: Region,
) -> TiffResult<()> {
    buffer.check_region(&region)?;

    let mut offset = 0usize;
    for y in region.top..region.end_y() {
        for x in region.left..region.end_x() {
            let triplet = data.get(offset..offset + 3).ok_or_else(|| {
                TiffError::DecodingError("sample data exhausted mid-pixel".to_string())
            })?;
            buffer.set(x, y, P::from_rgba(triplet[0], triplet[1], triplet[2], 255));
            offset += 3;
        }
    }

    Ok(())
}
