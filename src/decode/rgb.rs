//! The 'RGB' photometric interpretation at arbitrary bit depths
//!
//! Maintains a bit cursor per row; each channel is extracted MSB-first
//! at its declared width and normalized to 8 bits. The cursor snaps to
//! the next byte boundary at every row start, since packed samples
//! never span a row boundary.

use crate::decode::bits::{normalize, BitCursor};
use crate::pixel::{PixelBuffer, PixelSink, Region};
use crate::tiff::errors::{TiffError, TiffResult};

/// Decodes N-bit RGB samples into the destination region
///
/// # Arguments
/// * `data` - Raw packed sample bytes, row-major, rows byte-aligned
/// * `bits_per_sample` - Bit width of each of the three channels
/// * `buffer` - The destination pixel buffer
/// * `region` - The rectangle of the destination to write
pub fn decode<P: PixelSink>(
    data: &[u8],
    bits_per_sample: &[u16],
    buffer: &mut PixelBuffer<P>,
    region: Region,
) -> TiffResult<()> {
    buffer.check_region(&region)?;

    if bits_per_sample.len() != 3 {
        return Err(TiffError::ArgumentError(format!(
            "RGB data requires three channels, got {}",
            bits_per_sample.len()
        )));
    }

    let bits = [
        bits_per_sample[0] as u32,
        bits_per_sample[1] as u32,
        bits_per_sample[2] as u32,
    ];

    let mut cursor = BitCursor::new();
    for y in region.top..region.end_y() {
        cursor = cursor.align();
        for x in region.left..region.end_x() {
            let (r_raw, next) = cursor.read(data, bits[0])?;
            let (g_raw, next) = next.read(data, bits[1])?;
            let (b_raw, next) = next.read(data, bits[2])?;
            cursor = next;

            let r = normalize(r_raw, bits[0]);
            let g = normalize(g_raw, bits[1]);
            let b = normalize(b_raw, bits[2]);
            buffer.set(x, y, P::from_rgba(r, g, b, 255));
        }
    }

    Ok(())
}
