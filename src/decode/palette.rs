//! The palette-color photometric interpretation
//!
//! Samples are indices into the ColorMap tag: three planes of 16-bit
//! values (all reds, then all greens, then all blues), each plane
//! holding 2^bits entries.

use crate::decode::bits::BitCursor;
use crate::pixel::{PixelBuffer, PixelSink, Region};
use crate::tiff::errors::{TiffError, TiffResult};

/// Scales a 16-bit color map entry to 8 bits with rounding
fn scale_map_entry(value: u16) -> u8 {
    ((value as u32 * 255 + 32767) / 65535) as u8
}

/// Decodes palette-indexed samples into the destination region
///
/// # Arguments
/// * `data` - Raw packed index bytes, row-major, rows byte-aligned
/// * `bits_per_sample` - Bit width of the index channel
/// * `color_map` - The ColorMap planes (R, G, B), 3 * 2^bits entries
/// * `buffer` - The destination pixel buffer
/// * `region` - The rectangle of the destination to write
pub fn decode<P: PixelSink>(
    data: &[u8],
    bits_per_sample: &[u16],
    color_map: &[u16],
    buffer: &mut PixelBuffer<P>,
    region: Region,
) -> TiffResult<()> {
    buffer.check_region(&region)?;

    if bits_per_sample.len() != 1 {
        return Err(TiffError::ArgumentError(format!(
            "palette data requires one channel, got {}",
            bits_per_sample.len()
        )));
    }

    let bits = bits_per_sample[0] as u32;
    if !(1..=16).contains(&bits) {
        return Err(TiffError::DecodingError(format!(
            "unsupported palette index width: {} bits",
            bits
        )));
    }
    let entries = 1usize << bits;
    if color_map.len() < entries * 3 {
        return Err(TiffError::DecodingError(format!(
            "color map holds {} values, {} required for {}-bit indices",
            color_map.len(),
            entries * 3,
            bits
        )));
    }

    let mut cursor = BitCursor::new();
    for y in region.top..region.end_y() {
        cursor = cursor.align();
        for x in region.left..region.end_x() {
            let (index, next) = cursor.read(data, bits)?;
            cursor = next;

            let index = index as usize;
            let r = scale_map_entry(color_map[index]);
            let g = scale_map_entry(color_map[entries + index]);
            let b = scale_map_entry(color_map[2 * entries + index]);
            buffer.set(x, y, P::from_rgba(r, g, b, 255));
        }
    }

    Ok(())
}
