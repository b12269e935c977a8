//! The CMYK photometric interpretation
//!
//! Four subtractive channels per pixel; conversion to RGB uses the
//! standard formula `r = (255 - c) * (255 - k) / 255` per channel.

use crate::decode::bits::{normalize, BitCursor};
use crate::pixel::{PixelBuffer, PixelSink, Region};
use crate::tiff::errors::{TiffError, TiffResult};

/// Converts one normalized CMYK sample set to RGB
fn cmyk_to_rgb(c: u8, m: u8, y: u8, k: u8) -> (u8, u8, u8) {
    let white = 255 - k as u32;
    let r = ((255 - c as u32) * white / 255) as u8;
    let g = ((255 - m as u32) * white / 255) as u8;
    let b = ((255 - y as u32) * white / 255) as u8;
    (r, g, b)
}

/// Decodes N-bit CMYK samples into the destination region
///
/// # Arguments
/// * `data` - Raw packed sample bytes, row-major, rows byte-aligned
/// * `bits_per_sample` - Bit width of each of the four channels
/// * `buffer` - The destination pixel buffer
/// * `region` - The rectangle of the destination to write
pub fn decode<P: PixelSink>(
    data: &[u8],
    bits_per_sample: &[u16],
    buffer: &mut PixelBuffer<P>,
    region: Region,
) -> TiffResult<()> {
    buffer.check_region(&region)?;

    if bits_per_sample.len() != 4 {
        return Err(TiffError::ArgumentError(format!(
            "CMYK data requires four channels, got {}",
            bits_per_sample.len()
        )));
    }

    let bits = [
        bits_per_sample[0] as u32,
        bits_per_sample[1] as u32,
        bits_per_sample[2] as u32,
        bits_per_sample[3] as u32,
    ];

    let mut cursor = BitCursor::new();
    for py in region.top..region.end_y() {
        cursor = cursor.align();
        for px in region.left..region.end_x() {
            let (c_raw, next) = cursor.read(data, bits[0])?;
            let (m_raw, next) = next.read(data, bits[1])?;
            let (y_raw, next) = next.read(data, bits[2])?;
            let (k_raw, next) = next.read(data, bits[3])?;
            cursor = next;

            let c = normalize(c_raw, bits[0]);
            let m = normalize(m_raw, bits[1]);
            let y = normalize(y_raw, bits[2]);
            let k = normalize(k_raw, bits[3]);
            let (r, g, b) = cmyk_to_rgb(c, m, y, k);
            buffer.set(px, py, P::from_rgba(r, g, b, 255));
        }
    }

    Ok(())
}
