//! The YCbCr photometric interpretation
//!
//! Chunky YCbCr data is stored in subsampled blocks: for subsampling
//! factors (h, v), each block carries h*v luma samples row-major,
//! followed by one Cb and one Cr shared by the whole block. Blocks walk
//! the image left-to-right, top-to-bottom; edge blocks are padded in
//! the data and clipped on write. Conversion uses the BT.601 matrix
//! with full-range chroma centered at 128, the TIFF default.

use crate::pixel::{PixelBuffer, PixelSink, Region};
use crate::tiff::errors::{TiffError, TiffResult};

/// Converts one YCbCr sample set to RGB (BT.601, full range)
fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> (u8, u8, u8) {
    let y = y as f32;
    let cb = cb as f32 - 128.0;
    let cr = cr as f32 - 128.0;

    let r = y + 1.402 * cr;
    let g = y - 0.344136 * cb - 0.714136 * cr;
    let b = y + 1.772 * cb;

    (
        r.round().clamp(0.0, 255.0) as u8,
        g.round().clamp(0.0, 255.0) as u8,
        b.round().clamp(0.0, 255.0) as u8,
    )
}

/// Decodes 8-bit YCbCr samples into the destination region
///
/// # Arguments
/// * `data` - Raw sample bytes in subsampled block order
/// * `subsampling` - Chroma subsampling factors (horizontal, vertical)
/// * `buffer` - The destination pixel buffer
/// * `region` - The rectangle of the destination to write
pub fn decode<P: PixelSink>(
    data: &[u8],
    subsampling: (u16, u16),
    buffer: &mut PixelBuffer<P>,
    region: Region,
) -> TiffResult<()> {
    buffer.check_region(&region)?;

    let (h, v) = (subsampling.0 as u32, subsampling.1 as u32);
    if h == 0 || v == 0 {
        return Err(TiffError::DecodingError(format!(
            "invalid chroma subsampling factors ({}, {})",
            subsampling.0, subsampling.1
        )));
    }

    let blocks_across = (region.width + h - 1) / h;
    let blocks_down = (region.height + v - 1) / v;
    let block_len = (h * v + 2) as usize;

    let mut offset = 0usize;
    for by in 0..blocks_down {
        for bx in 0..blocks_across {
            let block = data.get(offset..offset + block_len).ok_or_else(|| {
                TiffError::DecodingError("sample data exhausted mid-block".to_string())
            })?;
            offset += block_len;

            let cb = block[(h * v) as usize];
            let cr = block[(h * v + 1) as usize];

            for j in 0..v {
                for i in 0..h {
                    let px = bx * h + i;
                    let py = by * v + j;
                    // Edge blocks carry padding samples past the image
                    if px >= region.width || py >= region.height {
                        continue;
                    }

                    let luma = block[(j * h + i) as usize];
                    let (r, g, b) = ycbcr_to_rgb(luma, cb, cr);
                    buffer.set(region.left + px, region.top + py, P::from_rgba(r, g, b, 255));
                }
            }
        }
    }

    Ok(())
}
