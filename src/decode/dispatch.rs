//! Photometric decoder selection
//!
//! A pure mapping from IFD metadata (photometric tag, bit-depth
//! profile, channel count) to the decoder strategy to run. The factory
//! shape follows the compression factory, but the result is an enum
//! rather than a boxed trait object because decoding is generic over
//! the destination pixel type.

use crate::decode::{cmyk, grayscale, palette, rgb, rgb888, ycbcr};
use crate::pixel::{PixelBuffer, PixelSink, Region};
use crate::tiff::constants::photometric;
use crate::tiff::descriptor::RasterDescriptor;
use crate::tiff::errors::{TiffError, TiffResult};

/// The decode strategy selected for one raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderStrategy {
    /// Byte-aligned 8-bit RGB fast path
    Rgb888,
    /// Generic N-bit RGB path
    RgbN,
    /// Single-channel grayscale, optionally inverted
    Grayscale {
        /// Photometric tag 0: minimum value is white
        white_is_zero: bool,
    },
    /// Color-map indexed
    Palette,
    /// Four-channel subtractive
    Cmyk,
    /// Luma/chroma with optional subsampling
    YCbCr,
}

/// Widest per-channel sample the bit cursor can extract
const MAX_SAMPLE_BITS: u16 = 32;

/// Widest palette index with a representable color map (2^16 entries)
const MAX_PALETTE_BITS: u16 = 16;

fn bits_in_range(bits_per_sample: &[u16], max: u16) -> bool {
    bits_per_sample.iter().all(|&b| b >= 1 && b <= max)
}

/// Selects the decoder strategy for the given IFD metadata
///
/// # Arguments
/// * `photometric_tag` - The photometric interpretation tag value
/// * `bits_per_sample` - Bit width of each channel
/// * `samples_per_pixel` - Declared channel count
///
/// # Returns
/// The strategy, or `UnsupportedPhotometric` naming the tag for
/// unknown, inconsistent or out-of-range combinations
pub fn select_strategy(
    photometric_tag: u16,
    bits_per_sample: &[u16],
    samples_per_pixel: u16,
) -> TiffResult<DecoderStrategy> {
    match photometric_tag {
        photometric::RGB => {
            if bits_per_sample.len() != 3
                || samples_per_pixel != 3
                || !bits_in_range(bits_per_sample, MAX_SAMPLE_BITS)
            {
                return Err(TiffError::UnsupportedPhotometric(photometric_tag));
            }
            if matches!(bits_per_sample, [8, 8, 8]) {
                Ok(DecoderStrategy::Rgb888)
            } else {
                Ok(DecoderStrategy::RgbN)
            }
        }
        photometric::WHITE_IS_ZERO | photometric::BLACK_IS_ZERO => {
            if bits_per_sample.len() != 1 || !bits_in_range(bits_per_sample, MAX_SAMPLE_BITS) {
                return Err(TiffError::UnsupportedPhotometric(photometric_tag));
            }
            Ok(DecoderStrategy::Grayscale {
                white_is_zero: photometric_tag == photometric::WHITE_IS_ZERO,
            })
        }
        photometric::PALETTE => {
            if bits_per_sample.len() != 1 || !bits_in_range(bits_per_sample, MAX_PALETTE_BITS) {
                return Err(TiffError::UnsupportedPhotometric(photometric_tag));
            }
            Ok(DecoderStrategy::Palette)
        }
        photometric::CMYK => {
            if bits_per_sample.len() != 4
                || samples_per_pixel != 4
                || !bits_in_range(bits_per_sample, MAX_SAMPLE_BITS)
            {
                return Err(TiffError::UnsupportedPhotometric(photometric_tag));
            }
            Ok(DecoderStrategy::Cmyk)
        }
        photometric::YCBCR => {
            // The block layout is byte-oriented; other widths are not decodable here
            if bits_per_sample.iter().any(|&b| b != 8) {
                return Err(TiffError::UnsupportedPhotometric(photometric_tag));
            }
            Ok(DecoderStrategy::YCbCr)
        }
        tag => Err(TiffError::UnsupportedPhotometric(tag)),
    }
}

/// Runs the selected strategy over one block of raw sample bytes
///
/// # Arguments
/// * `strategy` - The strategy selected for this raster
/// * `data` - Decompressed sample bytes covering exactly `region`
/// * `descriptor` - The raster descriptor the strategy was selected for
/// * `buffer` - The destination pixel buffer
/// * `region` - The rectangle of the destination to write
pub fn decode_block<P: PixelSink>(
    strategy: DecoderStrategy,
    data: &[u8],
    descriptor: &RasterDescriptor,
    buffer: &mut PixelBuffer<P>,
    region: Region,
) -> TiffResult<()> {
    match strategy {
        DecoderStrategy::Rgb888 => rgb888::decode(data, buffer, region),
        DecoderStrategy::RgbN => rgb::decode(data, &descriptor.bits_per_sample, buffer, region),
        DecoderStrategy::Grayscale { white_is_zero } => grayscale::decode(
            data,
            &descriptor.bits_per_sample,
            white_is_zero,
            buffer,
            region,
        ),
        DecoderStrategy::Palette => {
            let color_map = descriptor.color_map.as_deref().ok_or_else(|| {
                TiffError::DecodingError("palette image without a color map".to_string())
            })?;
            palette::decode(data, &descriptor.bits_per_sample, color_map, buffer, region)
        }
        DecoderStrategy::Cmyk => cmyk::decode(data, &descriptor.bits_per_sample, buffer, region),
        DecoderStrategy::YCbCr => {
            ycbcr::decode(data, descriptor.chroma_subsampling, buffer, region)
        }
    }
}
