//! Per-IFD raster layout descriptors
//!
//! A descriptor is the read-only view of one IFD that the decoding
//! engine consumes: image dimensions, photometric interpretation, the
//! bit-depth profile and where the raw sample bytes live. It is built
//! once, right after the IFD is parsed, so decoding never has to go
//! back to tag-level questions.

use log::debug;

use crate::io::seekable::SeekableReader;
use crate::tiff::constants::{photometric, planar, tags};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::Ifd;
use crate::tiff::reader::TiffReader;

/// Where the raw sample bytes of an image live in the stream
#[derive(Debug, Clone)]
pub enum RasterLayout {
    /// Horizontal bands spanning the full image width
    Strips {
        /// Rows covered by each strip (the last strip may cover fewer)
        rows_per_strip: u32,
        /// Stream offset of each strip
        offsets: Vec<u64>,
        /// Encoded byte count of each strip
        byte_counts: Vec<u64>,
    },
    /// Rectangular blocks in a fixed grid
    Tiles {
        /// Width of every tile in pixels
        tile_width: u32,
        /// Height of every tile in pixels
        tile_height: u32,
        /// Stream offset of each tile, row-major over the tile grid
        offsets: Vec<u64>,
        /// Encoded byte count of each tile
        byte_counts: Vec<u64>,
    },
}

/// Read-only raster metadata derived from one IFD
#[derive(Debug, Clone)]
pub struct RasterDescriptor {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Photometric interpretation tag value
    pub photometric: u16,
    /// Bit width of each channel, in channel order
    pub bits_per_sample: Vec<u16>,
    /// Number of channels per pixel
    pub samples_per_pixel: u16,
    /// Compression tag value
    pub compression: u64,
    /// Planar configuration tag value
    pub planar_configuration: u64,
    /// Strip or tile addressing of the raw sample bytes
    pub layout: RasterLayout,
    /// Palette color map (R plane, G plane, B plane of 16-bit values),
    /// present for palette images
    pub color_map: Option<Vec<u16>>,
    /// YCbCr chroma subsampling factors (horizontal, vertical)
    pub chroma_subsampling: (u16, u16),
}

impl RasterDescriptor {
    /// Derives a raster descriptor from a parsed IFD
    ///
    /// # Arguments
    /// * `reader` - The seekable reader, for out-of-line tag values
    /// * `tiff_reader` - The container reader holding the byte order
    /// * `ifd` - The IFD to derive from
    ///
    /// # Returns
    /// The descriptor, or an error if required raster tags are missing
    pub fn from_ifd(
        reader: &mut dyn SeekableReader,
        tiff_reader: &TiffReader,
        ifd: &Ifd,
    ) -> TiffResult<Self> {
        // Scalar tags go through read_tag_values so SHORT-typed values
        // decode correctly in both byte orders
        let width = read_scalar(reader, tiff_reader, ifd, tags::IMAGE_WIDTH)?
            .ok_or(TiffError::MissingDimensions)? as u32;
        let height = read_scalar(reader, tiff_reader, ifd, tags::IMAGE_LENGTH)?
            .ok_or(TiffError::MissingDimensions)? as u32;

        let photometric = read_scalar(reader, tiff_reader, ifd, tags::PHOTOMETRIC_INTERPRETATION)?
            .ok_or(TiffError::TagNotFound(tags::PHOTOMETRIC_INTERPRETATION))?
            as u16;

        let samples_per_pixel =
            read_scalar(reader, tiff_reader, ifd, tags::SAMPLES_PER_PIXEL)?.unwrap_or(1) as u16;

        let bits_per_sample = if ifd.has_tag(tags::BITS_PER_SAMPLE) {
            tiff_reader
                .read_tag_values(reader, ifd, tags::BITS_PER_SAMPLE)?
                .into_iter()
                .map(|v| v as u16)
                .collect()
        } else {
            // TIFF defaults to bilevel data when the tag is absent
            vec![1; samples_per_pixel as usize]
        };

        let compression = read_scalar(reader, tiff_reader, ifd, tags::COMPRESSION)?.unwrap_or(1);
        let planar_configuration = read_scalar(reader, tiff_reader, ifd, tags::PLANAR_CONFIGURATION)?
            .unwrap_or(planar::CHUNKY);

        let layout = Self::read_layout(reader, tiff_reader, ifd, height)?;

        let color_map = if photometric == photometric::PALETTE {
            let map = tiff_reader
                .read_tag_values(reader, ifd, tags::COLOR_MAP)?
                .into_iter()
                .map(|v| v as u16)
                .collect();
            Some(map)
        } else {
            None
        };

        let chroma_subsampling = if ifd.has_tag(tags::YCBCR_SUBSAMPLING) {
            let factors = tiff_reader.read_tag_values(reader, ifd, tags::YCBCR_SUBSAMPLING)?;
            if factors.len() != 2 {
                return Err(TiffError::DecodingError(
                    "YCbCrSubSampling must hold exactly two factors".to_string(),
                ));
            }
            (factors[0] as u16, factors[1] as u16)
        } else {
            // TIFF default for YCbCr data
            (2, 2)
        };

        debug!(
            "Raster descriptor: {}x{}, photometric {}, {:?} bits, compression {}",
            width, height, photometric, bits_per_sample, compression
        );

        Ok(RasterDescriptor {
            width,
            height,
            photometric,
            bits_per_sample,
            samples_per_pixel,
            compression,
            planar_configuration,
            layout,
            color_map,
            chroma_subsampling,
        })
    }

    /// Reads the strip or tile addressing tags
    fn read_layout(
        reader: &mut dyn SeekableReader,
        tiff_reader: &TiffReader,
        ifd: &Ifd,
        height: u32,
    ) -> TiffResult<RasterLayout> {
        if ifd.has_tag(tags::TILE_OFFSETS) {
            let tile_width = read_scalar(reader, tiff_reader, ifd, tags::TILE_WIDTH)?
                .ok_or(TiffError::TagNotFound(tags::TILE_WIDTH))? as u32;
            let tile_height = read_scalar(reader, tiff_reader, ifd, tags::TILE_LENGTH)?
                .ok_or(TiffError::TagNotFound(tags::TILE_LENGTH))? as u32;
            let offsets = tiff_reader.read_tag_values(reader, ifd, tags::TILE_OFFSETS)?;
            let byte_counts = tiff_reader.read_tag_values(reader, ifd, tags::TILE_BYTE_COUNTS)?;

            return Ok(RasterLayout::Tiles {
                tile_width,
                tile_height,
                offsets,
                byte_counts,
            });
        }

        let rows_per_strip =
            read_scalar(reader, tiff_reader, ifd, tags::ROWS_PER_STRIP)?.unwrap_or(height as u64) as u32;
        let offsets = tiff_reader.read_tag_values(reader, ifd, tags::STRIP_OFFSETS)?;
        let byte_counts = tiff_reader.read_tag_values(reader, ifd, tags::STRIP_BYTE_COUNTS)?;

        Ok(RasterLayout::Strips {
            rows_per_strip,
            offsets,
            byte_counts,
        })
    }

    /// Sum of the per-channel bit widths, i.e. bits per packed pixel
    pub fn bits_per_pixel(&self) -> u32 {
        self.bits_per_sample.iter().map(|&b| b as u32).sum()
    }
}

/// Reads the first value of a tag, or None when the tag is absent
fn read_scalar(
    reader: &mut dyn SeekableReader,
    tiff_reader: &TiffReader,
    ifd: &Ifd,
    tag: u16,
) -> TiffResult<Option<u64>> {
    if !ifd.has_tag(tag) {
        return Ok(None);
    }

    let values = tiff_reader.read_tag_values(reader, ifd, tag)?;
    Ok(values.into_iter().next())
}
