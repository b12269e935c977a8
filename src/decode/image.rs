//! Strip- and tile-based raster assembly
//!
//! This module glues the container metadata to the photometric
//! strategies: it reads each strip or tile described by a raster
//! descriptor, runs it through the compression handler, and decodes it
//! into the caller's pixel buffer. Strips decode straight into the
//! destination; tiles decode into a tile-sized scratch buffer first
//! because the packed-row contract is defined over whole tile rows.

use std::io::SeekFrom;

use log::{debug, info};

use crate::compression::CompressionFactory;
use crate::decode::dispatch::{self, DecoderStrategy};
use crate::io::seekable::SeekableReader;
use crate::pixel::{PixelBuffer, PixelSink, Region};
use crate::tiff::constants::planar;
use crate::tiff::descriptor::{RasterDescriptor, RasterLayout};
use crate::tiff::errors::{TiffError, TiffResult};

/// Decodes the raster described by one IFD into a pixel buffer
#[derive(Debug)]
pub struct ImageDecoder<'a> {
    /// The raster layout to decode
    descriptor: &'a RasterDescriptor,
    /// Strategy selected from the descriptor's metadata
    strategy: DecoderStrategy,
}

impl<'a> ImageDecoder<'a> {
    /// Creates a decoder for the given descriptor
    ///
    /// Fails up front for photometric/compression combinations the
    /// engine does not support, so no partial output is ever produced
    /// for them.
    pub fn new(descriptor: &'a RasterDescriptor) -> TiffResult<Self> {
        if descriptor.planar_configuration != planar::CHUNKY {
            return Err(TiffError::DecodingError(format!(
                "unsupported planar configuration: {}",
                descriptor.planar_configuration
            )));
        }

        let strategy = dispatch::select_strategy(
            descriptor.photometric,
            &descriptor.bits_per_sample,
            descriptor.samples_per_pixel,
        )?;

        // Fail on unknown compression before any strip is touched
        CompressionFactory::create_handler(descriptor.compression)?;

        Ok(ImageDecoder {
            descriptor,
            strategy,
        })
    }

    /// Decodes the full raster into the buffer, anchored at (0, 0)
    ///
    /// # Arguments
    /// * `reader` - The stream holding the raw sample bytes
    /// * `buffer` - Destination buffer, at least raster-sized
    pub fn decode_image<P: PixelSink + Default>(
        &self,
        reader: &mut dyn SeekableReader,
        buffer: &mut PixelBuffer<P>,
    ) -> TiffResult<()> {
        let full = Region::new(0, 0, self.descriptor.width, self.descriptor.height);
        self.decode_region(reader, full, buffer)
    }

    /// Decodes a sub-rectangle of the raster into the buffer
    ///
    /// The source rectangle lands at (0, 0) of the destination, which
    /// must be at least `source.width` by `source.height`.
    ///
    /// # Arguments
    /// * `reader` - The stream holding the raw sample bytes
    /// * `source` - The rectangle of the raster to materialize
    /// * `buffer` - Destination buffer
    pub fn decode_region<P: PixelSink + Default>(
        &self,
        reader: &mut dyn SeekableReader,
        source: Region,
        buffer: &mut PixelBuffer<P>,
    ) -> TiffResult<()> {
        if source.end_x() > self.descriptor.width || source.end_y() > self.descriptor.height {
            return Err(TiffError::ArgumentError(format!(
                "source region {}x{}+{}+{} exceeds raster bounds {}x{}",
                source.width,
                source.height,
                source.left,
                source.top,
                self.descriptor.width,
                self.descriptor.height
            )));
        }
        buffer.check_region(&Region::new(0, 0, source.width, source.height))?;

        match &self.descriptor.layout {
            RasterLayout::Strips {
                rows_per_strip,
                offsets,
                byte_counts,
            } => self.decode_strips(reader, source, buffer, *rows_per_strip, offsets, byte_counts),
            RasterLayout::Tiles {
                tile_width,
                tile_height,
                offsets,
                byte_counts,
            } => self.decode_tiles(
                reader,
                source,
                buffer,
                *tile_width,
                *tile_height,
                offsets,
                byte_counts,
            ),
        }
    }

    /// Reads and decompresses one strip or tile worth of raw bytes
    fn read_block(
        &self,
        reader: &mut dyn SeekableReader,
        offset: u64,
        byte_count: u64,
    ) -> TiffResult<Vec<u8>> {
        let handler = CompressionFactory::create_handler(self.descriptor.compression)?;

        reader.seek(SeekFrom::Start(offset))?;
        let mut compressed = vec![0u8; byte_count as usize];
        reader.read_exact(&mut compressed)?;

        handler.decompress(&compressed)
    }

    fn decode_strips<P: PixelSink + Default>(
        &self,
        reader: &mut dyn SeekableReader,
        source: Region,
        buffer: &mut PixelBuffer<P>,
        rows_per_strip: u32,
        offsets: &[u64],
        byte_counts: &[u64],
    ) -> TiffResult<()> {
        if rows_per_strip == 0 {
            return Err(TiffError::DecodingError(
                "RowsPerStrip must be non-zero".to_string(),
            ));
        }
        if offsets.len() != byte_counts.len() {
            return Err(TiffError::DecodingError(
                "strip offset and byte count tags disagree".to_string(),
            ));
        }

        let width = self.descriptor.width;
        let start_strip = source.top / rows_per_strip;
        let end_strip = (source.end_y() + rows_per_strip - 1) / rows_per_strip;
        info!(
            "Decoding strips {}..{} of {}",
            start_strip,
            end_strip,
            offsets.len()
        );

        for strip in start_strip..end_strip {
            let index = strip as usize;
            if index >= offsets.len() {
                return Err(TiffError::DecodingError(format!(
                    "strip {} missing from offset table of {} entries",
                    strip,
                    offsets.len()
                )));
            }

            let strip_top = strip * rows_per_strip;
            let strip_rows = rows_per_strip.min(self.descriptor.height - strip_top);
            debug!(
                "Strip {} covers rows {}..{}",
                strip,
                strip_top,
                strip_top + strip_rows
            );

            let data = self.read_block(reader, offsets[index], byte_counts[index])?;

            // Full-raster decodes write strips straight into the destination
            let full_raster = source.left == 0
                && source.top == 0
                && source.width == self.descriptor.width
                && source.height == self.descriptor.height;
            if full_raster {
                dispatch::decode_block(
                    self.strategy,
                    &data,
                    self.descriptor,
                    buffer,
                    Region::new(0, strip_top, width, strip_rows),
                )?;
                continue;
            }

            // Decode the whole strip, then keep the requested columns/rows
            let mut scratch = PixelBuffer::<P>::new(width, strip_rows);
            dispatch::decode_block(
                self.strategy,
                &data,
                self.descriptor,
                &mut scratch,
                Region::new(0, 0, width, strip_rows),
            )?;

            blit_intersection(
                &scratch,
                Region::new(0, strip_top, width, strip_rows),
                source,
                buffer,
            );
        }

        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn decode_tiles<P: PixelSink + Default>(
        &self,
        reader: &mut dyn SeekableReader,
        source: Region,
        buffer: &mut PixelBuffer<P>,
        tile_width: u32,
        tile_height: u32,
        offsets: &[u64],
        byte_counts: &[u64],
    ) -> TiffResult<()> {
        if tile_width == 0 || tile_height == 0 {
            return Err(TiffError::DecodingError(
                "tile dimensions must be non-zero".to_string(),
            ));
        }
        if offsets.len() != byte_counts.len() {
            return Err(TiffError::DecodingError(
                "tile offset and byte count tags disagree".to_string(),
            ));
        }

        let tiles_across = (self.descriptor.width + tile_width - 1) / tile_width;

        let start_tile_x = source.left / tile_width;
        let start_tile_y = source.top / tile_height;
        let end_tile_x = (source.end_x() + tile_width - 1) / tile_width;
        let end_tile_y = (source.end_y() + tile_height - 1) / tile_height;
        info!(
            "Decoding tiles ({},{})..({},{})",
            start_tile_x, start_tile_y, end_tile_x, end_tile_y
        );

        for tile_y in start_tile_y..end_tile_y {
            for tile_x in start_tile_x..end_tile_x {
                let index = (tile_y * tiles_across + tile_x) as usize;
                if index >= offsets.len() {
                    return Err(TiffError::DecodingError(format!(
                        "tile {} missing from offset table of {} entries",
                        index,
                        offsets.len()
                    )));
                }

                let data = self.read_block(reader, offsets[index], byte_counts[index])?;

                // Tiles are always full-sized in the data; edge tiles
                // are clipped during the blit
                let mut scratch = PixelBuffer::<P>::new(tile_width, tile_height);
                dispatch::decode_block(
                    self.strategy,
                    &data,
                    self.descriptor,
                    &mut scratch,
                    Region::new(0, 0, tile_width, tile_height),
                )?;

                blit_intersection(
                    &scratch,
                    Region::new(
                        tile_x * tile_width,
                        tile_y * tile_height,
                        tile_width,
                        tile_height,
                    ),
                    source,
                    buffer,
                );
            }
        }

        Ok(())
    }
}

/// Copies the pixels where `placed` intersects `source` into the
/// destination, with the source rectangle anchored at (0, 0)
fn blit_intersection<P: PixelSink>(
    scratch: &PixelBuffer<P>,
    placed: Region,
    source: Region,
    buffer: &mut PixelBuffer<P>,
) {
    let left = placed.left.max(source.left);
    let top = placed.top.max(source.top);
    let right = placed.end_x().min(source.end_x());
    let bottom = placed.end_y().min(source.end_y());

    for y in top..bottom {
        for x in left..right {
            let pixel = scratch.get(x - placed.left, y - placed.top);
            buffer.set(x - source.left, y - source.top, pixel);
        }
    }
}
