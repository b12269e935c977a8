//! TIFF stream reader implementation
//!
//! This module implements the TIFF container parser that uses the
//! Strategy pattern to handle different byte orders. It validates the
//! 8-byte header, walks the chain of Image File Directories and
//! derives a raster descriptor for each of them.

use std::collections::HashSet;
use std::io::{Cursor, SeekFrom};

use log::{debug, info, trace};

use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::{field_types, header};
use crate::tiff::descriptor::RasterDescriptor;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::{Ifd, IfdEntry};
use crate::tiff::validation;

/// Reader for classic TIFF streams
///
/// The reader is stateful only in the byte order discovered from the
/// header; everything else is threaded through explicitly so one
/// reader can parse any number of streams of the same endianness.
pub struct TiffReader {
    /// Current byte order handler, set by read_header
    byte_order_handler: Option<Box<dyn ByteOrderHandler>>,
    /// Detected byte order
    byte_order: Option<ByteOrder>,
}

impl TiffReader {
    /// Creates a new TIFF reader
    pub fn new() -> Self {
        TiffReader {
            byte_order_handler: None,
            byte_order: None,
        }
    }

    /// Returns the byte order handler, with proper error handling for
    /// the not-yet-determined case
    fn handler(&self) -> TiffResult<&dyn ByteOrderHandler> {
        self.byte_order_handler
            .as_deref()
            .ok_or_else(|| TiffError::ArgumentError("byte order not yet determined".to_string()))
    }

    /// Returns the byte order detected by read_header, if any
    pub fn byte_order(&self) -> Option<ByteOrder> {
        self.byte_order
    }

    /// Reads and validates the 8-byte TIFF header
    ///
    /// The header is a 2-byte byte-order marker, a 2-byte magic number
    /// that must equal 42 under that byte order, and the 4-byte offset
    /// of the first IFD. A bad marker or magic number invalidates the
    /// stream as a whole.
    ///
    /// # Arguments
    /// * `reader` - The seekable reader positioned at the stream start
    ///
    /// # Returns
    /// The offset of the first IFD
    pub fn read_header(&mut self, reader: &mut dyn SeekableReader) -> TiffResult<u32> {
        let byte_order = ByteOrder::detect(reader)?;
        debug!("Detected byte order: {}", byte_order.name());

        let handler = byte_order.create_handler();

        let magic = handler.read_u16(reader)?;
        if magic != header::TIFF_VERSION {
            return Err(TiffError::InvalidHeader);
        }

        let first_ifd_offset = handler.read_u32(reader)?;
        debug!("First IFD offset: {}", first_ifd_offset);

        self.byte_order = Some(byte_order);
        self.byte_order_handler = Some(handler);

        Ok(first_ifd_offset)
    }

    /// Reads the IFD chain and derives a raster descriptor per IFD
    ///
    /// Starting at `first_ifd_offset`, repeatedly reads an entry count,
    /// that many 12-byte entries and the 4-byte next-IFD offset,
    /// terminating when the next offset is 0. A missing first IFD, an
    /// offset outside the stream, or a revisited offset (cycle) all
    /// invalidate the stream.
    ///
    /// # Arguments
    /// * `reader` - The seekable reader to use
    /// * `first_ifd_offset` - Offset of the first IFD in the chain
    ///
    /// # Returns
    /// One raster descriptor per IFD, in chain order
    pub fn read_ifd_chain(
        &self,
        reader: &mut dyn SeekableReader,
        first_ifd_offset: u64,
    ) -> TiffResult<Vec<RasterDescriptor>> {
        if first_ifd_offset == 0 {
            return Err(TiffError::InvalidHeader);
        }

        let stream_size = validation::get_stream_size(reader)?;
        let mut descriptors = Vec::new();
        let mut visited: HashSet<u64> = HashSet::new();
        let mut ifd_offset = first_ifd_offset;
        let mut ifd_number = 0;

        while ifd_offset != 0 {
            validation::validate_ifd_offset(ifd_offset, stream_size)?;

            // Cycle guard: a chain that revisits an offset would loop forever
            if !visited.insert(ifd_offset) {
                return Err(TiffError::InvalidHeader);
            }

            debug!("Reading IFD #{} at offset {}", ifd_number, ifd_offset);
            let (ifd, next_ifd_offset) = self.read_ifd(reader, ifd_offset, ifd_number)?;

            let descriptor = RasterDescriptor::from_ifd(reader, self, &ifd)?;
            descriptors.push(descriptor);

            trace!("Next IFD offset: {}", next_ifd_offset);
            ifd_offset = next_ifd_offset;
            ifd_number += 1;
        }

        info!("Read {} IFDs from TIFF stream", descriptors.len());
        Ok(descriptors)
    }

    /// Reads a single IFD at the given offset
    ///
    /// An IFD (Image File Directory) contains all the metadata for a
    /// single image. It consists of an entry count followed by a series
    /// of entries, each describing an aspect of the image, and the
    /// offset of the next IFD (0 for the last one).
    ///
    /// # Arguments
    /// * `reader` - The seekable reader to use
    /// * `offset` - Offset in the stream where the IFD starts
    /// * `number` - The index of this IFD in the stream
    ///
    /// # Returns
    /// The parsed IFD and the offset of the next IFD
    pub fn read_ifd(
        &self,
        reader: &mut dyn SeekableReader,
        offset: u64,
        number: usize,
    ) -> TiffResult<(Ifd, u64)> {
        reader.seek(SeekFrom::Start(offset))?;
        let handler = self.handler()?;

        let entry_count = handler.read_u16(reader)?;
        trace!("IFD entry count: {}", entry_count);

        let mut ifd = Ifd::new(number, offset);
        for _ in 0..entry_count {
            let entry = self.read_ifd_entry(reader)?;
            ifd.add_entry(entry);
        }

        let next_ifd_offset = handler.read_u32(reader)? as u64;

        debug!("Read IFD #{} with {} entries", number, ifd.entry_count());
        Ok((ifd, next_ifd_offset))
    }

    /// Reads a single 12-byte IFD entry
    ///
    /// The 4-byte value slot is kept verbatim alongside its decoded
    /// interpretation, because inline values smaller than 4 bytes pack
    /// several items into the slot.
    fn read_ifd_entry(&self, reader: &mut dyn SeekableReader) -> TiffResult<IfdEntry> {
        let handler = self.handler()?;

        let tag = handler.read_u16(reader)?;
        let field_type = handler.read_u16(reader)?;
        let count = handler.read_u32(reader)? as u64;

        let mut raw_value = [0u8; 4];
        reader.read_exact(&mut raw_value)?;
        let mut slot = Cursor::new(raw_value);
        let value_offset = handler.read_u32(&mut slot)? as u64;

        Ok(IfdEntry::new(tag, field_type, count, value_offset, raw_value))
    }

    /// Reads a tag's values as a vector of u64
    ///
    /// Resolves the inline-vs-offset storage rule: if the encoded value
    /// fits in the entry's 4-byte slot it is parsed from the slot bytes,
    /// otherwise the slot is an offset to the out-of-line value.
    ///
    /// # Arguments
    /// * `reader` - The seekable reader to use
    /// * `ifd` - The IFD containing the tag
    /// * `tag` - The tag number to read
    ///
    /// # Returns
    /// A vector of values, one per the entry's count
    pub fn read_tag_values(
        &self,
        reader: &mut dyn SeekableReader,
        ifd: &Ifd,
        tag: u16,
    ) -> TiffResult<Vec<u64>> {
        let entry = ifd.get_entry(tag).ok_or(TiffError::TagNotFound(tag))?;
        let handler = self.handler()?;

        let mut values = Vec::with_capacity(entry.count as usize);

        if entry.is_value_inline() {
            let mut slot = Cursor::new(entry.raw_value);
            read_tag_value_array(&mut slot, entry, handler, &mut values)?;
        } else {
            reader.seek(SeekFrom::Start(entry.value_offset))?;
            read_tag_value_array(reader, entry, handler, &mut values)?;
        }

        Ok(values)
    }
}

impl Default for TiffReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads an array of tag values based on the field type
fn read_tag_value_array(
    reader: &mut dyn SeekableReader,
    entry: &IfdEntry,
    handler: &dyn ByteOrderHandler,
    values: &mut Vec<u64>,
) -> TiffResult<()> {
    for _ in 0..entry.count {
        let value = match entry.field_type {
            field_types::BYTE | field_types::SBYTE | field_types::UNDEFINED => {
                let mut byte = [0u8; 1];
                reader.read_exact(&mut byte)?;
                byte[0] as u64
            }
            field_types::SHORT | field_types::SSHORT => handler.read_u16(reader)? as u64,
            field_types::LONG | field_types::SLONG => handler.read_u32(reader)? as u64,
            field_types::RATIONAL | field_types::SRATIONAL => {
                let (num, den) = handler.read_rational(reader)?;
                ((num as u64) << 32) | (den as u64)
            }
            _ => return Err(TiffError::UnsupportedFieldType(entry.field_type)),
        };

        values.push(value);
    }

    Ok(())
}
