//! Image File Directory (IFD) structures and methods
//!
//! This module implements the core TIFF IFD (Image File Directory)
//! structures that store metadata about images in a TIFF stream. IFDs
//! are organized as collections of tag entries, with each tag describing
//! an aspect of the image.

use std::collections::HashMap;
use std::fmt;

use log::trace;

use crate::tiff::constants::{field_types, tags};

/// Represents an Image File Directory (IFD) in a TIFF stream
///
/// An IFD contains metadata about an image, stored as a series of tag
/// entries. TIFF streams can contain multiple IFDs, each describing a
/// separate image in a multipage TIFF.
#[derive(Debug, Clone)]
pub struct Ifd {
    /// Entries in this IFD, in stream order
    pub entries: Vec<IfdEntry>,
    /// IFD number (0-based)
    pub number: usize,
    /// Offset to this IFD in the stream
    pub offset: u64,
    /// Cached tag values for quick lookup
    tag_map: HashMap<u16, IfdEntry>,
}

/// Represents an entry in an Image File Directory (IFD)
///
/// Each entry describes one aspect of the image (dimensions, color
/// space, compression, etc.) using a tag-value pair. The field_type
/// determines how to interpret the value or offset.
#[derive(Debug, Clone)]
pub struct IfdEntry {
    /// TIFF tag identifier
    pub tag: u16,
    /// Field type
    pub field_type: u16,
    /// Number of values
    pub count: u64,
    /// Value or offset to values, interpreted in the stream's byte order
    pub value_offset: u64,
    /// Raw bytes of the 4-byte value slot, needed to resolve
    /// multi-value inline storage
    pub raw_value: [u8; 4],
}

impl IfdEntry {
    /// Creates a new IFD entry
    ///
    /// For small values, value_offset contains the actual value.
    /// For larger values, it contains an offset to where the value is stored.
    pub fn new(tag: u16, field_type: u16, count: u64, value_offset: u64, raw_value: [u8; 4]) -> Self {
        trace!(
            "New IFD entry: tag={}, type={}, count={}, value/offset={}",
            tag,
            field_type,
            count,
            value_offset
        );

        Self {
            tag,
            field_type,
            count,
            value_offset,
            raw_value,
        }
    }

    /// Get the size in bytes of one value of this entry's field type
    pub fn field_type_size(&self) -> usize {
        match self.field_type {
            field_types::BYTE
            | field_types::ASCII
            | field_types::SBYTE
            | field_types::UNDEFINED => 1,
            field_types::SHORT | field_types::SSHORT => 2,
            field_types::LONG | field_types::SLONG | field_types::FLOAT => 4,
            field_types::RATIONAL | field_types::SRATIONAL | field_types::DOUBLE => 8,
            _ => 1,
        }
    }

    /// Determines if the value is stored inline in value_offset
    /// rather than at the offset location
    ///
    /// The TIFF format stores a value directly in the 4-byte value slot
    /// of the entry whenever its total encoded size fits; otherwise the
    /// slot holds an offset to the out-of-line value.
    pub fn is_value_inline(&self) -> bool {
        let total_size = self.field_type_size() as u64 * self.count;
        total_size <= 4
    }
}

impl Ifd {
    /// Creates a new, empty IFD at the given stream offset
    pub fn new(number: usize, offset: u64) -> Self {
        Self {
            entries: Vec::new(),
            number,
            offset,
            tag_map: HashMap::new(),
        }
    }

    /// Adds an entry to this IFD and updates the lookup cache
    pub fn add_entry(&mut self, entry: IfdEntry) {
        self.tag_map.insert(entry.tag, entry.clone());
        self.entries.push(entry);
    }

    /// Gets a tag value (value_offset) directly
    ///
    /// This is a convenience method for quickly retrieving the
    /// value/offset field of a tag without having to access the full
    /// entry. Only meaningful for single-count inline values.
    pub fn get_tag_value(&self, tag: u16) -> Option<u64> {
        self.tag_map.get(&tag).map(|entry| entry.value_offset)
    }

    /// Checks if this IFD has a specific tag
    pub fn has_tag(&self, tag: u16) -> bool {
        self.tag_map.contains_key(&tag)
    }

    /// Gets an IFD entry by tag
    pub fn get_entry(&self, tag: u16) -> Option<&IfdEntry> {
        self.tag_map.get(&tag)
    }

    /// Gets the dimensions of the image described by this IFD
    ///
    /// Returns the width and height of the image if both tags are present.
    pub fn get_dimensions(&self) -> Option<(u64, u64)> {
        let width = self.get_tag_value(tags::IMAGE_WIDTH)?;
        let height = self.get_tag_value(tags::IMAGE_LENGTH)?;
        Some((width, height))
    }

    /// Gets the number of entries in this IFD
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for Ifd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IFD #{} (offset: {})", self.number, self.offset)?;
        writeln!(f, "  Number of entries: {}", self.entries.len())?;

        if let Some((width, height)) = self.get_dimensions() {
            writeln!(f, "  Dimensions: {}x{}", width, height)?;
        }

        for entry in &self.entries {
            writeln!(
                f,
                "    tag {} [type {}] count {} value/offset {}",
                entry.tag, entry.field_type, entry.count, entry.value_offset
            )?;
        }

        Ok(())
    }
}
