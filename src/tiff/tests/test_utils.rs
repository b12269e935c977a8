//! Shared builders for in-memory TIFF test streams

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

/// Endianness selector for the stream builders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

pub fn write_u16(buffer: &mut Vec<u8>, endian: Endian, value: u16) {
    match endian {
        Endian::Little => buffer.write_u16::<LittleEndian>(value).unwrap(),
        Endian::Big => buffer.write_u16::<BigEndian>(value).unwrap(),
    }
}

pub fn write_u32(buffer: &mut Vec<u8>, endian: Endian, value: u32) {
    match endian {
        Endian::Little => buffer.write_u32::<LittleEndian>(value).unwrap(),
        Endian::Big => buffer.write_u32::<BigEndian>(value).unwrap(),
    }
}

/// Writes a TIFF header with arbitrary marker and magic values
pub fn write_header(buffer: &mut Vec<u8>, endian: Endian, marker: u16, magic: u16, first_ifd: u32) {
    write_u16(buffer, endian, marker);
    write_u16(buffer, endian, magic);
    write_u32(buffer, endian, first_ifd);
}

/// Writes a well-formed header for the given endianness
pub fn write_valid_header(buffer: &mut Vec<u8>, endian: Endian, first_ifd: u32) {
    let marker = match endian {
        Endian::Little => 0x4949,
        Endian::Big => 0x4D4D,
    };
    write_header(buffer, endian, marker, 42, first_ifd);
}

/// Writes one 12-byte IFD entry with a single inline value
pub fn write_entry(buffer: &mut Vec<u8>, endian: Endian, tag: u16, field_type: u16, count: u32, value: u32) {
    write_u16(buffer, endian, tag);
    write_u16(buffer, endian, field_type);
    write_u32(buffer, endian, count);
    write_u32(buffer, endian, value);
}

/// Writes one 12-byte IFD entry holding a single inline SHORT
///
/// Inline values are left-justified in the 4-byte slot, so a lone
/// SHORT occupies the first two bytes regardless of endianness.
pub fn write_short_entry(buffer: &mut Vec<u8>, endian: Endian, tag: u16, value: u16) {
    write_u16(buffer, endian, tag);
    write_u16(buffer, endian, 3);
    write_u32(buffer, endian, 1);
    write_u16(buffer, endian, value);
    write_u16(buffer, endian, 0);
}

/// Writes a minimal 1x1 grayscale IFD that yields a valid descriptor
///
/// Five entries: dimensions, photometric, strip offset and byte count.
/// `next_offset` lets chain tests wire up termination or cycles.
pub fn write_minimal_gray_ifd(buffer: &mut Vec<u8>, endian: Endian, next_offset: u32) {
    write_u16(buffer, endian, 5); // entry count
    write_entry(buffer, endian, 256, 4, 1, 1); // ImageWidth
    write_entry(buffer, endian, 257, 4, 1, 1); // ImageLength
    write_short_entry(buffer, endian, 262, 1); // PhotometricInterpretation
    write_entry(buffer, endian, 273, 4, 1, 0); // StripOffsets
    write_entry(buffer, endian, 279, 4, 1, 1); // StripByteCounts
    write_u32(buffer, endian, next_offset);
}

/// Byte length of an IFD with `entries` entries
pub fn ifd_len(entries: u32) -> u32 {
    2 + entries * 12 + 4
}
