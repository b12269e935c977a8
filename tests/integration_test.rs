//! End-to-end tests over complete in-memory TIFF streams
//!
//! Each test assembles a real container (header, IFD, sample data),
//! parses it with the public API and checks the decoded pixels.

use std::io::{Cursor, Write};

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use flate2::write::ZlibEncoder;
use flate2::Compression;

use tiffpix::{ImageDecoder, PixelBuffer, Region, Rgba8, TiffError, TiffReader};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Little-endian entry writer
fn entry(buffer: &mut Vec<u8>, tag: u16, field_type: u16, count: u32, value: u32) {
    buffer.write_u16::<LittleEndian>(tag).unwrap();
    buffer.write_u16::<LittleEndian>(field_type).unwrap();
    buffer.write_u32::<LittleEndian>(count).unwrap();
    buffer.write_u32::<LittleEndian>(value).unwrap();
}

/// Builds a little-endian stream holding a single-strip 8-bit RGB image
///
/// Layout: 8-byte header, sample data at offset 8, the IFD right after
/// the data, out-of-line BitsPerSample values after the IFD.
fn build_rgb888_tiff(width: u32, height: u32, samples: &[u8]) -> Vec<u8> {
    assert_eq!(samples.len() as u32, width * height * 3);

    let data_offset = 8u32;
    let ifd_offset = data_offset + samples.len() as u32;
    let bps_offset = ifd_offset + 2 + 8 * 12 + 4;

    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(ifd_offset).unwrap();

    buffer.extend_from_slice(samples);

    buffer.write_u16::<LittleEndian>(8).unwrap(); // entry count
    entry(&mut buffer, 256, 4, 1, width);
    entry(&mut buffer, 257, 4, 1, height);
    entry(&mut buffer, 258, 3, 3, bps_offset);
    entry(&mut buffer, 259, 3, 1, 1);
    entry(&mut buffer, 262, 3, 1, 2);
    entry(&mut buffer, 273, 4, 1, data_offset);
    entry(&mut buffer, 277, 3, 1, 3);
    entry(&mut buffer, 279, 4, 1, samples.len() as u32);
    buffer.write_u32::<LittleEndian>(0).unwrap();

    for _ in 0..3 {
        buffer.write_u16::<LittleEndian>(8).unwrap();
    }

    buffer
}

/// Parses the stream and decodes its first raster into a new buffer
fn decode_first_raster(stream: Vec<u8>) -> PixelBuffer<Rgba8> {
    let mut cursor = Cursor::new(stream);
    let mut reader = TiffReader::new();

    let first_ifd = reader.read_header(&mut cursor).unwrap();
    let descriptors = reader.read_ifd_chain(&mut cursor, first_ifd as u64).unwrap();
    assert_eq!(descriptors.len(), 1);

    let descriptor = &descriptors[0];
    let decoder = ImageDecoder::new(descriptor).unwrap();

    let mut buffer = PixelBuffer::<Rgba8>::new(descriptor.width, descriptor.height);
    decoder.decode_image(&mut cursor, &mut buffer).unwrap();
    buffer
}

#[test]
fn decodes_uncompressed_rgb_image() {
    init_logging();

    let mut samples = Vec::new();
    for i in 0u8..4 {
        samples.extend_from_slice(&[i * 10, i * 10 + 1, i * 10 + 2]);
    }
    let stream = build_rgb888_tiff(2, 2, &samples);

    let buffer = decode_first_raster(stream);

    assert_eq!(buffer.get(0, 0), Rgba8::new(0, 1, 2, 255));
    assert_eq!(buffer.get(1, 0), Rgba8::new(10, 11, 12, 255));
    assert_eq!(buffer.get(0, 1), Rgba8::new(20, 21, 22, 255));
    assert_eq!(buffer.get(1, 1), Rgba8::new(30, 31, 32, 255));
}

#[test]
fn decodes_a_raster_sub_region() {
    // 4x4 ramp image; the middle 2x2 lands at (0, 0) of the output
    let mut samples = Vec::new();
    for i in 0u8..16 {
        samples.extend_from_slice(&[i * 10, i * 10 + 1, i * 10 + 2]);
    }
    let stream = build_rgb888_tiff(4, 4, &samples);

    let mut cursor = Cursor::new(stream);
    let mut reader = TiffReader::new();
    let first_ifd = reader.read_header(&mut cursor).unwrap();
    let descriptors = reader.read_ifd_chain(&mut cursor, first_ifd as u64).unwrap();
    let decoder = ImageDecoder::new(&descriptors[0]).unwrap();

    let mut buffer = PixelBuffer::<Rgba8>::new(2, 2);
    decoder
        .decode_region(&mut cursor, Region::new(1, 1, 2, 2), &mut buffer)
        .unwrap();

    // Raster pixel (x, y) has r = (y * 4 + x) * 10
    assert_eq!(buffer.get(0, 0).r, 50);
    assert_eq!(buffer.get(1, 0).r, 60);
    assert_eq!(buffer.get(0, 1).r, 90);
    assert_eq!(buffer.get(1, 1).r, 100);
}

#[test]
fn rejects_region_outside_the_raster() {
    let samples = vec![0u8; 2 * 2 * 3];
    let stream = build_rgb888_tiff(2, 2, &samples);

    let mut cursor = Cursor::new(stream);
    let mut reader = TiffReader::new();
    let first_ifd = reader.read_header(&mut cursor).unwrap();
    let descriptors = reader.read_ifd_chain(&mut cursor, first_ifd as u64).unwrap();
    let decoder = ImageDecoder::new(&descriptors[0]).unwrap();

    let mut buffer = PixelBuffer::<Rgba8>::new(2, 2);
    let err = decoder
        .decode_region(&mut cursor, Region::new(1, 1, 2, 2), &mut buffer)
        .unwrap_err();
    assert!(matches!(err, TiffError::ArgumentError(_)));
}

#[test]
fn decodes_big_endian_multi_strip_grayscale() {
    init_logging();

    // 2x2 image of 4-bit samples, one strip per row
    let row_data = [0x4Fu8, 0x80];
    let ifd_offset = 10u32;
    let offsets_pos = ifd_offset + 2 + 7 * 12 + 4;
    let counts_pos = offsets_pos + 8;

    let mut buffer = Vec::new();
    buffer.write_u16::<BigEndian>(0x4D4D).unwrap();
    buffer.write_u16::<BigEndian>(42).unwrap();
    buffer.write_u32::<BigEndian>(ifd_offset).unwrap();
    buffer.extend_from_slice(&row_data);

    let be_entry = |buffer: &mut Vec<u8>, tag: u16, field_type: u16, count: u32, value: u32| {
        buffer.write_u16::<BigEndian>(tag).unwrap();
        buffer.write_u16::<BigEndian>(field_type).unwrap();
        buffer.write_u32::<BigEndian>(count).unwrap();
        buffer.write_u32::<BigEndian>(value).unwrap();
    };

    buffer.write_u16::<BigEndian>(7).unwrap();
    be_entry(&mut buffer, 256, 4, 1, 2);
    be_entry(&mut buffer, 257, 4, 1, 2);
    // Inline SHORT values sit in the high bytes of a big-endian slot
    buffer.write_u16::<BigEndian>(258).unwrap();
    buffer.write_u16::<BigEndian>(3).unwrap();
    buffer.write_u32::<BigEndian>(1).unwrap();
    buffer.write_u16::<BigEndian>(4).unwrap();
    buffer.write_u16::<BigEndian>(0).unwrap();
    buffer.write_u16::<BigEndian>(262).unwrap();
    buffer.write_u16::<BigEndian>(3).unwrap();
    buffer.write_u32::<BigEndian>(1).unwrap();
    buffer.write_u16::<BigEndian>(1).unwrap();
    buffer.write_u16::<BigEndian>(0).unwrap();
    be_entry(&mut buffer, 273, 4, 2, offsets_pos);
    be_entry(&mut buffer, 278, 4, 1, 1);
    be_entry(&mut buffer, 279, 4, 2, counts_pos);
    buffer.write_u32::<BigEndian>(0).unwrap();

    buffer.write_u32::<BigEndian>(8).unwrap(); // strip 0 offset
    buffer.write_u32::<BigEndian>(9).unwrap(); // strip 1 offset
    buffer.write_u32::<BigEndian>(1).unwrap();
    buffer.write_u32::<BigEndian>(1).unwrap();

    let decoded = decode_first_raster(buffer);

    assert_eq!(decoded.get(0, 0).r, 68);
    assert_eq!(decoded.get(1, 0).r, 255);
    assert_eq!(decoded.get(0, 1).r, 136);
    assert_eq!(decoded.get(1, 1).r, 0);
}

/// Builds a little-endian single-strip 8-bit grayscale stream with the
/// given compression code and pre-encoded strip bytes
fn build_gray_tiff(width: u32, height: u32, compression: u16, strip: &[u8]) -> Vec<u8> {
    let data_offset = 8u32;
    let ifd_offset = data_offset + strip.len() as u32;

    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(ifd_offset).unwrap();
    buffer.extend_from_slice(strip);

    buffer.write_u16::<LittleEndian>(7).unwrap();
    entry(&mut buffer, 256, 4, 1, width);
    entry(&mut buffer, 257, 4, 1, height);
    entry(&mut buffer, 258, 3, 1, 8);
    entry(&mut buffer, 259, 3, 1, compression as u32);
    entry(&mut buffer, 262, 3, 1, 1);
    entry(&mut buffer, 273, 4, 1, data_offset);
    entry(&mut buffer, 279, 4, 1, strip.len() as u32);
    buffer.write_u32::<LittleEndian>(0).unwrap();

    buffer
}

#[test]
fn decodes_deflate_compressed_strip() {
    let raw = [10u8, 200, 15, 250];

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&raw).unwrap();
    let compressed = encoder.finish().unwrap();

    let stream = build_gray_tiff(4, 1, 8, &compressed);
    let decoded = decode_first_raster(stream);

    assert_eq!(decoded.get(0, 0).r, 10);
    assert_eq!(decoded.get(1, 0).r, 200);
    assert_eq!(decoded.get(2, 0).r, 15);
    assert_eq!(decoded.get(3, 0).r, 250);
}

#[test]
fn decodes_packbits_compressed_strip() {
    // One repeat run: 0xAA four times
    let compressed = [0xFDu8, 0xAA];

    let stream = build_gray_tiff(4, 1, 32773, &compressed);
    let decoded = decode_first_raster(stream);

    for x in 0..4 {
        assert_eq!(decoded.get(x, 0).r, 0xAA);
    }
}

#[test]
fn unsupported_compression_fails_before_decoding() {
    // LZW-tagged stream; the decoder must refuse it up front
    let stream = build_gray_tiff(1, 1, 5, &[0u8]);

    let mut cursor = Cursor::new(stream);
    let mut reader = TiffReader::new();
    let first_ifd = reader.read_header(&mut cursor).unwrap();
    let descriptors = reader.read_ifd_chain(&mut cursor, first_ifd as u64).unwrap();

    let err = ImageDecoder::new(&descriptors[0]).unwrap_err();
    assert!(matches!(err, TiffError::UnsupportedCompression(5)));
}

#[test]
fn decodes_tiled_rgb_image() {
    init_logging();

    // 4x4 image split into four 2x2 tiles, each a solid color
    let tile_colors = [10u8, 60, 110, 160];
    let mut tile_data = Vec::new();
    for color in tile_colors {
        for _ in 0..4 {
            tile_data.extend_from_slice(&[color, 0, 0]);
        }
    }

    let data_offset = 8u32;
    let ifd_offset = data_offset + tile_data.len() as u32;
    let bps_pos = ifd_offset + 2 + 10 * 12 + 4;
    let offsets_pos = bps_pos + 6;
    let counts_pos = offsets_pos + 16;

    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(ifd_offset).unwrap();
    buffer.extend_from_slice(&tile_data);

    buffer.write_u16::<LittleEndian>(10).unwrap();
    entry(&mut buffer, 256, 4, 1, 4);
    entry(&mut buffer, 257, 4, 1, 4);
    entry(&mut buffer, 258, 3, 3, bps_pos);
    entry(&mut buffer, 259, 3, 1, 1);
    entry(&mut buffer, 262, 3, 1, 2);
    entry(&mut buffer, 277, 3, 1, 3);
    entry(&mut buffer, 322, 4, 1, 2);
    entry(&mut buffer, 323, 4, 1, 2);
    entry(&mut buffer, 324, 4, 4, offsets_pos);
    entry(&mut buffer, 325, 4, 4, counts_pos);
    buffer.write_u32::<LittleEndian>(0).unwrap();

    for _ in 0..3 {
        buffer.write_u16::<LittleEndian>(8).unwrap();
    }
    for tile in 0..4u32 {
        buffer.write_u32::<LittleEndian>(data_offset + tile * 12).unwrap();
    }
    for _ in 0..4 {
        buffer.write_u32::<LittleEndian>(12).unwrap();
    }

    let decoded = decode_first_raster(buffer);

    // Each quadrant carries its tile's color
    assert_eq!(decoded.get(0, 0).r, 10);
    assert_eq!(decoded.get(1, 1).r, 10);
    assert_eq!(decoded.get(2, 0).r, 60);
    assert_eq!(decoded.get(3, 1).r, 60);
    assert_eq!(decoded.get(0, 2).r, 110);
    assert_eq!(decoded.get(1, 3).r, 110);
    assert_eq!(decoded.get(2, 2).r, 160);
    assert_eq!(decoded.get(3, 3).r, 160);
}

#[test]
fn tiled_region_decode_crosses_tile_boundaries() {
    // Same tiled image as above, but only the center 2x2 is requested
    let tile_colors = [10u8, 60, 110, 160];
    let mut tile_data = Vec::new();
    for color in tile_colors {
        for _ in 0..4 {
            tile_data.extend_from_slice(&[color, 0, 0]);
        }
    }

    let data_offset = 8u32;
    let ifd_offset = data_offset + tile_data.len() as u32;
    let bps_pos = ifd_offset + 2 + 10 * 12 + 4;
    let offsets_pos = bps_pos + 6;
    let counts_pos = offsets_pos + 16;

    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(ifd_offset).unwrap();
    buffer.extend_from_slice(&tile_data);

    buffer.write_u16::<LittleEndian>(10).unwrap();
    entry(&mut buffer, 256, 4, 1, 4);
    entry(&mut buffer, 257, 4, 1, 4);
    entry(&mut buffer, 258, 3, 3, bps_pos);
    entry(&mut buffer, 259, 3, 1, 1);
    entry(&mut buffer, 262, 3, 1, 2);
    entry(&mut buffer, 277, 3, 1, 3);
    entry(&mut buffer, 322, 4, 1, 2);
    entry(&mut buffer, 323, 4, 1, 2);
    entry(&mut buffer, 324, 4, 4, offsets_pos);
    entry(&mut buffer, 325, 4, 4, counts_pos);
    buffer.write_u32::<LittleEndian>(0).unwrap();

    for _ in 0..3 {
        buffer.write_u16::<LittleEndian>(8).unwrap();
    }
    for tile in 0..4u32 {
        buffer.write_u32::<LittleEndian>(data_offset + tile * 12).unwrap();
    }
    for _ in 0..4 {
        buffer.write_u32::<LittleEndian>(12).unwrap();
    }

    let mut cursor = Cursor::new(buffer);
    let mut reader = TiffReader::new();
    let first_ifd = reader.read_header(&mut cursor).unwrap();
    let descriptors = reader.read_ifd_chain(&mut cursor, first_ifd as u64).unwrap();
    let decoder = ImageDecoder::new(&descriptors[0]).unwrap();

    let mut output = PixelBuffer::<Rgba8>::new(2, 2);
    decoder
        .decode_region(&mut cursor, Region::new(1, 1, 2, 2), &mut output)
        .unwrap();

    assert_eq!(output.get(0, 0).r, 10);
    assert_eq!(output.get(1, 0).r, 60);
    assert_eq!(output.get(0, 1).r, 110);
    assert_eq!(output.get(1, 1).r, 160);
}

#[test]
fn repeated_full_decodes_are_identical() {
    let mut samples = Vec::new();
    for i in 0u8..12 {
        samples.push(i.wrapping_mul(21));
    }
    let stream = build_rgb888_tiff(2, 2, &samples);

    let first = decode_first_raster(stream.clone());
    let second = decode_first_raster(stream);

    assert_eq!(first.pixels(), second.pixels());
}

#[test]
fn invalid_header_reports_the_canonical_message() {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x494D).unwrap();
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap();

    let mut cursor = Cursor::new(buffer);
    let mut reader = TiffReader::new();
    let err = reader.read_header(&mut cursor).unwrap_err();

    assert_eq!(err.to_string(), "Invalid TIFF file header.");
}
