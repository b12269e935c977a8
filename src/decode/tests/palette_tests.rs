//! Tests for the palette-color decoder

use crate::decode::palette;
use crate::pixel::{PixelBuffer, Region, Rgba8};
use crate::tiff::errors::TiffError;

#[test]
fn resolves_indices_through_the_color_map() {
    // 1-bit indices; map planes: R = [0, FFFF], G = [8000, 4000], B = [0, FFFF]
    let color_map = [0x0000, 0xFFFF, 0x8000, 0x4000, 0x0000, 0xFFFF];
    let data = [0b1000_0000]; // indices 1, 0
    let mut buffer = PixelBuffer::<Rgba8>::new(2, 1);

    palette::decode(&data, &[1], &color_map, &mut buffer, Region::new(0, 0, 2, 1)).unwrap();

    assert_eq!(buffer.get(0, 0), Rgba8::new(255, 64, 255, 255));
    assert_eq!(buffer.get(1, 0), Rgba8::new(0, 128, 0, 255));
}

#[test]
fn scales_map_entries_with_rounding() {
    let color_map = [0x7FFF, 0x8000, 0x0101, 0xFEFE, 0x0000, 0xFFFF];
    let data = [0b0100_0000]; // indices 0, 1
    let mut buffer = PixelBuffer::<Rgba8>::new(2, 1);

    palette::decode(&data, &[1], &color_map, &mut buffer, Region::new(0, 0, 2, 1)).unwrap();

    // Mid-scale entries round to the nearest 8-bit value
    assert_eq!(buffer.get(0, 0), Rgba8::new(127, 1, 0, 255));
    assert_eq!(buffer.get(1, 0), Rgba8::new(128, 254, 255, 255));
}

#[test]
fn rejects_undersized_color_map() {
    // 2-bit indices require 3 * 4 entries; only 6 given
    let color_map = [0u16; 6];
    let mut buffer = PixelBuffer::<Rgba8>::new(1, 1);

    let err = palette::decode(&[0], &[2], &color_map, &mut buffer, Region::new(0, 0, 1, 1))
        .unwrap_err();
    assert!(matches!(err, TiffError::DecodingError(_)));
}

#[test]
fn rejects_out_of_range_index_width() {
    let color_map = [0u16; 6];
    let mut buffer = PixelBuffer::<Rgba8>::new(1, 1);

    let err = palette::decode(&[0], &[65], &color_map, &mut buffer, Region::new(0, 0, 1, 1))
        .unwrap_err();
    assert!(matches!(err, TiffError::DecodingError(_)));
}

#[test]
fn four_bit_indices_walk_nibbles() {
    // 4-bit indices with a grayscale ramp map
    let mut color_map = Vec::new();
    for _plane in 0..3 {
        for i in 0u32..16 {
            color_map.push((i * 65535 / 15) as u16);
        }
    }

    let data = [0x0F, 0x80];
    let mut buffer = PixelBuffer::<Rgba8>::new(4, 1);

    palette::decode(&data, &[4], &color_map, &mut buffer, Region::new(0, 0, 4, 1)).unwrap();

    assert_eq!(buffer.get(0, 0).r, 0);
    assert_eq!(buffer.get(1, 0).r, 255);
    assert_eq!(buffer.get(2, 0).r, 136);
    assert_eq!(buffer.get(3, 0).r, 0);
}
