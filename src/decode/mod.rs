//! Photometric decoding engine
//!
//! One strategy per photometric interpretation, all sharing the same
//! contract: consume raw sample bytes plus the bit-depth profile and
//! write a rectangle of the destination buffer through the
//! [`PixelSink`](crate::pixel::PixelSink) capability.

pub mod bits;
pub mod cmyk;
pub mod dispatch;
pub mod grayscale;
pub mod image;
pub mod palette;
pub mod rgb;
pub mod rgb888;
pub mod ycbcr;
#[cfg(test)]
mod tests;

pub use dispatch::{decode_block, select_strategy, DecoderStrategy};
pub use image::ImageDecoder;
