//! Generic pixel output types
//!
//! The decoding engine never commits to a concrete pixel layout: every
//! decoder writes through the [`PixelSink`] capability into a
//! caller-owned [`PixelBuffer`]. [`Rgba8`] is the stock implementation
//! used by the tests and by callers who just want bytes.

mod buffer;
mod region;
mod sink;

pub use buffer::PixelBuffer;
pub use region::Region;
pub use sink::{PixelSink, Rgba8};
