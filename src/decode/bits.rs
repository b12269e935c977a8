//! Bit-level sample extraction and normalization
//!
//! Packed TIFF sample data uses per-channel bit widths that need not
//! align to byte boundaries. The cursor here is a small value type
//! that is passed in and returned advanced, never hidden instance
//! state, so the decoders stay reentrant and testable in isolation.

use crate::tiff::errors::{TiffError, TiffResult};

/// Position of the next unread bit in a sample byte buffer
///
/// Samples are extracted most-significant-bit first. Rows never share
/// a byte: callers snap the cursor to the next byte boundary with
/// [`BitCursor::align`] at each row start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitCursor {
    /// Index of the current byte
    pub byte: usize,
    /// Bits already consumed from the current byte (0-7)
    pub bit: u32,
}

impl BitCursor {
    /// Creates a cursor at the start of the buffer
    pub fn new() -> Self {
        BitCursor::default()
    }

    /// Extracts `count` consecutive bits MSB-first
    ///
    /// Accumulates across byte boundaries as needed. Reading past the
    /// end of `data` is a decoding error; the caller aborts the whole
    /// decode.
    ///
    /// # Arguments
    /// * `data` - The packed sample bytes
    /// * `count` - Number of bits to extract (1-32)
    ///
    /// # Returns
    /// The extracted value and the advanced cursor
    pub fn read(self, data: &[u8], count: u32) -> TiffResult<(u32, BitCursor)> {
        debug_assert!(count >= 1 && count <= 32);

        let mut byte = self.byte;
        let mut bit = self.bit;
        let mut remaining = count;
        let mut value: u64 = 0;

        while remaining > 0 {
            let current = *data.get(byte).ok_or_else(|| {
                TiffError::DecodingError("sample data exhausted mid-pixel".to_string())
            })?;

            let available = 8 - bit;
            let take = remaining.min(available);
            let shift = available - take;
            let mask = ((1u16 << take) - 1) as u8;
            let chunk = (current >> shift) & mask;

            value = (value << take) | chunk as u64;

            bit += take;
            if bit == 8 {
                bit = 0;
                byte += 1;
            }
            remaining -= take;
        }

        Ok((value as u32, BitCursor { byte, bit }))
    }

    /// Snaps the cursor forward to the next byte boundary
    ///
    /// A cursor already on a boundary is returned unchanged.
    pub fn align(self) -> BitCursor {
        if self.bit == 0 {
            self
        } else {
            BitCursor {
                byte: self.byte + 1,
                bit: 0,
            }
        }
    }
}

/// Rescales an N-bit sample to an 8-bit channel value
///
/// The rule: `round(value * 255 / (2^bits - 1))` below 8 bits, identity
/// at 8 bits, and a rounding right-shift above 8 bits (clamped, so a
/// full-scale 16-bit sample maps to 255 and not 256).
pub fn normalize(value: u32, bits: u32) -> u8 {
    debug_assert!(bits >= 1 && bits <= 32);

    if bits == 8 {
        return value as u8;
    }

    if bits < 8 {
        let max = (1u32 << bits) - 1;
        return ((value * 255 + max / 2) / max) as u8;
    }

    let shift = bits - 8;
    let rounded = ((value as u64 >> (shift - 1)) + 1) >> 1;
    rounded.min(255) as u8
}
