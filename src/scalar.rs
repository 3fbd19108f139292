//! 16-bit scalar codec.
//!
//! Every integer in an object file is an unsigned 16-bit word in network
//! (big-endian) byte order, whatever the host's own byte order is.

use bytes::{Buf, BufMut};

use crate::error::{ObjectError, Result};

/// Encoded width of a word in bytes.
pub const WORD_SIZE: usize = 2;

/// Read one big-endian word, consuming exactly two bytes.
pub fn read_u16<B: Buf>(src: &mut B) -> Result<u16> {
    if src.remaining() < WORD_SIZE {
        return Err(ObjectError::TruncatedInput {
            needed: WORD_SIZE,
            remaining: src.remaining(),
        });
    }
    Ok(src.get_u16())
}

/// Write one word in big-endian order.
pub fn write_u16<B: BufMut>(dst: &mut B, value: u16) {
    dst.put_u16(value);
}

/// Convert a collection length into a 16-bit count, if it fits.
pub fn count_u16(len: usize) -> Option<u16> {
    u16::try_from(len).ok()
}
