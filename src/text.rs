//! Length-prefixed string codec.
//!
//! Wire layout: `[u16 length][length x u16 unit]`. Each character occupies a
//! full word to keep every field word-aligned for the 16-bit target, but only
//! the low byte may be set. Units map to `char` one-to-one (Latin-1).

use bytes::{Buf, BufMut};

use crate::error::{ObjectError, Result};
use crate::scalar::{count_u16, read_u16, write_u16};

/// Read a length-prefixed string.
///
/// Never reads past the declared length.
pub fn read_text<B: Buf>(src: &mut B) -> Result<String> {
    let len = read_u16(src)?;
    let mut text = String::with_capacity(len as usize);
    for _ in 0..len {
        let unit = read_u16(src)?;
        if unit >> 8 != 0 {
            return Err(ObjectError::InvalidCharacter { unit: unit.into() });
        }
        text.push(char::from(unit as u8));
    }
    Ok(text)
}

/// Check that `text` is encodable, returning its length prefix.
pub fn check_text(text: &str) -> Result<u16> {
    let len = text.chars().count();
    let len = count_u16(len).ok_or(ObjectError::StringTooLong { len })?;
    if let Some(c) = text.chars().find(|c| u32::from(*c) > 0xFF) {
        return Err(ObjectError::InvalidCharacter { unit: c.into() });
    }
    Ok(len)
}

/// Write a length-prefixed string.
///
/// Nothing is written unless the whole string is encodable.
pub fn write_text<B: BufMut>(dst: &mut B, text: &str) -> Result<()> {
    let len = check_text(text)?;

    write_u16(dst, len);
    for c in text.chars() {
        write_u16(dst, u32::from(c) as u16);
    }
    Ok(())
}
