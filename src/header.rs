//! Object file header and version negotiation.
//!
//! The header is two length-prefixed strings: the magic token, then the format
//! version as a decimal string. Both are checked before any section is read.
//!
//! The version number only gates the body layout. The header shape itself is
//! versioned separately (by the magic token), so supporting a new body layout
//! means widening `MIN_VERSION..=MAX_VERSION` and adding a `FormatVersion`
//! variant, not touching the header. Earlier layouts (null-terminated strings
//! without a header, or headers without a version range) are rejected here.

use bytes::{Buf, BufMut};

use crate::error::{ObjectError, Result};
use crate::scalar::{read_u16, WORD_SIZE};
use crate::text::{read_text, write_text};

/// Token every object file starts with.
pub const MAGIC: &str = "GALAXYOBJ";

/// Oldest format version this crate reads.
pub const MIN_VERSION: i64 = FormatVersion::OLDEST.number();

/// Newest format version this crate reads.
pub const MAX_VERSION: i64 = FormatVersion::CURRENT.number();

/// A body layout this crate knows how to read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatVersion {
    /// Exports, imports, used labels, object code; each section count-prefixed.
    V1,
}

impl FormatVersion {
    /// The oldest layout `from_number` still maps.
    pub const OLDEST: FormatVersion = FormatVersion::V1;

    /// The version written by `encode`.
    pub const CURRENT: FormatVersion = FormatVersion::V1;

    pub const fn number(self) -> i64 {
        match self {
            FormatVersion::V1 => 1,
        }
    }

    /// Numbers are contiguous: every value in `MIN_VERSION..=MAX_VERSION` has an arm.
    pub fn from_number(version: i64) -> Option<Self> {
        match version {
            1 => Some(FormatVersion::V1),
            _ => None,
        }
    }

    /// Zero-padded decimal form stored in the header, e.g. `"0001"`.
    pub fn version_string(self) -> String {
        format!("{:04}", self.number())
    }
}

/// Parse a version string the way C's `atoi` does.
///
/// Leading whitespace and one sign are accepted, then decimal digits up to the
/// first non-digit. A string with no digits parses as 0. Overflow saturates.
pub fn parse_version(text: &str) -> i64 {
    let text = text.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b');
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(digit - b'0'));
    }
    if negative {
        -value
    } else {
        value
    }
}

/// Match the length-prefixed magic token word by word.
///
/// A wrong length or the first differing unit rejects the stream before any
/// further bytes are read, so arbitrary files fail here rather than deeper in
/// the string codec. A stream that ends inside a correct prefix is truncated.
fn read_magic<B: Buf>(src: &mut B) -> Result<()> {
    let len = read_u16(src)?;
    if usize::from(len) != MAGIC.len() {
        return Err(ObjectError::NotAnObjectFile { offset: 0 });
    }

    for (i, expected) in MAGIC.bytes().enumerate() {
        if read_u16(src)? != u16::from(expected) {
            return Err(ObjectError::NotAnObjectFile {
                offset: WORD_SIZE * (i + 1),
            });
        }
    }
    Ok(())
}

/// Read and validate the header, returning the body layout to decode.
pub fn read_header<B: Buf>(src: &mut B) -> Result<FormatVersion> {
    read_magic(src)?;

    let version = parse_version(&read_text(src)?);
    match FormatVersion::from_number(version) {
        Some(layout) => Ok(layout),
        None if version < MIN_VERSION => Err(ObjectError::UnsupportedOldVersion {
            version,
            min: MIN_VERSION,
        }),
        // Versions are contiguous, so anything else is newer than this crate.
        None => Err(ObjectError::UnsupportedNewVersion {
            version,
            max: MAX_VERSION,
        }),
    }
}

/// Write the magic token and the version string.
pub fn write_header<B: BufMut>(dst: &mut B, version: FormatVersion) -> Result<()> {
    write_text(dst, MAGIC)?;
    write_text(dst, &version.version_string())
}
