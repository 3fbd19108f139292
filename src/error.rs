//! Error types.
//!
//! Every failure is fatal to the call that raised it. Callers branch on the
//! variant, so each kind carries just enough context for a readable message.

use crate::module::Section;

/// Errors that can occur while encoding, decoding, reading or writing an object file.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    /// The input ended before a field was complete.
    #[error("truncated input (needed {needed} bytes, {remaining} remaining)")]
    TruncatedInput { needed: usize, remaining: usize },

    /// A string unit does not fit in a single byte.
    #[error("invalid character 0x{unit:04x} in string (must be below 0x100)")]
    InvalidCharacter { unit: u32 },

    /// A string has more characters than a 16-bit length can describe.
    #[error("string too long ({len} characters, max 65535)")]
    StringTooLong { len: usize },

    /// The stream does not start with the magic token. `offset` is the byte
    /// position of the first word that differs.
    #[error("not an asteroid object file (magic mismatch at byte {offset})")]
    NotAnObjectFile { offset: usize },

    /// The format version predates what this decoder reads.
    #[error("unsupported old object file version {version} (oldest supported is {min})")]
    UnsupportedOldVersion { version: i64, min: i64 },

    /// The format version is newer than what this decoder reads.
    #[error("unsupported new object file version {version} (newest supported is {max})")]
    UnsupportedNewVersion { version: i64, max: i64 },

    /// A section holds more entries than a 16-bit count can describe.
    #[error("too many entries in {section} ({count}, max 65535)")]
    TooManyEntries { section: Section, count: usize },

    /// An I/O error occurred while reading or writing an object file.
    #[error("object file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ObjectError>;
