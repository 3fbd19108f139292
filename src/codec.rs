//! Object file encoding and decoding.
//!
//! Wire format (all integers big-endian u16, `text` as in [`crate::text`]):
//! ```text
//! ┌───────────────────┬──────────────────────┐
//! │ text  magic       │ "GALAXYOBJ"          │
//! │ text  version     │ decimal, e.g. "0001" │
//! ├───────────────────┼──────────────────────┤
//! │ u16   count       │ exported labels      │
//! │       count x     │ text name, u16 addr  │
//! │ u16   count       │ imported labels      │
//! │       count x     │ u16 addr, text name  │
//! │ u16   count       │ used labels          │
//! │       count x     │ u16 addr             │
//! │ u16   count       │ object code          │
//! │       count x     │ u16 word             │
//! └───────────────────┴──────────────────────┘
//! ```
//! Decoding is all-or-nothing: the first failure aborts the whole call.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{ObjectError, Result};
use crate::header::{read_header, write_header, FormatVersion};
use crate::module::{Module, Section};
use crate::scalar::{count_u16, read_u16, write_u16};
use crate::text::{check_text, read_text, write_text};

/// Encode a module into a new buffer.
pub fn encode(module: &Module) -> Result<Bytes> {
    let mut dst = BytesMut::new();
    encode_into(module, &mut dst)?;
    Ok(dst.freeze())
}

/// Encode a module into `dst`.
///
/// Section counts and label names are checked before anything is written, so
/// on error `dst` is left untouched.
pub fn encode_into<B: BufMut>(module: &Module, dst: &mut B) -> Result<()> {
    let mut counts = [0u16; 4];
    for (slot, section) in counts.iter_mut().zip(Section::ALL) {
        let count = module.section_len(section);
        *slot = count_u16(count).ok_or(ObjectError::TooManyEntries { section, count })?;
    }
    let [exports, imports, used, code] = counts;

    let names = module
        .exported_labels
        .keys()
        .chain(module.imported_labels.values());
    for name in names {
        check_text(name)?;
    }

    write_header(dst, FormatVersion::CURRENT)?;

    write_u16(dst, exports);
    for (name, &address) in &module.exported_labels {
        write_text(dst, name)?;
        write_u16(dst, address);
    }

    write_u16(dst, imports);
    for (&address, name) in &module.imported_labels {
        write_u16(dst, address);
        write_text(dst, name)?;
    }

    write_u16(dst, used);
    for &address in &module.used_labels {
        write_u16(dst, address);
    }

    write_u16(dst, code);
    for &word in &module.object_code {
        write_u16(dst, word);
    }
    Ok(())
}

/// Decode a complete object file held in memory.
///
/// Bytes after the object code section are ignored.
pub fn decode(bytes: &[u8]) -> Result<Module> {
    let mut src = bytes;
    decode_from(&mut src)
}

/// Decode one object file from the front of `src`.
pub fn decode_from<B: Buf>(src: &mut B) -> Result<Module> {
    match read_header(src)? {
        FormatVersion::V1 => decode_v1_body(src),
    }
}

fn decode_v1_body<B: Buf>(src: &mut B) -> Result<Module> {
    let mut module = Module::new();

    // Last write wins for a repeated export name. This is part of the format:
    // a duplicate export silently replaces the earlier one rather than failing,
    // and rejecting it would need a new format version. Repeated import
    // addresses behave the same way.
    let count = read_u16(src)?;
    for _ in 0..count {
        let name = read_text(src)?;
        let address = read_u16(src)?;
        module.exported_labels.insert(name, address);
    }

    let count = read_u16(src)?;
    for _ in 0..count {
        let address = read_u16(src)?;
        let name = read_text(src)?;
        module.imported_labels.insert(address, name);
    }

    let count = read_u16(src)?;
    for _ in 0..count {
        module.used_labels.insert(read_u16(src)?);
    }

    let count = read_u16(src)?;
    module.object_code.reserve(count as usize);
    for _ in 0..count {
        module.object_code.push(read_u16(src)?);
    }

    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::MAGIC;

    fn sample() -> Module {
        let mut module = Module::new();
        module.exported_labels.insert("main".to_string(), 0x0010);
        module.imported_labels.insert(0x0020, "printf".to_string());
        module.used_labels.insert(0x0010);
        module.object_code = vec![0x7C01, 0x0000];
        module
    }

    /// Header bytes followed by raw body words.
    fn with_body(body: &[u16]) -> BytesMut {
        let mut buf = BytesMut::new();
        write_header(&mut buf, FormatVersion::V1).unwrap();
        for &word in body {
            write_u16(&mut buf, word);
        }
        buf
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let module = sample();
        let bytes = encode(&module).unwrap();
        assert_eq!(decode(&bytes).unwrap(), module);
    }

    #[test]
    fn test_empty_module() {
        let bytes = encode(&Module::new()).unwrap();
        let header_len = with_body(&[]).len();
        assert_eq!(bytes.len(), header_len + 4 * 2);
        assert_eq!(decode(&bytes).unwrap(), Module::new());
    }

    #[test]
    fn test_exact_layout() {
        let bytes = encode(&sample()).unwrap();

        let mut expected = with_body(&[]);
        write_u16(&mut expected, 1);
        write_text(&mut expected, "main").unwrap();
        write_u16(&mut expected, 0x0010);
        write_u16(&mut expected, 1);
        write_u16(&mut expected, 0x0020);
        write_text(&mut expected, "printf").unwrap();
        write_u16(&mut expected, 1);
        write_u16(&mut expected, 0x0010);
        write_u16(&mut expected, 2);
        write_u16(&mut expected, 0x7C01);
        write_u16(&mut expected, 0x0000);

        assert_eq!(bytes.as_ref(), expected.as_ref());
    }

    #[test]
    fn test_starts_with_magic_and_version() {
        let bytes = encode(&sample()).unwrap();
        let mut src = bytes.as_ref();
        assert_eq!(read_text(&mut src).unwrap(), MAGIC);
        assert_eq!(read_text(&mut src).unwrap(), "0001");
    }

    #[test]
    fn test_duplicate_export_last_wins() {
        let mut buf = with_body(&[]);
        write_u16(&mut buf, 2);
        write_text(&mut buf, "start").unwrap();
        write_u16(&mut buf, 0x0001);
        write_text(&mut buf, "start").unwrap();
        write_u16(&mut buf, 0x0002);
        for _ in 0..3 {
            write_u16(&mut buf, 0);
        }

        let module = decode(&buf).unwrap();
        assert_eq!(module.exported_labels.len(), 1);
        assert_eq!(module.exported_labels["start"], 0x0002);
    }

    #[test]
    fn test_duplicate_used_labels_collapse() {
        let buf = with_body(&[0, 0, 3, 0x0004, 0x0004, 0x0008, 0]);
        let module = decode(&buf).unwrap();
        assert_eq!(module.used_labels.iter().copied().collect::<Vec<u16>>(), vec![4, 8]);
    }

    #[test]
    fn test_object_code_order_preserved() {
        let mut module = Module::new();
        module.object_code = vec![0xFFFF, 0x0001, 0x8000, 0x0001];
        let bytes = encode(&module).unwrap();
        assert_eq!(decode(&bytes).unwrap().object_code, module.object_code);
    }

    #[test]
    fn test_reencode_is_identical() {
        let first = encode(&sample()).unwrap();
        let second = encode(&decode(&first).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut buf = BytesMut::from(encode(&sample()).unwrap().as_ref());
        buf.extend_from_slice(&[0xDE, 0xAD]);
        assert_eq!(decode(&buf).unwrap(), sample());
    }

    #[test]
    fn test_decode_from_leaves_remainder() {
        let mut buf = BytesMut::new();
        encode_into(&sample(), &mut buf).unwrap();
        encode_into(&Module::new(), &mut buf).unwrap();

        let mut src = buf.freeze();
        assert_eq!(decode_from(&mut src).unwrap(), sample());
        assert_eq!(decode_from(&mut src).unwrap(), Module::new());
        assert!(src.is_empty());
    }

    #[test]
    fn test_invalid_character_in_import() {
        let mut buf = with_body(&[0, 1, 0x0020, 1, 0x0141]);
        write_u16(&mut buf, 0);
        assert!(matches!(
            decode(&buf),
            Err(ObjectError::InvalidCharacter { unit: 0x0141 })
        ));
    }

    #[test]
    fn test_count_past_end() {
        let buf = with_body(&[0, 0, 0, 5, 0x7C01]);
        assert!(matches!(
            decode(&buf),
            Err(ObjectError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_too_many_code_words() {
        let mut module = Module::new();
        module.object_code = vec![0; 65_536];
        let mut buf = BytesMut::new();
        let result = encode_into(&module, &mut buf);
        assert!(matches!(
            result,
            Err(ObjectError::TooManyEntries {
                section: Section::ObjectCode,
                count: 65_536
            })
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_max_code_words() {
        let mut module = Module::new();
        module.object_code = (0..=u16::MAX).rev().skip(1).collect();
        assert_eq!(module.object_code.len(), 65_535);
        let bytes = encode(&module).unwrap();
        assert_eq!(decode(&bytes).unwrap(), module);
    }

    #[test]
    fn test_unencodable_label_writes_nothing() {
        let mut module = Module::new();
        module.exported_labels.insert("a".to_string(), 0);
        module.exported_labels.insert("\u{2603}".to_string(), 1);

        let mut buf = BytesMut::new();
        let result = encode_into(&module, &mut buf);
        assert!(matches!(
            result,
            Err(ObjectError::InvalidCharacter { unit: 0x2603 })
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_overlong_import_writes_nothing() {
        let mut module = sample();
        module.imported_labels.insert(0x0030, "x".repeat(65_536));

        let mut buf = BytesMut::new();
        let result = encode_into(&module, &mut buf);
        assert!(matches!(
            result,
            Err(ObjectError::StringTooLong { len: 65_536 })
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_unencodable_label() {
        let mut module = Module::new();
        module.exported_labels.insert("\u{2603}".to_string(), 0);
        assert!(matches!(
            encode(&module),
            Err(ObjectError::InvalidCharacter { unit: 0x2603 })
        ));
    }
}
