//! Object files on disk.
//!
//! Inputs are memory-mapped and decoded in one pass; outputs are encoded in
//! full before the file is created.

use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

use crate::codec::{decode, encode};
use crate::error::Result;
use crate::module::Module;

/// Read and decode the object file at `path`.
pub fn read_object(path: &Path) -> Result<Module> {
    let file = File::open(path)?;
    let len = file.metadata()?.len();
    tracing::debug!("reading {} ({} bytes)", path.display(), len);

    // Zero-length files cannot be mapped on every platform.
    if len == 0 {
        return decode(&[]);
    }

    // SAFETY: the mapping is read-only and dropped before returning; the
    // decoded module owns all of its data.
    let mmap = unsafe { Mmap::map(&file)? };
    decode(&mmap)
}

/// Encode `module` and write it to `path`, replacing any existing file.
pub fn write_object(path: &Path, module: &Module) -> Result<()> {
    let bytes = encode(module)?;
    std::fs::write(path, &bytes)?;
    tracing::debug!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
