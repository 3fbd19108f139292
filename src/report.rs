//! Human-readable module dump.

use std::fmt;

use crate::module::Module;

/// Default number of object code words per dump row.
pub const DEFAULT_WORDS_PER_LINE: usize = 8;

/// Renders a module as a plain-text report.
pub struct Report<'a> {
    module: &'a Module,
    words_per_line: usize,
}

impl<'a> Report<'a> {
    pub fn new(module: &'a Module) -> Self {
        Self {
            module,
            words_per_line: DEFAULT_WORDS_PER_LINE,
        }
    }

    /// Set the object code row width. Zero is treated as one.
    pub fn words_per_line(mut self, words: usize) -> Self {
        self.words_per_line = words.max(1);
        self
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let module = self.module;

        writeln!(f, "Exported Labels:")?;
        if module.exported_labels.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for (name, address) in &module.exported_labels {
            writeln!(f, "  {name}: 0x{address:04x}")?;
        }

        writeln!(f, "Imported Labels:")?;
        if module.imported_labels.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for (address, name) in &module.imported_labels {
            writeln!(f, "  0x{address:04x}: {name}")?;
        }

        writeln!(f, "Used Labels:")?;
        if module.used_labels.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for address in &module.used_labels {
            writeln!(f, "  0x{address:04x}")?;
        }

        let words = module.object_code.len();
        writeln!(
            f,
            "Object Code ({words} word{}):",
            if words == 1 { "" } else { "s" }
        )?;
        if words == 0 {
            writeln!(f, "  (none)")?;
        }
        for (row, chunk) in module.object_code.chunks(self.words_per_line).enumerate() {
            write!(f, "  {:04x}:", row * self.words_per_line)?;
            for word in chunk {
                write!(f, " {word:04x}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
