//! In-memory object module.
//!
//! A `Module` is what the assembler produces and the linker consumes. The codec
//! treats every address as an opaque 16-bit value and never checks it against
//! the length of `object_code`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// One assembled object file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    /// Labels visible to other modules, mapped to their declaration address.
    pub exported_labels: BTreeMap<String, u16>,
    /// Code addresses holding an unresolved reference, mapped to the label
    /// another module must supply at link time. One import per address.
    pub imported_labels: BTreeMap<u16, String>,
    /// Code addresses where a locally defined label was substituted, kept so
    /// they can be rewritten if the module is moved.
    pub used_labels: BTreeSet<u16>,
    /// The machine code words.
    pub object_code: Vec<u16>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in one of the four body sections.
    pub fn section_len(&self, section: Section) -> usize {
        match section {
            Section::Exports => self.exported_labels.len(),
            Section::Imports => self.imported_labels.len(),
            Section::UsedLabels => self.used_labels.len(),
            Section::ObjectCode => self.object_code.len(),
        }
    }
}

/// The body sections, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Exports,
    Imports,
    UsedLabels,
    ObjectCode,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Exports,
        Section::Imports,
        Section::UsedLabels,
        Section::ObjectCode,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::Exports => "exported labels",
            Section::Imports => "imported labels",
            Section::UsedLabels => "used labels",
            Section::ObjectCode => "object code",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
