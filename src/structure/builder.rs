// Mon Jan 19 2026 - Alex

use crate::structure::{MemberLayout, StructLayout, TypeKind};

pub struct StructLayoutBuilder {
    name: String,
    total_size: u64,
    declared_alignment: u64,
    packed_explicit: bool,
    members: Vec<MemberLayout>,
    location: Option<(String, u64)>,
}

impl StructLayoutBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_size: 0,
            declared_alignment: 1,
            packed_explicit: false,
            members: Vec::new(),
            location: None,
        }
    }

    pub fn total_size(mut self, size: u64) -> Self {
        self.total_size = size;
        self
    }

    pub fn alignment(mut self, alignment: u64) -> Self {
        self.declared_alignment = alignment;
        self
    }

    pub fn packed(mut self, packed: bool) -> Self {
        self.packed_explicit = packed;
        self
    }

    pub fn location(mut self, file: impl Into<String>, line: u64) -> Self {
        self.location = Some((file.into(), line));
        self
    }

    pub fn member(mut self, name: &str, offset: u64, size: u64, type_kind: TypeKind) -> Self {
        self.members.push(MemberLayout::new(name, offset, size, type_kind));
        self
    }

    pub fn build(self) -> StructLayout {
        let layout = StructLayout::new(
            self.name,
            self.total_size,
            self.declared_alignment,
            self.packed_explicit,
            self.members,
        );
        match self.location {
            Some((file, line)) => layout.with_location(file, line),
            None => layout,
        }
    }
}
