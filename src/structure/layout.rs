// Mon Jan 19 2026 - Alex

use crate::structure::serializer::StructRecord;
use crate::structure::MemberLayout;
use serde::{Deserialize, Serialize};

/// Layout facts for one struct as extracted from debug information.
///
/// Members are kept in offset order; that order is the iteration order
/// every rule relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StructRecord")]
pub struct StructLayout {
    name: String,
    total_size: u64,
    declared_alignment: u64,
    packed_explicit: bool,
    members: Vec<MemberLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    decl_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    decl_line: Option<u64>,
}

impl StructLayout {
    pub fn new(
        name: impl Into<String>,
        total_size: u64,
        declared_alignment: u64,
        packed_explicit: bool,
        mut members: Vec<MemberLayout>,
    ) -> Self {
        members.sort_by_key(|m| m.offset());
        Self {
            name: name.into(),
            total_size,
            declared_alignment,
            packed_explicit,
            members,
            decl_file: None,
            decl_line: None,
        }
    }

    pub fn with_location(mut self, file: impl Into<String>, line: u64) -> Self {
        self.decl_file = Some(file.into());
        self.decl_line = Some(line);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn declared_alignment(&self) -> u64 {
        self.declared_alignment
    }

    pub fn packed_explicit(&self) -> bool {
        self.packed_explicit
    }

    pub fn members(&self) -> &[MemberLayout] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&MemberLayout> {
        self.members.iter().find(|m| m.name() == name)
    }

    pub fn decl_file(&self) -> Option<&str> {
        self.decl_file.as_deref()
    }

    pub fn decl_line(&self) -> Option<u64> {
        self.decl_line
    }

    /// Bytes not covered by any member, interior and trailing.
    pub fn padding_bytes(&self) -> u64 {
        let covered: u64 = self.members.iter().map(|m| m.size()).sum();
        self.total_size.saturating_sub(covered)
    }

    /// Identity used to fold records of the same type emitted by several
    /// compilation units.
    pub fn signature(&self) -> String {
        let members = self
            .members
            .iter()
            .map(|m| format!("{}@{}", m.name(), m.offset()))
            .collect::<Vec<_>>()
            .join(",");
        format!("{}:{}", self.name, members)
    }
}

impl From<StructRecord> for StructLayout {
    fn from(record: StructRecord) -> Self {
        let layout = StructLayout::new(
            record.name,
            record.total_size,
            record.declared_alignment,
            record.packed_explicit,
            record.members,
        );
        Self {
            decl_file: record.decl_file,
            decl_line: record.decl_line,
            ..layout
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::TypeKind;

    #[test]
    fn test_members_sorted_by_offset() {
        let layout = StructLayout::new(
            "point_t",
            12,
            4,
            false,
            vec![
                MemberLayout::new("z", 8, 4, TypeKind::Int32),
                MemberLayout::new("x", 0, 4, TypeKind::Int32),
                MemberLayout::new("y", 4, 4, TypeKind::Int32),
            ],
        );
        let names: Vec<_> = layout.members().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
        assert_eq!(layout.padding_bytes(), 0);
        assert_eq!(layout.signature(), "point_t:x@0,y@4,z@8");
    }

    #[test]
    fn test_padding_bytes() {
        let layout = StructLayout::new(
            "sensor_rec_t",
            12,
            4,
            false,
            vec![
                MemberLayout::new("type", 0, 1, TypeKind::Uint8),
                MemberLayout::new("value", 4, 4, TypeKind::Uint32),
                MemberLayout::new("flags", 8, 1, TypeKind::Uint8),
            ],
        );
        assert_eq!(layout.padding_bytes(), 6);
        assert_eq!(layout.member("value").map(|m| m.offset()), Some(4));
    }
}
