// Mon Jan 19 2026 - Alex

use crate::structure::TypeKind;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberLayout {
    name: String,
    offset: u64,
    size: u64,
    type_kind: TypeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    type_name: Option<String>,
}

impl MemberLayout {
    pub fn new(name: impl Into<String>, offset: u64, size: u64, type_kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            offset,
            size,
            type_kind,
            type_name: None,
        }
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// One past the last byte, `None` on overflow.
    pub fn end(&self) -> Option<u64> {
        self.offset.checked_add(self.size)
    }

    pub fn type_kind(&self) -> TypeKind {
        self.type_kind
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Source spelling when known, otherwise the kind.
    pub fn type_label(&self) -> &str {
        self.type_name.as_deref().unwrap_or(self.type_kind.as_str())
    }
}

impl fmt::Display for MemberLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}: {} ({} bytes)", self.name, self.offset, self.type_label(), self.size)
    }
}
