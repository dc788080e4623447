// Mon Jan 19 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar category of a struct member as reported by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float32,
    Float64,
    Pointer,
    #[serde(other)]
    Unknown,
}

impl TypeKind {
    pub const KNOWN: [TypeKind; 11] = [
        TypeKind::Int8,
        TypeKind::Uint8,
        TypeKind::Int16,
        TypeKind::Uint16,
        TypeKind::Int32,
        TypeKind::Uint32,
        TypeKind::Int64,
        TypeKind::Uint64,
        TypeKind::Float32,
        TypeKind::Float64,
        TypeKind::Pointer,
    ];

    /// Storage width in bytes. Pointers and unknown types have no fixed width.
    pub fn fixed_size(self) -> Option<u64> {
        match self {
            Self::Int8 | Self::Uint8 => Some(1),
            Self::Int16 | Self::Uint16 => Some(2),
            Self::Int32 | Self::Uint32 | Self::Float32 => Some(4),
            Self::Int64 | Self::Uint64 | Self::Float64 => Some(8),
            Self::Pointer | Self::Unknown => None,
        }
    }

    pub fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Uint8 => "uint8",
            Self::Int16 => "int16",
            Self::Uint16 => "uint16",
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Pointer => "pointer",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
