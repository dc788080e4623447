// Mon Jan 19 2026 - Alex

use crate::structure::StructLayout;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Packing {
    Packed,
    Natural,
}

impl Packing {
    pub fn is_packed(self) -> bool {
        matches!(self, Self::Packed)
    }
}

impl fmt::Display for Packing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Packing::Packed => write!(f, "packed"),
            Packing::Natural => write!(f, "natural"),
        }
    }
}

/// Classifies a struct as packed or natural.
///
/// Only the extractor's `packed_explicit` flag is consulted. Size and
/// offset arithmetic cannot tell `packed` apart from `aligned(N)` for
/// every attribute encoding, so no inference is attempted.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackingClassifier;

impl PackingClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, layout: &StructLayout) -> Packing {
        if layout.packed_explicit() {
            Packing::Packed
        } else {
            Packing::Natural
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{StructLayoutBuilder, TypeKind};

    #[test]
    fn test_flag_decides_packing() {
        let classifier = PackingClassifier::new();

        let packed = StructLayoutBuilder::new("sensor_reading_pa4_t")
            .total_size(20)
            .alignment(4)
            .packed(true)
            .build();
        assert_eq!(classifier.classify(&packed), Packing::Packed);

        // Tightly laid out but not flagged: still natural.
        let tight = StructLayoutBuilder::new("pair_t")
            .total_size(2)
            .alignment(1)
            .member("a", 0, 1, TypeKind::Uint8)
            .member("b", 1, 1, TypeKind::Uint8)
            .build();
        assert_eq!(classifier.classify(&tight), Packing::Natural);
    }
}
