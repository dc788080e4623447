// Mon Jan 19 2026 - Alex

use crate::structure::{StructureError, TypeKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Target architectures with a built-in alignment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetArch {
    X86_64,
    Aarch64,
    Riscv64,
    #[serde(alias = "i386")]
    X86,
    Arm,
    Riscv32,
    Xtensa,
}

impl TargetArch {
    pub fn pointer_width(self) -> u64 {
        match self {
            Self::X86_64 | Self::Aarch64 | Self::Riscv64 => 8,
            Self::X86 | Self::Arm | Self::Riscv32 | Self::Xtensa => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Aarch64 => "aarch64",
            Self::Riscv64 => "riscv64",
            Self::X86 => "x86",
            Self::Arm => "arm",
            Self::Riscv32 => "riscv32",
            Self::Xtensa => "xtensa",
        }
    }

    pub fn alignment_table(self) -> AlignmentTable {
        let table = AlignmentTable::build(self.pointer_width(), None);
        match self {
            // i386 System V caps 8-byte scalars at 4 inside structs
            Self::X86 => table
                .with_entry(TypeKind::Int64, 4)
                .with_entry(TypeKind::Uint64, 4)
                .with_entry(TypeKind::Float64, 4),
            _ => table,
        }
    }
}

impl fmt::Display for TargetArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetArch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x86_64" | "amd64" => Ok(Self::X86_64),
            "aarch64" | "arm64" => Ok(Self::Aarch64),
            "riscv64" => Ok(Self::Riscv64),
            "x86" | "i386" | "i686" => Ok(Self::X86),
            "arm" => Ok(Self::Arm),
            "riscv32" => Ok(Self::Riscv32),
            "xtensa" => Ok(Self::Xtensa),
            other => Err(format!("unknown target architecture: {}", other)),
        }
    }
}

/// Required natural alignment, in bytes, for each member type kind.
///
/// Tables are immutable once built and are passed explicitly into every
/// rule that needs them. `Unknown` never has an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AlignmentSpec", into = "BTreeMap<TypeKind, u64>")]
pub struct AlignmentTable {
    entries: BTreeMap<TypeKind, u64>,
}

impl AlignmentTable {
    /// Every scalar aligned to its own size, pointers to `pointer_width`.
    pub fn natural(pointer_width: u64) -> Result<Self, StructureError> {
        check_width(pointer_width)?;
        Ok(Self::build(pointer_width, None))
    }

    /// Alignment is `min(size, word)`, the rule used when only the word
    /// size of the target is known.
    pub fn capped(word: u64) -> Result<Self, StructureError> {
        check_width(word)?;
        Ok(Self::build(word, Some(word)))
    }

    fn build(pointer_width: u64, cap: Option<u64>) -> Self {
        let entries = TypeKind::KNOWN
            .iter()
            .map(|&kind| {
                let align = kind.fixed_size().unwrap_or(pointer_width);
                (kind, cap.map_or(align, |cap| align.min(cap)))
            })
            .collect();
        Self { entries }
    }

    pub fn from_entries(entries: BTreeMap<TypeKind, u64>) -> Result<Self, StructureError> {
        let mut table = Self { entries: BTreeMap::new() };
        for (kind, align) in entries {
            table = table.with_override(kind, align)?;
        }
        Ok(table)
    }

    pub fn with_override(mut self, kind: TypeKind, align: u64) -> Result<Self, StructureError> {
        check_width(align)?;
        if kind.is_unknown() {
            return Err(StructureError::ParseError(
                "alignment table cannot carry an entry for unknown".to_string(),
            ));
        }
        self.entries.insert(kind, align);
        Ok(self)
    }

    pub(crate) fn with_entry(mut self, kind: TypeKind, align: u64) -> Self {
        self.entries.insert(kind, align);
        self
    }

    /// `None` for `Unknown` and for kinds the table has no rule for.
    pub fn get(&self, kind: TypeKind) -> Option<u64> {
        self.entries.get(&kind).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn check_width(align: u64) -> Result<(), StructureError> {
    if align == 0 || !align.is_power_of_two() {
        return Err(StructureError::InvalidAlignment(align));
    }
    Ok(())
}

impl Default for AlignmentTable {
    fn default() -> Self {
        TargetArch::X86_64.alignment_table()
    }
}

impl From<TargetArch> for AlignmentTable {
    fn from(arch: TargetArch) -> Self {
        arch.alignment_table()
    }
}

impl From<AlignmentTable> for BTreeMap<TypeKind, u64> {
    fn from(table: AlignmentTable) -> Self {
        table.entries
    }
}

/// Accepted config forms: a target name or an explicit kind map.
#[derive(Deserialize)]
#[serde(untagged)]
enum AlignmentSpec {
    Target(TargetArch),
    Explicit(BTreeMap<TypeKind, u64>),
}

impl TryFrom<AlignmentSpec> for AlignmentTable {
    type Error = StructureError;

    fn try_from(source: AlignmentSpec) -> Result<Self, Self::Error> {
        match source {
            AlignmentSpec::Target(arch) => Ok(arch.alignment_table()),
            AlignmentSpec::Explicit(entries) => Self::from_entries(entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lp64_table() {
        let table = TargetArch::X86_64.alignment_table();
        assert_eq!(table.get(TypeKind::Int16), Some(2));
        assert_eq!(table.get(TypeKind::Uint32), Some(4));
        assert_eq!(table.get(TypeKind::Int64), Some(8));
        assert_eq!(table.get(TypeKind::Pointer), Some(8));
        assert_eq!(table.get(TypeKind::Unknown), None);
    }

    #[test]
    fn test_i386_caps_wide_scalars() {
        let table = TargetArch::X86.alignment_table();
        assert_eq!(table.get(TypeKind::Int64), Some(4));
        assert_eq!(table.get(TypeKind::Float64), Some(4));
        assert_eq!(table.get(TypeKind::Pointer), Some(4));

        let rv32 = TargetArch::Riscv32.alignment_table();
        assert_eq!(rv32.get(TypeKind::Int64), Some(8));
        assert_eq!(rv32.get(TypeKind::Pointer), Some(4));
    }

    #[test]
    fn test_capped_table() {
        let table = AlignmentTable::capped(4).unwrap();
        assert_eq!(table.get(TypeKind::Uint8), Some(1));
        assert_eq!(table.get(TypeKind::Uint16), Some(2));
        assert_eq!(table.get(TypeKind::Uint64), Some(4));
        assert_eq!(table.get(TypeKind::Pointer), Some(4));
    }

    #[test]
    fn test_constructors_reject_bad_widths() {
        assert!(matches!(AlignmentTable::natural(0), Err(StructureError::InvalidAlignment(0))));
        assert!(matches!(AlignmentTable::natural(6), Err(StructureError::InvalidAlignment(6))));
        assert!(matches!(AlignmentTable::capped(0), Err(StructureError::InvalidAlignment(0))));
        assert!(matches!(AlignmentTable::capped(6), Err(StructureError::InvalidAlignment(6))));

        let table = AlignmentTable::natural(4).unwrap();
        assert_eq!(table, TargetArch::Arm.alignment_table());
    }

    #[test]
    fn test_override_rejects_non_power_of_two() {
        let table = AlignmentTable::default();
        assert!(matches!(
            table.clone().with_override(TypeKind::Int32, 3),
            Err(StructureError::InvalidAlignment(3))
        ));
        assert!(table.clone().with_override(TypeKind::Unknown, 4).is_err());

        let table = table.with_override(TypeKind::Int64, 4).unwrap();
        assert_eq!(table.get(TypeKind::Int64), Some(4));
    }

    #[test]
    fn test_deserialize_target_or_map() {
        let table: AlignmentTable = serde_json::from_str("\"riscv32\"").unwrap();
        assert_eq!(table, TargetArch::Riscv32.alignment_table());

        let table: AlignmentTable = serde_json::from_str(r#"{"uint16": 2, "uint32": 4}"#).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(TypeKind::Int64), None);

        let bad: Result<AlignmentTable, _> = serde_json::from_str(r#"{"uint32": 6}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_target_from_str() {
        assert_eq!("arm64".parse::<TargetArch>().unwrap(), TargetArch::Aarch64);
        assert_eq!("i386".parse::<TargetArch>().unwrap(), TargetArch::X86);
        assert!("mips".parse::<TargetArch>().is_err());
    }
}
