// Mon Jan 19 2026 - Alex

use crate::structure::{AlignmentTable, MemberLayout, Packing, PackingClassifier, StructLayout};
use crate::validation::{Finding, RuleId, Severity, StructRule};

/// Outcome of checking one member against an alignment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberCheck {
    Aligned { required: u64 },
    Misaligned { required: u64 },
    Unresolved,
}

impl MemberCheck {
    pub fn is_misaligned(self) -> bool {
        matches!(self, Self::Misaligned { .. })
    }
}

pub fn check_member(table: &AlignmentTable, member: &MemberLayout) -> MemberCheck {
    match table.get(member.type_kind()) {
        None | Some(0) => MemberCheck::Unresolved,
        Some(required) if member.offset() % required != 0 => MemberCheck::Misaligned { required },
        Some(required) => MemberCheck::Aligned { required },
    }
}

/// Flags members whose offset is not a multiple of their natural alignment.
pub struct AlignmentRule {
    table: AlignmentTable,
    classifier: PackingClassifier,
}

impl AlignmentRule {
    pub fn new(table: AlignmentTable) -> Self {
        Self {
            table,
            classifier: PackingClassifier::new(),
        }
    }

    pub fn check_member(&self, member: &MemberLayout) -> MemberCheck {
        check_member(&self.table, member)
    }

    /// Findings for every member, in offset order.
    pub fn analyze(&self, layout: &StructLayout) -> Vec<Finding> {
        let packing = self.classifier.classify(layout);

        layout
            .members()
            .iter()
            .filter_map(|member| match self.check_member(member) {
                MemberCheck::Aligned { .. } => None,
                MemberCheck::Misaligned { required } => {
                    Some(misaligned_finding(layout, member, required, packing))
                }
                MemberCheck::Unresolved => Some(unresolved_finding(layout, member)),
            })
            .collect()
    }
}

impl StructRule for AlignmentRule {
    fn name(&self) -> &str {
        "alignment"
    }

    fn check(&self, layout: &StructLayout) -> Vec<Finding> {
        self.analyze(layout)
    }
}

pub(crate) fn describe_member(layout: &StructLayout, member: &MemberLayout) -> String {
    format!(
        "{}.{} ({}, {} bytes)",
        layout.name(),
        member.name(),
        member.type_label(),
        member.size()
    )
}

fn misaligned_finding(
    layout: &StructLayout,
    member: &MemberLayout,
    required: u64,
    packing: Packing,
) -> Finding {
    let context = match packing {
        Packing::Packed => "struct is packed",
        Packing::Natural => "struct is not packed; unexpected compiler/ABI layout",
    };
    let message = format!(
        "{} at offset {} not naturally aligned (needs {}); {}",
        describe_member(layout, member),
        member.offset(),
        required,
        context
    );

    Finding::new(RuleId::MisalignedField, Severity::Warning, layout.name(), message)
        .for_member(member.name(), member.offset())
        .located_at(layout)
}

fn unresolved_finding(layout: &StructLayout, member: &MemberLayout) -> Finding {
    let message = format!(
        "{}.{} has type {} with no alignment rule; alignment not checked",
        layout.name(),
        member.name(),
        member.type_label()
    );

    Finding::new(RuleId::UnresolvedType, Severity::Info, layout.name(), message)
        .for_member(member.name(), member.offset())
        .located_at(layout)
}
