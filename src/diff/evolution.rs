// Mon Jan 19 2026 - Alex

use crate::diff::DiffError;
use crate::structure::{AlignmentTable, MemberLayout, StructLayout};
use crate::validation::alignment_rule::{check_member, describe_member};
use crate::validation::{Finding, MemberCheck, RuleId, Severity};
use std::collections::HashMap;
use std::fmt;

/// How one member differs between two snapshots of a struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberChange<'a> {
    Added(&'a MemberLayout),
    Removed(&'a MemberLayout),
    Moved {
        member: &'a MemberLayout,
        old_offset: u64,
    },
    Resized {
        member: &'a MemberLayout,
        old_size: u64,
    },
}

impl fmt::Display for MemberChange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberChange::Added(m) => write!(f, "Added: {}", m),
            MemberChange::Removed(m) => write!(f, "Removed: {}", m),
            MemberChange::Moved { member, old_offset } => {
                write!(f, "Moved: {} from {} to {}", member.name(), old_offset, member.offset())
            }
            MemberChange::Resized { member, old_size } => {
                write!(f, "Resized: {} from {} to {} bytes", member.name(), old_size, member.size())
            }
        }
    }
}

/// Member-level comparison of a baseline and candidate snapshot.
#[derive(Debug, Clone)]
pub struct StructEvolution<'a> {
    pub baseline: &'a StructLayout,
    pub candidate: &'a StructLayout,
    pub changes: Vec<MemberChange<'a>>,
}

impl<'a> StructEvolution<'a> {
    pub fn added(&self) -> impl Iterator<Item = &'a MemberLayout> + '_ {
        self.changes.iter().filter_map(|c| match c {
            MemberChange::Added(m) => Some(*m),
            _ => None,
        })
    }

    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Attributes newly introduced misalignment to members added between two
/// snapshots of the same struct.
pub struct EvolutionDiffer {
    table: AlignmentTable,
}

impl EvolutionDiffer {
    pub fn new(table: AlignmentTable) -> Self {
        Self { table }
    }

    /// Matches members by name. Candidate members come first, in offset
    /// order, followed by removals in baseline order.
    pub fn compare<'a>(
        &self,
        baseline: &'a StructLayout,
        candidate: &'a StructLayout,
    ) -> Result<StructEvolution<'a>, DiffError> {
        if baseline.name() != candidate.name() {
            return Err(DiffError::EvolutionMismatch {
                baseline: baseline.name().to_string(),
                candidate: candidate.name().to_string(),
            });
        }

        let old_members: HashMap<&str, &MemberLayout> =
            baseline.members().iter().map(|m| (m.name(), m)).collect();
        let mut changes = Vec::new();

        for member in candidate.members() {
            match old_members.get(member.name()) {
                None => changes.push(MemberChange::Added(member)),
                Some(old) if old.offset() != member.offset() => changes.push(MemberChange::Moved {
                    member,
                    old_offset: old.offset(),
                }),
                Some(old) if old.size() != member.size() => changes.push(MemberChange::Resized {
                    member,
                    old_size: old.size(),
                }),
                Some(_) => {}
            }
        }

        for old in baseline.members() {
            if candidate.member(old.name()).is_none() {
                changes.push(MemberChange::Removed(old));
            }
        }

        Ok(StructEvolution {
            baseline,
            candidate,
            changes,
        })
    }

    /// One `EvolutionRegression` per added member that is misaligned in
    /// `candidate`. Moved, resized and removed members are not diagnosed.
    pub fn diff(&self, baseline: &StructLayout, candidate: &StructLayout) -> Result<Vec<Finding>, DiffError> {
        let evolution = self.compare(baseline, candidate)?;

        let findings = evolution
            .added()
            .filter_map(|member| match check_member(&self.table, member) {
                MemberCheck::Misaligned { required } => {
                    Some(self.regression(baseline, candidate, member, required))
                }
                MemberCheck::Aligned { .. } | MemberCheck::Unresolved => None,
            })
            .collect::<Vec<_>>();

        if !findings.is_empty() {
            log::debug!(
                "{}: {} regression(s) introduced by added members",
                candidate.name(),
                findings.len()
            );
        }
        Ok(findings)
    }

    fn regression(
        &self,
        baseline: &StructLayout,
        candidate: &StructLayout,
        member: &MemberLayout,
        required: u64,
    ) -> Finding {
        let message = format!(
            "{} added at offset {} is not naturally aligned (needs {}); misalignment introduced since the {}-byte baseline",
            describe_member(candidate, member),
            member.offset(),
            required,
            baseline.total_size()
        );

        Finding::new(RuleId::EvolutionRegression, Severity::Warning, candidate.name(), message)
            .for_member(member.name(), member.offset())
            .located_at(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{StructLayoutBuilder, TargetArch, TypeKind};
    use crate::validation::AlignmentRule;

    fn sensor_reading(name: &str, total_size: u64) -> StructLayoutBuilder {
        StructLayoutBuilder::new(name)
            .total_size(total_size)
            .alignment(4)
            .packed(true)
            .member("timestamp", 0, 8, TypeKind::Int64)
            .member("temperature_mc", 8, 4, TypeKind::Int32)
            .member("salinity_ppt", 12, 4, TypeKind::Int32)
            .member("status_flags", 16, 1, TypeKind::Uint8)
            .member("battery_mv", 17, 2, TypeKind::Uint16)
    }

    fn differ() -> EvolutionDiffer {
        EvolutionDiffer::new(TargetArch::Riscv32.alignment_table())
    }

    #[test]
    fn test_added_error_code_is_a_regression() {
        let baseline = sensor_reading("sensor_reading_t", 20).build();
        let candidate = sensor_reading("sensor_reading_t", 24)
            .member("error_code", 19, 4, TypeKind::Uint32)
            .build();

        let findings = differ().diff(&baseline, &candidate).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule_id, RuleId::EvolutionRegression);
        assert_eq!(findings[0].member_name.as_deref(), Some("error_code"));
        assert_eq!(findings[0].offset, Some(19));
        assert!(findings[0].message.contains("needs 4"));

        // The alignment rule reports the candidate independently.
        let rule = AlignmentRule::new(TargetArch::Riscv32.alignment_table());
        let misaligned: Vec<_> = rule
            .analyze(&candidate)
            .into_iter()
            .filter_map(|f| f.member_name)
            .collect();
        assert_eq!(misaligned, vec!["battery_mv", "error_code"]);
    }

    #[test]
    fn test_preexisting_misalignment_is_not_a_regression() {
        let baseline = sensor_reading("sensor_reading_t", 20).build();
        let candidate = sensor_reading("sensor_reading_t", 20).build();

        assert!(differ().diff(&baseline, &candidate).unwrap().is_empty());
        assert!(differ().compare(&baseline, &candidate).unwrap().is_unchanged());
    }

    #[test]
    fn test_aligned_addition_is_clean() {
        let baseline = sensor_reading("sensor_reading_t", 20).build();
        let candidate = sensor_reading("sensor_reading_t", 24)
            .member("error_code", 20, 4, TypeKind::Uint32)
            .build();

        assert!(differ().diff(&baseline, &candidate).unwrap().is_empty());
    }

    #[test]
    fn test_moved_and_removed_members_are_classified_only() {
        let baseline = StructLayoutBuilder::new("hdr_t")
            .total_size(12)
            .alignment(4)
            .member("a", 0, 4, TypeKind::Uint32)
            .member("b", 4, 2, TypeKind::Uint16)
            .member("c", 8, 4, TypeKind::Uint32)
            .build();
        let candidate = StructLayoutBuilder::new("hdr_t")
            .total_size(12)
            .alignment(1)
            .packed(true)
            .member("b", 0, 2, TypeKind::Uint16)
            .member("a", 3, 4, TypeKind::Uint32)
            .build();

        let evolution = differ().compare(&baseline, &candidate).unwrap();
        assert_eq!(evolution.changes.len(), 3);
        assert!(matches!(evolution.changes[0], MemberChange::Moved { old_offset: 4, .. }));
        assert!(matches!(evolution.changes[1], MemberChange::Moved { old_offset: 0, .. }));
        assert!(matches!(evolution.changes[2], MemberChange::Removed(m) if m.name() == "c"));
        assert!(differ().diff(&baseline, &candidate).unwrap().is_empty());

        let shrunk = StructLayoutBuilder::new("hdr_t")
            .total_size(8)
            .alignment(4)
            .member("a", 0, 4, TypeKind::Uint32)
            .member("b", 4, 4, TypeKind::Uint32)
            .build();
        let evolution = differ().compare(&baseline, &shrunk).unwrap();
        assert!(matches!(evolution.changes[0], MemberChange::Resized { old_size: 2, .. }));
        assert!(matches!(evolution.changes[1], MemberChange::Removed(m) if m.name() == "c"));
    }

    #[test]
    fn test_unknown_added_member_is_not_judged() {
        let baseline = sensor_reading("sensor_reading_t", 20).build();
        let candidate = sensor_reading("sensor_reading_t", 24)
            .member("vendor", 19, 3, TypeKind::Unknown)
            .build();

        assert!(differ().diff(&baseline, &candidate).unwrap().is_empty());
    }

    #[test]
    fn test_name_mismatch_is_a_contract_error() {
        let baseline = sensor_reading("sensor_reading_pack1_t", 20).build();
        let candidate = sensor_reading("sensor_reading_evolved_t", 24).build();

        let err = differ().diff(&baseline, &candidate).unwrap_err();
        assert_eq!(
            err,
            DiffError::EvolutionMismatch {
                baseline: "sensor_reading_pack1_t".to_string(),
                candidate: "sensor_reading_evolved_t".to_string(),
            }
        );
    }
}
