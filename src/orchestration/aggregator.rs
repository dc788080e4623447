// Mon Jan 19 2026 - Alex

use crate::validation::{Finding, FindingKey};
use indexmap::IndexMap;
use itertools::Itertools;
use std::cmp::Ordering;

/// Collects the findings of one run, drops exact duplicates and puts the
/// rest in report order.
pub struct FindingAggregator {
    findings: IndexMap<FindingKey, Finding>,
    duplicates: usize,
}

impl FindingAggregator {
    pub fn new() -> Self {
        Self {
            findings: IndexMap::new(),
            duplicates: 0,
        }
    }

    /// First occurrence of a `(rule, struct, member, offset)` key wins.
    pub fn add(&mut self, finding: Finding) {
        let key = finding.key();
        if self.findings.contains_key(&key) {
            self.duplicates += 1;
            return;
        }
        self.findings.insert(key, finding);
    }

    pub fn extend<I: IntoIterator<Item = Finding>>(&mut self, findings: I) {
        for finding in findings {
            self.add(finding);
        }
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn finish(self) -> Vec<Finding> {
        if self.duplicates > 0 {
            log::debug!("Dropped {} duplicate findings", self.duplicates);
        }
        self.findings.into_values().sorted_by(report_order).collect()
    }
}

impl Default for FindingAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Struct name, then struct-level before member-level, then offset.
/// Rule and member name break the remaining ties.
pub fn report_order(a: &Finding, b: &Finding) -> Ordering {
    a.struct_name
        .cmp(&b.struct_name)
        .then_with(|| b.is_struct_level().cmp(&a.is_struct_level()))
        .then_with(|| a.offset.cmp(&b.offset))
        .then_with(|| a.rule_id.cmp(&b.rule_id))
        .then_with(|| a.member_name.cmp(&b.member_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{RuleId, Severity};

    fn member(rule_id: RuleId, struct_name: &str, member: &str, offset: u64) -> Finding {
        Finding::new(rule_id, Severity::Warning, struct_name, format!("{}.{}", struct_name, member))
            .for_member(member, offset)
    }

    fn struct_level(rule_id: RuleId, struct_name: &str) -> Finding {
        Finding::new(rule_id, Severity::Advisory, struct_name, struct_name.to_string())
    }

    #[test]
    fn test_order_by_struct_then_level_then_offset() {
        let mut aggregator = FindingAggregator::new();
        aggregator.extend(vec![
            member(RuleId::MisalignedField, "sync_pkt_t", "crc", 9),
            member(RuleId::MisalignedField, "b_rec_t", "value", 1),
            member(RuleId::MisalignedField, "sync_pkt_t", "seq", 1),
            struct_level(RuleId::ShouldBePacked, "b_rec_t"),
            member(RuleId::EvolutionRegression, "sync_pkt_t", "crc", 9),
        ]);

        let ordered: Vec<_> = aggregator
            .finish()
            .into_iter()
            .map(|f| (f.struct_name, f.member_name, f.rule_id))
            .collect();
        assert_eq!(
            ordered,
            vec![
                ("b_rec_t".to_string(), None, RuleId::ShouldBePacked),
                ("b_rec_t".to_string(), Some("value".to_string()), RuleId::MisalignedField),
                ("sync_pkt_t".to_string(), Some("seq".to_string()), RuleId::MisalignedField),
                ("sync_pkt_t".to_string(), Some("crc".to_string()), RuleId::MisalignedField),
                ("sync_pkt_t".to_string(), Some("crc".to_string()), RuleId::EvolutionRegression),
            ]
        );
    }

    #[test]
    fn test_exact_duplicates_are_dropped() {
        let mut aggregator = FindingAggregator::new();
        aggregator.add(member(RuleId::MisalignedField, "sync_pkt_t", "seq", 1));
        aggregator.add(member(RuleId::MisalignedField, "sync_pkt_t", "seq", 1));
        aggregator.add(member(RuleId::UnresolvedType, "sync_pkt_t", "seq", 1));

        assert_eq!(aggregator.len(), 2);
        assert_eq!(aggregator.duplicates(), 1);
    }

    #[test]
    fn test_order_is_independent_of_arrival() {
        let findings = vec![
            member(RuleId::MisalignedField, "z_t", "a", 3),
            struct_level(RuleId::ShouldBePacked, "a_pkt"),
            member(RuleId::MisalignedField, "a_pkt", "b", 5),
            member(RuleId::MisalignedField, "a_pkt", "a", 1),
        ];

        let mut forward = FindingAggregator::new();
        forward.extend(findings.clone());
        let mut backward = FindingAggregator::new();
        backward.extend(findings.into_iter().rev());

        assert_eq!(forward.finish(), backward.finish());
    }
}
