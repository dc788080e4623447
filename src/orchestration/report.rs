// Mon Jan 19 2026 - Alex

use crate::validation::{Finding, RuleId};
use serde::Serialize;

/// Process exit code contract for whatever front end wraps the linter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitStatus {
    Clean,
    FindingsPresent,
    InputFailure,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Clean => 0,
            ExitStatus::FindingsPresent => 1,
            ExitStatus::InputFailure => 2,
        }
    }
}

/// Finished result of one analysis run.
///
/// `findings` is filtered by the configured minimum severity; `errors`
/// lists the structs that were skipped as malformed and is never filtered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LintReport {
    pub findings: Vec<Finding>,
    pub errors: Vec<Finding>,
    pub structs_total: usize,
    pub structs_analyzed: usize,
}

impl LintReport {
    pub fn exit_status(&self) -> ExitStatus {
        if self.structs_analyzed == 0 {
            ExitStatus::InputFailure
        } else if !self.findings.is_empty() || !self.errors.is_empty() {
            ExitStatus::FindingsPresent
        } else {
            ExitStatus::Clean
        }
    }

    pub fn is_clean(&self) -> bool {
        self.exit_status() == ExitStatus::Clean
    }

    pub fn count_rule(&self, rule_id: RuleId) -> usize {
        self.findings.iter().filter(|f| f.rule_id == rule_id).count()
    }
}
