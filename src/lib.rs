// Mon Jan 19 2026 - Alex

pub mod config;
pub mod diff;
pub mod orchestration;
pub mod structure;
pub mod validation;

pub use config::{Config, ConfigError};
pub use diff::{DiffError, EvolutionDiffer};
pub use orchestration::{ExitStatus, FindingAggregator, LintReport, Linter};
pub use structure::{AlignmentTable, MemberLayout, StructLayout, TargetArch, TypeKind};
pub use validation::{Finding, RuleId, Severity};
