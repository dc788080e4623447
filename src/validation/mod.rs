// Mon Jan 19 2026 - Alex

pub mod alignment_rule;
pub mod finding;
pub mod naming;
pub mod rules;

pub use alignment_rule::{check_member, AlignmentRule, MemberCheck};
pub use finding::{Finding, FindingKey, RuleId, Severity, SourceLocation};
pub use naming::{NamePattern, NamingHeuristic};
pub use rules::{RuleBuilder, StructRule};
