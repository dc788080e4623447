// Mon Jan 19 2026 - Alex

pub mod aggregator;
pub mod coordinator;
pub mod report;
pub mod scheduler;

pub use aggregator::FindingAggregator;
pub use coordinator::{Linter, StructOutcome};
pub use report::{ExitStatus, LintReport};
pub use scheduler::StructScheduler;
