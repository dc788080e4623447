// Mon Jan 19 2026 - Alex

use crate::config::{Config, ConfigError};
use crate::diff::EvolutionDiffer;
use crate::orchestration::aggregator::FindingAggregator;
use crate::orchestration::report::LintReport;
use crate::orchestration::scheduler::StructScheduler;
use crate::structure::{LayoutSet, RejectedRecord, StructLayout, StructureValidator};
use crate::validation::{
    AlignmentRule, Finding, NamingHeuristic, RuleBuilder, RuleId, Severity, StructRule,
};
use itertools::Itertools;
use std::collections::HashMap;

/// Result of analyzing a single struct.
#[derive(Debug, Clone, PartialEq)]
pub enum StructOutcome {
    Analyzed(Vec<Finding>),
    Malformed(Finding),
}

/// Public entry point: runs every enabled rule over a batch of layouts.
pub struct Linter {
    config: Config,
    rules: Vec<Box<dyn StructRule>>,
    validator: StructureValidator,
    differ: EvolutionDiffer,
    scheduler: StructScheduler,
}

impl Linter {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        // Compiled even when the check is off so bad patterns fail early.
        let naming = NamingHeuristic::from_sources(&config.naming_patterns)?;
        let rules = RuleBuilder::new()
            .add_rule_if(config.check_alignment, || {
                Box::new(AlignmentRule::new(config.alignment_table.clone())) as Box<dyn StructRule>
            })
            .add_rule_if(config.check_packing, || Box::new(naming) as Box<dyn StructRule>)
            .build();

        let scheduler = if config.parallel {
            StructScheduler::parallel(config.max_threads)
        } else {
            StructScheduler::sequential()
        };

        log::debug!(
            "Linter ready: rules [{}], {} scheduling",
            rules.iter().map(|r| r.name()).join(", "),
            if scheduler.is_parallel() { "parallel" } else { "sequential" }
        );

        Ok(Self {
            differ: EvolutionDiffer::new(config.alignment_table.clone()),
            config,
            rules,
            validator: StructureValidator::new(),
            scheduler,
        })
    }

    /// Validates one struct and runs every rule on it.
    pub fn analyze_struct(&self, layout: &StructLayout) -> StructOutcome {
        if let Err(e) = self.validator.validate(layout) {
            log::warn!("Skipping malformed struct {}: {}", display_name(layout), e);
            let message = format!("{} skipped: {}", display_name(layout), e);
            return StructOutcome::Malformed(
                Finding::new(RuleId::MalformedLayout, Severity::Error, layout.name(), message)
                    .located_at(layout),
            );
        }

        log::debug!("Analyzing {} ({} members)", layout.name(), layout.members().len());
        StructOutcome::Analyzed(self.rules.iter().flat_map(|rule| rule.check(layout)).collect())
    }

    /// Like `analyze_struct`, plus regressions against `baseline` when one
    /// exists.
    pub fn analyze_evolution(&self, baseline: Option<&StructLayout>, candidate: &StructLayout) -> StructOutcome {
        match (self.analyze_struct(candidate), baseline) {
            (StructOutcome::Analyzed(mut findings), Some(baseline)) => {
                match self.differ.diff(baseline, candidate) {
                    Ok(regressions) => findings.extend(regressions),
                    Err(e) => log::error!("{}", e),
                }
                StructOutcome::Analyzed(findings)
            }
            (outcome, _) => outcome,
        }
    }

    pub fn lint(&self, structs: &[StructLayout]) -> LintReport {
        self.assemble(self.lint_outcomes(structs), &[])
    }

    /// Lints a loaded set; records that could not be read are reported as
    /// malformed structs.
    pub fn lint_set(&self, set: &LayoutSet) -> LintReport {
        self.assemble(self.lint_outcomes(&set.structs), &set.rejected)
    }

    /// Lints `candidate` and attributes misalignment introduced by members
    /// added since `baseline`. Structs are paired by name; malformed
    /// baselines are ignored.
    pub fn compare(&self, baseline: &[StructLayout], candidate: &[StructLayout]) -> LintReport {
        self.assemble(self.compare_outcomes(baseline, candidate), &[])
    }

    pub fn compare_set(&self, baseline: &LayoutSet, candidate: &LayoutSet) -> LintReport {
        for rejected in &baseline.rejected {
            log::warn!("Ignoring unreadable baseline record {}", rejected.display_name());
        }
        self.assemble(
            self.compare_outcomes(&baseline.structs, &candidate.structs),
            &candidate.rejected,
        )
    }

    fn lint_outcomes(&self, structs: &[StructLayout]) -> Vec<StructOutcome> {
        let unique = unique_layouts(structs);
        self.scheduler.map(&unique, |layout| self.analyze_struct(layout))
    }

    fn compare_outcomes(&self, baseline: &[StructLayout], candidate: &[StructLayout]) -> Vec<StructOutcome> {
        let mut baselines: HashMap<&str, &StructLayout> = HashMap::new();
        for layout in baseline {
            if let Err(e) = self.validator.validate(layout) {
                log::warn!("Ignoring malformed baseline {}: {}", display_name(layout), e);
                continue;
            }
            baselines.entry(layout.name()).or_insert(layout);
        }

        let unique = unique_layouts(candidate);
        self.scheduler.map(&unique, |layout| {
            self.analyze_evolution(baselines.get(layout.name()).copied(), layout)
        })
    }

    fn assemble(&self, mut outcomes: Vec<StructOutcome>, rejected: &[RejectedRecord]) -> LintReport {
        outcomes.extend(rejected.iter().map(|r| StructOutcome::Malformed(rejected_finding(r))));
        let structs_total = outcomes.len();
        let mut findings = FindingAggregator::new();
        let mut errors = FindingAggregator::new();
        let mut structs_analyzed = 0;

        for outcome in outcomes {
            match outcome {
                StructOutcome::Analyzed(list) => {
                    structs_analyzed += 1;
                    findings.extend(
                        list.into_iter()
                            .filter(|f| f.severity >= self.config.min_severity),
                    );
                }
                StructOutcome::Malformed(finding) => errors.add(finding),
            }
        }

        let report = LintReport {
            findings: findings.finish(),
            errors: errors.finish(),
            structs_total,
            structs_analyzed,
        };
        log::info!(
            "{} findings in {} structs ({} skipped)",
            report.findings.len(),
            report.structs_analyzed,
            report.errors.len()
        );
        report
    }
}

/// Folds identical records emitted by several compilation units.
fn unique_layouts(structs: &[StructLayout]) -> Vec<&StructLayout> {
    let unique: Vec<&StructLayout> = structs.iter().unique_by(|s| s.signature()).collect();
    if unique.len() < structs.len() {
        log::debug!("Folded {} duplicate struct records", structs.len() - unique.len());
    }
    unique
}

fn rejected_finding(record: &RejectedRecord) -> Finding {
    let name = record.display_name();
    let message = format!("{} (record {}) skipped: {}", name, record.index, record.reason);
    Finding::new(RuleId::MalformedLayout, Severity::Error, &name, message)
}

fn display_name(layout: &StructLayout) -> &str {
    if layout.name().is_empty() {
        "<anon>"
    } else {
        layout.name()
    }
}
