// Mon Jan 19 2026 - Alex

use crate::config::ConfigError;
use crate::structure::{Packing, PackingClassifier, StructLayout};
use crate::validation::{Finding, RuleId, Severity, StructRule};
use regex::Regex;
use std::fmt;

const REGEX_PREFIX: &str = "re:";

/// A wire-format naming convention.
///
/// `re:`-prefixed sources are regular expressions searched within the
/// struct name; everything else is a glob that must cover the whole name.
/// Both are case-sensitive.
#[derive(Debug, Clone)]
pub enum NamePattern {
    Glob(glob::Pattern),
    Regex(Regex),
}

impl NamePattern {
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidPattern {
            pattern: source.to_string(),
            reason,
        };

        match source.strip_prefix(REGEX_PREFIX) {
            Some(expr) => Regex::new(expr)
                .map(Self::Regex)
                .map_err(|e| invalid(e.to_string())),
            None => glob::Pattern::new(source)
                .map(Self::Glob)
                .map_err(|e| invalid(e.to_string())),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Glob(pattern) => pattern.matches(name),
            Self::Regex(regex) => regex.is_match(name),
        }
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Glob(pattern) => write!(f, "{}", pattern.as_str()),
            Self::Regex(regex) => write!(f, "{}{}", REGEX_PREFIX, regex.as_str()),
        }
    }
}

/// Flags unpacked structs named like wire or protocol records.
pub struct NamingHeuristic {
    patterns: Vec<NamePattern>,
    classifier: PackingClassifier,
}

impl NamingHeuristic {
    pub fn new(patterns: Vec<NamePattern>) -> Self {
        Self {
            patterns,
            classifier: PackingClassifier::new(),
        }
    }

    pub fn from_sources<S: AsRef<str>>(sources: &[S]) -> Result<Self, ConfigError> {
        let patterns = sources
            .iter()
            .map(|s| NamePattern::parse(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(patterns))
    }

    /// First pattern that makes `name` a should-be-packed candidate.
    pub fn matching_pattern(&self, name: &str, packing: Packing) -> Option<&NamePattern> {
        if packing.is_packed() {
            return None;
        }
        self.patterns.iter().find(|p| p.matches(name))
    }

    pub fn analyze(&self, layout: &StructLayout) -> Option<Finding> {
        let packing = self.classifier.classify(layout);
        let pattern = self.matching_pattern(layout.name(), packing)?;

        let message = format!(
            "{} is not packed ({} bytes padding, matches pattern '{}')",
            layout.name(),
            layout.padding_bytes(),
            pattern
        );
        Some(
            Finding::new(RuleId::ShouldBePacked, Severity::Advisory, layout.name(), message)
                .located_at(layout),
        )
    }
}

impl StructRule for NamingHeuristic {
    fn name(&self) -> &str {
        "naming"
    }

    fn check(&self, layout: &StructLayout) -> Vec<Finding> {
        self.analyze(layout).into_iter().collect()
    }
}
