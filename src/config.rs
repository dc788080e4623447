// Mon Jan 19 2026 - Alex

use crate::structure::{AlignmentTable, StructureError, TargetArch};
use crate::validation::Severity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_NAMING_PATTERN: &str = r"re:_(rec|pkt(_\w+)?|header)_t$";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("Invalid alignment table: {0}")]
    Alignment(#[from] StructureError),
    #[error("max_threads must be greater than 0")]
    NoThreads,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub alignment_table: AlignmentTable,
    pub naming_patterns: Vec<String>,
    pub min_severity: Severity,
    pub check_alignment: bool,
    pub check_packing: bool,
    pub parallel: bool,
    pub max_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alignment_table: AlignmentTable::default(),
            naming_patterns: vec![DEFAULT_NAMING_PATTERN.to_string()],
            min_severity: Severity::Advisory,
            check_alignment: true,
            check_packing: true,
            parallel: true,
            max_threads: num_cpus::get(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_alignment_table(mut self, table: AlignmentTable) -> Self {
        self.alignment_table = table;
        self
    }

    pub fn with_target(self, arch: TargetArch) -> Self {
        self.with_alignment_table(arch.alignment_table())
    }

    pub fn with_naming_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.naming_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }

    pub fn with_alignment_check(mut self, enabled: bool) -> Self {
        self.check_alignment = enabled;
        self
    }

    pub fn with_packing_check(mut self, enabled: bool) -> Self {
        self.check_packing = enabled;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_threads == 0 {
            return Err(ConfigError::NoThreads);
        }
        Ok(())
    }
}
