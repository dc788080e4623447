// Mon Jan 19 2026 - Alex

use crate::structure::StructLayout;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuleId {
    MisalignedField,
    ShouldBePacked,
    EvolutionRegression,
    UnresolvedType,
    MalformedLayout,
}

impl RuleId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MisalignedField => "misaligned-field",
            Self::ShouldBePacked => "should-be-packed",
            Self::EvolutionRegression => "evolution-regression",
            Self::UnresolvedType => "unresolved-type",
            Self::MalformedLayout => "malformed-layout",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Advisory,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Advisory => write!(f, "advisory"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "advisory" => Ok(Self::Advisory),
            "warn" | "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown severity: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u64,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Deduplication identity of a finding.
pub type FindingKey = (RuleId, String, Option<String>, Option<u64>);

/// One diagnostic about a struct or one of its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: RuleId,
    pub struct_name: String,
    pub member_name: Option<String>,
    pub offset: Option<u64>,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl Finding {
    /// Struct-level finding.
    pub fn new(rule_id: RuleId, severity: Severity, struct_name: &str, message: String) -> Self {
        Self {
            rule_id,
            struct_name: struct_name.to_string(),
            member_name: None,
            offset: None,
            severity,
            message,
            location: None,
        }
    }

    pub fn for_member(mut self, member_name: &str, offset: u64) -> Self {
        self.member_name = Some(member_name.to_string());
        self.offset = Some(offset);
        self
    }

    /// Copies the declaration site of `layout`, if the extractor gave one.
    pub fn located_at(mut self, layout: &StructLayout) -> Self {
        self.location = match (layout.decl_file(), layout.decl_line()) {
            (Some(file), Some(line)) => Some(SourceLocation {
                file: file.to_string(),
                line,
            }),
            _ => None,
        };
        self
    }

    pub fn is_struct_level(&self) -> bool {
        self.member_name.is_none()
    }

    pub fn key(&self) -> FindingKey {
        (
            self.rule_id,
            self.struct_name.clone(),
            self.member_name.clone(),
            self.offset,
        )
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "{}: ", location)?;
        }
        write!(f, "[{}] {}: {}", self.severity, self.rule_id, self.message)
    }
}
