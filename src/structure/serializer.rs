// Mon Jan 19 2026 - Alex

use crate::structure::{MemberLayout, StructLayout, StructureError};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Wire form of a struct record as written by the extractor.
#[derive(Deserialize)]
pub struct StructRecord {
    pub name: String,
    pub total_size: u64,
    pub declared_alignment: u64,
    #[serde(default, alias = "packed")]
    pub packed_explicit: bool,
    #[serde(default)]
    pub members: Vec<MemberLayout>,
    #[serde(default)]
    pub decl_file: Option<String>,
    #[serde(default)]
    pub decl_line: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LayoutDocument {
    Wrapped { structs: Vec<Value> },
    Bare(Vec<Value>),
}

impl LayoutDocument {
    fn into_records(self) -> Vec<Value> {
        match self {
            LayoutDocument::Wrapped { structs } => structs,
            LayoutDocument::Bare(structs) => structs,
        }
    }
}

/// A record that could not be read as a struct layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub index: usize,
    pub name: Option<String>,
    pub reason: String,
}

impl RejectedRecord {
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("<anon>#{}", self.index),
        }
    }
}

/// Layouts read from one or more documents, plus the records that failed.
#[derive(Debug, Clone, Default)]
pub struct LayoutSet {
    pub structs: Vec<StructLayout>,
    pub rejected: Vec<RejectedRecord>,
}

impl LayoutSet {
    pub fn is_empty(&self) -> bool {
        self.structs.is_empty() && self.rejected.is_empty()
    }

    pub fn extend(&mut self, other: LayoutSet) {
        self.structs.extend(other.structs);
        self.rejected.extend(other.rejected);
    }
}

fn read_record(index: usize, value: Value) -> Result<StructLayout, RejectedRecord> {
    let name = value.get("name").and_then(Value::as_str).map(str::to_string);
    serde_json::from_value(value).map_err(|e| RejectedRecord {
        index,
        name,
        reason: e.to_string(),
    })
}

/// Parses a layout document. Records are converted one at a time so a bad
/// record does not take the rest of the document with it. Layout
/// invariants are not checked here; malformed structs are reported during
/// analysis.
pub fn parse_layouts(json: &str) -> Result<LayoutSet, StructureError> {
    let doc: LayoutDocument = serde_json::from_str(json)?;
    let mut set = LayoutSet::default();

    for (index, value) in doc.into_records().into_iter().enumerate() {
        match read_record(index, value) {
            Ok(layout) => set.structs.push(layout),
            Err(rejected) => {
                log::warn!("Rejected record {}: {}", rejected.display_name(), rejected.reason);
                set.rejected.push(rejected);
            }
        }
    }
    Ok(set)
}

pub fn load_layouts(path: &Path) -> Result<LayoutSet, StructureError> {
    let text = fs::read_to_string(path)?;
    let set = parse_layouts(&text)?;
    log::debug!(
        "Loaded {} struct records from {} ({} rejected)",
        set.structs.len(),
        path.display(),
        set.rejected.len()
    );
    Ok(set)
}
