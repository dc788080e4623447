// Mon Jan 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StructureError {
    #[error("struct has no name")]
    MissingName,
    #[error("total size must be positive")]
    ZeroSize,
    #[error("Invalid alignment: {0}")]
    InvalidAlignment(u64),
    #[error("total size {size} is not a multiple of declared alignment {alignment}")]
    SizeNotMultiple { size: u64, alignment: u64 },
    #[error("member {member} has zero size")]
    ZeroSizedMember { member: String },
    #[error("member {member} at offset {offset} (size {size}) exceeds struct size {total_size}")]
    MemberOutOfBounds {
        member: String,
        offset: u64,
        size: u64,
        total_size: u64,
    },
    #[error("member {second} at offset {offset} overlaps {first}")]
    Overlap {
        first: String,
        second: String,
        offset: u64,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl From<serde_json::Error> for StructureError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}
