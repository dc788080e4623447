// Mon Jan 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DiffError {
    #[error("cannot diff different structs: baseline {baseline}, candidate {candidate}")]
    EvolutionMismatch { baseline: String, candidate: String },
}
