// Mon Jan 19 2026 - Alex

pub mod error;
pub mod evolution;

pub use error::DiffError;
pub use evolution::{EvolutionDiffer, MemberChange, StructEvolution};
