//! Candidate elimination
//!
//! Deterministic linear elimination: feedback accumulates in a [`KnowledgeState`],
//! and a [`CandidateSource`] walks the dictionary in order, surfacing only words
//! the knowledge still allows.

mod candidates;
mod knowledge;

pub use candidates::{CandidateSource, CandidateStats};
pub use knowledge::{KnowledgeError, KnowledgeState, Pruning};
