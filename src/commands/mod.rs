//! Command implementations

pub mod play;
pub mod simulate;

pub use play::{PlayConfig, PlayError, run_play};
pub use simulate::{Answers, SimulateConfig, SimulationStatistics, run_simulation};
